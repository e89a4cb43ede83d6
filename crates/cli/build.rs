use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("expositor")
        .version("0.5.0")
        .author("Expositor Contributors")
        .about("Harvest exhibitor listings from scrolling directory pages")
        .arg(clap::arg!([INPUT] "Directory URL to harvest, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(--profile <PROFILE> "Site profile: auto, a built-in name, or a JSON file")
                .default_value("auto"),
        )
        .arg(clap::arg!(--"card-selector" <SELECTOR> "Override the profile's card selector"))
        .arg(clap::arg!(--origin <URL> "Override the origin prefixed onto relative profile links"))
        .arg(
            clap::arg!(--"scroll-pause" <SECS> "Pause between scroll probes in seconds")
                .default_value("2.0"),
        )
        .arg(clap::arg!(--"max-scrolls" <NUM> "Maximum scroll probe rounds").default_value("100"))
        .arg(
            clap::arg!(--"ready-timeout" <SECS> "How long to wait for the first card in seconds")
                .default_value("30"),
        )
        .arg(
            clap::arg!(--settle <SECS> "Grace period after the first card appears in seconds")
                .default_value("3.0"),
        )
        .arg(
            clap::arg!(--driver <DRIVER> "Renderer for URL inputs (webdriver, fetch)")
                .default_value("webdriver")
                .value_parser(["webdriver", "fetch"]),
        )
        .arg(
            clap::arg!(--webdriver <URL> "WebDriver server to connect to")
                .default_value("http://localhost:9515"),
        )
        .arg(
            clap::arg!(-o --"out-dir" <DIR> "Output directory")
                .default_value("output")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(
            clap::arg!(-f --format <FORMAT> "Output files to write (json, csv, both)")
                .default_value("both")
                .value_parser(["json", "csv", "both"]),
        )
        .arg(clap::arg!(--compact "Write compact JSON instead of pretty-printed"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds (fetch driver)").default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests (fetch driver)"))
        .arg(clap::arg!(-v --verbose "Show progress while harvesting"));

    clap_complete::generate_to(clap_complete::shells::Bash, &mut cmd, "expositor", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Zsh, &mut cmd, "expositor", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::Fish, &mut cmd, "expositor", &completions_dir).unwrap();
    clap_complete::generate_to(clap_complete::shells::PowerShell, &mut cmd, "expositor", &completions_dir)
        .unwrap();

    println!(
        "cargo:warning=Shell completions generated in: {}",
        completions_dir.display()
    );
}

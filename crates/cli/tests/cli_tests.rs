//! CLI integration tests
use predicates::prelude::*;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("expositor").unwrap()
}

fn fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

/// Flags that make fixture-backed runs complete instantly.
const FAST: [&str; 4] = ["--scroll-pause", "0", "--settle", "0"];

fn read_json(dir: &TempDir) -> serde_json::Value {
    let content = std::fs::read_to_string(dir.path().join("exhibitors.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn test_cli_file_input_writes_both_outputs() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .args(FAST)
        .args(["--profile", "imts", "-o", tmp.path().to_str().unwrap()])
        .arg(fixture_path("directory.html"))
        .assert()
        .success();

    assert!(tmp.path().join("exhibitors.json").exists());
    assert!(tmp.path().join("exhibitors.csv").exists());
}

#[test]
fn test_cli_stdin_input() {
    let tmp = TempDir::new().unwrap();
    let html = std::fs::read_to_string(fixture_path("directory.html")).unwrap();
    cmd()
        .args(FAST)
        .args(["--profile", "imts", "-o", tmp.path().to_str().unwrap()])
        .arg("-")
        .write_stdin(html)
        .assert()
        .success();

    assert!(tmp.path().join("exhibitors.json").exists());
}

#[test]
fn test_cli_harvested_records() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .args(FAST)
        .args(["--profile", "imts", "-o", tmp.path().to_str().unwrap()])
        .arg(fixture_path("directory.html"))
        .assert()
        .success();

    let records = read_json(&tmp);
    let records = records.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["name"], "Acme Machining");
    assert_eq!(records[0]["categories"][0], "CNC");
    assert_eq!(
        records[1]["profile_url"],
        "https://directory.imts.com/8_0/exhibitor/details.cfm?exhid=2002"
    );
}

#[test]
fn test_cli_json_only() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .args(FAST)
        .args(["--profile", "imts", "-f", "json", "-o", tmp.path().to_str().unwrap()])
        .arg(fixture_path("directory.html"))
        .assert()
        .success();

    assert!(tmp.path().join("exhibitors.json").exists());
    assert!(!tmp.path().join("exhibitors.csv").exists());
}

#[test]
fn test_cli_csv_only() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .args(FAST)
        .args(["--profile", "imts", "-f", "csv", "-o", tmp.path().to_str().unwrap()])
        .arg(fixture_path("directory.html"))
        .assert()
        .success();

    assert!(!tmp.path().join("exhibitors.json").exists());
    assert!(tmp.path().join("exhibitors.csv").exists());
}

#[test]
fn test_cli_compact_json() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .args(FAST)
        .args(["--profile", "imts", "-f", "json", "--compact", "-o", tmp.path().to_str().unwrap()])
        .arg(fixture_path("directory.html"))
        .assert()
        .success();

    let content = std::fs::read_to_string(tmp.path().join("exhibitors.json")).unwrap();
    assert!(!content.trim_end().contains('\n'));
}

#[test]
fn test_cli_csv_quotes_comma_names() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .args(FAST)
        .args(["--profile", "imts", "-o", tmp.path().to_str().unwrap()])
        .arg(fixture_path("directory.html"))
        .assert()
        .success();

    let csv = std::fs::read_to_string(tmp.path().join("exhibitors.csv")).unwrap();
    assert!(csv.starts_with("name,profile_url,booth,"));
    assert!(csv.contains("\"Carbide & Sons, Ltd.\""));
    assert!(csv.contains("CNC; Robotics"));
}

#[test]
fn test_cli_card_selector_override() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .args(FAST)
        .args([
            "--profile",
            "imts",
            "--card-selector",
            "div.directory-item",
            "-o",
            tmp.path().to_str().unwrap(),
        ])
        .arg(fixture_path("directory.html"))
        .assert()
        .success();

    assert_eq!(read_json(&tmp).as_array().unwrap().len(), 3);
}

#[test]
fn test_cli_interphex_profile() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .args(FAST)
        .args(["--profile", "interphex", "-o", tmp.path().to_str().unwrap()])
        .arg(fixture_path("interphex.html"))
        .assert()
        .success();

    let records = read_json(&tmp);
    assert_eq!(records.as_array().unwrap().len(), 2);
    assert_eq!(records[0]["name"], "Nova Pharma Systems");
    assert_eq!(records[0]["booth"], "Stand 8801");
}

#[test]
fn test_cli_custom_profile_file() {
    let tmp = TempDir::new().unwrap();
    let profile = tmp.path().join("custom.json");
    std::fs::write(
        &profile,
        r#"{
            "name": "custom",
            "card_selector": "article.listing",
            "origin": "https://expo.example",
            "selectors": { "name": [".company"], "profile_link": ["a[href*='vendor']"] }
        }"#,
    )
    .unwrap();

    let page = tmp.path().join("listing.html");
    std::fs::write(
        &page,
        r#"<article class="listing"><span class="company">Zenith Corp</span><a href="/vendor/7">go</a></article>"#,
    )
    .unwrap();

    cmd()
        .args(FAST)
        .args(["--profile", profile.to_str().unwrap(), "-o", tmp.path().to_str().unwrap()])
        .arg(page.to_str().unwrap())
        .assert()
        .success();

    let records = read_json(&tmp);
    assert_eq!(records[0]["name"], "Zenith Corp");
    assert_eq!(records[0]["profile_url"], "https://expo.example/vendor/7");
}

#[test]
fn test_cli_empty_directory_fails() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .args(FAST)
        .args(["--profile", "imts", "-o", tmp.path().to_str().unwrap()])
        .arg(fixture_path("empty.html"))
        .assert()
        .failure();
}

#[test]
fn test_cli_invalid_file() {
    cmd().args(FAST).arg("nonexistent.html").assert().failure();
}

#[test]
fn test_cli_unknown_profile_fails() {
    cmd()
        .args(FAST)
        .args(["--profile", "definitely-not-a-profile"])
        .arg(fixture_path("directory.html"))
        .assert()
        .failure();
}

#[test]
fn test_cli_invalid_format_rejected() {
    cmd()
        .args(["-f", "xml"])
        .arg(fixture_path("directory.html"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid format"));
}

#[test]
fn test_cli_verbose() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .args(FAST)
        .args(["-v", "--profile", "imts", "-o", tmp.path().to_str().unwrap()])
        .arg(fixture_path("directory.html"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Expositor"));
}

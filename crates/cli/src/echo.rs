use expositor_core::Progress;
use owo_colors::OwoColorize;

use crate::VERSION;

/// Print a styled banner for verbose mode
pub fn print_banner() {
    eprintln!(
        "\n{} {} {}",
        "Expositor".bold().bright_blue(),
        "v".dimmed(),
        VERSION.dimmed()
    );
    eprintln!("{}", "Harvest exhibitor listings from scrolling directory pages\n".dimmed());
}

/// Print a styled step message
pub fn print_step(step: usize, total: usize, message: &str) {
    eprintln!("{} {}", format!("[{}/{}]", step, total).dimmed(), message.bright_cyan());
}

/// Print a success message
pub fn print_success(message: &str) {
    eprintln!("{} {}", "✓".green(), message.bright_green());
}

/// Print an info message
pub fn print_info(message: &str) {
    eprintln!("{} {}", "ℹ".blue(), message.bright_blue());
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow(), message.bright_yellow());
}

/// Renders engine progress on stderr for verbose runs.
///
/// Probe counts are echoed only when they grow, so a long stall prints the
/// terminal status line instead of a hundred identical counts.
pub struct CliProgress {
    last: usize,
}

impl CliProgress {
    pub fn new() -> Self {
        Self { last: 0 }
    }
}

impl Default for CliProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl Progress for CliProgress {
    fn probe(&mut self, _round: u32, cards: usize) {
        if cards > self.last {
            self.last = cards;
            eprintln!("  {} found", cards.to_string().bright_white());
        }
    }

    fn log(&mut self, msg: &str) {
        print_info(msg);
    }
}

//! User-facing message helpers.
//!
//! stdout carries what users script against (URLs, report rows, per-file
//! failures); warnings and fatal errors go to stderr. Prefixes are colored
//! only when stdout is a TTY.

use owo_colors::{AnsiColors, OwoColorize};

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn prefix(label: &str, color: AnsiColors) -> String {
    if is_tty() {
        label.color(color).bold().to_string()
    } else {
        label.to_string()
    }
}

pub fn print_info(msg: &str) {
    println!("{} {}", prefix("info:", AnsiColors::Cyan), msg);
}

pub fn print_success(msg: &str) {
    println!("{} {}", prefix("ok:", AnsiColors::Green), msg);
}

pub fn print_warn(msg: &str) {
    eprintln!("{} {}", prefix("warn:", AnsiColors::Yellow), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", prefix("error:", AnsiColors::Red), msg);
}

/// Per-file failure in a batch; on stdout so it stays in order with the URLs.
pub fn print_item_error(msg: &str) {
    if is_tty() {
        println!("{}", msg.red());
    } else {
        println!("{}", msg);
    }
}

/// Plain line, no prefix.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

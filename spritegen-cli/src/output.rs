// spritegen-cli/src/output.rs
//
// Styled terminal output helpers shared by the subcommands.

use console::style;
use std::fmt::Display;

/// Print a heading with colored styling and clear separation
pub fn print_heading(text: &str) {
    let line = "=".repeat(50);
    println!("\n{}", style(&line).blue());
    println!("{}", style(format!(" {text} ")).bold());
    println!("{}\n", style(&line).blue());
}

/// Print a section heading (smaller than main heading)
pub fn print_section(text: &str) {
    let line = "-".repeat(40);
    println!("\n{}", style(&line).blue());
    println!("{}", style(format!(" {text} ")).bold());
    println!("{}", style(&line).blue());
}

/// Print an info line with label and value, with the label colored
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("{}: {}", style(label).cyan(), value);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("{} {}", style("✓").green().bold(), text);
}

/// Print a warning message
pub fn print_warning(text: &str) {
    println!("{} {}", style("⚠").yellow().bold(), text);
}

/// Print an error message to stderr
pub fn print_error(text: &str) {
    eprintln!("{} {}", style("✗").red().bold(), text);
}

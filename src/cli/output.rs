//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use std::fmt::Display;

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a class and where it lives: `Label: com.example.DooTest` + indented path
pub fn class(label: &str, name: &(impl Display + ?Sized), path: &str) {
    println!("{}: {}", label.green(), name.to_string().bold());
    println!("  {}", path.dimmed());
}

/// Print one entry of a problem list (red X, indented)
pub fn class_problem(name: &(impl Display + ?Sized), path: &str) {
    println!("  {} {} {}", "✗".red(), name, format!("({path})").dimmed());
}

/// Print a source root line
pub fn root(path: &str, kind: &(impl Display + ?Sized), module: &str, classes: usize, missing: bool) {
    let state = if missing { " (missing)".yellow().to_string() } else { String::new() };
    println!(
        "  {} [{}, module {}] {} classes{}",
        path,
        kind.to_string().cyan(),
        module,
        classes,
        state
    );
}

/// Print labelled config location
pub fn location(label: &str, path: &str, found: bool) {
    let mark = if found { String::new() } else { " (not found)".dimmed().to_string() };
    println!("{}: {}{}", label.green(), path, mark);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}

//! Terminal output utilities

use console::{measure_text_width, style};
use indicatif::{ProgressBar, ProgressStyle};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), style(msg).red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a cleanup/adaptation note
pub fn note(msg: &str) {
    println!("{} {}", style("🧹").yellow(), style(msg).yellow());
}

/// Print the welcome banner
pub fn banner(msg: &str) {
    println!("\n{}\n", style(msg).magenta().bold());
}

/// Create a spinner
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(spinner_style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print lines inside a rounded green box
pub fn boxed(lines: &[String]) {
    println!("{}", render_box(lines));
}

fn render_box(lines: &[String]) -> String {
    let width = lines.iter().map(|l| measure_text_width(l)).max().unwrap_or(0) + 2;
    let border = |s: String| style(s).green().to_string();

    let mut out = String::new();
    out.push('\n');
    out.push_str(&border(format!("╭{}╮", "─".repeat(width + 2))));
    out.push('\n');
    for line in std::iter::once(&String::new())
        .chain(lines.iter())
        .chain(std::iter::once(&String::new()))
    {
        let pad = width - measure_text_width(line);
        out.push_str(&format!(
            "{}  {}{}{}\n",
            border("│".to_string()),
            line,
            " ".repeat(pad),
            border("│".to_string())
        ));
    }
    out.push_str(&border(format!("╰{}╯", "─".repeat(width + 2))));
    out.push('\n');
    out
}

//! Status lines for the terminal. Everything goes to stderr so stdout stays
//! free for changelog rows.

use colored::*;

pub fn section_header(title: &str) {
    eprintln!("\n{}", title.bold().cyan());
}

/// Display a success message
pub fn success(message: &str) {
    eprintln!("{} {}", "✓".green(), message);
}

/// Display an info message
pub fn info(message: &str) {
    eprintln!("{} {}", "●".blue(), message);
}

/// Tree structure item
pub fn tree_item(is_last: bool, label: &str, value: Option<&str>) {
    let prefix = if is_last { "└─" } else { "├─" };
    if let Some(val) = value {
        eprintln!("{} {}: {}", prefix.dimmed(), label, val);
    } else {
        eprintln!("{} {}", prefix.dimmed(), label);
    }
}

/// Format a count with thousands separators
pub fn format_number(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

//! Transcript and session-list rendering.

use askify_client::{Prefs, Theme};
use askify_core::session::{ChatMessage, ChatRole, SessionSummary};
use colored::Colorize;

/// Prints every transcript entry from `from` onward and returns the new
/// cursor position. Rings the terminal bell on bot replies unless muted.
pub fn flush_transcript(transcript: &[ChatMessage], from: usize, prefs: &Prefs) -> usize {
    for message in &transcript[from..] {
        print_message(message, prefs);
        if message.role == ChatRole::Bot && !prefs.muted {
            // Terminal stand-in for the web client's send sound
            print!("\x07");
        }
    }
    transcript.len()
}

/// Prints a single message with a colored role label and a dim timestamp.
pub fn print_message(message: &ChatMessage, prefs: &Prefs) {
    let stamp = format!("[{}]", message.time).bright_black();
    match message.role {
        ChatRole::User => {
            println!("{} {}", stamp, format!("You: {}", message.text).green());
        }
        ChatRole::Bot => {
            let label = match prefs.theme {
                Theme::Dark => "Askify:".bright_blue().bold(),
                Theme::Light => "Askify:".blue().bold(),
            };
            println!("{} {}", stamp, label);
            print_bot_text(&message.text, prefs.theme);
            println!();
        }
    }
}

/// Bot text rendering: lines that carry a URL become a resource list entry,
/// everything else prints as-is.
fn print_bot_text(text: &str, theme: Theme) {
    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(url) = extract_url(trimmed) {
            let (link, rest) = (url, trimmed[find_url_end(trimmed, url)..].trim_start());
            if rest.is_empty() {
                println!("  {} {}", "-".bright_black(), link.cyan().underline());
            } else {
                println!(
                    "  {} {} {}",
                    "-".bright_black(),
                    link.cyan().underline(),
                    rest
                );
            }
        } else {
            match theme {
                Theme::Dark => println!("  {}", line.bright_white()),
                Theme::Light => println!("  {}", line),
            }
        }
    }
}

/// Returns the leading URL of a resource line, if it is one. Resource lines
/// are "http(s)://..." optionally preceded by a list dash.
fn extract_url(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('-').map(str::trim_start).unwrap_or(line);
    if rest.starts_with("http://") || rest.starts_with("https://") {
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        Some(&rest[..end])
    } else {
        None
    }
}

fn find_url_end(line: &str, url: &str) -> usize {
    line.find(url).map(|i| i + url.len()).unwrap_or(line.len())
}

/// Prints the cached session list as a numbered sidebar.
pub fn print_sessions(sessions: &[SessionSummary]) {
    if sessions.is_empty() {
        println!("{}", "No saved sessions.".bright_black());
        return;
    }
    for (i, session) in sessions.iter().enumerate() {
        let title = if session.title.is_empty() {
            "(untitled)"
        } else {
            &session.title
        };
        println!(
            "{} {} {}",
            format!("{:>3}.", i + 1).bright_black(),
            title,
            format!("({})", session.last_time).bright_black()
        );
    }
}

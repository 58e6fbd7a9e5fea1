//! Direct-message style transcript rendering for the terminal.

use chrono::{DateTime, Local, Utc};
use pixie_ai::Turn;

use crate::avatar::Avatar;

/// Total line width of the chat view.
pub const VIEW_WIDTH: usize = 64;
/// Widest a bubble's text may grow before wrapping.
const BUBBLE_WIDTH: usize = 40;

/// Everything needed to draw the chat besides the turns themselves.
#[derive(Debug, Clone)]
pub struct ChatView {
    pub assistant_name: String,
    pub assistant_avatar: Avatar,
    pub user_avatar: Avatar,
}

impl ChatView {
    pub fn header(&self) -> String {
        let title = format!("{} {}", self.assistant_avatar.badge(), self.assistant_name);
        let rule = "─".repeat(VIEW_WIDTH);
        format!("{rule}\n{title}\nActive now · type /quit to leave\n{rule}")
    }

    /// Shown while the log is still empty.
    pub fn empty_state(&self) -> String {
        [
            center(&format!("{} {}", self.assistant_avatar.badge(), self.assistant_name)),
            center("Your magical learning friend ✨"),
            center("Ask me anything and I'll help you learn! 📚"),
        ]
        .join("\n")
    }

    /// One turn as a bubble: user on the right, assistant on the left.
    pub fn turn(&self, turn: &Turn) -> String {
        let time = format_time(turn.created_at);
        let lines = wrap(&turn.text, BUBBLE_WIDTH);
        let mut out = Vec::with_capacity(lines.len() + 1);
        if turn.is_user() {
            for line in &lines {
                out.push(right(line));
            }
            out.push(right(&format!("{time} {}", self.user_avatar.badge())));
        } else {
            let badge = self.assistant_avatar.badge();
            let indent = " ".repeat(badge.chars().count() + 1);
            for (i, line) in lines.iter().enumerate() {
                if i == 0 {
                    out.push(format!("{badge} {line}"));
                } else {
                    out.push(format!("{indent}{line}"));
                }
            }
            out.push(format!("{indent}{time}"));
        }
        out.join("\n")
    }

    pub fn typing(&self) -> String {
        format!("{} • • •", self.assistant_avatar.badge())
    }
}

/// Screen shown instead of the chat when no API key is configured.
pub fn config_required(env_var: &str) -> String {
    let rule = "─".repeat(VIEW_WIDTH);
    format!(
        "{rule}\n\
         Setup required\n\
         {rule}\n\
         Pixie needs an API key before the chat can open.\n\n\
         1. Create a key with your completion provider.\n\
         2. Put it in a .env file next to where you run pixie:\n\n\
         \x20\x20\x20{env_var}=sk-...\n\n\
         \x20\x20\x20or export it in your shell.\n\
         3. Start pixie again.\n\
         {rule}"
    )
}

/// Local wall-clock time as `3:07 PM`.
pub fn format_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%-I:%M %p").to_string()
}

fn right(line: &str) -> String {
    let len = line.chars().count();
    format!("{}{line}", " ".repeat(VIEW_WIDTH.saturating_sub(len)))
}

fn center(line: &str) -> String {
    let len = line.chars().count();
    format!("{}{line}", " ".repeat(VIEW_WIDTH.saturating_sub(len) / 2))
}

/// Greedy word wrap. Words longer than `width` are split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                lines.push(word.drain(..width).collect());
            }
            let word: String = word.into_iter().collect();
            let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

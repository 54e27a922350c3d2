use branch_tree::{BranchLocator, ProjectionEntry, SiblingBranches};
use colored::Colorize;

const PREVIEW_CHARS: usize = 120;

/// "< 2/3 >" style marker for a fork head.
pub fn sibling_marker(siblings: &SiblingBranches) -> String {
    let (position, total) = siblings.position();
    let prev = if siblings.previous().is_some() { "<" } else { " " };
    let next = if siblings.next().is_some() { ">" } else { " " };
    format!("{prev} {position}/{total} {next}")
}

pub fn render_entry(entry: &ProjectionEntry) -> String {
    let indent = "  ".repeat(entry.depth);
    let id = format!("[{}]", entry.message.id.short());
    let sender = format!("{}:", entry.message.sender.label());
    let content = entry.message.preview(PREVIEW_CHARS);

    if !entry.is_active {
        return format!("{indent}{} {} {}", id, sender, content)
            .dimmed()
            .to_string();
    }

    let sender = if entry.message.is_user() {
        sender.cyan().bold()
    } else {
        sender.green().bold()
    };
    let mut line = format!("{indent}{} {} {}", id.dimmed(), sender, content);
    if entry.message.is_edited {
        line.push_str(&format!(" {}", "(edited)".dimmed()));
    }
    if let Some(siblings) = &entry.siblings {
        line.push_str(&format!("  {}", sibling_marker(siblings).yellow()));
    }
    line
}

pub fn render_view(entries: &[ProjectionEntry]) -> String {
    entries
        .iter()
        .map(render_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_path(path: &[BranchLocator]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" / ")
}

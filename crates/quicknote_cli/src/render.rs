//! Plain-text drawing of the notes screen.

use quicknote_core::{Alert, ScreenModel};

/// Draws the screen as the terminal shows it.
///
/// Layout: the input line (placeholder when empty), the add trigger, then one
/// row per note with its delete trigger and id.
pub fn render_screen(model: &ScreenModel) -> String {
    let mut out = String::new();
    if model.input.value.is_empty() {
        out.push_str(&format!("[ {} ]\n", model.input.placeholder));
    } else {
        out.push_str(&format!("[ {} ]\n", model.input.value));
    }
    out.push_str(&format!("< {} >\n", model.add_label));
    out.push_str(&"-".repeat(40));
    out.push('\n');
    for row in &model.rows {
        out.push_str(&format!(
            "{}  ({} {})\n",
            single_line(&row.text),
            row.delete_label,
            row.id
        ));
    }
    out
}

/// Draws a blocking alert.
pub fn render_alert(alert: &Alert) -> String {
    format!("{}: {}", alert.title, alert.message)
}

fn single_line(text: &str) -> String {
    text.replace(['\n', '\r'], " ")
}

//! Terminal rendering functions for tree menu.

use croptree::config::Preferences;
use unicode_width::UnicodeWidthStr;

use crate::ui::theme::{icons, icons_ascii};

use super::menu::{FlattenedNode, SelectionState};

fn state_icon(state: SelectionState, supports_unicode: bool) -> &'static str {
    match (state, supports_unicode) {
        (SelectionState::Selected, true) => icons::SELECTED,
        (SelectionState::Unselected, true) => icons::UNSELECTED,
        (SelectionState::Partial, true) => icons::PARTIAL,
        (SelectionState::Selected, false) => icons_ascii::SELECTED,
        (SelectionState::Unselected, false) => icons_ascii::UNSELECTED,
        (SelectionState::Partial, false) => icons_ascii::PARTIAL,
    }
}

/// Render a single tree node to a string
///
/// `active` is `None` for static output, which drops the cursor column.
pub fn render_tree_node(
    node: &FlattenedNode,
    active: Option<bool>,
    supports_unicode: bool,
) -> String {
    let cursor = match active {
        Some(true) => "> ",
        Some(false) => "  ",
        None => "",
    };
    let indent = "  ".repeat(node.depth);

    let expand_icon = if !node.has_children {
        // Pad leaves to the width of the expansion icon so labels line up.
        let width = if supports_unicode {
            icons::EXPAND.width()
        } else {
            icons_ascii::EXPAND.width()
        };
        " ".repeat(width + 1)
    } else {
        let icon = match (node.expanded, supports_unicode) {
            (true, true) => icons::EXPAND,
            (false, true) => icons::COLLAPSE,
            (true, false) => icons_ascii::EXPAND,
            (false, false) => icons_ascii::COLLAPSE,
        };
        format!("{} ", icon)
    };

    let count_suffix = if node.has_children {
        let noun = if node.leaf_count == 1 { "view" } else { "views" };
        format!(" ({} {})", node.leaf_count, noun)
    } else {
        String::new()
    };

    format!(
        "{}{}{}{} {}{}",
        cursor,
        indent,
        expand_icon,
        state_icon(node.state, supports_unicode),
        node.label,
        count_suffix
    )
}

/// Selection counts, the copy preferences and the live query
pub fn render_status_bar(
    selected: usize,
    total: usize,
    prefs: &Preferences,
    query: Option<&str>,
    supports_unicode: bool,
) -> String {
    let on_off = |flag: bool| if flag { "on" } else { "off" };
    let mut out = format!(
        "Selected: {}/{} views\n[v] Copy crop visibility: {}    [b] Copy 3D section box: {}",
        selected,
        total,
        on_off(prefs.copy_crop_visibility),
        on_off(prefs.copy_section_box)
    );

    if let Some(query) = query {
        let icon = if supports_unicode {
            icons::SEARCH
        } else {
            icons_ascii::SEARCH
        };
        out.push_str(&format!("\n{} {}_", icon, query));
    }
    out
}

/// Keyboard shortcuts for the current mode
pub fn render_help_bar(searching: bool) -> String {
    if searching {
        String::from("Type to filter    [Backspace] Edit    [Esc/Enter] Done")
    } else {
        String::from(
            "[a] All    [n] None    [i] Invert    [/] Search    [Enter] Confirm    [q] Quit\n\
             (Use ↑↓ to navigate, Space to toggle, →← to expand/collapse)",
        )
    }
}

/// Fit a line to the terminal width, cutting on character boundaries
pub fn truncate_to_width(line: &str, width: usize) -> String {
    if line.width() <= width {
        return line.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in line.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

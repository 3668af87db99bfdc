use crossterm::style::Color;
use dialoguer::theme::Theme;
use std::fmt;

/// Design tokens for the croptree terminal UI.
///
/// Every icon and color used on screen comes from this module.
pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const ARROW: &str = "↳";

    // Checkbox states.
    pub const SELECTED: &str = "●";
    pub const UNSELECTED: &str = "○";
    pub const PARTIAL: &str = "◐";

    // Group expansion.
    pub const EXPAND: &str = "▼";
    pub const COLLAPSE: &str = "▶";

    pub const CROP: &str = "⛶";
    pub const SEARCH: &str = "⌕";
    pub const SEPARATOR: &str = "─";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const ARROW: &str = "->";

    pub const SELECTED: &str = "[x]";
    pub const UNSELECTED: &str = "[ ]";
    pub const PARTIAL: &str = "[-]";

    pub const EXPAND: &str = "[v]";
    pub const COLLAPSE: &str = "[>]";

    pub const CROP: &str = "[CROP]";
    pub const SEARCH: &str = "/";
    pub const SEPARATOR: &str = "-";
}

// ----------------------------------------------------------------------------
// CropTreeTheme - dialoguer theme using the checkbox icons above
// ----------------------------------------------------------------------------

/// Dialoguer theme for croptree prompts.
///
/// Wraps `ColorfulTheme` and falls back to its plain counterpart when color
/// is off, so confirmation prompts match the rest of the output.
pub struct CropTreeTheme {
    unicode: bool,
    color: bool,
    colorful: dialoguer::theme::ColorfulTheme,
    plain: dialoguer::theme::SimpleTheme,
}

impl CropTreeTheme {
    pub fn new(unicode: bool, color: bool) -> Self {
        Self {
            unicode,
            color,
            colorful: dialoguer::theme::ColorfulTheme::default(),
            plain: dialoguer::theme::SimpleTheme,
        }
    }

    fn inner(&self) -> &dyn Theme {
        if self.color {
            &self.colorful
        } else {
            &self.plain
        }
    }

    pub fn selected_icon(&self) -> &'static str {
        if self.unicode {
            icons::SELECTED
        } else {
            icons_ascii::SELECTED
        }
    }

    pub fn unselected_icon(&self) -> &'static str {
        if self.unicode {
            icons::UNSELECTED
        } else {
            icons_ascii::UNSELECTED
        }
    }
}

impl Theme for CropTreeTheme {
    fn format_prompt(&self, f: &mut dyn fmt::Write, prompt: &str) -> fmt::Result {
        self.inner().format_prompt(f, prompt)
    }

    fn format_error(&self, f: &mut dyn fmt::Write, err: &str) -> fmt::Result {
        self.inner().format_error(f, err)
    }

    fn format_confirm_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        default: Option<bool>,
    ) -> fmt::Result {
        self.inner().format_confirm_prompt(f, prompt, default)
    }

    fn format_confirm_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        selection: Option<bool>,
    ) -> fmt::Result {
        self.inner()
            .format_confirm_prompt_selection(f, prompt, selection)
    }

    fn format_multi_select_prompt_item(
        &self,
        f: &mut dyn fmt::Write,
        text: &str,
        checked: bool,
        active: bool,
    ) -> fmt::Result {
        let icon = if checked {
            self.selected_icon()
        } else {
            self.unselected_icon()
        };
        let cursor = if active { ">" } else { " " };
        write!(f, "{} {} {}", cursor, icon, text)
    }
}

use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};
use croptree::config::{ColorMode, Config};
use croptree::presentation::ColorWhen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    pub fn new(json: bool, verbose: u8, cli_color: Option<ColorWhen>, config: &Config) -> Self {
        let caps = detect_capabilities();
        Self::from_caps(json, verbose, cli_color, config, caps)
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = config.output.unicode && caps.supports_unicode;

        let color = !json
            && match cli_color {
                Some(ColorWhen::Never) => false,
                Some(ColorWhen::Always) => true,
                Some(ColorWhen::Auto) | None => match config.output.color {
                    ColorMode::Never => false,
                    ColorMode::Always => true,
                    ColorMode::Auto => caps.supports_color && !caps.is_ci,
                },
            };

        Self {
            json,
            verbose,
            caps,
            color,
            unicode,
        }
    }

    /// Diagnostics on stderr at `-v` and above
    pub fn debug(&self, msg: impl AsRef<str>) {
        if self.verbose > 0 && !self.json {
            eprintln!("{}", msg.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ci_caps() -> TerminalCapabilities {
        TerminalCapabilities {
            is_tty: true,
            stdin_tty: true,
            supports_color: true,
            supports_unicode: true,
            is_ci: true,
            width: 120,
            height: 40,
        }
    }

    #[test]
    fn ci_defaults_to_no_color_when_auto() {
        let config = Config::default();
        let ui = UiContext::from_caps(false, 0, None, &config, ci_caps());
        assert!(!ui.color);
    }

    #[test]
    fn ci_allows_explicit_color_always_flag() {
        let config = Config::default();
        let ui = UiContext::from_caps(false, 0, Some(ColorWhen::Always), &config, ci_caps());
        assert!(ui.color);
    }

    #[test]
    fn json_never_colors() {
        let config = Config::default();
        let ui = UiContext::from_caps(true, 0, Some(ColorWhen::Always), &config, ci_caps());
        assert!(!ui.color);
    }

    #[test]
    fn config_can_force_ascii() {
        let mut config = Config::default();
        config.output.unicode = false;
        let ui = UiContext::from_caps(false, 0, None, &config, ci_caps());
        assert!(!ui.unicode);
    }
}

//! Parrot/neon theme tokens for the TEG dashboard.
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (focus, active tab)
//! - **Positive**: Neon green (viable devices, success)
//! - **Negative**: Hot pink (errors, failures)
//! - **Warning**: Neon orange (partial viability, alerts)
//! - **Neutral**: Cool purple (secondary info)
//! - **Muted**: Steel blue (disabled controls, hints)
//!
//! Chart datasets carry their own hex colors; [`hex`] maps them onto
//! terminal RGB.

use ratatui::style::{Color, Modifier, Style};

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0, 255, 255);
pub const POSITIVE: Color = Color::Rgb(0, 255, 128);
pub const NEGATIVE: Color = Color::Rgb(255, 20, 147);
pub const WARNING: Color = Color::Rgb(255, 140, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Rgb(170, 170, 170);

/// Parrot/neon palette as a value, for callers that pass a theme around.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub neutral: Color,
    pub muted: Color,
    pub text_primary: Color,
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: BACKGROUND,
            accent: ACCENT,
            positive: POSITIVE,
            negative: NEGATIVE,
            warning: WARNING,
            neutral: NEUTRAL,
            muted: MUTED,
            text_primary: TEXT_PRIMARY,
            text_secondary: TEXT_SECONDARY,
        }
    }

    /// Color for the share of days a device can be powered.
    pub fn viability_color(&self, percentage: f64) -> Color {
        match percentage {
            p if p > 75.0 => self.positive,
            p if p > 40.0 => self.warning,
            _ => self.negative,
        }
    }
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn positive() -> Style {
    Style::default().fg(POSITIVE)
}

pub fn negative() -> Style {
    Style::default().fg(NEGATIVE)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT_PRIMARY)
}

pub fn secondary() -> Style {
    Style::default().fg(TEXT_SECONDARY)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// Parse `#rrggbb` into an RGB color. Anything else renders as secondary text.
pub fn hex(code: &str) -> Color {
    let digits = code.strip_prefix('#').unwrap_or(code);
    if digits.len() != 6 || !digits.is_ascii() {
        return TEXT_SECONDARY;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    match (channel(0..2), channel(2..4), channel(4..6)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => TEXT_SECONDARY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_creation() {
        let theme = Theme::default();
        assert_eq!(theme.background, Color::Rgb(18, 18, 20));
        assert_eq!(theme.accent, Color::Rgb(0, 255, 255));
    }

    #[test]
    fn test_viability_color() {
        let theme = Theme::default();
        assert_eq!(theme.viability_color(100.0), theme.positive);
        assert_eq!(theme.viability_color(75.0), theme.warning);
        assert_eq!(theme.viability_color(40.1), theme.warning);
        assert_eq!(theme.viability_color(40.0), theme.negative);
    }

    #[test]
    fn test_hex_parsing() {
        assert_eq!(hex("#ff6384"), Color::Rgb(255, 99, 132));
        assert_eq!(hex("36a2eb"), Color::Rgb(54, 162, 235));
        assert_eq!(hex("#fff"), TEXT_SECONDARY);
        assert_eq!(hex("#gg0000"), TEXT_SECONDARY);
        assert_eq!(hex("#ééé"), TEXT_SECONDARY);
    }

    #[test]
    fn test_panel_styles_follow_focus() {
        assert_eq!(panel_border(true), accent());
        assert_eq!(panel_border(false), muted());
        assert_eq!(panel_title(true), accent_bold());
    }
}

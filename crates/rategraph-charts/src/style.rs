//! Named chart palettes

use plotters::style::RGBColor;
use tracing::warn;

/// Colors used to draw one page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Page background, outside the plot area
    pub page: RGBColor,
    /// Plot area background
    pub plot: RGBColor,
    /// Grid and axis lines
    pub grid: RGBColor,
    /// Titles, labels, annotations
    pub text: RGBColor,
    /// Line color when the series closes above its first value
    pub uptrend: RGBColor,
    /// Line color otherwise
    pub downtrend: RGBColor,
}

impl Palette {
    /// Deep blue theme (default)
    pub fn midnight() -> Self {
        Self {
            page: parse_color("#192C4A"),
            plot: parse_color("#071F45"),
            grid: parse_color("#216BA5"),
            text: parse_color("#A1C0EE"),
            uptrend: parse_color("#2FA01D"),
            downtrend: parse_color("#EE5F48"),
        }
    }

    /// Plain light theme
    pub fn light() -> Self {
        Self {
            page: parse_color("#F4F6FA"),
            plot: parse_color("#FFFFFF"),
            grid: parse_color("#C9D4E4"),
            text: parse_color("#24364F"),
            uptrend: parse_color("#2FA01D"),
            downtrend: parse_color("#EE5F48"),
        }
    }

    /// Resolve a style name, falling back to the default palette
    pub fn named(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "midnight" => Self::midnight(),
            "light" => Self::light(),
            other => {
                warn!(style = other, "unknown plot style, using `midnight`");
                Self::midnight()
            }
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::midnight()
    }
}

/// Parse a color string (hex format) to RGBColor; black if parsing fails
pub fn parse_color(color_str: &str) -> RGBColor {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    RGBColor(0, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parsing() {
        assert_eq!(parse_color("#FF0000"), RGBColor(255, 0, 0));
        assert_eq!(parse_color("#00FF00"), RGBColor(0, 255, 0));
        assert_eq!(parse_color("#2FA01D"), RGBColor(47, 160, 29));

        // Invalid colors default to black
        assert_eq!(parse_color("invalid"), RGBColor(0, 0, 0));
        assert_eq!(parse_color("#ZZ0000"), RGBColor(0, 0, 0));
    }

    #[test]
    fn test_named_styles() {
        assert_eq!(Palette::named("midnight"), Palette::midnight());
        assert_eq!(Palette::named("LIGHT"), Palette::light());
    }

    #[test]
    fn test_unknown_style_falls_back_to_default() {
        assert_eq!(Palette::named("seaborn"), Palette::default());
    }
}

//! Indicator composition.
//!
//! Maps a battery percentage onto a color band and a glyph text scale
//! through fixed lookup tables, then builds the full text content of a
//! status indicator update. Pixel drawing belongs to the indicator surface;
//! this module only decides what the glyph should say and how it should
//! look.

/// Color band for the indicator glyph, keyed by charge percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBand {
    Urgent,
    Warning,
    Nominal,
    Full,
}

impl ColorBand {
    /// Hex color the surface should paint the glyph with
    pub fn hex(&self) -> &'static str {
        match self {
            ColorBand::Urgent => "#FF5252",
            ColorBand::Warning => "#FFD740",
            ColorBand::Nominal => "#69F0AE",
            ColorBand::Full => "#33B5E5",
        }
    }
}

/// Inclusive upper bound for each band; anything above the last entry
/// falls through to `Full`.
const COLOR_BANDS: [(i32, ColorBand); 3] = [
    (20, ColorBand::Urgent),
    (50, ColorBand::Warning),
    (90, ColorBand::Nominal),
];

/// Band for a given charge percentage
pub fn band_for(percent: i32) -> ColorBand {
    for (max, band) in COLOR_BANDS {
        if percent <= max {
            return band;
        }
    }
    ColorBand::Full
}

/// Text scale of the glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphScale {
    Standard,
    Compact,
}

impl GlyphScale {
    /// Text size in display points
    pub fn text_size(&self) -> f32 {
        match self {
            GlyphScale::Standard => 20.0,
            GlyphScale::Compact => 15.0,
        }
    }
}

/// Scale for glyph text of the given length. Three or more characters
/// ("100", or "-1" plus a sign) need the compact size to stay inside the
/// glyph bounds.
pub fn scale_for(len: usize) -> GlyphScale {
    if len >= 3 {
        GlyphScale::Compact
    } else {
        GlyphScale::Standard
    }
}

/// Pixel-free description of the numeric glyph
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphSpec {
    pub text: String,
    pub band: ColorBand,
    pub scale: GlyphScale,
}

/// Glyph carried on an indicator update
#[derive(Debug, Clone, PartialEq)]
pub enum Glyph {
    /// Dynamic glyph composed from the current percentage
    Spec(GlyphSpec),
    /// Static stock glyph, used when a surface cannot realize a spec
    Default,
}

/// Full content of one indicator update
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorUpdate {
    pub title: String,
    pub subtitle: String,
    pub glyph: Glyph,
}

/// Compose the indicator content for a percentage and status label
pub fn compose(percent: i32, status_label: &str) -> IndicatorUpdate {
    let text = percent.to_string();
    let band = band_for(percent);
    let scale = scale_for(text.len());

    IndicatorUpdate {
        title: format!("Battery Level: {}%", percent),
        subtitle: format!("Status: {}", status_label),
        glyph: Glyph::Spec(GlyphSpec { text, band, scale }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries() {
        assert_eq!(band_for(0), ColorBand::Urgent);
        assert_eq!(band_for(20), ColorBand::Urgent);
        assert_eq!(band_for(21), ColorBand::Warning);
        assert_eq!(band_for(50), ColorBand::Warning);
        assert_eq!(band_for(51), ColorBand::Nominal);
        assert_eq!(band_for(90), ColorBand::Nominal);
        assert_eq!(band_for(91), ColorBand::Full);
        assert_eq!(band_for(100), ColorBand::Full);
    }

    #[test]
    fn test_unknown_level_sentinel_is_urgent() {
        assert_eq!(band_for(-1), ColorBand::Urgent);
    }

    #[test]
    fn test_band_colors() {
        assert_eq!(ColorBand::Urgent.hex(), "#FF5252");
        assert_eq!(ColorBand::Warning.hex(), "#FFD740");
        assert_eq!(ColorBand::Nominal.hex(), "#69F0AE");
        assert_eq!(ColorBand::Full.hex(), "#33B5E5");
    }

    #[test]
    fn test_three_digit_text_shrinks() {
        assert_eq!(scale_for("99".len()), GlyphScale::Standard);
        assert_eq!(scale_for("100".len()), GlyphScale::Compact);
        assert_eq!(scale_for("5".len()), GlyphScale::Standard);
    }

    #[test]
    fn test_compose_builds_title_and_subtitle() {
        let update = compose(73, "Charging");

        assert_eq!(update.title, "Battery Level: 73%");
        assert_eq!(update.subtitle, "Status: Charging");
        match update.glyph {
            Glyph::Spec(spec) => {
                assert_eq!(spec.text, "73");
                assert_eq!(spec.band, ColorBand::Nominal);
                assert_eq!(spec.scale, GlyphScale::Standard);
            }
            Glyph::Default => panic!("compose should produce a dynamic glyph"),
        }
    }

    #[test]
    fn test_compose_full_battery() {
        let update = compose(100, "Full");

        match update.glyph {
            Glyph::Spec(spec) => {
                assert_eq!(spec.text, "100");
                assert_eq!(spec.band, ColorBand::Full);
                assert_eq!(spec.scale, GlyphScale::Compact);
                assert_eq!(spec.scale.text_size(), 15.0);
            }
            Glyph::Default => panic!("compose should produce a dynamic glyph"),
        }
    }
}

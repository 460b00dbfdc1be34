//! Status indicator surface.
//!
//! The monitor keeps exactly one always-visible indicator current by
//! repeatedly applying updates to a surface. Surfaces update in place and
//! alert at most once, on first presentation. Realizing the dynamic numeric
//! glyph may be impossible on some hosts; such surfaces return
//! [`IndicatorError::GlyphUnsupported`] and are re-driven with the static
//! default glyph instead.

use thiserror::Error;

use crate::render::{Glyph, IndicatorUpdate};

/// Errors a surface can raise while applying an update
#[derive(Error, Debug)]
pub enum IndicatorError {
    /// The environment cannot realize dynamic glyphs; retry with
    /// [`Glyph::Default`].
    #[error("dynamic glyph rendering is not supported in this environment")]
    GlyphUnsupported,

    /// The surface itself failed
    #[error("indicator surface error: {0}")]
    Surface(String),
}

/// One always-visible status surface
pub trait IndicatorSurface: Send {
    /// Apply an update in place. Implementations must not re-alert on
    /// subsequent applies.
    fn apply(&mut self, update: &IndicatorUpdate) -> Result<(), IndicatorError>;
}

/// Surface that renders the indicator as a log status line.
///
/// Stands in for a host tray or notification area: the first update is
/// announced at info level, later redraws stay at debug so the indicator
/// never re-alerts.
pub struct TextIndicator {
    presented: bool,
}

impl TextIndicator {
    pub fn new() -> Self {
        Self { presented: false }
    }
}

impl Default for TextIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorSurface for TextIndicator {
    fn apply(&mut self, update: &IndicatorUpdate) -> Result<(), IndicatorError> {
        let glyph = match &update.glyph {
            Glyph::Spec(spec) => format!(
                "[{} {} {}pt]",
                spec.text,
                spec.band.hex(),
                spec.scale.text_size()
            ),
            Glyph::Default => "[default glyph]".to_string(),
        };

        if self.presented {
            tracing::debug!("{} | {} {}", update.title, update.subtitle, glyph);
        } else {
            self.presented = true;
            tracing::info!("{} | {} {}", update.title, update.subtitle, glyph);
        }
        Ok(())
    }
}

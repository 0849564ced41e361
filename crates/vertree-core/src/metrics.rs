//! Text measurement for sizing node boxes.
//!
//! Node boxes are sized from their label text, so every layout needs a
//! [`TextMetrics`] implementation. Two are provided:
//!
//! - [`FontMetrics`] - measures with real fonts through cosmic-text shaping
//! - [`FixedMetrics`] - a monospace cell model with fixed advance and line height
//!
//! Metrics are always passed in explicitly; nothing here reads global state.
//!
//! # Quick Start
//!
//! ```
//! # use vertree_core::metrics::{FixedMetrics, TextMetrics};
//! let metrics = FixedMetrics::new(8.0, 16.0).unwrap();
//! assert_eq!(metrics.width("v1.0"), 32.0);
//! assert_eq!(metrics.height(), 16.0);
//! ```

use std::sync::{Mutex, PoisonError};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{debug, info};
use thiserror::Error;

/// Errors raised while setting up a text metrics provider.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("no font faces are available to measure text")]
    NoFonts,

    #[error("font size must be positive, got {0}")]
    InvalidFontSize(u16),

    #[error("fixed metrics need positive finite dimensions, got advance {advance} and line height {line_height}")]
    InvalidFixedMetrics { advance: f32, line_height: f32 },
}

/// Measures label text in pixels.
pub trait TextMetrics {
    /// Width of `text` in pixels. Multi-line text reports its widest line.
    fn width(&self, text: &str) -> f32;

    /// Height of a single line of text in pixels.
    fn height(&self) -> f32;
}

impl<T: TextMetrics + ?Sized> TextMetrics for &T {
    fn width(&self, text: &str) -> f32 {
        (**self).width(text)
    }

    fn height(&self) -> f32 {
        (**self).height()
    }
}

impl<T: TextMetrics + ?Sized> TextMetrics for Box<T> {
    fn width(&self, text: &str) -> f32 {
        (**self).width(text)
    }

    fn height(&self) -> f32 {
        (**self).height()
    }
}

/// Monospace text model: every character advances by the same amount.
///
/// Deterministic across machines, which makes it the metrics of choice for
/// tests and for headless environments without fonts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    advance: f32,
    line_height: f32,
}

impl FixedMetrics {
    /// Creates a monospace model with the given per-character `advance` and `line_height`.
    ///
    /// # Errors
    ///
    /// Returns [`MetricsError::InvalidFixedMetrics`] if either value is not
    /// finite and strictly positive.
    pub fn new(advance: f32, line_height: f32) -> Result<Self, MetricsError> {
        let valid = |value: f32| value.is_finite() && value > 0.0;
        if !valid(advance) || !valid(line_height) {
            return Err(MetricsError::InvalidFixedMetrics {
                advance,
                line_height,
            });
        }

        Ok(Self {
            advance,
            line_height,
        })
    }
}

impl TextMetrics for FixedMetrics {
    fn width(&self, text: &str) -> f32 {
        text.lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0) as f32
            * self.advance
    }

    fn height(&self) -> f32 {
        self.line_height
    }
}

/// Font-backed text measurement using cosmic-text shaping.
///
/// Owns its own [`FontSystem`]; loading system fonts is expensive, so build
/// one instance and share it by reference across layouts.
pub struct FontMetrics {
    font_system: Mutex<FontSystem>,
    family: String,
    metrics: Metrics,
}

impl FontMetrics {
    /// Loads the system fonts and prepares to measure text in `family` at `font_size` points.
    ///
    /// # Errors
    ///
    /// - [`MetricsError::InvalidFontSize`] if `font_size` is zero
    /// - [`MetricsError::NoFonts`] if no font faces could be loaded; sizing
    ///   boxes with empty metrics would silently produce overlapping nodes
    pub fn new(family: &str, font_size: u16) -> Result<Self, MetricsError> {
        if font_size == 0 {
            return Err(MetricsError::InvalidFontSize(font_size));
        }

        info!(family, font_size; "Initializing FontSystem");
        let font_system = FontSystem::new();
        if font_system.db().faces().next().is_none() {
            return Err(MetricsError::NoFonts);
        }

        // Points to pixels at standard DPI
        let font_size_px = font_size as f32 * 1.33;
        let metrics = Metrics::new(font_size_px, font_size_px * 1.15);

        Ok(Self {
            font_system: Mutex::new(font_system),
            family: family.to_string(),
            metrics,
        })
    }
}

impl std::fmt::Debug for FontMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontMetrics")
            .field("family", &self.family)
            .field("font_size_px", &self.metrics.font_size)
            .field("line_height", &self.metrics.line_height)
            .finish()
    }
}

impl TextMetrics for FontMetrics {
    fn width(&self, text: &str) -> f32 {
        if text.is_empty() {
            return 0.0;
        }

        let mut font_system = self
            .font_system
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut buffer = Buffer::new(&mut font_system, self.metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);

        let attrs = Attrs::new().family(Family::Name(&self.family));
        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        let width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|glyph| glyph.x + glyph.w))
            .fold(None, |acc: Option<f32>, run_width| {
                Some(acc.map_or(run_width, |acc| acc.max(run_width)))
            });

        width.unwrap_or_else(|| {
            debug!(text; "No layout runs produced, estimating width");
            text.chars().count() as f32 * (self.metrics.font_size * 0.55)
        })
    }

    fn height(&self) -> f32 {
        self.metrics.line_height
    }
}

//! SVG rendering of charts and colour keys.
//!
//! Both renderers write into an append-only [`SvgDocument`] and share a
//! single cell-emission routine, so a chart cell and a key swatch for the
//! same palette index look identical under the same [`RenderMode`].
//!
//! # Presentation Variants
//!
//! A [`RenderMode`] combines independent toggles:
//!
//! | Preset                         | Fill       | Symbols | Minor lines |
//! |--------------------------------|------------|---------|-------------|
//! | [`RenderMode::color`]          | thread RGB | off     | off         |
//! | [`RenderMode::color_symbols`]  | thread RGB | on      | on          |
//! | [`RenderMode::monochrome`]     | white      | on      | on          |
//!
//! Symbols come from a fixed set of eleven [`Glyph`]s. Palette indices past
//! the end of that set are drawn without a symbol.
//!
//! # Chart Geometry
//!
//! The chart is offset by one cell on the top and left, leaving a margin for
//! the optional centre marks. Major gridlines are drawn every ten cells.

mod document;
mod glyph;
mod key;
mod mode;
mod pattern;

pub use document::{escape_xml, SvgDocument};
pub use glyph::Glyph;
pub use key::KeyRenderer;
pub use mode::{Fill, RenderMode};
pub use pattern::{PatternRenderer, MAJOR_GRID_STRIDE};

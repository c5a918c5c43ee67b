//! stitch-pattern: turn pixel grids into cross-stitch charts
//!
//! This library holds the algorithmic part of the cross-stitch pipeline:
//! colour quantization, matching quantized colours against a thread
//! reference table, cleaning up the resulting index grid, and rendering the
//! chart and its colour key as SVG documents. It performs no file or network
//! I/O; callers hand it an already decoded and resized [`PixelGrid`] and an
//! in-memory [`ReferenceTable`].
//!
//! # Quick Start
//!
//! The [`StitchPattern`] builder is the primary entry point:
//!
//! ```
//! use stitch_pattern::{
//!     PixelGrid, QuantizeMethod, ReferenceEntry, ReferenceTable, RenderMode, Rgb, StitchPattern,
//! };
//!
//! let table = ReferenceTable::new(vec![
//!     ReferenceEntry::new("310", "Black", Rgb::new(0, 0, 0)),
//!     ReferenceEntry::new("B5200", "Snow White", Rgb::new(255, 255, 255)),
//! ])
//! .unwrap();
//!
//! let pixels = PixelGrid::new(vec![Rgb::new(250, 250, 250); 4], 2, 2).unwrap();
//! let pattern = StitchPattern::new(QuantizeMethod::KMeans, 1)
//!     .build(&pixels, &table)
//!     .unwrap();
//!
//! assert_eq!(pattern.resolved().entry(0).id(), "B5200");
//! let svg = pattern.render_chart(10, RenderMode::color()).finish();
//! assert!(svg.starts_with("<svg"));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! PixelGrid ──► quantize::reduce ──► (IndexGrid, Palette)
//!                                        │          │
//!                                        │          ▼
//!                                        │   palette::resolve ◄── ReferenceTable
//!                                        ▼          │
//!                               grid::clean         ▼
//!                                        │   ResolvedPalette
//!                                        ▼          │
//!                       render::PatternRenderer ◄───┤
//!                       render::KeyRenderer     ◄───┘
//! ```
//!
//! Every stage consumes the complete output of the previous one. The only
//! stage that rewrites data it did not create is the smoother, which takes
//! ownership of the index grid it cleans.
//!
//! # Colour Distance
//!
//! Thread matching uses a weighted Euclidean distance in RGB, measured from
//! the unrounded cluster centre to each thread's 8-bit color:
//!
//! ```text
//! d = sqrt(2·Δr² + 4·Δg² + 3·Δb²)
//! ```
//!
//! Green and blue differences count more than red ones, a cheap
//! approximation of how sensitive the eye is to each channel. See
//! [`weighted_distance_from`].

pub mod api;
pub mod color;
pub mod grid;
pub mod palette;
pub mod quantize;
pub mod render;


pub use api::{Pattern, PatternError, StitchPattern};
pub use color::Rgb;
pub use grid::{clean, clean_in_place, GridError, IndexGrid, PixelGrid};
pub use palette::{
    resolve, weighted_distance, weighted_distance_from, NearestReference, PaletteError,
    ParseColorError, ReferenceEntry, ReferenceTable, ResolvedPalette,
};
pub use quantize::{reduce, Cluster, Clustering, Palette, QuantizeError, QuantizeMethod};
pub use render::{Fill, Glyph, KeyRenderer, PatternRenderer, RenderMode, SvgDocument};

//! crossstitch - cross-stitch pattern generator
//!
//! Turns a raster image into printable SVG stitch charts and a thread key.
//! The pattern algorithms live in the `stitch_pattern` crate; this library
//! holds the file, network and configuration plumbing around them and is
//! exposed for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod services;

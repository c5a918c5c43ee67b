//! Color types
//!
//! Everything in a cross-stitch chart is expressed in plain 8-bit RGB: the
//! decoded pixels, the quantized palette and the thread reference table all
//! share the [`Rgb`] type.
//!
//! # Example
//!
//! ```
//! use stitch_pattern::Rgb;
//!
//! let red: Rgb = "#C72B3B".parse().unwrap();
//! assert_eq!(red.to_bytes(), [199, 43, 59]);
//! assert_eq!(red.to_css(), "rgb(199,43,59)");
//! ```

mod rgb;

pub use rgb::Rgb;

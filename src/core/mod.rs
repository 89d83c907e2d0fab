//! Core Module
//!
//! Small value types shared by every other module:
//!
//! - [`Rect`] / [`Size`]: document-space element boxes and surface sizes
//! - [`hex_color`]: `0xRRGGBB` to linear-ish RGB conversion
//! - [`FrameClock`], [`Timer`], [`OneShotTimer`]: frame timing primitives

pub mod color;
pub mod rect;
pub mod time;

pub use color::hex_color;
pub use rect::{Rect, Size};
pub use time::{FrameClock, OneShotTimer, Timer};

//! # floem-seekbar
//!
//! A gradient color seek bar widget for [Floem](https://github.com/lapce/floem).
//!
//! Renders a bar filled with a multi-stop gradient between configurable seed
//! colors and a draggable thumb that snaps to discrete positions. An
//! optional second bar picks an alpha value, and an optional preview circle
//! floats above the thumb while it is dragged.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_seekbar::{color_seek_bar, SeekColor};
//!
//! let color = RwSignal::new(SeekColor::rgb(255, 102, 0));
//! // Use `color_seek_bar(color).show_alpha_bar(true)` in your Floem view tree.
//! ```
//!
//! The headless [`SeekBarState`] exposes the same position/color model
//! without a window, for hosts that drive the widget programmatically.

mod checkerboard;
mod color;
mod constants;
mod gradient;
mod seek_bar;
mod state;

pub use color::SeekColor;
pub use seek_bar::{color_seek_bar, ColorChange, ColorSeekBar};
pub use state::{PaletteError, SeekBarState};

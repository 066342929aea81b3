//! Default configuration values for the seek bar.

use crate::color::SeekColor;

/// Default seed palette: a rainbow sweep bracketed by black.
pub const DEFAULT_COLOR_SEEDS: [SeekColor; 11] = [
    SeekColor::rgb(0x00, 0x00, 0x00),
    SeekColor::rgb(0x99, 0x00, 0xFF),
    SeekColor::rgb(0x00, 0x00, 0xFF),
    SeekColor::rgb(0x00, 0xFF, 0x00),
    SeekColor::rgb(0x00, 0xFF, 0xFF),
    SeekColor::rgb(0xFF, 0x00, 0x00),
    SeekColor::rgb(0xFF, 0x00, 0xFF),
    SeekColor::rgb(0xFF, 0x66, 0x00),
    SeekColor::rgb(0xFF, 0xFF, 0x00),
    SeekColor::rgb(0xFF, 0xFF, 0xFF),
    SeekColor::rgb(0x00, 0x00, 0x00),
];

/// Number of discrete steps on the color bar.
pub const DEFAULT_MAX_POSITION: i32 = 100;

/// Lower bound of the alpha bar range.
pub const DEFAULT_ALPHA_MIN_POSITION: i32 = 0;

/// Upper bound of the alpha bar range.
pub const DEFAULT_ALPHA_MAX_POSITION: i32 = 255;

/// Bar track thickness.
pub const BAR_HEIGHT: f64 = 2.0;

/// Thumb diameter.
pub const THUMB_HEIGHT: f64 = 16.0;

/// Gap between the color bar and the alpha bar.
pub const BAR_MARGIN: f64 = 5.0;

/// Preview circle ring width.
pub const PREVIEW_STROKE_WIDTH: f64 = 2.0;

/// Preview circle radius.
pub const PREVIEW_RADIUS: f64 = 24.0;

/// Gap between the preview circle and the bar.
pub const PREVIEW_MARGIN: f64 = 6.0;

/// Checkerboard cell size under the alpha bar.
pub const CHECKER_CELL: f64 = 5.0;

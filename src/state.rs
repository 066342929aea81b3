//! Headless seek bar state.
//!
//! `SeekBarState` owns the seed palette, the discrete bar positions, the
//! alpha range, and the derived color cache. The widget view mutates it from
//! pointer events and layout callbacks; hosts can also drive it directly.
//! Every setter leaves the state consistent — degenerate inputs are clamped
//! or corrected locally, never returned as errors.

use floem::kurbo::Rect;
use thiserror::Error;

use crate::color::SeekColor;
use crate::constants;
use crate::gradient;

/// Configuration error raised when the seed palette cannot define a gradient.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("color seeds need at least two entries, got {0}")]
    TooFewSeeds(usize),
}

/// Which bar the active pointer drag is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DragTarget {
    Idle,
    ColorBar,
    AlphaBar,
}

/// A pointer is "on" a bar when it falls inside the bar rectangle expanded
/// by the thumb radius on all sides, so the visual thumb is the touch target.
pub(crate) fn is_on_bar(bar: &Rect, thumb_radius: f64, x: f64, y: f64) -> bool {
    bar.x0 - thumb_radius < x
        && x < bar.x1 + thumb_radius
        && bar.y0 - thumb_radius < y
        && y < bar.y1 + thumb_radius
}

pub struct SeekBarState {
    seeds: Vec<SeekColor>,
    max_position: i32,
    color_bar_position: i32,
    alpha_min_position: i32,
    alpha_max_position: i32,
    alpha_bar_position: i32,
    show_alpha_bar: bool,
    vertical: bool,
    /// Rendered bar length in pixels; 0 until layout runs.
    bar_width: f32,
    colors: Vec<SeekColor>,
    /// Color requested before geometry was known, applied on first layout.
    pending_color: Option<SeekColor>,
    ready: bool,
    drag: DragTarget,
    palette_rev: u64,
}

impl Default for SeekBarState {
    fn default() -> Self {
        Self::from_seeds(constants::DEFAULT_COLOR_SEEDS.to_vec())
    }
}

impl SeekBarState {
    /// Create a state with the given seed palette and default configuration.
    pub fn new(seeds: Vec<SeekColor>) -> Result<Self, PaletteError> {
        if seeds.len() < 2 {
            return Err(PaletteError::TooFewSeeds(seeds.len()));
        }
        Ok(Self::from_seeds(seeds))
    }

    fn from_seeds(seeds: Vec<SeekColor>) -> Self {
        Self {
            seeds,
            max_position: constants::DEFAULT_MAX_POSITION,
            color_bar_position: 0,
            alpha_min_position: constants::DEFAULT_ALPHA_MIN_POSITION,
            alpha_max_position: constants::DEFAULT_ALPHA_MAX_POSITION,
            alpha_bar_position: constants::DEFAULT_ALPHA_MIN_POSITION,
            show_alpha_bar: false,
            vertical: false,
            bar_width: 0.0,
            colors: Vec::new(),
            pending_color: None,
            ready: false,
            drag: DragTarget::Idle,
            palette_rev: 0,
        }
    }

    pub fn color_seeds(&self) -> &[SeekColor] {
        &self.seeds
    }

    /// Replace the seed palette and rebuild the color cache.
    pub fn set_color_seeds(&mut self, seeds: Vec<SeekColor>) -> Result<(), PaletteError> {
        if seeds.len() < 2 {
            return Err(PaletteError::TooFewSeeds(seeds.len()));
        }
        self.seeds = seeds;
        self.palette_rev += 1;
        self.cache_colors();
        Ok(())
    }

    pub fn max_position(&self) -> i32 {
        self.max_position
    }

    /// Set the number of discrete steps (at least 1) and rebuild the cache.
    /// The current position is clamped into the new range.
    pub fn set_max_position(&mut self, value: i32) {
        self.max_position = value.max(1);
        self.color_bar_position = self.color_bar_position.clamp(0, self.max_position);
        self.cache_colors();
    }

    pub fn color_bar_position(&self) -> i32 {
        self.color_bar_position
    }

    /// Set the color bar position; out-of-range values clamp to the bounds.
    pub fn set_color_bar_position(&mut self, value: i32) {
        self.color_bar_position = value.clamp(0, self.max_position);
    }

    pub fn alpha_bar_position(&self) -> i32 {
        self.alpha_bar_position
    }

    pub fn set_alpha_bar_position(&mut self, value: i32) {
        self.alpha_bar_position = value.clamp(self.alpha_min_position, self.alpha_max_position);
    }

    pub fn alpha_min_position(&self) -> i32 {
        self.alpha_min_position
    }

    /// Set the lower alpha bound. Corrected to keep
    /// `0 <= min < max`; the alpha position is re-clamped.
    pub fn set_alpha_min_position(&mut self, value: i32) {
        self.alpha_min_position = value;
        if self.alpha_min_position >= self.alpha_max_position {
            self.alpha_min_position = self.alpha_max_position - 1;
        } else if self.alpha_min_position < 0 {
            self.alpha_min_position = 0;
        }
        if self.alpha_min_position != value {
            log::warn!(
                "alpha min position {} corrected to {}",
                value,
                self.alpha_min_position
            );
        }
        self.alpha_bar_position = self
            .alpha_bar_position
            .clamp(self.alpha_min_position, self.alpha_max_position);
    }

    pub fn alpha_max_position(&self) -> i32 {
        self.alpha_max_position
    }

    /// Set the upper alpha bound. Corrected to keep
    /// `min < max <= 255`; the alpha position is re-clamped.
    pub fn set_alpha_max_position(&mut self, value: i32) {
        self.alpha_max_position = value;
        if self.alpha_max_position > 255 {
            self.alpha_max_position = 255;
        } else if self.alpha_max_position <= self.alpha_min_position {
            self.alpha_max_position = self.alpha_min_position + 1;
        }
        if self.alpha_max_position != value {
            log::warn!(
                "alpha max position {} corrected to {}",
                value,
                self.alpha_max_position
            );
        }
        self.alpha_bar_position = self
            .alpha_bar_position
            .clamp(self.alpha_min_position, self.alpha_max_position);
    }

    pub fn show_alpha_bar(&self) -> bool {
        self.show_alpha_bar
    }

    pub fn set_show_alpha_bar(&mut self, show: bool) {
        self.show_alpha_bar = show;
    }

    pub fn is_vertical(&self) -> bool {
        self.vertical
    }

    pub fn set_vertical(&mut self, vertical: bool) {
        self.vertical = vertical;
    }

    /// Alpha value derived from the alpha bar: `255 - alphaBarPosition`.
    pub fn alpha_value(&self) -> i32 {
        255 - self.alpha_bar_position
    }

    /// The precomputed color for every discrete position. Empty until
    /// geometry is known.
    pub fn colors(&self) -> &[SeekColor] {
        &self.colors
    }

    /// The color at the current position.
    ///
    /// Reads the cache when possible and falls back to interpolating from
    /// the unit position when the cache is stale or geometry is unknown.
    /// `with_alpha` composes the current alpha value; otherwise the result
    /// is opaque.
    pub fn color(&self, with_alpha: bool) -> SeekColor {
        let base = match self.colors.get(self.color_bar_position as usize) {
            Some(&c) => c,
            None => gradient::pick_color(
                &self.seeds,
                self.color_bar_position as f32 / self.max_position as f32,
                1.0,
            ),
        };
        if with_alpha {
            base.with_alpha(self.alpha_value() as u8)
        } else {
            base
        }
    }

    /// The color at the current position, with alpha composed when the
    /// alpha bar is shown.
    pub fn selected_color(&self) -> SeekColor {
        self.color(self.show_alpha_bar)
    }

    /// Position of `color` in the cache (alpha ignored), or `None` when the
    /// color is not on the bar.
    pub fn color_index_position(&self, color: SeekColor) -> Option<usize> {
        let opaque = color.opaque();
        self.colors.iter().position(|&c| c == opaque)
    }

    /// Move the bar to the given color.
    ///
    /// The color must match a cache entry exactly; unmatched colors reset
    /// the bar to position 0. Before geometry is known the value is buffered
    /// and applied on the first successful layout. Returns whether the value
    /// was applied now.
    pub fn set_color(&mut self, color: SeekColor) -> bool {
        if !self.ready {
            self.pending_color = Some(color);
            return false;
        }
        let position = self
            .color_index_position(color)
            .map(|i| i as i32)
            .unwrap_or(0);
        self.set_color_bar_position(position);
        true
    }

    /// Rendered bar length in pixels.
    pub fn bar_width(&self) -> f32 {
        self.bar_width
    }

    /// Geometry is known and the color cache is built.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Record the rendered bar length from layout and rebuild the cache.
    ///
    /// Returns true when this call applied a buffered `set_color`.
    pub fn set_geometry(&mut self, bar_width: f32) -> bool {
        self.bar_width = bar_width;
        self.cache_colors();
        if bar_width >= 1.0 {
            self.ready = true;
            if let Some(color) = self.pending_color.take() {
                self.set_color(color);
                return true;
            }
        }
        false
    }

    fn cache_colors(&mut self) {
        // No geometry yet, keep whatever cache exists.
        if self.bar_width < 1.0 {
            return;
        }
        self.colors = gradient::cache_colors(&self.seeds, self.max_position, self.bar_width);
        log::debug!("cached {} bar colors", self.colors.len());
    }

    pub(crate) fn palette_rev(&self) -> u64 {
        self.palette_rev
    }

    pub(crate) fn dragging(&self) -> bool {
        self.drag != DragTarget::Idle
    }

    pub(crate) fn dragging_color_bar(&self) -> bool {
        self.drag == DragTarget::ColorBar
    }

    /// Route a press to a bar. The color bar wins when both regions are hit;
    /// the alpha bar only participates while shown. Returns whether the
    /// press claimed the pointer stream.
    pub(crate) fn pointer_down(&mut self, on_color_bar: bool, on_alpha_bar: bool) -> bool {
        self.drag = if on_color_bar {
            DragTarget::ColorBar
        } else if self.show_alpha_bar && on_alpha_bar {
            DragTarget::AlphaBar
        } else {
            DragTarget::Idle
        };
        self.dragging()
    }

    /// Recompute the dragged bar's position from the pointer offset along
    /// the bar's primary axis (relative to the bar's left edge). Truncates
    /// toward zero, then clamps. Returns whether a drag is active.
    pub(crate) fn drag_to(&mut self, offset: f32) -> bool {
        match self.drag {
            DragTarget::Idle => false,
            DragTarget::ColorBar => {
                let value = offset / self.bar_width * self.max_position as f32;
                self.color_bar_position = (value as i32).clamp(0, self.max_position);
                true
            }
            DragTarget::AlphaBar => {
                let span = (self.alpha_max_position - self.alpha_min_position) as f32;
                let value = offset / self.bar_width * span + self.alpha_min_position as f32;
                self.alpha_bar_position =
                    (value as i32).clamp(self.alpha_min_position, self.alpha_max_position);
                true
            }
        }
    }

    /// End the drag (release and cancel are identical). Returns whether a
    /// drag had been active, i.e. whether the final value should be
    /// committed.
    pub(crate) fn release(&mut self) -> bool {
        let was_dragging = self.dragging();
        self.drag = DragTarget::Idle;
        was_dragging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: SeekColor = SeekColor::rgb(0, 0, 0);
    const WHITE: SeekColor = SeekColor::rgb(255, 255, 255);

    fn ready_state(seeds: &[SeekColor]) -> SeekBarState {
        let mut state = SeekBarState::new(seeds.to_vec()).unwrap();
        state.set_geometry(100.0);
        state
    }

    #[test]
    fn rejects_short_palette() {
        assert!(SeekBarState::new(vec![]).is_err());
        assert!(SeekBarState::new(vec![BLACK]).is_err());
        assert!(SeekBarState::new(vec![BLACK, WHITE]).is_ok());

        let mut state = SeekBarState::default();
        assert!(state.set_color_seeds(vec![WHITE]).is_err());
        assert_eq!(state.color_seeds().len(), 11);
    }

    #[test]
    fn color_bar_position_clamps() {
        let mut state = ready_state(&[BLACK, WHITE]);
        state.set_color_bar_position(state.max_position() + 50);
        assert_eq!(state.color_bar_position(), state.max_position());
        state.set_color_bar_position(-50);
        assert_eq!(state.color_bar_position(), 0);
    }

    #[test]
    fn alpha_bounds_stay_consistent() {
        let mut state = SeekBarState::default();
        state.set_alpha_max_position(state.alpha_min_position());
        assert_eq!(state.alpha_max_position(), state.alpha_min_position() + 1);

        let mut state = SeekBarState::default();
        state.set_alpha_min_position(300);
        assert_eq!(state.alpha_min_position(), state.alpha_max_position() - 1);
        state.set_alpha_min_position(-10);
        assert_eq!(state.alpha_min_position(), 0);

        let mut state = SeekBarState::default();
        state.set_alpha_bar_position(200);
        state.set_alpha_max_position(100);
        assert_eq!(state.alpha_max_position(), 100);
        assert_eq!(state.alpha_bar_position(), 100);
    }

    #[test]
    fn alpha_value_is_inverted_position() {
        let mut state = SeekBarState::default();
        state.set_alpha_bar_position(64);
        assert_eq!(state.alpha_value(), 191);
    }

    #[test]
    fn cache_round_trips_through_index_lookup() {
        let seeds = [
            SeekColor::rgb(255, 0, 0),
            SeekColor::rgb(0, 255, 0),
            SeekColor::rgb(0, 0, 255),
        ];
        let mut state = SeekBarState::new(seeds.to_vec()).unwrap();
        state.set_max_position(10);
        state.set_geometry(100.0);
        let colors = state.colors().to_vec();
        for (i, &c) in colors.iter().enumerate() {
            assert_eq!(state.color_index_position(c), Some(i));
            // alpha is stripped before the lookup
            assert_eq!(state.color_index_position(c.with_alpha(5)), Some(i));
        }
    }

    #[test]
    fn color_composes_alpha_on_request() {
        let mut state = ready_state(&[BLACK, WHITE]);
        state.set_show_alpha_bar(true);
        state.set_color_bar_position(50);
        state.set_alpha_bar_position(64);

        assert_eq!(state.color(false), SeekColor::rgb(128, 128, 128));
        assert_eq!(state.color(true), SeekColor::rgba(128, 128, 128, 191));
        assert_eq!(state.selected_color(), state.color(true));

        state.set_show_alpha_bar(false);
        assert_eq!(state.selected_color(), state.color(false));
    }

    #[test]
    fn color_falls_back_without_geometry() {
        let mut state = SeekBarState::new(vec![BLACK, WHITE]).unwrap();
        assert!(state.colors().is_empty());
        state.set_color_bar_position(50);
        assert_eq!(state.color(false), SeekColor::rgb(128, 128, 128));
    }

    #[test]
    fn set_color_matches_cache_entry() {
        let mut state = ready_state(&[BLACK, WHITE]);
        let target = state.colors()[42];
        state.set_color_bar_position(7);
        assert!(state.set_color(target));
        assert_eq!(state.color_bar_position(), 42);
    }

    #[test]
    fn set_color_unmatched_resets_to_zero() {
        let mut state = ready_state(&[BLACK, WHITE]);
        state.set_color_bar_position(42);
        assert!(state.set_color(SeekColor::rgb(1, 2, 3)));
        assert_eq!(state.color_bar_position(), 0);
    }

    #[test]
    fn set_color_defers_until_geometry() {
        let mut state = SeekBarState::new(vec![BLACK, WHITE]).unwrap();
        let mid = SeekColor::rgb(128, 128, 128);
        assert!(!state.set_color(mid));
        assert_eq!(state.color_bar_position(), 0);

        assert!(state.set_geometry(100.0));
        assert_eq!(state.color_bar_position(), 50);
        // buffered value is consumed
        assert!(!state.set_geometry(100.0));
    }

    #[test]
    fn max_position_change_reclamps_and_rebuilds() {
        let mut state = ready_state(&[BLACK, WHITE]);
        state.set_color_bar_position(80);
        state.set_max_position(50);
        assert_eq!(state.color_bar_position(), 50);
        assert_eq!(state.colors().len(), 51);
        state.set_max_position(0);
        assert_eq!(state.max_position(), 1);
    }

    #[test]
    fn drag_clamps_outside_the_bar() {
        let mut state = ready_state(&[BLACK, WHITE]);
        assert!(state.pointer_down(true, false));
        assert!(state.drag_to(-5.0));
        assert_eq!(state.color_bar_position(), 0);
        assert!(state.drag_to(250.0));
        assert_eq!(state.color_bar_position(), state.max_position());
        assert!(state.drag_to(55.9));
        assert_eq!(state.color_bar_position(), 55);
        assert!(state.release());
        assert!(!state.release());
    }

    #[test]
    fn alpha_drag_maps_into_alpha_range() {
        let mut state = ready_state(&[BLACK, WHITE]);
        state.set_show_alpha_bar(true);
        assert!(state.pointer_down(false, true));
        assert!(state.drag_to(50.0));
        assert_eq!(state.alpha_bar_position(), 127);
        assert!(state.drag_to(500.0));
        assert_eq!(state.alpha_bar_position(), 255);
    }

    #[test]
    fn press_routing_prefers_color_bar() {
        let mut state = ready_state(&[BLACK, WHITE]);
        state.set_show_alpha_bar(true);
        assert!(state.pointer_down(true, true));
        assert!(state.dragging_color_bar());
        state.release();

        // alpha bar ignores presses while hidden
        state.set_show_alpha_bar(false);
        assert!(!state.pointer_down(false, true));
        assert!(!state.dragging());
    }

    #[test]
    fn moves_without_a_drag_are_ignored() {
        let mut state = ready_state(&[BLACK, WHITE]);
        state.set_color_bar_position(10);
        assert!(!state.drag_to(90.0));
        assert_eq!(state.color_bar_position(), 10);
    }

    #[test]
    fn hit_region_expands_by_thumb_radius() {
        let bar = Rect::new(10.0, 20.0, 110.0, 24.0);
        assert!(is_on_bar(&bar, 8.0, 60.0, 22.0));
        assert!(is_on_bar(&bar, 8.0, 3.0, 15.0));
        assert!(!is_on_bar(&bar, 8.0, 1.0, 22.0));
        assert!(!is_on_bar(&bar, 8.0, 60.0, 33.0));
    }

    #[test]
    fn seed_swap_rebuilds_cache() {
        let mut state = ready_state(&[BLACK, WHITE]);
        let before = state.colors()[25];
        state
            .set_color_seeds(vec![SeekColor::rgb(255, 0, 0), SeekColor::rgb(0, 0, 255)])
            .unwrap();
        assert_ne!(state.colors()[25], before);
        assert_eq!(state.colors().len(), 101);
    }
}

//! The color seek bar view.
//!
//! A gradient bar with a draggable thumb, an optional second bar for alpha,
//! and an optional floating preview circle while the thumb is held. All
//! geometry is computed on a (primary, cross) axis pair and transposed into
//! widget coordinates, so the same formulas drive horizontal and vertical
//! layouts.

use std::sync::Arc;

use floem::kurbo::{Circle, Point, Rect, Shape, Stroke};
use floem::peniko::{self, Blob, Color, Gradient};
use floem::reactive::{create_effect, RwSignal, SignalGet, SignalUpdate};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;

use crate::checkerboard;
use crate::color::SeekColor;
use crate::constants;
use crate::gradient;
use crate::state::{self, PaletteError, SeekBarState};

/// Payload carried by the change and commit notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorChange {
    pub color_bar_position: i32,
    pub alpha_bar_position: i32,
    /// The selected color, with alpha composed when the alpha bar is shown.
    pub color: SeekColor,
}

enum SeekBarUpdate {
    Color(SeekColor),
    ShowAlphaBar(bool),
}

/// Bar-space geometry (primary axis as x), derived from the current size.
struct Geometry {
    real_left: f64,
    bar_width: f64,
    thumb_radius: f64,
    color_rect: Rect,
    alpha_rect: Rect,
}

pub struct ColorSeekBar {
    id: ViewId,
    state: SeekBarState,
    size: floem::taffy::prelude::Size<f32>,
    bar_height: f64,
    thumb_height: f64,
    bar_margin: f64,
    preview_enabled: bool,
    preview_stroke_width: f64,
    preview_radius: f64,
    preview_margin: f64,
    background: Option<SeekColor>,
    first_draw: bool,
    /// (vertical, cross-axis thickness), read reactively by the style.
    layout_spec: RwSignal<(bool, f64)>,
    color: RwSignal<SeekColor>,
    on_change: Option<Box<dyn Fn(ColorChange)>>,
    on_commit: Option<Box<dyn Fn(ColorChange)>>,
    on_init_done: Option<Box<dyn Fn()>>,
    /// Cached rasterized bar fill.
    bar_img: Option<peniko::Image>,
    bar_img_hash: Vec<u8>,
    cached_dims: (u32, u32),
    cached_rev: u64,
}

/// Creates a color seek bar bound to `color`.
///
/// External writes to the signal move the thumb to the matching bar
/// position (buffered until geometry is known); drags write the selected
/// color back to the signal.
pub fn color_seek_bar(color: RwSignal<SeekColor>) -> ColorSeekBar {
    let id = ViewId::new();

    create_effect(move |_| {
        let c = color.get();
        id.update_state(SeekBarUpdate::Color(c));
    });

    let layout_spec = RwSignal::new((false, 0.0f64));

    let bar = ColorSeekBar {
        id,
        state: SeekBarState::default(),
        size: Default::default(),
        bar_height: constants::BAR_HEIGHT,
        thumb_height: constants::THUMB_HEIGHT,
        bar_margin: constants::BAR_MARGIN,
        preview_enabled: false,
        preview_stroke_width: constants::PREVIEW_STROKE_WIDTH,
        preview_radius: constants::PREVIEW_RADIUS,
        preview_margin: constants::PREVIEW_MARGIN,
        background: None,
        first_draw: true,
        layout_spec,
        color,
        on_change: None,
        on_commit: None,
        on_init_done: None,
        bar_img: None,
        bar_img_hash: Vec::new(),
        cached_dims: (0, 0),
        cached_rev: 0,
    };
    bar.refresh_layout_spec();
    bar.style(move |s| {
        let (vertical, thickness) = layout_spec.get();
        let thickness = thickness as f32;
        let s = s.cursor(floem::style::CursorStyle::Pointer);
        if vertical {
            s.width(thickness).height_full()
        } else {
            s.height(thickness).width_full()
        }
    })
}

impl ColorSeekBar {
    /// Replace the seed palette (at least two colors).
    pub fn color_seeds(mut self, seeds: Vec<SeekColor>) -> Result<Self, PaletteError> {
        self.state.set_color_seeds(seeds)?;
        Ok(self)
    }

    /// Number of discrete steps on the color bar.
    pub fn max_position(mut self, value: i32) -> Self {
        self.state.set_max_position(value);
        self
    }

    pub fn color_bar_position(mut self, value: i32) -> Self {
        self.state.set_color_bar_position(value);
        self
    }

    pub fn alpha_bar_position(mut self, value: i32) -> Self {
        self.state.set_alpha_bar_position(value);
        self
    }

    pub fn alpha_min_position(mut self, value: i32) -> Self {
        self.state.set_alpha_min_position(value);
        self
    }

    pub fn alpha_max_position(mut self, value: i32) -> Self {
        self.state.set_alpha_max_position(value);
        self
    }

    /// Lay the bar out along the vertical axis, position 0 at the top.
    /// The preview circle is forced off while vertical.
    pub fn vertical(mut self, vertical: bool) -> Self {
        self.state.set_vertical(vertical);
        self.refresh_layout_spec();
        self
    }

    pub fn show_alpha_bar(mut self, show: bool) -> Self {
        self.state.set_show_alpha_bar(show);
        self.refresh_layout_spec();
        self
    }

    /// Live toggle for the alpha bar.
    pub fn show_alpha_bar_signal(self, show: RwSignal<bool>) -> Self {
        let id = self.id;
        create_effect(move |_| {
            let s = show.get();
            id.update_state(SeekBarUpdate::ShowAlphaBar(s));
        });
        self
    }

    pub fn bar_height(mut self, height: f64) -> Self {
        self.bar_height = height;
        self.refresh_layout_spec();
        self
    }

    pub fn thumb_height(mut self, height: f64) -> Self {
        self.thumb_height = height;
        self.refresh_layout_spec();
        self
    }

    /// Gap between the color bar and the alpha bar.
    pub fn bar_margin(mut self, margin: f64) -> Self {
        self.bar_margin = margin;
        self.refresh_layout_spec();
        self
    }

    /// Show a floating preview circle above the thumb while dragging.
    pub fn preview_enabled(mut self, enabled: bool) -> Self {
        self.preview_enabled = enabled;
        self.refresh_layout_spec();
        self
    }

    pub fn preview_stroke_width(mut self, width: f64) -> Self {
        self.preview_stroke_width = width;
        self.refresh_layout_spec();
        self
    }

    pub fn preview_radius(mut self, radius: f64) -> Self {
        self.preview_radius = radius;
        self.refresh_layout_spec();
        self
    }

    pub fn preview_margin(mut self, margin: f64) -> Self {
        self.preview_margin = margin;
        self.refresh_layout_spec();
        self
    }

    pub fn background_color(mut self, color: SeekColor) -> Self {
        self.background = Some(color);
        self
    }

    /// Fires on every position mutation: each drag move, programmatic
    /// changes applied to the live widget, and once from the first paint.
    pub fn on_change(mut self, f: impl Fn(ColorChange) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Fires when a drag ends (release or cancel), with the final value.
    pub fn on_commit(mut self, f: impl Fn(ColorChange) + 'static) -> Self {
        self.on_commit = Some(Box::new(f));
        self
    }

    /// Fires exactly once, after the first successful paint.
    pub fn on_init_done(mut self, f: impl Fn() + 'static) -> Self {
        self.on_init_done = Some(Box::new(f));
        self
    }

    fn refresh_layout_spec(&self) {
        self.layout_spec
            .set((self.state.is_vertical(), self.total_thickness()));
    }

    fn preview_effective(&self) -> bool {
        self.preview_enabled && !self.state.is_vertical()
    }

    fn preview_total_height(&self) -> f64 {
        if self.preview_effective() {
            self.preview_margin + self.preview_radius * 2.0 + self.preview_stroke_width * 2.0
        } else {
            0.0
        }
    }

    /// Cross-axis size needed by the current configuration. Bar and thumb
    /// space double when the alpha bar is shown.
    fn total_thickness(&self) -> f64 {
        let (bar, thumb) = if self.state.show_alpha_bar() {
            (self.bar_height * 2.0, self.thumb_height * 2.0)
        } else {
            (self.bar_height, self.thumb_height)
        };
        if self.state.is_vertical() {
            thumb + bar + self.bar_margin
        } else {
            bar + thumb + self.bar_margin + self.preview_total_height() + 2.0
        }
    }

    fn geometry(&self) -> Geometry {
        let len = if self.state.is_vertical() {
            self.size.height as f64
        } else {
            self.size.width as f64
        };
        let thumb_radius = self.thumb_height / 2.0;
        let side_pad = if self.preview_effective() {
            thumb_radius.max(self.preview_radius + self.preview_stroke_width)
        } else {
            thumb_radius
        };
        let real_left = side_pad;
        let real_right = (len - side_pad).max(real_left);
        let color_top = self.preview_total_height() + thumb_radius;
        let color_rect = Rect::new(real_left, color_top, real_right, color_top + self.bar_height);
        let alpha_top = color_rect.y1 + self.bar_margin + self.thumb_height;
        let alpha_rect = Rect::new(real_left, alpha_top, real_right, alpha_top + self.bar_height);
        Geometry {
            real_left,
            bar_width: real_right - real_left,
            thumb_radius,
            color_rect,
            alpha_rect,
        }
    }

    /// Pointer position in bar space: (primary axis, cross axis).
    fn bar_space(&self, pos: Point) -> (f64, f64) {
        if self.state.is_vertical() {
            (pos.y, pos.x)
        } else {
            (pos.x, pos.y)
        }
    }

    /// Bar-space rect into widget coordinates.
    fn place_rect(&self, r: Rect) -> Rect {
        if self.state.is_vertical() {
            Rect::new(r.y0, r.x0, r.y1, r.x1)
        } else {
            r
        }
    }

    fn place_point(&self, p: Point) -> Point {
        if self.state.is_vertical() {
            Point::new(p.y, p.x)
        } else {
            p
        }
    }

    fn change_payload(&self) -> ColorChange {
        ColorChange {
            color_bar_position: self.state.color_bar_position(),
            alpha_bar_position: self.state.alpha_bar_position(),
            color: self.state.selected_color(),
        }
    }

    fn notify_change(&self) {
        if let Some(cb) = &self.on_change {
            cb(self.change_payload());
        }
    }

    fn sync_signal(&self) {
        let selected = self.state.selected_color();
        if self.color.get_untracked() != selected {
            self.color.set(selected);
        }
    }

    fn ensure_bar_image(&mut self, rect: Rect, scale: f64) {
        let s = scale.max(1.0);
        let pw = (rect.width() * s).round() as u32;
        let ph = (rect.height() * s).round() as u32;
        if pw == 0 || ph == 0 {
            return;
        }
        let dims = (pw, ph);
        if self.bar_img.is_some()
            && self.cached_dims == dims
            && self.cached_rev == self.state.palette_rev()
        {
            return;
        }

        let pixels = gradient::rasterize_gradient(
            pw,
            ph,
            self.state.is_vertical(),
            self.state.color_seeds(),
        );
        let blob = Blob::new(Arc::new(pixels));
        let img = peniko::Image::new(blob.clone(), peniko::Format::Rgba8, pw, ph);

        self.bar_img_hash = blob.id().to_le_bytes().to_vec();
        self.bar_img = Some(img);
        self.cached_dims = dims;
        self.cached_rev = self.state.palette_rev();
    }

    fn paint_thumb(&self, cx: &mut PaintCx, center: Point, fill: SeekColor) {
        let circle = Circle::new(center, self.thumb_height / 2.0);
        cx.stroke(
            &circle,
            Color::WHITE,
            &Stroke::new(self.preview_stroke_width * 2.0),
        );
        cx.fill(&circle, fill.to_peniko(), 0.0);
    }
}

impl View for ColorSeekBar {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<SeekBarUpdate>() {
            match *update {
                SeekBarUpdate::Color(c) => {
                    // Ignore echoes of our own signal writes.
                    if self.state.is_ready() && c == self.state.selected_color() {
                        return;
                    }
                    if self.state.set_color(c) {
                        self.notify_change();
                    }
                }
                SeekBarUpdate::ShowAlphaBar(show) => {
                    if show == self.state.show_alpha_bar() {
                        return;
                    }
                    self.state.set_show_alpha_bar(show);
                    self.refresh_layout_spec();
                    self.notify_change();
                }
            }
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                let g = self.geometry();
                let (major, minor) = self.bar_space(e.pos);
                let on_color = state::is_on_bar(&g.color_rect, g.thumb_radius, major, minor);
                let on_alpha = state::is_on_bar(&g.alpha_rect, g.thumb_radius, major, minor);
                if self.state.pointer_down(on_color, on_alpha) {
                    cx.update_active(self.id());
                    self.id.request_layout();
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerMove(e) => {
                if self.state.dragging() {
                    let g = self.geometry();
                    let (major, _) = self.bar_space(e.pos);
                    if self.state.drag_to((major - g.real_left) as f32) {
                        self.notify_change();
                        self.sync_signal();
                        self.id.request_layout();
                    }
                    EventPropagation::Stop
                } else {
                    EventPropagation::Continue
                }
            }
            Event::PointerUp(_) | Event::FocusLost => {
                if self.state.release() {
                    log::trace!(
                        "drag committed at position {}",
                        self.state.color_bar_position()
                    );
                    if let Some(cb) = &self.on_commit {
                        cb(self.change_payload());
                    }
                    self.id.request_layout();
                }
                EventPropagation::Continue
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        let g = self.geometry();
        if (g.bar_width as f32 - self.state.bar_width()).abs() > f32::EPSILON {
            let applied_pending = self.state.set_geometry(g.bar_width as f32);
            if applied_pending {
                self.notify_change();
                self.sync_signal();
            }
        }
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 || !self.state.is_ready() {
            return;
        }

        if let Some(bg) = self.background {
            cx.fill(&Rect::new(0.0, 0.0, w, h), bg.to_peniko(), 0.0);
        }

        let g = self.geometry();
        let color = self.state.color(false);

        // Color bar, rasterized from the same kernel that fills the cache
        let color_rect = self.place_rect(g.color_rect);
        let scale = cx.scale();
        self.ensure_bar_image(color_rect, scale);
        if let Some(ref img) = self.bar_img {
            cx.draw_img(
                floem_renderer::Img {
                    img: img.clone(),
                    hash: &self.bar_img_hash,
                },
                color_rect,
            );
        }

        // Color thumb
        let frac = self.state.color_bar_position() as f64 / self.state.max_position() as f64;
        let thumb_major = g.real_left + frac * g.bar_width;
        let thumb_center = self.place_point(Point::new(
            thumb_major,
            g.color_rect.y0 + self.bar_height / 2.0,
        ));
        self.paint_thumb(cx, thumb_center, color);

        // Preview circle while the color thumb is held
        if self.preview_effective() && self.state.dragging_color_bar() {
            let center = Point::new(
                thumb_major,
                self.preview_radius + self.preview_stroke_width,
            );
            let circle = Circle::new(center, self.preview_radius);
            cx.stroke(
                &circle,
                Color::WHITE,
                &Stroke::new(self.preview_stroke_width * 2.0),
            );
            cx.fill(&circle, color.to_peniko(), 0.0);
        }

        if self.state.show_alpha_bar() {
            let alpha_rect = self.place_rect(g.alpha_rect);
            checkerboard::paint_checkerboard(cx, alpha_rect, constants::CHECKER_CELL);

            // Current color fading from the alpha-range maximum to its minimum
            let start = color
                .with_alpha(self.state.alpha_max_position() as u8)
                .to_peniko();
            let end = color
                .with_alpha(self.state.alpha_min_position() as u8)
                .to_peniko();
            let (p0, p1) = if self.state.is_vertical() {
                let mid_x = (alpha_rect.x0 + alpha_rect.x1) / 2.0;
                ((mid_x, alpha_rect.y0), (mid_x, alpha_rect.y1))
            } else {
                let mid_y = (alpha_rect.y0 + alpha_rect.y1) / 2.0;
                ((alpha_rect.x0, mid_y), (alpha_rect.x1, mid_y))
            };
            let gradient = Gradient::new_linear(p0, p1).with_stops([start, end]);
            // Convert to BezPath so the vello renderer uses the general path
            // handler (its Rect fast-path only supports solid colors).
            let path = alpha_rect.to_path(0.1);
            cx.fill(&path, &gradient, 0.0);

            // Alpha thumb
            let span =
                (self.state.alpha_max_position() - self.state.alpha_min_position()) as f64;
            let afrac =
                (self.state.alpha_bar_position() - self.state.alpha_min_position()) as f64 / span;
            let alpha_center = self.place_point(Point::new(
                g.real_left + afrac * g.bar_width,
                g.alpha_rect.y0 + self.bar_height / 2.0,
            ));
            self.paint_thumb(
                cx,
                alpha_center,
                color.with_alpha(self.state.alpha_value() as u8),
            );
        }

        if self.first_draw {
            self.notify_change();
            self.first_draw = false;
            if let Some(cb) = &self.on_init_done {
                cb();
            }
        }
    }
}

//! Gradient math — piecewise-linear blending between seed colors.
//!
//! Everything in here is a pure function of the seed palette. The same
//! kernel produces the discrete color cache and the rasterized bar fill,
//! so the pixels on screen always agree with the colors the widget reports.

use crate::color::SeekColor;

/// `Math.round` semantics: nearest integer, half-steps toward +∞.
fn round_half_up(x: f32) -> i32 {
    (x + 0.5).floor() as i32
}

/// Blend one channel: `start + round(frac * (end - start))`.
pub(crate) fn mix(start: u8, end: u8, frac: f32) -> u8 {
    let delta = end as i32 - start as i32;
    (start as i32 + round_half_up(frac * delta as f32)) as u8
}

/// Interpolated color for a continuous `position` along a bar that is
/// `bar_width` pixels long.
///
/// Positions at or beyond the ends snap to the first/last seed. In between,
/// the unit position is scaled into segment space and the two bracketing
/// seeds are blended per channel. Seed alpha is ignored; the result is
/// always opaque.
pub(crate) fn pick_color(seeds: &[SeekColor], position: f32, bar_width: f32) -> SeekColor {
    let unit = position / bar_width;
    if unit <= 0.0 {
        return seeds[0];
    }
    if unit >= 1.0 {
        return seeds[seeds.len() - 1];
    }

    let mut scaled = unit * (seeds.len() - 1) as f32;
    let segment = scaled as usize;
    scaled -= segment as f32;
    let c0 = seeds[segment];
    let c1 = seeds[segment + 1];
    SeekColor::rgb(
        mix(c0.r(), c1.r(), scaled),
        mix(c0.g(), c1.g(), scaled),
        mix(c0.b(), c1.b(), scaled),
    )
}

/// Precompute the color for every discrete position `0..=max_position`.
pub(crate) fn cache_colors(seeds: &[SeekColor], max_position: i32, bar_width: f32) -> Vec<SeekColor> {
    (0..=max_position)
        .map(|i| {
            pick_color(
                seeds,
                i as f32 / max_position as f32 * bar_width,
                bar_width,
            )
        })
        .collect()
}

/// Rasterize the seed gradient to an RGBA8 buffer.
///
/// The gradient runs along the major axis (x, or y when `vertical`); the
/// minor axis repeats the same color. One `pick_color` per step.
pub(crate) fn rasterize_gradient(
    width: u32,
    height: u32,
    vertical: bool,
    seeds: &[SeekColor],
) -> Vec<u8> {
    let mut buf = vec![0u8; (width * height * 4) as usize];
    if width == 0 || height == 0 {
        return buf;
    }
    let major = if vertical { height } else { width };
    for step in 0..major {
        let t = step as f32 / (major - 1).max(1) as f32;
        let c = pick_color(seeds, t, 1.0);
        if vertical {
            for px in 0..width {
                let offset = ((step * width + px) * 4) as usize;
                buf[offset] = c.r();
                buf[offset + 1] = c.g();
                buf[offset + 2] = c.b();
                buf[offset + 3] = 255;
            }
        } else {
            for py in 0..height {
                let offset = ((py * width + step) * 4) as usize;
                buf[offset] = c.r();
                buf[offset + 1] = c.g();
                buf[offset + 2] = c.b();
                buf[offset + 3] = 255;
            }
        }
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: SeekColor = SeekColor::rgb(0, 0, 0);
    const WHITE: SeekColor = SeekColor::rgb(255, 255, 255);

    #[test]
    fn mix_rounds_half_up() {
        // 0.5 * 255 = 127.5 rounds up
        assert_eq!(mix(0, 255, 0.5), 128);
        // descending: 255 + round(-127.5) = 255 - 127
        assert_eq!(mix(255, 0, 0.5), 128);
        assert_eq!(mix(10, 10, 0.7), 10);
    }

    #[test]
    fn pick_snaps_to_ends() {
        let seeds = [SeekColor::rgb(1, 2, 3), SeekColor::rgb(9, 8, 7)];
        assert_eq!(pick_color(&seeds, 0.0, 100.0), seeds[0]);
        assert_eq!(pick_color(&seeds, -25.0, 100.0), seeds[0]);
        assert_eq!(pick_color(&seeds, 100.0, 100.0), seeds[1]);
        assert_eq!(pick_color(&seeds, 250.0, 100.0), seeds[1]);
    }

    #[test]
    fn pick_midpoint_is_mid_gray() {
        let seeds = [BLACK, WHITE];
        assert_eq!(pick_color(&seeds, 50.0, 100.0), SeekColor::rgb(128, 128, 128));
    }

    #[test]
    fn pick_lands_on_interior_seed() {
        let seeds = [BLACK, SeekColor::rgb(10, 200, 30), WHITE];
        assert_eq!(pick_color(&seeds, 50.0, 100.0), seeds[1]);
    }

    #[test]
    fn pick_is_monotonic_per_channel() {
        let seeds = [BLACK, WHITE];
        let mut last = 0u8;
        for i in 0..=100 {
            let c = pick_color(&seeds, i as f32, 100.0);
            assert!(c.r() >= last);
            assert_eq!(c.r(), c.g());
            assert_eq!(c.g(), c.b());
            last = c.r();
        }
        assert_eq!(last, 255);
    }

    #[test]
    fn cache_matches_direct_pick() {
        let seeds = [
            SeekColor::rgb(255, 0, 0),
            SeekColor::rgb(0, 255, 0),
            SeekColor::rgb(0, 0, 255),
        ];
        let max = 37;
        let bar_width = 412.0;
        let cache = cache_colors(&seeds, max, bar_width);
        assert_eq!(cache.len(), (max + 1) as usize);
        for (i, &c) in cache.iter().enumerate() {
            let direct = pick_color(&seeds, i as f32 / max as f32 * bar_width, bar_width);
            assert_eq!(c, direct);
        }
    }

    #[test]
    fn raster_ends_match_seeds() {
        let seeds = [SeekColor::rgb(10, 20, 30), SeekColor::rgb(200, 100, 50)];
        let buf = rasterize_gradient(64, 4, false, &seeds);
        assert_eq!(&buf[0..4], &[10, 20, 30, 255]);
        let last = ((64 - 1) * 4) as usize;
        assert_eq!(&buf[last..last + 4], &[200, 100, 50, 255]);

        let buf = rasterize_gradient(4, 64, true, &seeds);
        assert_eq!(&buf[0..4], &[10, 20, 30, 255]);
        let last = ((63 * 4) * 4) as usize;
        assert_eq!(&buf[last..last + 4], &[200, 100, 50, 255]);
    }
}

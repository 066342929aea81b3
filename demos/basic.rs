//! Standalone demo: opens a window with the color seek bar.
//!
//! Shows the two-bar configuration with a live alpha toggle, a swatch and
//! hex readout of the selected color, and a copy-to-clipboard button. The
//! startup color is written to the signal before layout runs, exercising
//! the deferred-apply path.

use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate};
use floem::window::WindowConfig;
use floem_seekbar::{color_seek_bar, SeekColor};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Applied once the bar knows its geometry.
    let color = RwSignal::new(SeekColor::rgb(0, 255, 255));
    let show_alpha = RwSignal::new(true);

    floem::Application::new()
        .window(
            move |_| {
                app_view(color, show_alpha).on_event_stop(
                    floem::event::EventListener::WindowClosed,
                    |_| floem::quit_app(),
                )
            },
            Some(
                WindowConfig::default()
                    .size((420.0, 200.0))
                    .title("floem-seekbar"),
            ),
        )
        .run();
}

fn app_view(color: RwSignal<SeekColor>, show_alpha: RwSignal<bool>) -> impl IntoView {
    let seek_bar = color_seek_bar(color)
        .show_alpha_bar(show_alpha.get_untracked())
        .show_alpha_bar_signal(show_alpha)
        .preview_enabled(true)
        .on_change(|change| {
            log::info!(
                "position {} alpha {} color {}",
                change.color_bar_position,
                change.alpha_bar_position,
                change.color.to_hex()
            );
        })
        .on_commit(|change| log::info!("committed {}", change.color.to_hex()))
        .on_init_done(|| log::info!("seek bar ready"));

    v_stack((
        seek_bar,
        h_stack((
            empty().style(move |s| {
                let c = color.get();
                s.width(32.0)
                    .height(32.0)
                    .border(1.0)
                    .border_color(Color::rgb8(180, 180, 180))
                    .border_radius(4.0)
                    .background(Color::rgba8(c.r(), c.g(), c.b(), c.a()))
            }),
            label(move || format!("#{}", color.get().to_hex())),
            container(label(|| "copy"))
                .style(|s| {
                    s.padding_horiz(8.0)
                        .padding_vert(4.0)
                        .border(1.0)
                        .border_radius(4.0)
                        .border_color(Color::rgb8(180, 180, 180))
                        .cursor(floem::style::CursorStyle::Pointer)
                        .hover(|s| s.background(Color::rgb8(230, 230, 230)))
                })
                .on_click_stop(move |_| {
                    copy_to_clipboard(&color.get_untracked().to_hex());
                }),
            label(move || {
                if show_alpha.get() {
                    "alpha bar: on".to_string()
                } else {
                    "alpha bar: off".to_string()
                }
            })
            .style(|s| s.cursor(floem::style::CursorStyle::Pointer))
            .on_click_stop(move |_| {
                show_alpha.update(|v| *v = !*v);
            }),
        ))
        .style(|s| s.gap(12.0).items_center()),
    ))
    .style(|s| {
        s.gap(12.0)
            .padding(16.0)
            .size_full()
            .background(Color::rgb8(242, 242, 242))
    })
}

fn copy_to_clipboard(text: &str) {
    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        let _ = clipboard.set_text(text);
    }
}

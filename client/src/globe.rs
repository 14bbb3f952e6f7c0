use std::cell::RefCell;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::PointerEvent;

use orbis_shared::{COUNTRY_CLASS, DragPhase, GRATICULE_CLASS, GlobeState};

struct PointerUpBinding {
    window: web_sys::Window,
    handler: Closure<dyn Fn(PointerEvent)>,
}

thread_local! {
    static POINTER_UP_BINDING: RefCell<Option<PointerUpBinding>> = const { RefCell::new(None) };
}

/// Release is observed on the window so a drag ending outside the surface
/// still returns the globe to idle.
fn bind_window_pointer_up(globe: RwSignal<GlobeState>) {
    let Some(window) = web_sys::window() else {
        return;
    };

    POINTER_UP_BINDING.with(|slot| {
        if let Some(old) = slot.borrow_mut().take() {
            let _ = old
                .window
                .remove_event_listener_with_callback("pointerup", old.handler.as_ref().unchecked_ref());
        }
    });

    let handler = Closure::<dyn Fn(PointerEvent)>::new(move |_: PointerEvent| {
        let dragging = globe
            .try_with_untracked(|g| g.drag_phase() == DragPhase::Dragging)
            .unwrap_or(false);
        if dragging {
            globe.update(|g| g.pointer_up());
        }
    });

    if window
        .add_event_listener_with_callback("pointerup", handler.as_ref().unchecked_ref())
        .is_ok()
    {
        POINTER_UP_BINDING.with(|slot| {
            *slot.borrow_mut() = Some(PointerUpBinding {
                window: window.clone(),
                handler,
            });
        });
    }
}

/// Full-viewport SVG surface: one path per country plus the graticule.
/// Dragging rotates the globe; entering a country highlights it.
#[component]
pub fn GlobeSurface(globe: RwSignal<GlobeState>) -> impl IntoView {
    let (width, height) = globe.with_untracked(|g| g.layout().surface);
    let country_count = globe.with_untracked(|g| g.len());
    let (graticule_fill, graticule_stroke) = globe.with_untracked(|g| {
        let style = g.graticule_style();
        (style.fill.to_string(), style.stroke.to_string())
    });

    // Geometry only changes with rotation, colors only with the highlight.
    let rotation = Memo::new(move |_| globe.with(|g| g.rotation()));
    let highlighted = Memo::new(move |_| globe.with(|g| g.highlighted()));

    bind_window_pointer_up(globe);

    let on_pointer_down = move |_: PointerEvent| {
        globe.update(|g| g.pointer_down());
    };

    let on_pointer_move = move |e: PointerEvent| {
        let dx = e.movement_x() as f64;
        let dy = e.movement_y() as f64;
        globe.maybe_update(|g| g.pointer_move(dx, dy));
    };

    let countries = (0..country_count)
        .map(|index| {
            view! {
                <path
                    class=COUNTRY_CLASS
                    d=move || {
                        rotation.track();
                        globe.with_untracked(|g| g.country_path(index))
                    }
                    style:fill=move || {
                        highlighted.track();
                        globe.with_untracked(|g| g.country_style(index).fill.to_string())
                    }
                    style:stroke=move || {
                        highlighted.track();
                        globe.with_untracked(|g| g.country_style(index).stroke.to_string())
                    }
                    on:pointerenter=move |_| {
                        globe.update(|g| {
                            g.hover(index);
                        });
                    }
                />
            }
        })
        .collect_view();

    view! {
        <svg
            width=width.to_string()
            height=height.to_string()
            style="position: absolute; inset: 0; touch-action: none; cursor: grab;"
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
        >
            {countries}
            <path
                class=GRATICULE_CLASS
                d=move || {
                    rotation.track();
                    globe.with_untracked(|g| g.graticule_path())
                }
                fill=graticule_fill
                stroke=graticule_stroke
            />
        </svg>
    }
}

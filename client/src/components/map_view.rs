//! SVG map surface: AOI polygons over a graticule with draw, edit, and
//! delete gestures.
//!
//! SYSTEM CONTEXT
//! ==============
//! Projection and gesture state live in `mapcore` (`Viewport`,
//! `DrawSession`); this component only turns them into SVG and routes
//! pointer input. Finished shapes go up through callbacks and never touch
//! the AOI list directly.
//!
//! INPUT
//! =====
//! Pointer handlers sit on the container. While drawing or dragging a
//! vertex, SVG children ignore pointer events so `offset_x`/`offset_y` are
//! always relative to the map surface. Panning uses `client_x`/`client_y`
//! deltas and works from any target.

#[cfg(test)]
#[path = "map_view_test.rs"]
mod map_view_test;

use leptos::prelude::*;
use mapcore::consts::{FIT_PADDING_PX, HANDLE_RADIUS_PX, ZOOM_STEP};
use mapcore::draw::DrawSession;
use mapcore::geometry::{Bounds, Geometry, Position};
use mapcore::viewport::{Point, Viewport};

use crate::state::aois::AoisState;
use crate::state::ui::UiState;

fn push_point(d: &mut String, cmd: char, p: Point) {
    d.push_str(&format!("{cmd}{:.1},{:.1}", p.x, p.y));
}

/// SVG path data for one closed ring.
#[must_use]
pub fn ring_path(viewport: &Viewport, ring: &[Position]) -> String {
    let mut d = String::new();
    for (i, &pos) in ring.iter().enumerate() {
        push_point(&mut d, if i == 0 { 'M' } else { 'L' }, viewport.to_screen(pos));
    }
    if !d.is_empty() {
        d.push('Z');
    }
    d
}

/// SVG path data for every ring of `geometry`; render with
/// `fill-rule="evenodd"` so holes stay empty.
#[must_use]
pub fn geometry_path(viewport: &Viewport, geometry: &Geometry) -> String {
    geometry
        .polygons()
        .into_iter()
        .flatten()
        .map(|ring| ring_path(viewport, ring))
        .collect()
}

/// Open polyline through the vertices placed so far.
#[must_use]
pub fn draft_path(viewport: &Viewport, vertices: &[Position]) -> String {
    let mut d = String::new();
    for (i, &pos) in vertices.iter().enumerate() {
        push_point(&mut d, if i == 0 { 'M' } else { 'L' }, viewport.to_screen(pos));
    }
    d
}

/// Bounds covering every geometry in `geometries`.
pub fn combined_bounds<'a>(geometries: impl IntoIterator<Item = &'a Geometry>) -> Option<Bounds> {
    geometries.into_iter().filter_map(Geometry::bounds).reduce(Bounds::union)
}

/// Pointer position relative to the map container.
fn surface_point(ev: &leptos::ev::MouseEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}

/// Interactive AOI map.
#[component]
pub fn MapView(
    on_create: Callback<Geometry>,
    on_edit: Callback<(i64, Geometry)>,
    on_delete: Callback<i64>,
    on_select: Callback<i64>,
) -> impl IntoView {
    let aois = expect_context::<RwSignal<AoisState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let viewport = RwSignal::new(Viewport::default());
    let session = RwSignal::new(DrawSession::Idle);
    let pan_from = RwSignal::new(None::<(i32, i32)>);
    let container = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    {
        let measure = move || {
            let Some(el) = container.get_untracked() else {
                return;
            };
            let (width, height) = (f64::from(el.client_width()), f64::from(el.client_height()));
            if width > 0.0 && height > 0.0 {
                viewport.update(|v| {
                    v.width = width;
                    v.height = height;
                });
            }
        };
        Effect::new(move || {
            if container.get().is_some() {
                measure();
            }
        });
        let resize = window_event_listener(leptos::ev::resize, move |_| measure());
        on_cleanup(move || resize.remove());
    }

    // Focus the previewed AOI whenever the preview target changes.
    let preview = Memo::new(move |_| aois.with(|s| s.preview_id));
    Effect::new(move || {
        let Some(id) = preview.get() else {
            return;
        };
        let bounds = aois.with_untracked(|s| s.find(id).and_then(|a| a.geometry.bounds()));
        if let Some(bounds) = bounds {
            viewport.update(|v| v.fit_bounds(bounds, FIT_PADDING_PX));
        }
    });

    let fit_all = move || {
        let bounds = aois.with_untracked(|s| combined_bounds(s.items.iter().map(|a| &a.geometry)));
        if let Some(bounds) = bounds {
            viewport.update(|v| v.fit_bounds(bounds, FIT_PADDING_PX));
        }
    };

    let on_pointer_down = move |ev: leptos::ev::PointerEvent| {
        if session.with_untracked(DrawSession::is_idle) {
            pan_from.set(Some((ev.client_x(), ev.client_y())));
        }
    };
    let on_pointer_move = move |ev: leptos::ev::PointerEvent| {
        if let Some((x0, y0)) = pan_from.get_untracked() {
            let (x, y) = (ev.client_x(), ev.client_y());
            viewport.update(|v| v.pan_by(f64::from(x - x0), f64::from(y - y0)));
            pan_from.set(Some((x, y)));
            return;
        }
        if session.with_untracked(|s| matches!(s, DrawSession::Editing { dragging: Some(_), .. })) {
            let pos = viewport.get_untracked().to_lonlat(surface_point(&ev));
            session.update(|s| {
                s.drag_to(pos);
            });
        }
    };
    let on_pointer_up = move |_: leptos::ev::PointerEvent| {
        pan_from.set(None);
        session.update(DrawSession::release);
    };
    let on_click = move |ev: leptos::ev::MouseEvent| {
        if session.with_untracked(DrawSession::is_drawing) {
            let pos = viewport.get_untracked().to_lonlat(surface_point(&ev));
            session.update(|s| {
                s.add_vertex(pos);
            });
        }
    };
    let on_wheel = move |ev: leptos::ev::WheelEvent| {
        ev.prevent_default();
        let delta = if ev.delta_y() < 0.0 { ZOOM_STEP } else { -ZOOM_STEP };
        viewport.update(|v| v.zoom_by(delta));
    };
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            session.update(DrawSession::cancel);
        }
    };

    let finish_drawing = move || {
        let mut next = session.get_untracked();
        let outcome = next.finish();
        session.set(next);
        match outcome {
            Ok(geometry) => on_create.run(geometry),
            Err(e) => ui.update(|u| {
                u.error(format!("Cannot finish shape: {e}"));
            }),
        }
    };
    let save_shape = move || {
        let mut next = session.get_untracked();
        let committed = next.commit();
        session.set(next);
        if let Some(edit) = committed {
            on_edit.run(edit);
        }
    };
    let begin_edit = move || {
        let target = aois.with_untracked(|s| {
            s.preview_id
                .filter(|id| !s.is_pending(*id))
                .and_then(|id| s.find(id).map(|a| (id, a.geometry.clone())))
        });
        if let Some((id, geometry)) = target {
            session.update(|s| s.begin_editing(id, geometry));
        }
    };
    let delete_selected = move || {
        if let Some(id) = aois.with_untracked(|s| s.preview_id) {
            on_delete.run(id);
        }
    };

    let graticule = move || {
        viewport
            .get()
            .graticule_lines()
            .into_iter()
            .map(|(a, b)| {
                view! {
                    <line
                        class="map-view__graticule"
                        x1=format!("{:.1}", a.x)
                        y1=format!("{:.1}", a.y)
                        x2=format!("{:.1}", b.x)
                        y2=format!("{:.1}", b.y)
                    />
                }
            })
            .collect_view()
    };

    let shapes = move || {
        let vp = viewport.get();
        let editing = session.with(DrawSession::editing_target);
        let state = aois.get();
        let preview_id = state.preview_id;
        state
            .items
            .into_iter()
            .filter_map(|aoi| {
                let id = aoi.id?;
                if editing == Some(id) {
                    return None;
                }
                let d = geometry_path(&vp, &aoi.geometry);
                Some(view! {
                    <path
                        class="map-view__aoi"
                        class:map-view__aoi--previewed={preview_id == Some(id)}
                        class:map-view__aoi--inactive={!aoi.is_active}
                        d=d
                        fill-rule="evenodd"
                        on:click=move |_| {
                            if session.with_untracked(DrawSession::is_idle) {
                                on_select.run(id);
                            }
                        }
                    >
                        <title>{aoi.name}</title>
                    </path>
                })
            })
            .collect_view()
    };

    let edit_layer = move || {
        let vp = viewport.get();
        let geometry = session.with(|s| s.edited_geometry().cloned())?;
        let handles = geometry
            .editable_vertices()
            .into_iter()
            .map(|(at, pos)| {
                let p = vp.to_screen(pos);
                view! {
                    <circle
                        class="map-view__handle"
                        cx=format!("{:.1}", p.x)
                        cy=format!("{:.1}", p.y)
                        r=HANDLE_RADIUS_PX.to_string()
                        on:pointerdown=move |ev| {
                            ev.stop_propagation();
                            session.update(|s| {
                                s.grab_vertex(at);
                            });
                        }
                    />
                }
            })
            .collect_view();
        Some(view! {
            <g class="map-view__edit">
                <path
                    class="map-view__aoi map-view__aoi--editing"
                    d=geometry_path(&vp, &geometry)
                    fill-rule="evenodd"
                />
                {handles}
            </g>
        })
    };

    let draft_layer = move || {
        let vp = viewport.get();
        let vertices = session.with(|s| s.pending_vertices().to_vec());
        let dots = vertices
            .iter()
            .map(|&pos| {
                let p = vp.to_screen(pos);
                view! {
                    <circle
                        class="map-view__vertex"
                        cx=format!("{:.1}", p.x)
                        cy=format!("{:.1}", p.y)
                        r=HANDLE_RADIUS_PX.to_string()
                    />
                }
            })
            .collect_view();
        view! {
            <g class="map-view__draft">
                <path class="map-view__draft-line" d=draft_path(&vp, &vertices) />
                {dots}
            </g>
        }
    };

    let toolbar = move || match session.get() {
        DrawSession::Idle => {
            let selected = aois.with(|s| s.preview_id.map(|id| s.is_pending(id)));
            view! {
                <button class="btn btn--primary" on:click=move |_| session.update(DrawSession::begin_drawing)>
                    "Draw AOI"
                </button>
                <Show when=move || selected.is_some()>
                    <button class="btn" disabled={selected == Some(true)} on:click=move |_| begin_edit()>
                        "Edit shape"
                    </button>
                    <button class="btn btn--danger" disabled={selected == Some(true)} on:click=move |_| delete_selected()>
                        "Delete"
                    </button>
                </Show>
            }
            .into_any()
        }
        DrawSession::Drawing { vertices } => {
            let count = vertices.len();
            view! {
                <span class="map-view__hint">{format!("{count} points")}</span>
                <button class="btn btn--primary" disabled={count < 3} on:click=move |_| finish_drawing()>
                    "Finish"
                </button>
                <button
                    class="btn"
                    disabled={count == 0}
                    on:click=move |_| {
                        session.update(|s| {
                            s.undo_vertex();
                        });
                    }
                >
                    "Undo point"
                </button>
                <button class="btn" on:click=move |_| session.update(DrawSession::cancel)>
                    "Cancel"
                </button>
            }
            .into_any()
        }
        DrawSession::Editing { .. } => view! {
            <button class="btn btn--primary" on:click=move |_| save_shape()>
                "Save shape"
            </button>
            <button class="btn" on:click=move |_| session.update(DrawSession::cancel)>
                "Cancel"
            </button>
        }
        .into_any(),
    };

    view! {
        <div
            class="map-view"
            class:map-view--drawing=move || session.with(DrawSession::is_drawing)
            class:map-view--dragging=move || {
                session.with(|s| matches!(s, DrawSession::Editing { dragging: Some(_), .. }))
            }
            node_ref=container
            tabindex="0"
            on:pointerdown=on_pointer_down
            on:pointermove=on_pointer_move
            on:pointerup=on_pointer_up
            on:pointerleave=on_pointer_up
            on:click=on_click
            on:wheel=on_wheel
            on:keydown=on_keydown
        >
            <svg
                class="map-view__surface"
                viewBox=move || {
                    let vp = viewport.get();
                    format!("0 0 {:.0} {:.0}", vp.width, vp.height)
                }
            >
                <g class="map-view__graticule-layer">{graticule}</g>
                <g class="map-view__aoi-layer">{shapes}</g>
                {edit_layer}
                {draft_layer}
            </svg>
            <div class="map-view__toolbar" on:pointerdown=|ev| ev.stop_propagation() on:click=|ev| ev.stop_propagation()>
                {toolbar}
                <span class="map-view__spacer"></span>
                <button class="btn" title="Zoom in" on:click=move |_| viewport.update(|v| v.zoom_by(ZOOM_STEP))>
                    "+"
                </button>
                <button class="btn" title="Zoom out" on:click=move |_| viewport.update(|v| v.zoom_by(-ZOOM_STEP))>
                    "−"
                </button>
                <button class="btn" title="Fit all AOIs" on:click=move |_| fit_all()>
                    "Fit"
                </button>
            </div>
        </div>
    }
}

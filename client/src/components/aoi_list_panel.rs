//! Collapsible side panel listing AOIs with preview, edit, delete, and flag
//! switches.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads the shared AOI list and only emits intents; the dashboard container
//! turns them into API calls. Rows with a mutation in flight are disabled.

use leptos::prelude::*;

use crate::net::types::{Aoi, AoiFlag};
use crate::state::aois::AoisState;
use crate::state::ui::UiState;

/// AOI list panel.
#[component]
pub fn AoiListPanel(
    on_preview: Callback<i64>,
    on_edit: Callback<Aoi>,
    on_delete: Callback<i64>,
    on_toggle: Callback<(i64, AoiFlag, bool)>,
) -> impl IntoView {
    let aois = expect_context::<RwSignal<AoisState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let open = move || ui.get().list_panel_open;

    view! {
        <aside class="aoi-panel" class:aoi-panel--collapsed=move || !open()>
            <header class="aoi-panel__header">
                <span class="aoi-panel__title">{move || if open() { "AOIs" } else { "" }}</span>
                <button
                    class="btn btn--ghost aoi-panel__collapse"
                    on:click=move |_| ui.update(UiState::toggle_list_panel)
                    title=move || if open() { "Collapse" } else { "Expand" }
                >
                    {move || if open() { "›" } else { "‹" }}
                </button>
            </header>
            <Show when=open>
                <div class="aoi-panel__list">
                    <Show when=move || aois.get().loading>
                        <p class="aoi-panel__empty">"Loading AOIs..."</p>
                    </Show>
                    <Show when=move || { let s = aois.get(); !s.loading && s.items.is_empty() }>
                        <p class="aoi-panel__empty">"Draw a polygon on the map to create an AOI."</p>
                    </Show>
                    <For
                        each=move || aois.get().items
                        key=|aoi| (aoi.id, aoi.name.clone(), aoi.is_active, aoi.monitoring_enabled, aoi.geometry.area_m2().to_bits())
                        children=move |aoi| {
                            view! {
                                <AoiRow
                                    aoi=aoi
                                    on_preview=on_preview
                                    on_edit=on_edit
                                    on_delete=on_delete
                                    on_toggle=on_toggle
                                />
                            }
                        }
                    />
                </div>
            </Show>
        </aside>
    }
}

#[component]
fn AoiRow(
    aoi: Aoi,
    on_preview: Callback<i64>,
    on_edit: Callback<Aoi>,
    on_delete: Callback<i64>,
    on_toggle: Callback<(i64, AoiFlag, bool)>,
) -> impl IntoView {
    let aois = expect_context::<RwSignal<AoisState>>();
    let id = aoi.id;
    let busy = move || id.is_some_and(|id| aois.get().is_pending(id));
    let previewed = move || id.is_some() && aois.get().preview_id == id;
    let name = aoi.name.clone();
    let area = aoi.area_label();
    let edit_target = aoi.clone();

    let switch = move |flag: AoiFlag| {
        let checked = aoi.flag(flag);
        view! {
            <label class="aoi-panel__switch-row">
                <span>{flag.label()}</span>
                <input
                    class="switch"
                    type="checkbox"
                    prop:checked=checked
                    disabled=busy
                    on:change=move |ev| {
                        if let Some(id) = id {
                            on_toggle.run((id, flag, event_target_checked(&ev)));
                        }
                    }
                />
            </label>
        }
    };

    view! {
        <div class="aoi-panel__row" class:aoi-panel__row--previewed=previewed class:aoi-panel__row--busy=busy>
            <div class="aoi-panel__name">{name}</div>
            <div class="aoi-panel__area">{area}</div>
            <div class="aoi-panel__actions">
                <button
                    class="btn btn--outline"
                    title="Preview"
                    on:click=move |_| {
                        if let Some(id) = id {
                            on_preview.run(id);
                        }
                    }
                >
                    "👁"
                </button>
                <button
                    class="btn btn--outline"
                    title="Edit"
                    disabled=busy
                    on:click=move |_| on_edit.run(edit_target.clone())
                >
                    "✎"
                </button>
                <button
                    class="btn btn--danger"
                    title="Delete"
                    disabled=busy
                    on:click=move |_| {
                        if let Some(id) = id {
                            on_delete.run(id);
                        }
                    }
                >
                    "🗑"
                </button>
            </div>
            {switch(AoiFlag::IsActive)}
            {switch(AoiFlag::MonitoringEnabled)}
        </div>
    }
}

//! Modal form for naming a freshly drawn AOI or editing an existing one.
//!
//! DESIGN
//! ======
//! Form seeding and the save rules live in [`AoiForm`] so they can be tested
//! without a DOM. The component is mounted fresh each time the modal opens,
//! which reseeds the form from whatever record or geometry it is given.

#[cfg(test)]
#[path = "save_aoi_modal_test.rs"]
mod save_aoi_modal_test;

use leptos::prelude::*;

use crate::net::types::{Aoi, Geometry};
use crate::state::ui::UiState;

/// Notice shown when neither a drawn nor a stored geometry is available.
pub const NO_GEOMETRY_NOTICE: &str = "No geometry provided";

/// Editable fields of the modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AoiForm {
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub monitoring_enabled: bool,
}

impl AoiForm {
    /// Form values for editing `initial`, or the blank create form.
    #[must_use]
    pub fn seeded(initial: Option<&Aoi>) -> Self {
        match initial {
            Some(aoi) => Self {
                name: aoi.name.clone(),
                description: aoi.description.clone().unwrap_or_default(),
                is_active: aoi.is_active,
                monitoring_enabled: aoi.monitoring_enabled,
            },
            None => Self {
                name: String::new(),
                description: String::new(),
                is_active: true,
                monitoring_enabled: false,
            },
        }
    }

    /// Complete record to save.
    ///
    /// The drawn geometry wins over the edited record's; `id` and
    /// `created_at` carry over from the edited record.
    ///
    /// # Errors
    ///
    /// Returns [`NO_GEOMETRY_NOTICE`] when there is no geometry at all.
    pub fn build(&self, initial: Option<&Aoi>, drawn: Option<&Geometry>) -> Result<Aoi, &'static str> {
        let geometry = drawn
            .or_else(|| initial.map(|aoi| &aoi.geometry))
            .cloned()
            .ok_or(NO_GEOMETRY_NOTICE)?;
        Ok(Aoi {
            id: initial.and_then(|aoi| aoi.id),
            name: self.name.clone(),
            description: Some(self.description.clone()),
            geometry,
            is_active: self.is_active,
            monitoring_enabled: self.monitoring_enabled,
            created_at: initial.and_then(|aoi| aoi.created_at.clone()),
        })
    }
}

/// Area of the geometry the modal would save, formatted for display.
#[must_use]
pub fn area_label(initial: Option<&Aoi>, drawn: Option<&Geometry>) -> Option<String> {
    drawn
        .or_else(|| initial.map(|aoi| &aoi.geometry))
        .map(|geometry| mapcore::geometry::format_area(geometry.area_m2()))
}

#[must_use]
pub fn modal_title(editing: bool) -> &'static str {
    if editing { "Edit AOI" } else { "Save AOI" }
}

/// Save/Edit AOI dialog.
#[component]
pub fn SaveAoiModal(
    initial: Option<Aoi>,
    geometry: Option<Geometry>,
    on_save: Callback<Aoi>,
    on_close: Callback<()>,
) -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();
    let seed = AoiForm::seeded(initial.as_ref());
    let name = RwSignal::new(seed.name);
    let description = RwSignal::new(seed.description);
    let is_active = RwSignal::new(seed.is_active);
    let monitoring_enabled = RwSignal::new(seed.monitoring_enabled);
    let notice = RwSignal::new(None::<&'static str>);
    let title = modal_title(initial.is_some());
    let area = area_label(initial.as_ref(), geometry.as_ref());

    let submit = move || {
        let form = AoiForm {
            name: name.get_untracked(),
            description: description.get_untracked(),
            is_active: is_active.get_untracked(),
            monitoring_enabled: monitoring_enabled.get_untracked(),
        };
        match form.build(initial.as_ref(), geometry.as_ref()) {
            Ok(aoi) => {
                on_save.run(aoi);
                on_close.run(());
            }
            Err(message) => {
                notice.set(Some(message));
                ui.update(|u| {
                    u.error(message);
                });
            }
        }
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        submit();
    };
    let on_backdrop = move |_: leptos::ev::MouseEvent| on_close.run(());
    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=on_backdrop>
            <form
                class="dialog dialog--aoi"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=on_keydown
                on:submit=on_submit
                tabindex="0"
            >
                <h2>{title}</h2>
                {area.map(|area| view! { <p class="dialog__area">"Area: " {area}</p> })}
                <input
                    class="dialog__input"
                    type="text"
                    placeholder="Name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <textarea
                    class="dialog__input dialog__input--textarea"
                    placeholder="Description"
                    prop:value=move || description.get()
                    on:input=move |ev| description.set(event_target_value(&ev))
                ></textarea>
                <label class="dialog__switch-row">
                    <span>"Active"</span>
                    <input
                        class="switch"
                        type="checkbox"
                        prop:checked=move || is_active.get()
                        on:change=move |ev| is_active.set(event_target_checked(&ev))
                    />
                </label>
                <label class="dialog__switch-row">
                    <span>"Monitoring"</span>
                    <input
                        class="switch"
                        type="checkbox"
                        prop:checked=move || monitoring_enabled.get()
                        on:change=move |ev| monitoring_enabled.set(event_target_checked(&ev))
                    />
                </label>
                <Show when=move || notice.get().is_some()>
                    <p class="dialog__notice">{move || notice.get().unwrap_or_default()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="btn" type="button" on:click=move |_| on_close.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" type="submit">
                        "Save"
                    </button>
                </div>
            </form>
        </div>
    }
}

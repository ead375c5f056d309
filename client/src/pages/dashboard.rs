//! AOI dashboard: map, list panel, and save modal around one AOI list.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the authenticated working route. It owns every backend mutation:
//! components emit intents, this page issues exactly one API call per
//! intent and reconciles `AoisState` with the server's answer.
//!
//! ERROR HANDLING
//! ==============
//! Nothing is patched before the backend answers, so a failure only needs a
//! toast and a log line. `401` drops the cached session, which sends the
//! route guard back to `/login`.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use std::future::Future;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::aoi_list_panel::AoiListPanel;
use crate::components::map_view::MapView;
use crate::components::properties_card::PropertiesCard;
use crate::components::save_aoi_modal::SaveAoiModal;
use crate::net::api::{self, ApiError};
use crate::net::types::{Aoi, AoiFlag, Geometry};
use crate::state::aois::AoisState;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::auth::{install_unauth_redirect, sign_out};
use crate::util::storage::BrowserStorage;

const BUSY_MESSAGE: &str = "Another change to this AOI is still in progress.";

fn toggle_message(flag: AoiFlag) -> String {
    format!("AOI {} updated", flag.field_name())
}

fn failure_message(action: &str, err: &ApiError) -> String {
    match err {
        ApiError::Unauthorized => "Session expired. Please sign in again.".to_owned(),
        other => format!("Failed to {action}: {other}"),
    }
}

/// Open modal: a record being edited, or a freshly drawn geometry.
#[derive(Clone, Debug, PartialEq)]
struct ModalTarget {
    initial: Option<Aoi>,
    geometry: Option<Geometry>,
}

fn spawn(task: impl Future<Output = ()> + 'static) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(task);
    #[cfg(not(feature = "hydrate"))]
    drop(task);
}

/// Handles to the shared state the dashboard mutates.
#[derive(Clone, Copy)]
struct Dashboard {
    auth: RwSignal<AuthState>,
    aois: RwSignal<AoisState>,
    ui: RwSignal<UiState>,
}

impl Dashboard {
    fn notify(self, message: impl Into<String>) {
        self.ui.update(|u| {
            u.success(message);
        });
    }

    fn fail(self, action: &str, err: &ApiError) {
        log::error!("failed to {action}: {err}");
        self.ui.update(|u| {
            u.error(failure_message(action, err));
        });
        if *err == ApiError::Unauthorized {
            sign_out(&BrowserStorage, self.auth);
        }
    }

    /// Claim the in-flight slot for `id`, telling the user when it is taken.
    fn claim(self, id: i64) -> bool {
        let claimed = self.aois.try_update(|s| s.begin_mutation(id)).unwrap_or(false);
        if !claimed {
            self.ui.update(|u| {
                u.error(BUSY_MESSAGE);
            });
        }
        claimed
    }

    fn load(self) {
        self.aois.update(|s| s.loading = true);
        spawn(async move {
            match api::list_aois().await {
                Ok(items) => {
                    log::info!("loaded {} AOIs", items.len());
                    self.aois.update(|s| s.replace_all(items));
                }
                Err(e) => {
                    self.aois.update(|s| {
                        s.loading = false;
                        s.error = Some(e.to_string());
                    });
                    self.fail("load AOIs", &e);
                }
            }
        });
    }

    fn create(self, record: Aoi) {
        spawn(async move {
            match api::create_aoi(&record).await {
                Ok(created) => {
                    self.aois.update(|s| s.insert_created(created));
                    self.notify("AOI created");
                }
                Err(e) => self.fail("create AOI", &e),
            }
        });
    }

    fn update(self, id: i64, record: Aoi, success: String) {
        if !self.claim(id) {
            return;
        }
        spawn(async move {
            let result = api::update_aoi(id, &record).await;
            self.aois.update(|s| s.end_mutation(id));
            match result {
                Ok(updated) => {
                    if self.aois.try_update(|s| s.apply_updated(updated)).unwrap_or(false) {
                        self.notify(success);
                    } else {
                        log::warn!("AOI {id} was removed before its update landed");
                    }
                }
                Err(e) => self.fail("update AOI", &e),
            }
        });
    }

    fn delete(self, id: i64) {
        if !self.claim(id) {
            return;
        }
        spawn(async move {
            let result = api::delete_aoi(id).await;
            self.aois.update(|s| s.end_mutation(id));
            match result {
                Ok(()) => {
                    self.aois.update(|s| {
                        s.remove(id);
                    });
                    self.notify("AOI deleted");
                }
                Err(e) => self.fail("delete AOI", &e),
            }
        });
    }

    fn current(self, id: i64) -> Option<Aoi> {
        self.aois.with_untracked(|s| s.find(id).cloned())
    }

    /// Save from the modal: records with an id are updated, others created.
    fn save(self, record: Aoi) {
        match record.id {
            Some(id) => self.update(id, record, "AOI updated".to_owned()),
            None => self.create(record),
        }
    }

    fn toggle(self, id: i64, flag: AoiFlag, value: bool) {
        if let Some(current) = self.current(id) {
            self.update(id, current.with_flag(flag, value), toggle_message(flag));
        }
    }

    fn reshape(self, id: i64, geometry: Geometry) {
        if let Some(current) = self.current(id) {
            self.update(id, current.with_geometry(geometry), "AOI updated".to_owned());
        }
    }
}

/// Dashboard page. Redirects to `/login` without a valid session.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let dash = Dashboard { auth, aois: expect_context::<RwSignal<AoisState>>(), ui: expect_context::<RwSignal<UiState>>() };
    let aois = dash.aois;
    install_unauth_redirect(auth, use_navigate());

    let requested = RwSignal::new(false);
    Effect::new(move || {
        if requested.get_untracked() || !auth.get().signed_in() {
            return;
        }
        requested.set(true);
        dash.load();
    });

    let modal = RwSignal::new(None::<ModalTarget>);

    let on_map_create = Callback::new(move |geometry: Geometry| {
        modal.set(Some(ModalTarget { initial: None, geometry: Some(geometry) }));
    });
    let on_map_edit = Callback::new(move |(id, geometry): (i64, Geometry)| dash.reshape(id, geometry));
    let on_delete = Callback::new(move |id: i64| dash.delete(id));
    let on_focus = Callback::new(move |id: i64| aois.update(|s| s.focus(id)));
    let on_list_edit = Callback::new(move |aoi: Aoi| {
        modal.set(Some(ModalTarget { initial: Some(aoi), geometry: None }));
    });
    let on_toggle = Callback::new(move |(id, flag, value): (i64, AoiFlag, bool)| dash.toggle(id, flag, value));
    let on_save = Callback::new(move |record: Aoi| dash.save(record));
    let on_close = Callback::new(move |()| modal.set(None));

    let aoi_count = Signal::derive(move || aois.with(|s| s.items.len()));

    view! {
        <Show
            when=move || !auth.get().loading && auth.get().signed_in()
            fallback=move || {
                view! {
                    <div class="dashboard-page">
                        <p>{move || if auth.get().loading { "Loading..." } else { "Redirecting to login..." }}</p>
                    </div>
                }
            }
        >
            <div class="dashboard-page">
                <div class="dashboard-page__map">
                    <MapView on_create=on_map_create on_edit=on_map_edit on_delete=on_delete on_select=on_focus />
                    <PropertiesCard total=aoi_count />
                    <Show when=move || aois.get().error.is_some()>
                        <p class="dashboard-page__error">{move || aois.get().error.unwrap_or_default()}</p>
                    </Show>
                </div>
                <AoiListPanel on_preview=on_focus on_edit=on_list_edit on_delete=on_delete on_toggle=on_toggle />
                {move || {
                    modal
                        .get()
                        .map(|target| {
                            view! {
                                <SaveAoiModal
                                    initial=target.initial
                                    geometry=target.geometry
                                    on_save=on_save
                                    on_close=on_close
                                />
                            }
                        })
                }}
            </div>
        </Show>
    }
}

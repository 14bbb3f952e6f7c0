use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use orbis_shared::{GlobeLayout, GlobeState};

use crate::config::read_config;
use crate::globe::GlobeSurface;
use crate::info_panel::InfoPanel;
use crate::loader::fetch_features;

/// Viewport size, falling back to a fixed size outside a browser window.
pub(crate) fn viewport_dimensions() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (1200.0, 800.0);
    };
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1200.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    (w, h)
}

/// Lifecycle of the dataset fetch. The globe only exists once loading succeeds.
#[derive(Clone)]
pub(crate) enum LoadPhase {
    Loading,
    Ready(RwSignal<GlobeState>),
    Failed(String),
}

impl LoadPhase {
    pub(crate) fn status_text(&self) -> Option<String> {
        match self {
            Self::Loading => Some("Loading countries…".to_string()),
            Self::Ready(_) => None,
            Self::Failed(err) => Some(format!("Could not load country data: {err}")),
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = read_config();
    let (width, height) = viewport_dimensions();
    let layout = GlobeLayout::from_viewport(width, height);

    let phase: RwSignal<LoadPhase> = RwSignal::new(LoadPhase::Loading);

    spawn_local(async move {
        match fetch_features(&config.data_url).await {
            Ok(features) => {
                web_sys::console::info_1(
                    &format!("loaded {} countries from {}", features.len(), config.data_url).into(),
                );
                let globe = RwSignal::new(GlobeState::new(features, layout, &config));
                phase.set(LoadPhase::Ready(globe));
            }
            Err(e) => {
                web_sys::console::warn_1(
                    &format!("failed to load {}: {e}", config.data_url).into(),
                );
                phase.set(LoadPhase::Failed(e));
            }
        }
    });

    move || match phase.get() {
        LoadPhase::Ready(globe) => view! {
            <GlobeSurface globe=globe />
            <InfoPanel globe=globe />
        }
        .into_any(),
        other => {
            let text = other.status_text().unwrap_or_default();
            view! { <p class="status">{text}</p> }.into_any()
        }
    }
}

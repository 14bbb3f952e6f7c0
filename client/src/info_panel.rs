use leptos::prelude::*;

use orbis_shared::GlobeState;

/// Side panel with the last hovered country's details. Empty until the first hover.
#[component]
pub fn InfoPanel(globe: RwSignal<GlobeState>) -> impl IntoView {
    let info = Memo::new(move |_| globe.with(|g| g.info().cloned()));

    view! {
        <article class="info">
            {move || {
                info.get().map(|info| {
                    let rows = info
                        .rows()
                        .map(|(label, value)| view! { <p>{format!("{label}: {value}")}</p> });
                    view! {
                        <h1>{info.name.clone()}</h1>
                        <hr />
                        {rows.into_iter().collect_view()}
                    }
                })
            }}
        </article>
    }
}

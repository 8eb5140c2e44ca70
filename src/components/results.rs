use leptos::prelude::*;
use winston_core::results::{cell, ResultRow};
use crate::state::{AppState, RenderedResults};

#[component]
pub fn ResultsPanel() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div class="results-panel">
            <div id="results">
                {move || state.results.get().map(|r| view! { <ResultsTable results=r /> })}
            </div>
            <SelectedImage />
        </div>
    }
}

#[component]
fn ResultsTable(results: RenderedResults) -> impl IntoView {
    let RenderedResults { rows, show_names, summary } = results;

    let summary_view = (!summary.is_empty()).then(|| {
        let items: Vec<_> = summary
            .into_iter()
            .map(|(k, v)| view! { <div class="summary-item"><span class="summary-key">{k}</span>" "<span>{v}</span></div> })
            .collect();
        view! { <div class="results-summary">{items}</div> }
    });

    let body: Vec<_> = rows
        .into_iter()
        .map(|row| view! { <ResultRowView row=row show_names=show_names /> })
        .collect();

    view! {
        {summary_view}
        <table>
            <thead>
                <tr>
                    <th class="image">"Image"</th>
                    {show_names.then(|| view! { <th class="img-name">"File Name"</th> })}
                    <th class="gantry">"Gantry"</th>
                    <th class="coll">"Coll"</th>
                    <th class="table">"Table"</th>
                    <th class="CAXtoBB">"\u{2206} (mm)"</th>
                    <th class="status">"Status"</th>
                </tr>
            </thead>
            <tbody>{body}</tbody>
        </table>
    }
}

#[component]
fn ResultRowView(row: ResultRow, show_names: bool) -> impl IntoView {
    let state = expect_context::<AppState>();
    let key = row.image_key.clone();

    let on_select = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        state.selected_image.set(Some(key.clone()));
    };

    let name_cell = show_names.then(|| {
        let name = row.display_name.clone().unwrap_or_default();
        view! { <td>{name}</td> }
    });

    view! {
        <tr>
            <td><a href="#" class="image-link" on:click=on_select>{row.image_key.clone()}</a></td>
            {name_cell}
            <td>{cell(row.gantry)}</td>
            <td>{cell(row.collimator)}</td>
            <td>{cell(row.table)}</td>
            <td>{row.cax_to_bb_mm.to_string()}</td>
            <td>
                <span style=format!("color:{};", row.status.color())>"\u{25CF}"</span>
                {format!(" {}", row.status.label())}
            </td>
        </tr>
    }
}

/// The detail view for the clicked image. The title stays in place across
/// selections; only the image is swapped.
#[component]
fn SelectedImage() -> impl IntoView {
    let state = expect_context::<AppState>();

    view! {
        <div id="selected-image">
            <div id="image-title">{move || state.selected_image.get().unwrap_or_default()}</div>
            {move || state.selected_image.get().map(|key| view! { <AnalyzedImage image_key=key /> })}
        </div>
    }
}

#[component]
fn AnalyzedImage(image_key: String) -> impl IntoView {
    let state = expect_context::<AppState>();
    let loaded = RwSignal::new(false);
    let src = state.config.with_value(|c| c.image_url(&image_key));

    view! {
        <img
            src=src
            alt=image_key
            class=move || if loaded.get() { "fade-in" } else { "" }
            on:load=move |_| loaded.set(true)
        />
    }
}

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{DragEvent, FileList as DomFileList, HtmlInputElement, MouseEvent};
use crate::session::{add_file, remove_file};
use crate::state::{AppState, FileEntry, UploadState};

fn add_all(state: AppState, file_list: &DomFileList) {
    for i in 0..file_list.length() {
        let Some(file) = file_list.get(i) else { continue };
        add_file(state, file);
    }
}

#[component]
pub fn FileList() -> impl IntoView {
    let state = expect_context::<AppState>();
    let drag_over = RwSignal::new(false);
    let file_input_ref = NodeRef::<leptos::html::Input>::new();

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        drag_over.set(true);
    };

    let on_dragleave = move |_: DragEvent| {
        drag_over.set(false);
    };

    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        drag_over.set(false);
        let Some(dt) = ev.data_transfer() else { return };
        let Some(file_list) = dt.files() else { return };
        add_all(state, &file_list);
    };

    let on_browse_click = move |_: MouseEvent| {
        if let Some(input) = file_input_ref.get() {
            let el: &HtmlInputElement = input.as_ref();
            el.click();
        }
    };

    let on_file_input_change = move |ev: web_sys::Event| {
        let Some(target) = ev.target() else { return };
        let input: HtmlInputElement = target.unchecked_into();
        if let Some(file_list) = input.files() {
            add_all(state, &file_list);
        }
        // Reset the input so the same file can be re-selected
        input.set_value("");
    };

    view! {
        <div
            class=move || if drag_over.get() { "drop-zone drag-over" } else { "drop-zone" }
            on:dragover=on_dragover
            on:dragleave=on_dragleave
            on:drop=on_drop
        >
            <input
                node_ref=file_input_ref
                type="file"
                multiple=true
                style="display:none"
                on:change=on_file_input_change
            />
            <div class="drop-hint">
                "Drop images here"
                <button class="upload-btn" on:click=on_browse_click>"Browse files"</button>
            </div>
            <div id="file-list" class="file-list">
                <For
                    each=move || state.files.get()
                    key=|f| f.id
                    children=move |f| view! { <FileRow entry=f /> }
                />
            </div>
        </div>
    }
}

#[component]
fn FileRow(entry: FileEntry) -> impl IntoView {
    let state = expect_context::<AppState>();
    let FileEntry { id, display_name, progress, upload_state, .. } = entry;

    let on_remove = move |ev: MouseEvent| {
        ev.stop_propagation();
        remove_file(state, id);
    };

    let bar_style = move || {
        let color = match upload_state.get() {
            UploadState::Rejected => "background-color: red; ",
            _ => "",
        };
        format!("{color}width: {}%", progress.get())
    };

    view! {
        <div class="file-item">
            <div class="file-item-name">
                {display_name}
                <button class="remove-button" on:click=on_remove>"\u{2716}"</button>
            </div>
            <Show when=move || upload_state.get() != UploadState::Done>
                <div class="progress-bar-container">
                    <div class="progress-bar-files" style=bar_style></div>
                </div>
            </Show>
        </div>
    }
}

use leptos::prelude::*;
use winston_core::config::ServerConfig;
use crate::components::file_list::FileList;
use crate::components::preferences::Preferences;
use crate::components::results::ResultsPanel;
use crate::session::clear_server_files;
use crate::state::AppState;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new(ServerConfig::default());
    provide_context(state);

    // A fresh page starts from an empty upload folder.
    clear_server_files(state);

    view! {
        <div class="app">
            <FileList />
            <div class="main">
                <Preferences />
                <ResultsPanel />
            </div>
        </div>
    }
}

//! File list operations: adding files (which starts their uploads) and
//! removing them.

use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::File;
use winston_core::config::ServerConfig;
use winston_core::files::{delete_remote, remove_row, upsert_row, FileRow, RemoteFiles};
use crate::api;
use crate::browser::sleep_ms;
use crate::state::{AppState, FileEntry, UploadState};
use crate::upload::{start_upload, UploadEvent, UploadResult};

/// Append a row for `file` and start uploading it. A row already showing the
/// same name is replaced, since the new upload supersedes the old one.
pub fn add_file(state: AppState, file: File) {
    let name = file.name();
    let entry = FileEntry::new(state.alloc_file_id(), name.clone());
    let progress = entry.progress;
    let upload_state = entry.upload_state;
    state.files.update(|files| upsert_row(files, entry));

    let Some(ticket) = state.uploads.try_update_value(|t| t.reserve(&name)) else { return };
    let url = state.config.with_value(|c| c.upload_url());

    let ticket_cb = ticket.clone();
    let on_event = move |ev: UploadEvent| {
        let current = state.uploads.try_with_value(|t| t.is_current(&ticket_cb)).unwrap_or(false);
        if !current {
            return;
        }
        match ev {
            UploadEvent::Progress(fraction) => progress.set(fraction * 100.0),
            UploadEvent::Finished(result) => {
                let ticket = ticket_cb.clone();
                // Dropping the handle detaches this very callback, so let it return first.
                spawn_local(async move {
                    state.uploads.update_value(|t| {
                        t.complete(&ticket);
                    });
                });
                match result {
                    UploadResult::Confirmed => {
                        progress.set(100.0);
                        spawn_local(async move {
                            sleep_ms(0).await;
                            upload_state.set(UploadState::Done);
                        });
                    }
                    UploadResult::Rejected => {
                        log::warn!("Server did not confirm {}", ticket_cb.file_name);
                        upload_state.set(UploadState::Rejected);
                    }
                    UploadResult::Failed(_) => upload_state.set(UploadState::Failed),
                }
            }
        }
    };

    match start_upload(&url, &file, on_event) {
        Ok(handle) => state.uploads.update_value(|t| t.register(&ticket, handle)),
        Err(e) => {
            log::error!("Could not start upload of {name}: {e}");
            upload_state.set(UploadState::Failed);
        }
    }
}

struct Server(ServerConfig);

impl RemoteFiles for Server {
    async fn remove_file(&self, name: &str) -> Result<(), String> {
        api::remove_file(&self.0, name).await
    }
}

impl FileRow for FileEntry {
    fn row_id(&self) -> u64 {
        self.id
    }

    fn file_name(&self) -> &str {
        &self.name
    }
}

/// Remove a row immediately, abort its upload if still running and ask the
/// server to delete the stored copy. Server failures are only logged; the
/// row stays gone.
pub fn remove_file(state: AppState, id: u64) {
    let mut removed = None;
    state.files.update(|files| {
        state.uploads.update_value(|t| removed = remove_row(files, t, id));
    });
    let Some(name) = removed else { return };

    let server = Server(state.config.get_value());
    spawn_local(async move {
        delete_remote(&server, &name).await;
    });
}

/// Clear any files left on the server by an earlier page session.
pub fn clear_server_files(state: AppState) {
    let cfg = state.config.get_value();
    spawn_local(async move {
        match api::clear_files(&cfg).await {
            Ok(()) => log::info!("Files cleared successfully"),
            Err(e) => log::error!("Error clearing files: {e}"),
        }
    });
}

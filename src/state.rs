use leptos::prelude::*;
use winston_core::config::{ServerConfig, NAME_TRUNCATE_LEN};
use winston_core::lock::LockState;
use winston_core::names::truncate_filename;
use winston_core::results::{AnalysisResult, ResultRow};
use winston_core::tracker::UploadTracker;
use crate::upload::UploadHandle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadState {
    Uploading,
    /// Confirmed by the server; the progress bar is hidden.
    Done,
    /// The server answered without listing the file.
    Rejected,
    Failed,
}

#[derive(Clone, Debug)]
pub struct FileEntry {
    pub id: u64,
    pub name: String,
    pub display_name: String,
    /// Bar width, 0-100.
    pub progress: RwSignal<f64>,
    pub upload_state: RwSignal<UploadState>,
}

impl FileEntry {
    pub fn new(id: u64, name: String) -> Self {
        Self {
            id,
            display_name: truncate_filename(&name, NAME_TRUNCATE_LEN),
            name,
            progress: RwSignal::new(0.0),
            upload_state: RwSignal::new(UploadState::Uploading),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct RenderedResults {
    pub rows: Vec<ResultRow>,
    pub show_names: bool,
    pub summary: Vec<(String, String)>,
}

impl RenderedResults {
    pub fn new(result: &AnalysisResult, tolerance_mm: f64) -> Self {
        Self {
            rows: result.rows(tolerance_mm),
            show_names: result.has_names(),
            summary: result.summary(),
        }
    }
}

/// Everything one page session knows. Provided through context and reset on
/// reload.
#[derive(Clone, Copy)]
pub struct AppState {
    pub config: StoredValue<ServerConfig>,
    pub files: RwSignal<Vec<FileEntry>>,
    pub next_file_id: StoredValue<u64>,
    pub uploads: StoredValue<UploadTracker<UploadHandle>, LocalStorage>,
    pub lock: RwSignal<LockState>,
    pub bb_size: RwSignal<String>,
    pub low_density: RwSignal<bool>,
    pub tolerance: RwSignal<String>,
    pub analysis_progress: RwSignal<f64>,
    /// Cleared for one tick when the bar snaps back to empty.
    pub progress_animated: RwSignal<bool>,
    pub analysis_running: RwSignal<bool>,
    pub results: RwSignal<Option<RenderedResults>>,
    pub selected_image: RwSignal<Option<String>>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: StoredValue::new(config),
            files: RwSignal::new(Vec::new()),
            next_file_id: StoredValue::new(0),
            uploads: StoredValue::new_local(UploadTracker::new()),
            lock: RwSignal::new(LockState::default()),
            bb_size: RwSignal::new(String::new()),
            low_density: RwSignal::new(false),
            tolerance: RwSignal::new(String::new()),
            analysis_progress: RwSignal::new(0.0),
            progress_animated: RwSignal::new(true),
            analysis_running: RwSignal::new(false),
            results: RwSignal::new(None),
            selected_image: RwSignal::new(None),
        }
    }

    pub fn alloc_file_id(&self) -> u64 {
        self.next_file_id
            .try_update_value(|id| {
                *id += 1;
                *id
            })
            .unwrap_or_default()
    }
}

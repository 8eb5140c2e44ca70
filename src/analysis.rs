use leptos::prelude::*;
use leptos::task::spawn_local;
use winston_core::analysis::{self, AnalysisHost};
use winston_core::config::ServerConfig;
use winston_core::params::AnalysisParameters;
use winston_core::results::AnalysisResult;
use winston_core::wire::AnalyzeReply;
use winston_core::Error;
use crate::api;
use crate::browser::{alert, force_reflow, next_frame, sleep_ms};
use crate::state::{AppState, RenderedResults};

pub(crate) const PROGRESS_BAR_ID: &str = "progress-bar";

struct BrowserAnalysis {
    state: AppState,
    config: ServerConfig,
}

impl AnalysisHost for BrowserAnalysis {
    async fn check_files(&self) -> Result<(), Error> {
        api::check_files(&self.config).await
    }

    async fn analyze(&self, params: &AnalysisParameters) -> Result<AnalyzeReply, Error> {
        api::analyze(&self.config, params).await
    }

    async fn sleep_ms(&self, ms: u32) {
        sleep_ms(ms).await;
    }

    fn set_progress(&self, percent: f64) {
        self.state.analysis_progress.set(percent);
    }

    fn reset_progress(&self) {
        let state = self.state;
        state.progress_animated.set(false);
        state.analysis_progress.set(0.0);
        // The empty width must be laid out while `no-transition` is applied,
        // otherwise the bar animates back down.
        spawn_local(async move {
            next_frame().await;
            force_reflow(PROGRESS_BAR_ID);
            state.progress_animated.set(true);
        });
    }

    fn alert(&self, message: &str) {
        alert(message);
    }

    fn is_running(&self) -> bool {
        self.state.analysis_running.get_untracked()
    }

    fn set_running(&self, running: bool) {
        self.state.analysis_running.set(running);
    }

    fn show_results(&self, result: AnalysisResult, params: AnalysisParameters) {
        self.state.selected_image.set(None);
        self.state
            .results
            .set(Some(RenderedResults::new(&result, params.tolerance_mm as f64)));
    }
}

pub async fn perform_analysis(state: AppState) {
    let host = BrowserAnalysis {
        state,
        config: state.config.get_value(),
    };
    analysis::perform_analysis(
        &host,
        &state.bb_size.get_untracked(),
        state.low_density.get_untracked(),
        &state.tolerance.get_untracked(),
    )
    .await;
}

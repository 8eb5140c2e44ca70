//! The "perform analysis" sequence, independent of where it runs.
//!
//! The browser supplies the network calls, timers, alert and progress bar
//! through [`AnalysisHost`].

use crate::error::Error;
use crate::params::AnalysisParameters;
use crate::progress::{AFTER_ANALYZE, BEFORE_ANALYZE};
use crate::results::AnalysisResult;
use crate::wire::AnalyzeReply;

#[allow(async_fn_in_trait)]
pub trait AnalysisHost {
    async fn check_files(&self) -> Result<(), Error>;
    async fn analyze(&self, params: &AnalysisParameters) -> Result<AnalyzeReply, Error>;
    async fn sleep_ms(&self, ms: u32);
    fn set_progress(&self, percent: f64);
    /// Snap the bar back to empty without animating.
    fn reset_progress(&self);
    fn alert(&self, message: &str);
    fn is_running(&self) -> bool;
    fn set_running(&self, running: bool);
    fn show_results(&self, result: AnalysisResult, params: AnalysisParameters);
}

async fn run<H: AnalysisHost>(host: &H, params: &AnalysisParameters) -> Result<AnalysisResult, Error> {
    host.check_files().await?;

    for cp in BEFORE_ANALYZE {
        host.set_progress(cp.percent);
        if cp.hold_ms > 0 {
            host.sleep_ms(cp.hold_ms).await;
        }
    }

    let reply = host.analyze(params).await?;
    host.set_progress(AFTER_ANALYZE.percent);
    host.sleep_ms(AFTER_ANALYZE.hold_ms).await;
    reply.into_result()
}

/// Validate the preferences, run the server analysis and hand over its
/// results.
///
/// Every failure ends the same way: logged, progress bar emptied, message
/// alerted. Validation failures never reach the network, and a call made
/// while another analysis is running does nothing.
pub async fn perform_analysis<H: AnalysisHost>(host: &H, bb_size: &str, low_density: bool, tolerance: &str) {
    if host.is_running() {
        log::debug!("Analysis already running");
        return;
    }
    host.reset_progress();

    let params = match AnalysisParameters::from_inputs(bb_size, low_density, tolerance) {
        Ok(p) => p,
        Err(e) => {
            host.alert(&e.to_string());
            return;
        }
    };

    host.set_running(true);
    log::info!(
        "Analyzing: BB {} mm, low density {}, tolerance {} mm",
        params.bb_size,
        params.low_density,
        params.tolerance_mm
    );

    match run(host, &params).await {
        Ok(result) => {
            log::info!("Analysis returned {} images", result.caxtobb_dict.len());
            host.show_results(result, params);
        }
        Err(e) => {
            log::error!("Analysis failed: {e}");
            host.reset_progress();
            host.alert(&e.to_string());
        }
    }

    host.set_running(false);
}

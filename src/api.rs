//! JSON calls to the analysis server through the browser `fetch` API.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};
use winston_core::config::ServerConfig;
use winston_core::params::AnalysisParameters;
use winston_core::wire::{self, AnalyzeReply, RemoveFileRequest, StatusResponse};
use winston_core::Error;
use crate::browser::js_error_text;

struct RawResponse {
    ok: bool,
    status: u16,
    body: String,
}

async fn send(method: &str, url: &str, json_body: Option<String>) -> Result<RawResponse, Error> {
    let transport = |e: JsValue| Error::Transport(js_error_text(&e));
    let window = web_sys::window().ok_or_else(|| Error::Transport("no window".into()))?;

    let init = RequestInit::new();
    init.set_method(method);
    if let Some(body) = &json_body {
        init.set_body(&JsValue::from_str(body));
    }
    let request = Request::new_with_str_and_init(url, &init).map_err(transport)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(transport)?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|_| Error::Transport("Response cast failed".into()))?;
    let text = JsFuture::from(resp.text().map_err(transport)?)
        .await
        .map_err(transport)?;

    Ok(RawResponse {
        ok: resp.ok(),
        status: resp.status(),
        body: text.as_string().unwrap_or_default(),
    })
}

async fn send_for_status(method: &str, url: &str, json_body: Option<String>) -> Result<(), String> {
    let resp = send(method, url, json_body).await.map_err(|e| e.to_string())?;
    let parsed: StatusResponse = serde_json::from_str(&resp.body)
        .map_err(|e| format!("HTTP {}: {e}", resp.status))?;
    parsed.into_result()
}

/// Confirm the server has files to analyze.
pub async fn check_files(cfg: &ServerConfig) -> Result<(), Error> {
    let resp = send("GET", &cfg.check_url(), None).await?;
    if resp.ok {
        Ok(())
    } else {
        Err(wire::check_files_error(resp.status, &resp.body))
    }
}

/// Send the analyze request. The body is interpreted later, through
/// [`AnalyzeReply::into_result`], so the caller can finish its progress
/// animation first.
pub async fn analyze(cfg: &ServerConfig, params: &AnalysisParameters) -> Result<AnalyzeReply, Error> {
    let body = serde_json::to_string(params)?;
    let resp = send("POST", &cfg.analyze_url(), Some(body)).await?;
    Ok(AnalyzeReply { ok: resp.ok, body: resp.body })
}

pub async fn remove_file(cfg: &ServerConfig, filename: &str) -> Result<(), String> {
    let body = serde_json::to_string(&RemoveFileRequest { filename }).map_err(|e| e.to_string())?;
    send_for_status("POST", &cfg.remove_url(), Some(body)).await
}

pub async fn clear_files(cfg: &ServerConfig) -> Result<(), String> {
    send_for_status("POST", &cfg.clear_url(), None).await
}

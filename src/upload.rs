//! Single-file uploads over `XMLHttpRequest`, which unlike `fetch` reports
//! upload progress.

use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, File, FormData, ProgressEvent, XmlHttpRequest, XmlHttpRequestUpload};
use winston_core::progress::upload_fraction;
use winston_core::tracker::CancelUpload;
use winston_core::wire::{upload_outcome, UploadOutcome};
use crate::browser::js_error_text;

#[derive(Clone, Debug, PartialEq)]
pub enum UploadResult {
    Confirmed,
    Rejected,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum UploadEvent {
    /// Fraction transferred, in `[0, 1]`.
    Progress(f64),
    Finished(UploadResult),
}

/// An in-flight upload. Owns the request's event handlers; dropping the
/// handle detaches them, so no callbacks arrive afterwards.
pub struct UploadHandle {
    xhr: XmlHttpRequest,
    upload: XmlHttpRequestUpload,
    _on_progress: Closure<dyn FnMut(ProgressEvent)>,
    _on_load: Closure<dyn FnMut(Event)>,
    _on_error: Closure<dyn FnMut(Event)>,
}

impl CancelUpload for UploadHandle {
    fn cancel(&self) {
        if let Err(e) = self.xhr.abort() {
            log::warn!("Abort failed: {}", js_error_text(&e));
        }
    }
}

impl Drop for UploadHandle {
    fn drop(&mut self) {
        self.upload.set_onprogress(None);
        self.xhr.set_onload(None);
        self.xhr.set_onerror(None);
    }
}

/// POST `file` as multipart field `files` and report progress and the
/// outcome through `on_event`.
pub fn start_upload(
    url: &str,
    file: &File,
    on_event: impl Fn(UploadEvent) + 'static,
) -> Result<UploadHandle, String> {
    let js_err = |e: JsValue| js_error_text(&e);
    let name = file.name();
    let on_event: Rc<dyn Fn(UploadEvent)> = Rc::new(on_event);

    let xhr = XmlHttpRequest::new().map_err(js_err)?;
    xhr.open_with_async("POST", url, true).map_err(js_err)?;
    let upload = xhr.upload().map_err(js_err)?;

    let cb = on_event.clone();
    let on_progress = Closure::<dyn FnMut(ProgressEvent)>::new(move |ev: ProgressEvent| {
        if ev.length_computable() {
            cb(UploadEvent::Progress(upload_fraction(ev.loaded(), ev.total())));
        }
    });

    let cb = on_event.clone();
    let xhr_load = xhr.clone();
    let name_load = name.clone();
    let on_load = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        let status = xhr_load.status().unwrap_or(0);
        let result = if status == 200 {
            let body = xhr_load.response_text().ok().flatten().unwrap_or_default();
            match upload_outcome(&body, &name_load) {
                UploadOutcome::Confirmed => UploadResult::Confirmed,
                UploadOutcome::Rejected => UploadResult::Rejected,
            }
        } else {
            let text = xhr_load.status_text().unwrap_or_default();
            log::error!("Upload failed for {name_load}: HTTP {status} {text}");
            UploadResult::Failed(format!("HTTP {status} {text}"))
        };
        cb(UploadEvent::Finished(result));
    });

    let cb = on_event;
    let name_err = name.clone();
    let on_error = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
        log::error!("Upload error for {name_err}");
        cb(UploadEvent::Finished(UploadResult::Failed("network error".into())));
    });

    upload.set_onprogress(Some(on_progress.as_ref().unchecked_ref()));
    xhr.set_onload(Some(on_load.as_ref().unchecked_ref()));
    xhr.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    let handle = UploadHandle {
        xhr,
        upload,
        _on_progress: on_progress,
        _on_load: on_load,
        _on_error: on_error,
    };

    let form = FormData::new().map_err(js_err)?;
    form.append_with_blob_and_filename("files", file, &name)
        .map_err(js_err)?;
    handle.xhr.send_with_opt_form_data(Some(&form)).map_err(js_err)?;

    Ok(handle)
}

//! JSON bodies exchanged with the analysis server.

use serde::{Deserialize, Serialize};
use crate::error::Error;
use crate::results::AnalysisResult;

/// `POST /upload` response: names the server stored.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    Confirmed,
    /// The server answered but did not list the file.
    Rejected,
}

impl UploadResponse {
    pub fn outcome_for(&self, file_name: &str) -> UploadOutcome {
        if self.files.iter().any(|f| f == file_name) {
            UploadOutcome::Confirmed
        } else {
            UploadOutcome::Rejected
        }
    }
}

/// Interpret a 200 `/upload` body. Unparsable bodies count as a rejection.
pub fn upload_outcome(body: &str, file_name: &str) -> UploadOutcome {
    match serde_json::from_str::<UploadResponse>(body) {
        Ok(resp) => resp.outcome_for(file_name),
        Err(e) => {
            log::warn!("Unreadable upload response for {file_name}: {e}");
            UploadOutcome::Rejected
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RemoveFileRequest<'a> {
    pub filename: &'a str,
}

/// Shared shape of `/remove_file` and `/clear_files` responses.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusResponse {
    pub fn into_result(self) -> Result<(), String> {
        if self.success {
            Ok(())
        } else {
            Err(self.error.unwrap_or_else(|| "unknown error".to_string()))
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

/// Turn a failed `/check_files` response into an error, preferring the
/// server's `error` message over the raw body.
pub fn check_files_error(status: u16, body: &str) -> Error {
    let msg = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| format!("File check failed (HTTP {status})"));
    Error::NoFiles(msg)
}

/// Raw `/analyze` reply, kept uninterpreted until the progress bar has
/// finished its closing hold.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyzeReply {
    pub ok: bool,
    pub body: String,
}

impl AnalyzeReply {
    pub fn into_result(self) -> Result<AnalysisResult, Error> {
        analysis_from_response(self.ok, &self.body)
    }
}

/// Interpret an `/analyze` response. A non-success body is passed through
/// verbatim as the error message.
pub fn analysis_from_response(ok: bool, body: &str) -> Result<AnalysisResult, Error> {
    if !ok {
        return Err(Error::Server(body.to_string()));
    }
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_confirmation() {
        let body = r#"{"files": ["a.dcm", "b.dcm"]}"#;
        assert_eq!(upload_outcome(body, "b.dcm"), UploadOutcome::Confirmed);
        assert_eq!(upload_outcome(body, "c.dcm"), UploadOutcome::Rejected);
        assert_eq!(upload_outcome(r#"{"error": "No file part"}"#, "a.dcm"), UploadOutcome::Rejected);
        assert_eq!(upload_outcome("<html>", "a.dcm"), UploadOutcome::Rejected);
    }

    #[test]
    fn status_response() {
        let ok: StatusResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(ok.into_result().is_ok());
        let err: StatusResponse = serde_json::from_str(r#"{"error": "File not found"}"#).unwrap();
        assert_eq!(err.into_result(), Err("File not found".to_string()));
    }

    #[test]
    fn check_files_message() {
        let e = check_files_error(400, r#"{"error": "No images have been uploaded to analyze."}"#);
        assert_eq!(e.to_string(), "No images have been uploaded to analyze.");
        let e = check_files_error(502, "Bad Gateway");
        assert_eq!(e.to_string(), "File check failed (HTTP 502)");
    }

    #[test]
    fn remove_request_shape() {
        let json = serde_json::to_string(&RemoveFileRequest { filename: "a.dcm" }).unwrap();
        assert_eq!(json, r#"{"filename":"a.dcm"}"#);
    }

    #[test]
    fn analyze_error_body_is_verbatim() {
        let err = analysis_from_response(false, r#"{"error": "No images have been uploaded to analyze."}"#)
            .unwrap_err();
        assert_eq!(err.to_string(), r#"{"error": "No images have been uploaded to analyze."}"#);
    }

    #[test]
    fn analyze_success_and_garbage() {
        let ok = analysis_from_response(true, r#"{"caxtobb_dict": {"image1": 0.4}}"#).unwrap();
        assert_eq!(ok.caxtobb_dict["image1"], 0.4);
        assert!(matches!(analysis_from_response(true, "oops"), Err(Error::Decode(_))));
    }
}

use std::path::Path;
use reqwest::multipart::{Form, Part};
use winston_core::config::ServerConfig;
use winston_core::params::AnalysisParameters;
use winston_core::results::AnalysisResult;
use winston_core::wire::{self, StatusResponse, UploadOutcome};
use winston_core::Error;

fn transport(e: reqwest::Error) -> Error {
    Error::Transport(e.to_string())
}

pub struct Client {
    http: reqwest::Client,
    config: ServerConfig,
}

impl Client {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub async fn clear_files(&self) -> Result<(), Error> {
        let resp = self
            .http
            .post(self.config.clear_url())
            .send()
            .await
            .map_err(transport)?;
        let status: StatusResponse = resp.json().await.map_err(transport)?;
        status.into_result().map_err(Error::Server)
    }

    /// Upload one file and report whether the server listed it as stored.
    pub async fn upload(&self, path: &Path) -> Result<UploadOutcome, Error> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::Transport(format!("not a file: {}", path.display())))?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| Error::Transport(format!("{}: {e}", path.display())))?;

        let form = Form::new().part("files", Part::bytes(bytes).file_name(name.clone()));
        let resp = self
            .http
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        let status = resp.status();
        let body = resp.text().await.map_err(transport)?;
        if !status.is_success() {
            return Err(Error::Server(format!("HTTP {status}: {body}")));
        }
        Ok(wire::upload_outcome(&body, &name))
    }

    pub async fn check_files(&self) -> Result<(), Error> {
        let resp = self
            .http
            .get(self.config.check_url())
            .send()
            .await
            .map_err(transport)?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.map_err(transport)?;
        Err(wire::check_files_error(status.as_u16(), &body))
    }

    pub async fn analyze(&self, params: &AnalysisParameters) -> Result<AnalysisResult, Error> {
        let resp = self
            .http
            .post(self.config.analyze_url())
            .json(params)
            .send()
            .await
            .map_err(transport)?;
        let ok = resp.status().is_success();
        let body = resp.text().await.map_err(transport)?;
        wire::analysis_from_response(ok, &body)
    }
}

use serde::Deserialize;
use crate::error::Error;

/// Names longer than this are shortened in the file list.
pub const NAME_TRUNCATE_LEN: usize = 70;

/// Where the analysis server lives and how its routes are named.
///
/// The browser build uses the default, which resolves every path against
/// the page origin.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    pub upload_path: String,
    pub remove_path: String,
    pub check_path: String,
    pub analyze_path: String,
    pub clear_path: String,
    pub image_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            upload_path: "/upload".into(),
            remove_path: "/remove_file".into(),
            check_path: "/check_files".into(),
            analyze_path: "/analyze".into(),
            clear_path: "/clear_files".into(),
            image_dir: "/static/images/analyzedpngs".into(),
        }
    }
}

impl ServerConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Read a JSON config; omitted fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    fn join(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    pub fn upload_url(&self) -> String {
        self.join(&self.upload_path)
    }

    pub fn remove_url(&self) -> String {
        self.join(&self.remove_path)
    }

    pub fn check_url(&self) -> String {
        self.join(&self.check_path)
    }

    pub fn analyze_url(&self) -> String {
        self.join(&self.analyze_path)
    }

    pub fn clear_url(&self) -> String {
        self.join(&self.clear_path)
    }

    /// Static plot the server writes for one analysed image.
    pub fn image_url(&self, image_key: &str) -> String {
        self.join(&format!("{}/{}.png", self.image_dir, image_key))
    }
}

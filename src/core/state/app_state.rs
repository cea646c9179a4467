use std::path::{Path, PathBuf};

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::profile::Profile;
use crate::core::downloader::HttpFetcher;
use crate::core::error::{AnalyzerError, AnalyzerResult};
use crate::core::http::build_http_client;

const APP_DIR_NAME: &str = "analyzer";
const PUBLIC_DIR_NAME: &str = "public";
const CONFIGURATION_FILE: &str = "analyzer.json";

/// Contents of `configuration/analyzer.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzerConfiguration {
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

impl AnalyzerConfiguration {
    pub fn load(path: &Path) -> AnalyzerResult<Self> {
        if !path.is_file() {
            return Err(AnalyzerError::ConfigNotFound(path.to_path_buf()));
        }

        let raw = std::fs::read_to_string(path).map_err(|e| AnalyzerError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Look a profile up by list index or by name.
    pub fn find_profile(&self, selector: &str) -> AnalyzerResult<&Profile> {
        if self.profiles.is_empty() {
            return Err(AnalyzerError::NoProfiles);
        }

        let by_index = selector
            .parse::<usize>()
            .ok()
            .and_then(|i| self.profiles.get(i));

        by_index
            .or_else(|| self.profiles.iter().find(|p| p.name == selector))
            .ok_or_else(|| AnalyzerError::ProfileNotFound(selector.to_string()))
    }
}

/// Layout of the public data directory.
///
/// - `configuration/analyzer.json` — profile list
/// - `file/`    — default install directory
/// - `log/`     — rolling log files
/// - `profile/` — local instance descriptors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicPaths {
    pub base_dir: PathBuf,
}

impl PublicPaths {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn configuration_file(&self) -> PathBuf {
        self.base_dir.join("configuration").join(CONFIGURATION_FILE)
    }

    pub fn file_dir(&self) -> PathBuf {
        self.base_dir.join("file")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join("log")
    }

    pub fn profile_dir(&self) -> PathBuf {
        self.base_dir.join("profile")
    }
}

pub struct AppState {
    pub paths: PublicPaths,
    pub configuration: AnalyzerConfiguration,
    pub http_client: Client,
}

impl AppState {
    pub fn load(paths: PublicPaths) -> AnalyzerResult<Self> {
        let configuration = AnalyzerConfiguration::load(&paths.configuration_file())?;
        info!(
            "Loaded {} profile(s) from {:?}",
            configuration.profiles.len(),
            paths.configuration_file()
        );

        Ok(Self {
            paths,
            configuration,
            http_client: build_http_client()?,
        })
    }

    pub fn fetcher(&self) -> HttpFetcher {
        HttpFetcher::new(self.http_client.clone())
    }
}

/// `./public` when present, else `<data dir>/analyzer/public`.
pub fn default_base_dir() -> PathBuf {
    let local = PathBuf::from(PUBLIC_DIR_NAME);
    if local.is_dir() {
        return local;
    }

    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(PUBLIC_DIR_NAME)
}

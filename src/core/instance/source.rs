use std::path::{Path, PathBuf};

use reqwest::Url;
use tracing::info;

use super::model::InstanceDescriptor;
use crate::core::downloader::Fetcher;
use crate::core::error::{AnalyzerError, AnalyzerResult};

/// Where a profile's instance descriptor lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorLocation {
    File(PathBuf),
    Url(Url),
}

impl DescriptorLocation {
    /// Classify a resolved location string.
    ///
    /// Relative file paths are looked up in `profile_dir` first, then
    /// relative to the working directory. Only `http`/`https` URLs are
    /// accepted.
    pub fn classify(location: &str, profile_dir: &Path) -> AnalyzerResult<Self> {
        let raw = Path::new(location);
        let candidates = [profile_dir.join(raw), raw.to_path_buf()];
        if let Some(path) = candidates.into_iter().find(|p| p.is_file()) {
            return Ok(Self::File(path));
        }

        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Self::Url(url)),
            _ => Err(AnalyzerError::InvalidLocation(location.to_string())),
        }
    }
}

impl std::fmt::Display for DescriptorLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DescriptorLocation::File(path) => write!(f, "{}", path.display()),
            DescriptorLocation::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Read and parse the descriptor behind `location`.
pub async fn load_descriptor<F>(
    location: &DescriptorLocation,
    fetcher: &F,
) -> AnalyzerResult<InstanceDescriptor>
where
    F: Fetcher + ?Sized,
{
    info!("Loading instance descriptor from {}", location);

    let bytes = match location {
        DescriptorLocation::File(path) => {
            tokio::fs::read(path).await.map_err(|e| AnalyzerError::Io {
                path: path.clone(),
                source: e,
            })?
        }
        DescriptorLocation::Url(url) => fetcher.fetch(url.as_str()).await?,
    };

    InstanceDescriptor::from_slice(&bytes)
}

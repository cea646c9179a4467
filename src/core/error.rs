use std::path::PathBuf;
use thiserror::Error;

use crate::core::instance::{AddonRequirement, LoaderRequirement};
use crate::core::progress::ProgressState;

/// Central error type for the installer.
/// Every module returns `Result<T, AnalyzerError>`.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Descriptor ──────────────────────────────────────
    #[error("Malformed instance descriptor: {0}")]
    MalformedDescriptor(String),

    #[error("Instance location is neither a file nor a URL: {0}")]
    InvalidLocation(String),

    // ── Decision protocol ───────────────────────────────
    #[error("Illegal decision {value:?} returned for {state}")]
    ProtocolViolation {
        state: ProgressState,
        value: Option<String>,
    },

    // ── Install (fatal) ─────────────────────────────────
    #[error("Cannot download loader '{}': {message}", .loader.name)]
    LoaderDownloadFailed {
        message: String,
        loader: LoaderRequirement,
    },

    #[error("Cannot download addon '{}': {message}", .addon.display_name)]
    AddonDownloadFailed {
        message: String,
        addon: AddonRequirement,
    },

    // ── Configuration ───────────────────────────────────
    #[error("Configuration file not found: {0:?}")]
    ConfigNotFound(PathBuf),

    #[error("No profiles defined in configuration")]
    NoProfiles,

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Cannot substitute '{key}' in location template {template:?}")]
    Template { template: String, key: String },

    // ── Console ─────────────────────────────────────────
    #[error("Prompt failed: {0}")]
    Prompt(String),
}

/// Convenience alias used throughout the crate.
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

impl From<std::io::Error> for AnalyzerError {
    fn from(source: std::io::Error) -> Self {
        AnalyzerError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

impl AnalyzerError {
    /// Labelled payload lines for the fatal install errors, in the order the
    /// console report prints them. Other variants yield a single message line.
    pub fn report_lines(&self) -> Vec<String> {
        match self {
            AnalyzerError::LoaderDownloadFailed { message, loader } => vec![
                format!("Message: {message}"),
                format!("Date Modified: {}", loader.date_modified),
                format!("Download URL: {}", loader.download_url),
                format!("File Name: {}", loader.file_name),
                format!("Forge Version: {}", loader.forge_version),
                format!("Minecraft Version: {}", loader.minecraft_version),
                format!("Name: {}", loader.name),
            ],
            AnalyzerError::AddonDownloadFailed { message, addon } => vec![
                format!("Message: {message}"),
                format!("Display Name: {}", addon.display_name),
                format!("Download URL: {}", addon.download_url),
                format!("File Date: {}", addon.file_date),
                format!("File Name: {}", addon.file_name),
            ],
            other => vec![format!("Message: {other}")],
        }
    }

    /// True for the two download failures that abort an install run.
    pub fn is_download_failure(&self) -> bool {
        matches!(
            self,
            AnalyzerError::LoaderDownloadFailed { .. } | AnalyzerError::AddonDownloadFailed { .. }
        )
    }
}

/// Single-attempt failure of the artifact installer. Carries only the
/// proximate message; the engine attaches the requirement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchError {
    pub message: String,
}

impl FetchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn into_loader_failure(self, loader: &LoaderRequirement) -> AnalyzerError {
        AnalyzerError::LoaderDownloadFailed {
            message: self.message,
            loader: loader.clone(),
        }
    }

    pub fn into_addon_failure(self, addon: &AddonRequirement) -> AnalyzerError {
        AnalyzerError::AddonDownloadFailed {
            message: self.message,
            addon: addon.clone(),
        }
    }
}

impl From<AnalyzerError> for FetchError {
    fn from(error: AnalyzerError) -> Self {
        FetchError::new(error.to_string())
    }
}

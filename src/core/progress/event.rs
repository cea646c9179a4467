use std::fmt;
use std::path::PathBuf;

use crate::core::instance::{AddonRequirement, LoaderRequirement};

/// Checkpoint tags, in the order one install run can emit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressState {
    LoaderInstallDraft,
    LoaderInstallOption,
    LoaderInstallSkip,
    InstanceInstallPath,
    AddonInstallDraft,
    AddonInstallOption,
    AddonInstallSkip,
}

impl ProgressState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressState::LoaderInstallDraft => "LOADER_INSTALL_DRAFT",
            ProgressState::LoaderInstallOption => "LOADER_INSTALL_OPTION",
            ProgressState::LoaderInstallSkip => "LOADER_INSTALL_SKIP",
            ProgressState::InstanceInstallPath => "INSTANCE_INSTALL_PATH",
            ProgressState::AddonInstallDraft => "ADDON_INSTALL_DRAFT",
            ProgressState::AddonInstallOption => "ADDON_INSTALL_OPTION",
            ProgressState::AddonInstallSkip => "ADDON_INSTALL_SKIP",
        }
    }
}

impl fmt::Display for ProgressState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One checkpoint delivered to the decision source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    LoaderDraft(LoaderRequirement),
    LoaderOption(LoaderRequirement),
    LoaderSkip(LoaderRequirement),
    /// `install_path` is the descriptor value; `suggested` is what a front-end
    /// should offer as default (the descriptor value, else the caller default).
    InstancePath {
        install_path: Option<String>,
        suggested: PathBuf,
        name: String,
    },
    AddonDraft(AddonRequirement),
    AddonOption(AddonRequirement),
    AddonSkip(AddonRequirement),
}

impl ProgressEvent {
    pub fn state(&self) -> ProgressState {
        match self {
            ProgressEvent::LoaderDraft(_) => ProgressState::LoaderInstallDraft,
            ProgressEvent::LoaderOption(_) => ProgressState::LoaderInstallOption,
            ProgressEvent::LoaderSkip(_) => ProgressState::LoaderInstallSkip,
            ProgressEvent::InstancePath { .. } => ProgressState::InstanceInstallPath,
            ProgressEvent::AddonDraft(_) => ProgressState::AddonInstallDraft,
            ProgressEvent::AddonOption(_) => ProgressState::AddonInstallOption,
            ProgressEvent::AddonSkip(_) => ProgressState::AddonInstallSkip,
        }
    }

    /// Positional wire view of the event. Length and order are fixed per state;
    /// only a missing `installPath` renders as `None`.
    pub fn message(&self) -> Vec<Option<String>> {
        match self {
            ProgressEvent::LoaderDraft(loader)
            | ProgressEvent::LoaderOption(loader)
            | ProgressEvent::LoaderSkip(loader) => vec![
                Some(loader.date_modified.clone()),
                Some(loader.download_url.clone()),
                Some(loader.file_name.clone()),
                Some(loader.forge_version.clone()),
                Some(loader.minecraft_version.clone()),
                Some(loader.name.clone()),
            ],
            ProgressEvent::InstancePath {
                install_path, name, ..
            } => vec![install_path.clone(), Some(name.clone())],
            ProgressEvent::AddonDraft(addon)
            | ProgressEvent::AddonOption(addon)
            | ProgressEvent::AddonSkip(addon) => vec![
                Some(addon.display_name.clone()),
                Some(addon.download_url.clone()),
                Some(addon.file_date.clone()),
                Some(addon.file_name.clone()),
            ],
        }
    }
}

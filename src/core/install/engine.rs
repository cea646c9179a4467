// ─── Install Engine ───
// Walks loader then addons, asking the decision source at every checkpoint.
//
//   LOADER_INSTALL_DRAFT → LOADER_INSTALL_OPTION → [LOADER_INSTALL_SKIP]
//     → INSTANCE_INSTALL_PATH → (loader download)
//     → per addon: ADDON_INSTALL_DRAFT → ADDON_INSTALL_OPTION → [ADDON_INSTALL_SKIP | download]
//
// The engine never logs; every failure comes back as an `AnalyzerError`.

use std::path::{Path, PathBuf};

use crate::core::downloader::Fetcher;
use crate::core::error::{AnalyzerError, AnalyzerResult};
use crate::core::instance::InstanceDescriptor;
use crate::core::loaders::{ArtifactInstaller, InstalledArtifact};
use crate::core::progress::{Decision, DecisionSource, ProgressEvent};

/// Sticky "install everything" answers. Loader and addon flags are
/// independent and live for a single `install()` call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InstallOverride {
    pub loader_install_all: bool,
    pub addon_install_all: bool,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub install_dir: PathBuf,
    pub loader: Option<InstalledArtifact>,
    pub addons: Vec<InstalledArtifact>,
    /// Names of skipped items, loader first, in checkpoint order.
    pub skipped: Vec<String>,
    pub overrides: InstallOverride,
}

pub struct InstallEngine<F> {
    descriptor: InstanceDescriptor,
    default_install_dir: PathBuf,
    installer: ArtifactInstaller<F>,
}

impl<F: Fetcher> InstallEngine<F> {
    /// `default_install_dir` is offered when the descriptor has no `installPath`.
    pub fn new(
        descriptor: InstanceDescriptor,
        default_install_dir: impl Into<PathBuf>,
        installer: ArtifactInstaller<F>,
    ) -> Self {
        Self {
            descriptor,
            default_install_dir: default_install_dir.into(),
            installer,
        }
    }

    /// Run every checkpoint against `source` and install what it accepts.
    ///
    /// Stops at the first download failure. Files already written by this
    /// run stay on disk.
    pub async fn install<D>(&self, source: &mut D) -> AnalyzerResult<InstallReport>
    where
        D: DecisionSource + ?Sized,
    {
        let mut overrides = InstallOverride::default();
        let mut skipped = Vec::new();
        let loader = &self.descriptor.loader;

        source.notify(&ProgressEvent::LoaderDraft(loader.clone()))?;
        let install_loader = confirm(
            source,
            &mut overrides.loader_install_all,
            ProgressEvent::LoaderOption(loader.clone()),
        )?;
        if !install_loader {
            source.notify(&ProgressEvent::LoaderSkip(loader.clone()))?;
            skipped.push(loader.name.clone());
        }

        let install_dir = self.resolve_install_dir(source)?;

        let loader_artifact = if install_loader {
            let installed = self
                .installer
                .install(loader, &install_dir)
                .await
                .map_err(|e| e.into_loader_failure(loader))?;
            Some(installed)
        } else {
            None
        };

        let mut addons = Vec::new();
        for addon in &self.descriptor.addons {
            source.notify(&ProgressEvent::AddonDraft(addon.clone()))?;

            let accepted = confirm(
                source,
                &mut overrides.addon_install_all,
                ProgressEvent::AddonOption(addon.clone()),
            )?;
            if !accepted {
                source.notify(&ProgressEvent::AddonSkip(addon.clone()))?;
                skipped.push(addon.display_name.clone());
                continue;
            }

            let installed = self
                .installer
                .install(addon, &install_dir)
                .await
                .map_err(|e| e.into_addon_failure(addon))?;
            addons.push(installed);
        }

        Ok(InstallReport {
            install_dir,
            loader: loader_artifact,
            addons,
            skipped,
            overrides,
        })
    }

    fn resolve_install_dir<D>(&self, source: &mut D) -> AnalyzerResult<PathBuf>
    where
        D: DecisionSource + ?Sized,
    {
        let install_path = self.descriptor.install_path.clone();
        let suggested = install_path
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.default_install_dir.clone());
        let event = ProgressEvent::InstancePath {
            install_path,
            suggested,
            name: self.descriptor.name.clone(),
        };

        match source.notify(&event)? {
            Some(reply) if !reply.trim().is_empty() && Path::new(reply.trim()).is_absolute() => {
                Ok(PathBuf::from(reply.trim()))
            }
            value => Err(AnalyzerError::ProtocolViolation {
                state: event.state(),
                value,
            }),
        }
    }
}

/// Ask an `*_OPTION` question unless the sticky flag already answers it.
fn confirm<D>(source: &mut D, install_all: &mut bool, event: ProgressEvent) -> AnalyzerResult<bool>
where
    D: DecisionSource + ?Sized,
{
    if *install_all {
        return Ok(true);
    }

    let reply = source.notify(&event)?;
    let parsed = reply.as_deref().and_then(|r| r.parse::<Decision>().ok());
    let Some(decision) = parsed else {
        return Err(AnalyzerError::ProtocolViolation {
            state: event.state(),
            value: reply,
        });
    };

    if decision == Decision::All {
        *install_all = true;
    }
    Ok(decision.installs())
}

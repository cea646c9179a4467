// ─── Console Front-end ───
// Profile menu, terminal decision source and the critical failure report.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use inquire::validator::Validation;
use inquire::{Select, Text};
use tracing::{error, info, warn};

use crate::cli::Cli;
use crate::core::error::{AnalyzerError, AnalyzerResult};
use crate::core::install::{InstallEngine, InstallReport};
use crate::core::instance::{
    load_descriptor, AddonRequirement, DescriptorLocation, LoaderRequirement,
};
use crate::core::loaders::ArtifactInstaller;
use crate::core::progress::{DecisionSource, ProgressEvent};
use crate::core::state::{substitute, AppState, Profile, PROFILE_PUBLIC_PATH};

const OPTION_HELP: &str = "Y: Process installation; N: Skip installation; A: Install everything";

/// Prompts on the terminal for every steering checkpoint.
#[derive(Debug, Default)]
pub struct ConsoleDecisionSource;

impl DecisionSource for ConsoleDecisionSource {
    fn notify(&mut self, event: &ProgressEvent) -> AnalyzerResult<Option<String>> {
        match event {
            ProgressEvent::LoaderDraft(loader) => {
                log_loader("Drafting loader installation . . .", loader);
                Ok(None)
            }
            ProgressEvent::LoaderOption(loader) => {
                let answer = prompt_option(&format!("Verifying loader '{}'", loader.name))?;
                info!("--- LOADER ---");
                Ok(Some(answer))
            }
            ProgressEvent::LoaderSkip(loader) => {
                warn!("Skipping loader installation . . . ({})", loader.name);
                Ok(None)
            }
            ProgressEvent::InstancePath {
                suggested, name, ..
            } => {
                let path = prompt_install_path(suggested)?;
                info!("--- INSTANCE ---");
                info!("Install path: {}", path.display());
                info!("Name: {}", name);
                Ok(Some(path.to_string_lossy().into_owned()))
            }
            ProgressEvent::AddonDraft(addon) => {
                log_addon("Drafting addon installation . . .", addon);
                Ok(None)
            }
            ProgressEvent::AddonOption(addon) => {
                let answer = prompt_option(&format!("Verifying addon '{}'", addon.display_name))?;
                info!("--- ADDON ---");
                Ok(Some(answer))
            }
            ProgressEvent::AddonSkip(addon) => {
                warn!("Skipping addon installation . . . ({})", addon.display_name);
                Ok(None)
            }
        }
    }
}

/// Non-interactive source for `--yes`: installs everything into the
/// suggested directory.
#[derive(Debug, Default)]
pub struct AutoDecisionSource;

impl DecisionSource for AutoDecisionSource {
    fn notify(&mut self, event: &ProgressEvent) -> AnalyzerResult<Option<String>> {
        match event {
            ProgressEvent::LoaderDraft(loader) => {
                log_loader("Drafting loader installation . . .", loader)
            }
            ProgressEvent::AddonDraft(addon) => {
                log_addon("Drafting addon installation . . .", addon)
            }
            _ => {}
        }

        Ok(match event {
            ProgressEvent::LoaderOption(_) | ProgressEvent::AddonOption(_) => Some("A".into()),
            ProgressEvent::InstancePath { suggested, .. } => {
                let path = absolute_path(suggested);
                info!("Install path: {}", path.display());
                Some(path.to_string_lossy().into_owned())
            }
            _ => None,
        })
    }
}

fn log_loader(header: &str, loader: &LoaderRequirement) {
    info!("{}", header);
    info!("Date Modified: {}", loader.date_modified);
    info!("Download URL: {}", loader.download_url);
    info!("File Name: {}", loader.file_name);
    info!("Forge Version: {}", loader.forge_version);
    info!("Minecraft Version: {}", loader.minecraft_version);
    info!("Name: {}", loader.name);
}

fn log_addon(header: &str, addon: &AddonRequirement) {
    info!("{}", header);
    info!("Display name: {}", addon.display_name);
    info!("Download URL: {}", addon.download_url);
    info!("File date: {}", addon.file_date);
    info!("File name: {}", addon.file_name);
}

fn prompt_option(subject: &str) -> AnalyzerResult<String> {
    let answer = Text::new(&format!("{subject} ({OPTION_HELP}):"))
        .with_validator(|input: &str| {
            if matches!(input.trim().to_ascii_uppercase().as_str(), "A" | "N" | "Y") {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid("Invalid install option".into()))
            }
        })
        .prompt()
        .map_err(|e| AnalyzerError::Prompt(e.to_string()))?;

    Ok(answer.trim().to_ascii_uppercase())
}

fn prompt_install_path(suggested: &Path) -> AnalyzerResult<PathBuf> {
    let default = absolute_path(suggested);
    let default_str = default.to_string_lossy().into_owned();

    let answer = Text::new(&format!("Select install path (Default '{default_str}'):"))
        .with_default(&default_str)
        .with_validator(|input: &str| {
            if input.trim().is_empty() {
                Ok(Validation::Invalid("Invalid instance install path".into()))
            } else {
                Ok(Validation::Valid)
            }
        })
        .prompt()
        .map_err(|e| AnalyzerError::Prompt(e.to_string()))?;

    Ok(absolute_path(Path::new(answer.trim())))
}

fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Profile menu; the cursor starts on the first entry.
pub fn select_profile(profiles: &[Profile]) -> AnalyzerResult<&Profile> {
    if profiles.is_empty() {
        return Err(AnalyzerError::NoProfiles);
    }

    let items: Vec<String> = profiles
        .iter()
        .enumerate()
        .map(|(i, p)| format!("[{i}] - {}", p.name))
        .collect();

    let selected = Select::new("Select profile", items)
        .with_starting_cursor(0)
        .with_page_size(10)
        .raw_prompt()
        .map_err(|e| AnalyzerError::Prompt(e.to_string()))?;

    profiles
        .get(selected.index)
        .ok_or(AnalyzerError::ProfileNotFound(selected.value))
}

/// Resolve the descriptor location from `--location`, `--profile` or the menu.
pub fn resolve_location(state: &AppState, cli: &Cli) -> AnalyzerResult<DescriptorLocation> {
    let profile_dir = state.paths.profile_dir();

    let location = match (&cli.location, &cli.profile) {
        (Some(raw), _) => {
            let vars = HashMap::from([(
                PROFILE_PUBLIC_PATH,
                profile_dir.to_string_lossy().into_owned(),
            )]);
            substitute(raw, &vars)?
        }
        (None, Some(selector)) => state
            .configuration
            .find_profile(selector)?
            .resolve_location(&profile_dir)?,
        (None, None) => {
            select_profile(&state.configuration.profiles)?.resolve_location(&profile_dir)?
        }
    };

    DescriptorLocation::classify(&location, &profile_dir)
}

/// Load the descriptor and drive one install run.
pub async fn install(state: &AppState, cli: &Cli) -> AnalyzerResult<InstallReport> {
    let location = resolve_location(state, cli)?;
    let fetcher = state.fetcher();
    let descriptor = load_descriptor(&location, &fetcher).await?;

    info!(
        "Installing '{}' ({} addon(s))",
        descriptor.name,
        descriptor.addons.len()
    );

    let engine = InstallEngine::new(
        descriptor,
        state.paths.file_dir(),
        ArtifactInstaller::new(fetcher),
    );

    let report = if cli.yes {
        engine.install(&mut AutoDecisionSource).await?
    } else {
        engine.install(&mut ConsoleDecisionSource).await?
    };

    info!(
        "Installed {} file(s) into {}",
        report.loader.iter().count() + report.addons.len(),
        report.install_dir.display()
    );
    Ok(report)
}

/// Log a fatal error with its full payload.
pub fn report_failure(err: &AnalyzerError) {
    if err.is_download_failure() {
        error!("Cannot download file");
    } else {
        error!("Installation aborted");
    }
    for line in err.report_lines() {
        error!("{}", line);
    }
}

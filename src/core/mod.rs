// ─── Analyzer Core ───
// Installs a Minecraft instance: one mod loader plus ordered addons.
//
// Architecture:
//   core/
//     instance/   — Descriptor model + file/URL source
//     progress/   — Checkpoint events and the decision source contract
//     downloader/ — Fetch primitive (reqwest)
//     loaders/    — Artifact installer (fetch + place one file)
//     install/    — Orchestration engine
//     state/      — Public paths, analyzer.json profiles, templates

pub mod downloader;
pub mod error;
pub mod http;
pub mod install;
pub mod instance;
pub mod loaders;
pub mod progress;
pub mod state;

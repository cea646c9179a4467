pub mod installer;

pub use installer::{Artifact, ArtifactInstaller, InstalledArtifact};

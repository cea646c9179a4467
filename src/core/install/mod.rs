pub mod engine;

pub use engine::{InstallEngine, InstallOverride, InstallReport};

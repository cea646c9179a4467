pub mod app_state;
pub mod profile;

pub use app_state::{default_base_dir, AnalyzerConfiguration, AppState, PublicPaths};
pub use profile::{substitute, Profile, PROFILE_PUBLIC_PATH};

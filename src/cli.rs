use std::path::PathBuf;

use clap::Parser;

/// Install a Minecraft instance (loader + addons) described by a profile.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "analyzer",
    version,
    about = "Install a Minecraft instance (loader + addons) from a JSON descriptor"
)]
pub struct Cli {
    /// Public data directory holding configuration/, file/, log/ and profile/
    #[arg(long, short = 'b', env = "ANALYZER_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Profile to install, by index or name (skips the profile menu)
    #[arg(long, short = 'p')]
    pub profile: Option<String>,

    /// Descriptor file or URL to install directly, bypassing profiles
    #[arg(long, short = 'l', conflicts_with = "profile")]
    pub location: Option<String>,

    /// Answer "install everything" and accept the suggested install path
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

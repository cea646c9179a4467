use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::core::downloader::Fetcher;
use crate::core::error::FetchError;
use crate::core::instance::{AddonRequirement, LoaderRequirement};

/// Anything the installer can place into an instance directory.
pub trait Artifact {
    fn download_url(&self) -> &str;
    fn file_name(&self) -> &str;
    /// Human readable name for logs.
    fn label(&self) -> &str;
}

impl Artifact for LoaderRequirement {
    fn download_url(&self) -> &str {
        &self.download_url
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Artifact for AddonRequirement {
    fn download_url(&self) -> &str {
        &self.download_url
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn label(&self) -> &str {
        &self.display_name
    }
}

/// A file written by a successful install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledArtifact {
    pub path: PathBuf,
    pub bytes: u64,
}

/// Fetches one artifact and writes it to `<target>/<fileName>`.
///
/// Single attempt per call. Existing files are replaced; on failure the
/// destination is left untouched.
pub struct ArtifactInstaller<F> {
    fetcher: F,
}

impl<F: Fetcher> ArtifactInstaller<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub async fn install<A>(
        &self,
        artifact: &A,
        target_dir: &Path,
    ) -> Result<InstalledArtifact, FetchError>
    where
        A: Artifact + Sync + ?Sized,
    {
        let dest = resolve_destination(target_dir, artifact.file_name())?;

        let bytes = self.fetcher.fetch(artifact.download_url()).await?;

        tokio::fs::create_dir_all(target_dir)
            .await
            .map_err(|e| FetchError::new(format!("cannot create {:?}: {e}", target_dir)))?;

        // Staged under a unique name in the same directory; only `persist`
        // touches `dest`, and a dropped staging file removes itself.
        let staged = write_staged(target_dir, &bytes)
            .await
            .map_err(|e| FetchError::new(format!("cannot write {:?}: {e}", dest)))?;
        staged
            .persist(&dest)
            .map_err(|e| FetchError::new(format!("cannot write {:?}: {}", dest, e.error)))?;

        debug!("Installed {} -> {:?}", artifact.label(), dest);
        Ok(InstalledArtifact {
            path: dest,
            bytes: bytes.len() as u64,
        })
    }
}

/// `fileName` must be a single plain path component.
fn resolve_destination(target_dir: &Path, file_name: &str) -> Result<PathBuf, FetchError> {
    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(target_dir.join(file_name)),
        _ => Err(FetchError::new(format!("invalid file name {file_name:?}"))),
    }
}

async fn write_staged(dir: &Path, bytes: &[u8]) -> std::io::Result<NamedTempFile> {
    let staged = NamedTempFile::new_in(dir)?;
    // Scoped so the second handle is closed before the persist.
    let mut file = tokio::fs::File::from_std(staged.reopen()?);
    file.write_all(bytes).await?;
    file.flush().await?;
    Ok(staged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::downloader::client::testing::MemoryFetcher;

    fn addon(file_name: &str) -> AddonRequirement {
        AddonRequirement {
            display_name: "JEI".into(),
            download_url: "https://x/jei.jar".into(),
            file_date: "2024-01-02".into(),
            file_name: file_name.into(),
        }
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn writes_artifact_creating_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("instance").join("mods");
        let installer =
            ArtifactInstaller::new(MemoryFetcher::default().with("https://x/jei.jar", b"jar"));

        let installed = installer.install(&addon("jei.jar"), &target).await.unwrap();

        assert_eq!(installed.path, target.join("jei.jar"));
        assert_eq!(installed.bytes, 3);
        assert_eq!(std::fs::read(target.join("jei.jar")).unwrap(), b"jar");
        assert_eq!(entries(&target), ["jei.jar"]);
    }

    #[tokio::test]
    async fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("jei.jar"), b"old contents").unwrap();
        let installer =
            ArtifactInstaller::new(MemoryFetcher::default().with("https://x/jei.jar", b"new"));

        installer.install(&addon("jei.jar"), dir.path()).await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("jei.jar")).unwrap(), b"new");
    }

    #[tokio::test]
    async fn fetch_failure_leaves_destination_untouched() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("jei.jar"), b"old").unwrap();
        let installer = ArtifactInstaller::new(MemoryFetcher::default());

        let err = installer
            .install(&addon("jei.jar"), dir.path())
            .await
            .unwrap_err();

        assert!(err.message.contains("404"), "{}", err.message);
        assert_eq!(std::fs::read(dir.path().join("jei.jar")).unwrap(), b"old");
        assert_eq!(installer.fetcher().requested().len(), 1);
    }

    #[tokio::test]
    async fn neighbouring_files_survive_an_install() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("jei.jar.part"), b"user data").unwrap();
        std::fs::write(dir.path().join("jei.jar.tmp"), b"more user data").unwrap();
        let installer =
            ArtifactInstaller::new(MemoryFetcher::default().with("https://x/jei.jar", b"jar"));

        installer.install(&addon("jei.jar"), dir.path()).await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("jei.jar")).unwrap(), b"jar");
        assert_eq!(
            std::fs::read(dir.path().join("jei.jar.part")).unwrap(),
            b"user data"
        );
        assert_eq!(
            std::fs::read(dir.path().join("jei.jar.tmp")).unwrap(),
            b"more user data"
        );
        assert_eq!(
            entries(dir.path()),
            ["jei.jar", "jei.jar.part", "jei.jar.tmp"]
        );
    }

    #[tokio::test]
    async fn write_failure_leaves_destination_and_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("jei.jar")).unwrap();
        std::fs::write(dir.path().join("jei.jar").join("keep.txt"), b"keep").unwrap();
        let installer =
            ArtifactInstaller::new(MemoryFetcher::default().with("https://x/jei.jar", b"jar"));

        let err = installer
            .install(&addon("jei.jar"), dir.path())
            .await
            .unwrap_err();

        assert!(err.message.contains("cannot write"), "{}", err.message);
        assert!(dir.path().join("jei.jar").is_dir());
        assert_eq!(
            std::fs::read(dir.path().join("jei.jar").join("keep.txt")).unwrap(),
            b"keep"
        );
        assert_eq!(entries(dir.path()), ["jei.jar"]);
    }

    #[tokio::test]
    async fn rejects_file_names_escaping_the_target() {
        let dir = tempfile::tempdir().unwrap();
        let installer =
            ArtifactInstaller::new(MemoryFetcher::default().with("https://x/jei.jar", b"jar"));

        for name in ["../jei.jar", "mods/jei.jar", "", ".."] {
            assert!(installer.install(&addon(name), dir.path()).await.is_err(), "{name}");
        }
        assert!(installer.fetcher().requested().is_empty());
    }
}

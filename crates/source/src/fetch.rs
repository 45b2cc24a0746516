use crate::checksum::{md5_file, verify};
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use reqwest::{Client, Response};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::instrument;

/// How a verified tarball came to be on disk.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Fetched {
    /// A matching tarball was already present.
    Reused(PathBuf),
    Downloaded(PathBuf),
}
impl Fetched {
    pub fn path(&self) -> &Path {
        match self {
            Self::Reused(path) | Self::Downloaded(path) => path,
        }
    }
}

/// Downloads release tarballs from `<mirror>/<version>/<file name>`.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: Client,
    mirror: String,
    version: String,
}
impl Fetcher {
    pub fn new(mirror: impl Into<String>, version: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("llvm-docsets/", env!("CARGO_PKG_VERSION")))
            .build()
            .or_raise(|| ErrorKind::Io)?;
        Ok(Self { client, mirror: mirror.into(), version: version.into() })
    }

    pub fn url(&self, name: &str) -> String {
        format!("{}/{}/{name}", self.mirror.trim_end_matches('/'), self.version)
    }

    /// Make sure `dir/name` exists and matches `md5`.
    ///
    /// An existing file with the right checksum is reused. Otherwise it is
    /// deleted and downloaded again; a download that doesn't match the
    /// checksum is an [`ErrorKind::IntegrityFailure`]. Nothing is retried.
    #[instrument(skip(self, dir), fields(dir = %dir.as_ref().display()))]
    pub async fn ensure(&self, dir: impl AsRef<Path>, name: &str, md5: &str) -> Result<Fetched> {
        let path = dir.as_ref().join(name);
        if path.is_file() {
            let actual = md5_file(&path)?;
            if actual.eq_ignore_ascii_case(md5) {
                tracing::info!(path = %path.display(), "Using existing tarball");
                return Ok(Fetched::Reused(path));
            }
            tracing::warn!(path = %path.display(), expected = md5, %actual, "Removing unusable tarball");
            fs::remove_file(&path).await.or_raise(|| ErrorKind::Io)?;
        }

        self.download(&self.url(name), &path).await?;
        verify(&path, md5)?;
        Ok(Fetched::Downloaded(path))
    }

    #[instrument(skip(self, path))]
    async fn download(&self, url: &str, path: &Path) -> Result<()> {
        tracing::info!(path = %path.display(), "Downloading tarball");
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .or_raise(|| ErrorKind::Download(url.to_string()))?;

        let partial = path.with_extension("part");
        let size = match Self::write_body(url, &mut response, &partial).await {
            Ok(size) => size,
            Err(e) => {
                // Never leave a truncated download behind.
                _ = fs::remove_file(&partial).await;
                return Err(e);
            },
        };
        fs::rename(&partial, path).await.or_raise(|| ErrorKind::Io)?;
        tracing::debug!(size, "Downloaded tarball");
        Ok(())
    }

    async fn write_body(url: &str, response: &mut Response, partial: &Path) -> Result<u64> {
        let mut file = fs::File::create(partial).await.or_raise(|| ErrorKind::Io)?;
        let mut size = 0u64;
        while let Some(chunk) = response.chunk().await.or_raise(|| ErrorKind::Download(url.to_string()))? {
            size += chunk.len() as u64;
            file.write_all(&chunk).await.or_raise(|| ErrorKind::Io)?;
        }
        file.flush().await.or_raise(|| ErrorKind::Io)?;
        Ok(size)
    }
}

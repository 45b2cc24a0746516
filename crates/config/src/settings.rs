use crate::error::{ErrorKind, Result};
use directories::ProjectDirs;
use docsets_compress::Compression;
use exn::ResultExt;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

const ENV_PREFIX: &str = "DOCSETS_";
const CONFIG_FILE: &str = "config.toml";

/// Raw settings as read from the configuration sources.
///
/// Later sources override earlier ones: built-in defaults, then the
/// configuration file, then `DOCSETS_*` environment variables.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding tarballs, sources, build output and bundles.
    pub workdir: PathBuf,
    /// Bundle icon, relative to `workdir` unless absolute.
    pub icon: PathBuf,
    /// Base URL of the release mirror; the version and file name are appended.
    pub mirror: String,
    /// Archive format for finished bundles.
    pub compression: String,
    /// Also build the Doxygen API docsets.
    pub api: bool,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            workdir: PathBuf::from("."),
            icon: PathBuf::from("icon.png"),
            mirror: "http://llvm.org/releases".to_string(),
            compression: Compression::Gzip.to_string(),
            api: true,
        }
    }
}

/// Validated settings, ready to drive a build.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub workdir: PathBuf,
    /// Resolved against `workdir`.
    pub icon: PathBuf,
    pub mirror: String,
    pub compression: Compression,
    pub api: bool,
}

impl Settings {
    /// Default location of the user configuration file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "llvm", "llvm-docsets").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Assemble every configuration source without extracting it.
    ///
    /// An explicit `file` must exist and its format is chosen by extension;
    /// the default file is optional and always TOML.
    pub fn figment(file: Option<&Path>) -> Result<Figment> {
        let figment = Figment::new().merge(Serialized::defaults(Self::default()));
        let figment = match file {
            Some(path) => {
                if !path.is_file() {
                    exn::bail!(ErrorKind::MissingFile(path.to_path_buf()));
                }
                match path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref() {
                    Some("toml") => figment.merge(Toml::file_exact(path)),
                    Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path)),
                    Some("json") => figment.merge(Json::file_exact(path)),
                    _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
                }
            },
            None => match Self::default_path() {
                Some(path) => figment.merge(Toml::file(path)),
                None => figment,
            },
        };
        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    #[instrument(level = "debug")]
    pub fn load(file: Option<&Path>) -> Result<Self> {
        Self::figment(file)?.extract().or_raise(|| ErrorKind::Load)
    }

    /// Check and convert the raw settings.
    pub fn validate(self) -> Result<Config> {
        let compression = self.compression.parse::<Compression>().or_raise(|| ErrorKind::Invalid {
            name: "compression",
            reason: format!("unknown format '{}'", self.compression),
        })?;
        let mirror = self.mirror.trim().trim_end_matches('/').to_string();
        if mirror.is_empty() {
            exn::bail!(ErrorKind::Invalid { name: "mirror", reason: "must not be empty".to_string() });
        }
        Ok(Config { icon: self.workdir.join(&self.icon), workdir: self.workdir, mirror, compression, api: self.api })
    }
}

impl Config {
    /// Load and validate settings in one go.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let config = Settings::load(file)?.validate()?;
        tracing::debug!(?config, "Loaded configuration");
        Ok(config)
    }
}

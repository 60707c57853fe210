use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{File, FileFormat};
use quill_models::{email_address::EmailAddress, settings::MailSettings};
use serde::Deserialize;
use url::Url;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable with a colon separated list of additional config
/// files, merged on top of the default config.
pub const CONFIG_PATH_ENV: &str = "QUILL_CONFIG";

/// Load the default config, followed by the files listed in `QUILL_CONFIG`.
pub fn load_from_env() -> anyhow::Result<Config> {
    let extra = std::env::var_os(CONFIG_PATH_ENV).unwrap_or_default();
    let paths = std::iter::once(PathBuf::from(DEFAULT_CONFIG_PATH))
        .chain(std::env::split_paths(&extra).filter(|path| !path.as_os_str().is_empty()))
        .collect::<Vec<_>>();

    load(&paths)
}

/// Merge the given config files in order; later files override earlier
/// ones.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub admin: AdminConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub mail: MailSettings,
    pub email_panel: EmailPanelConfig,
}

#[derive(Debug, Deserialize)]
pub struct AdminConfig {
    /// Base url of the Ghost Admin API.
    pub url: Url,
    pub token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SessionConfig {
    /// Email address of the user the panel acts for.
    pub email: EmailAddress,
}

#[derive(Debug, Deserialize)]
pub struct EmailPanelConfig {
    pub retry_poll_interval: Duration,
    pub retry_poll_timeout: Duration,
}

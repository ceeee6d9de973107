use std::path::{Path, PathBuf};

use eyre::WrapErr;
use log::trace;
use serde::Deserialize;
use texbib::Source;

/// Values read from the user's config file. All optional; CLI flags win.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub output: Option<PathBuf>,
    pub max_authors: Option<usize>,
    pub preferred_source: Option<Source>,
    pub ads_api_key: Option<String>,
    pub semantic_scholar_api_key: Option<String>,
}

/// Loads the config file, `~/.texbib.toml` unless overridden.
///
/// A missing file yields the defaults; a file that exists but cannot be read
/// or parsed is an error.
pub fn load(path: Option<&Path>) -> eyre::Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match default_path() {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    if !path.is_file() {
        trace!("No config file at '{}'", path.display());
        return Ok(Config::default());
    }

    trace!("Reading config from '{}'", path.display());
    let content = std::fs::read_to_string(&path)
        .wrap_err_with(|| format!("Failed to read the config file '{}'", path.display()))?;
    toml::from_str(&content)
        .wrap_err_with(|| format!("Failed to parse the config file '{}'", path.display()))
}

fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".texbib.toml"))
}

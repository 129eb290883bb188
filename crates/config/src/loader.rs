use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{
    env_subst::substitute_env,
    error::{Error, Result},
    schema::MtsendConfig,
    validate::validate,
};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["mtsend.toml", "mtsend.yaml", "mtsend.yml", "mtsend.json"];

/// Load, substitute and validate the config at `path`.
pub fn load_config(path: &Path) -> Result<MtsendConfig> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&substitute_env(&raw), path)?;

    let problems = validate(&config);
    if !problems.is_empty() {
        return Err(Error::Invalid {
            problems: problems.iter().map(ToString::to_string).collect(),
        });
    }
    Ok(config)
}

/// Parse config text, picking the format from the file extension.
pub fn parse_config(raw: &str, path: &Path) -> Result<MtsendConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        other => Err(Error::UnsupportedFormat {
            extension: other.to_string(),
        }),
    }
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./mtsend.{toml,yaml,yml,json}`
/// 2. `<user config dir>/mtsend/mtsend.{toml,yaml,yml,json}`
///
/// Falls back to `MtsendConfig::default()` when nothing usable is found.
pub fn discover_and_load() -> MtsendConfig {
    let Some(path) = find_config_file() else {
        debug!("no config file found, using defaults");
        return MtsendConfig::default();
    };

    debug!(path = %path.display(), "loading config");
    match load_config(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            MtsendConfig::default()
        },
    }
}

/// First existing config file in the standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    let local = CONFIG_FILENAMES.iter().map(PathBuf::from);
    let global = config_dir()
        .into_iter()
        .flat_map(|dir| CONFIG_FILENAMES.iter().map(move |name| dir.join(name)));

    local.chain(global).find(|p| p.exists())
}

/// User-global config directory, e.g. `~/.config/mtsend/`.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "mtsend").map(|d| d.config_dir().to_path_buf())
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Site the page-path conventions (`/<wiki_id>/d/...`) apply to.
pub const DEFAULT_WIKI_HOST: &str = "seesaawiki.jp";

/// Pixels left above an anchor target after a jump, so a fixed header does not cover it.
pub const DEFAULT_ANCHOR_OFFSET_PX: i32 = 40;

/// Auto-filter settings (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Table order used when a `keyword` parameter arrives without `order`.
    pub default_order: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_order: "0".to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/wikiext/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtConfig {
    /// Diagnostic boot flag: stop after init and never run setup.
    #[serde(default)]
    pub stop_before_setup: bool,
    /// Offset from the viewport top that anchor jumps scroll to.
    #[serde(default = "default_anchor_offset")]
    pub anchor_offset_px: i32,
    /// Host whose path layout is used to detect the wiki id and page type.
    #[serde(default = "default_wiki_host")]
    pub wiki_host: String,
    #[serde(default)]
    pub filter: FilterConfig,
}

fn default_anchor_offset() -> i32 {
    DEFAULT_ANCHOR_OFFSET_PX
}

fn default_wiki_host() -> String {
    DEFAULT_WIKI_HOST.to_string()
}

impl Default for ExtConfig {
    fn default() -> Self {
        Self {
            stop_before_setup: false,
            anchor_offset_px: DEFAULT_ANCHOR_OFFSET_PX,
            wiki_host: DEFAULT_WIKI_HOST.to_string(),
            filter: FilterConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("wikiext")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ExtConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<ExtConfig> {
    if !path.exists() {
        let default_cfg = ExtConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ExtConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

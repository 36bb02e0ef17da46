use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use console_auth::AuthConfigSection;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
/// Console server config file; only the `auth` stanza is read here.
pub struct ConsoleServerConfig {
    pub auth: AuthConfigSection,
}

/// Parses config text as JSON when the file name ends in `.json`, TOML otherwise.
pub fn parse_console_server_config(path: &Path, raw: &str) -> Result<ConsoleServerConfig> {
    let is_json = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(raw)
            .with_context(|| format!("failed to parse console config json {}", path.display()))
    } else {
        toml::from_str(raw)
            .with_context(|| format!("failed to parse console config toml {}", path.display()))
    }
}

pub fn load_console_server_config(path: &Path) -> Result<ConsoleServerConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read console config {}", path.display()))?;
    parse_console_server_config(path, &raw)
}

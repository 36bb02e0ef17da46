use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Operator-supplied user-auth inputs before validation.
///
/// Built from flags, then merged with the config file through
/// [`RawAuthOptions::apply_config`]. Empty text counts as unset.
pub struct RawAuthOptions {
    pub auth_type: Option<String>,
    pub issuer_url: Option<String>,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub client_secret_file: Option<PathBuf>,
    pub ca_file: Option<PathBuf>,
    pub inactivity_timeout_seconds: i64,
    pub logout_redirect: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
/// `auth` stanza of the console server config file.
pub struct AuthConfigSection {
    #[serde(rename = "clientID")]
    pub client_id: Option<String>,
    pub client_secret_file: Option<PathBuf>,
    #[serde(rename = "oauthEndpointCAFile")]
    pub oauth_endpoint_ca_file: Option<PathBuf>,
    pub logout_redirect: Option<String>,
    pub inactivity_timeout_seconds: i64,
}

impl RawAuthOptions {
    /// Fills every unset flag from the config file; explicit flags win.
    pub fn apply_config(&mut self, config: &AuthConfigSection) {
        set_text_if_unset(&mut self.client_id, config.client_id.as_deref());
        set_path_if_unset(
            &mut self.client_secret_file,
            config.client_secret_file.as_ref(),
        );
        set_path_if_unset(&mut self.ca_file, config.oauth_endpoint_ca_file.as_ref());
        set_text_if_unset(&mut self.logout_redirect, config.logout_redirect.as_deref());
        if self.inactivity_timeout_seconds == 0 {
            self.inactivity_timeout_seconds = config.inactivity_timeout_seconds;
        }
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|candidate| !candidate.is_empty())
}

pub(crate) fn non_empty_path(value: Option<&PathBuf>) -> Option<&PathBuf> {
    value.filter(|candidate| !candidate.as_os_str().is_empty())
}

fn set_text_if_unset(slot: &mut Option<String>, value: Option<&str>) {
    if non_empty(slot.as_deref()).is_some() {
        return;
    }
    if let Some(value) = non_empty(value) {
        *slot = Some(value.to_string());
    }
}

fn set_path_if_unset(slot: &mut Option<PathBuf>, value: Option<&PathBuf>) {
    if non_empty_path(slot.as_ref()).is_some() {
        return;
    }
    if let Some(value) = non_empty_path(value) {
        *slot = Some(value.clone());
    }
}

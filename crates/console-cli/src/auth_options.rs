use anyhow::Result;

use console_auth::RawAuthOptions;

use crate::{load_console_server_config, Cli, CliUserAuthFlags};

pub fn raw_auth_options_from_flags(flags: &CliUserAuthFlags) -> RawAuthOptions {
    RawAuthOptions {
        auth_type: flags.user_auth.clone(),
        issuer_url: flags.user_auth_oidc_issuer_url.clone(),
        client_id: flags.user_auth_oidc_client_id.clone(),
        client_secret: flags.user_auth_oidc_client_secret.clone(),
        client_secret_file: flags.user_auth_oidc_client_secret_file.clone(),
        ca_file: flags.user_auth_oidc_ca_file.clone(),
        inactivity_timeout_seconds: flags.inactivity_timeout,
        logout_redirect: flags.user_auth_logout_redirect.clone(),
    }
}

/// Builds raw user-auth options from flags, filling unset values from `--config`.
pub fn resolve_raw_auth_options(cli: &Cli) -> Result<RawAuthOptions> {
    let mut options = raw_auth_options_from_flags(&cli.auth_flags);
    if let Some(path) = cli.config.as_deref() {
        let config = load_console_server_config(path)?;
        options.apply_config(&config.auth);
    }
    Ok(options)
}

use anyhow::{anyhow, Context, Result};
use console_auth::{
    build_auth_inspect_report, derive_authenticator_config, render_auth_inspect_report,
    AuthenticatorOutcome, CompletedAuthOptions, ConsoleSessionSettings, PlatformAuthMode,
};
use console_cli::{resolve_raw_auth_options, Cli};
use tracing::{info, warn};

use crate::inspection_authenticator::{InspectionAuthenticator, InspectionAuthenticatorBuilder};
use crate::runtime_context::build_auth_runtime_context;

/// Merges flags and config file, then completes the user-auth policy.
pub fn resolve_completed_auth_options(cli: &Cli) -> Result<CompletedAuthOptions> {
    let raw = resolve_raw_auth_options(cli)?;
    let policy = raw
        .complete(PlatformAuthMode::from(cli.k8s_auth))
        .context("invalid user auth options")?;
    info!(
        user_auth = policy.mode().as_str(),
        k8s_auth = cli.k8s_auth.as_str(),
        inactivity_timeout_seconds = policy.inactivity_timeout_seconds(),
        "resolved console user auth policy"
    );
    Ok(policy)
}

fn render_inspect_output(cli: &Cli, policy: &CompletedAuthOptions) -> Result<String> {
    let context = build_auth_runtime_context(cli)?;
    let authenticator = derive_authenticator_config(policy, &context)
        .context("failed to derive authenticator configuration")?;
    let report = build_auth_inspect_report(
        policy,
        PlatformAuthMode::from(cli.k8s_auth),
        authenticator.as_ref(),
    );
    if cli.auth_inspect_json {
        return serde_json::to_string_pretty(&report)
            .context("failed to render auth inspect json");
    }
    Ok(render_auth_inspect_report(&report))
}

/// One-line summary of the session settings produced at startup.
pub fn render_session_summary(
    settings: &ConsoleSessionSettings<InspectionAuthenticator>,
) -> String {
    let Some(authenticator) = settings.authenticator.as_ref() else {
        return "console auth startup: mode=disabled authenticator=none".to_string();
    };
    let config = authenticator.config();
    format!(
        "console auth startup: auth_source={} issuer_url={} redirect_url={} cookie_path={} secure_cookies={} inactivity_timeout_seconds={} logout_redirect={}",
        config.auth_source.as_str(),
        config.issuer_url,
        config.redirect_url,
        config.cookie_path,
        config.secure_cookies,
        settings.inactivity_timeout_seconds.unwrap_or_default(),
        settings
            .logout_redirect
            .as_ref()
            .map(|url| url.as_str())
            .unwrap_or("none"),
    )
}

pub async fn execute_console_auth_startup(cli: &Cli) -> Result<String> {
    let policy = resolve_completed_auth_options(cli)?;
    if cli.auth_inspect {
        return render_inspect_output(cli, &policy);
    }

    let context = build_auth_runtime_context(cli)?;
    let mut settings = ConsoleSessionSettings::default();
    match policy
        .apply_to(&mut settings, &context, &InspectionAuthenticatorBuilder)
        .await
    {
        AuthenticatorOutcome::Disabled => {
            warn!("running with AUTHENTICATION DISABLED!");
        }
        AuthenticatorOutcome::Constructed(_) => {}
        AuthenticatorOutcome::Failed(error) => {
            return Err(anyhow!(error).context("failed to configure console authentication"));
        }
    }
    Ok(render_session_summary(&settings))
}

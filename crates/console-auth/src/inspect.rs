use serde::Serialize;

use crate::authenticator::AuthenticatorConfig;
use crate::completion::CompletedAuthOptions;
use crate::mode::{AuthMode, PlatformAuthMode};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// Secret-free view of a derived authenticator configuration.
pub struct AuthenticatorConfigReport {
    pub auth_source: String,
    pub issuer_url: String,
    pub issuer_ca: Option<String>,
    pub client_id: String,
    pub client_secret_configured: bool,
    pub redirect_url: String,
    pub scopes: Vec<String>,
    pub k8s_ca: Option<String>,
    pub k8s_host: String,
    pub error_url: String,
    pub success_url: String,
    pub cookie_path: String,
    pub referer_path: String,
    pub secure_cookies: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
/// Operator-facing summary of the resolved user-auth policy.
pub struct AuthInspectReport {
    pub mode: AuthMode,
    pub platform_mode: PlatformAuthMode,
    pub authentication_enabled: bool,
    pub inactivity_timeout_seconds: u64,
    pub logout_redirect: Option<String>,
    pub authenticator: Option<AuthenticatorConfigReport>,
}

impl AuthenticatorConfig {
    pub fn report(&self) -> AuthenticatorConfigReport {
        AuthenticatorConfigReport {
            auth_source: self.auth_source.as_str().to_string(),
            issuer_url: self.issuer_url.clone(),
            issuer_ca: self.issuer_ca.as_ref().map(|path| path.display().to_string()),
            client_id: self.client_id.clone(),
            client_secret_configured: !self.client_secret.is_empty(),
            redirect_url: self.redirect_url.clone(),
            scopes: self.scopes.clone(),
            k8s_ca: self.k8s_ca.as_ref().map(|path| path.display().to_string()),
            k8s_host: self.k8s_config.host.clone(),
            error_url: self.error_url.clone(),
            success_url: self.success_url.clone(),
            cookie_path: self.cookie_path.clone(),
            referer_path: self.referer_path.clone(),
            secure_cookies: self.secure_cookies,
        }
    }
}

pub fn build_auth_inspect_report(
    policy: &CompletedAuthOptions,
    platform_mode: PlatformAuthMode,
    authenticator: Option<&AuthenticatorConfig>,
) -> AuthInspectReport {
    AuthInspectReport {
        mode: policy.mode(),
        platform_mode,
        authentication_enabled: policy.mode() != AuthMode::Disabled,
        inactivity_timeout_seconds: policy.inactivity_timeout_seconds(),
        logout_redirect: policy
            .logout_redirect_url()
            .map(|url| url.as_str().to_string()),
        authenticator: authenticator.map(AuthenticatorConfig::report),
    }
}

fn or_none(value: Option<&str>) -> &str {
    value.unwrap_or("none")
}

pub fn render_auth_inspect_report(report: &AuthInspectReport) -> String {
    let mut lines = vec![format!(
        "console auth inspect: mode={} platform_mode={} authentication_enabled={} inactivity_timeout_seconds={} logout_redirect={}",
        report.mode,
        report.platform_mode,
        report.authentication_enabled,
        report.inactivity_timeout_seconds,
        or_none(report.logout_redirect.as_deref()),
    )];
    if let Some(authenticator) = &report.authenticator {
        lines.push(format!(
            "authenticator: auth_source={} issuer_url={} issuer_ca={} client_id={} client_secret_configured={} scopes={}",
            authenticator.auth_source,
            authenticator.issuer_url,
            or_none(authenticator.issuer_ca.as_deref()),
            authenticator.client_id,
            authenticator.client_secret_configured,
            authenticator.scopes.join(","),
        ));
        lines.push(format!(
            "endpoints: redirect_url={} error_url={} success_url={} referer_path={}",
            authenticator.redirect_url,
            authenticator.error_url,
            authenticator.success_url,
            authenticator.referer_path,
        ));
        lines.push(format!(
            "cookies: cookie_path={} secure_cookies={}",
            authenticator.cookie_path, authenticator.secure_cookies,
        ));
        lines.push(format!(
            "platform: k8s_host={} k8s_ca={}",
            authenticator.k8s_host,
            or_none(authenticator.k8s_ca.as_deref()),
        ));
    }
    lines.join("\n")
}

//! Authenticator configuration derivation and construction.
//!
//! A completed policy plus the server's runtime context yields one
//! [`AuthenticatorConfig`]; an [`AuthenticatorBuilder`] turns that into the
//! authenticator shared by every request handler.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use url::Url;

use crate::completion::CompletedAuthOptions;
use crate::error::AuthPolicyError;
use crate::mode::{AuthMode, AuthSource};
use crate::url_join::{single_joining_slash, url_text};

pub const AUTH_LOGIN_CALLBACK_ENDPOINT: &str = "/auth/callback";
pub const AUTH_LOGIN_SUCCESS_ENDPOINT: &str = "/";
pub const AUTH_LOGIN_ERROR_ENDPOINT: &str = "/auth/error";
/// Session cookies are only sent for requests under `<base path>/api/`.
pub const AUTH_COOKIE_API_PATH: &str = "/api/";

pub const OPENSHIFT_SCOPES: &[&str] = &["user:full"];
pub const OIDC_SCOPES: &[&str] = &["openid", "email", "profile", "groups"];

#[derive(Debug, Clone)]
/// Cluster API access used for OAuth metadata discovery.
pub struct PlatformApiConfig {
    pub host: String,
    pub transport: reqwest::Client,
}

#[derive(Debug, Clone)]
/// Server bring-up values the policy is combined with.
pub struct AuthRuntimeContext {
    pub base_url: Option<Url>,
    /// Token issuer for `openshift` mode.
    pub k8s_endpoint: Url,
    pub public_api_server_endpoint: String,
    pub ca_cert_file: Option<PathBuf>,
    pub transport: reqwest::Client,
}

#[derive(Clone)]
/// Everything the authenticator needs, derived from policy and runtime context.
pub struct AuthenticatorConfig {
    pub auth_source: AuthSource,
    pub issuer_url: String,
    pub issuer_ca: Option<PathBuf>,
    pub client_id: String,
    pub client_secret: Vec<u8>,
    pub redirect_url: String,
    pub scopes: Vec<String>,
    /// Cluster CA for metadata discovery; may differ from `issuer_ca`.
    pub k8s_ca: Option<PathBuf>,
    pub error_url: String,
    pub success_url: String,
    pub cookie_path: String,
    pub referer_path: String,
    pub secure_cookies: bool,
    pub k8s_config: PlatformApiConfig,
}

impl fmt::Debug for AuthenticatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatorConfig")
            .field("auth_source", &self.auth_source)
            .field("issuer_url", &self.issuer_url)
            .field("issuer_ca", &self.issuer_ca)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("redirect_url", &self.redirect_url)
            .field("scopes", &self.scopes)
            .field("k8s_ca", &self.k8s_ca)
            .field("error_url", &self.error_url)
            .field("success_url", &self.success_url)
            .field("cookie_path", &self.cookie_path)
            .field("referer_path", &self.referer_path)
            .field("secure_cookies", &self.secure_cookies)
            .field("k8s_host", &self.k8s_config.host)
            .finish()
    }
}

/// Constructs the authenticator from a derived configuration.
#[async_trait]
pub trait AuthenticatorBuilder: Send + Sync {
    type Authenticator: Send + Sync + 'static;

    async fn build(&self, config: AuthenticatorConfig) -> anyhow::Result<Self::Authenticator>;
}

#[derive(Debug)]
/// Result of authenticator bring-up; the caller decides how to log and whether to exit.
pub enum AuthenticatorOutcome<A> {
    Disabled,
    Constructed(Arc<A>),
    Failed(AuthPolicyError),
}

impl<A> AuthenticatorOutcome<A> {
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    /// `Ok(None)` when authentication is disabled.
    pub fn into_result(self) -> Result<Option<Arc<A>>, AuthPolicyError> {
        match self {
            Self::Disabled => Ok(None),
            Self::Constructed(authenticator) => Ok(Some(authenticator)),
            Self::Failed(error) => Err(error),
        }
    }
}

/// Session-handling state of the running console server.
pub struct ConsoleSessionSettings<A> {
    pub authenticator: Option<Arc<A>>,
    pub inactivity_timeout_seconds: Option<u64>,
    pub logout_redirect: Option<Url>,
}

impl<A> Default for ConsoleSessionSettings<A> {
    fn default() -> Self {
        Self {
            authenticator: None,
            inactivity_timeout_seconds: None,
            logout_redirect: None,
        }
    }
}

impl<A> fmt::Debug for ConsoleSessionSettings<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleSessionSettings")
            .field("authenticator", &self.authenticator.is_some())
            .field(
                "inactivity_timeout_seconds",
                &self.inactivity_timeout_seconds,
            )
            .field(
                "logout_redirect",
                &self.logout_redirect.as_ref().map(Url::as_str),
            )
            .finish()
    }
}

/// Derives the authenticator configuration; `Ok(None)` when auth is disabled.
pub fn derive_authenticator_config(
    policy: &CompletedAuthOptions,
    context: &AuthRuntimeContext,
) -> Result<Option<AuthenticatorConfig>, AuthPolicyError> {
    let (auth_source, scopes, issuer_url) = match policy.mode() {
        AuthMode::Disabled => return Ok(None),
        AuthMode::OpenShift => (
            AuthSource::OpenShift,
            OPENSHIFT_SCOPES,
            url_text(&context.k8s_endpoint),
        ),
        AuthMode::Oidc => {
            let issuer =
                policy
                    .issuer_url()
                    .ok_or_else(|| AuthPolicyError::MissingRequiredField {
                        flag: "--user-auth-oidc-issuer-url",
                        detail: "must be set if --user-auth=oidc".to_string(),
                    })?;
            (AuthSource::Oidc, OIDC_SCOPES, url_text(issuer))
        }
    };

    let base_url = context
        .base_url
        .as_ref()
        .ok_or(AuthPolicyError::MissingBaseUrl)?;
    let base = url_text(base_url);

    Ok(Some(AuthenticatorConfig {
        auth_source,
        issuer_url,
        issuer_ca: policy.ca_file().map(PathBuf::from),
        client_id: policy.client_id().to_string(),
        client_secret: policy.client_secret().to_vec(),
        redirect_url: single_joining_slash(&base, AUTH_LOGIN_CALLBACK_ENDPOINT),
        scopes: scopes.iter().map(|scope| scope.to_string()).collect(),
        k8s_ca: context.ca_cert_file.clone(),
        error_url: single_joining_slash(&base, AUTH_LOGIN_ERROR_ENDPOINT),
        success_url: single_joining_slash(&base, AUTH_LOGIN_SUCCESS_ENDPOINT),
        cookie_path: single_joining_slash(base_url.path(), AUTH_COOKIE_API_PATH),
        referer_path: base,
        secure_cookies: base_url.scheme() == "https",
        k8s_config: PlatformApiConfig {
            host: context.public_api_server_endpoint.clone(),
            transport: context.transport.clone(),
        },
    }))
}

/// Derives the configuration and hands it to `builder`.
pub async fn build_authenticator<B: AuthenticatorBuilder>(
    policy: &CompletedAuthOptions,
    context: &AuthRuntimeContext,
    builder: &B,
) -> AuthenticatorOutcome<B::Authenticator> {
    let config = match derive_authenticator_config(policy, context) {
        Ok(Some(config)) => config,
        Ok(None) => return AuthenticatorOutcome::Disabled,
        Err(error) => return AuthenticatorOutcome::Failed(error),
    };

    info!(
        mode = policy.mode().as_str(),
        auth_source = config.auth_source.as_str(),
        issuer = %config.issuer_url,
        secure_cookies = config.secure_cookies,
        "initializing console authenticator"
    );
    match builder.build(config).await {
        Ok(authenticator) => AuthenticatorOutcome::Constructed(Arc::new(authenticator)),
        Err(error) => AuthenticatorOutcome::Failed(AuthPolicyError::Construction {
            detail: format!("{error:#}"),
        }),
    }
}

impl CompletedAuthOptions {
    /// Builds the authenticator and attaches it with the session settings.
    ///
    /// Settings are left untouched unless construction succeeds.
    pub async fn apply_to<B: AuthenticatorBuilder>(
        &self,
        settings: &mut ConsoleSessionSettings<B::Authenticator>,
        context: &AuthRuntimeContext,
        builder: &B,
    ) -> AuthenticatorOutcome<B::Authenticator> {
        let outcome = build_authenticator(self, context, builder).await;
        if let AuthenticatorOutcome::Constructed(authenticator) = &outcome {
            settings.authenticator = Some(Arc::clone(authenticator));
            settings.inactivity_timeout_seconds = Some(self.inactivity_timeout_seconds());
            settings.logout_redirect = self.logout_redirect_url().cloned();
        }
        outcome
    }
}

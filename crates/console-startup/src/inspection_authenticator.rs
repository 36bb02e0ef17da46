use anyhow::{Context, Result};
use async_trait::async_trait;
use console_auth::{AuthenticatorBuilder, AuthenticatorConfig};
use url::Url;

#[derive(Debug)]
/// Authenticator stand-in that keeps the configuration it was built from.
pub struct InspectionAuthenticator {
    config: AuthenticatorConfig,
}

impl InspectionAuthenticator {
    pub fn config(&self) -> &AuthenticatorConfig {
        &self.config
    }
}

#[derive(Debug, Default, Clone, Copy)]
/// Checks that the derived endpoints are absolute URLs without contacting the issuer.
pub struct InspectionAuthenticatorBuilder;

#[async_trait]
impl AuthenticatorBuilder for InspectionAuthenticatorBuilder {
    type Authenticator = InspectionAuthenticator;

    async fn build(&self, config: AuthenticatorConfig) -> Result<Self::Authenticator> {
        for (name, value) in [
            ("issuer", config.issuer_url.as_str()),
            ("redirect", config.redirect_url.as_str()),
            ("error", config.error_url.as_str()),
            ("success", config.success_url.as_str()),
        ] {
            Url::parse(value).with_context(|| format!("invalid {name} URL '{value}'"))?;
        }
        if config.scopes.is_empty() {
            anyhow::bail!("authenticator requires at least one OAuth2 scope");
        }
        Ok(InspectionAuthenticator { config })
    }
}

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AuthPolicyError;

/// Mode applied when `--user-auth` is left unset.
pub const DEFAULT_AUTH_MODE: AuthMode = AuthMode::OpenShift;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// User authentication mode selected for the console.
pub enum AuthMode {
    Disabled,
    Oidc,
    #[serde(rename = "openshift")]
    OpenShift,
}

impl AuthMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::Oidc => "oidc",
            Self::OpenShift => "openshift",
        }
    }

    /// Modes that log users in through an OAuth2 client.
    pub fn requires_client_credentials(self) -> bool {
        matches!(self, Self::Oidc | Self::OpenShift)
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthMode {
    type Err = AuthPolicyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "disabled" => Ok(Self::Disabled),
            "oidc" => Ok(Self::Oidc),
            "openshift" => Ok(Self::OpenShift),
            other => Err(AuthPolicyError::InvalidMode {
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
/// Authentication mode the console itself uses against the cluster API.
pub enum PlatformAuthMode {
    ServiceAccount,
    BearerToken,
    Oidc,
    #[serde(rename = "openshift")]
    OpenShift,
}

impl PlatformAuthMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ServiceAccount => "service-account",
            Self::BearerToken => "bearer-token",
            Self::Oidc => "oidc",
            Self::OpenShift => "openshift",
        }
    }

    /// Inactivity tracking needs user sessions issued by the platform.
    pub fn supports_inactivity_timeout(self) -> bool {
        matches!(self, Self::Oidc | Self::OpenShift)
    }
}

impl fmt::Display for PlatformAuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Login backend handed to the authenticator.
pub enum AuthSource {
    Oidc,
    OpenShift,
}

impl AuthSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Oidc => "oidc",
            Self::OpenShift => "openshift",
        }
    }
}

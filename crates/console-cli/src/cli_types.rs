use clap::ValueEnum;

use console_auth::PlatformAuthMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CliK8sAuthMode {
    ServiceAccount,
    BearerToken,
    Oidc,
    #[value(name = "openshift")]
    OpenShift,
}

impl CliK8sAuthMode {
    pub fn as_str(self) -> &'static str {
        match self {
            CliK8sAuthMode::ServiceAccount => "service-account",
            CliK8sAuthMode::BearerToken => "bearer-token",
            CliK8sAuthMode::Oidc => "oidc",
            CliK8sAuthMode::OpenShift => "openshift",
        }
    }
}

impl From<CliK8sAuthMode> for PlatformAuthMode {
    fn from(value: CliK8sAuthMode) -> Self {
        match value {
            CliK8sAuthMode::ServiceAccount => PlatformAuthMode::ServiceAccount,
            CliK8sAuthMode::BearerToken => PlatformAuthMode::BearerToken,
            CliK8sAuthMode::Oidc => PlatformAuthMode::Oidc,
            CliK8sAuthMode::OpenShift => PlatformAuthMode::OpenShift,
        }
    }
}

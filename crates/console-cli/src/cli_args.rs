use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::CliK8sAuthMode;

mod user_auth_flags;

pub use user_auth_flags::CliUserAuthFlags;

/// In-cluster API server address used as the OpenShift token issuer.
pub const DEFAULT_K8S_IN_CLUSTER_ENDPOINT: &str = "https://kubernetes.default.svc";

#[derive(Debug, Parser)]
#[command(
    name = "console-auth",
    about = "Resolve and inspect console user authentication settings",
    version
)]
pub struct Cli {
    #[arg(
        long = "config",
        env = "BRIDGE_CONFIG",
        help = "Console server config file (TOML, or JSON with a .json extension). Flags override values from the file."
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "k8s-auth",
        env = "BRIDGE_K8S_AUTH",
        value_enum,
        default_value = "service-account",
        help = "Authentication mode the console uses against the cluster API"
    )]
    pub k8s_auth: CliK8sAuthMode,

    #[arg(
        long = "base-address",
        env = "BRIDGE_BASE_ADDRESS",
        help = "Public console base URL, e.g. https://console.example.com. Required unless --user-auth=disabled"
    )]
    pub base_address: Option<String>,

    #[arg(
        long = "k8s-mode-off-cluster-endpoint",
        env = "BRIDGE_K8S_MODE_OFF_CLUSTER_ENDPOINT",
        help = "URL of the cluster API server when the console runs outside the cluster"
    )]
    pub k8s_mode_off_cluster_endpoint: Option<String>,

    #[arg(
        long = "k8s-public-endpoint",
        env = "BRIDGE_K8S_PUBLIC_ENDPOINT",
        help = "Public URL of the cluster API server used for OAuth metadata discovery"
    )]
    pub k8s_public_endpoint: Option<String>,

    #[arg(
        long = "ca-file",
        env = "BRIDGE_CA_FILE",
        help = "PEM CA bundle trusted for cluster API requests"
    )]
    pub ca_file: Option<PathBuf>,

    #[arg(
        long = "auth-inspect",
        env = "BRIDGE_AUTH_INSPECT",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        help = "Print the resolved user-auth policy and derived authenticator settings, then exit"
    )]
    pub auth_inspect: bool,

    #[arg(
        long = "auth-inspect-json",
        env = "BRIDGE_AUTH_INSPECT_JSON",
        default_value_t = false,
        action = ArgAction::Set,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        requires = "auth_inspect",
        help = "Emit --auth-inspect output as pretty JSON"
    )]
    pub auth_inspect_json: bool,

    #[command(flatten)]
    pub auth_flags: CliUserAuthFlags,
}

impl std::ops::Deref for Cli {
    type Target = CliUserAuthFlags;

    fn deref(&self) -> &Self::Target {
        &self.auth_flags
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn unit_cli_parses_user_auth_flags() {
        let cli = Cli::try_parse_from([
            "console-auth",
            "--user-auth",
            "oidc",
            "--user-auth-oidc-issuer-url",
            "https://idp.example.com",
            "--user-auth-oidc-client-id",
            "console",
            "--user-auth-oidc-client-secret-file",
            "/etc/console/secret",
            "--inactivity-timeout",
            "600",
            "--k8s-auth",
            "oidc",
        ])
        .expect("parse cli");
        assert_eq!(cli.user_auth.as_deref(), Some("oidc"));
        assert_eq!(cli.user_auth_oidc_client_id.as_deref(), Some("console"));
        assert_eq!(
            cli.user_auth_oidc_client_secret_file,
            Some(PathBuf::from("/etc/console/secret"))
        );
        assert_eq!(cli.inactivity_timeout, 600);
        assert_eq!(cli.k8s_auth, CliK8sAuthMode::Oidc);
    }

    #[test]
    fn unit_cli_defaults_leave_user_auth_unset() {
        let cli = Cli::try_parse_from(["console-auth"]).expect("parse cli");
        assert_eq!(cli.user_auth, None);
        assert_eq!(cli.inactivity_timeout, 0);
        assert_eq!(cli.k8s_auth, CliK8sAuthMode::ServiceAccount);
        assert!(!cli.auth_inspect);
    }

    #[test]
    fn regression_cli_auth_inspect_json_requires_auth_inspect() {
        let error = Cli::try_parse_from(["console-auth", "--auth-inspect-json"])
            .expect_err("json flag alone should fail");
        assert_eq!(error.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn regression_cli_accepts_negative_inactivity_timeout() {
        let cli = Cli::try_parse_from(["console-auth", "--inactivity-timeout", "-5"])
            .expect("parse negative timeout");
        assert_eq!(cli.inactivity_timeout, -5);
    }
}

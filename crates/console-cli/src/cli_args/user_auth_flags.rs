use std::path::PathBuf;

use clap::Args;

/// User authentication flags flattened into `Cli`.
#[derive(Debug, Clone, Default, Args)]
pub struct CliUserAuthFlags {
    #[arg(
        long = "user-auth",
        env = "BRIDGE_USER_AUTH",
        help = "User authentication provider type. Possible values: disabled, oidc, openshift. Defaults to 'openshift'"
    )]
    pub user_auth: Option<String>,

    #[arg(
        long = "user-auth-oidc-issuer-url",
        env = "BRIDGE_USER_AUTH_OIDC_ISSUER_URL",
        help = "The OIDC/OAuth2 issuer URL."
    )]
    pub user_auth_oidc_issuer_url: Option<String>,

    #[arg(
        long = "user-auth-oidc-client-id",
        env = "BRIDGE_USER_AUTH_OIDC_CLIENT_ID",
        help = "The OIDC OAuth2 Client ID."
    )]
    pub user_auth_oidc_client_id: Option<String>,

    #[arg(
        long = "user-auth-oidc-client-secret",
        env = "BRIDGE_USER_AUTH_OIDC_CLIENT_SECRET",
        hide_env_values = true,
        help = "The OIDC OAuth2 Client Secret."
    )]
    pub user_auth_oidc_client_secret: Option<String>,

    #[arg(
        long = "user-auth-oidc-client-secret-file",
        env = "BRIDGE_USER_AUTH_OIDC_CLIENT_SECRET_FILE",
        help = "File containing the OIDC OAuth2 Client Secret."
    )]
    pub user_auth_oidc_client_secret_file: Option<PathBuf>,

    #[arg(
        long = "user-auth-oidc-ca-file",
        env = "BRIDGE_USER_AUTH_OIDC_CA_FILE",
        help = "Path to a PEM file for the OIDC/OAuth2 issuer CA."
    )]
    pub user_auth_oidc_ca_file: Option<PathBuf>,

    #[arg(
        long = "inactivity-timeout",
        env = "BRIDGE_INACTIVITY_TIMEOUT",
        default_value_t = 0,
        allow_negative_numbers = true,
        help = "Number of seconds, after which user will be logged out if inactive. Ignored if less than 300 seconds (5 minutes)."
    )]
    pub inactivity_timeout: i64,

    #[arg(
        long = "user-auth-logout-redirect",
        env = "BRIDGE_USER_AUTH_LOGOUT_REDIRECT",
        help = "Optional redirect URL on logout needed for some single sign-on identity providers."
    )]
    pub user_auth_logout_redirect: Option<String>,
}

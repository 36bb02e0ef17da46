use crate::error::AuthPolicyError;
use crate::mode::{AuthMode, PlatformAuthMode};
use crate::options::{non_empty, non_empty_path, RawAuthOptions};

/// Checks merged user-auth options against the console's own platform auth mode.
///
/// Every rule is evaluated; the returned list is empty when the options are
/// valid. An unset mode is reported as invalid, so callers should apply the
/// default first.
pub fn validate_auth_options(
    options: &RawAuthOptions,
    platform_mode: PlatformAuthMode,
) -> Vec<AuthPolicyError> {
    let mut errors = Vec::new();

    let mode = options
        .auth_type
        .as_deref()
        .unwrap_or_default()
        .parse::<AuthMode>();
    match mode {
        Ok(mode) => validate_mode_requirements(options, mode, &mut errors),
        Err(error) => errors.push(error),
    }

    // Keyed off the platform mode: the user-auth mode may be `disabled` while
    // the platform still issues OIDC sessions.
    if !platform_mode.supports_inactivity_timeout() && options.inactivity_timeout_seconds > 0 {
        errors.push(AuthPolicyError::UnsupportedFeature {
            flag: "--inactivity-timeout",
            detail: format!(
                "in order to activate the user inactivity timeout, the platform auth mode must be one of: oidc, openshift (got {platform_mode})"
            ),
        });
    }

    errors
}

fn validate_mode_requirements(
    options: &RawAuthOptions,
    mode: AuthMode,
    errors: &mut Vec<AuthPolicyError>,
) {
    if mode.requires_client_credentials() {
        if non_empty(options.client_id.as_deref()).is_none() {
            errors.push(AuthPolicyError::MissingRequiredField {
                flag: "--user-auth-oidc-client-id",
                detail: format!("required when --user-auth={mode}"),
            });
        }

        let inline_secret = non_empty(options.client_secret.as_deref()).is_some();
        let secret_file = non_empty_path(options.client_secret_file.as_ref()).is_some();
        match (inline_secret, secret_file) {
            (false, false) => errors.push(AuthPolicyError::MissingSecret),
            (true, true) => errors.push(AuthPolicyError::ConflictingFields {
                flag: "--user-auth-oidc-client-secret",
                detail: "cannot provide both --user-auth-oidc-client-secret and --user-auth-oidc-client-secret-file".to_string(),
            }),
            _ => {}
        }
    }

    let issuer_set = non_empty(options.issuer_url.as_deref()).is_some();
    match mode {
        AuthMode::OpenShift if issuer_set => errors.push(AuthPolicyError::ConflictingFields {
            flag: "--user-auth-oidc-issuer-url",
            detail: "cannot be used with --user-auth=openshift".to_string(),
        }),
        AuthMode::Oidc if !issuer_set => errors.push(AuthPolicyError::MissingRequiredField {
            flag: "--user-auth-oidc-issuer-url",
            detail: "must be set if --user-auth=oidc".to_string(),
        }),
        AuthMode::OpenShift | AuthMode::Oidc | AuthMode::Disabled => {}
    }
}

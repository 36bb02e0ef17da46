use std::fmt;
use std::path::{Path, PathBuf};

use tracing::warn;
use url::Url;

use crate::error::{AggregateError, AuthPolicyError};
use crate::mode::{AuthMode, PlatformAuthMode, DEFAULT_AUTH_MODE};
use crate::options::{non_empty, non_empty_path, RawAuthOptions};
use crate::secret::{resolve_client_secret, FsSecretSource, SecretSource};
use crate::validation::validate_auth_options;

/// Inactivity timeouts below this many seconds switch the feature off.
pub const MIN_INACTIVITY_TIMEOUT_SECONDS: i64 = 300;

#[derive(Clone, PartialEq, Eq)]
/// Validated, immutable user-auth policy.
///
/// Only produced by [`RawAuthOptions::complete`]; holding one means the
/// options passed every validation rule and the client secret was resolved.
pub struct CompletedAuthOptions {
    mode: AuthMode,
    issuer_url: Option<Url>,
    client_id: String,
    client_secret: Vec<u8>,
    ca_file: Option<PathBuf>,
    inactivity_timeout_seconds: u64,
    logout_redirect_url: Option<Url>,
}

impl CompletedAuthOptions {
    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    /// User-supplied issuer; always `None` for `openshift`.
    pub fn issuer_url(&self) -> Option<&Url> {
        self.issuer_url.as_ref()
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Raw secret bytes; file-sourced secrets need not be UTF-8.
    pub fn client_secret(&self) -> &[u8] {
        &self.client_secret
    }

    pub fn ca_file(&self) -> Option<&Path> {
        self.ca_file.as_deref()
    }

    /// Zero when inactivity logout is disabled.
    pub fn inactivity_timeout_seconds(&self) -> u64 {
        self.inactivity_timeout_seconds
    }

    pub fn logout_redirect_url(&self) -> Option<&Url> {
        self.logout_redirect_url.as_ref()
    }
}

impl fmt::Debug for CompletedAuthOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletedAuthOptions")
            .field("mode", &self.mode)
            .field("issuer_url", &self.issuer_url.as_ref().map(Url::as_str))
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("ca_file", &self.ca_file)
            .field("inactivity_timeout_seconds", &self.inactivity_timeout_seconds)
            .field(
                "logout_redirect_url",
                &self.logout_redirect_url.as_ref().map(Url::as_str),
            )
            .finish()
    }
}

impl RawAuthOptions {
    /// Applies defaults, validates, parses URLs, and resolves the client secret.
    pub fn complete(
        self,
        platform_mode: PlatformAuthMode,
    ) -> Result<CompletedAuthOptions, AuthPolicyError> {
        self.complete_with_source(platform_mode, &FsSecretSource)
    }

    /// Same as [`RawAuthOptions::complete`] with a caller-provided secret reader.
    pub fn complete_with_source(
        mut self,
        platform_mode: PlatformAuthMode,
        secrets: &dyn SecretSource,
    ) -> Result<CompletedAuthOptions, AuthPolicyError> {
        if non_empty(self.auth_type.as_deref()).is_none() {
            self.auth_type = Some(DEFAULT_AUTH_MODE.as_str().to_string());
        }
        self.inactivity_timeout_seconds = clamp_inactivity_timeout(self.inactivity_timeout_seconds);

        if let Some(aggregate) = AggregateError::new(validate_auth_options(&self, platform_mode)) {
            return Err(AuthPolicyError::Invalid(aggregate));
        }

        let mode = self
            .auth_type
            .as_deref()
            .unwrap_or_default()
            .parse::<AuthMode>()?;
        let issuer_url = parse_optional_url("issuer", self.issuer_url.as_deref())?;
        let logout_redirect_url =
            parse_optional_url("logout redirect", self.logout_redirect.as_deref())?;
        let client_secret = resolve_client_secret(&self, secrets)?;

        Ok(CompletedAuthOptions {
            mode,
            issuer_url,
            client_id: non_empty(self.client_id.as_deref())
                .map(str::to_string)
                .unwrap_or_default(),
            client_secret,
            ca_file: non_empty_path(self.ca_file.as_ref()).cloned(),
            inactivity_timeout_seconds: u64::try_from(self.inactivity_timeout_seconds)
                .unwrap_or_default(),
            logout_redirect_url,
        })
    }
}

/// Maps timeouts shorter than [`MIN_INACTIVITY_TIMEOUT_SECONDS`] to zero.
pub fn clamp_inactivity_timeout(seconds: i64) -> i64 {
    if seconds >= MIN_INACTIVITY_TIMEOUT_SECONDS {
        return seconds;
    }
    if seconds > 0 {
        warn!(
            inactivity_timeout_seconds = seconds,
            "flag --inactivity-timeout is set to less than {MIN_INACTIVITY_TIMEOUT_SECONDS} seconds and will be ignored"
        );
    }
    0
}

/// Both issuer and logout redirect must be absolute URLs.
fn parse_optional_url(
    field: &'static str,
    value: Option<&str>,
) -> Result<Option<Url>, AuthPolicyError> {
    let Some(value) = non_empty(value) else {
        return Ok(None);
    };
    Url::parse(value)
        .map(Some)
        .map_err(|source| AuthPolicyError::MalformedUrl {
            field,
            value: value.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn oidc_options() -> RawAuthOptions {
        RawAuthOptions {
            auth_type: Some("oidc".to_string()),
            issuer_url: Some("https://idp.example.com".to_string()),
            client_id: Some("console".to_string()),
            client_secret: Some("s3cr3t".to_string()),
            ..RawAuthOptions::default()
        }
    }

    #[test]
    fn unit_complete_disabled_mode_with_empty_fields() {
        let options = RawAuthOptions {
            auth_type: Some("disabled".to_string()),
            ..RawAuthOptions::default()
        };
        let completed = options
            .complete(PlatformAuthMode::ServiceAccount)
            .expect("disabled mode completes");
        assert_eq!(completed.mode(), AuthMode::Disabled);
        assert!(completed.client_secret().is_empty());
        assert_eq!(completed.inactivity_timeout_seconds(), 0);
        assert!(completed.logout_redirect_url().is_none());
    }

    #[test]
    fn functional_complete_defaults_mode_and_clamps_short_timeout() {
        let options = RawAuthOptions {
            client_id: Some("console".to_string()),
            client_secret: Some("s3cr3t".to_string()),
            inactivity_timeout_seconds: 120,
            ..RawAuthOptions::default()
        };
        let completed = options
            .complete(PlatformAuthMode::OpenShift)
            .expect("defaulted openshift completes");
        assert_eq!(completed.mode(), AuthMode::OpenShift);
        assert_eq!(completed.inactivity_timeout_seconds(), 0);
        assert!(completed.issuer_url().is_none());
    }

    #[test]
    fn functional_complete_clamp_runs_before_platform_timeout_rule() {
        let options = RawAuthOptions {
            auth_type: Some("disabled".to_string()),
            inactivity_timeout_seconds: 120,
            ..RawAuthOptions::default()
        };
        let completed = options
            .complete(PlatformAuthMode::BearerToken)
            .expect("clamped timeout no longer violates platform rule");
        assert_eq!(completed.inactivity_timeout_seconds(), 0);

        let options = RawAuthOptions {
            auth_type: Some("disabled".to_string()),
            inactivity_timeout_seconds: 300,
            ..RawAuthOptions::default()
        };
        let error = options
            .complete(PlatformAuthMode::BearerToken)
            .expect_err("300 seconds needs a session platform mode");
        assert_eq!(error.violations()[0].reason_code(), "unsupported_feature");
    }

    #[test]
    fn functional_complete_openshift_with_issuer_fails_validation() {
        let options = RawAuthOptions {
            auth_type: Some("openshift".to_string()),
            issuer_url: Some("https://idp.example.com".to_string()),
            client_id: Some("console".to_string()),
            client_secret: Some("s3cr3t".to_string()),
            ..RawAuthOptions::default()
        };
        let error = options
            .complete(PlatformAuthMode::OpenShift)
            .expect_err("issuer conflicts with openshift");
        assert!(matches!(error, AuthPolicyError::Invalid(_)));
        let codes = error
            .violations()
            .into_iter()
            .map(AuthPolicyError::reason_code)
            .collect::<Vec<_>>();
        assert_eq!(codes, vec!["conflicting_fields"]);
    }

    #[test]
    fn functional_complete_aggregates_conflicting_secret_and_missing_issuer() {
        let tempdir = tempfile::tempdir().expect("tempdir");
        let secret_path = tempdir.path().join("secret");
        std::fs::write(&secret_path, "from-file").expect("write secret");
        let options = RawAuthOptions {
            issuer_url: None,
            client_secret_file: Some(secret_path),
            ..oidc_options()
        };
        let error = options
            .complete(PlatformAuthMode::Oidc)
            .expect_err("two violations");
        let codes = error
            .violations()
            .into_iter()
            .map(AuthPolicyError::reason_code)
            .collect::<Vec<_>>();
        assert_eq!(codes, vec!["conflicting_fields", "missing_required_field"]);
        let rendered = error.to_string();
        assert!(rendered.contains("cannot provide both"));
        assert!(rendered.contains("must be set if --user-auth=oidc"));
    }

    #[test]
    fn functional_complete_reads_secret_file_verbatim() {
        let tempdir = tempfile::tempdir().expect("tempdir");
        let secret_path = tempdir.path().join("secret");
        std::fs::write(&secret_path, "abc123\n").expect("write secret");
        let options = RawAuthOptions {
            client_secret: None,
            client_secret_file: Some(secret_path),
            ..oidc_options()
        };
        let completed = options.complete(PlatformAuthMode::Oidc).expect("complete");
        assert_eq!(completed.client_secret(), b"abc123\n");
        assert_eq!(
            completed.issuer_url().map(Url::as_str),
            Some("https://idp.example.com/")
        );
    }

    #[test]
    fn functional_complete_parses_logout_redirect() {
        let options = RawAuthOptions {
            logout_redirect: Some("https://idp.example.com/logout?next=console".to_string()),
            inactivity_timeout_seconds: 900,
            ..oidc_options()
        };
        let completed = options.complete(PlatformAuthMode::Oidc).expect("complete");
        let logout = completed.logout_redirect_url().expect("logout redirect");
        assert_eq!(logout.host_str(), Some("idp.example.com"));
        assert_eq!(logout.path(), "/logout");
        assert_eq!(completed.inactivity_timeout_seconds(), 900);
    }

    #[test]
    fn regression_complete_rejects_malformed_issuer_url() {
        let options = RawAuthOptions {
            issuer_url: Some("idp.example.com/no-scheme".to_string()),
            ..oidc_options()
        };
        let error = options
            .complete(PlatformAuthMode::Oidc)
            .expect_err("relative issuer should fail");
        assert!(matches!(error, AuthPolicyError::MalformedUrl { field: "issuer", .. }));
    }

    #[test]
    fn regression_complete_rejects_malformed_logout_redirect() {
        let options = RawAuthOptions {
            logout_redirect: Some("http://[::1".to_string()),
            ..oidc_options()
        };
        let error = options
            .complete(PlatformAuthMode::Oidc)
            .expect_err("bad logout redirect should fail");
        assert!(matches!(
            error,
            AuthPolicyError::MalformedUrl {
                field: "logout redirect",
                ..
            }
        ));
    }

    #[test]
    fn regression_complete_accepts_non_utf8_secret_file() {
        let tempdir = tempfile::tempdir().expect("tempdir");
        let secret_path = tempdir.path().join("secret");
        std::fs::write(&secret_path, [0xff, 0xfe, b'a']).expect("write secret");
        let options = RawAuthOptions {
            client_secret: None,
            client_secret_file: Some(secret_path),
            ..oidc_options()
        };
        let completed = options
            .complete(PlatformAuthMode::Oidc)
            .expect("binary secret completes");
        assert_eq!(completed.client_secret(), [0xff, 0xfe, b'a']);
    }

    #[test]
    fn regression_complete_rejects_relative_logout_redirect() {
        let options = RawAuthOptions {
            logout_redirect: Some("/logout".to_string()),
            ..oidc_options()
        };
        let error = options
            .complete(PlatformAuthMode::Oidc)
            .expect_err("logout redirect must be absolute");
        assert!(matches!(
            error,
            AuthPolicyError::MalformedUrl {
                field: "logout redirect",
                ref value,
                ..
            } if value == "/logout"
        ));
    }

    #[test]
    fn regression_complete_fails_when_secret_file_is_missing() {
        let tempdir = tempfile::tempdir().expect("tempdir");
        let options = RawAuthOptions {
            client_secret: None,
            client_secret_file: Some(tempdir.path().join("absent")),
            ..oidc_options()
        };
        let error = options
            .complete(PlatformAuthMode::Oidc)
            .expect_err("missing secret file should fail");
        assert_eq!(error.reason_code(), "read_error");
    }

    #[test]
    fn functional_complete_is_idempotent() {
        let tempdir = tempfile::tempdir().expect("tempdir");
        let secret_path = tempdir.path().join("secret");
        std::fs::write(&secret_path, "abc123\n").expect("write secret");
        let options = RawAuthOptions {
            client_secret: None,
            client_secret_file: Some(secret_path),
            ca_file: Some(PathBuf::from("/etc/console/idp-ca.crt")),
            inactivity_timeout_seconds: 600,
            logout_redirect: Some("https://idp.example.com/logout".to_string()),
            ..oidc_options()
        };
        let first = options
            .clone()
            .complete(PlatformAuthMode::Oidc)
            .expect("first");
        let second = options.complete(PlatformAuthMode::Oidc).expect("second");
        assert_eq!(first, second);
    }

    #[test]
    fn unit_completed_options_debug_redacts_secret() {
        let completed = oidc_options()
            .complete(PlatformAuthMode::Oidc)
            .expect("complete");
        let rendered = format!("{completed:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("s3cr3t"));
    }

    proptest! {
        #[test]
        fn property_clamp_inactivity_timeout_zeroes_short_values(seconds in i64::MIN..i64::MAX) {
            let clamped = clamp_inactivity_timeout(seconds);
            if seconds < MIN_INACTIVITY_TIMEOUT_SECONDS {
                prop_assert_eq!(clamped, 0);
            } else {
                prop_assert_eq!(clamped, seconds);
            }
        }
    }
}

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while resolving the console user-auth policy.
#[derive(Debug, Error)]
pub enum AuthPolicyError {
    #[error("invalid flag --user-auth '{value}': must be one of: oidc, openshift, disabled")]
    InvalidMode { value: String },
    #[error("missing required flag {flag}: {detail}")]
    MissingRequiredField { flag: &'static str, detail: String },
    #[error("conflicting flag {flag}: {detail}")]
    ConflictingFields { flag: &'static str, detail: String },
    #[error(
        "must provide either --user-auth-oidc-client-secret or --user-auth-oidc-client-secret-file"
    )]
    MissingSecret,
    #[error("unsupported flag {flag}: {detail}")]
    UnsupportedFeature { flag: &'static str, detail: String },
    #[error("invalid {field} URL '{value}': {source}")]
    MalformedUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error("failed to read client secret file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("error initializing authenticator: {detail}")]
    Construction { detail: String },
    #[error("missing required flag --base-address: must be set when user authentication is enabled")]
    MissingBaseUrl,
    #[error("{0}")]
    Invalid(AggregateError),
}

impl AuthPolicyError {
    /// Stable reason code used in inspect output and logs.
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::InvalidMode { .. } => "invalid_mode",
            Self::MissingRequiredField { .. } => "missing_required_field",
            Self::ConflictingFields { .. } => "conflicting_fields",
            Self::MissingSecret => "missing_secret",
            Self::UnsupportedFeature { .. } => "unsupported_feature",
            Self::MalformedUrl { .. } => "malformed_url",
            Self::Read { .. } => "read_error",
            Self::Construction { .. } => "construction_error",
            Self::MissingBaseUrl => "missing_base_url",
            Self::Invalid(_) => "invalid_options",
        }
    }

    /// Flattens an aggregate into its members; other errors yield themselves.
    pub fn violations(&self) -> Vec<&AuthPolicyError> {
        match self {
            Self::Invalid(aggregate) => aggregate.errors().iter().collect(),
            other => vec![other],
        }
    }
}

/// Every validation failure collected in a single pass.
#[derive(Debug)]
pub struct AggregateError {
    errors: Vec<AuthPolicyError>,
}

impl AggregateError {
    /// Returns `None` when there is nothing to aggregate.
    pub fn new(errors: Vec<AuthPolicyError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    pub fn errors(&self) -> &[AuthPolicyError] {
        &self.errors
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [single] = self.errors.as_slice() {
            return write!(f, "{single}");
        }
        write!(f, "[")?;
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{error}")?;
        }
        write!(f, "]")
    }
}

impl std::error::Error for AggregateError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_aggregate_error_rejects_empty_list() {
        assert!(AggregateError::new(Vec::new()).is_none());
    }

    #[test]
    fn unit_aggregate_error_renders_single_error_without_brackets() {
        let aggregate =
            AggregateError::new(vec![AuthPolicyError::MissingSecret]).expect("aggregate");
        assert_eq!(
            aggregate.to_string(),
            "must provide either --user-auth-oidc-client-secret or --user-auth-oidc-client-secret-file"
        );
    }

    #[test]
    fn functional_aggregate_error_joins_multiple_errors() {
        let aggregate = AggregateError::new(vec![
            AuthPolicyError::MissingSecret,
            AuthPolicyError::MissingBaseUrl,
        ])
        .expect("aggregate");
        let rendered = aggregate.to_string();
        assert!(rendered.starts_with("[must provide either"));
        assert!(rendered.contains(", missing required flag --base-address"));
        assert!(rendered.ends_with(']'));
    }

    #[test]
    fn unit_violations_flattens_invalid_aggregate() {
        let error = AuthPolicyError::Invalid(
            AggregateError::new(vec![
                AuthPolicyError::MissingSecret,
                AuthPolicyError::InvalidMode {
                    value: "ldap".to_string(),
                },
            ])
            .expect("aggregate"),
        );
        let codes = error
            .violations()
            .into_iter()
            .map(AuthPolicyError::reason_code)
            .collect::<Vec<_>>();
        assert_eq!(codes, vec!["missing_secret", "invalid_mode"]);
        assert_eq!(error.reason_code(), "invalid_options");
    }
}

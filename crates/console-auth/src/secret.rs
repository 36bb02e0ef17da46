use std::path::Path;

use crate::error::AuthPolicyError;
use crate::options::{non_empty, non_empty_path, RawAuthOptions};

/// Reads client secret material from a path.
pub trait SecretSource {
    fn read_secret(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Reads secrets from the local file system.
pub struct FsSecretSource;

impl SecretSource for FsSecretSource {
    fn read_secret(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// Resolves the OAuth2 client secret from the inline flag or the secret file.
///
/// File contents are used byte for byte, trailing newline included; no
/// encoding is assumed. Callers must have validated that at most one source
/// is set.
pub fn resolve_client_secret(
    options: &RawAuthOptions,
    source: &dyn SecretSource,
) -> Result<Vec<u8>, AuthPolicyError> {
    if let Some(path) = non_empty_path(options.client_secret_file.as_ref()) {
        return source
            .read_secret(path)
            .map_err(|source| AuthPolicyError::Read {
                path: path.clone(),
                source,
            });
    }
    Ok(non_empty(options.client_secret.as_deref())
        .map(|secret| secret.as_bytes().to_vec())
        .unwrap_or_default())
}

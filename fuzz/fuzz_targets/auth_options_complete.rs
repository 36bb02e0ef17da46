#![no_main]

use console_auth::{
    validate_auth_options, AuthMode, PlatformAuthMode, RawAuthOptions, SecretSource,
};
use libfuzzer_sys::fuzz_target;

struct FixedSecret;

impl SecretSource for FixedSecret {
    fn read_secret(&self, _path: &std::path::Path) -> std::io::Result<Vec<u8>> {
        Ok(b"fuzz-secret".to_vec())
    }
}

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let mut fields = raw.split('\u{0}');
    let mut next = || fields.next().map(str::to_string);
    let options = RawAuthOptions {
        auth_type: next(),
        issuer_url: next(),
        client_id: next(),
        client_secret: next(),
        logout_redirect: next(),
        inactivity_timeout_seconds: data.first().map(|byte| i64::from(*byte) * 10).unwrap_or(0),
        ..RawAuthOptions::default()
    };
    let platform = PlatformAuthMode::OpenShift;
    let mode_set = options
        .auth_type
        .as_deref()
        .is_some_and(|mode| !mode.is_empty());
    let violations = validate_auth_options(&options, platform);

    match options.clone().complete_with_source(platform, &FixedSecret) {
        Ok(completed) => {
            let timeout = completed.inactivity_timeout_seconds();
            assert!(timeout == 0 || timeout >= 300);
            if completed.mode() == AuthMode::Oidc {
                assert!(completed.issuer_url().is_some());
            }
        }
        Err(error) => assert!(!error.to_string().trim().is_empty()),
    }
    if mode_set && !violations.is_empty() {
        assert!(options.complete_with_source(platform, &FixedSecret).is_err());
    }
});

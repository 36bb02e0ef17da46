#![no_main]

use std::path::Path;

use console_auth::RawAuthOptions;
use console_cli::parse_console_server_config;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    for path in ["console.toml", "console.json"] {
        let Ok(config) = parse_console_server_config(Path::new(path), &raw) else {
            continue;
        };
        let mut options = RawAuthOptions {
            client_id: Some("flag-client".to_string()),
            ..RawAuthOptions::default()
        };
        options.apply_config(&config.auth);
        assert_eq!(options.client_id.as_deref(), Some("flag-client"));
    }
});

use std::path::Path;

use anyhow::{Context, Result};
use console_auth::AuthRuntimeContext;
use console_cli::{Cli, DEFAULT_K8S_IN_CLUSTER_ENDPOINT};
use url::Url;

fn non_empty(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
}

/// Parses `--base-address`; blank input means no base URL.
pub fn parse_base_address(raw: Option<&str>) -> Result<Option<Url>> {
    let Some(raw) = non_empty(raw) else {
        return Ok(None);
    };
    Url::parse(raw)
        .map(Some)
        .with_context(|| format!("invalid flag --base-address '{raw}'"))
}

/// HTTP client for cluster API discovery calls, trusting `ca_file` when set.
pub fn build_platform_transport(ca_file: Option<&Path>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(ca_file) = ca_file {
        let pem = std::fs::read(ca_file)
            .with_context(|| format!("failed to read CA file {}", ca_file.display()))?;
        let certificate = reqwest::Certificate::from_pem(&pem)
            .with_context(|| format!("failed to parse CA file {}", ca_file.display()))?;
        builder = builder.add_root_certificate(certificate);
    }
    builder
        .build()
        .context("failed to build cluster API HTTP client")
}

pub fn build_auth_runtime_context(cli: &Cli) -> Result<AuthRuntimeContext> {
    let base_url = parse_base_address(cli.base_address.as_deref())?;
    let k8s_endpoint_raw = non_empty(cli.k8s_mode_off_cluster_endpoint.as_deref())
        .unwrap_or(DEFAULT_K8S_IN_CLUSTER_ENDPOINT);
    let k8s_endpoint = Url::parse(k8s_endpoint_raw).with_context(|| {
        format!("invalid flag --k8s-mode-off-cluster-endpoint '{k8s_endpoint_raw}'")
    })?;
    let public_api_server_endpoint = non_empty(cli.k8s_public_endpoint.as_deref())
        .unwrap_or(k8s_endpoint_raw)
        .to_string();

    Ok(AuthRuntimeContext {
        base_url,
        k8s_endpoint,
        public_api_server_endpoint,
        ca_cert_file: cli.ca_file.clone(),
        transport: build_platform_transport(cli.ca_file.as_deref())?,
    })
}

use anyhow::{Context, Result};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, redirect::Policy};
use std::time::Duration;

use crate::constants::{DEFAULT_REDIRECT_LIMIT, USER_AGENT};
use crate::http::headers::parse_headers;
use crate::types::Cli;

/// Pages, manifests and icons are all requested with this `Accept`.
const ACCEPT_DISCOVERY: &str =
    "text/html,application/xhtml+xml,application/manifest+json,application/json;q=0.9,image/*;q=0.8,*/*;q=0.5";

/// Headers sent on every discovery request; `-H` values replace defaults.
fn discovery_headers(custom: &[String]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_DISCOVERY));
    headers.extend(parse_headers(custom));
    headers
}

/// Build the reqwest client used to fetch pages, manifests and well-known icons
pub fn build_http_client(cli: &Cli) -> Result<Client> {
    let timeout = Duration::from_secs(cli.timeout);
    let redirect_policy = if cli.follow_redirect {
        Policy::limited(DEFAULT_REDIRECT_LIMIT)
    } else {
        Policy::none()
    };

    // User-Agent before the default headers so -H can override it.
    let mut client_builder = Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(discovery_headers(&cli.headers))
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(redirect_policy);

    if cli.insecure {
        tracing::warn!("TLS certificate verification is disabled");
        client_builder = client_builder.danger_accept_invalid_certs(true);
    }

    if let Some(proxy_url) = &cli.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .with_context(|| format!("invalid proxy {}", proxy_url))?;
        client_builder = client_builder.proxy(proxy);
    }

    client_builder.build().context("build HTTP client")
}

use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::Proxy;
use reqwest::blocking::Client;

const REQUEST_TIMEOUT_SECS: u64 = 10;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared blocking client for fixture and emblem fetches. Honors an
/// optional SQUADCAL_PROXY url for deployments behind an egress proxy.
pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        let mut builder = Client::builder().timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS));
        if let Ok(proxy_url) = std::env::var("SQUADCAL_PROXY")
            && !proxy_url.trim().is_empty()
        {
            let proxy = Proxy::all(proxy_url.trim()).context("invalid SQUADCAL_PROXY url")?;
            builder = builder.proxy(proxy);
        }
        builder.build().context("failed to build http client")
    })
}

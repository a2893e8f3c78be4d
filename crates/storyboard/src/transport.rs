//! Shared HTTP transport for fragment downloads.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use rustls::ClientConfig;
use rustls::crypto::ring;
use rustls_platform_verifier::BuilderVerifierExt;

use crate::error::FetchFailure;

pub(crate) const DEFAULT_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

/// Byte-level fetch collaborator.
///
/// One instance is shared by reference across all sessions for the lifetime
/// of the process and must tolerate many concurrent outstanding requests.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Bytes, FetchFailure>;
}

/// `reqwest`-backed transport over a shared connection-pooling client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Transport over [`default_client`], ready to be shared.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new(default_client()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<Bytes, FetchFailure> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchFailure::Status(status));
        }
        Ok(response.bytes().await?)
    }
}

/// Build the process-wide HTTP client: rustls with the platform verifier, a
/// browser User-Agent and a 30 second request timeout.
pub fn default_client() -> Client {
    let provider = Arc::new(ring::default_provider());
    let tls_config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .expect("Failed to configure default TLS protocol versions")
        .with_platform_verifier()
        .unwrap()
        .with_no_client_auth();

    Client::builder()
        .use_preconfigured_tls(tls_config)
        .user_agent(DEFAULT_UA)
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to create HTTP client")
}

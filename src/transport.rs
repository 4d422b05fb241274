//! The HTTP transport used by execution units.
//!
//! The pool depends on a transport only through [`Transport::get`]: perform a
//! GET against a URL and return the status code, or a classified
//! [`TransportError`] when no status code could be obtained.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::error::{StressError, TransportError};

/// Performs one GET request.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Sends a GET to `url` and returns the response status code.
    ///
    /// Implementations must release every resource tied to the response
    /// before returning, on both the success and the failure path.
    async fn get(&self, url: &Url) -> Result<u16, TransportError>;
}

/// Settings applied once, when the transport is built.
#[derive(Clone, Debug, Default)]
pub struct TransportConfig {
    /// Skip TLS certificate verification.
    pub insecure: bool,
    /// Deadline for each individual request.
    pub timeout: Option<Duration>,
}

/// [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Builds a client from the given configuration.
    pub fn new(config: &TransportConfig) -> Result<Self, StressError> {
        let mut builder = Client::builder().danger_accept_invalid_certs(config.insecure);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(StressError::ClientBuild)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &Url) -> Result<u16, TransportError> {
        let resp = self.client.get(url.clone()).send().await?;
        // the response (and its body) is dropped here, releasing the connection
        Ok(resp.status().as_u16())
    }
}

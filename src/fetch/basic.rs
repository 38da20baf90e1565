use super::client::HttpClient;
use anyhow::Result;
use reqwest::blocking::{Client, Request, Response};
use std::time::Duration;

/// Per-request timeout applied by [`BasicClient::new`].
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub struct BasicClient(Client);

impl BasicClient {
    pub fn new() -> Result<Self> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self(client))
    }
}

impl HttpClient for BasicClient {
    fn execute(&self, req: Request) -> reqwest::Result<Response> {
        self.0.execute(req)
    }
}

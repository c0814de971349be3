use std::time::Duration;

use reqwest::{
    Client, RequestBuilder, Url,
    header::{ACCEPT, HeaderValue},
};

use crate::errors::BeaconApiError;

pub const JSON_ACCEPT_PRIORITY: &str = "application/json;q=1";

#[derive(Debug, Clone)]
pub struct ClientWithBaseUrl {
    client: Client,
    base_url: Url,
}

impl ClientWithBaseUrl {
    pub fn new(url: Url, request_timeout: Duration) -> Result<Self, BeaconApiError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(BeaconApiError::UnsupportedScheme(url.scheme().to_string()));
        }

        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(BeaconApiError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: url,
        })
    }

    /// Builds a GET request for `path`, resolved against the base URL.
    pub fn get(&self, path: &str) -> Result<RequestBuilder, BeaconApiError> {
        let url = self.base_url.join(path)?;
        Ok(self
            .client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static(JSON_ACCEPT_PRIORITY)))
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    errors::BeaconApiError,
    http_client::ClientWithBaseUrl,
    types::{BlockFilter, BlockHeaderData, DataResponse, Genesis, PeerRecord},
};

/// The beacon node surface the Rosetta layer depends on.
#[async_trait]
pub trait BeaconNodeRpc: Send + Sync {
    /// Header of the current head block.
    async fn chain_head(&self) -> Result<BlockHeaderData, BeaconApiError>;

    async fn genesis(&self) -> Result<Genesis, BeaconApiError>;

    async fn peers(&self) -> Result<Vec<PeerRecord>, BeaconApiError>;

    /// Headers of all blocks matching `filter`. An unknown slot or root yields an empty list.
    async fn blocks(&self, filter: BlockFilter) -> Result<Vec<BlockHeaderData>, BeaconApiError>;
}

/// [`BeaconNodeRpc`] over the standard beacon node REST API.
#[derive(Debug, Clone)]
pub struct BeaconApiClient {
    http_client: ClientWithBaseUrl,
}

impl BeaconApiClient {
    pub fn new(beacon_api_endpoint: Url, request_timeout: Duration) -> Result<Self, BeaconApiError> {
        Ok(Self {
            http_client: ClientWithBaseUrl::new(beacon_api_endpoint, request_timeout)?,
        })
    }

    /// Sends a GET and unwraps the `data` envelope. A 404 is reported as `None`.
    async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, BeaconApiError> {
        debug!(path, "querying beacon node");
        let response = self.http_client.get(path)?.query(query).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                Ok(Some(response.json::<DataResponse<T>>().await?.data))
            }
            status => Err(BeaconApiError::UnexpectedStatus {
                endpoint: path.to_string(),
                status,
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[async_trait]
impl BeaconNodeRpc for BeaconApiClient {
    async fn chain_head(&self) -> Result<BlockHeaderData, BeaconApiError> {
        let path = "/eth/v1/beacon/headers/head";
        self.get_data(path, &[])
            .await?
            .ok_or_else(|| BeaconApiError::NotFound(path.to_string()))
    }

    async fn genesis(&self) -> Result<Genesis, BeaconApiError> {
        let path = "/eth/v1/beacon/genesis";
        self.get_data(path, &[])
            .await?
            .ok_or_else(|| BeaconApiError::NotFound(path.to_string()))
    }

    async fn peers(&self) -> Result<Vec<PeerRecord>, BeaconApiError> {
        Ok(self
            .get_data("/eth/v1/node/peers", &[])
            .await?
            .unwrap_or_default())
    }

    async fn blocks(&self, filter: BlockFilter) -> Result<Vec<BlockHeaderData>, BeaconApiError> {
        match filter {
            BlockFilter::Slot(slot) => Ok(self
                .get_data("/eth/v1/beacon/headers", &[("slot", slot.to_string())])
                .await?
                .unwrap_or_default()),
            BlockFilter::Root(root) => Ok(self
                .get_data::<BlockHeaderData>(&format!("/eth/v1/beacon/headers/{root}"), &[])
                .await?
                .into_iter()
                .collect()),
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    identifier::{BlockIdentifier, PartialBlockIdentifier, TransactionIdentifier},
    network::NetworkIdentifier,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkRequest {
    pub network_identifier: NetworkIdentifier,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockRequest {
    pub network_identifier: NetworkIdentifier,

    #[serde(default)]
    pub block_identifier: PartialBlockIdentifier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTransactionRequest {
    pub network_identifier: NetworkIdentifier,
    pub block_identifier: BlockIdentifier,
    pub transaction_identifier: TransactionIdentifier,
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identifier::{BlockIdentifier, TransactionIdentifier};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_identifier: TransactionIdentifier,
    pub operations: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockMetadata {
    pub epoch: u64,
}

/// A block in the Rosetta model.
///
/// The genesis block names itself as its parent, as the Rosetta API requires
/// `parent_block_identifier` to always be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub block_identifier: BlockIdentifier,
    pub parent_block_identifier: BlockIdentifier,

    /// Milliseconds since the unix epoch.
    pub timestamp: i64,
    pub transactions: Vec<Transaction>,
    pub metadata: BlockMetadata,
}

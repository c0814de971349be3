use serde::{Deserialize, Serialize};

/// Uniquely identifies a block: the beacon slot it was proposed in and its root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockIdentifier {
    pub index: u64,
    pub hash: String,
}

impl BlockIdentifier {
    pub fn new(index: u64, hash: impl Into<String>) -> Self {
        Self {
            index,
            hash: hash.into(),
        }
    }
}

/// A block lookup key. Callers are expected to populate exactly one of the two fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialBlockIdentifier {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl PartialBlockIdentifier {
    pub fn by_index(index: u64) -> Self {
        Self {
            index: Some(index),
            hash: None,
        }
    }

    pub fn by_hash(hash: impl Into<String>) -> Self {
        Self {
            index: None,
            hash: Some(hash.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionIdentifier {
    pub hash: String,
}

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncStage {
    #[serde(rename = "deposit processing")]
    DepositProcessing,
    #[serde(rename = "syncing")]
    Syncing,
    #[serde(rename = "synced")]
    Synced,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncStage::DepositProcessing => write!(f, "deposit processing"),
            SyncStage::Syncing => write!(f, "syncing"),
            SyncStage::Synced => write!(f, "synced"),
        }
    }
}

/// Node sync progress. `synced` is derived from `stage` and cannot disagree with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub current_index: u64,
    pub target_index: u64,
    pub stage: SyncStage,
    pub synced: bool,
}

impl SyncStatus {
    pub fn new(current_index: u64, target_index: u64, stage: SyncStage) -> Self {
        Self {
            current_index,
            target_index,
            stage,
            synced: stage == SyncStage::Synced,
        }
    }
}

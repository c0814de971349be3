//! Sync progress estimation. Everything here is a pure function of its inputs.

use ream_api_types_rosetta::sync_status::{SyncStage, SyncStatus};
use ream_consensus_misc::misc::compute_slot_at_timestamp;

/// The slot the chain should be at by `now` (unix seconds), assuming no missed slots.
/// Returns 0 before genesis.
pub fn estimate_target_slot(genesis_time: u64, now: u64) -> u64 {
    compute_slot_at_timestamp(genesis_time, now)
}

/// Classifies how far the node's head (`current_slot`) is from `target_slot`.
///
/// A node still at slot 0 has not seen its first block yet, which on a beacon chain means it is
/// waiting on the deposit contract rather than syncing.
pub fn classify(current_slot: u64, target_slot: u64) -> SyncStatus {
    let stage = if current_slot == 0 {
        SyncStage::DepositProcessing
    } else if current_slot < target_slot {
        SyncStage::Syncing
    } else {
        SyncStage::Synced
    };
    SyncStatus::new(current_slot, target_slot, stage)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const GENESIS_TIME: u64 = 1606824023;

    #[rstest]
    #[case(0)]
    #[case(GENESIS_TIME - 1)]
    #[case(GENESIS_TIME)]
    fn test_target_slot_is_zero_until_genesis(#[case] now: u64) {
        assert_eq!(estimate_target_slot(GENESIS_TIME, now), 0);
    }

    #[test]
    fn test_target_slot_after_genesis() {
        let mut previous = 0;
        for elapsed in 1..=1_000 {
            let target = estimate_target_slot(GENESIS_TIME, GENESIS_TIME + elapsed);
            assert_eq!(target, elapsed / 12);
            assert!(target >= previous);
            previous = target;
        }
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(100_000)]
    fn test_classify_deposit_processing(#[case] target_slot: u64) {
        let status = classify(0, target_slot);
        assert_eq!(status.stage, SyncStage::DepositProcessing);
        assert!(!status.synced);
    }

    #[rstest]
    #[case(1, 2)]
    #[case(5, 10)]
    #[case(99, 100)]
    fn test_classify_syncing(#[case] current_slot: u64, #[case] target_slot: u64) {
        let status = classify(current_slot, target_slot);
        assert_eq!(status.stage, SyncStage::Syncing);
        assert!(!status.synced);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(10, 10)]
    #[case(11, 10)]
    #[case(5, 0)]
    fn test_classify_synced(#[case] current_slot: u64, #[case] target_slot: u64) {
        let status = classify(current_slot, target_slot);
        assert_eq!(status.stage, SyncStage::Synced);
        assert!(status.synced);
    }

    #[test]
    fn test_two_minutes_after_genesis_at_slot_five_is_syncing() {
        let target_slot = estimate_target_slot(GENESIS_TIME, 1606824143);
        assert_eq!(target_slot, 10);

        let status = classify(5, target_slot);
        assert_eq!(status.current_index, 5);
        assert_eq!(status.target_index, 10);
        assert_eq!(status.stage, SyncStage::Syncing);
        assert!(!status.synced);
    }
}

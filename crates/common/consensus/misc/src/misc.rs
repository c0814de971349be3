use crate::constants::beacon::{SECONDS_PER_SLOT, SLOTS_PER_EPOCH};

/// Return the epoch number at ``slot``.
pub fn compute_epoch_at_slot(slot: u64) -> u64 {
    slot / SLOTS_PER_EPOCH
}

/// Return the unix timestamp (in seconds) at which ``slot`` starts.
pub fn compute_timestamp_at_slot(genesis_time: u64, slot: u64) -> u64 {
    genesis_time + SECONDS_PER_SLOT * slot
}

/// Return the slot that wall-clock ``now`` falls into, or the genesis slot if ``now`` is
/// before genesis.
pub fn compute_slot_at_timestamp(genesis_time: u64, now: u64) -> u64 {
    now.saturating_sub(genesis_time) / SECONDS_PER_SLOT
}

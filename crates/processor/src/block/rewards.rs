//! Block and ommer reward arithmetic.

use alloy_primitives::U256;

/// Oldest generation an ommer may belong to and still be rewarded.
///
/// An ommer at `block_number - ommer_number > MAX_GENERATION` invalidates the
/// whole block.
pub const MAX_GENERATION: u64 = 6;

/// Total miner reward for a block containing `ommer_count` ommers.
///
/// The miner collects the base reward plus one thirty-second of it per included
/// ommer.
pub fn block_reward(base_reward: U256, ommer_count: usize) -> U256 {
    base_reward + (base_reward >> 5) * U256::from(ommer_count)
}

/// Reward credited to the beneficiary of an ommer included at `block_number`.
///
/// `((8 + ommer_number - block_number) * base_reward) / 8`; zero once the ommer is
/// beyond [`MAX_GENERATION`].
pub fn ommer_reward(base_reward: U256, block_number: u64, ommer_number: u64) -> U256 {
    let distance = block_number.saturating_sub(ommer_number);
    if distance > MAX_GENERATION {
        return U256::ZERO;
    }
    base_reward * U256::from(8 - distance) / U256::from(8)
}

//! Coinbase reward policies.

use crate::{
    block::{block_reward, ommer_reward, RewardPolicy, MAX_GENERATION},
    state::{MutableWorldState, WorldUpdater},
};
use alloy_consensus::Header;
use alloy_primitives::U256;
use tracing::trace;

/// Classic proof-of-work reward policy.
///
/// The miner collects the base reward plus an inclusion bonus per ommer; each
/// ommer beneficiary collects a reward scaled down by its distance from the block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MainnetRewardPolicy {
    block_reward: U256,
}

impl MainnetRewardPolicy {
    /// Creates a policy paying `block_reward` wei per block.
    pub const fn new(block_reward: U256) -> Self {
        Self { block_reward }
    }

    /// Base reward paid per block.
    pub const fn block_reward(&self) -> U256 {
        self.block_reward
    }
}

impl<W: MutableWorldState> RewardPolicy<W> for MainnetRewardPolicy {
    fn reward_coinbase(
        &self,
        state: &mut W,
        header: &Header,
        ommers: &[Header],
        skip_zero_block_rewards: bool,
    ) -> bool {
        if skip_zero_block_rewards && self.block_reward.is_zero() {
            return true;
        }

        let mut updater = state.updater();
        updater.increment_balance(
            header.beneficiary,
            block_reward(self.block_reward, ommers.len()),
        );
        for ommer in ommers {
            if header.number.saturating_sub(ommer.number) > MAX_GENERATION {
                trace!(
                    target: "processor",
                    block_number = header.number,
                    ommer_number = ommer.number,
                    "Ommer out of range for reward"
                );
                // The updater is dropped here, so the miner credit above never
                // reaches the state.
                return false;
            }
            updater.increment_balance(
                ommer.beneficiary,
                ommer_reward(self.block_reward, header.number, ommer.number),
            );
        }
        updater.commit();
        true
    }
}

/// Post-merge reward policy.
///
/// Execution-layer issuance is zero after the merge; fees are credited during
/// transaction execution and the consensus layer handles issuance, so nothing is
/// written here.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct MergeRewardPolicy;

impl<W: MutableWorldState> RewardPolicy<W> for MergeRewardPolicy {
    fn reward_coinbase(
        &self,
        _state: &mut W,
        _header: &Header,
        _ommers: &[Header],
        _skip_zero_block_rewards: bool,
    ) -> bool {
        true
    }
}

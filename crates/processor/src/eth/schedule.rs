//! Mainnet protocol schedule.

use crate::{
    eth::{deposits::MainnetDepositsProcessor, withdrawals::MainnetWithdrawalsProcessor},
    schedule::{ForkSpec, HeaderProtocolSchedule},
    state::MutableWorldState,
};
use alloy_consensus::Header;
use alloy_hardforks::EthereumHardforks;

/// Schedule deriving processing capabilities from the chain's hardfork
/// configuration.
///
/// Withdrawals activate with Shanghai, deposit receipts with Prague. The block
/// processor never sees fork numbers; it only observes which processors are
/// present for a given header.
#[derive(Debug, Clone, Default)]
pub struct MainnetProtocolSchedule<H> {
    hardforks: H,
    withdrawals: MainnetWithdrawalsProcessor,
    deposits: MainnetDepositsProcessor,
}

impl<H> MainnetProtocolSchedule<H> {
    /// Creates a schedule over the given hardfork configuration.
    pub const fn new(hardforks: H) -> Self {
        Self {
            hardforks,
            withdrawals: MainnetWithdrawalsProcessor,
            deposits: MainnetDepositsProcessor,
        }
    }
}

impl<W, H> HeaderProtocolSchedule<W> for MainnetProtocolSchedule<H>
where
    W: MutableWorldState,
    H: EthereumHardforks,
{
    type Withdrawals = MainnetWithdrawalsProcessor;
    type Deposits = MainnetDepositsProcessor;

    fn by_block_header(&self, header: &Header) -> ForkSpec<'_, Self::Withdrawals, Self::Deposits> {
        ForkSpec {
            withdrawals_processor: self
                .hardforks
                .is_shanghai_active_at_timestamp(header.timestamp)
                .then_some(&self.withdrawals),
            deposits_processor: self
                .hardforks
                .is_prague_active_at_timestamp(header.timestamp)
                .then_some(&self.deposits),
        }
    }
}

//! Fork-indexed processing capabilities.

use crate::state::MutableWorldState;
use alloc::boxed::Box;
use alloy_consensus::Header;
use alloy_eips::{eip4895::Withdrawal, eip6110::DepositRequest};

/// Error raised by a withdrawals or deposits processor.
pub type SubProcessorError = Box<dyn core::error::Error + Send + Sync>;

/// Applies a block's withdrawal list to the state.
pub trait WithdrawalsProcessor<W: MutableWorldState> {
    /// Stages every withdrawal into `updater`. The caller commits on success and
    /// discards the updater on failure.
    fn process_withdrawals(
        &self,
        withdrawals: &[Withdrawal],
        updater: &mut W::Updater<'_>,
    ) -> Result<(), SubProcessorError>;
}

/// Applies a block's deposit receipts to the state.
pub trait DepositsProcessor<W: MutableWorldState> {
    /// Stages deposit bookkeeping into `updater`. The caller commits on success and
    /// discards the updater on failure.
    fn process_deposits(
        &self,
        deposits: &[DepositRequest],
        updater: &mut W::Updater<'_>,
    ) -> Result<(), SubProcessorError>;
}

/// Capabilities a fork grants to block processing.
///
/// Withdrawal and deposit support are independent. A missing processor means the
/// fork predates the feature; a supplied list is then ignored rather than rejected.
#[derive(Debug)]
pub struct ForkSpec<'a, WP, DP> {
    /// Withdrawal processor, when the fork supports withdrawals.
    pub withdrawals_processor: Option<&'a WP>,
    /// Deposit processor, when the fork supports deposit receipts.
    pub deposits_processor: Option<&'a DP>,
}

/// Fork-indexed registry resolving a header to its processing capabilities.
///
/// Looked up once per block import; never cached across imports.
pub trait HeaderProtocolSchedule<W: MutableWorldState> {
    /// Withdrawal processor type for this chain.
    type Withdrawals: WithdrawalsProcessor<W>;
    /// Deposit processor type for this chain.
    type Deposits: DepositsProcessor<W>;

    /// Capabilities active for the block described by `header`.
    fn by_block_header(&self, header: &Header) -> ForkSpec<'_, Self::Withdrawals, Self::Deposits>;
}

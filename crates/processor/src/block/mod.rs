//! Block processing abstraction.
//!
//! Importing a block is composed of the following steps, in a fixed order:
//!
//! - Transaction execution: every transaction runs against its own staged updater,
//!   with the block gas budget enforced before execution.
//! - Post-transaction side effects: withdrawals and deposit receipts, as granted by
//!   the protocol schedule for the block's fork.
//! - Coinbase reward, delegated to the configured [`RewardPolicy`].
//! - Persistence of the world state under the header's identity.

use crate::{chain::ChainView, state::MutableWorldState};
use alloc::vec::Vec;
use alloy_consensus::Header;
use alloy_eips::{eip4895::Withdrawals, eip6110::DepositRequest};
use alloy_primitives::Address;
use auto_impl::auto_impl;

mod error;
pub use error::*;

mod rewards;
pub use rewards::*;

/// Everything a block carries into processing besides the chain and the state.
#[derive(derive_more::Debug)]
pub struct BlockProcessingInputs<'a, T, M> {
    /// Header of the block being processed, already past pre-execution validation.
    pub header: &'a Header,
    /// Transactions in block order.
    #[debug(skip)]
    pub transactions: &'a [T],
    /// Ommer headers, possibly empty.
    pub ommers: &'a [Header],
    /// Withdrawal list, present for forks that expect one.
    pub withdrawals: Option<&'a Withdrawals>,
    /// Deposit receipts, present for forks that expect them.
    pub deposits: Option<&'a [DepositRequest]>,
    /// Opaque metadata handed to the transaction processor unchanged.
    #[debug(skip)]
    pub private_metadata: Option<&'a M>,
}

impl<'a, T, M> BlockProcessingInputs<'a, T, M> {
    /// Creates inputs with no withdrawals, deposits, or metadata.
    pub const fn new(header: &'a Header, transactions: &'a [T], ommers: &'a [Header]) -> Self {
        Self {
            header,
            transactions,
            ommers,
            withdrawals: None,
            deposits: None,
            private_metadata: None,
        }
    }

    /// Attaches the block's withdrawal list.
    pub fn with_withdrawals(mut self, withdrawals: &'a Withdrawals) -> Self {
        self.withdrawals = Some(withdrawals);
        self
    }

    /// Attaches the block's deposit receipts.
    pub fn with_deposits(mut self, deposits: &'a [DepositRequest]) -> Self {
        self.deposits = Some(deposits);
        self
    }

    /// Attaches opaque metadata for the transaction processor.
    pub fn with_private_metadata(mut self, metadata: &'a M) -> Self {
        self.private_metadata = Some(metadata);
        self
    }
}

/// Receipts and gas accounting of a fully processed block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockProcessingOutput<R> {
    /// One receipt per transaction, in block order, each carrying the cumulative
    /// gas used up to and including its transaction.
    pub receipts: Vec<R>,
    /// Total gas used by the block's transactions.
    pub gas_used: u64,
}

/// A type that imports one block into a world state.
///
/// On success the state has been durably persisted under the header's identity
/// before the call returns. On failure a rollback-capable state has been reset, so
/// no partial import is observable; states without rollback support must be
/// discarded by the caller.
pub trait BlockProcessor<W: MutableWorldState> {
    /// Transactions this processor accepts.
    type Transaction;
    /// Receipt type produced per transaction.
    type Receipt;
    /// Opaque metadata threaded through to the transaction processor.
    type Metadata;

    /// Processes one block against `state`.
    ///
    /// The state is exclusively borrowed for the duration of the call; concurrent
    /// imports need distinct states.
    fn process_block(
        &self,
        chain: &dyn ChainView,
        state: &mut W,
        inputs: BlockProcessingInputs<'_, Self::Transaction, Self::Metadata>,
    ) -> Result<BlockProcessingOutput<Self::Receipt>, BlockProcessingError>;
}

/// Coinbase reward strategy, selected per chain configuration.
pub trait RewardPolicy<W: MutableWorldState> {
    /// Credits the block beneficiary and each eligible ommer beneficiary.
    ///
    /// Returns `false` when an ommer is older than [`MAX_GENERATION`] permits; the
    /// block must then be rejected and no credit may remain staged. When
    /// `skip_zero_block_rewards` is set and the base reward is zero, no account is
    /// touched at all.
    fn reward_coinbase(
        &self,
        state: &mut W,
        header: &Header,
        ommers: &[Header],
        skip_zero_block_rewards: bool,
    ) -> bool;
}

/// Computes the address credited with fees and rewards for a block.
#[auto_impl(&, Arc)]
pub trait MiningBeneficiaryCalculator {
    /// Beneficiary for the block described by `header`.
    fn calculate_beneficiary(&self, header: &Header) -> Address;
}

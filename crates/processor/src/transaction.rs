//! Transaction execution seam.

use crate::{
    chain::{BlockHashLookup, ChainView},
    state::MutableWorldState,
    trace::OperationTracer,
};
use alloc::{string::String, vec::Vec};
use alloy_consensus::Header;
use alloy_primitives::{Address, Bytes, Log};

/// Executes a single transaction against a staged world-state view.
///
/// Implementations own the EVM; the block processor only interprets the returned
/// [`TransactionProcessingResult`] and decides whether the staged changes survive.
pub trait TransactionProcessor<W: MutableWorldState> {
    /// Transaction type consumed by this processor.
    type Transaction;
    /// Opaque per-block metadata threaded through unchanged.
    type Metadata;

    /// Executes `tx` against `updater`.
    ///
    /// Nothing is committed here; the caller commits or discards the updater based
    /// on the returned result.
    #[allow(clippy::too_many_arguments)]
    fn process_transaction(
        &self,
        chain: &dyn ChainView,
        updater: &mut W::Updater<'_>,
        header: &Header,
        tx: &Self::Transaction,
        beneficiary: Address,
        tracer: &mut dyn OperationTracer,
        block_hashes: &BlockHashLookup<'_>,
        is_persisting_state: bool,
        validation_params: TransactionValidationParams,
        metadata: Option<&Self::Metadata>,
    ) -> TransactionProcessingResult;
}

/// Outcome of handing one transaction to the [`TransactionProcessor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionProcessingResult {
    /// Validation rejected the transaction; it must not be part of the block.
    Invalid {
        /// Human-readable validation failure.
        reason: String,
    },
    /// The transaction executed. A reverted transaction is still a valid block
    /// member and lands here with `successful == false`.
    Executed(TransactionExecutionData),
}

impl TransactionProcessingResult {
    /// Whether validation rejected the transaction.
    pub const fn is_invalid(&self) -> bool {
        matches!(self, Self::Invalid { .. })
    }

    /// The validation failure, when rejected.
    pub fn validation_error(&self) -> Option<&str> {
        match self {
            Self::Invalid { reason } => Some(reason),
            Self::Executed(_) => None,
        }
    }

    /// Gas left unspent by the transaction, when executed.
    pub const fn gas_remaining(&self) -> Option<u64> {
        match self {
            Self::Executed(data) => Some(data.gas_remaining),
            Self::Invalid { .. } => None,
        }
    }
}

/// Execution outcome of a transaction that made it into the block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionExecutionData {
    /// Whether execution finished without reverting.
    pub successful: bool,
    /// Gas left unspent out of the transaction's gas limit. Never exceeds the
    /// transaction's gas limit.
    pub gas_remaining: u64,
    /// Logs emitted during execution.
    pub logs: Vec<Log>,
    /// Return data of the outermost call frame.
    pub output: Bytes,
}

/// Switches for the validation rules applied before execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionValidationParams {
    /// Accept nonces above the account's current nonce.
    pub allow_future_nonce: bool,
    /// Skip the upfront-cost balance check.
    pub allow_exceeding_balance: bool,
    /// Accept a max fee below the block's base fee.
    pub allow_underpriced: bool,
}

impl TransactionValidationParams {
    /// Strict preset used when importing a block.
    pub const fn processing_block() -> Self {
        Self { allow_future_nonce: false, allow_exceeding_balance: false, allow_underpriced: false }
    }

    /// Relaxed preset for simulation endpoints.
    pub const fn transaction_simulator() -> Self {
        Self { allow_future_nonce: true, allow_exceeding_balance: true, allow_underpriced: true }
    }
}

impl Default for TransactionValidationParams {
    fn default() -> Self {
        Self::processing_block()
    }
}

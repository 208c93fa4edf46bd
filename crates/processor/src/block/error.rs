//! Errors produced while processing a block.

use crate::state::MerkleTrieError;
use alloc::{
    boxed::Box,
    string::{String, ToString},
};
use alloy_primitives::B256;

/// Top-level failure of a block import.
///
/// Every expected failure surfaces here as a value. Only
/// [`StorageCorruption`](Self::StorageCorruption) represents a fault of the node
/// itself rather than a verdict about the block; it is the one class callers are
/// expected to treat as fatal instead of marking the block bad.
#[derive(Debug, thiserror::Error)]
pub enum BlockProcessingError {
    /// The block is invalid under protocol rules.
    #[error(transparent)]
    Validation(#[from] BlockValidationError),
    /// The backing trie is inconsistent. Propagated unchanged, never wrapped in a
    /// reason string, so callers can trigger recovery.
    #[error(transparent)]
    StorageCorruption(#[from] MerkleTrieError),
    /// A collaborator failed for reasons unrelated to the block's validity.
    #[error(transparent)]
    Internal(#[from] InternalProcessingError),
}

impl BlockProcessingError {
    /// Wraps an arbitrary collaborator failure.
    pub fn other<E>(error: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        InternalProcessingError::Other(Box::new(error)).into()
    }

    /// Creates an internal failure from a message.
    pub fn msg(msg: impl core::fmt::Display) -> Self {
        InternalProcessingError::Message(msg.to_string()).into()
    }

    /// The validation verdict, when the block itself was rejected.
    pub const fn as_validation(&self) -> Option<&BlockValidationError> {
        match self {
            Self::Validation(error) => Some(error),
            _ => None,
        }
    }

    /// Whether this failure indicates trie corruption rather than a bad block.
    pub const fn is_storage_corruption(&self) -> bool {
        matches!(self, Self::StorageCorruption(_))
    }
}

/// Rule violations that make a block unacceptable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockValidationError {
    /// A transaction's gas limit does not fit the remaining block budget.
    ///
    /// Raised before executing the transaction: the sum of gas limits, not just gas
    /// used, must fit the block budget.
    #[error("provided gas insufficient: transaction gas limit {transaction_gas_limit} exceeds remaining block gas {block_available_gas}")]
    GasBudgetExceeded {
        /// Gas limit declared by the offending transaction.
        transaction_gas_limit: u64,
        /// Gas still available in the block at that point.
        block_available_gas: u64,
    },
    /// The transaction processor rejected a transaction.
    #[error("Block processing error: transaction invalid: {reason}; block {block_hash} transaction {tx_hash}")]
    TransactionInvalid {
        /// Hash of the containing block.
        block_hash: B256,
        /// Hash of the rejected transaction.
        tx_hash: B256,
        /// Validation failure reported by the transaction processor.
        reason: String,
    },
    /// An ommer is more than [`MAX_GENERATION`](crate::block::MAX_GENERATION)
    /// blocks older than the block including it.
    #[error("ommer too old")]
    OmmerTooOld,
}

/// Collaborator failures unrelated to the validity of the block.
#[derive(Debug, thiserror::Error)]
pub enum InternalProcessingError {
    /// The withdrawals processor raised.
    #[error("withdrawals processing failed: {0}")]
    Withdrawals(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// The deposits processor raised.
    #[error("deposits processing failed: {0}")]
    Deposits(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// The world state could not be persisted.
    #[error("failed to persist world state: {0}")]
    Persistence(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// Any other failure.
    #[error("block processing failed: {0}")]
    Other(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// Failure described by a message only.
    #[error("{0}")]
    Message(String),
}

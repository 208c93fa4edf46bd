//! World state abstraction.

use alloc::boxed::Box;
use alloy_consensus::Header;
use alloy_primitives::{Address, B256, U256};

mod in_memory;
pub use in_memory::{AccountState, SnapshotUpdater, SnapshotWorldState};

/// A staged, transactional view over world state.
///
/// Mutations land in a scratch layer owned by the updater and become visible to the
/// underlying state only on [`commit`](WorldUpdater::commit). Dropping an updater
/// discards everything it staged.
pub trait WorldUpdater {
    /// Balance of `address`, zero when the account does not exist.
    fn balance(&self, address: Address) -> U256;

    /// Stages a new balance for `address`, creating the account if absent.
    fn set_balance(&mut self, address: Address, balance: U256);

    /// Stages `amount` added on top of the current balance of `address`.
    fn increment_balance(&mut self, address: Address, amount: U256) {
        let balance = self.balance(address);
        self.set_balance(address, balance.saturating_add(amount));
    }

    /// Applies everything staged in this updater to the underlying state.
    fn commit(self);
}

/// Mutable world state, exclusively borrowed for the duration of a block import.
///
/// A state hands out one [`WorldUpdater`] at a time; the updater mutably borrows the
/// state, so two live updaters over the same state cannot exist.
pub trait MutableWorldState {
    /// Staged view handed out by [`updater`](MutableWorldState::updater).
    type Updater<'a>: WorldUpdater
    where
        Self: 'a;

    /// Returns a fresh updater scoped to this state.
    fn updater(&mut self) -> Self::Updater<'_>;

    /// Durably persists the committed state under the identity of `header`.
    fn persist(&mut self, header: &Header) -> Result<(), StateError>;

    /// Whether this state maintains a resettable speculative layer.
    ///
    /// Snapshot-backed states answer `true` and implement
    /// [`reset`](MutableWorldState::reset); callers query the capability instead of
    /// downcasting to a concrete state type.
    fn supports_rollback(&self) -> bool {
        false
    }

    /// Drops every change accumulated since the last persisted block.
    ///
    /// A no-op for states without rollback support.
    fn reset(&mut self) {}
}

/// Inconsistency reported by the backing trie.
///
/// Indicates a storage bug or a sync gap rather than a property of any block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MerkleTrieError {
    /// A node referenced by a state root is absent from storage.
    #[error("missing trie node {hash}")]
    MissingNode {
        /// Hash of the absent node.
        hash: B256,
    },
    /// A stored node does not decode to valid trie content.
    #[error("corrupt trie node {hash}")]
    CorruptNode {
        /// Hash of the undecodable node.
        hash: B256,
    },
}

/// Failure reported by [`MutableWorldState::persist`].
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Trie-level inconsistency.
    #[error(transparent)]
    Corruption(#[from] MerkleTrieError),
    /// Any other storage failure.
    #[error("world state write failed: {0}")]
    Other(Box<dyn core::error::Error + Send + Sync>),
}

impl StateError {
    /// Wraps an arbitrary storage failure.
    pub fn other<E>(error: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        Self::Other(Box::new(error))
    }
}

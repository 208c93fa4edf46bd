//! In-memory snapshot-backed world state.

use super::{MutableWorldState, StateError, WorldUpdater};
use alloc::vec::Vec;
use alloy_consensus::Header;
use alloy_primitives::{keccak256, map::HashMap, Address, B256, U256};

/// Balance and nonce of a single account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountState {
    /// Balance in wei.
    pub balance: U256,
    /// Transaction count of the account.
    pub nonce: u64,
}

/// World state held entirely in memory, with a speculative diff layer on top of the
/// last persisted block.
///
/// Reads resolve through the diff first and fall back to the committed layer.
/// [`persist`](MutableWorldState::persist) folds the diff into the committed layer
/// and recomputes the state root; [`reset`](MutableWorldState::reset) drops the diff
/// wholesale. This is the reference state used throughout the test suites; a
/// production trie lives behind the same [`MutableWorldState`] seam.
#[derive(Debug, Clone, Default)]
pub struct SnapshotWorldState {
    committed: HashMap<Address, AccountState>,
    diff: HashMap<Address, AccountState>,
    root: B256,
}

impl SnapshotWorldState {
    /// Creates an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state pre-seeded with `accounts`, already folded into the
    /// committed layer.
    pub fn with_accounts(accounts: impl IntoIterator<Item = (Address, U256)>) -> Self {
        let committed: HashMap<_, _> = accounts
            .into_iter()
            .map(|(address, balance)| (address, AccountState { balance, nonce: 0 }))
            .collect();
        let mut state = Self { committed, diff: HashMap::default(), root: B256::ZERO };
        state.root = state.compute_root();
        state
    }

    /// Balance of `address` as visible through the speculative layer.
    pub fn balance_of(&self, address: Address) -> U256 {
        self.account(address).map(|account| account.balance).unwrap_or(U256::ZERO)
    }

    /// Root of the last persisted state.
    pub const fn state_root(&self) -> B256 {
        self.root
    }

    fn account(&self, address: Address) -> Option<AccountState> {
        self.diff.get(&address).or_else(|| self.committed.get(&address)).copied()
    }

    /// Not a Merkle-Patricia commitment; a flat hash over the sorted account set is
    /// enough to compare two states for equality.
    fn compute_root(&self) -> B256 {
        let mut accounts: Vec<_> = self.committed.iter().collect();
        accounts.sort_unstable_by_key(|(address, _)| **address);

        let mut preimage = Vec::with_capacity(accounts.len() * 60);
        for (address, account) in accounts {
            preimage.extend_from_slice(address.as_slice());
            preimage.extend_from_slice(&account.balance.to_be_bytes::<32>());
            preimage.extend_from_slice(&account.nonce.to_be_bytes());
        }
        keccak256(preimage)
    }
}

/// Updater staging changes on top of a [`SnapshotWorldState`].
#[derive(Debug)]
pub struct SnapshotUpdater<'a> {
    state: &'a mut SnapshotWorldState,
    staged: HashMap<Address, AccountState>,
}

impl WorldUpdater for SnapshotUpdater<'_> {
    fn balance(&self, address: Address) -> U256 {
        self.staged
            .get(&address)
            .copied()
            .or_else(|| self.state.account(address))
            .map(|account| account.balance)
            .unwrap_or(U256::ZERO)
    }

    fn set_balance(&mut self, address: Address, balance: U256) {
        let mut account = self
            .staged
            .get(&address)
            .copied()
            .or_else(|| self.state.account(address))
            .unwrap_or_default();
        account.balance = balance;
        self.staged.insert(address, account);
    }

    fn commit(self) {
        self.state.diff.extend(self.staged);
    }
}

impl MutableWorldState for SnapshotWorldState {
    type Updater<'a> = SnapshotUpdater<'a>;

    fn updater(&mut self) -> SnapshotUpdater<'_> {
        SnapshotUpdater { state: self, staged: HashMap::default() }
    }

    fn persist(&mut self, _header: &Header) -> Result<(), StateError> {
        let diff = core::mem::take(&mut self.diff);
        self.committed.extend(diff);
        self.root = self.compute_root();
        Ok(())
    }

    fn supports_rollback(&self) -> bool {
        true
    }

    fn reset(&mut self) {
        self.diff.clear();
    }
}

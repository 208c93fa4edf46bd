//! Read-only chain access for BLOCKHASH resolution.

use alloy_consensus::Header;
use alloy_primitives::B256;
use auto_impl::auto_impl;

/// Number of recent blocks the BLOCKHASH opcode can address.
pub const BLOCKHASH_SERVE_WINDOW: u64 = 256;

/// Read-only view over canonical ancestor blocks.
#[auto_impl(&, Arc, Box)]
pub trait ChainView {
    /// Hash of the canonical block at `number`, when known.
    fn block_hash(&self, number: u64) -> Option<B256>;
}

/// Resolves ancestor hashes for the EVM.
///
/// Scoped to the block being processed: numbers at or above the current block, or
/// further back than [`BLOCKHASH_SERVE_WINDOW`], resolve to the zero hash.
#[derive(derive_more::Debug, Clone, Copy)]
pub struct BlockHashLookup<'a> {
    #[debug(skip)]
    chain: &'a dyn ChainView,
    block_number: u64,
}

impl<'a> BlockHashLookup<'a> {
    /// Creates a lookup for the block described by `header`.
    pub fn new(header: &Header, chain: &'a dyn ChainView) -> Self {
        Self { chain, block_number: header.number }
    }

    /// Hash of the ancestor at `number`, or the zero hash when out of reach.
    pub fn block_hash(&self, number: u64) -> B256 {
        if number >= self.block_number || self.block_number - number > BLOCKHASH_SERVE_WINDOW {
            return B256::ZERO;
        }
        self.chain.block_hash(number).unwrap_or(B256::ZERO)
    }
}

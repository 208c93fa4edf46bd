#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod block;
pub use block::{
    BlockProcessingError, BlockProcessingInputs, BlockProcessingOutput, BlockProcessor,
    BlockValidationError, MAX_GENERATION,
};
pub mod chain;
pub use chain::{BlockHashLookup, ChainView};
pub mod eth;
pub use eth::MainnetBlockProcessor;
pub mod schedule;
pub mod state;
pub use state::{MutableWorldState, WorldUpdater};
pub mod trace;
pub mod transaction;
pub use transaction::{TransactionProcessingResult, TransactionProcessor};

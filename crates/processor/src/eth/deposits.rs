//! Mainnet deposit-receipt handling.

use crate::{
    schedule::{DepositsProcessor, SubProcessorError},
    state::MutableWorldState,
};
use alloc::boxed::Box;
use alloy_eips::eip6110::DepositRequest;

/// A deposit receipt whose index breaks the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("deposit index {actual} out of order, expected {expected}")]
pub struct DepositIndexError {
    /// Index carried by the offending deposit receipt.
    pub actual: u64,
    /// Index required at this position.
    pub expected: u64,
}

/// Validates that a block's deposit receipts carry contiguous indices.
///
/// Deposited value is debited by the deposit contract while the enclosing
/// transaction executes, so there is nothing to credit here; the record list must
/// still be well-formed before it is surfaced to the consensus layer.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct MainnetDepositsProcessor;

impl<W: MutableWorldState> DepositsProcessor<W> for MainnetDepositsProcessor {
    fn process_deposits(
        &self,
        deposits: &[DepositRequest],
        _updater: &mut W::Updater<'_>,
    ) -> Result<(), SubProcessorError> {
        for pair in deposits.windows(2) {
            let expected = pair[0].index + 1;
            if pair[1].index != expected {
                return Err(Box::new(DepositIndexError { actual: pair[1].index, expected }));
            }
        }
        Ok(())
    }
}

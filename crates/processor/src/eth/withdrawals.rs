//! Mainnet withdrawal application.

use crate::{
    schedule::{SubProcessorError, WithdrawalsProcessor},
    state::{MutableWorldState, WorldUpdater},
};
use alloy_eips::eip4895::Withdrawal;

/// Credits each withdrawal's address with its amount, converted from gwei to wei.
///
/// Zero-valued withdrawals are filtered out.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct MainnetWithdrawalsProcessor;

impl<W: MutableWorldState> WithdrawalsProcessor<W> for MainnetWithdrawalsProcessor {
    fn process_withdrawals(
        &self,
        withdrawals: &[Withdrawal],
        updater: &mut W::Updater<'_>,
    ) -> Result<(), SubProcessorError> {
        for withdrawal in withdrawals {
            if withdrawal.amount > 0 {
                updater.increment_balance(withdrawal.address, withdrawal.amount_wei());
            }
        }
        Ok(())
    }
}

//! Receipt construction.

use crate::{state::MutableWorldState, transaction::TransactionExecutionData};
use alloy_consensus::{Eip658Value, Receipt, ReceiptEnvelope, TxType};
use alloy_eips::Typed2718;

/// Context handed to the receipt factory for one executed transaction.
#[derive(derive_more::Debug)]
pub struct ReceiptFactoryCtx<'a, T, W> {
    /// The executed transaction.
    #[debug(skip)]
    pub tx: &'a T,
    /// Execution outcome of the transaction.
    pub result: &'a TransactionExecutionData,
    /// World state after the transaction's changes were committed.
    #[debug(skip)]
    pub state: &'a W,
    /// Gas used by the block up to and including this transaction.
    pub cumulative_gas_used: u64,
}

/// Builds one receipt per executed transaction.
///
/// The block processor guarantees that `cumulative_gas_used` is the running total
/// over the receipts built so far; everything else about the receipt's content is
/// up to the factory.
pub trait ReceiptFactory<T> {
    /// Receipt type produced.
    type Receipt;

    /// Builds the receipt for the transaction described by `ctx`.
    fn build_receipt<W: MutableWorldState>(
        &self,
        ctx: ReceiptFactoryCtx<'_, T, W>,
    ) -> Self::Receipt;
}

/// Factory producing typed mainnet receipt envelopes with blooms.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct MainnetReceiptFactory;

impl<T: Typed2718> ReceiptFactory<T> for MainnetReceiptFactory {
    type Receipt = ReceiptEnvelope;

    fn build_receipt<W: MutableWorldState>(
        &self,
        ctx: ReceiptFactoryCtx<'_, T, W>,
    ) -> ReceiptEnvelope {
        let receipt = Receipt {
            status: Eip658Value::Eip658(ctx.result.successful),
            cumulative_gas_used: ctx.cumulative_gas_used,
            logs: ctx.result.logs.clone(),
        }
        .with_bloom();

        match TxType::try_from(ctx.tx.ty()).unwrap_or(TxType::Legacy) {
            TxType::Legacy => ReceiptEnvelope::Legacy(receipt),
            TxType::Eip2930 => ReceiptEnvelope::Eip2930(receipt),
            TxType::Eip1559 => ReceiptEnvelope::Eip1559(receipt),
            TxType::Eip4844 => ReceiptEnvelope::Eip4844(receipt),
            TxType::Eip7702 => ReceiptEnvelope::Eip7702(receipt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SnapshotWorldState;
    use alloc::vec;
    use alloy_consensus::TxReceipt;
    use alloy_primitives::{address, Bytes, Log, LogData};

    struct TypeOnly(u8);

    impl Typed2718 for TypeOnly {
        fn ty(&self) -> u8 {
            self.0
        }
    }

    fn execution_data(successful: bool, logs: alloc::vec::Vec<Log>) -> TransactionExecutionData {
        TransactionExecutionData { successful, gas_remaining: 0, logs, output: Bytes::new() }
    }

    #[test]
    fn carries_cumulative_gas_and_status() {
        let state = SnapshotWorldState::new();
        let data = execution_data(true, vec![]);
        let receipt = MainnetReceiptFactory.build_receipt(ReceiptFactoryCtx {
            tx: &TypeOnly(2),
            result: &data,
            state: &state,
            cumulative_gas_used: 42_000,
        });

        assert!(matches!(receipt, ReceiptEnvelope::Eip1559(_)));
        assert_eq!(receipt.cumulative_gas_used(), 42_000);
        assert!(receipt.status());
    }

    #[test]
    fn reverted_execution_yields_failed_receipt_with_bloom() {
        let state = SnapshotWorldState::new();
        let log = Log {
            address: address!("0x00000000000000000000000000000000000000aa"),
            data: LogData::new_unchecked(vec![], Bytes::new()),
        };
        let data = execution_data(false, vec![log]);
        let receipt = MainnetReceiptFactory.build_receipt(ReceiptFactoryCtx {
            tx: &TypeOnly(0),
            result: &data,
            state: &state,
            cumulative_gas_used: 21_000,
        });

        assert!(matches!(receipt, ReceiptEnvelope::Legacy(_)));
        assert!(!receipt.status());
        assert_eq!(receipt.logs().len(), 1);
        assert!(!receipt.bloom().is_zero());
    }
}

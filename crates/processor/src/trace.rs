//! Execution observers handed to the transaction processor.

use crate::transaction::TransactionExecutionData;
use alloy_primitives::B256;
use auto_impl::auto_impl;

/// Observes transaction execution inside the block processor.
///
/// The block import path always runs with [`NoTracing`]; richer tracers belong to
/// simulation and debug endpoints.
#[auto_impl(&mut, Box)]
pub trait OperationTracer {
    /// Called right before a transaction is handed to the EVM.
    fn trace_start_transaction(&mut self, _tx_hash: B256) {}

    /// Called with the outcome of an executed transaction.
    fn trace_end_transaction(&mut self, _tx_hash: B256, _result: &TransactionExecutionData) {}
}

/// Tracer that records nothing.
#[derive(Debug, Clone, Copy, Default)]
#[non_exhaustive]
pub struct NoTracing;

impl OperationTracer for NoTracing {}

//! Ethereum mainnet block processor.

use crate::{
    block::{
        BlockProcessingError, BlockProcessingInputs, BlockProcessingOutput, BlockProcessor,
        BlockValidationError, InternalProcessingError, MiningBeneficiaryCalculator, RewardPolicy,
    },
    chain::{BlockHashLookup, ChainView},
    eth::receipt_builder::{ReceiptFactory, ReceiptFactoryCtx},
    schedule::{DepositsProcessor, HeaderProtocolSchedule, WithdrawalsProcessor},
    state::{MutableWorldState, StateError, WorldUpdater},
    trace::NoTracing,
    transaction::{TransactionProcessingResult, TransactionProcessor, TransactionValidationParams},
};
use alloc::vec::Vec;
use alloy_consensus::Transaction;
use alloy_eips::Encodable2718;
use tracing::{info, trace, warn};

/// Block processor for Ethereum mainnet and its forks.
///
/// Holds only immutable policy: the transaction processor, receipt factory,
/// beneficiary calculator, protocol schedule, and reward policy it is constructed
/// with. Per-block state lives on the stack of
/// [`process_block`](BlockProcessor::process_block), so a single instance can
/// serve concurrent imports as long as each call owns its world state.
pub struct MainnetBlockProcessor<P, F, S, B, RP> {
    transaction_processor: P,
    receipt_factory: F,
    beneficiary_calculator: B,
    protocol_schedule: S,
    reward_policy: RP,
    skip_zero_block_rewards: bool,
}

impl<P, F, S, B, RP> MainnetBlockProcessor<P, F, S, B, RP> {
    /// Creates a new [`MainnetBlockProcessor`].
    pub const fn new(
        transaction_processor: P,
        receipt_factory: F,
        beneficiary_calculator: B,
        protocol_schedule: S,
        reward_policy: RP,
        skip_zero_block_rewards: bool,
    ) -> Self {
        Self {
            transaction_processor,
            receipt_factory,
            beneficiary_calculator,
            protocol_schedule,
            reward_policy,
            skip_zero_block_rewards,
        }
    }
}

impl<P, F, S, B, RP> core::fmt::Debug for MainnetBlockProcessor<P, F, S, B, RP> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MainnetBlockProcessor")
            .field("skip_zero_block_rewards", &self.skip_zero_block_rewards)
            .finish_non_exhaustive()
    }
}

impl<W, P, F, S, B, RP> BlockProcessor<W> for MainnetBlockProcessor<P, F, S, B, RP>
where
    W: MutableWorldState,
    P: TransactionProcessor<W, Transaction: Transaction + Encodable2718>,
    F: ReceiptFactory<P::Transaction>,
    S: HeaderProtocolSchedule<W>,
    B: MiningBeneficiaryCalculator,
    RP: RewardPolicy<W>,
{
    type Transaction = P::Transaction;
    type Receipt = F::Receipt;
    type Metadata = P::Metadata;

    fn process_block(
        &self,
        chain: &dyn ChainView,
        state: &mut W,
        inputs: BlockProcessingInputs<'_, Self::Transaction, Self::Metadata>,
    ) -> Result<BlockProcessingOutput<Self::Receipt>, BlockProcessingError> {
        let BlockProcessingInputs {
            header,
            transactions,
            ommers,
            withdrawals,
            deposits,
            private_metadata,
        } = inputs;

        let mut receipts = Vec::with_capacity(transactions.len());
        let mut cumulative_gas_used = 0u64;
        let mut tracer = NoTracing;

        for tx in transactions {
            // The sum of the transaction's gas limit and the gas utilized in this
            // block prior must be no greater than the block's gas limit.
            let block_available_gas = header.gas_limit - cumulative_gas_used;
            if tx.gas_limit() > block_available_gas {
                info!(
                    target: "processor",
                    transaction_gas_limit = tx.gas_limit(),
                    block_available_gas,
                    "Transaction gas limit exceeds available block budget"
                );
                return Err(reject(
                    state,
                    BlockValidationError::GasBudgetExceeded {
                        transaction_gas_limit: tx.gas_limit(),
                        block_available_gas,
                    }
                    .into(),
                ));
            }

            let beneficiary = self.beneficiary_calculator.calculate_beneficiary(header);
            let block_hashes = BlockHashLookup::new(header, chain);

            let mut updater = state.updater();
            let result = self.transaction_processor.process_transaction(
                chain,
                &mut updater,
                header,
                tx,
                beneficiary,
                &mut tracer,
                &block_hashes,
                true,
                TransactionValidationParams::processing_block(),
                private_metadata,
            );

            match result {
                TransactionProcessingResult::Invalid { reason } => {
                    let block_hash = header.hash_slow();
                    let tx_hash = tx.trie_hash();
                    info!(
                        target: "processor",
                        %block_hash,
                        %tx_hash,
                        %reason,
                        "Block processing error: transaction invalid"
                    );
                    drop(updater);
                    return Err(reject(
                        state,
                        BlockValidationError::TransactionInvalid { block_hash, tx_hash, reason }
                            .into(),
                    ));
                }
                TransactionProcessingResult::Executed(data) => {
                    updater.commit();
                    cumulative_gas_used += tx.gas_limit() - data.gas_remaining;
                    receipts.push(self.receipt_factory.build_receipt(ReceiptFactoryCtx {
                        tx,
                        result: &data,
                        state: &*state,
                        cumulative_gas_used,
                    }));
                }
            }
        }

        let fork_spec = self.protocol_schedule.by_block_header(header);

        if let (Some(processor), Some(withdrawals)) =
            (fork_spec.withdrawals_processor, withdrawals)
        {
            let mut updater = state.updater();
            match processor.process_withdrawals(withdrawals.as_slice(), &mut updater) {
                Ok(()) => updater.commit(),
                Err(error) => {
                    warn!(target: "processor", %error, "Failed to process withdrawals");
                    drop(updater);
                    return Err(reject(state, InternalProcessingError::Withdrawals(error).into()));
                }
            }
        } else if withdrawals.is_some() {
            trace!(target: "processor", "Withdrawal list supplied before activation, ignored");
        }

        if let (Some(processor), Some(deposits)) = (fork_spec.deposits_processor, deposits) {
            let mut updater = state.updater();
            match processor.process_deposits(deposits, &mut updater) {
                Ok(()) => updater.commit(),
                Err(error) => {
                    warn!(target: "processor", %error, "Failed to process deposits");
                    drop(updater);
                    return Err(reject(state, InternalProcessingError::Deposits(error).into()));
                }
            }
        } else if deposits.is_some() {
            trace!(target: "processor", "Deposit list supplied before activation, ignored");
        }

        if !self.reward_policy.reward_coinbase(
            state,
            header,
            ommers,
            self.skip_zero_block_rewards,
        ) {
            info!(
                target: "processor",
                block_hash = %header.hash_slow(),
                "Failed to reward coinbase: ommer too old"
            );
            return Err(reject(state, BlockValidationError::OmmerTooOld.into()));
        }

        if let Err(error) = state.persist(header) {
            return Err(match error {
                StateError::Corruption(error) => {
                    warn!(
                        target: "processor",
                        %error,
                        "World state corruption while persisting block"
                    );
                    reject(state, BlockProcessingError::StorageCorruption(error))
                }
                StateError::Other(error) => {
                    reject(state, InternalProcessingError::Persistence(error).into())
                }
            });
        }

        Ok(BlockProcessingOutput { receipts, gas_used: cumulative_gas_used })
    }
}

/// Rewinds a rollback-capable state and passes the failure through.
///
/// States without rollback support are left as they are; the caller is expected to
/// discard them after a failed import.
fn reject<W: MutableWorldState>(state: &mut W, error: BlockProcessingError) -> BlockProcessingError {
    if state.supports_rollback() {
        state.reset();
    }
    error
}

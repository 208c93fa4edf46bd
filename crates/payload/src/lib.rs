#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;
use alloy_eips::{eip4895::Withdrawal, eip6110::DepositRequest};
use alloy_primitives::{Address, Bloom, Bytes, B256, U256, U64};
use serde::{Deserialize, Serialize};

/// Result object of `engine_getPayload`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPayloadResponse {
    /// The built execution payload.
    pub execution_payload: ExecutionPayload,
    /// Expected fee revenue of the payload's beneficiary, in wei.
    pub block_value: U256,
}

/// Execution payload of a built block.
///
/// Field order is part of the wire contract and must not be rearranged. Optional
/// fields serialize as `null`, never as an empty array, when absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPayload {
    /// Hash of the built block.
    pub block_hash: B256,
    /// Hash of the parent block.
    pub parent_hash: B256,
    /// Beneficiary of the block's fees.
    pub fee_recipient: Address,
    /// State root after executing the block.
    pub state_root: B256,
    /// Root of the block's receipts trie.
    pub receipts_root: B256,
    /// Accumulated logs bloom over all receipts.
    pub logs_bloom: Bloom,
    /// Post-merge randomness value, absent before the merge.
    #[serde(default)]
    pub prev_randao: Option<B256>,
    /// Block number.
    pub block_number: U64,
    /// Block gas limit.
    pub gas_limit: U64,
    /// Gas used by the block.
    pub gas_used: U64,
    /// Block timestamp.
    pub timestamp: U64,
    /// Arbitrary extra data committed by the block builder.
    pub extra_data: Bytes,
    /// EIP-1559 base fee, absent before London.
    #[serde(default)]
    pub base_fee_per_gas: Option<U256>,
    /// Enveloped transactions, one hex string each.
    pub transactions: Vec<Bytes>,
    /// Withdrawal list, `null` before Shanghai.
    #[serde(default)]
    pub withdrawals: Option<Vec<Withdrawal>>,
    /// Deposit receipts, `null` before their activating fork.
    #[serde(default)]
    pub deposits: Option<Vec<DepositRequest>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::String, vec};
    use alloy_primitives::{address, b256};

    fn payload() -> ExecutionPayload {
        ExecutionPayload {
            block_hash: b256!("0x1111111111111111111111111111111111111111111111111111111111111111"),
            parent_hash: b256!("0x2222222222222222222222222222222222222222222222222222222222222222"),
            fee_recipient: address!("0x00000000000000000000000000000000000000cc"),
            state_root: B256::ZERO,
            receipts_root: B256::ZERO,
            logs_bloom: Bloom::ZERO,
            prev_randao: None,
            block_number: U64::from(1),
            gas_limit: U64::from(30_000_000),
            gas_used: U64::from(21_000),
            timestamp: U64::from(0x1234),
            extra_data: Bytes::new(),
            base_fee_per_gas: None,
            transactions: vec![],
            withdrawals: None,
            deposits: None,
        }
    }

    fn key_positions(json: &str, keys: &[&str]) -> Vec<usize> {
        keys.iter()
            .map(|key| {
                let mut needle = String::from("\"");
                needle.push_str(key);
                needle.push('"');
                json.find(&needle).unwrap_or_else(|| panic!("missing key {key}"))
            })
            .collect()
    }

    #[test]
    fn field_order_is_fixed() {
        let json = serde_json::to_string(&payload()).unwrap();
        let positions = key_positions(
            &json,
            &[
                "blockHash",
                "parentHash",
                "feeRecipient",
                "stateRoot",
                "receiptsRoot",
                "logsBloom",
                "prevRandao",
                "blockNumber",
                "gasLimit",
                "gasUsed",
                "timestamp",
                "extraData",
                "baseFeePerGas",
                "transactions",
                "withdrawals",
                "deposits",
            ],
        );
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "field order drifted: {json}");
    }

    #[test]
    fn absent_fields_serialize_as_null_not_empty() {
        let json = serde_json::to_string(&payload()).unwrap();
        assert!(json.contains("\"prevRandao\":null"));
        assert!(json.contains("\"baseFeePerGas\":null"));
        assert!(json.contains("\"withdrawals\":null"));
        assert!(json.contains("\"deposits\":null"));
        assert!(json.contains("\"transactions\":[]"));
    }

    #[test]
    fn quantities_are_minimal_hex() {
        let json = serde_json::to_string(&payload()).unwrap();
        assert!(json.contains("\"blockNumber\":\"0x1\""));
        assert!(json.contains("\"gasLimit\":\"0x1c9c380\""));
        assert!(json.contains("\"gasUsed\":\"0x5208\""));
        assert!(json.contains("\"timestamp\":\"0x1234\""));
    }

    #[test]
    fn withdrawals_serialize_with_engine_field_names() {
        let mut payload = payload();
        payload.withdrawals = Some(vec![Withdrawal {
            index: 0,
            validator_index: 7,
            address: address!("0x00000000000000000000000000000000000000aa"),
            amount: 1,
        }]);
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"validatorIndex\":\"0x7\""));
        assert!(json.contains("\"amount\":\"0x1\""));
    }

    #[test]
    fn response_round_trips() {
        let response = GetPayloadResponse {
            execution_payload: payload(),
            block_value: U256::from(123_456u64),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.starts_with("{\"executionPayload\":"));
        assert!(json.contains("\"blockValue\":\"0x1e240\""));

        let decoded: GetPayloadResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, response);
    }
}

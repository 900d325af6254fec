use crate::model::NormalizedTransfer;
use crate::model::RawTransfer;
use crate::model::transfer::EvmTransfer;
use crate::model::transfer::SvmTransfer;

/// Test fixtures for creating consistent test data
pub struct TestFixtures;

impl TestFixtures {
    /// EVM record whose fields are all derived from `n`, so distinct `n`
    /// means distinct ids
    pub fn evm_transfer_record(
        n: usize,
        value: &str,
        block_num: u64,
    ) -> EvmTransfer {
        EvmTransfer {
            from: format!("0xfrom{n}"),
            to: format!("0xto{n}"),
            value: Some(value.to_string()),
            log_index: n as u64,
            transaction_id: format!("0xtx{n}"),
            block_num,
            contract: Some("0xdAC17F958D2ee523a2206206994597C13D831ec7".to_string()),
        }
    }

    pub fn evm_transfer(
        n: usize,
        value: &str,
        block_num: u64,
    ) -> RawTransfer {
        RawTransfer::Evm(Self::evm_transfer_record(n, value, block_num))
    }

    pub fn svm_transfer_record(
        n: usize,
        value: &str,
        block_num: u64,
    ) -> SvmTransfer {
        SvmTransfer {
            source: format!("source-{n}"),
            destination: format!("destination-{n}"),
            value: Some(value.to_string()),
            block_num,
            signature: format!("signature-{n}"),
            mint: Some("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v".to_string()),
        }
    }

    pub fn svm_transfer(
        n: usize,
        value: &str,
        block_num: u64,
    ) -> RawTransfer {
        RawTransfer::Svm(Self::svm_transfer_record(n, value, block_num))
    }

    /// `count` valid records numbered from `start`, block = `first_block + i`
    pub fn evm_page(
        start: usize,
        count: usize,
        first_block: u64,
    ) -> Vec<RawTransfer> {
        (start..start + count)
            .map(|n| Self::evm_transfer(n, &(n + 1).to_string(), first_block + n as u64))
            .collect()
    }

    pub fn normalized(
        id: &str,
        value: &str,
        block_number: u64,
    ) -> NormalizedTransfer {
        NormalizedTransfer {
            id: id.to_string(),
            txid: format!("tx-{id}"),
            block_number,
            from: format!("from-{id}"),
            to: format!("to-{id}"),
            value: value.to_string(),
        }
    }
}

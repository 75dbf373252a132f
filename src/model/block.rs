//! The contract with the surrounding chain's block type
//!
//! Blocks, transactions and chain linking live outside this crate. All the
//! tree builder needs from a block is its transaction payloads, in order.

/// Anything that can hand out the ordered raw payloads of its transactions
pub trait TransactionPayloads {
    /// Payload bytes of every transaction, in block order
    fn transaction_payloads(&self) -> Vec<&[u8]>;
}

impl TransactionPayloads for [Vec<u8>] {
    fn transaction_payloads(&self) -> Vec<&[u8]> {
        self.iter().map(Vec::as_slice).collect()
    }
}

impl TransactionPayloads for Vec<Vec<u8>> {
    fn transaction_payloads(&self) -> Vec<&[u8]> {
        self.as_slice().transaction_payloads()
    }
}

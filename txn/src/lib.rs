// Copyright (c) 2022-2023 Hedera Hashgraph, LLC

//! Canonical Hedera transaction encoding for device review.
//!
//! Builds deterministic transaction-body payloads from typed parameters:
//! the byte layout the encoder emits determines exactly which screens the
//! device renders, so field presence and order must be reproducible to the
//! byte. The device is the only consumer of this encoding; nothing here
//! decodes it back.

pub mod builder;
pub mod proto;
pub mod review;

pub use builder::{TransactionBuilder, MAX_MEMO_SIZE};
pub use proto::{AccountId, Data, TokenId, TransactionBody};
pub use review::{review_advances, KEY_CONFIRM_ADVANCES};

/// Errors raised while assembling a transaction, before any transmission
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    /// Memo exceeds the firmware's decode buffer
    #[error("memo length {0} exceeds {MAX_MEMO_SIZE} bytes")]
    MemoTooLong(usize),

    /// Transfer list shape the device cannot render
    #[error("unsupported transfer list shape")]
    UnsupportedTransferShape,

    /// No transaction-kind payload populated
    #[error("transaction body has no kind payload")]
    MissingPayload,
}

// Copyright (c) 2022-2023 Hedera Hashgraph, LLC

use core::fmt::Debug;
use std::fmt::Display;

use ledger_hedera_apdu::{ApduError, StatusWord};
use ledger_hedera_txn::EncodeError;
use tokio::time::error::Elapsed;

/// Hedera Ledger API error type.
///
/// A device-reported user rejection (status word `0x6985`) is an expected
/// result value, not an error; it is returned to callers inside a
/// [`Response`](ledger_hedera_apdu::Response).
#[derive(Debug, thiserror::Error)]
pub enum Error<E: Display + Debug> {
    /// Link-level transport failure
    #[error("transport error: {0}")]
    Transport(E),

    /// Malformed or truncated wire data
    #[error(transparent)]
    Apdu(#[from] ApduError),

    /// Transaction not representable; raised before transmission
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// Timeout waiting for a device response
    #[error("timeout waiting for device response")]
    RequestTimeout,

    /// Timeout waiting for user interaction
    #[error("timeout waiting for user interaction")]
    UserTimeout,

    /// Device-reported failure other than user rejection
    #[error("device error: {0}")]
    Device(StatusWord),

    /// Response shape did not match the issued instruction
    #[error("unexpected response for instruction")]
    UnexpectedResponse,

    /// Screen-stepping collaborator failed
    #[error("screen driver error: {0}")]
    Screen(String),
}

impl<E: Display + Debug> From<Elapsed> for Error<E> {
    fn from(_: Elapsed) -> Self {
        Error::RequestTimeout
    }
}

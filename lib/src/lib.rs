// Copyright (c) 2022-2023 Hedera Hashgraph, LLC

//! Hedera Ledger API library
//!
//! Drives the Hedera signing app over an APDU link: key retrieval, app
//! configuration, and transaction signing, with the on-device confirm /
//! reject flow modelled as an explicit exchange state machine.
//!
//! The device link is strictly sequential: one command outstanding at a
//! time, and an interactive exchange holds exclusive use of the link (a
//! [`PendingExchange`] mutably borrows the client) until it completes.

/// Re-export `ledger-hedera-apdu` for consumers
pub use ledger_hedera_apdu::{self as apdu};

/// Re-export `ledger-hedera-txn` for consumers
pub use ledger_hedera_txn::{self as txn};

pub mod transport;
pub use transport::{TcpTransport, Transport};

mod client;
pub use client::{AppConfig, HederaClient};

mod error;
pub use error::Error;

mod interaction;
pub use interaction::{ExchangeState, PendingExchange, ScreenDriver};

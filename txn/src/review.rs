// Copyright (c) 2022-2023 Hedera Hashgraph, LLC

//! On-device review flow model.
//!
//! The number of screens the device renders for a transaction is a pure
//! function of which fields are populated, so the advance count a driver
//! must perform is computable ahead of transmission.

use crate::proto::{Data, TransactionBody};
use crate::EncodeError;

/// Advances required to reach the approval action on a plain
/// key-confirmation screen
pub const KEY_CONFIRM_ADVANCES: usize = 1;

/// Advance actions required to move from the summary screen to the
/// confirmation screen for `body`.
///
/// Flows render: summary, operator, then per-kind fields, then fee and
/// memo. Create/update/transfer kinds show sender and recipient (or stake
/// target and reward choice) screens; token associate/dissociate/mint/burn
/// skip the recipient screen; the zero-amount single-entry transfer is an
/// account verification that shows only the account.
pub fn review_advances(body: &TransactionBody) -> Result<usize, EncodeError> {
    let data = body.data.as_ref().ok_or(EncodeError::MissingPayload)?;

    let n = match data {
        Data::CryptoCreateAccount(_) | Data::CryptoUpdateAccount(_) => 7,
        Data::CryptoTransfer(t) => {
            let is_verify = t.token_transfers.is_empty()
                && t.transfers
                    .as_ref()
                    .map(|l| l.account_amounts.len() == 1 && l.account_amounts[0].amount == 0)
                    .unwrap_or(false);
            if is_verify {
                2
            } else {
                7
            }
        }
        Data::TokenAssociate(_)
        | Data::TokenDissociate(_)
        | Data::TokenMint(_)
        | Data::TokenBurn(_) => 6,
    };

    Ok(n)
}

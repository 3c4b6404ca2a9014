// Copyright (c) 2022-2023 Hedera Hashgraph, LLC

//! Canonical transaction assembly.
//!
//! The builder fills the envelope fields the signing app expects and takes
//! exactly one kind payload; representability is checked here, before any
//! bytes reach the device.

use prost::Message;

use crate::proto::*;
use crate::EncodeError;

/// Longest memo the firmware will decode
pub const MAX_MEMO_SIZE: usize = 100;

/// Builder for a [`TransactionBody`] with exactly one kind payload
#[derive(Clone, Debug, Default)]
pub struct TransactionBuilder {
    operator: AccountId,
    fee: u64,
    memo: String,
}

impl TransactionBuilder {
    /// Start a transaction issued by `operator`
    pub fn new(operator: AccountId) -> Self {
        Self {
            operator,
            fee: 0,
            memo: String::new(),
        }
    }

    /// Maximum transaction fee, in tinybar
    pub fn fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self
    }

    /// UTF-8 transaction memo
    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Attach the kind payload and produce the immutable body.
    ///
    /// Fails before transmission if a field is not representable on-device.
    pub fn build(self, data: Data) -> Result<TransactionBody, EncodeError> {
        if self.memo.len() > MAX_MEMO_SIZE {
            return Err(EncodeError::MemoTooLong(self.memo.len()));
        }

        if let Data::CryptoTransfer(ref t) = data {
            check_transfer_shape(t)?;
        }

        Ok(TransactionBody {
            transaction_id: Some(TransactionId {
                transaction_valid_start: None,
                account_id: Some(self.operator),
            }),
            node_account_id: None,
            transaction_fee: self.fee,
            transaction_valid_duration: None,
            memo: self.memo,
            data: Some(data),
        })
    }
}

/// The device renders at most two hbar entries, or one two-entry token
/// list; a lone zero-amount hbar entry is the account-verification form.
fn check_transfer_shape(t: &CryptoTransferTransactionBody) -> Result<(), EncodeError> {
    let hbar_entries = t.transfers.as_ref().map(|l| l.account_amounts.len()).unwrap_or(0);

    match (hbar_entries, t.token_transfers.len()) {
        // Account verification: single zero-amount entry
        (1, 0) => {
            let amount = t
                .transfers
                .as_ref()
                .and_then(|l| l.account_amounts.first())
                .map(|a| a.amount)
                .unwrap_or(0);
            if amount != 0 {
                return Err(EncodeError::UnsupportedTransferShape);
            }
        }
        // Plain hbar transfer
        (2, 0) => (),
        // Single token transfer list of two entries
        (0, 1) => {
            if t.token_transfers[0].transfers.len() != 2 {
                return Err(EncodeError::UnsupportedTransferShape);
            }
        }
        _ => return Err(EncodeError::UnsupportedTransferShape),
    }

    Ok(())
}

impl TransactionBody {
    /// Canonical byte encoding consumed by the device.
    ///
    /// Deterministic: fields are emitted in tag order, and absent optional
    /// fields (and default-valued scalars) are omitted entirely.
    pub fn encode_to_bytes(&self) -> Vec<u8> {
        self.encode_to_vec()
    }
}

/// Hbar movements in caller order; entries are `(account, amount)` with
/// debits negative. Order is preserved verbatim.
pub fn transfer(entries: impl IntoIterator<Item = (AccountId, i64)>) -> Data {
    Data::CryptoTransfer(CryptoTransferTransactionBody {
        transfers: Some(TransferList {
            account_amounts: entries
                .into_iter()
                .map(|(account, amount)| AccountAmount {
                    account_id: Some(account),
                    amount,
                })
                .collect(),
        }),
        token_transfers: vec![],
    })
}

/// Movements of one token type in caller order, plus the decimal count the
/// device should display amounts with.
pub fn token_transfer(
    token: TokenId,
    entries: impl IntoIterator<Item = (AccountId, i64)>,
    decimals: u32,
) -> Data {
    Data::CryptoTransfer(CryptoTransferTransactionBody {
        // The token form still carries an (empty) hbar transfer list
        transfers: Some(TransferList {
            account_amounts: vec![],
        }),
        token_transfers: vec![TokenTransferList {
            token: Some(token),
            transfers: entries
                .into_iter()
                .map(|(account, amount)| AccountAmount {
                    account_id: Some(account),
                    amount,
                })
                .collect(),
            expected_decimals: Some(UInt32Value { value: decimals }),
        }],
    })
}

/// Account-ownership confirmation: a single zero-amount entry
pub fn account_verify(account: AccountId) -> Data {
    Data::CryptoTransfer(CryptoTransferTransactionBody {
        transfers: Some(TransferList {
            account_amounts: vec![AccountAmount {
                account_id: Some(account),
                amount: 0,
            }],
        }),
        token_transfers: vec![],
    })
}

/// New account controlled by an ED25519 public key.
///
/// Staking and threshold fields default to unset; set them on the body
/// before wrapping when needed.
pub fn create_account(public_key: impl Into<Vec<u8>>, initial_balance: u64) -> Data {
    Data::CryptoCreateAccount(CryptoCreateTransactionBody {
        key: Some(Key {
            key: Some(key::Key::Ed25519(public_key.into())),
        }),
        initial_balance,
        ..Default::default()
    })
}

/// Re-target an existing account's staking choice
pub fn update_account(account: AccountId, staked_id: UpdateStakedId) -> Data {
    Data::CryptoUpdateAccount(CryptoUpdateTransactionBody {
        account_id_to_update: Some(account),
        staked_id: Some(staked_id),
        ..Default::default()
    })
}

pub fn token_associate(account: AccountId, tokens: impl IntoIterator<Item = TokenId>) -> Data {
    Data::TokenAssociate(TokenAssociateTransactionBody {
        account: Some(account),
        tokens: tokens.into_iter().collect(),
    })
}

pub fn token_dissociate(account: AccountId, tokens: impl IntoIterator<Item = TokenId>) -> Data {
    Data::TokenDissociate(TokenDissociateTransactionBody {
        account: Some(account),
        tokens: tokens.into_iter().collect(),
    })
}

pub fn token_mint(token: TokenId, amount: u64) -> Data {
    Data::TokenMint(TokenMintTransactionBody {
        token: Some(token),
        amount,
    })
}

pub fn token_burn(token: TokenId, amount: u64) -> Data {
    Data::TokenBurn(TokenBurnTransactionBody {
        token: Some(token),
        amount,
    })
}

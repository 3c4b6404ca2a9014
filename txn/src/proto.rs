// Copyright (c) 2022-2023 Hedera Hashgraph, LLC

//! Hedera schema message types consumed by the signing app.
//!
//! Hand-written `prost` messages matching the proto definitions the device
//! firmware parses. Field numbers follow the Hedera services schema; the
//! encoder populates these types but never decodes its own output.

/// Three-part hierarchical address of a ledger account
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct AccountId {
    #[prost(uint64, tag = "1")]
    pub shard_num: u64,
    #[prost(uint64, tag = "2")]
    pub realm_num: u64,
    #[prost(uint64, tag = "3")]
    pub account_num: u64,
}

impl AccountId {
    pub fn new(shard_num: u64, realm_num: u64, account_num: u64) -> Self {
        Self {
            shard_num,
            realm_num,
            account_num,
        }
    }
}

/// Three-part hierarchical address of a token type
#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct TokenId {
    #[prost(uint64, tag = "1")]
    pub shard_num: u64,
    #[prost(uint64, tag = "2")]
    pub realm_num: u64,
    #[prost(uint64, tag = "3")]
    pub token_num: u64,
}

impl TokenId {
    pub fn new(shard_num: u64, realm_num: u64, token_num: u64) -> Self {
        Self {
            shard_num,
            realm_num,
            token_num,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct Timestamp {
    #[prost(uint64, tag = "1")]
    pub seconds: u64,
    #[prost(uint32, tag = "2")]
    pub nanos: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct Duration {
    #[prost(uint64, tag = "1")]
    pub seconds: u64,
}

/// Cryptographic key; the device supports the ED25519 member only
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Key {
    #[prost(oneof = "key::Key", tags = "2")]
    pub key: Option<key::Key>,
}

pub mod key {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Key {
        #[prost(bytes, tag = "2")]
        Ed25519(Vec<u8>),
    }
}

/// Transaction identifier, derived from the operator account
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct TransactionId {
    #[prost(message, optional, tag = "1")]
    pub transaction_valid_start: Option<Timestamp>,
    #[prost(message, optional, tag = "2")]
    pub account_id: Option<AccountId>,
}

/// One signed ledger movement: account plus amount (debits negative)
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct AccountAmount {
    #[prost(message, optional, tag = "1")]
    pub account_id: Option<AccountId>,
    #[prost(sint64, tag = "2")]
    pub amount: i64,
}

/// Ordered list of hbar movements; order is caller-specified and preserved
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransferList {
    #[prost(message, repeated, tag = "1")]
    pub account_amounts: Vec<AccountAmount>,
}

#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct UInt32Value {
    #[prost(uint32, tag = "1")]
    pub value: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct Int32Value {
    #[prost(int32, tag = "1")]
    pub value: i32,
}

#[derive(Clone, Copy, PartialEq, Eq, ::prost::Message)]
pub struct BoolValue {
    #[prost(bool, tag = "1")]
    pub value: bool,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct StringValue {
    #[prost(string, tag = "1")]
    pub value: String,
}

/// Ordered list of movements of a single token type
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenTransferList {
    #[prost(message, optional, tag = "1")]
    pub token: Option<TokenId>,
    #[prost(message, repeated, tag = "2")]
    pub transfers: Vec<AccountAmount>,
    #[prost(message, optional, tag = "4")]
    pub expected_decimals: Option<UInt32Value>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoCreateTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub key: Option<Key>,
    #[prost(uint64, tag = "2")]
    pub initial_balance: u64,
    #[prost(uint64, tag = "6")]
    pub send_record_threshold: u64,
    #[prost(uint64, tag = "7")]
    pub receive_record_threshold: u64,
    #[prost(bool, tag = "8")]
    pub receiver_sig_required: bool,
    #[prost(message, optional, tag = "9")]
    pub auto_renew_period: Option<Duration>,
    #[prost(string, tag = "13")]
    pub memo: String,
    #[prost(int32, tag = "14")]
    pub max_automatic_token_associations: i32,
    /// Stake to an account or to a node, never both
    #[prost(oneof = "StakedId", tags = "15, 16")]
    pub staked_id: Option<StakedId>,
    #[prost(bool, tag = "17")]
    pub decline_reward: bool,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoUpdateTransactionBody {
    #[prost(message, optional, tag = "2")]
    pub account_id_to_update: Option<AccountId>,
    #[prost(message, optional, tag = "3")]
    pub key: Option<Key>,
    #[prost(message, optional, tag = "8")]
    pub auto_renew_period: Option<Duration>,
    #[prost(message, optional, tag = "9")]
    pub expiration_time: Option<Timestamp>,
    #[prost(message, optional, tag = "14")]
    pub memo: Option<StringValue>,
    #[prost(message, optional, tag = "15")]
    pub max_automatic_token_associations: Option<Int32Value>,
    /// Stake to an account or to a node, never both
    #[prost(oneof = "UpdateStakedId", tags = "16, 17")]
    pub staked_id: Option<UpdateStakedId>,
    #[prost(message, optional, tag = "18")]
    pub decline_reward: Option<BoolValue>,
}

/// Staking choice for account creation
#[derive(Clone, PartialEq, ::prost::Oneof)]
pub enum StakedId {
    #[prost(message, tag = "15")]
    StakedAccountId(AccountId),
    #[prost(int64, tag = "16")]
    StakedNodeId(i64),
}

/// Staking choice for account update (distinct field numbers)
#[derive(Clone, PartialEq, ::prost::Oneof)]
pub enum UpdateStakedId {
    #[prost(message, tag = "16")]
    StakedAccountId(AccountId),
    #[prost(int64, tag = "17")]
    StakedNodeId(i64),
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CryptoTransferTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub transfers: Option<TransferList>,
    #[prost(message, repeated, tag = "2")]
    pub token_transfers: Vec<TokenTransferList>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenAssociateTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub account: Option<AccountId>,
    #[prost(message, repeated, tag = "2")]
    pub tokens: Vec<TokenId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TokenDissociateTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub account: Option<AccountId>,
    #[prost(message, repeated, tag = "2")]
    pub tokens: Vec<TokenId>,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct TokenMintTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub token: Option<TokenId>,
    #[prost(uint64, tag = "2")]
    pub amount: u64,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct TokenBurnTransactionBody {
    #[prost(message, optional, tag = "1")]
    pub token: Option<TokenId>,
    #[prost(uint64, tag = "2")]
    pub amount: u64,
}

/// The transaction envelope the device reviews and signs.
///
/// `data` is a closed sum over the supported transaction kinds; exactly one
/// kind is populated per transaction by construction.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionBody {
    #[prost(message, optional, tag = "1")]
    pub transaction_id: Option<TransactionId>,
    #[prost(message, optional, tag = "2")]
    pub node_account_id: Option<AccountId>,
    #[prost(uint64, tag = "3")]
    pub transaction_fee: u64,
    #[prost(message, optional, tag = "4")]
    pub transaction_valid_duration: Option<Duration>,
    #[prost(string, tag = "6")]
    pub memo: String,
    #[prost(oneof = "Data", tags = "11, 14, 15, 37, 38, 40, 41")]
    pub data: Option<Data>,
}

/// Transaction-kind payload: exactly one member per transaction
#[derive(Clone, PartialEq, ::prost::Oneof)]
pub enum Data {
    #[prost(message, tag = "11")]
    CryptoCreateAccount(CryptoCreateTransactionBody),
    #[prost(message, tag = "14")]
    CryptoTransfer(CryptoTransferTransactionBody),
    #[prost(message, tag = "15")]
    CryptoUpdateAccount(CryptoUpdateTransactionBody),
    #[prost(message, tag = "37")]
    TokenMint(TokenMintTransactionBody),
    #[prost(message, tag = "38")]
    TokenBurn(TokenBurnTransactionBody),
    #[prost(message, tag = "40")]
    TokenAssociate(TokenAssociateTransactionBody),
    #[prost(message, tag = "41")]
    TokenDissociate(TokenDissociateTransactionBody),
}

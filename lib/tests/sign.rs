// Copyright (c) 2022-2023 Hedera Hashgraph, LLC

//! Transaction signing flows against the mock device

mod helpers;

use anyhow::Result;

use ledger_hedera::apdu::{StatusWord, MAX_CHUNK_SIZE, SIGNATURE_LENGTH};
use ledger_hedera::txn::builder::{
    account_verify, create_account, token_associate, token_burn, token_dissociate, token_mint,
    token_transfer, transfer, update_account,
};
use ledger_hedera::txn::proto::{key, CryptoCreateTransactionBody, Key, UpdateStakedId};
use ledger_hedera::txn::{AccountId, Data, TokenId, TransactionBody, TransactionBuilder};
use ledger_hedera::{ExchangeState, HederaClient};

use helpers::{device_key, setup, MockDevice};

fn operator() -> AccountId {
    AccountId::new(1, 2, 3)
}

fn build(data: Data) -> TransactionBody {
    TransactionBuilder::new(operator())
        .fee(5)
        .memo("this_is_the_memo")
        .build(data)
        .unwrap()
}

#[tokio::test]
async fn sign_token_transfer() -> Result<()> {
    setup();

    let (transport, mut buttons) = MockDevice::start();
    let mut client = HederaClient::new(transport);

    let body = build(token_transfer(
        TokenId::new(15, 16, 17),
        [
            (AccountId::new(100, 101, 102), 1234567890),
            (AccountId::new(57, 58, 59), 0),
        ],
        9,
    ));

    let pending = client.sign_transaction(11095, &body).await?;
    assert_eq!(pending.state(), ExchangeState::Sent);
    assert_eq!(pending.advances_required(), 7);

    let resp = pending.approve(&mut buttons).await?;
    assert_eq!(resp.status, StatusWord::Ok);
    assert_eq!(resp.data.len(), SIGNATURE_LENGTH);
    assert_eq!(resp.data[..32], device_key(11095));

    Ok(())
}

#[tokio::test]
async fn reject_on_last_screen() -> Result<()> {
    setup();

    let (transport, mut buttons) = MockDevice::start();
    let mut client = HederaClient::new(transport);

    let body = build(transfer([
        (AccountId::new(100, 101, 102), 1234567890),
        (AccountId::new(57, 58, 59), 0),
    ]));

    let pending = client.sign_transaction(0, &body).await?;
    let resp = pending.reject(&mut buttons).await?;

    // A rejection never yields signature bytes
    assert_eq!(resp.status, StatusWord::UserRejected);
    assert!(resp.data.is_empty());

    Ok(())
}

#[tokio::test]
async fn account_verification_is_two_screens() -> Result<()> {
    setup();

    let (transport, mut buttons) = MockDevice::start();
    let mut client = HederaClient::new(transport);

    let body = build(account_verify(AccountId::new(57, 58, 59)));

    let pending = client.sign_transaction(0, &body).await?;
    assert_eq!(pending.advances_required(), 2);

    let resp = pending.approve(&mut buttons).await?;
    assert_eq!(resp.status, StatusWord::Ok);

    Ok(())
}

#[tokio::test]
async fn token_operations_are_six_screens() -> Result<()> {
    setup();

    let (transport, mut buttons) = MockDevice::start();
    let mut client = HederaClient::new(transport);

    let account = AccountId::new(100, 101, 102);
    let token = TokenId::new(57, 58, 59);

    for data in [
        token_associate(account, [token]),
        token_dissociate(account, [token]),
        token_mint(token, 7745309389),
        token_burn(token, 7745309389),
    ] {
        let body = build(data);

        let pending = client.sign_transaction(0, &body).await?;
        assert_eq!(pending.advances_required(), 6);

        let resp = pending.approve(&mut buttons).await?;
        assert_eq!(resp.status, StatusWord::Ok);
        assert_eq!(resp.data.len(), SIGNATURE_LENGTH);
    }

    Ok(())
}

#[tokio::test]
async fn sign_account_creation() -> Result<()> {
    setup();

    let (transport, mut buttons) = MockDevice::start();
    let mut client = HederaClient::new(transport);

    let body = build(create_account(device_key(0).to_vec(), 5));

    let pending = client.sign_transaction(0, &body).await?;
    assert_eq!(pending.advances_required(), 7);

    let resp = pending.approve(&mut buttons).await?;
    assert_eq!(resp.status, StatusWord::Ok);

    Ok(())
}

#[tokio::test]
async fn sign_account_update() -> Result<()> {
    setup();

    let (transport, mut buttons) = MockDevice::start();
    let mut client = HederaClient::new(transport);

    let body = build(update_account(
        AccountId::new(100, 101, 102),
        UpdateStakedId::StakedNodeId(3),
    ));

    let pending = client.sign_transaction(0, &body).await?;
    assert_eq!(pending.advances_required(), 7);

    let resp = pending.approve(&mut buttons).await?;
    assert_eq!(resp.status, StatusWord::Ok);

    Ok(())
}

#[tokio::test]
async fn oversized_payload_is_chunked() -> Result<()> {
    setup();

    let (transport, mut buttons) = MockDevice::start();
    let mut client = HederaClient::new(transport);

    // Maximum-length memos at both levels push the payload past one frame
    let body = TransactionBuilder::new(operator())
        .fee(5)
        .memo("m".repeat(100))
        .build(Data::CryptoCreateAccount(CryptoCreateTransactionBody {
            key: Some(Key {
                key: Some(key::Key::Ed25519(device_key(0).to_vec())),
            }),
            initial_balance: 5,
            memo: "n".repeat(100),
            ..Default::default()
        }))
        .unwrap();
    assert!(body.encode_to_bytes().len() > MAX_CHUNK_SIZE);

    let pending = client.sign_transaction(2294967295, &body).await?;
    let resp = pending.approve(&mut buttons).await?;

    assert_eq!(resp.status, StatusWord::Ok);
    assert_eq!(resp.data[..32], device_key(2294967295));

    Ok(())
}

#[tokio::test]
async fn manual_advances_count_toward_approval() -> Result<()> {
    setup();

    let (transport, mut buttons) = MockDevice::start();
    let mut client = HederaClient::new(transport);

    let body = build(account_verify(AccountId::new(57, 58, 59)));

    let mut pending = client.sign_transaction(0, &body).await?;
    pending.advance(&mut buttons).await?;

    assert_eq!(pending.state(), ExchangeState::AwaitingAction);
    assert_eq!(pending.advances_done(), 1);

    let resp = pending.approve(&mut buttons).await?;
    assert_eq!(resp.status, StatusWord::Ok);

    Ok(())
}

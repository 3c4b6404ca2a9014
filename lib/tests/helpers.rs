// Copyright (c) 2022-2023 Hedera Hashgraph, LLC

//! Shared test helpers: an in-process mock of the signing app.
//!
//! The mock models the firmware's observable contract only: frame
//! reassembly, the review step graph, and the accept/reject responses.
//! Screen counting is written out independently here rather than reusing
//! the library's model, so a drift between the two fails a test.

#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use anyhow::anyhow;
use async_trait::async_trait;
use prost::Message;

use ledger_hedera::apdu::{
    ApduCommand, Instruction, P2Flags, Response, StatusWord, P1_NON_CONFIRM,
};
use ledger_hedera::txn::proto::Data;
use ledger_hedera::txn::TransactionBody;
use ledger_hedera::{ScreenDriver, Transport};

/// Derivation-index / public-key pairs baked into the mock device seed
pub const KEY_FIXTURES: &[(u32, &str)] = &[
    (
        0,
        "78be747e6894ee5f965e3fb0e4c1628af2f9ae0d94dc01d9b9aab75484c3184b",
    ),
    (
        11095,
        "644ef690d394e8140fa278273913425bc83c59067a392a9e7f703ead4973caf8",
    ),
    (
        294967295,
        "02357008e57f96bb250f789c63eb3a241c1eae034d461468b76b8174a59bdc9b",
    ),
    (
        2294967295,
        "2cbd40ac0a3e25a315aed7e211fd0056127075dfa4ba1717a7a047a2030b5efb",
    ),
];

static INIT: Once = Once::new();

/// Initialise logging once per test binary
pub fn setup() {
    INIT.call_once(|| {
        let _ = simplelog::SimpleLogger::init(
            log::LevelFilter::Debug,
            simplelog::Config::default(),
        );
    });
}

/// Public key the mock device derives for an index
pub fn device_key(index: u32) -> [u8; 32] {
    let mut key = [0u8; 32];

    match KEY_FIXTURES.iter().find(|(i, _)| *i == index) {
        Some((_, k)) => key.copy_from_slice(&hex::decode(k).unwrap()),
        None => {
            // Deterministic filler for indices outside the fixture table
            let seed = index.to_le_bytes();
            for (i, b) in key.iter_mut().enumerate() {
                *b = seed[i % 4] ^ i as u8;
            }
        }
    }

    key
}

/// Deterministic stand-in for a signature over the payload
fn device_sign(index: u32) -> Vec<u8> {
    let key = device_key(index);
    let mut sig = key.to_vec();
    sig.extend(key.iter().rev());
    sig
}

/// A command mid-review: screen position and the response accept produces
struct Pending {
    confirm_at: usize,
    pos: usize,
    approve: Response,
}

#[derive(Default)]
struct MockState {
    partial: Vec<u8>,
    pending: Option<Pending>,
    queued: Option<Response>,
}

/// In-process mock device, split into its APDU port and its buttons
pub struct MockDevice;

impl MockDevice {
    pub fn start() -> (MockTransport, MockButtons) {
        let state = Arc::new(Mutex::new(MockState::default()));
        (
            MockTransport {
                state: state.clone(),
            },
            MockButtons { state },
        )
    }
}

/// APDU side of the mock device
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

/// Button side of the mock device
pub struct MockButtons {
    state: Arc<Mutex<MockState>>,
}

/// Review screens between summary and confirmation, per transaction kind.
/// Mirrors the firmware UI step graph.
fn screens(body: &TransactionBody) -> Option<usize> {
    let n = match body.data.as_ref()? {
        Data::CryptoCreateAccount(_) | Data::CryptoUpdateAccount(_) => 7,
        Data::CryptoTransfer(t) => {
            let amounts = t
                .transfers
                .as_ref()
                .map(|l| l.account_amounts.as_slice())
                .unwrap_or(&[]);
            if t.token_transfers.is_empty() && amounts.len() == 1 && amounts[0].amount == 0 {
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

    Some(n)
}

#[async_trait]
impl Transport for MockTransport {
    type Error = anyhow::Error;

    async fn send(&mut self, command: &ApduCommand) -> Result<(), Self::Error> {
        let mut s = self.state.lock().unwrap();

        match Instruction::try_from(command.ins)? {
            Instruction::GetAppConfiguration => {
                s.queued = Some(Response::new(StatusWord::Ok, vec![0x00, 0x01, 0x06, 0x00]));
            }

            Instruction::GetPublicKey => {
                let index = u32::from_le_bytes(command.data[..4].try_into()?);
                let key = device_key(index).to_vec();

                if command.p1 == P1_NON_CONFIRM {
                    s.queued = Some(Response::new(StatusWord::Ok, key));
                } else {
                    s.pending = Some(Pending {
                        confirm_at: 1,
                        pos: 0,
                        approve: Response::new(StatusWord::Ok, key),
                    });
                }
            }

            Instruction::SignTransaction => {
                s.partial.extend_from_slice(&command.data);

                // Non-final frames are acknowledged immediately
                if P2Flags::from_bits_truncate(command.p2).contains(P2Flags::MORE) {
                    s.queued = Some(Response::new(StatusWord::Ok, vec![]));
                    return Ok(());
                }

                let payload = std::mem::take(&mut s.partial);
                if payload.len() < 4 {
                    s.queued = Some(Response::new(StatusWord::MalformedApdu, vec![]));
                    return Ok(());
                }

                let index = u32::from_le_bytes(payload[..4].try_into()?);

                match TransactionBody::decode(&payload[4..]).ok().and_then(|b| screens(&b)) {
                    None => {
                        s.queued = Some(Response::new(StatusWord::MalformedApdu, vec![]));
                    }
                    Some(confirm_at) => {
                        s.pending = Some(Pending {
                            confirm_at,
                            pos: 0,
                            approve: Response::new(StatusWord::Ok, device_sign(index)),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    async fn receive(&mut self) -> Result<Response, Self::Error> {
        let mut s = self.state.lock().unwrap();
        s.queued.take().ok_or_else(|| anyhow!("no response pending"))
    }
}

#[async_trait]
impl ScreenDriver for MockButtons {
    type Error = anyhow::Error;

    async fn advance(&mut self) -> Result<(), Self::Error> {
        let mut s = self.state.lock().unwrap();
        let p = s
            .pending
            .as_mut()
            .ok_or_else(|| anyhow!("no review in progress"))?;

        // The reject screen is one past the confirmation screen
        if p.pos >= p.confirm_at + 1 {
            return Err(anyhow!("advanced past the reject screen"));
        }
        p.pos += 1;

        Ok(())
    }

    async fn accept(&mut self) -> Result<(), Self::Error> {
        let mut s = self.state.lock().unwrap();
        let p = s
            .pending
            .take()
            .ok_or_else(|| anyhow!("no review in progress"))?;

        let resp = if p.pos == p.confirm_at {
            p.approve
        } else if p.pos == p.confirm_at + 1 {
            Response::new(StatusWord::UserRejected, vec![])
        } else {
            s.pending = Some(p);
            return Err(anyhow!("accept on a non-action screen"));
        };

        s.queued = Some(resp);
        Ok(())
    }
}

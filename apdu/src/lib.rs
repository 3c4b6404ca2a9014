// Copyright (c) 2022-2023 Hedera Hashgraph, LLC

//! Protocol / APDU definitions for Hedera app communication
//!
//! This module provides the wire-level command and response encodings for
//! talking to the Hedera signing app over an APDU-style link.
//!
//! A command is a fixed five-byte header (`cla`, `ins`, `p1`, `p2`, `len`)
//! followed by an instruction-specific payload of at most [`MAX_CHUNK_SIZE`]
//! bytes per frame. A response is an arbitrary data body followed by a
//! two-byte big-endian status word.

use num_enum::{IntoPrimitive, TryFromPrimitive};

pub mod command;
pub mod response;

pub use command::ApduCommand;
pub use response::{Response, StatusWord};

/// Hedera APDU class byte
pub const HEDERA_APDU_CLA: u8 = 0xe0;

/// Hedera APDU instruction codes
#[derive(Copy, Clone, Debug, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum Instruction {
    /// Fetch app name / version / storage flags
    GetAppConfiguration = 0x01,

    /// Fetch the ED25519 public key for a derivation index
    GetPublicKey = 0x02,

    /// Sign an encoded transaction body
    SignTransaction = 0x04,
}

/// P1 value requesting on-screen confirmation before the response is produced
pub const P1_CONFIRM: u8 = 0x00;

/// P1 value for an immediate (non-interactive) response
pub const P1_NON_CONFIRM: u8 = 0x01;

bitflags::bitflags! {
    /// P2 flag bits used for multi-frame payloads
    pub struct P2Flags: u8 {
        /// This frame extends the logical payload begun by an earlier frame
        const EXTEND = 0x01;
        /// More frames follow this one
        const MORE = 0x02;
    }
}

/// Maximum payload bytes carried by a single frame
pub const MAX_CHUNK_SIZE: usize = 255;

/// Length of an ED25519 public key returned by the device
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of an ED25519 signature returned by the device
pub const SIGNATURE_LENGTH: usize = 64;

/// Wire codec errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApduError {
    /// Response shorter than the two-byte status word
    #[error("malformed response (missing status word)")]
    MalformedResponse,

    /// Payload too large to represent even with chunking
    #[error("payload length {0} not representable")]
    PayloadOverflow(usize),
}

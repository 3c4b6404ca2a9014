// Copyright (c) 2022-2023 Hedera Hashgraph, LLC

//! Response parsing and status words

use crate::ApduError;

/// Device status words, carried in the trailing two bytes of a response.
///
/// Values match `errors.h` in the signing app.
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
pub enum StatusWord {
    /// Success
    Ok,
    /// User explicitly rejected the operation on-device
    UserRejected,
    /// APDU buffer is malformed
    MalformedApdu,
    /// Instruction not recognised by the app
    UnknownInstruction,
    /// Internal app exception
    Internal,
    /// Any other device-reported word
    Other(u16),
}

impl From<u16> for StatusWord {
    fn from(value: u16) -> Self {
        match value {
            0x9000 => StatusWord::Ok,
            0x6985 => StatusWord::UserRejected,
            0x6e00 => StatusWord::MalformedApdu,
            0x6d00 => StatusWord::UnknownInstruction,
            0x6980 => StatusWord::Internal,
            other => StatusWord::Other(other),
        }
    }
}

impl From<StatusWord> for u16 {
    fn from(value: StatusWord) -> Self {
        match value {
            StatusWord::Ok => 0x9000,
            StatusWord::UserRejected => 0x6985,
            StatusWord::MalformedApdu => 0x6e00,
            StatusWord::UnknownInstruction => 0x6d00,
            StatusWord::Internal => 0x6980,
            StatusWord::Other(other) => other,
        }
    }
}

impl StatusWord {
    pub fn is_ok(&self) -> bool {
        matches!(self, StatusWord::Ok)
    }
}

/// A decoded device response: data bytes plus trailing status word
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub status: StatusWord,
    pub data: Vec<u8>,
}

impl Response {
    /// Build a response for transmission (status word appended big-endian)
    pub fn new(status: StatusWord, data: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            data: data.into(),
        }
    }

    /// Decode a raw response body.
    ///
    /// At least the two status bytes must be present.
    pub fn decode(raw: &[u8]) -> Result<Self, ApduError> {
        if raw.len() < 2 {
            return Err(ApduError::MalformedResponse);
        }

        let (data, sw) = raw.split_at(raw.len() - 2);
        let status = u16::from_be_bytes([sw[0], sw[1]]).into();

        Ok(Self {
            status,
            data: data.to_vec(),
        })
    }

    /// Encode to raw bytes (data followed by the big-endian status word)
    pub fn encode(&self) -> Vec<u8> {
        let mut buff = Vec::with_capacity(self.data.len() + 2);
        buff.extend_from_slice(&self.data);
        buff.extend_from_slice(&u16::from(self.status).to_be_bytes());
        buff
    }
}

// Copyright (c) 2022-2023 Hedera Hashgraph, LLC

//! Command framing and per-instruction command constructors

use byteorder::{ByteOrder, LittleEndian};

use crate::{
    ApduError, Instruction, HEDERA_APDU_CLA, MAX_CHUNK_SIZE, P1_CONFIRM, P1_NON_CONFIRM, P2Flags,
};

/// A single APDU command frame.
///
/// ## Encoding:
/// ```text
///  0        1        2        3        4        5
/// +--------+--------+--------+--------+--------+----------------+
/// |  CLA   |  INS   |   P1   |   P2   |  LEN   | PAYLOAD (LEN)  |
/// +--------+--------+--------+--------+--------+----------------+
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApduCommand {
    pub cla: u8,
    pub ins: u8,
    pub p1: u8,
    pub p2: u8,
    pub data: Vec<u8>,
}

impl ApduCommand {
    /// Encode this frame to raw bytes.
    ///
    /// Fails if the payload exceeds a single frame; oversized logical
    /// payloads must be split with [`ApduCommand::frames`] first.
    pub fn encode(&self) -> Result<Vec<u8>, ApduError> {
        if self.data.len() > MAX_CHUNK_SIZE {
            return Err(ApduError::PayloadOverflow(self.data.len()));
        }

        let mut buff = Vec::with_capacity(5 + self.data.len());
        buff.extend_from_slice(&[self.cla, self.ins, self.p1, self.p2, self.data.len() as u8]);
        buff.extend_from_slice(&self.data);

        Ok(buff)
    }

    /// Split a logical command into wire frames of at most
    /// [`MAX_CHUNK_SIZE`] payload bytes.
    ///
    /// Every frame except the last carries [`P2Flags::MORE`], and every
    /// frame except the first carries [`P2Flags::EXTEND`], so the device
    /// can reassemble the logical payload in arrival order. A payload that
    /// fits one frame yields a single frame with neither flag set.
    pub fn frames(&self) -> Vec<ApduCommand> {
        if self.data.len() <= MAX_CHUNK_SIZE {
            return vec![self.clone()];
        }

        let chunks: Vec<&[u8]> = self.data.chunks(MAX_CHUNK_SIZE).collect();
        let last = chunks.len() - 1;

        chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| {
                let mut p2 = P2Flags::from_bits_truncate(self.p2);
                if i > 0 {
                    p2 |= P2Flags::EXTEND;
                }
                if i < last {
                    p2 |= P2Flags::MORE;
                }

                ApduCommand {
                    cla: self.cla,
                    ins: self.ins,
                    p1: self.p1,
                    p2: p2.bits(),
                    data: chunk.to_vec(),
                }
            })
            .collect()
    }
}

impl Default for ApduCommand {
    fn default() -> Self {
        Self {
            cla: HEDERA_APDU_CLA,
            ins: 0x00,
            p1: 0x00,
            p2: 0x00,
            data: Vec::new(),
        }
    }
}

/// Command requesting app name / version / storage flags
pub fn get_app_configuration() -> ApduCommand {
    ApduCommand {
        ins: Instruction::GetAppConfiguration as u8,
        ..Default::default()
    }
}

/// Command requesting the public key for a derivation index.
///
/// `confirm` selects P1 and therefore whether the device displays a
/// key-confirmation screen before responding.
pub fn get_public_key(index: u32, confirm: bool) -> ApduCommand {
    let mut data = [0u8; 4];
    LittleEndian::write_u32(&mut data, index);

    ApduCommand {
        ins: Instruction::GetPublicKey as u8,
        p1: if confirm { P1_CONFIRM } else { P1_NON_CONFIRM },
        data: data.to_vec(),
        ..Default::default()
    }
}

/// Command requesting a signature over an encoded transaction body.
///
/// Signing is always interactive: the payload is the little-endian key
/// index followed by the canonical transaction bytes.
pub fn sign_transaction(index: u32, transaction: &[u8]) -> ApduCommand {
    let mut data = Vec::with_capacity(4 + transaction.len());
    data.extend_from_slice(&index.to_le_bytes());
    data.extend_from_slice(transaction);

    ApduCommand {
        ins: Instruction::SignTransaction as u8,
        p1: P1_CONFIRM,
        data,
        ..Default::default()
    }
}

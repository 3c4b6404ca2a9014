// Copyright (c) 2022-2023 Hedera Hashgraph, LLC

//! Transport abstraction for the device link.
//!
//! [`Transport::send`] and [`Transport::receive`] are split so an
//! interactive exchange can remain outstanding while screen actions are
//! driven out-of-band; [`Transport::exchange`] pairs them for synchronous
//! calls.

use std::io;

use async_trait::async_trait;
use core::fmt::{Debug, Display};
use log::trace;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};

use ledger_hedera_apdu::{ApduCommand, Response};

/// Device link: a single, strictly sequential command/response channel
#[async_trait]
pub trait Transport {
    type Error: Display + Debug + Send;

    /// Transmit one command frame without waiting for the response
    async fn send(&mut self, command: &ApduCommand) -> Result<(), Self::Error>;

    /// Await the response to the in-flight command
    async fn receive(&mut self) -> Result<Response, Self::Error>;

    /// Transmit a frame and await its response
    async fn exchange(&mut self, command: &ApduCommand) -> Result<Response, Self::Error> {
        self.send(command).await?;
        self.receive().await
    }
}

/// TCP transport for a speculos-hosted app.
///
/// Frames are length-prefixed with a 4-byte big-endian count; responses
/// carry the data length, the data, then the 2-byte status word.
pub struct TcpTransport {
    stream: TcpStream,
}

impl TcpTransport {
    /// Connect to a simulator APDU port (speculos default: 127.0.0.1:9999)
    pub async fn connect(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self { stream })
    }
}

#[async_trait]
impl Transport for TcpTransport {
    type Error = io::Error;

    async fn send(&mut self, command: &ApduCommand) -> Result<(), Self::Error> {
        let raw = command
            .encode()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        trace!("tx: {}", hex::encode(&raw));

        self.stream.write_all(&(raw.len() as u32).to_be_bytes()).await?;
        self.stream.write_all(&raw).await?;
        self.stream.flush().await?;

        Ok(())
    }

    async fn receive(&mut self) -> Result<Response, Self::Error> {
        let mut len = [0u8; 4];
        self.stream.read_exact(&mut len).await?;

        let n = u32::from_be_bytes(len) as usize;
        let mut raw = vec![0u8; n + 2];
        self.stream.read_exact(&mut raw).await?;

        trace!("rx: {}", hex::encode(&raw));

        Response::decode(&raw).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

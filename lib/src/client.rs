// Copyright (c) 2022-2023 Hedera Hashgraph, LLC

//! High-level device client

use core::time::Duration;

use log::debug;
use tokio::time::timeout;

use ledger_hedera_apdu::{command, ApduCommand, Response, StatusWord, PUBLIC_KEY_LENGTH};
use ledger_hedera_txn::{review_advances, TransactionBody, KEY_CONFIRM_ADVANCES};

use crate::{Error, PendingExchange, Transport};

/// Default timeout for non-interactive requests
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// Default timeout waiting for the user to act on a review flow
pub const USER_TIMEOUT: Duration = Duration::from_secs(10);

/// App name / version / storage flags reported by the device
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// Whether contract-data storage is enabled in app settings
    pub storage_allowed: bool,
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

/// Client for the Hedera signing app over a [`Transport`].
///
/// Interactive operations return a [`PendingExchange`] that mutably
/// borrows the client, so the link stays exclusive until the exchange
/// resolves.
pub struct HederaClient<T: Transport> {
    transport: T,
    request_timeout: Duration,
    user_timeout: Duration,
}

impl<T: Transport + Send> HederaClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            request_timeout: REQUEST_TIMEOUT,
            user_timeout: USER_TIMEOUT,
        }
    }

    /// Override the default request / user-action timeouts
    pub fn timeouts(mut self, request: Duration, user: Duration) -> Self {
        self.request_timeout = request;
        self.user_timeout = user;
        self
    }

    /// Fetch the app configuration
    pub async fn app_configuration(&mut self) -> Result<AppConfig, Error<T::Error>> {
        let resp = self.request(&command::get_app_configuration()).await?;
        let data = ok_data(resp)?;

        // storage flag byte, then semver triplet
        if data.len() != 4 {
            return Err(Error::UnexpectedResponse);
        }

        Ok(AppConfig {
            storage_allowed: data[0] != 0,
            major: data[1],
            minor: data[2],
            patch: data[3],
        })
    }

    /// Fetch the public key for a derivation index, without any on-screen
    /// confirmation
    pub async fn public_key(
        &mut self,
        index: u32,
    ) -> Result<[u8; PUBLIC_KEY_LENGTH], Error<T::Error>> {
        let resp = self.request(&command::get_public_key(index, false)).await?;
        let data = ok_data(resp)?;

        data.as_slice()
            .try_into()
            .map_err(|_| Error::UnexpectedResponse)
    }

    /// Fetch the public key for a derivation index with on-screen
    /// confirmation.
    ///
    /// The device shows the key and waits; resolve the returned exchange
    /// to obtain the response (key bytes on approval, `0x6985` on
    /// rejection).
    pub async fn public_key_confirm(
        &mut self,
        index: u32,
    ) -> Result<PendingExchange<'_, T>, Error<T::Error>> {
        let cmd = command::get_public_key(index, true);

        timeout(self.request_timeout, self.transport.send(&cmd))
            .await?
            .map_err(Error::Transport)?;

        Ok(PendingExchange::new(
            &mut self.transport,
            KEY_CONFIRM_ADVANCES,
            self.user_timeout,
        ))
    }

    /// Request a signature over `body` with the key at `index`.
    ///
    /// The body is encoded canonically and chunked; non-final frames are
    /// acknowledged immediately, the final frame opens the review flow.
    /// Resolve the returned exchange to obtain the response (64-byte
    /// signature on approval, `0x6985` on rejection).
    pub async fn sign_transaction(
        &mut self,
        index: u32,
        body: &TransactionBody,
    ) -> Result<PendingExchange<'_, T>, Error<T::Error>> {
        let advances = review_advances(body)?;

        let cmd = command::sign_transaction(index, &body.encode_to_bytes());
        let frames = cmd.frames();

        debug!(
            "signing with key {index}: {} payload bytes in {} frame(s), {advances} review screen(s)",
            cmd.data.len(),
            frames.len(),
        );

        let (last, head) = frames
            .split_last()
            .ok_or(Error::UnexpectedResponse)?;

        for frame in head {
            let resp = self.request(frame).await?;
            if !resp.status.is_ok() {
                return Err(Error::Device(resp.status));
            }
        }

        timeout(self.request_timeout, self.transport.send(last))
            .await?
            .map_err(Error::Transport)?;

        Ok(PendingExchange::new(
            &mut self.transport,
            advances,
            self.user_timeout,
        ))
    }

    /// Consume the client, returning the underlying transport
    pub fn into_transport(self) -> T {
        self.transport
    }

    async fn request(&mut self, command: &ApduCommand) -> Result<Response, Error<T::Error>> {
        timeout(self.request_timeout, self.transport.exchange(command))
            .await?
            .map_err(Error::Transport)
    }
}

/// Unwrap a synchronous response, mapping any non-ok status to
/// [`Error::Device`]
fn ok_data<E: core::fmt::Display + core::fmt::Debug>(resp: Response) -> Result<Vec<u8>, Error<E>> {
    match resp.status {
        StatusWord::Ok => Ok(resp.data),
        status => Err(Error::Device(status)),
    }
}

// Copyright (c) 2022-2023 Hedera Hashgraph, LLC

//! Interactive exchange state machine.
//!
//! Confirm-style commands leave a response pending on the device until the
//! user pages through the review screens and accepts or rejects. A
//! [`PendingExchange`] represents that in-flight command: it holds a
//! mutable borrow of the transport, so no other command can be issued on
//! the link until the exchange is resolved.

use core::fmt::{Debug, Display};
use core::time::Duration;

use async_trait::async_trait;
use log::{debug, error};
use tokio::time::timeout;

use ledger_hedera_apdu::Response;

use crate::{Error, Transport};

/// Lifecycle of an interactive exchange
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
pub enum ExchangeState {
    /// Final command frame transmitted, no screen action taken yet
    Sent,
    /// Review screens are being paged through
    AwaitingAction,
    /// Accepted on the confirmation screen, response consumed
    Approved,
    /// Accepted on the rejection screen, response consumed
    Rejected,
    /// Response delivered to the caller
    Completed,
}

/// Screen-stepping collaborator: a speculos button channel, a test mock,
/// or a prompt asking a human to press the buttons
#[async_trait]
pub trait ScreenDriver {
    type Error: Display + Debug + Send;

    /// Move to the next review screen (right button)
    async fn advance(&mut self) -> Result<(), Self::Error>;

    /// Act on the current screen (both buttons)
    async fn accept(&mut self) -> Result<(), Self::Error>;
}

/// An in-flight interactive command awaiting user action.
///
/// Exactly one of [`approve`](Self::approve) or [`reject`](Self::reject)
/// resolves the exchange and yields the device response; dropping an
/// unresolved exchange leaves the device mid-review and is logged as an
/// error.
pub struct PendingExchange<'a, T: Transport> {
    transport: &'a mut T,
    state: ExchangeState,
    advances_required: usize,
    advances_done: usize,
    user_timeout: Duration,
}

impl<'a, T: Transport> PendingExchange<'a, T> {
    pub(crate) fn new(
        transport: &'a mut T,
        advances_required: usize,
        user_timeout: Duration,
    ) -> Self {
        Self {
            transport,
            state: ExchangeState::Sent,
            advances_required,
            advances_done: 0,
            user_timeout,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ExchangeState {
        self.state
    }

    /// Advances needed to reach the confirmation screen
    pub fn advances_required(&self) -> usize {
        self.advances_required
    }

    /// Advances performed so far
    pub fn advances_done(&self) -> usize {
        self.advances_done
    }

    /// Page forward one review screen
    pub async fn advance<D: ScreenDriver>(
        &mut self,
        driver: &mut D,
    ) -> Result<(), Error<T::Error>> {
        driver
            .advance()
            .await
            .map_err(|e| Error::Screen(e.to_string()))?;

        self.advances_done += 1;
        self.state = ExchangeState::AwaitingAction;

        Ok(())
    }

    /// Page to the confirmation screen, accept, and collect the response.
    ///
    /// The returned [`Response`] carries whatever status the device
    /// produced; callers inspect it. On a driver failure the exchange is
    /// drained with a best-effort rejection so the device is not left
    /// mid-review.
    pub async fn approve<D: ScreenDriver>(
        mut self,
        driver: &mut D,
    ) -> Result<Response, Error<T::Error>> {
        while self.advances_done < self.advances_required {
            if let Err(e) = self.advance(driver).await {
                self.drain(driver).await;
                return Err(e);
            }
        }

        if let Err(e) = driver.accept().await {
            let e = Error::Screen(e.to_string());
            self.drain(driver).await;
            return Err(e);
        }
        self.state = ExchangeState::Approved;

        let resp = self.collect().await?;
        self.state = ExchangeState::Completed;

        Ok(resp)
    }

    /// Page one screen past the confirmation screen, accept the rejection,
    /// and collect the (user-rejected) response.
    pub async fn reject<D: ScreenDriver>(
        mut self,
        driver: &mut D,
    ) -> Result<Response, Error<T::Error>> {
        while self.advances_done < self.advances_required + 1 {
            if let Err(e) = self.advance(driver).await {
                self.drain(driver).await;
                return Err(e);
            }
        }

        if let Err(e) = driver.accept().await {
            let e = Error::Screen(e.to_string());
            self.drain(driver).await;
            return Err(e);
        }
        self.state = ExchangeState::Rejected;

        let resp = self.collect().await?;
        self.state = ExchangeState::Completed;

        Ok(resp)
    }

    /// Await the pending response, bounded by the user timeout
    async fn collect(&mut self) -> Result<Response, Error<T::Error>> {
        timeout(self.user_timeout, self.transport.receive())
            .await
            .map_err(|_| Error::UserTimeout)?
            .map_err(Error::Transport)
    }

    /// Best-effort rejection after a driver failure: step to the reject
    /// screen, accept it, and discard the response. Failures here are
    /// logged and swallowed; the original error is what the caller sees.
    async fn drain<D: ScreenDriver>(&mut self, driver: &mut D) {
        debug!("draining exchange in state {}", self.state);

        while self.advances_done < self.advances_required + 1 {
            if driver.advance().await.is_err() {
                return;
            }
            self.advances_done += 1;
        }

        if driver.accept().await.is_err() {
            return;
        }

        if self.collect().await.is_ok() {
            self.state = ExchangeState::Completed;
        }
    }
}

impl<'a, T: Transport> Drop for PendingExchange<'a, T> {
    fn drop(&mut self) {
        if self.state != ExchangeState::Completed {
            error!(
                "interactive exchange dropped in state {} (device left mid-review)",
                self.state
            );
        }
    }
}

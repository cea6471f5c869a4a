//! Cooperative request/poll dispatcher.
//!
//! Each query services the driver, opportunistically decodes whatever frame
//! is waiting in the receive buffer, then broadcasts a request for the
//! queried PGN and pauses.
//!
//! # Correlation
//!
//! A query does **not** wait for the answer to its own request. The requested
//! SPN is decoded against the PGN of the frame found in the buffer, which may
//! belong to an earlier request or to unrelated broadcast traffic. When that
//! PGN does not carry the SPN the query reports
//! [`DecodeError::UnsupportedSignal`](crate::error::DecodeError); callers must
//! not assume a value answers the request that was just sent.
use core::convert::Infallible;
use core::fmt;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;

use crate::error::{ConfigError, DispatchError, QueryError};
use crate::protocol::signals::decode_frame;
use crate::protocol::transport::request::build_request_frame;
use crate::protocol::transport::traits::{
    j1939_transport::J1939Transport, korri_timer::KorriTimer,
};

pub mod config;

use config::{DispatcherConfig, QuerySpec, ROTATION_LEN};

/// Result of one query as kept in a [`CycleReport`]. Transport and build
/// failures never reach a report.
pub type Reading = Result<i16, QueryError<Infallible>>;

/// Outcome of one full rotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub entries: [(QuerySpec, Reading); ROTATION_LEN],
}

impl CycleReport {
    /// Decoded values in rotation order, `None` where the query produced nothing.
    pub fn values(&self) -> [Option<i16>; ROTATION_LEN] {
        core::array::from_fn(|index| self.entries[index].1.as_ref().ok().copied())
    }
}

/// Underscore-delimited line of the four values, `-` for a missing one.
impl fmt::Display for CycleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (_, reading)) in self.entries.iter().enumerate() {
            if index > 0 {
                f.write_str("_")?;
            }
            match reading {
                Ok(value) => write!(f, "{}", value)?,
                Err(_) => f.write_str("-")?,
            }
        }
        Ok(())
    }
}

/// Drives a [`J1939Transport`] through the query rotation.
pub struct PollingDispatcher<X: J1939Transport, T: KorriTimer> {
    transport: X,
    timer: T,
    config: DispatcherConfig,
}

impl<X, T> PollingDispatcher<X, T>
where
    X: J1939Transport,
    T: KorriTimer,
{
    /// Validate `config` and take ownership of the driver and timer.
    pub fn new(transport: X, timer: T, config: DispatcherConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            transport,
            timer,
            config,
        })
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    pub fn transport(&self) -> &X {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut X {
        &mut self.transport
    }

    /// Give back the driver and timer.
    pub fn into_parts(self) -> (X, T) {
        (self.transport, self.timer)
    }

    /// Run one query step for `pgn`/`spn`.
    ///
    /// 1. Service the driver's receive and transmit state machines.
    /// 2. Decode `spn` from the pending frame, if any, against **that frame's** PGN.
    /// 3. Enqueue a request for `pgn` (always, even when nothing was received).
    /// 4. Wait for the configured query delay.
    ///
    /// # Errors
    ///
    /// - [`QueryError::NoData`] when the receive buffer was empty.
    /// - [`QueryError::Decode`] when the pending frame does not carry `spn`
    ///   or is too short.
    /// - [`QueryError::Transport`] / [`QueryError::Build`] when the driver fails
    ///   or the request cannot be built; the step is abandoned at that point.
    pub async fn query(&mut self, pgn: u32, spn: u32) -> Result<i16, QueryError<X::Error>> {
        self.transport
            .service_receive()
            .await
            .map_err(QueryError::Transport)?;
        self.transport
            .service_transmit()
            .await
            .map_err(QueryError::Transport)?;

        let outcome = self.read_pending(spn);

        let request = build_request_frame(
            pgn,
            self.config.source_address,
            self.config.request_destination,
            self.config.request_priority,
        )?;
        self.transport
            .enqueue_message(&request)
            .await
            .map_err(QueryError::Transport)?;

        #[cfg(feature = "defmt")]
        defmt::trace!("Requested PGN {=u32:#X}, waiting {}ms", pgn, self.config.query_delay_ms());

        self.timer.delay_ms(self.config.query_delay_ms()).await;
        outcome
    }

    /// Dequeue one frame and decode `spn` against its own PGN.
    fn read_pending(&mut self, spn: u32) -> Result<i16, QueryError<X::Error>> {
        if !self.transport.has_pending_message() {
            return Err(QueryError::NoData);
        }
        let frame = self.transport.dequeue_message().ok_or(QueryError::NoData)?;
        let received_pgn = frame.id.pgn();

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Frame RX: PGN={=u32:#X}, SA={}, decoding SPN {}",
            received_pgn,
            frame.id.source_address(),
            spn
        );

        decode_frame(received_pgn, spn, &frame).map_err(QueryError::Decode)
    }

    /// Query every signal of the rotation once.
    ///
    /// Missing or undecodable values are kept in the report; only driver and
    /// request-build failures abort the cycle.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, DispatchError<X::Error>> {
        let rotation = self.config.rotation;
        let mut entries = rotation.map(|query| (query, Err(QueryError::NoData)));

        for (query, reading) in entries.iter_mut() {
            *reading = match self.query(query.pgn, query.spn).await {
                Ok(value) => Ok(value),
                Err(QueryError::NoData) => Err(QueryError::NoData),
                Err(QueryError::Decode(err)) => Err(QueryError::Decode(err)),
                Err(QueryError::Build(err)) => return Err(DispatchError::Build(err)),
                Err(QueryError::Transport(err)) => return Err(DispatchError::Transport(err)),
            };
        }

        Ok(CycleReport { entries })
    }

    /// Run cycles forever, handing each report to `reports`.
    ///
    /// Only returns when the driver fails.
    pub async fn drive<M: RawMutex, const N: usize>(
        mut self,
        reports: Sender<'_, M, CycleReport, N>,
    ) -> Result<(), DispatchError<X::Error>> {
        loop {
            let report = self.run_cycle().await?;

            #[cfg(feature = "defmt")]
            defmt::info!("Cycle: {}", defmt::Display2Format(&report));

            reports.send(report).await;
        }
    }
}

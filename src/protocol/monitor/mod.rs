//! Passive bus monitor: drains the receive buffer and decodes every tracked
//! engine signal out of each frame against the frame's own PGN.
//!
//! Unlike the polling dispatcher, the monitor never transmits requests; it
//! relies on the engine controllers broadcasting their PGNs on their own.
//! Snapshot production is rate limited with a tick [`Interval`] so a fast bus
//! does not flood the console.
use core::fmt;

use embassy_time::Duration;

use crate::error::DecodeError;
use crate::protocol::signals::{decode_frame, spn, spn_name};
use crate::protocol::transport::traits::{
    j1939_transport::J1939Transport,
    tick_source::{ticks_since, TickSource},
};

/// SPNs decoded from every received frame, in report order.
pub const MONITORED_SPNS: [u32; 5] = [
    spn::ENGINE_FUEL_RATE,
    spn::ENGINE_FUEL_TEMPERATURE_1,
    spn::ENGINE_SPEED,
    spn::FUEL_LEVEL_1,
    spn::ENGINE_THROTTLE_POSITION,
];

//==================================================================================INTERVAL
/// Gate that opens at most once per `period` ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period: u32,
    last: Option<u32>,
}

impl Interval {
    pub const fn new(period_ticks: u32) -> Self {
        Self {
            period: period_ticks,
            last: None,
        }
    }

    /// `true` on the first call and whenever `period` ticks elapsed since the
    /// last time the gate opened. Counter wrap-around is handled.
    pub fn ready(&mut self, now: u32) -> bool {
        let open = match self.last {
            None => true,
            Some(previous) => ticks_since(now, previous) >= self.period,
        };
        if open {
            self.last = Some(now);
        }
        open
    }
}

//==================================================================================SNAPSHOT
/// Every tracked signal decoded from one received frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSnapshot {
    /// PGN rebuilt from the frame header.
    pub pgn: u32,
    pub source_address: u8,
    /// Tick at which the frame was processed.
    pub tick: u32,
    pub readings: [(u32, Result<i16, DecodeError>); MONITORED_SPNS.len()],
}

impl FrameSnapshot {
    /// Value decoded for `spn`, if the frame carried it.
    pub fn value(&self, spn: u32) -> Option<i16> {
        self.readings
            .iter()
            .find(|(candidate, _)| *candidate == spn)
            .and_then(|(_, reading)| reading.ok())
    }
}

/// One `Name = value` pair per line, `-` for signals the frame does not carry.
impl fmt::Display for FrameSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PGN {:#06X} from {}", self.pgn, self.source_address)?;
        for (spn, reading) in &self.readings {
            let name = spn_name(*spn).unwrap_or("Unknown");
            match reading {
                Ok(value) => writeln!(f, "{:<28}= {}", name, value)?,
                Err(_) => writeln!(f, "{:<28}= -", name)?,
            }
        }
        Ok(())
    }
}

//==================================================================================MONITOR
/// Receive-only companion of the polling dispatcher.
pub struct Monitor<X: J1939Transport, S: TickSource> {
    transport: X,
    ticks: S,
    interval: Interval,
}

impl<X, S> Monitor<X, S>
where
    X: J1939Transport,
    S: TickSource,
{
    /// Produce at most one snapshot per `report_interval`. A zero interval
    /// reports every frame.
    pub fn new(transport: X, ticks: S, report_interval: Duration) -> Self {
        Self {
            transport,
            ticks,
            interval: Interval::new(S::ticks_for(report_interval)),
        }
    }

    pub fn transport_mut(&mut self) -> &mut X {
        &mut self.transport
    }

    pub fn into_inner(self) -> X {
        self.transport
    }

    /// Service the driver and process at most one pending frame.
    ///
    /// Returns `Ok(None)` when nothing was received or when the frame arrived
    /// inside the rate-limit window; the frame is consumed either way.
    pub async fn poll(&mut self) -> Result<Option<FrameSnapshot>, X::Error> {
        self.transport.service_receive().await?;
        self.transport.service_transmit().await?;

        if !self.transport.has_pending_message() {
            return Ok(None);
        }
        let Some(frame) = self.transport.dequeue_message() else {
            return Ok(None);
        };

        let now = self.ticks.now();
        if !self.interval.ready(now) {
            #[cfg(feature = "defmt")]
            defmt::trace!("Frame dropped inside report window");
            return Ok(None);
        }

        let pgn = frame.id.pgn();
        let readings = MONITORED_SPNS.map(|spn| (spn, decode_frame(pgn, spn, &frame)));

        #[cfg(feature = "defmt")]
        defmt::debug!("Snapshot for PGN {=u32:#X}", pgn);

        Ok(Some(FrameSnapshot {
            pgn,
            source_address: frame.id.source_address(),
            tick: now,
            readings,
        }))
    }
}

//! Error definitions shared across library modules.
//! Each type models a specific failure scenario (CAN ID construction,
//! signal decoding, polling cycle, etc.).
use thiserror_no_std::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Errors that can occur while building a 29-bit CAN identifier.
pub enum CanIdBuildError {
    /// Attempt to build a broadcast message (PDU2) with PF < 240.
    #[error("Invalid for broadcast message: PF is too low")]
    InvalidForBroadcast,
    /// Attempt to send an addressed message (PDU1) with PF ≥ 240.
    #[error("Invalid for addressed message: PF is too high: {pf}")]
    InvalidForFocusedMessage { pf: u8 },
    /// In PDU1 the lower 8 bits of the PGN must remain zero.
    #[error("PDU1 PGNs require PS = 0")]
    PsFocusMessageMustBeNull,
}

//================================================================================DECODE_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Reasons a signal could not be extracted from a payload.
pub enum DecodeError {
    /// The SPN is not carried by this PGN, or the PGN is unknown.
    #[error("Unsupported signal: SPN {spn} in PGN {pgn:#X}")]
    UnsupportedSignal { pgn: u32, spn: u32 },
    /// Payload is shorter than a full classic CAN frame.
    #[error("Invalid data length -> expected: {expected}, actual: {actual}")]
    InvalidDataLength { expected: usize, actual: usize },
}

//================================================================================QUERY_ERROR
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Outcome of a single poll/request step that did not produce a value.
pub enum QueryError<E: core::fmt::Debug> {
    /// No frame was waiting in the receive buffer.
    #[error("No data available")]
    NoData,
    /// A frame was received but the requested SPN could not be decoded from it.
    #[error("Decode error: {0}")]
    Decode(DecodeError),
    /// Request identifier could not be built.
    #[error("Request build failed: {0}")]
    Build(CanIdBuildError),
    /// Transport driver refused a service, dequeue or enqueue call.
    #[error("Transport error: {0:?}")]
    Transport(E),
}

impl<E: core::fmt::Debug> QueryError<E> {
    /// `true` for local, non-fatal outcomes (nothing received, unsupported signal, short frame).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, QueryError::NoData | QueryError::Decode(_))
    }
}

impl<E: core::fmt::Debug> From<DecodeError> for QueryError<E> {
    fn from(err: DecodeError) -> Self {
        QueryError::Decode(err)
    }
}

impl<E: core::fmt::Debug> From<CanIdBuildError> for QueryError<E> {
    fn from(err: CanIdBuildError) -> Self {
        QueryError::Build(err)
    }
}

//================================================================================DISPATCH_ERROR
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Fatal errors stopping the polling loop.
pub enum DispatchError<E: core::fmt::Debug> {
    /// Transport driver failed while servicing the bus.
    #[error("Transport error: {0:?}")]
    Transport(E),
    /// Request identifier could not be built from the configuration.
    #[error("Request build failed: {0}")]
    Build(CanIdBuildError),
}

//================================================================================CONFIG_ERROR
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Rejected dispatcher configuration.
pub enum ConfigError {
    /// 254 (null) and 255 (global) cannot be used as a source address.
    #[error("Invalid source address: {address}")]
    InvalidSourceAddress { address: u8 },
}

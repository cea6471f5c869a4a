//! J1939 transport layer: CAN frame representation, 29-bit identifier
//! management, request frames and the driver/timer/tick abstraction traits.
//!
//! ## J1939 Timing and Addressing Constants
//!
//! These constants define the defaults used by the polling dispatcher when it
//! issues requests on the bus.

pub mod can_frame;
pub mod can_id;
pub mod request;
pub mod traits;

/// Pause applied after each query step (ms).
///
/// The engine controllers answering requests typically need a few tens of
/// milliseconds to queue their response. Pausing between steps also keeps the
/// request rate low enough for a shared bus.
///
/// # Recommended Values
///
/// - **10 ms**: Fast polling on a lightly loaded bus.
/// - **50 ms**: Default, one full four-signal rotation every 200 ms.
/// - **250 ms**: Conservative choice for slow or saturated networks.
pub const QUERY_DELAY_MS: u32 = 50;

/// Priority of control messages (3). Requests issued by the dispatcher use it.
pub const CONTROL_PRIORITY: u8 = 3;

/// Default priority for informational messages (6).
pub const DEFAULT_PRIORITY: u8 = 6;

/// Global (broadcast) destination address.
pub const GLOBAL_ADDRESS: u8 = 255;

/// Null address, used by nodes that have not claimed an address.
pub const NULL_ADDRESS: u8 = 254;

//! Monotonic tick counter, typically incremented by a timer interrupt.
use embassy_time::Duration;

/// Read-only access to a free-running tick counter.
///
/// The counter is allowed to wrap; consumers compare ticks with
/// [`ticks_since`] instead of a plain subtraction.
pub trait TickSource {
    /// Number of ticks per second (1000 for a 1 ms tick).
    const TICKS_PER_SECOND: u32;

    /// Current tick count.
    fn now(&self) -> u32;

    /// Convert a duration into ticks of this source, saturating at `u32::MAX`.
    fn ticks_for(duration: Duration) -> u32 {
        let ticks = duration.as_millis() * Self::TICKS_PER_SECOND as u64 / 1000;
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }
}

/// Ticks elapsed from `previous` to `current`, robust to counter wrap-around.
pub fn ticks_since(current: u32, previous: u32) -> u32 {
    current.wrapping_sub(previous)
}

//! Asynchronous timer abstraction providing the pause between query steps.

/// Timer trait abstraction; must remain thread-safe when applicable.
///
/// Firmware usually forwards to `embassy_time::Timer::after`; tests can
/// return immediately to exercise the polling cadence without waiting.
pub trait KorriTimer {
    /// Asynchronously wait for `millis` milliseconds.
    fn delay_ms<'a>(&'a mut self, millis: u32) -> impl core::future::Future<Output = ()> + 'a;
}

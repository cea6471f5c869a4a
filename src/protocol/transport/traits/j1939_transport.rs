//! Minimal abstraction for a buffered J1939 driver. The driver owns the
//! receive/transmit queues and the CAN controller; the library only services
//! it and moves frames in and out of its buffers.
use crate::protocol::transport::can_frame::CanFrame;
use futures_util::Future;

/// Contract exposed by a non-blocking J1939 driver.
///
/// Both `service_*` calls advance the driver's internal state machines and
/// **must** be invoked on every cycle, whether or not a frame is waiting.
/// None of the methods may wait for bus traffic.
pub trait J1939Transport {
    type Error: core::fmt::Debug;

    /// Move frames from the CAN controller into the receive buffer.
    fn service_receive<'a>(&'a mut self) -> impl Future<Output = Result<(), Self::Error>> + 'a;

    /// Push buffered frames from the transmit queue to the CAN controller.
    fn service_transmit<'a>(&'a mut self) -> impl Future<Output = Result<(), Self::Error>> + 'a;

    /// `true` when at least one received frame is waiting.
    fn has_pending_message(&self) -> bool;

    /// Take the oldest received frame out of the buffer.
    fn dequeue_message(&mut self) -> Option<CanFrame>;

    /// Queue a frame for transmission. Sent on a later `service_transmit`.
    fn enqueue_message<'a>(
        &'a mut self,
        frame: &'a CanFrame,
    ) -> impl Future<Output = Result<(), Self::Error>> + 'a;
}

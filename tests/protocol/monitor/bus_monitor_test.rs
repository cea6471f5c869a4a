//! Tests for the passive `Monitor`: snapshots, rate limiting, driver servicing.
mod helpers {
    include!("../../helpers/mod.rs");
}

use embassy_time::Duration;
use helpers::{engine_frame, ManualTicks, MockError, MockTransport};
use korri_j1939::protocol::{
    monitor::Monitor,
    signals::{pgn, spn},
};

#[tokio::test]
async fn test_snapshot_decodes_tracked_signals() {
    let mut transport = MockTransport::new();
    transport.inject(engine_frame(
        pgn::FUEL_ECONOMY,
        0x00,
        [0x00, 0xC8, 0, 0, 0, 0, 0x64, 0],
    ));
    let mut monitor = Monitor::new(transport, ManualTicks::default(), Duration::from_millis(0));

    let snapshot = monitor
        .poll()
        .await
        .expect("bus is healthy")
        .expect("a frame was pending");

    assert_eq!(snapshot.pgn, pgn::FUEL_ECONOMY);
    assert_eq!(snapshot.source_address, 0x00);
    assert_eq!(snapshot.value(spn::ENGINE_FUEL_RATE), Some(10));
    assert_eq!(snapshot.value(spn::ENGINE_THROTTLE_POSITION), Some(40));
    assert_eq!(snapshot.value(spn::ENGINE_SPEED), None);
    assert_eq!(snapshot.value(spn::FUEL_LEVEL_1), None);
    assert_eq!(snapshot.value(spn::ENGINE_FUEL_TEMPERATURE_1), None);

    let text = snapshot.to_string();
    assert!(text.starts_with("PGN 0xFEF2 from 0"));
    assert!(text.contains("Engine Fuel Rate"));
    assert!(text.contains("= 10"));
    assert!(text.contains("= 40"));
}

#[tokio::test]
async fn test_idle_bus_still_services_driver() {
    let mut monitor = Monitor::new(
        MockTransport::new(),
        ManualTicks::default(),
        Duration::from_millis(250),
    );

    assert_eq!(monitor.poll().await, Ok(None));
    assert_eq!(monitor.poll().await, Ok(None));

    let transport = monitor.into_inner();
    assert_eq!(transport.receive_services, 2);
    assert_eq!(transport.transmit_services, 2);
    assert!(transport.sent.is_empty(), "the monitor never transmits");
}

#[tokio::test]
async fn test_snapshots_are_rate_limited() {
    let ticks = ManualTicks::default();
    let mut monitor = Monitor::new(MockTransport::new(), ticks.clone(), Duration::from_millis(250));
    let speed = engine_frame(
        pgn::ELECTRONIC_ENGINE_CONTROLLER_1,
        0x00,
        [0, 0, 0, 0x3E, 0x80, 0, 0, 0],
    );

    monitor.transport_mut().inject(speed.clone());
    monitor.transport_mut().inject(speed.clone());

    let first = monitor.poll().await.expect("bus is healthy");
    assert_eq!(first.map(|s| s.value(spn::ENGINE_SPEED)), Some(Some(2000)));

    // Same tick: the second frame is drained but not reported.
    ticks.advance(100);
    assert_eq!(monitor.poll().await, Ok(None));
    assert!(monitor.transport_mut().rx.is_empty());

    ticks.advance(150);
    monitor.transport_mut().inject(speed);
    let third = monitor
        .poll()
        .await
        .expect("bus is healthy")
        .expect("window elapsed");
    assert_eq!(third.tick, 250);
}

#[tokio::test]
async fn test_driver_failure_is_returned() {
    let transport = MockTransport {
        fail_after: Some(0),
        ..MockTransport::new()
    };
    let mut monitor = Monitor::new(transport, ManualTicks::default(), Duration::from_millis(0));
    assert_eq!(monitor.poll().await, Err(MockError::BusOff));
}

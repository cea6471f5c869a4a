//! Tests for `PollingDispatcher`: servicing, request emission, decoding of
//! whatever frame is pending, and cycle reports.
mod helpers {
    include!("../../helpers/mod.rs");
}

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use helpers::{engine_frame, MockError, MockTransport, RecordingTimer};
use korri_j1939::{
    error::{ConfigError, DecodeError, DispatchError, QueryError},
    protocol::{
        polling::{
            config::{DispatcherConfig, QuerySpec},
            PollingDispatcher,
        },
        signals::{pgn, spn},
        transport::request::requested_pgn,
    },
};

const ECU: u8 = 0x00;

fn dispatcher(transport: MockTransport) -> PollingDispatcher<MockTransport, RecordingTimer> {
    PollingDispatcher::new(transport, RecordingTimer::default(), DispatcherConfig::default())
        .expect("default configuration is valid")
}

#[tokio::test]
async fn test_idle_bus_reports_no_data_and_still_requests() {
    let mut dispatcher = dispatcher(MockTransport::new());

    let result = dispatcher
        .query(pgn::ENGINE_TEMPERATURE, spn::ENGINE_FUEL_TEMPERATURE_1)
        .await;
    assert_eq!(result, Err(QueryError::NoData));

    let transport = dispatcher.transport();
    assert_eq!(transport.receive_services, 1);
    assert_eq!(transport.transmit_services, 1);
    assert_eq!(transport.tx.len(), 1, "request waits for the next transmit service");

    let request = &transport.tx[0];
    assert_eq!(request.len, 3);
    assert_eq!(request.payload(), &[0xEE, 0xFE, 0x00]);
    assert_eq!(request.id.pgn(), 59904);
    assert_eq!(request.id.destination(), Some(255));
    assert_eq!(request.id.priority(), 3);
    assert_eq!(request.id.source_address(), 128);

    let (_, timer) = dispatcher.into_parts();
    assert_eq!(timer.delays, vec![50]);
}

#[tokio::test]
async fn test_pending_fuel_economy_frame_is_decoded() {
    let mut transport = MockTransport::new();
    let payload = [0x00, 0xC8, 0, 0, 0, 0, 0x64, 0];
    transport.inject(engine_frame(pgn::FUEL_ECONOMY, ECU, payload));
    transport.inject(engine_frame(pgn::FUEL_ECONOMY, ECU, payload));
    let mut dispatcher = dispatcher(transport);

    let fuel_rate = dispatcher
        .query(pgn::FUEL_ECONOMY, spn::ENGINE_FUEL_RATE)
        .await;
    let throttle = dispatcher
        .query(pgn::FUEL_ECONOMY, spn::ENGINE_THROTTLE_POSITION)
        .await;

    assert_eq!(fuel_rate, Ok(10));
    assert_eq!(throttle, Ok(40));
    assert!(dispatcher.transport().rx.is_empty());
}

#[tokio::test]
async fn test_requested_spn_is_decoded_against_received_pgn() {
    let mut transport = MockTransport::new();
    // Dash Display frame with a full tank, while we ask Engine Temperature.
    transport.inject(engine_frame(
        pgn::DASH_DISPLAY,
        0x17,
        [0, 250, 0, 0, 0, 0, 0, 0],
    ));
    transport.inject(engine_frame(
        pgn::DASH_DISPLAY,
        0x17,
        [0, 250, 0, 0, 0, 0, 0, 0],
    ));
    let mut dispatcher = dispatcher(transport);

    let temperature = dispatcher
        .query(pgn::ENGINE_TEMPERATURE, spn::ENGINE_FUEL_TEMPERATURE_1)
        .await;
    assert_eq!(
        temperature,
        Err(QueryError::Decode(DecodeError::UnsupportedSignal {
            pgn: pgn::DASH_DISPLAY,
            spn: spn::ENGINE_FUEL_TEMPERATURE_1,
        }))
    );

    // Asking EEC1 for the fuel level still reads the pending Dash Display frame.
    let level = dispatcher
        .query(pgn::ELECTRONIC_ENGINE_CONTROLLER_1, spn::FUEL_LEVEL_1)
        .await;
    assert_eq!(level, Ok(100));

    // Requests follow the queried PGNs, not the received ones.
    let transport = dispatcher.transport();
    let requested: Vec<_> = transport
        .sent
        .iter()
        .chain(transport.tx.iter())
        .filter_map(requested_pgn)
        .collect();
    assert_eq!(
        requested,
        vec![pgn::ENGINE_TEMPERATURE, pgn::ELECTRONIC_ENGINE_CONTROLLER_1]
    );
}

#[tokio::test]
async fn test_short_frame_is_rejected() {
    let mut transport = MockTransport::new();
    let mut frame = engine_frame(pgn::FUEL_ECONOMY, ECU, [0x01, 0x00, 0, 0, 0, 0, 0, 0]);
    frame.len = 2;
    transport.inject(frame);
    let mut dispatcher = dispatcher(transport);

    let result = dispatcher
        .query(pgn::FUEL_ECONOMY, spn::ENGINE_FUEL_RATE)
        .await;
    assert_eq!(
        result,
        Err(QueryError::Decode(DecodeError::InvalidDataLength {
            expected: 8,
            actual: 2
        }))
    );
    assert!(result.unwrap_err().is_recoverable());
}

#[tokio::test]
async fn test_cycle_reports_rotation_values() {
    let mut transport = MockTransport::new();
    transport.inject(engine_frame(
        pgn::ENGINE_TEMPERATURE,
        ECU,
        [0, 0x28, 0, 0, 0, 0, 0, 0],
    ));
    transport.inject(engine_frame(
        pgn::DASH_DISPLAY,
        0x17,
        [0, 250, 0, 0, 0, 0, 0, 0],
    ));
    transport.inject(engine_frame(
        pgn::FUEL_ECONOMY,
        ECU,
        [0x00, 0xC8, 0, 0, 0, 0, 0x64, 0],
    ));
    transport.inject(engine_frame(
        pgn::ELECTRONIC_ENGINE_CONTROLLER_1,
        ECU,
        [0, 0, 0, 0x3E, 0x80, 0, 0, 0],
    ));
    let mut dispatcher = dispatcher(transport);

    let report = dispatcher.run_cycle().await.expect("cycle must complete");
    assert_eq!(report.to_string(), "0_100_40_2000");
    assert_eq!(report.values(), [Some(0), Some(100), Some(40), Some(2000)]);

    let transport = dispatcher.transport();
    assert_eq!(transport.receive_services, 4);
    assert_eq!(transport.transmit_services, 4);
    let requested: Vec<_> = transport
        .sent
        .iter()
        .chain(transport.tx.iter())
        .filter_map(requested_pgn)
        .collect();
    assert_eq!(
        requested,
        vec![
            pgn::ENGINE_TEMPERATURE,
            pgn::DASH_DISPLAY,
            pgn::FUEL_ECONOMY,
            pgn::ELECTRONIC_ENGINE_CONTROLLER_1
        ]
    );

    let (_, timer) = dispatcher.into_parts();
    assert_eq!(timer.delays, vec![50; 4]);
}

#[tokio::test]
async fn test_cycle_keeps_missing_values() {
    let mut dispatcher = dispatcher(MockTransport::new());
    let report = dispatcher.run_cycle().await.expect("cycle must complete");
    assert_eq!(report.to_string(), "-_-_-_-");
    assert_eq!(report.values(), [None; 4]);
}

#[tokio::test]
async fn test_transport_failure_aborts() {
    let transport = MockTransport {
        fail_after: Some(3),
        ..MockTransport::new()
    };
    let mut dispatcher = dispatcher(transport);

    // First query: receive + transmit services succeed.
    assert_eq!(
        dispatcher
            .query(pgn::FUEL_ECONOMY, spn::ENGINE_FUEL_RATE)
            .await,
        Err(QueryError::NoData)
    );
    // Second query: receive succeeds, transmit fails before any request is queued.
    let result = dispatcher
        .query(pgn::FUEL_ECONOMY, spn::ENGINE_FUEL_RATE)
        .await;
    assert_eq!(result, Err(QueryError::Transport(MockError::BusOff)));
    assert!(!result.unwrap_err().is_recoverable());
    assert_eq!(dispatcher.transport().tx.len(), 1);

    assert_eq!(
        dispatcher.run_cycle().await,
        Err(DispatchError::Transport(MockError::BusOff))
    );
}

#[tokio::test]
async fn test_custom_configuration() {
    let config = DispatcherConfig::default()
        .with_request_priority(6)
        .with_request_destination(0x00)
        .with_query_delay(embassy_time::Duration::from_millis(10))
        .with_rotation([QuerySpec::new(pgn::FUEL_ECONOMY, spn::ENGINE_FUEL_RATE); 4]);
    let mut dispatcher =
        PollingDispatcher::new(MockTransport::new(), RecordingTimer::default(), config)
            .expect("configuration is valid");

    dispatcher.run_cycle().await.expect("cycle must complete");

    let transport = dispatcher.transport();
    let last = transport.tx.back().expect("a request must be queued");
    assert_eq!(last.id.priority(), 6);
    assert_eq!(last.id.destination(), Some(0x00));
    assert_eq!(requested_pgn(last), Some(pgn::FUEL_ECONOMY));

    let (_, timer) = dispatcher.into_parts();
    assert_eq!(timer.delays, vec![10; 4]);
}

#[tokio::test]
async fn test_rejects_invalid_source_address() {
    let config = DispatcherConfig {
        source_address: 255,
        ..DispatcherConfig::default()
    };
    let result = PollingDispatcher::new(MockTransport::new(), RecordingTimer::default(), config);
    assert!(matches!(
        result,
        Err(ConfigError::InvalidSourceAddress { address: 255 })
    ));
}

#[tokio::test]
async fn test_drive_publishes_one_report_per_cycle() {
    let mut transport = MockTransport::new();
    transport.inject(engine_frame(
        pgn::ENGINE_TEMPERATURE,
        ECU,
        [0, 0x50, 0, 0, 0, 0, 0, 0],
    ));
    let reports: Channel<NoopRawMutex, _, 1> = Channel::new();
    let driver = dispatcher(transport).drive(reports.sender());

    tokio::select! {
        result = driver => {
            panic!("dispatcher ended unexpectedly: {:?}", result);
        }
        (first, second) = async {
            let first = reports.receive().await;
            let second = reports.receive().await;
            (first, second)
        } => {
            assert_eq!(first.to_string(), "40_-_-_-");
            assert_eq!(second.to_string(), "-_-_-_-");
        }
    }
}

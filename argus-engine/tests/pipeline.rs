use std::net::Ipv4Addr;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use argus_config::ArgusConfig;
use argus_core::{EventType, MacAddr, NetworkEvent, RecordLayout};
use argus_engine::{replay_frames, spawn_consumer, EngineError, EventHandler, Probe};
use argus_protocols::synth::FrameBuilder;
use argus_protocols::{Disposition, EventSummary, TrafficKind};
use async_trait::async_trait;
use bytes::Bytes;

const CLIENT: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 20);
const SERVER: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);
const RESOLVER: Ipv4Addr = Ipv4Addr::new(192, 168, 1, 1);

fn dns_query(name: &[&str]) -> Vec<u8> {
    let mut msg = vec![0xab, 0xcd, 0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 0];
    for label in name {
        msg.push(label.len() as u8);
        msg.extend_from_slice(label.as_bytes());
    }
    msg.push(0);
    msg.extend_from_slice(&[0, 1, 0, 1]);
    msg
}

fn session() -> Vec<Bytes> {
    let b = FrameBuilder::new();
    vec![
        b.arp(1, b.src_mac, CLIENT, MacAddr::ZERO, RESOLVER),
        b.udp(CLIENT, RESOLVER, 53000, 53, &dns_query(&["example", "com"])),
        b.tcp(CLIENT, SERVER, 50000, 443, 0x02, b""),
        b.tcp(SERVER, CLIENT, 443, 50000, 0x12, b""),
        b.tcp(CLIENT, SERVER, 50000, 443, 0x18, &[0x16, 0x03, 0x01, 0x00, 0xc8, 0x01, 0x00]),
        b.tcp(CLIENT, SERVER, 50001, 80, 0x18, b"POST /login HTTP/1.1\r\n"),
        b.icmp(CLIENT, SERVER, 8, 0),
        b.ethernet(0x86dd, &[0u8; 48]),
        Bytes::from_static(&[0xff; 13]),
    ]
}

fn probe() -> Probe {
    let mut config = ArgusConfig::default();
    config.queue.capacity = 128;
    config.consumer.poll_interval_ms = 1;
    Probe::new(&config).unwrap()
}

#[test]
fn session_classification_end_to_end() {
    let probe = probe();
    for frame in session() {
        assert_eq!(probe.handle_frame(&frame), Disposition::Pass);
    }

    let events = probe.reader().drain(64);
    let types: Vec<_> = events.iter().map(|e| e.event_type).collect();
    assert_eq!(
        types,
        vec![
            EventType::Arp,
            EventType::Dns,
            EventType::Tcp,
            EventType::Tcp,
            EventType::Tls,
            EventType::Http,
            EventType::Icmp,
        ]
    );

    let summaries: Vec<_> = events.iter().map(EventSummary::from_event).collect();
    assert_eq!(summaries[0].kind, TrafficKind::ArpRequest);
    assert_eq!(summaries[1].kind, TrafficKind::DnsQuery);
    assert_eq!(summaries[1].l7_info.as_deref(), Some("example.com"));
    assert_eq!(summaries[2].kind, TrafficKind::TcpHttps);
    assert_eq!(summaries[4].kind, TrafficKind::TlsClientHello);
    assert_eq!(summaries[5].kind, TrafficKind::HttpPost);
    assert_eq!(summaries[5].l7_info.as_deref(), Some("POST /login"));
    assert_eq!(summaries[6].kind, TrafficKind::IcmpEchoRequest);

    let metrics = probe.metrics().gather_metrics().unwrap();
    assert!(metrics.contains("argus_frames_total 9"));
    assert!(metrics.contains("argus_frames_ignored_total 2"));
    assert!(metrics.contains("argus_events_total{event_type=\"TCP\"} 2"));
}

#[test]
fn records_survive_the_wire() {
    let probe = probe();
    for frame in session() {
        probe.handle_frame(&frame);
    }

    let reader = probe.reader();
    let records = reader.drain_records(64);
    assert_eq!(records.len(), 7);
    let decoded: Vec<NetworkEvent> = records
        .iter()
        .map(|r| RecordLayout::Extended.decode(r).unwrap())
        .collect();
    assert_eq!(decoded[1].dst_port, 53);
    assert_eq!(decoded[1].src_addr(), CLIENT);
    assert_eq!(decoded[6].icmp_type, 8);
}

#[test]
fn replay_matches_sequential_handling() {
    let frames: Vec<Bytes> = session().into_iter().cycle().take(90).collect();

    let probe = probe();
    let stats = replay_frames(&probe, &frames, 3);
    assert_eq!(stats.frames, 90);
    assert_eq!(stats.ignored, 20);
    assert_eq!(stats.queued, 70);
    assert_eq!(probe.reader().len(), 70);
}

struct Tally(Arc<Mutex<Vec<EventType>>>);

#[async_trait]
impl EventHandler for Tally {
    async fn handle(&self, event: &NetworkEvent) -> Result<(), EngineError> {
        self.0
            .lock()
            .map_err(|e| EngineError::Handler(e.to_string()))?
            .push(event.event_type);
        Ok(())
    }
}

#[tokio::test]
async fn consumer_sees_replayed_traffic() {
    let probe = probe();
    let frames = session();
    let producer = probe.clone();
    tokio::task::spawn_blocking(move || replay_frames(&producer, &frames, 2))
        .await
        .unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let stats = spawn_consumer(
        probe.reader(),
        Tally(seen.clone()),
        Arc::new(AtomicBool::new(true)),
    )
    .await
    .unwrap();

    assert_eq!(stats.events, 7);
    let mut seen = seen.lock().unwrap().clone();
    seen.sort_by_key(|t| t.code());
    assert_eq!(
        seen,
        vec![
            EventType::Arp,
            EventType::Tcp,
            EventType::Tcp,
            EventType::Icmp,
            EventType::Dns,
            EventType::Http,
            EventType::Tls,
        ]
    );
}

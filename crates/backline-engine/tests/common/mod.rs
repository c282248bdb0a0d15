//! Shared fixtures for the engine integration suites.
#![allow(dead_code)] // each suite uses its own subset of the helpers

use backline_core::{Contact, Money, Room, RoomColor, WallTime};
use backline_engine::{SequenceSource, SlotRequest, Venue};
use backline_store::{Collection, MemoryStore, RecordStore};
use chrono::NaiveDate;

/// Venue over a fresh in-memory store seeded with two rooms and one
/// contact, using deterministic ids.
pub fn venue() -> Venue<MemoryStore> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let store = MemoryStore::new();
    store
        .replace_all(
            Collection::Rooms,
            &[
                Room {
                    id: "sala1".into(),
                    name: "Sala 1".into(),
                    color: RoomColor::Blue,
                    price: Money::new(8500),
                },
                Room {
                    id: "sala2".into(),
                    name: "Sala 2".into(),
                    color: RoomColor::Green,
                    price: Money::new(9000),
                },
            ],
        )
        .expect("seed rooms");
    store
        .replace_all(
            Collection::Contacts,
            &[Contact {
                id: "contact-1".into(),
                name: "Nacho".into(),
                band_name: "Los Persas".into(),
                debt: Money::zero(),
                is_abono: false,
            }],
        )
        .expect("seed contacts");

    Venue::with_ids(store, Box::new(SequenceSource::default()))
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().expect("date")
}

pub fn time(s: &str) -> WallTime {
    s.parse().expect("time")
}

pub fn request(date_s: &str, start: &str, end: &str, room_id: &str, band: &str) -> SlotRequest {
    SlotRequest {
        date: date(date_s),
        start: time(start),
        end: time(end),
        room_id: room_id.to_string(),
        band_name: band.to_string(),
    }
}

//! Filesystem round-trip tests for the JSON file backend.

use backline_core::{
    Consumption, Contact, Money, PaymentMethod, Reservation, ReservationStatus, Room, RoomColor,
    Transaction, TransactionKind,
};
use backline_store::{Collection, JsonFileStore, RecordStore};
use chrono::Utc;
use tempfile::TempDir;

fn open_store() -> (TempDir, JsonFileStore) {
    let dir = TempDir::new().expect("temp dir");
    let store = JsonFileStore::open(dir.path().join("data")).expect("open store");
    (dir, store)
}

fn sample_reservation(id: &str) -> Reservation {
    Reservation {
        id: id.to_string(),
        band_name: "Los Persas".to_string(),
        date: "2024-07-01".parse().unwrap(),
        start: "18:00".parse().unwrap(),
        end: "20:00".parse().unwrap(),
        room_id: "sala1".to_string(),
        status: ReservationStatus::Confirmed,
        total: Money::new(8500),
        is_abono: false,
    }
}

#[test]
fn absent_files_read_as_empty_collections() {
    let (_dir, store) = open_store();
    for collection in Collection::ALL {
        let rows: Vec<serde_json::Value> = store.get_all(collection).unwrap();
        assert!(rows.is_empty(), "{:?} should start empty", collection);
    }
    assert_eq!(store.initial_float().unwrap(), Money::zero());
}

#[test]
fn every_entity_type_round_trips() {
    let (_dir, store) = open_store();

    let rooms = vec![Room {
        id: "sala1".into(),
        name: "Sala 1".into(),
        color: RoomColor::Blue,
        price: Money::new(8500),
    }];
    store.replace_all(Collection::Rooms, &rooms).unwrap();

    let reservations = vec![sample_reservation("r1"), sample_reservation("r2")];
    store
        .replace_all(Collection::Reservations, &reservations)
        .unwrap();

    let mut tab = Consumption::new("c1", "r1");
    tab.add_line("beer", "IPA Lager", Money::new(2500));
    store.replace_all(Collection::Consumptions, &[tab]).unwrap();

    let transactions = vec![Transaction {
        id: "t1".into(),
        kind: TransactionKind::Income,
        category: "room settlement".into(),
        amount: Money::new(11_000),
        timestamp: Utc::now(),
        description: "Settled Los Persas".into(),
        paid: true,
        method: Some(PaymentMethod::Cash),
    }];
    store
        .replace_all(Collection::Transactions, &transactions)
        .unwrap();

    let contacts = vec![Contact {
        id: "k1".into(),
        name: "Nacho".into(),
        band_name: "Los Persas".into(),
        debt: Money::new(6000),
        is_abono: true,
    }];
    store.replace_all(Collection::Contacts, &contacts).unwrap();

    let rooms_back: Vec<Room> = store.get_all(Collection::Rooms).unwrap();
    assert_eq!(rooms_back[0].price, Money::new(8500));

    let res_back: Vec<Reservation> = store.get_all(Collection::Reservations).unwrap();
    assert_eq!(res_back.len(), 2);
    assert_eq!(res_back[0].start, "18:00".parse().unwrap());

    let tabs_back: Vec<Consumption> = store.get_all(Collection::Consumptions).unwrap();
    assert_eq!(tabs_back[0].total, Money::new(2500));

    let txs_back: Vec<Transaction> = store.get_all(Collection::Transactions).unwrap();
    assert_eq!(txs_back[0].method, Some(PaymentMethod::Cash));

    let contacts_back: Vec<Contact> = store.get_all(Collection::Contacts).unwrap();
    assert_eq!(contacts_back[0].debt, Money::new(6000));
}

#[test]
fn replace_all_with_empty_vector_clears_the_file() {
    let (_dir, store) = open_store();

    store
        .replace_all(Collection::Reservations, &[sample_reservation("r1")])
        .unwrap();
    store
        .replace_all(Collection::Reservations, &[] as &[Reservation])
        .unwrap();

    let rows: Vec<Reservation> = store.get_all(Collection::Reservations).unwrap();
    assert!(rows.is_empty());
    assert!(store.collection_path(Collection::Reservations).exists());
}

#[test]
fn initial_float_round_trips() {
    let (_dir, store) = open_store();
    store.set_initial_float(Money::new(50_000)).unwrap();
    assert_eq!(store.initial_float().unwrap(), Money::new(50_000));

    store.set_initial_float(Money::zero()).unwrap();
    assert_eq!(store.initial_float().unwrap(), Money::zero());
}

#[test]
fn reopening_the_store_sees_persisted_data() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data");

    {
        let store = JsonFileStore::open(&path).unwrap();
        store
            .replace_all(Collection::Reservations, &[sample_reservation("r1")])
            .unwrap();
        store.set_initial_float(Money::new(1234)).unwrap();
    }

    let reopened = JsonFileStore::open(&path).unwrap();
    let rows: Vec<Reservation> = reopened.get_all(Collection::Reservations).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(reopened.initial_float().unwrap(), Money::new(1234));
}

#[test]
fn no_tmp_files_left_behind_after_writes() {
    let (_dir, store) = open_store();
    store
        .replace_all(Collection::Rooms, &[] as &[Room])
        .unwrap();
    store.set_initial_float(Money::new(10)).unwrap();

    let leftovers: Vec<_> = std::fs::read_dir(store.collection_path(Collection::Rooms).parent().unwrap())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

//! # In-Memory Store
//!
//! A [`RecordStore`] that lives entirely in process memory. Used by the
//! test suites and by ephemeral sessions that don't need their data to
//! outlive the process.
//!
//! Records are held as serialized JSON per collection so that both
//! backends exercise exactly the same serde path — a type that
//! round-trips here round-trips on disk.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use backline_core::Money;

use crate::error::StoreResult;
use crate::{Collection, RecordStore, INITIAL_FLOAT_KEY};

/// In-process record store.
///
/// Interior mutability behind a `Mutex` so the store can be shared by
/// reference; every operation takes the lock for its full duration.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<&'static str, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl RecordStore for MemoryStore {
    fn get_all<T: DeserializeOwned>(&self, collection: Collection) -> StoreResult<Vec<T>> {
        let slots = self.slots.lock().expect("store mutex poisoned");
        match slots.get(collection.key()) {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn replace_all<T: Serialize>(
        &self,
        collection: Collection,
        records: &[T],
    ) -> StoreResult<()> {
        let raw = serde_json::to_string(records)?;
        let mut slots = self.slots.lock().expect("store mutex poisoned");
        slots.insert(collection.key(), raw);
        Ok(())
    }

    fn initial_float(&self) -> StoreResult<Money> {
        let slots = self.slots.lock().expect("store mutex poisoned");
        match slots.get(INITIAL_FLOAT_KEY) {
            Some(raw) => Ok(serde_json::from_str(raw)?),
            None => Ok(Money::zero()),
        }
    }

    fn set_initial_float(&self, amount: Money) -> StoreResult<()> {
        let raw = serde_json::to_string(&amount)?;
        let mut slots = self.slots.lock().expect("store mutex poisoned");
        slots.insert(INITIAL_FLOAT_KEY, raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use backline_core::{Room, RoomColor};

    fn room(id: &str, price: i64) -> Room {
        Room {
            id: id.to_string(),
            name: format!("Sala {id}"),
            color: RoomColor::Blue,
            price: Money::new(price),
        }
    }

    #[test]
    fn test_absent_collection_reads_empty() {
        let store = MemoryStore::new();
        let rooms: Vec<Room> = store.get_all(Collection::Rooms).unwrap();
        assert!(rooms.is_empty());
    }

    #[test]
    fn test_replace_all_round_trip() {
        let store = MemoryStore::new();
        store
            .replace_all(Collection::Rooms, &[room("1", 8500), room("2", 9000)])
            .unwrap();

        let rooms: Vec<Room> = store.get_all(Collection::Rooms).unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[1].price, Money::new(9000));
    }

    #[test]
    fn test_replace_all_overwrites_wholesale() {
        let store = MemoryStore::new();
        store
            .replace_all(Collection::Rooms, &[room("1", 8500)])
            .unwrap();
        store
            .replace_all(Collection::Rooms, &[] as &[Room])
            .unwrap();

        let rooms: Vec<Room> = store.get_all(Collection::Rooms).unwrap();
        assert!(rooms.is_empty());
    }

    #[test]
    fn test_initial_float_defaults_to_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.initial_float().unwrap(), Money::zero());

        store.set_initial_float(Money::new(50_000)).unwrap();
        assert_eq!(store.initial_float().unwrap(), Money::new(50_000));
    }
}

//! # Booking Scheduler
//!
//! Validates and creates single or recurring reservations against the
//! existing ones.
//!
//! ## Reservation Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Reservation Lifecycle                           │
//! │                                                                     │
//! │  reserve_single()     → Pending    (client self-service)            │
//! │  reserve_confirmed()  → Confirmed  (staff-authored, 1..n slots)     │
//! │  approve()/reject()   → Pending ⇒ Confirmed | Rejected              │
//! │  cancel(ByClient)     → Rejected   (kept for attendance history)    │
//! │  cancel(InternalError)→ record deleted (bad data, no history)       │
//! │  SettlementEngine     → Confirmed ⇒ Completed                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recurring ("abono") atomicity
//! A recurring booking expands to every weekly repeat inside the starting
//! month. Conflicts are checked for the WHOLE expansion before anything
//! is written; on conflict the operation reports the first failing date
//! and creates nothing. The store has no multi-record transactions, so
//! the batch goes in as a single replace-all write.

use chrono::NaiveDate;
use tracing::{debug, info};

use backline_core::{
    validation::validate_band_name, weekly_dates_in_month, Reservation, ReservationStatus, Room,
    TimeSlot, WallTime,
};
use backline_store::{Collection, RecordStore};

use crate::error::{EngineError, EngineResult};
use crate::ids::IdSource;

/// A slot a caller wants to book.
#[derive(Debug, Clone)]
pub struct SlotRequest {
    pub date: NaiveDate,
    pub start: WallTime,
    pub end: WallTime,
    pub room_id: String,
    pub band_name: String,
}

/// Why a reservation is being cancelled; decides whether the record is
/// kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Client backed out: mark Rejected, keep for attendance statistics.
    ByClient,
    /// The booking was created by mistake: delete it outright.
    InternalError,
}

/// Scheduling service over the reservations collection.
pub struct BookingScheduler<'a, S> {
    store: &'a S,
    ids: &'a dyn IdSource,
}

impl<'a, S: RecordStore> BookingScheduler<'a, S> {
    pub(crate) fn new(store: &'a S, ids: &'a dyn IdSource) -> Self {
        BookingScheduler { store, ids }
    }

    /// Whether a slot is already taken for a room on a date.
    ///
    /// Rejected reservations don't block; back-to-back slots don't
    /// conflict.
    pub fn check_conflict(
        &self,
        date: NaiveDate,
        start: WallTime,
        end: WallTime,
        room_id: &str,
    ) -> EngineResult<bool> {
        let slot = TimeSlot::new(date, start, end)?;
        let reservations: Vec<Reservation> = self.store.get_all(Collection::Reservations)?;
        Ok(find_conflict(&reservations, &slot, room_id))
    }

    /// Books one Pending slot on the client self-service path.
    ///
    /// The room charge is snapshotted from the room's current price; later
    /// price edits never touch existing bookings.
    pub fn reserve_single(&self, request: &SlotRequest) -> EngineResult<Reservation> {
        validate_band_name(&request.band_name)?;
        let slot = TimeSlot::new(request.date, request.start, request.end)?;
        let room = self.room(&request.room_id)?;

        let mut reservations: Vec<Reservation> = self.store.get_all(Collection::Reservations)?;
        if find_conflict(&reservations, &slot, &request.room_id) {
            return Err(EngineError::Conflict { date: request.date });
        }

        let reservation = Reservation {
            id: self.ids.next_id(),
            band_name: request.band_name.trim().to_string(),
            date: request.date,
            start: request.start,
            end: request.end,
            room_id: request.room_id.clone(),
            status: ReservationStatus::Pending,
            total: room.price,
            is_abono: false,
        };
        reservations.push(reservation.clone());
        self.store
            .replace_all(Collection::Reservations, &reservations)?;

        info!(
            reservation_id = %reservation.id,
            band = %reservation.band_name,
            slot = %reservation.slot(),
            "Reservation requested"
        );
        Ok(reservation)
    }

    /// Books one or more Confirmed slots on the staff path.
    ///
    /// With `is_abono` the request expands to every weekly repeat within
    /// the starting month. The whole expansion is conflict-checked before
    /// any write; on conflict nothing is created and the error names the
    /// first conflicting date.
    pub fn reserve_confirmed(
        &self,
        request: &SlotRequest,
        is_abono: bool,
    ) -> EngineResult<Vec<Reservation>> {
        validate_band_name(&request.band_name)?;
        TimeSlot::new(request.date, request.start, request.end)?;
        let room = self.room(&request.room_id)?;

        let dates = if is_abono {
            weekly_dates_in_month(request.date)
        } else {
            vec![request.date]
        };
        debug!(band = %request.band_name, dates = dates.len(), "Expanding booking request");

        // Read-all-then-write-all: every target date is checked against
        // the current collection before the first reservation exists.
        let mut reservations: Vec<Reservation> = self.store.get_all(Collection::Reservations)?;
        for &date in &dates {
            let slot = TimeSlot::new(date, request.start, request.end)?;
            if find_conflict(&reservations, &slot, &request.room_id) {
                return Err(EngineError::Conflict { date });
            }
        }

        let created: Vec<Reservation> = dates
            .iter()
            .map(|&date| Reservation {
                id: self.ids.next_id(),
                band_name: request.band_name.trim().to_string(),
                date,
                start: request.start,
                end: request.end,
                room_id: request.room_id.clone(),
                status: ReservationStatus::Confirmed,
                total: room.price,
                is_abono,
            })
            .collect();

        reservations.extend(created.iter().cloned());
        self.store
            .replace_all(Collection::Reservations, &reservations)?;

        info!(
            band = %request.band_name,
            room = %request.room_id,
            count = created.len(),
            is_abono,
            "Reservations confirmed"
        );
        Ok(created)
    }

    /// Moves a Pending reservation to Confirmed or Rejected.
    pub fn set_status(&self, id: &str, status: ReservationStatus) -> EngineResult<Reservation> {
        self.update(id, |r| r.status = status)
    }

    /// Cancels a reservation. `ByClient` keeps the record as Rejected;
    /// `InternalError` deletes it entirely.
    pub fn cancel(&self, id: &str, reason: CancelReason) -> EngineResult<()> {
        let mut reservations: Vec<Reservation> = self.store.get_all(Collection::Reservations)?;
        let idx = reservations
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| EngineError::not_found("reservation", id))?;

        match reason {
            CancelReason::ByClient => reservations[idx].status = ReservationStatus::Rejected,
            CancelReason::InternalError => {
                reservations.remove(idx);
            }
        }
        self.store
            .replace_all(Collection::Reservations, &reservations)?;

        info!(reservation_id = %id, ?reason, "Reservation cancelled");
        Ok(())
    }

    /// Flips the recurring-subscription flag. Touches nothing else — the
    /// snapshotted room charge stays; only a future settlement changes.
    pub fn toggle_abono(&self, id: &str) -> EngineResult<Reservation> {
        let updated = self.update(id, |r| r.is_abono = !r.is_abono)?;
        info!(reservation_id = %id, is_abono = updated.is_abono, "Abono flag toggled");
        Ok(updated)
    }

    fn update(
        &self,
        id: &str,
        mutate: impl FnOnce(&mut Reservation),
    ) -> EngineResult<Reservation> {
        let mut reservations: Vec<Reservation> = self.store.get_all(Collection::Reservations)?;
        let reservation = reservations
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| EngineError::not_found("reservation", id))?;

        mutate(reservation);
        let updated = reservation.clone();
        self.store
            .replace_all(Collection::Reservations, &reservations)?;
        Ok(updated)
    }

    fn room(&self, room_id: &str) -> EngineResult<Room> {
        let rooms: Vec<Room> = self.store.get_all(Collection::Rooms)?;
        rooms
            .into_iter()
            .find(|r| r.id == room_id)
            .ok_or_else(|| EngineError::not_found("room", room_id))
    }
}

/// Scans a collection for a blocking overlap with `slot` in `room_id`.
fn find_conflict(reservations: &[Reservation], slot: &TimeSlot, room_id: &str) -> bool {
    reservations
        .iter()
        .any(|r| r.room_id == room_id && r.blocks_slot() && r.slot().overlaps(slot))
}

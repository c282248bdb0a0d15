//! Scheduling: conflicts, recurring expansion, cancellation.

mod common;

use backline_core::{Money, Reservation, ReservationStatus, Room};
use backline_engine::{CancelReason, EngineError};
use backline_store::{Collection, RecordStore};

use common::{date, request, time, venue};

#[test]
fn single_reservation_is_pending_with_snapshotted_price() {
    let venue = venue();
    let r = venue
        .scheduler()
        .reserve_single(&request("2024-07-01", "18:00", "20:00", "sala1", "Los Persas"))
        .unwrap();

    assert_eq!(r.status, ReservationStatus::Pending);
    assert_eq!(r.total, Money::new(8500));
    assert!(!r.is_abono);

    let stored: Vec<Reservation> = venue.store().get_all(Collection::Reservations).unwrap();
    assert_eq!(stored.len(), 1);
}

#[test]
fn overlapping_slot_conflicts() {
    let venue = venue();
    let scheduler = venue.scheduler();
    scheduler
        .reserve_confirmed(
            &request("2024-07-01", "18:00", "20:00", "sala1", "Los Persas"),
            false,
        )
        .unwrap();

    // Every overlap shape: straddle-start, straddle-end, contained,
    // containing.
    for (start, end) in [
        ("17:00", "19:00"),
        ("19:00", "21:00"),
        ("18:30", "19:30"),
        ("17:00", "22:00"),
    ] {
        let err = scheduler
            .reserve_single(&request("2024-07-01", start, end, "sala1", "Otros"))
            .unwrap_err();
        assert!(
            matches!(err, EngineError::Conflict { date: d } if d == date("2024-07-01")),
            "{start}-{end} should conflict"
        );
    }
}

#[test]
fn adjacent_slots_do_not_conflict() {
    let venue = venue();
    let scheduler = venue.scheduler();
    scheduler
        .reserve_confirmed(
            &request("2024-07-01", "18:00", "20:00", "sala1", "Los Persas"),
            false,
        )
        .unwrap();

    scheduler
        .reserve_single(&request("2024-07-01", "20:00", "22:00", "sala1", "Otros"))
        .unwrap();
    scheduler
        .reserve_single(&request("2024-07-01", "16:00", "18:00", "sala1", "Terceros"))
        .unwrap();
}

#[test]
fn other_room_or_other_date_does_not_conflict() {
    let venue = venue();
    let scheduler = venue.scheduler();
    scheduler
        .reserve_confirmed(
            &request("2024-07-01", "18:00", "20:00", "sala1", "Los Persas"),
            false,
        )
        .unwrap();

    scheduler
        .reserve_single(&request("2024-07-01", "18:00", "20:00", "sala2", "Otros"))
        .unwrap();
    scheduler
        .reserve_single(&request("2024-07-02", "18:00", "20:00", "sala1", "Otros"))
        .unwrap();
}

#[test]
fn check_conflict_matches_the_overlap_rule() {
    let venue = venue();
    let scheduler = venue.scheduler();
    scheduler
        .reserve_confirmed(
            &request("2024-07-01", "18:00", "20:00", "sala1", "Los Persas"),
            false,
        )
        .unwrap();

    assert!(scheduler
        .check_conflict(date("2024-07-01"), time("19:00"), time("21:00"), "sala1")
        .unwrap());
    assert!(!scheduler
        .check_conflict(date("2024-07-01"), time("20:00"), time("22:00"), "sala1")
        .unwrap());
}

#[test]
fn rejected_reservation_frees_its_slot() {
    let venue = venue();
    let scheduler = venue.scheduler();
    let r = venue
        .scheduler()
        .reserve_single(&request("2024-07-01", "18:00", "20:00", "sala1", "Los Persas"))
        .unwrap();

    scheduler.cancel(&r.id, CancelReason::ByClient).unwrap();

    // The record survives as history…
    let stored: Vec<Reservation> = venue.store().get_all(Collection::Reservations).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].status, ReservationStatus::Rejected);

    // …but no longer blocks the slot.
    scheduler
        .reserve_single(&request("2024-07-01", "18:00", "20:00", "sala1", "Otros"))
        .unwrap();
}

#[test]
fn internal_error_cancel_deletes_the_record() {
    let venue = venue();
    let r = venue
        .scheduler()
        .reserve_single(&request("2024-07-01", "18:00", "20:00", "sala1", "Los Persas"))
        .unwrap();

    venue
        .scheduler()
        .cancel(&r.id, CancelReason::InternalError)
        .unwrap();

    let stored: Vec<Reservation> = venue.store().get_all(Collection::Reservations).unwrap();
    assert!(stored.is_empty());
}

#[test]
fn cancel_and_toggle_report_missing_ids() {
    let venue = venue();
    assert!(matches!(
        venue.scheduler().cancel("ghost", CancelReason::ByClient),
        Err(EngineError::NotFound { .. })
    ));
    assert!(matches!(
        venue.scheduler().toggle_abono("ghost"),
        Err(EngineError::NotFound { .. })
    ));
}

#[test]
fn toggle_abono_flips_the_flag_and_keeps_the_price() {
    let venue = venue();
    let r = venue
        .scheduler()
        .reserve_single(&request("2024-07-01", "18:00", "20:00", "sala1", "Los Persas"))
        .unwrap();

    let toggled = venue.scheduler().toggle_abono(&r.id).unwrap();
    assert!(toggled.is_abono);
    assert_eq!(toggled.total, Money::new(8500));

    let back = venue.scheduler().toggle_abono(&r.id).unwrap();
    assert!(!back.is_abono);
}

#[test]
fn abono_booking_expands_to_every_weekly_repeat_in_the_month() {
    let venue = venue();
    // July 2024: Mondays on the 1st, 8th, 15th, 22nd, 29th.
    let created = venue
        .scheduler()
        .reserve_confirmed(
            &request("2024-07-01", "18:00", "20:00", "sala1", "Los Persas"),
            true,
        )
        .unwrap();

    assert_eq!(created.len(), 5);
    let dates: Vec<String> = created.iter().map(|r| r.date.to_string()).collect();
    assert_eq!(
        dates,
        ["2024-07-01", "2024-07-08", "2024-07-15", "2024-07-22", "2024-07-29"]
    );
    assert!(created
        .iter()
        .all(|r| r.status == ReservationStatus::Confirmed && r.is_abono));

    // Distinct ids even inside the batch.
    let ids: std::collections::HashSet<&str> = created.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids.len(), 5);
}

#[test]
fn abono_expansion_is_atomic_on_conflict() {
    let venue = venue();
    let scheduler = venue.scheduler();

    // Occupy one mid-month Monday.
    scheduler
        .reserve_confirmed(
            &request("2024-07-22", "19:00", "21:00", "sala1", "Otros"),
            false,
        )
        .unwrap();

    let err = scheduler
        .reserve_confirmed(
            &request("2024-07-01", "18:00", "20:00", "sala1", "Los Persas"),
            true,
        )
        .unwrap_err();
    assert!(matches!(err, EngineError::Conflict { date: d } if d == date("2024-07-22")));

    // Zero reservations created: only the blocker remains.
    let stored: Vec<Reservation> = venue.store().get_all(Collection::Reservations).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].band_name, "Otros");
}

#[test]
fn abono_conflict_reports_the_first_failing_date() {
    let venue = venue();
    let scheduler = venue.scheduler();
    for d in ["2024-07-15", "2024-07-22"] {
        scheduler
            .reserve_confirmed(&request(d, "18:00", "20:00", "sala1", "Otros"), false)
            .unwrap();
    }

    let err = scheduler
        .reserve_confirmed(
            &request("2024-07-01", "18:00", "20:00", "sala1", "Los Persas"),
            true,
        )
        .unwrap_err();
    assert!(matches!(err, EngineError::Conflict { date: d } if d == date("2024-07-15")));
}

#[test]
fn abono_in_the_last_week_books_only_the_starting_date() {
    let venue = venue();
    let created = venue
        .scheduler()
        .reserve_confirmed(
            &request("2024-07-29", "18:00", "20:00", "sala1", "Los Persas"),
            true,
        )
        .unwrap();
    assert_eq!(created.len(), 1);
}

#[test]
fn room_price_edits_never_touch_existing_reservations() {
    let venue = venue();
    let r = venue
        .scheduler()
        .reserve_single(&request("2024-07-01", "18:00", "20:00", "sala1", "Los Persas"))
        .unwrap();
    assert_eq!(r.total, Money::new(8500));

    // The pricing collaborator raises the room price.
    let mut rooms: Vec<Room> = venue.store().get_all(Collection::Rooms).unwrap();
    rooms[0].price = Money::new(12_000);
    venue
        .store()
        .replace_all(Collection::Rooms, &rooms)
        .unwrap();

    let stored: Vec<Reservation> = venue.store().get_all(Collection::Reservations).unwrap();
    assert_eq!(stored[0].total, Money::new(8500), "snapshot must not move");

    // New bookings pick up the new price.
    let r2 = venue
        .scheduler()
        .reserve_single(&request("2024-07-02", "18:00", "20:00", "sala1", "Los Persas"))
        .unwrap();
    assert_eq!(r2.total, Money::new(12_000));
}

#[test]
fn midnight_ending_slot_books_and_conflicts() {
    let venue = venue();
    let scheduler = venue.scheduler();
    scheduler
        .reserve_confirmed(
            &request("2024-07-01", "22:00", "24:00", "sala1", "Los Persas"),
            false,
        )
        .unwrap();

    let err = scheduler
        .reserve_single(&request("2024-07-01", "23:00", "24:00", "sala1", "Otros"))
        .unwrap_err();
    assert!(matches!(err, EngineError::Conflict { .. }));
}

#[test]
fn invalid_input_is_rejected_before_any_write() {
    let venue = venue();
    let scheduler = venue.scheduler();

    // Empty band name.
    assert!(matches!(
        scheduler.reserve_single(&request("2024-07-01", "18:00", "20:00", "sala1", "  ")),
        Err(EngineError::Validation(_))
    ));
    // Empty time range.
    assert!(matches!(
        scheduler.reserve_single(&request("2024-07-01", "20:00", "18:00", "sala1", "Los Persas")),
        Err(EngineError::Validation(_))
    ));
    // Unknown room.
    assert!(matches!(
        scheduler.reserve_single(&request("2024-07-01", "18:00", "20:00", "sala9", "Los Persas")),
        Err(EngineError::NotFound { .. })
    ));

    let stored: Vec<Reservation> = venue.store().get_all(Collection::Reservations).unwrap();
    assert!(stored.is_empty());
}

#[test]
fn pending_reservation_can_be_approved() {
    let venue = venue();
    let r = venue
        .scheduler()
        .reserve_single(&request("2024-07-01", "18:00", "20:00", "sala1", "Los Persas"))
        .unwrap();

    let approved = venue
        .scheduler()
        .set_status(&r.id, ReservationStatus::Confirmed)
        .unwrap();
    assert_eq!(approved.status, ReservationStatus::Confirmed);
}

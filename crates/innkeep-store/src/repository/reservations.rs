//! Reservations: booking validation, conflict scans, status transitions.
//!
//! Creation takes the already-fetched guest and room so the rule ordering
//! is fixed here in one place: guest active → room available → capacity →
//! date range → overlap scan. The first failure wins; later checks never
//! run.

use tracing::{debug, info};

use innkeep_core::types::{Guest, Reservation, ReservationStatus, Room, RoomStatus};
use innkeep_core::validation::{billable_nights, ranges_overlap, validate_date_range};
use innkeep_core::ValidationError;

use crate::error::StoreResult;
use crate::paths::DataDir;
use crate::repository::contains_ignore_case;
use crate::store::{RecordStore, Rewrite};

/// Input for booking a stay.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub guest_id: u32,
    pub room_id: u32,
    pub check_in: String,
    pub check_out: String,
    pub num_guests: u32,
    /// Deposit taken at booking time.
    pub paid_amount: f64,
    pub notes: String,
    pub created_by: u32,
}

pub struct ReservationRepository {
    store: RecordStore<Reservation>,
}

impl ReservationRepository {
    pub fn new(data: &DataDir) -> Self {
        ReservationRepository {
            store: RecordStore::new(data.reservations_file()),
        }
    }

    /// Books a stay after the full ordered validation. `total_amount` is
    /// fixed at creation: nightly rate × billable nights.
    pub fn create(
        &self,
        input: NewReservation,
        guest: &Guest,
        room: &Room,
        now: &str,
    ) -> StoreResult<u32> {
        if !guest.is_active {
            return Err(ValidationError::GuestInactive {
                guest_id: guest.id,
            }
            .into());
        }
        if room.status != RoomStatus::Available {
            return Err(ValidationError::RoomUnavailable { room_id: room.id }.into());
        }
        if input.num_guests == 0 {
            return Err(ValidationError::MustBePositive {
                field: "num_guests",
            }
            .into());
        }
        if input.num_guests > room.capacity {
            return Err(ValidationError::CapacityExceeded {
                room_id: room.id,
                capacity: room.capacity,
                requested: input.num_guests,
            }
            .into());
        }
        validate_date_range(&input.check_in, &input.check_out)?;
        if self.has_conflict(room.id, &input.check_in, &input.check_out)? {
            return Err(ValidationError::OverlappingReservation {
                room_id: room.id,
                check_in: input.check_in,
                check_out: input.check_out,
            }
            .into());
        }

        let nights = billable_nights(&input.check_in, &input.check_out);
        let id = self.store.next_id()?;
        let reservation = Reservation {
            id,
            guest_id: guest.id,
            room_id: room.id,
            check_in: input.check_in,
            check_out: input.check_out,
            status: ReservationStatus::Confirmed,
            num_guests: input.num_guests,
            total_amount: room.rate * nights as f64,
            paid_amount: input.paid_amount,
            created_at: now.to_string(),
            created_by: input.created_by,
            notes: input.notes,
            is_active: true,
        };
        self.store.append(&reservation)?;
        info!(
            reservation_id = id,
            guest_id = guest.id,
            room_id = room.id,
            nights,
            total = reservation.total_amount,
            "reservation booked"
        );
        Ok(id)
    }

    pub fn get(&self, id: u32) -> StoreResult<Option<Reservation>> {
        self.store.find_first(|r| r.id == id && r.is_active)
    }

    /// True when any active Confirmed/CheckedIn reservation of this room
    /// overlaps the half-open interval `[check_in, check_out)`.
    pub fn has_conflict(&self, room_id: u32, check_in: &str, check_out: &str) -> StoreResult<bool> {
        Ok(self
            .store
            .find_first(|r| {
                r.is_active
                    && r.room_id == room_id
                    && r.status.holds_room()
                    && ranges_overlap(&r.check_in, &r.check_out, check_in, check_out)
            })?
            .is_some())
    }

    /// True when the room is held by any active booking, regardless of
    /// dates. Gates room retirement.
    pub fn room_has_active(&self, room_id: u32) -> StoreResult<bool> {
        Ok(self
            .store
            .find_first(|r| r.is_active && r.room_id == room_id && r.status.holds_room())?
            .is_some())
    }

    /// True when the guest holds any active booking. Gates guest removal.
    pub fn guest_has_active(&self, guest_id: u32) -> StoreResult<bool> {
        Ok(self
            .store
            .find_first(|r| r.is_active && r.guest_id == guest_id && r.status.holds_room())?
            .is_some())
    }

    pub fn set_status(&self, id: u32, status: ReservationStatus) -> StoreResult<bool> {
        let matched = self.store.rewrite_where(
            |r| r.id == id && r.is_active,
            |mut r| {
                r.status = status;
                Rewrite::Keep(r)
            },
        )?;
        if matched > 0 {
            debug!(reservation_id = id, %status, "reservation status changed");
        }
        Ok(matched > 0)
    }

    /// Marks the stay as fully paid (`paid_amount = total_amount`). Runs
    /// when the stay's invoice is settled.
    pub fn settle(&self, id: u32) -> StoreResult<bool> {
        let matched = self.store.rewrite_where(
            |r| r.id == id && r.is_active,
            |mut r| {
                r.paid_amount = r.total_amount;
                Rewrite::Keep(r)
            },
        )?;
        Ok(matched > 0)
    }

    pub fn list(&self, status: Option<ReservationStatus>) -> StoreResult<Vec<Reservation>> {
        self.store
            .find_all(|r| r.is_active && status.map_or(true, |s| r.status == s))
    }

    pub fn list_for_guest(&self, guest_id: u32) -> StoreResult<Vec<Reservation>> {
        self.store
            .find_all(|r| r.is_active && r.guest_id == guest_id)
    }

    pub fn list_for_room(&self, room_id: u32) -> StoreResult<Vec<Reservation>> {
        self.store.find_all(|r| r.is_active && r.room_id == room_id)
    }

    /// Case-insensitive substring search over the stay dates and notes.
    pub fn search(&self, term: &str) -> StoreResult<Vec<Reservation>> {
        self.store.find_all(|r| {
            r.is_active
                && (r.check_in.contains(term)
                    || r.check_out.contains(term)
                    || contains_ignore_case(&r.notes, term))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use innkeep_core::types::{RoomType, VipStatus};
    use tempfile::TempDir;

    fn repo() -> (TempDir, ReservationRepository) {
        let dir = TempDir::new().unwrap();
        let data = DataDir::open(dir.path().join("data")).unwrap();
        (dir, ReservationRepository::new(&data))
    }

    fn guest(id: u32) -> Guest {
        Guest {
            id,
            name: "Ada".to_string(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            id_type: String::new(),
            id_number: String::new(),
            registration_date: "2024-01-01".to_string(),
            total_stays: 0,
            total_spent: 0.0,
            vip_status: VipStatus::Regular,
            notes: String::new(),
            is_active: true,
        }
    }

    fn room(id: u32) -> Room {
        Room {
            id,
            room_type: RoomType::Standard,
            status: RoomStatus::Available,
            rate: 100.0,
            capacity: 2,
            floor: 1,
            description: "Room".to_string(),
            features: String::new(),
            is_active: true,
        }
    }

    fn booking(guest_id: u32, room_id: u32, check_in: &str, check_out: &str) -> NewReservation {
        NewReservation {
            guest_id,
            room_id,
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
            num_guests: 2,
            paid_amount: 0.0,
            notes: String::new(),
            created_by: 1,
        }
    }

    const NOW: &str = "2024-02-20 10:00:00";

    #[test]
    fn total_is_rate_times_nights() {
        let (_dir, reservations) = repo();
        let id = reservations
            .create(
                booking(7, 101, "2024-03-01", "2024-03-04"),
                &guest(7),
                &room(101),
                NOW,
            )
            .unwrap();
        let stored = reservations.get(id).unwrap().unwrap();
        assert_eq!(stored.total_amount, 300.0);
        assert_eq!(stored.status, ReservationStatus::Confirmed);
        assert_eq!(stored.created_at, NOW);
    }

    #[test]
    fn validation_order_guest_before_room_before_dates() {
        let (_dir, reservations) = repo();
        let mut inactive_guest = guest(7);
        inactive_guest.is_active = false;
        let mut occupied_room = room(101);
        occupied_room.status = RoomStatus::Occupied;

        // Both guest and room are bad: the guest error wins.
        let err = reservations
            .create(
                booking(7, 101, "bad-date", "2024-03-04"),
                &inactive_guest,
                &occupied_room,
                NOW,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::GuestInactive { guest_id: 7 })
        ));

        // Room and dates are bad: the room error wins.
        let err = reservations
            .create(
                booking(7, 101, "bad-date", "2024-03-04"),
                &guest(7),
                &occupied_room,
                NOW,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::RoomUnavailable { room_id: 101 })
        ));
    }

    #[test]
    fn capacity_is_enforced() {
        let (_dir, reservations) = repo();
        let mut over = booking(7, 101, "2024-03-01", "2024-03-04");
        over.num_guests = 3;
        let err = reservations
            .create(over, &guest(7), &room(101), NOW)
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::CapacityExceeded {
                capacity: 2,
                requested: 3,
                ..
            })
        ));
    }

    #[test]
    fn overlapping_bookings_are_rejected() {
        let (_dir, reservations) = repo();
        reservations
            .create(
                booking(7, 101, "2024-03-01", "2024-03-04"),
                &guest(7),
                &room(101),
                NOW,
            )
            .unwrap();

        let err = reservations
            .create(
                booking(8, 101, "2024-03-03", "2024-03-06"),
                &guest(8),
                &room(101),
                NOW,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::OverlappingReservation { .. })
        ));

        // Back-to-back is fine: checkout day equals the next check-in.
        assert!(reservations
            .create(
                booking(8, 101, "2024-03-04", "2024-03-06"),
                &guest(8),
                &room(101),
                NOW,
            )
            .is_ok());

        // A different room never conflicts.
        assert!(reservations
            .create(
                booking(8, 102, "2024-03-02", "2024-03-05"),
                &guest(8),
                &room(102),
                NOW,
            )
            .is_ok());
    }

    #[test]
    fn cancelled_bookings_release_the_dates() {
        let (_dir, reservations) = repo();
        let id = reservations
            .create(
                booking(7, 101, "2024-03-01", "2024-03-04"),
                &guest(7),
                &room(101),
                NOW,
            )
            .unwrap();
        reservations
            .set_status(id, ReservationStatus::Cancelled)
            .unwrap();

        assert!(!reservations
            .has_conflict(101, "2024-03-01", "2024-03-04")
            .unwrap());
        assert!(!reservations.room_has_active(101).unwrap());
        assert!(!reservations.guest_has_active(7).unwrap());
    }

    #[test]
    fn active_booking_blocks_room_and_guest_removal() {
        let (_dir, reservations) = repo();
        reservations
            .create(
                booking(7, 101, "2024-03-01", "2024-03-04"),
                &guest(7),
                &room(101),
                NOW,
            )
            .unwrap();
        assert!(reservations.room_has_active(101).unwrap());
        assert!(reservations.guest_has_active(7).unwrap());
    }

    #[test]
    fn settle_pays_in_full() {
        let (_dir, reservations) = repo();
        let id = reservations
            .create(
                booking(7, 101, "2024-03-01", "2024-03-04"),
                &guest(7),
                &room(101),
                NOW,
            )
            .unwrap();
        assert!(reservations.settle(id).unwrap());
        let stored = reservations.get(id).unwrap().unwrap();
        assert_eq!(stored.paid_amount, stored.total_amount);
    }

    #[test]
    fn list_and_search() {
        let (_dir, reservations) = repo();
        let first = reservations
            .create(
                booking(7, 101, "2024-03-01", "2024-03-04"),
                &guest(7),
                &room(101),
                NOW,
            )
            .unwrap();
        let mut noted = booking(8, 102, "2024-04-10", "2024-04-12");
        noted.notes = "Anniversary stay".to_string();
        reservations
            .create(noted, &guest(8), &room(102), NOW)
            .unwrap();

        reservations
            .set_status(first, ReservationStatus::CheckedIn)
            .unwrap();
        assert_eq!(
            reservations
                .list(Some(ReservationStatus::CheckedIn))
                .unwrap()
                .len(),
            1
        );
        assert_eq!(reservations.list(None).unwrap().len(), 2);
        assert_eq!(reservations.list_for_guest(8).unwrap().len(), 1);
        assert_eq!(reservations.list_for_room(101).unwrap().len(), 1);
        assert_eq!(reservations.search("anniversary").unwrap().len(), 1);
        assert_eq!(reservations.search("2024-03").unwrap().len(), 1);
    }
}

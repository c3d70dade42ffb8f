//! Room inventory: creation, status changes, detail edits, search.

use tracing::{debug, info};

use innkeep_core::types::{Room, RoomStatus, RoomType};
use innkeep_core::validation::{validate_positive, validate_required};
use innkeep_core::ValidationError;

use crate::error::StoreResult;
use crate::paths::DataDir;
use crate::repository::contains_ignore_case;
use crate::store::{RecordStore, Rewrite};

/// Input for room creation. The operator picks the id: it IS the room
/// number painted on the door.
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub id: u32,
    pub room_type: RoomType,
    pub rate: f64,
    pub capacity: u32,
    pub floor: u32,
    pub description: String,
    pub features: String,
}

pub struct RoomRepository {
    store: RecordStore<Room>,
}

impl RoomRepository {
    pub fn new(data: &DataDir) -> Self {
        RoomRepository {
            store: RecordStore::new(data.rooms_file()),
        }
    }

    /// Creates a room in Available status. The room number must be unique
    /// across all records, retired rooms included.
    pub fn create(&self, input: NewRoom) -> StoreResult<u32> {
        validate_positive("rate", input.rate)?;
        if input.capacity == 0 {
            return Err(ValidationError::MustBePositive { field: "capacity" }.into());
        }
        validate_required("description", &input.description)?;
        if self.store.find_first(|r| r.id == input.id)?.is_some() {
            return Err(ValidationError::DuplicateRoom { room_id: input.id }.into());
        }
        let room = Room {
            id: input.id,
            room_type: input.room_type,
            status: RoomStatus::Available,
            rate: input.rate,
            capacity: input.capacity,
            floor: input.floor,
            description: input.description,
            features: input.features,
            is_active: true,
        };
        self.store.append(&room)?;
        info!(room_id = room.id, "room created");
        Ok(room.id)
    }

    pub fn get(&self, id: u32) -> StoreResult<Option<Room>> {
        self.store.find_first(|r| r.id == id && r.is_active)
    }

    /// Replaces the mutable details of a room (type, rate, capacity,
    /// floor, description, features). Status is deliberately NOT taken
    /// from `room`; it moves only through [`RoomRepository::set_status`].
    pub fn update(&self, room: &Room) -> StoreResult<bool> {
        validate_positive("rate", room.rate)?;
        let update = room.clone();
        let matched = self.store.rewrite_where(
            |r| r.id == update.id && r.is_active,
            |current| {
                Rewrite::Keep(Room {
                    status: current.status,
                    is_active: current.is_active,
                    ..update.clone()
                })
            },
        )?;
        Ok(matched > 0)
    }

    pub fn set_status(&self, id: u32, status: RoomStatus) -> StoreResult<bool> {
        let matched = self.store.rewrite_where(
            |r| r.id == id && r.is_active,
            |mut r| {
                r.status = status;
                Rewrite::Keep(r)
            },
        )?;
        if matched > 0 {
            debug!(room_id = id, %status, "room status changed");
        }
        Ok(matched > 0)
    }

    /// Soft delete. Reservation history still references the room number;
    /// the caller must first verify no active reservation holds it.
    pub fn soft_delete(&self, id: u32) -> StoreResult<bool> {
        let matched = self.store.rewrite_where(
            |r| r.id == id && r.is_active,
            |mut r| {
                r.is_active = false;
                Rewrite::Keep(r)
            },
        )?;
        if matched > 0 {
            info!(room_id = id, "room retired");
        }
        Ok(matched > 0)
    }

    /// Lists active rooms, optionally narrowed to one status.
    pub fn list(&self, status: Option<RoomStatus>) -> StoreResult<Vec<Room>> {
        self.store
            .find_all(|r| r.is_active && status.map_or(true, |s| r.status == s))
    }

    /// Case-insensitive substring search over description and features.
    pub fn search(&self, term: &str) -> StoreResult<Vec<Room>> {
        self.store.find_all(|r| {
            r.is_active
                && (contains_ignore_case(&r.description, term)
                    || contains_ignore_case(&r.features, term))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use tempfile::TempDir;

    fn repo() -> (TempDir, RoomRepository) {
        let dir = TempDir::new().unwrap();
        let data = DataDir::open(dir.path().join("data")).unwrap();
        (dir, RoomRepository::new(&data))
    }

    fn new_room(id: u32) -> NewRoom {
        NewRoom {
            id,
            room_type: RoomType::Standard,
            rate: 100.0,
            capacity: 2,
            floor: 1,
            description: format!("Room {id}"),
            features: "WiFi, TV".to_string(),
        }
    }

    #[test]
    fn create_starts_available() {
        let (_dir, rooms) = repo();
        rooms.create(new_room(101)).unwrap();
        let room = rooms.get(101).unwrap().unwrap();
        assert_eq!(room.status, RoomStatus::Available);
        assert_eq!(room.rate, 100.0);
    }

    #[test]
    fn room_numbers_are_unique_forever() {
        let (_dir, rooms) = repo();
        rooms.create(new_room(101)).unwrap();
        let err = rooms.create(new_room(101)).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::DuplicateRoom { room_id: 101 })
        ));

        // Even after retirement the number stays taken.
        rooms.soft_delete(101).unwrap();
        assert!(rooms.create(new_room(101)).is_err());
    }

    #[test]
    fn rejects_nonpositive_rate_and_capacity() {
        let (_dir, rooms) = repo();
        let mut bad = new_room(101);
        bad.rate = 0.0;
        assert!(rooms.create(bad).is_err());

        let mut bad = new_room(101);
        bad.capacity = 0;
        assert!(rooms.create(bad).is_err());
    }

    #[test]
    fn update_preserves_status() {
        let (_dir, rooms) = repo();
        rooms.create(new_room(101)).unwrap();
        rooms.set_status(101, RoomStatus::Occupied).unwrap();

        let mut room = rooms.get(101).unwrap().unwrap();
        room.rate = 135.0;
        room.status = RoomStatus::Available; // must be ignored
        assert!(rooms.update(&room).unwrap());

        let stored = rooms.get(101).unwrap().unwrap();
        assert_eq!(stored.rate, 135.0);
        assert_eq!(stored.status, RoomStatus::Occupied);
    }

    #[test]
    fn list_filters_by_status() {
        let (_dir, rooms) = repo();
        rooms.create(new_room(101)).unwrap();
        rooms.create(new_room(102)).unwrap();
        rooms.create(new_room(103)).unwrap();
        rooms.set_status(102, RoomStatus::Maintenance).unwrap();

        assert_eq!(rooms.list(None).unwrap().len(), 3);
        let available = rooms.list(Some(RoomStatus::Available)).unwrap();
        assert_eq!(
            available.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![101, 103]
        );
    }

    #[test]
    fn search_spans_description_and_features() {
        let (_dir, rooms) = repo();
        let mut corner = new_room(101);
        corner.description = "Corner room with balcony".to_string();
        rooms.create(corner).unwrap();
        let mut spa = new_room(102);
        spa.features = "Jacuzzi, Minibar".to_string();
        rooms.create(spa).unwrap();

        assert_eq!(rooms.search("BALCONY").unwrap().len(), 1);
        assert_eq!(rooms.search("jacuzzi").unwrap().len(), 1);
        assert_eq!(rooms.search("sauna").unwrap().len(), 0);
    }

    #[test]
    fn retired_rooms_vanish_from_reads() {
        let (_dir, rooms) = repo();
        rooms.create(new_room(101)).unwrap();
        assert!(rooms.soft_delete(101).unwrap());
        assert!(rooms.get(101).unwrap().is_none());
        assert!(rooms.list(None).unwrap().is_empty());
        // Second delete is a no-op.
        assert!(!rooms.soft_delete(101).unwrap());
    }
}

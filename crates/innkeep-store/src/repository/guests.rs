//! Guest registry: contact details, search, and the derived stay/VIP stats.

use tracing::{debug, info};

use innkeep_core::recompute::apply_stay;
use innkeep_core::types::{Guest, VipStatus};
use innkeep_core::validation::validate_required;

use crate::error::StoreResult;
use crate::paths::DataDir;
use crate::repository::contains_ignore_case;
use crate::store::{RecordStore, Rewrite};

/// Input for guest registration.
#[derive(Debug, Clone, Default)]
pub struct NewGuest {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub id_type: String,
    pub id_number: String,
    pub notes: String,
}

pub struct GuestRepository {
    store: RecordStore<Guest>,
}

impl GuestRepository {
    pub fn new(data: &DataDir) -> Self {
        GuestRepository {
            store: RecordStore::new(data.guests_file()),
        }
    }

    /// Registers a guest. Stats start at zero; `registration_date` is the
    /// caller-supplied `today` so this stays clock-free.
    pub fn create(&self, input: NewGuest, today: &str) -> StoreResult<u32> {
        validate_required("name", &input.name)?;
        let id = self.store.next_id()?;
        let guest = Guest {
            id,
            name: input.name,
            address: input.address,
            phone: input.phone,
            email: input.email,
            id_type: input.id_type,
            id_number: input.id_number,
            registration_date: today.to_string(),
            total_stays: 0,
            total_spent: 0.0,
            vip_status: VipStatus::Regular,
            notes: input.notes,
            is_active: true,
        };
        self.store.append(&guest)?;
        info!(guest_id = id, "guest registered");
        Ok(id)
    }

    pub fn get(&self, id: u32) -> StoreResult<Option<Guest>> {
        self.store.find_first(|g| g.id == id && g.is_active)
    }

    /// Updates contact fields. The derived stats (stays, spend, tier) and
    /// the registration date are kept from the stored record; they move
    /// only through [`GuestRepository::record_stay`].
    pub fn update(&self, guest: &Guest) -> StoreResult<bool> {
        validate_required("name", &guest.name)?;
        let update = guest.clone();
        let matched = self.store.rewrite_where(
            |g| g.id == update.id && g.is_active,
            |current| {
                Rewrite::Keep(Guest {
                    registration_date: current.registration_date,
                    total_stays: current.total_stays,
                    total_spent: current.total_spent,
                    vip_status: current.vip_status,
                    is_active: current.is_active,
                    ..update.clone()
                })
            },
        )?;
        Ok(matched > 0)
    }

    /// Folds one completed stay into the guest's stats and re-derives the
    /// loyalty tier, all in a single rewrite pass.
    pub fn record_stay(&self, id: u32, amount: f64) -> StoreResult<bool> {
        let matched = self.store.rewrite_where(
            |g| g.id == id && g.is_active,
            |mut g| {
                apply_stay(&mut g, amount);
                debug!(
                    guest_id = id,
                    total_spent = g.total_spent,
                    tier = %g.vip_status,
                    "stay recorded"
                );
                Rewrite::Keep(g)
            },
        )?;
        Ok(matched > 0)
    }

    /// Soft delete. The caller must first verify the guest holds no active
    /// reservation.
    pub fn soft_delete(&self, id: u32) -> StoreResult<bool> {
        let matched = self.store.rewrite_where(
            |g| g.id == id && g.is_active,
            |mut g| {
                g.is_active = false;
                Rewrite::Keep(g)
            },
        )?;
        if matched > 0 {
            info!(guest_id = id, "guest removed");
        }
        Ok(matched > 0)
    }

    pub fn list(&self) -> StoreResult<Vec<Guest>> {
        self.store.find_all(|g| g.is_active)
    }

    /// Case-insensitive substring search over name, phone and email.
    pub fn search(&self, term: &str) -> StoreResult<Vec<Guest>> {
        self.store.find_all(|g| {
            g.is_active
                && (contains_ignore_case(&g.name, term)
                    || contains_ignore_case(&g.phone, term)
                    || contains_ignore_case(&g.email, term))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repo() -> (TempDir, GuestRepository) {
        let dir = TempDir::new().unwrap();
        let data = DataDir::open(dir.path().join("data")).unwrap();
        (dir, GuestRepository::new(&data))
    }

    fn new_guest(name: &str) -> NewGuest {
        NewGuest {
            name: name.to_string(),
            phone: "555-0100".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            ..NewGuest::default()
        }
    }

    #[test]
    fn registration_starts_with_zero_stats() {
        let (_dir, guests) = repo();
        let id = guests.create(new_guest("Ada"), "2024-03-01").unwrap();
        let guest = guests.get(id).unwrap().unwrap();
        assert_eq!(guest.registration_date, "2024-03-01");
        assert_eq!(guest.total_stays, 0);
        assert_eq!(guest.total_spent, 0.0);
        assert_eq!(guest.vip_status, VipStatus::Regular);
    }

    #[test]
    fn name_is_required() {
        let (_dir, guests) = repo();
        assert!(guests.create(new_guest("  "), "2024-03-01").is_err());
    }

    #[test]
    fn update_cannot_touch_derived_stats() {
        let (_dir, guests) = repo();
        let id = guests.create(new_guest("Ada"), "2024-03-01").unwrap();
        guests.record_stay(id, 480.0).unwrap();

        let mut guest = guests.get(id).unwrap().unwrap();
        guest.phone = "555-0199".to_string();
        guest.total_spent = 99999.0; // must be ignored
        guest.vip_status = VipStatus::Platinum; // must be ignored
        assert!(guests.update(&guest).unwrap());

        let stored = guests.get(id).unwrap().unwrap();
        assert_eq!(stored.phone, "555-0199");
        assert_eq!(stored.total_spent, 480.0);
        assert_eq!(stored.vip_status, VipStatus::Regular);
    }

    #[test]
    fn stays_accumulate_and_promote() {
        let (_dir, guests) = repo();
        let id = guests.create(new_guest("Ada"), "2024-03-01").unwrap();
        guests.record_stay(id, 480.0).unwrap();
        guests.record_stay(id, 600.0).unwrap();

        let guest = guests.get(id).unwrap().unwrap();
        assert_eq!(guest.total_stays, 2);
        assert_eq!(guest.total_spent, 1080.0);
        assert_eq!(guest.vip_status, VipStatus::Silver);
    }

    #[test]
    fn ids_never_reused_after_removal() {
        let (_dir, guests) = repo();
        let first = guests.create(new_guest("Ada"), "2024-03-01").unwrap();
        guests.soft_delete(first).unwrap();
        let second = guests.create(new_guest("Bob"), "2024-03-02").unwrap();
        assert!(second > first);
        assert!(guests.get(first).unwrap().is_none());
    }

    #[test]
    fn search_spans_name_phone_email() {
        let (_dir, guests) = repo();
        guests.create(new_guest("Ada Lovelace"), "2024-03-01").unwrap();
        guests.create(new_guest("Bob"), "2024-03-01").unwrap();

        assert_eq!(guests.search("lovelace").unwrap().len(), 1);
        assert_eq!(guests.search("555-01").unwrap().len(), 2);
        assert_eq!(guests.search("bob@example.com").unwrap().len(), 1);
        assert!(guests.search("carol").unwrap().is_empty());
    }
}

//! Operator accounts: authentication, password changes, deactivation.

use tracing::{debug, info, warn};

use innkeep_core::password::{hash_password, verify_password};
use innkeep_core::types::{User, UserRole};
use innkeep_core::validation::validate_username;
use innkeep_core::{
    ValidationError, DEFAULT_ADMIN_NAME, DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME,
};

use crate::error::StoreResult;
use crate::paths::DataDir;
use crate::repository::contains_ignore_case;
use crate::store::{RecordStore, Rewrite};

pub struct UserRepository {
    store: RecordStore<User>,
}

impl UserRepository {
    pub fn new(data: &DataDir) -> Self {
        UserRepository {
            store: RecordStore::new(data.users_file()),
        }
    }

    /// Seeds the default admin account into an EMPTY user store so first
    /// login on a fresh install works. A store with any record at all
    /// (even deactivated) is left alone.
    pub fn seed_default_admin(&self) -> StoreResult<()> {
        if self.store.find_first(|_| true)?.is_some() {
            return Ok(());
        }
        let admin = User {
            id: 1,
            username: DEFAULT_ADMIN_USERNAME.to_string(),
            password_hash: hash_password(DEFAULT_ADMIN_PASSWORD),
            full_name: DEFAULT_ADMIN_NAME.to_string(),
            role: UserRole::Admin,
            last_login: "Never".to_string(),
            is_active: true,
        };
        self.store.append(&admin)?;
        info!("default admin account seeded");
        Ok(())
    }

    /// Creates an account. Usernames are unique across ALL records,
    /// deactivated ones included, so a retired name cannot be reclaimed
    /// and confused with its history.
    pub fn create(
        &self,
        username: &str,
        password: &str,
        full_name: &str,
        role: UserRole,
    ) -> StoreResult<u32> {
        validate_username(username)?;
        if self
            .store
            .find_first(|u| u.username == username)?
            .is_some()
        {
            return Err(ValidationError::DuplicateUsername {
                username: username.to_string(),
            }
            .into());
        }
        let id = self.store.next_id()?;
        let user = User {
            id,
            username: username.to_string(),
            password_hash: hash_password(password),
            full_name: full_name.to_string(),
            role,
            last_login: "Never".to_string(),
            is_active: true,
        };
        self.store.append(&user)?;
        debug!(id, username, "user created");
        Ok(id)
    }

    pub fn get(&self, id: u32) -> StoreResult<Option<User>> {
        self.store.find_first(|u| u.id == id && u.is_active)
    }

    pub fn get_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        self.store
            .find_first(|u| u.username == username && u.is_active)
    }

    /// Verifies credentials and stamps `last_login`. Unknown usernames and
    /// wrong passwords both come back as [`ValidationError::BadCredentials`];
    /// the caller cannot tell which, on purpose.
    pub fn authenticate(&self, username: &str, password: &str, now: &str) -> StoreResult<User> {
        let user = match self.get_by_username(username)? {
            Some(user) if verify_password(password, &user.password_hash) => user,
            _ => {
                warn!(username, "failed login attempt");
                return Err(ValidationError::BadCredentials.into());
            }
        };
        let stamp = now.to_string();
        self.store.rewrite_where(
            |u| u.id == user.id,
            |mut u| {
                u.last_login = stamp.clone();
                Rewrite::Keep(u)
            },
        )?;
        info!(username, id = user.id, "login");
        Ok(User {
            last_login: now.to_string(),
            ..user
        })
    }

    /// Replaces the stored password checksum. Returns false when the id is
    /// unknown or deactivated.
    pub fn change_password(&self, id: u32, new_password: &str) -> StoreResult<bool> {
        let hash = hash_password(new_password);
        let matched = self.store.rewrite_where(
            |u| u.id == id && u.is_active,
            |mut u| {
                u.password_hash = hash.clone();
                Rewrite::Keep(u)
            },
        )?;
        Ok(matched > 0)
    }

    /// Soft delete: the record stays on disk for `created_by` audit trails.
    pub fn deactivate(&self, id: u32) -> StoreResult<bool> {
        let matched = self.store.rewrite_where(
            |u| u.id == id && u.is_active,
            |mut u| {
                u.is_active = false;
                Rewrite::Keep(u)
            },
        )?;
        if matched > 0 {
            info!(id, "user deactivated");
        }
        Ok(matched > 0)
    }

    pub fn list(&self) -> StoreResult<Vec<User>> {
        self.store.find_all(|u| u.is_active)
    }

    /// Case-insensitive substring search over username and full name.
    pub fn search(&self, term: &str) -> StoreResult<Vec<User>> {
        self.store.find_all(|u| {
            u.is_active
                && (contains_ignore_case(&u.username, term)
                    || contains_ignore_case(&u.full_name, term))
        })
    }
}

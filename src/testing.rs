//! In-memory repository double for service tests. Enforces the same
//! uniqueness and referential rules the Postgres schema does.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::profiles::repo::ProfileRepository;
use crate::profiles::repo_types::{Profile, ProfileDraft};
use crate::users::repo::UserRepository;
use crate::users::repo_types::{User, UserDraft};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    profiles: Vec<Profile>,
    next_user_id: i64,
    next_profile_id: i64,
}

impl Tables {
    fn insert_user(&mut self, draft: UserDraft) -> Result<User> {
        if self.users.iter().any(|u| u.email == draft.email) {
            return Err(Error::DuplicateEmail);
        }
        self.next_user_id += 1;
        let user = User {
            id: self.next_user_id,
            email: draft.email,
            password_hash: draft.password_hash,
            role: draft.role,
            is_active: draft.is_active,
            created_at: draft.created_at,
            updated_at: draft.updated_at,
        };
        self.users.push(user.clone());
        Ok(user)
    }

    fn insert_profile(&mut self, user_id: i64, draft: ProfileDraft) -> Result<Profile> {
        if !self.users.iter().any(|u| u.id == user_id) {
            return Err(Error::NotFound); // no FK target
        }
        if self.profiles.iter().any(|p| p.user_id == user_id) {
            return Err(Error::DuplicateProfile);
        }
        self.next_profile_id += 1;
        let profile = Profile {
            id: self.next_profile_id,
            user_id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            bio: draft.bio,
            location: draft.location,
            hourly_rate: draft.hourly_rate,
            skills: draft.skills,
            portfolio: draft.portfolio,
        };
        self.profiles.push(profile.clone());
        Ok(profile)
    }
}

#[derive(Default)]
pub struct MemoryRepo {
    inner: Mutex<Tables>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_count(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }

    pub fn profile_count(&self) -> usize {
        self.inner.lock().unwrap().profiles.len()
    }
}

#[async_trait]
impl UserRepository for MemoryRepo {
    async fn create(&self, draft: UserDraft) -> Result<User> {
        self.inner.lock().unwrap().insert_user(draft)
    }

    async fn update(&self, user: &User) -> Result<User> {
        let mut tables = self.inner.lock().unwrap();
        if tables
            .users
            .iter()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(Error::DuplicateEmail);
        }
        let slot = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(Error::NotFound)?;
        let created_at = slot.created_at; // immutable column
        *slot = user.clone();
        slot.created_at = created_at;
        Ok(slot.clone())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create_with_profile(
        &self,
        user: UserDraft,
        profile: ProfileDraft,
    ) -> Result<(User, Profile)> {
        let mut tables = self.inner.lock().unwrap();
        let saved_user = tables.insert_user(user)?;
        match tables.insert_profile(saved_user.id, profile) {
            Ok(saved_profile) => Ok((saved_user, saved_profile)),
            Err(e) => {
                // Roll the pair back; no partial writes escape.
                tables.users.retain(|u| u.id != saved_user.id);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl ProfileRepository for MemoryRepo {
    async fn create(&self, user_id: i64, draft: ProfileDraft) -> Result<Profile> {
        self.inner.lock().unwrap().insert_profile(user_id, draft)
    }

    async fn update(&self, profile: &Profile) -> Result<Profile> {
        let mut tables = self.inner.lock().unwrap();
        let slot = tables
            .profiles
            .iter_mut()
            .find(|p| p.id == profile.id)
            .ok_or(Error::NotFound)?;
        let user_id = slot.user_id; // owner never changes
        *slot = profile.clone();
        slot.user_id = user_id;
        Ok(slot.clone())
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Option<Profile>> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .profiles
            .iter()
            .find(|p| p.user_id == user_id)
            .cloned())
    }
}

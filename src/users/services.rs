use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use crate::error::{Error, Result};
use crate::profiles::dto::NewProfile;
use crate::profiles::repo_types::Profile;
use crate::users::dto::{NewUser, UserPatch};
use crate::users::password;
use crate::users::repo::UserRepository;
use crate::users::repo_types::{Role, User, UserDraft};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Account use cases on top of a [`UserRepository`]. Stateless; one
/// repository write per call, no retries.
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Register a new account and return the persisted row, id
    /// included, so callers can reference it immediately.
    #[instrument(skip(self, new))]
    pub async fn create_user(&self, new: NewUser) -> Result<User> {
        let draft = build_draft(new)?;
        let user = self.repo.create(draft).await?;
        info!(user_id = user.id, email = %user.email, "user created");
        Ok(user)
    }

    /// Return the account registered under the email, creating it when
    /// absent.
    #[instrument(skip(self, new))]
    pub async fn get_or_create_user(&self, new: NewUser) -> Result<User> {
        let email = normalize_email(&new.email);
        if let Some(existing) = self.repo.find_by_email(&email).await? {
            return Ok(existing);
        }
        match self.create_user(new).await {
            // Lost a race with a concurrent registration; the winner's
            // row is the account we were asked for.
            Err(Error::DuplicateEmail) => self
                .repo
                .find_by_email(&email)
                .await?
                .ok_or(Error::DuplicateEmail),
            other => other,
        }
    }

    pub async fn get_user(&self, id: i64) -> Result<User> {
        self.repo.find_by_id(id).await?.ok_or(Error::NotFound)
    }

    /// Apply a partial update. Changed email and password are
    /// re-validated; `updated_at` is refreshed, `created_at` stays.
    #[instrument(skip(self, patch))]
    pub async fn update_user(&self, id: i64, patch: UserPatch) -> Result<User> {
        let mut user = self.get_user(id).await?;

        if let Some(email) = patch.email {
            let email = normalize_email(&email);
            if !is_valid_email(&email) {
                warn!(user_id = id, "invalid email in update");
                return Err(Error::Validation("invalid email".into()));
            }
            user.email = email;
        }
        if let Some(plain) = patch.password {
            if plain.len() < password::MIN_PASSWORD_LEN {
                warn!(user_id = id, "password too short in update");
                return Err(Error::Validation("password too short".into()));
            }
            user.password_hash = password::hash(&plain)?;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(active) = patch.is_active {
            user.is_active = active;
        }

        user.updated_at = OffsetDateTime::now_utc();
        let user = self.repo.update(&user).await?;
        info!(user_id = user.id, "user updated");
        Ok(user)
    }

    /// Soft delete: the row stays, `is_active` goes false.
    pub async fn deactivate_user(&self, id: i64) -> Result<User> {
        self.update_user(
            id,
            UserPatch {
                is_active: Some(false),
                ..UserPatch::default()
            },
        )
        .await
    }

    /// Register a freelancer account together with its profile. Both
    /// rows are written in one transaction.
    #[instrument(skip(self, new, profile))]
    pub async fn register_freelancer(
        &self,
        new: NewUser,
        profile: NewProfile,
    ) -> Result<(User, Profile)> {
        if new.role != Role::Freelancer {
            return Err(Error::Validation(
                "profile registration requires the freelancer role".into(),
            ));
        }
        let user_draft = build_draft(new)?;
        let profile_draft = crate::profiles::services::build_draft(profile)?;

        let (user, profile) = self
            .repo
            .create_with_profile(user_draft, profile_draft)
            .await?;
        info!(user_id = user.id, profile_id = profile.id, "freelancer registered");
        Ok((user, profile))
    }
}

/// Validate registration data and turn it into an insertable draft:
/// normalized email, hashed password, `is_active` on, both timestamps
/// set to the same instant.
fn build_draft(new: NewUser) -> Result<UserDraft> {
    let email = normalize_email(&new.email);
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(Error::Validation("invalid email".into()));
    }
    if new.password.len() < password::MIN_PASSWORD_LEN {
        warn!("password too short");
        return Err(Error::Validation("password too short".into()));
    }

    let now = OffsetDateTime::now_utc();
    Ok(UserDraft {
        email,
        password_hash: password::hash(&new.password)?,
        role: new.role,
        is_active: true,
        created_at: now,
        updated_at: now,
    })
}

#[cfg(test)]
mod email_tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.domain.org"));
    }

    #[test]
    fn rejects_garbage() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@x.com"));
        assert!(!is_valid_email("spaces in@x.com"));
        assert!(!is_valid_email("missing@tld"));
    }

    #[test]
    fn normalization_trims_and_lowercases() {
        assert_eq!(normalize_email("  A@X.Com "), "a@x.com");
    }
}

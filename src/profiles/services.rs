use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::error::{Error, Result};
use crate::profiles::dto::NewProfile;
use crate::profiles::repo::ProfileRepository;
use crate::profiles::repo_types::{Profile, ProfileDraft};

/// Profile use cases on top of a [`ProfileRepository`].
pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(repo: Arc<dyn ProfileRepository>) -> Self {
        Self { repo }
    }

    /// Attach a profile to an existing user. At most one profile per
    /// user; the storage layer enforces both that and the ownership.
    #[instrument(skip(self, new))]
    pub async fn create_profile(&self, user_id: i64, new: NewProfile) -> Result<Profile> {
        let draft = build_draft(new)?;
        let profile = self.repo.create(user_id, draft).await?;
        info!(user_id, profile_id = profile.id, "profile created");
        Ok(profile)
    }

    pub async fn get_profile(&self, user_id: i64) -> Result<Profile> {
        self.repo
            .find_by_user(user_id)
            .await?
            .ok_or(Error::NotFound)
    }

    /// Replace the descriptive fields of an existing profile. The
    /// owning user never changes.
    #[instrument(skip(self, new))]
    pub async fn update_profile(&self, user_id: i64, new: NewProfile) -> Result<Profile> {
        let draft = build_draft(new)?;
        let mut profile = self.get_profile(user_id).await?;

        profile.first_name = draft.first_name;
        profile.last_name = draft.last_name;
        profile.bio = draft.bio;
        profile.location = draft.location;
        profile.hourly_rate = draft.hourly_rate;
        profile.skills = draft.skills;
        profile.portfolio = draft.portfolio;

        let profile = self.repo.update(&profile).await?;
        info!(user_id, profile_id = profile.id, "profile updated");
        Ok(profile)
    }
}

/// Validate profile input and turn it into an insertable draft.
pub(crate) fn build_draft(new: NewProfile) -> Result<ProfileDraft> {
    if new.hourly_rate.is_sign_negative() {
        warn!(rate = %new.hourly_rate, "negative hourly rate");
        return Err(Error::Validation("hourly rate must not be negative".into()));
    }
    Ok(ProfileDraft {
        first_name: new.first_name,
        last_name: new.last_name,
        bio: new.bio,
        location: new.location,
        hourly_rate: new.hourly_rate,
        skills: new.skills,
        portfolio: new.portfolio,
    })
}

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::profiles::repo_types::{Profile, ProfileDraft};

/// Persistence port for freelancer profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert a profile owned by `user_id`. Fails `NotFound` when the
    /// user does not exist and `DuplicateProfile` when it already has
    /// one.
    async fn create(&self, user_id: i64, draft: ProfileDraft) -> Result<Profile>;

    /// Overwrite the descriptive columns. The owning `user_id` is
    /// never rewritten.
    async fn update(&self, profile: &Profile) -> Result<Profile>;

    async fn find_by_user(&self, user_id: i64) -> Result<Option<Profile>>;
}

/// Postgres implementation of [`ProfileRepository`].
#[derive(Clone)]
pub struct PgProfileRepository {
    db: PgPool,
}

impl PgProfileRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    async fn create(&self, user_id: i64, draft: ProfileDraft) -> Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO freelancer_profiles
                (user_id, first_name, last_name, bio, location, hourly_rate, skills, portfolio)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, first_name, last_name, bio, location, hourly_rate, skills, portfolio
            "#,
        )
        .bind(user_id)
        .bind(&draft.first_name)
        .bind(&draft.last_name)
        .bind(&draft.bio)
        .bind(&draft.location)
        .bind(draft.hourly_rate)
        .bind(&draft.skills)
        .bind(&draft.portfolio)
        .fetch_one(&self.db)
        .await?;
        Ok(profile)
    }

    async fn update(&self, profile: &Profile) -> Result<Profile> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            UPDATE freelancer_profiles
            SET first_name = $2, last_name = $3, bio = $4, location = $5,
                hourly_rate = $6, skills = $7, portfolio = $8
            WHERE id = $1
            RETURNING id, user_id, first_name, last_name, bio, location, hourly_rate, skills, portfolio
            "#,
        )
        .bind(profile.id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.bio)
        .bind(&profile.location)
        .bind(profile.hourly_rate)
        .bind(&profile.skills)
        .bind(&profile.portfolio)
        .fetch_one(&self.db)
        .await?;
        Ok(profile)
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, user_id, first_name, last_name, bio, location, hourly_rate, skills, portfolio
            FROM freelancer_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(profile)
    }
}

use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::Result;
use crate::profiles::repo_types::{Profile, ProfileDraft};
use crate::users::repo_types::{User, UserDraft};

/// Persistence port for user rows. Services see only this trait; the
/// backing store supplies identifiers and enforces uniqueness.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the row with its assigned id.
    async fn create(&self, draft: UserDraft) -> Result<User>;

    /// Overwrite the mutable columns of an existing row. `created_at`
    /// is never touched.
    async fn update(&self, user: &User) -> Result<User>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Insert a user and its freelancer profile in one transaction;
    /// other callers never observe a partial pair.
    async fn create_with_profile(
        &self,
        user: UserDraft,
        profile: ProfileDraft,
    ) -> Result<(User, Profile)>;
}

/// Postgres implementation of [`UserRepository`].
#[derive(Clone)]
pub struct PgUserRepository {
    db: PgPool,
}

impl PgUserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, draft: UserDraft) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, role, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, password_hash, role, is_active, created_at, updated_at
            "#,
        )
        .bind(&draft.email)
        .bind(&draft.password_hash)
        .bind(draft.role.as_str())
        .bind(draft.is_active)
        .bind(draft.created_at)
        .bind(draft.updated_at)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $2, password_hash = $3, role = $4, is_active = $5, updated_at = $6
            WHERE id = $1
            RETURNING id, email, password_hash, role, is_active, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.updated_at)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, is_active, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, role, is_active, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create_with_profile(
        &self,
        user: UserDraft,
        profile: ProfileDraft,
    ) -> Result<(User, Profile)> {
        let mut tx = self.db.begin().await?;

        let saved_user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, role, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, password_hash, role, is_active, created_at, updated_at
            "#,
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        let saved_profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO freelancer_profiles
                (user_id, first_name, last_name, bio, location, hourly_rate, skills, portfolio)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, user_id, first_name, last_name, bio, location, hourly_rate, skills, portfolio
            "#,
        )
        .bind(saved_user.id)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.bio)
        .bind(&profile.location)
        .bind(profile.hourly_rate)
        .bind(&profile.skills)
        .bind(&profile.portfolio)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok((saved_user, saved_profile))
    }
}

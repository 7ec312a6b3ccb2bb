//! PostgreSQL-backed `UserRepository` and `FollowRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use pagination::PageRequest;

use crate::domain::ports::{
    FollowPersistenceError, FollowRepository, NewUser, StoredCredentials, UserPersistenceError,
    UserRepository,
};
use crate::domain::{Listing, PasswordHash, User, UserId};

use super::diesel_error_mapping::RepositoryError;
use super::diesel_helpers::{count_to_u64, page_window};
use super::models::{NewFollowRow, NewUserRow, UserCredentialsRow, UserRow};
use super::pool::DbPool;
use super::schema::{follows, users};

impl RepositoryError for UserPersistenceError {
    fn from_connection(message: String) -> Self {
        Self::connection(message)
    }

    fn from_query(message: String) -> Self {
        Self::query(message)
    }

    fn from_unique_violation(constraint: Option<&str>, message: String) -> Self {
        match constraint {
            Some("users_email_key") => Self::duplicate("email"),
            Some("users_username_key") => Self::duplicate("username"),
            _ => Self::query(message),
        }
    }
}

impl RepositoryError for FollowPersistenceError {
    fn from_connection(message: String) -> Self {
        Self::connection(message)
    }

    fn from_query(message: String) -> Self {
        Self::query(message)
    }
}

fn into_users<E: RepositoryError>(rows: Vec<UserRow>) -> Result<Vec<User>, E> {
    rows.into_iter()
        .map(|row| row.into_domain().map_err(E::from_corrupt_row))
        .collect()
}

/// Diesel-backed user accounts and follower graph.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(UserPersistenceError::from_pool)?;
        let row = NewUserRow {
            email: user.email.as_ref(),
            username: user.username.as_ref(),
            first_name: user.first_name.as_ref(),
            last_name: user.last_name.as_ref(),
            password_hash: user.password_hash.as_str(),
        };
        let stored: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(UserPersistenceError::from_diesel)?;
        stored.into_domain().map_err(UserPersistenceError::from_corrupt_row)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(UserPersistenceError::from_pool)?;
        let row: Option<UserRow> = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(UserPersistenceError::from_diesel)?;
        row.map(|row| row.into_domain().map_err(UserPersistenceError::from_corrupt_row))
            .transpose()
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(UserPersistenceError::from_pool)?;
        let row: Option<UserCredentialsRow> = users::table
            .filter(users::email.eq(email))
            .select(UserCredentialsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(UserPersistenceError::from_diesel)?;
        Ok(row.map(|row| StoredCredentials {
            user_id: UserId::from_trusted(row.id),
            password_hash: PasswordHash::from_phc(row.password_hash),
        }))
    }

    async fn find_password_hash(
        &self,
        id: UserId,
    ) -> Result<Option<PasswordHash>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(UserPersistenceError::from_pool)?;
        let hash: Option<String> = users::table
            .find(id.get())
            .select(users::password_hash)
            .first(&mut conn)
            .await
            .optional()
            .map_err(UserPersistenceError::from_diesel)?;
        Ok(hash.map(PasswordHash::from_phc))
    }

    async fn update_password(
        &self,
        id: UserId,
        hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(UserPersistenceError::from_pool)?;
        let updated = diesel::update(users::table.find(id.get()))
            .set(users::password_hash.eq(hash.as_str()))
            .execute(&mut conn)
            .await
            .map_err(UserPersistenceError::from_diesel)?;
        if updated == 0 {
            return Err(UserPersistenceError::query(format!("user {id} not found")));
        }
        Ok(())
    }

    async fn list(&self, page: PageRequest) -> Result<Listing<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(UserPersistenceError::from_pool)?;
        let (offset, limit) = page_window(page);
        let total: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(UserPersistenceError::from_diesel)?;
        let rows: Vec<UserRow> = users::table
            .order(users::id.asc())
            .offset(offset)
            .limit(limit)
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(UserPersistenceError::from_diesel)?;
        Ok(Listing::new(into_users(rows)?, count_to_u64(total)))
    }
}

#[async_trait]
impl FollowRepository for DieselUserRepository {
    async fn follow(&self, user: UserId, author: UserId) -> Result<bool, FollowPersistenceError> {
        let mut conn = self.pool.get().await.map_err(FollowPersistenceError::from_pool)?;
        let inserted = diesel::insert_into(follows::table)
            .values(&NewFollowRow {
                user_id: user.get(),
                author_id: author.get(),
            })
            .on_conflict((follows::user_id, follows::author_id))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(FollowPersistenceError::from_diesel)?;
        Ok(inserted > 0)
    }

    async fn unfollow(
        &self,
        user: UserId,
        author: UserId,
    ) -> Result<bool, FollowPersistenceError> {
        let mut conn = self.pool.get().await.map_err(FollowPersistenceError::from_pool)?;
        let deleted = diesel::delete(
            follows::table
                .filter(follows::user_id.eq(user.get()))
                .filter(follows::author_id.eq(author.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(FollowPersistenceError::from_diesel)?;
        Ok(deleted > 0)
    }

    async fn followed_among(
        &self,
        user: UserId,
        authors: &[UserId],
    ) -> Result<Vec<UserId>, FollowPersistenceError> {
        if authors.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(FollowPersistenceError::from_pool)?;
        let ids: Vec<i64> = authors.iter().map(|id| id.get()).collect();
        let followed: Vec<i64> = follows::table
            .filter(follows::user_id.eq(user.get()))
            .filter(follows::author_id.eq_any(ids))
            .select(follows::author_id)
            .load(&mut conn)
            .await
            .map_err(FollowPersistenceError::from_diesel)?;
        Ok(followed.into_iter().map(UserId::from_trusted).collect())
    }

    async fn list_followed(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<Listing<User>, FollowPersistenceError> {
        let mut conn = self.pool.get().await.map_err(FollowPersistenceError::from_pool)?;
        let (offset, limit) = page_window(page);
        let total: i64 = follows::table
            .filter(follows::user_id.eq(user.get()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(FollowPersistenceError::from_diesel)?;
        let rows: Vec<UserRow> = follows::table
            .inner_join(users::table.on(users::id.eq(follows::author_id)))
            .filter(follows::user_id.eq(user.get()))
            .order(users::id.asc())
            .offset(offset)
            .limit(limit)
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(FollowPersistenceError::from_diesel)?;
        Ok(Listing::new(into_users(rows)?, count_to_u64(total)))
    }
}

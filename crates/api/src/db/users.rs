//! User repository for database operations.
//!
//! Each method opens its own connection via the [`Database`] factory and
//! releases it when the method returns, on success and error alike.

use sqlx::{QueryBuilder, Sqlite};

use rolodex_core::UserId;

use super::Database;
use crate::models::{NewUser, User, UserPatch};

const SELECT_USER_COLUMNS: &str =
    "SELECT user_id, name, email, phone, address, country FROM users";

/// Repository for user database operations.
pub struct UserRepository<'a> {
    db: &'a Database,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// List all users in the store's natural row order.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the query fails.
    pub async fn list(&self) -> Result<Vec<User>, sqlx::Error> {
        let mut conn = self.db.connect().await?;
        sqlx::query_as::<_, User>(SELECT_USER_COLUMNS)
            .fetch_all(&mut conn)
            .await
    }

    /// Get a user by id.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the query fails.
    pub async fn get(&self, id: UserId) -> Result<Option<User>, sqlx::Error> {
        let mut conn = self.db.connect().await?;
        let sql = format!("{SELECT_USER_COLUMNS} WHERE user_id = ?");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&mut conn)
            .await
    }

    /// Insert a new user and return it with the store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` on constraint violation or backend failure.
    pub async fn create(&self, new_user: &NewUser) -> Result<User, sqlx::Error> {
        let mut conn = self.db.connect().await?;
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, phone, address, country)
             VALUES (?, ?, ?, ?, ?)
             RETURNING user_id, name, email, phone, address, country",
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.phone)
        .bind(&new_user.address)
        .bind(&new_user.country)
        .fetch_one(&mut conn)
        .await
    }

    /// Overwrite all five mutable fields for the row matching `user.user_id`.
    ///
    /// Does not check whether a matching row exists: an update against an
    /// unknown id is a silent no-op, and callers report the submitted object
    /// back unchanged.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the statement fails.
    pub async fn replace(&self, user: &User) -> Result<(), sqlx::Error> {
        let mut conn = self.db.connect().await?;
        sqlx::query(
            "UPDATE users SET name = ?, email = ?, phone = ?, address = ?, country = ?
             WHERE user_id = ?",
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.phone)
        .bind(&user.address)
        .bind(&user.country)
        .bind(user.user_id)
        .execute(&mut conn)
        .await?;
        Ok(())
    }

    /// Apply a partial update, then re-read the row.
    ///
    /// The UPDATE covers only the supplied fields. Column names come from the
    /// fixed list in [`UserPatch::assignments`], never from request input.
    /// Returns `None` when no row exists for `id` after the update.
    ///
    /// Callers must reject an empty patch before calling; an empty
    /// `assignments` list would build an invalid statement.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if either statement fails.
    pub async fn patch(&self, id: UserId, patch: &UserPatch) -> Result<Option<User>, sqlx::Error> {
        debug_assert!(!patch.is_empty());

        let mut conn = self.db.connect().await?;

        let mut builder: QueryBuilder<'_, Sqlite> = QueryBuilder::new("UPDATE users SET ");
        {
            let mut setters = builder.separated(", ");
            for (column, value) in patch.assignments() {
                setters.push(column);
                setters.push_unseparated(" = ");
                setters.push_bind_unseparated(value);
            }
        }
        builder.push(" WHERE user_id = ");
        builder.push_bind(id.as_i64());
        builder.build().execute(&mut conn).await?;

        let sql = format!("{SELECT_USER_COLUMNS} WHERE user_id = ?");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(&mut conn)
            .await
    }

    /// Delete a user by id.
    ///
    /// # Returns
    ///
    /// Returns `true` if a row was deleted, `false` if none matched.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the statement fails.
    pub async fn delete(&self, id: UserId) -> Result<bool, sqlx::Error> {
        let mut conn = self.db.connect().await?;
        let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(id)
            .execute(&mut conn)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_user() -> NewUser {
        NewUser {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: "12 Analytical Row".to_string(),
            country: "UK".to_string(),
        }
    }

    async fn test_db() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("repo.db").display());
        let db = Database::new(&url).unwrap();
        db.init_schema().await.unwrap();
        (db, dir)
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_get_roundtrips() {
        let (db, _dir) = test_db().await;
        let repo = UserRepository::new(&db);

        let created = repo.create(&sample_user()).await.unwrap();
        assert_eq!(created.name, "Ada");

        let fetched = repo.get(created.user_id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let (db, _dir) = test_db().await;
        let repo = UserRepository::new(&db);

        assert!(repo.get(UserId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let (db, _dir) = test_db().await;
        let repo = UserRepository::new(&db);

        let first = repo.create(&sample_user()).await.unwrap();
        let mut second_input = sample_user();
        second_input.name = "Grace".to_string();
        let second = repo.create(&second_input).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all, vec![first, second]);
    }

    #[tokio::test]
    async fn test_replace_overwrites_all_fields() {
        let (db, _dir) = test_db().await;
        let repo = UserRepository::new(&db);

        let created = repo.create(&sample_user()).await.unwrap();
        let replacement = User {
            user_id: created.user_id,
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            phone: "555-0199".to_string(),
            address: "1 Navy Yard".to_string(),
            country: "US".to_string(),
        };
        repo.replace(&replacement).await.unwrap();

        let fetched = repo.get(created.user_id).await.unwrap().unwrap();
        assert_eq!(fetched, replacement);
    }

    #[tokio::test]
    async fn test_replace_unknown_id_is_silent_noop() {
        let (db, _dir) = test_db().await;
        let repo = UserRepository::new(&db);

        let ghost = User {
            user_id: UserId::new(999),
            name: "Nobody".to_string(),
            email: "n@example.com".to_string(),
            phone: "0".to_string(),
            address: "-".to_string(),
            country: "-".to_string(),
        };
        repo.replace(&ghost).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_patch_updates_only_supplied_fields() {
        let (db, _dir) = test_db().await;
        let repo = UserRepository::new(&db);

        let created = repo.create(&sample_user()).await.unwrap();
        let patch = UserPatch {
            email: Some("ada@new.example.com".to_string()),
            ..UserPatch::default()
        };

        let updated = repo.patch(created.user_id, &patch).await.unwrap().unwrap();
        assert_eq!(updated.email, "ada@new.example.com");
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.phone, created.phone);
        assert_eq!(updated.address, created.address);
        assert_eq!(updated.country, created.country);
    }

    #[tokio::test]
    async fn test_patch_unknown_id_is_none() {
        let (db, _dir) = test_db().await;
        let repo = UserRepository::new(&db);

        let patch = UserPatch {
            name: Some("Nobody".to_string()),
            ..UserPatch::default()
        };
        assert!(repo.patch(UserId::new(42), &patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let (db, _dir) = test_db().await;
        let repo = UserRepository::new(&db);

        let created = repo.create(&sample_user()).await.unwrap();
        assert!(repo.delete(created.user_id).await.unwrap());
        assert!(!repo.delete(created.user_id).await.unwrap());
        assert!(repo.get(created.user_id).await.unwrap().is_none());
    }
}

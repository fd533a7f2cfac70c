//! User repository implementation over parameterized SQL.
//!
//! This is the only place that issues SQL against the `users` table.
//! Every user-supplied value is passed as a bind parameter.

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, SqlErr, Statement, Value,
};
use tracing::{debug, info};

use super::entities::UserEntity;
use common::{AppError, AppResult};
use domain::{DeleteOutcome, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (login VARCHAR PRIMARY KEY, first_name VARCHAR, last_name VARCHAR)";
const COUNT: &str = "SELECT COUNT(*) FROM users";
const FIND_ALL: &str = "SELECT * FROM users";
const FIND_ONE: &str = "SELECT * FROM users WHERE login = $1";
const INSERT: &str =
    "INSERT INTO users (login, first_name, last_name) VALUES ($1, $2, $3) RETURNING *";
const UPDATE: &str =
    "UPDATE users SET first_name = $1, last_name = $2, login = $3 WHERE login = $4";
const DELETE_ONE: &str = "DELETE FROM users WHERE login = $1";
const DELETE_ALL: &str = "DELETE FROM users";

/// User repository trait for dependency injection.
///
/// Holds no state of its own: every call goes to storage.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Number of stored users
    async fn count(&self) -> AppResult<u64>;

    /// All stored users, in storage order
    async fn find_all(&self) -> AppResult<Vec<User>>;

    /// User with exactly this login, if any
    async fn find_one(&self, login: &str) -> AppResult<Option<User>>;

    /// Insert a new user and return the row as stored
    async fn save(&self, user: User) -> AppResult<User>;

    /// Rewrite the row keyed by `login` with all three fields of `user`.
    ///
    /// Returns `None` when no row carried `login`. Otherwise returns the row
    /// re-read under `user.login`, which may differ from `login`.
    async fn update(&self, login: &str, user: User) -> AppResult<Option<User>>;

    /// Delete the user with exactly this login
    async fn delete_one(&self, login: &str) -> AppResult<DeleteOutcome>;

    /// Delete every user
    async fn delete_all(&self) -> AppResult<DeleteOutcome>;

    /// Create the table if needed, then clear it and insert the seed users
    async fn init(&self) -> AppResult<()>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn statement<I>(&self, sql: &str, values: I) -> Statement
    where
        I: IntoIterator<Item = Value>,
    {
        Statement::from_sql_and_values(self.db.get_database_backend(), sql, values)
    }

    fn plain(&self, sql: &str) -> Statement {
        Statement::from_string(self.db.get_database_backend(), sql)
    }
}

/// Duplicate logins surface as a conflict, anything else as a storage error.
fn map_write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::conflict("User"),
        _ => AppError::from(err),
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn count(&self) -> AppResult<u64> {
        let row = self
            .db
            .query_one(self.plain(COUNT))
            .await?
            .ok_or_else(|| AppError::internal("COUNT(*) returned no row"))?;

        let count: i64 = row.try_get_by_index(0)?;
        u64::try_from(count).map_err(|_| AppError::internal(format!("Invalid row count {}", count)))
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .from_raw_sql(self.plain(FIND_ALL))
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_one(&self, login: &str) -> AppResult<Option<User>> {
        let mut models = UserEntity::find()
            .from_raw_sql(self.statement(FIND_ONE, [Value::from(login)]))
            .all(&self.db)
            .await?;

        match models.len() {
            0 => {
                debug!(login, "No user found");
                Ok(None)
            }
            1 => Ok(models.pop().map(User::from)),
            n => Err(AppError::ambiguous(format!("User ({} rows for one login)", n))),
        }
    }

    async fn save(&self, user: User) -> AppResult<User> {
        let stored = UserEntity::find()
            .from_raw_sql(self.statement(
                INSERT,
                [
                    Value::from(user.login),
                    Value::from(user.first_name),
                    Value::from(user.last_name),
                ],
            ))
            .one(&self.db)
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| AppError::internal("INSERT returned no row"))?;

        debug!(login = %stored.login, "User saved");
        Ok(User::from(stored))
    }

    async fn update(&self, login: &str, user: User) -> AppResult<Option<User>> {
        let new_login = user.login.clone();
        let result = self
            .db
            .execute(self.statement(
                UPDATE,
                [
                    Value::from(user.first_name),
                    Value::from(user.last_name),
                    Value::from(user.login),
                    Value::from(login),
                ],
            ))
            .await
            .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            debug!(login, "Update matched no user");
            return Ok(None);
        }

        debug!(old_login = login, new_login = %new_login, "User updated");
        self.find_one(&new_login).await
    }

    async fn delete_one(&self, login: &str) -> AppResult<DeleteOutcome> {
        let result = self
            .db
            .execute(self.statement(DELETE_ONE, [Value::from(login)]))
            .await?;

        debug!(login, rows_affected = result.rows_affected(), "Deleted user");
        Ok(DeleteOutcome::new(result.rows_affected()))
    }

    async fn delete_all(&self) -> AppResult<DeleteOutcome> {
        let result = self.db.execute(self.plain(DELETE_ALL)).await?;

        debug!(rows_affected = result.rows_affected(), "Deleted all users");
        Ok(DeleteOutcome::new(result.rows_affected()))
    }

    async fn init(&self) -> AppResult<()> {
        self.db.execute(self.plain(CREATE_TABLE)).await?;
        info!("Users table ready");

        self.delete_all().await?;
        for user in User::seed() {
            self.save(user).await?;
        }

        info!("Seed users inserted");
        Ok(())
    }
}

//! User repository.

use chrono::Utc;

use chamber_core::entities::User;
use chamber_core::enums::UserRole;
use chamber_core::forms::NewUser;
use chamber_core::ids::PREFIX_USER;

use crate::error::{DatabaseError, is_unique_violation};
use crate::helpers::{parse_datetime, parse_enum};
use crate::service::ChamberService;

const USER_COLUMNS: &str = "id, name, email, role, created_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        email: row.get::<String>(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl ChamberService {
    /// Register a user.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` if the email is already registered.
    pub async fn create_user(&self, new: &NewUser, role: UserRole) -> Result<User, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_USER).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO users (id, name, email, role, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    id.as_str(),
                    new.name.as_str(),
                    new.email.as_str(),
                    role.as_str(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DatabaseError::conflict("user", new.email.as_str())
                } else {
                    e.into()
                }
            })?;

        Ok(User {
            id,
            name: new.name.clone(),
            email: new.email.clone(),
            role,
            created_at: now,
        })
    }

    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"), [id])
            .await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("user", id))?;
        row_to_user(&row)
    }

    /// Look up a user by email, case-insensitively.
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE email = lower(?1)"),
                [email],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    pub async fn list_users(&self, limit: u32) -> Result<Vec<User>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at, name LIMIT ?1"),
                [i64::from(limit)],
            )
            .await?;
        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(row_to_user(&row)?);
        }
        Ok(users)
    }

    /// Change a user's role.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the user does not exist.
    pub async fn set_user_role(&self, id: &str, role: UserRole) -> Result<User, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .execute(
                "UPDATE users SET role = ?1 WHERE id = ?2",
                libsql::params![role.as_str(), id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::not_found("user", id));
        }
        self.get_user(id).await
    }
}

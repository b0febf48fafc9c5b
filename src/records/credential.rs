//! Credential records
//!
//! The login table stores `email, password_hash, role`. Passwords only ever
//! reach the file through the configured `PasswordHasher`.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::{info, warn};

use crate::error::{GradeError, Result};
use crate::security::{Argon2Hasher, PasswordHasher};
use crate::table::{check_width, Record, Row, Schema, Table};

const PASSWORD_HASH: usize = 1;
const ROLE: usize = 2;

/// Access role attached to a login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Professor,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Professor => "professor",
            Role::Student => "student",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = GradeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "professor" => Ok(Role::Professor),
            "student" => Ok(Role::Student),
            _ => Err(GradeError::Validation(format!("unknown role '{}'", s))),
        }
    }
}

/// One row of the login table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl Record for Credential {
    const SCHEMA: Schema = Schema {
        name: "login",
        header: &["email", "password_hash", "role"],
    };

    fn from_row(row: &[String]) -> Result<Self> {
        check_width(&Self::SCHEMA, row)?;
        Ok(Self {
            email: row[0].clone(),
            password_hash: row[PASSWORD_HASH].clone(),
            role: row[ROLE].parse()?,
        })
    }

    fn to_row(&self) -> Row {
        vec![
            self.email.clone(),
            self.password_hash.clone(),
            self.role.to_string(),
        ]
    }

    fn key(&self) -> &str {
        &self.email
    }
}

/// The login table
#[derive(Debug, Clone)]
pub struct LoginTable<H = Argon2Hasher> {
    table: Table<Credential>,
    hasher: H,
}

impl LoginTable<Argon2Hasher> {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::with_hasher(path, Argon2Hasher)
    }
}

impl<H: PasswordHasher> LoginTable<H> {
    pub fn with_hasher(path: impl Into<PathBuf>, hasher: H) -> Result<Self> {
        Ok(Self {
            table: Table::open(path)?,
            hasher,
        })
    }

    pub fn table(&self) -> &Table<Credential> {
        &self.table
    }

    /// Hash `password` and store a login; `false` if the email is taken
    pub fn register(&self, email: &str, password: &str, role: Role) -> Result<bool> {
        if self.table.find_row(email)?.is_some() {
            warn!(email, "login already exists, skipping register");
            return Ok(false);
        }

        let credential = Credential {
            email: email.to_string(),
            password_hash: self.hasher.hash(password)?,
            role,
        };
        let inserted = self.table.insert(&credential)?;

        if inserted {
            info!(email, %role, "login registered");
        }
        Ok(inserted)
    }

    /// Role of the login when `password` matches, otherwise `None`
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Option<Role>> {
        let credential = match self.table.find(email)? {
            Some(c) => c,
            None => return Ok(None),
        };

        if self.hasher.verify(password, &credential.password_hash)? {
            Ok(Some(credential.role))
        } else {
            Ok(None)
        }
    }

    /// Replace the stored hash; `false` when the email is unknown
    pub fn change_password(&self, email: &str, new_password: &str) -> Result<bool> {
        let hash = self.hasher.hash(new_password)?;
        let matched = self.table.update_rows(email, |row| {
            row[PASSWORD_HASH] = hash.clone();
            Ok(())
        })?;
        Ok(matched > 0)
    }

    pub fn find(&self, email: &str) -> Result<Option<Credential>> {
        self.table.find(email)
    }

    pub fn delete(&self, email: &str) -> Result<bool> {
        let removed = self.table.delete_rows(email)?;
        info!(email, removed, "login delete");
        Ok(removed > 0)
    }
}

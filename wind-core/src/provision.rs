//! Mongo init script that provisions the application user.
//!
//! This is a static artifact for the database container's
//! `docker-entrypoint-initdb.d`; nothing here talks to a database.

use anyhow::{Context, Result};
use serde::Serialize;

pub const DEFAULT_DATABASE: &str = "windForecaster";
pub const DEFAULT_ROLE: &str = "readWrite";
pub const USER_PLACEHOLDER: &str = "__MONGO_APP_USER__";
pub const PASSWORD_PLACEHOLDER: &str = "__MONGO_APP_PASSWORD__";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provisioning {
    pub database: String,
    pub user: String,
    pub password: String,
    pub role: String,
}

impl Default for Provisioning {
    fn default() -> Self {
        Self {
            database: DEFAULT_DATABASE.to_string(),
            user: USER_PLACEHOLDER.to_string(),
            password: PASSWORD_PLACEHOLDER.to_string(),
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

#[derive(Serialize)]
struct RoleGrant<'a> {
    role: &'a str,
    db: &'a str,
}

#[derive(Serialize)]
struct CreateUser<'a> {
    user: &'a str,
    pwd: &'a str,
    roles: [RoleGrant<'a>; 1],
}

impl Provisioning {
    /// Render the `mongo` shell script: select the database, create the user.
    pub fn render_script(&self) -> Result<String> {
        let doc = CreateUser {
            user: &self.user,
            pwd: &self.password,
            roles: [RoleGrant {
                role: &self.role,
                db: &self.database,
            }],
        };

        let database =
            serde_json::to_string(&self.database).context("Failed to encode database name")?;
        let body =
            serde_json::to_string_pretty(&doc).context("Failed to encode createUser document")?;

        Ok(format!("db = db.getSiblingDB({database});\n\ndb.createUser({body});\n"))
    }
}

//! Operator entity - A desk user allowed to register and void packages.
//!
//! Operators sign in with email and password over HTTP, or are recognised on
//! Discord through their linked `discord_user_id`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Operator database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "operators")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Sign-in email, stored trimmed and lowercased
    #[sea_orm(unique)]
    pub email: String,
    /// Name shown to other operators
    pub display_name: String,
    /// Argon2id PHC string; carries its own salt and cost parameters
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Discord user ID linked to this operator, if any
    pub discord_user_id: Option<String>,
    /// Inactive operators cannot sign in
    pub is_active: bool,
    /// When the operator was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Operator and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One operator has many sessions
    #[sea_orm(has_many = "super::session::Entity")]
    Sessions,
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

//! Client code entity - The catalog of pre-issued codes.
//!
//! A code maps to exactly one client. Only active codes can be registered.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Client code database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "client_codes")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The code printed on incoming packages
    #[sea_orm(unique)]
    pub code: String,
    /// Name of the client that owns the code
    pub client_name: String,
    /// Inactive codes are rejected at registration
    pub is_active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod client_code;
pub mod log;
pub mod operator;
pub mod session;

// Re-export specific types to avoid conflicts
pub use client_code::{
    Column as ClientCodeColumn, Entity as ClientCode, Model as ClientCodeModel,
};
pub use log::{Column as LogColumn, Entity as Log, Model as LogModel};
pub use operator::{Column as OperatorColumn, Entity as Operator, Model as OperatorModel};
pub use session::{Column as SessionColumn, Entity as Session, Model as SessionModel};

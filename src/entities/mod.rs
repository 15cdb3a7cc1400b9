//! Storage rows. Relations are carried as identifier columns and resolved
//! through [`crate::store::Store`]; none are declared to the ORM.

pub mod actor;
pub mod award;
pub mod movie;
pub mod movie_actor;

use sea_orm::EntityTrait;

/// Entities carrying the audit triple and a soft-deletion column.
pub trait Audited: EntityTrait {
    /// Lowercase kind name used in `"<label> not found"`.
    const LABEL: &'static str;

    fn id_column() -> Self::Column;

    fn deleted_at_column() -> Self::Column;
}

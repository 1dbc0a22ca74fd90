//! Soft-delete predicate shared by every repository.

use sea_orm::{sea_query::SimpleExpr, ColumnTrait};

use crate::domain::EntityStatus;

/// Restrict a query to rows whose status column is `enabled` or `disabled`.
pub(crate) fn visible<C: ColumnTrait>(column: C) -> SimpleExpr {
    column.is_in(EntityStatus::VISIBLE.iter().map(EntityStatus::as_str))
}

//! Shared request and response types.

mod pagination;
mod response;

pub use pagination::{Paginated, PaginatedBarbershops, PaginationMeta, PaginationParams};
pub use response::MessageResponse;

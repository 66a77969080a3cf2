use serde::Deserialize;
use utoipa::IntoParams;

/// Upper bound on page size; larger requests are clamped, not rejected.
pub const MAX_PAGE_SIZE: usize = 200;

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PaginationParams {
    /// Page size (default 20, max 200).
    pub limit: Option<usize>,
    /// Rows to skip (default 0).
    pub offset: Option<usize>,
}

impl PaginationParams {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE)
    }

    pub fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }
}

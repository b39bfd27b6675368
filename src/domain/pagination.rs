use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 9;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Paginated<T> {
    /// What callers get when the CMS could not be reached or answered badly.
    pub fn empty(page: u32, page_size: u32) -> Self {
        Self {
            data: Vec::new(),
            pagination: Pagination {
                page,
                page_size,
                page_count: 0,
                total: 0,
            },
        }
    }

    pub fn has_next(&self) -> bool {
        self.pagination.page < self.pagination.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.pagination.page > 1
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }
}

/// Envelope returned by `GET /products?page&limit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> PagedResult<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = total_pages(total, limit);
        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Everything in one page, as produced by an un-paginated listing.
    pub fn single_page(data: Vec<T>) -> Self {
        let total = data.len() as u64;
        let limit = u32::try_from(data.len()).unwrap_or(u32::MAX).max(1);
        Self::new(data, total, 1, limit)
    }
}

pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(limit));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// The service answers list calls either with the paged envelope or, for the
/// un-paginated route, with a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse {
    Paged(PagedResult<Item>),
    Bare(Vec<Item>),
}

impl ListResponse {
    pub fn into_paged(self) -> PagedResult<Item> {
        match self {
            Self::Paged(paged) => paged,
            Self::Bare(items) => PagedResult::single_page(items),
        }
    }
}

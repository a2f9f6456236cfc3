use serde::{Deserialize, Serialize};

/// Offset/limit window applied to a listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    pub offset: u64,
    pub limit: Option<u64>,
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    pub const DEFAULT_SIZE: u64 = 20;

    pub fn window(&self) -> Window {
        Window {
            offset: self.page.saturating_mul(self.size),
            limit: Some(self.size),
        }
    }
}

/// One page of a listing plus the totals needed to navigate it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_items: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        let total_pages = if request.size == 0 {
            0
        } else {
            total_items.div_ceil(request.size)
        };
        Self {
            items,
            page: request.page,
            size: request.size,
            total_items,
            total_pages,
        }
    }
}

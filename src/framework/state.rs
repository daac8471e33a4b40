//! Store state and the list response it is filled from.

use crate::framework::error::StoreError;
use serde::{Deserialize, Serialize};

/// Pagination snapshot taken from the last successful list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_count: 0,
        }
    }
}

/// Observable state of one store.
///
/// `ext` holds whatever the store's extension hook produced; it is `()` for stores
/// without an extension.
#[derive(Debug, Clone)]
pub struct StoreState<T, X = ()> {
    /// Resources from the last successful `fetchAll`.
    pub items: Vec<T>,
    /// Resource from the last successful `fetchOne`.
    pub item: Option<T>,
    pub loading: bool,
    /// Last failure, cleared when the next action starts.
    pub error: Option<StoreError>,
    pub meta: PageMeta,
    pub ext: X,
}

impl<T, X> StoreState<T, X> {
    pub fn new(ext: X) -> Self {
        Self {
            items: Vec::new(),
            item: None,
            loading: false,
            error: None,
            meta: PageMeta::default(),
            ext,
        }
    }
}

impl<T, X: Default> Default for StoreState<T, X> {
    fn default() -> Self {
        Self::new(X::default())
    }
}

/// Body returned by `GET {endpoint}`. Every field is optional.
#[derive(Debug, Deserialize)]
#[serde(bound = "T: serde::de::DeserializeOwned")]
pub struct ListResponse<T> {
    #[serde(default)]
    pub objects: Option<Vec<T>>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub num_pages: Option<u32>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl<T> ListResponse<T> {
    /// Splits the response into items and page metadata, applying the fallbacks:
    /// page 1, one page, and the number of fetched items as the total count.
    pub fn into_parts(self) -> (Vec<T>, PageMeta) {
        let items = self.objects.unwrap_or_default();
        let meta = PageMeta {
            current_page: self.current_page.unwrap_or(1),
            total_pages: self.num_pages.unwrap_or(1),
            total_count: self.total_count.unwrap_or(items.len() as u64),
        };
        (items, meta)
    }
}

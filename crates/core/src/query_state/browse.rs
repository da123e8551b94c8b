//! Query state for category and search listings.

use std::ops::Deref;
use std::sync::Arc;

use crate::navigation::Navigator;

use super::paging::{PagingDefaults, PagingQueryState, PAGE_KEY};

pub const KEYWORD_KEY: &str = "keyword";

/// Paging plus a search keyword.
#[derive(Debug, Clone)]
pub struct BrowseQueryState {
    paging: PagingQueryState,
}

impl BrowseQueryState {
    pub fn new(navigator: Arc<dyn Navigator>, defaults: PagingDefaults) -> Self {
        Self {
            paging: PagingQueryState::new(navigator, defaults),
        }
    }

    /// Current keyword; an empty value counts as absent.
    pub fn keyword(&self) -> Option<String> {
        self.params()
            .get(KEYWORD_KEY)
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
    }

    /// Change the keyword and go back to page 1. A blank keyword removes the
    /// key from the URL.
    pub fn set_keyword(&self, keyword: &str) {
        let keyword = keyword.trim();
        self.update(|params| {
            if keyword.is_empty() {
                params.remove(KEYWORD_KEY);
            } else {
                params.set(KEYWORD_KEY, keyword);
            }
            params.set(PAGE_KEY, "1");
        });
    }
}

impl Deref for BrowseQueryState {
    type Target = PagingQueryState;

    fn deref(&self) -> &Self::Target {
        &self.paging
    }
}

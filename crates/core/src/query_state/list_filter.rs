//! Query state for admin and creator project lists.

use std::ops::Deref;
use std::sync::Arc;

use crate::navigation::Navigator;

use super::paging::{PagingDefaults, PagingQueryState, PAGE_KEY};

pub const RANGE_TYPE_KEY: &str = "rangeType";
pub const PROJECT_STATUS_KEY: &str = "projectStatus";

/// Whether a filter value carries information.
///
/// TODO: drop the "undefined"/"null" checks once list callers stop writing
/// stringified missing values into the URL.
fn is_present(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "undefined" && value != "null"
}

/// Paging plus a date-range selector and a multi-valued status filter.
///
/// Every filter change sends the list back to page 1.
#[derive(Debug, Clone)]
pub struct ListFilterQueryState {
    paging: PagingQueryState,
}

impl ListFilterQueryState {
    pub fn new(navigator: Arc<dyn Navigator>, defaults: PagingDefaults) -> Self {
        Self {
            paging: PagingQueryState::new(navigator, defaults),
        }
    }

    pub fn range_type(&self) -> Option<String> {
        self.params()
            .get(RANGE_TYPE_KEY)
            .filter(|v| is_present(v))
            .map(str::to_string)
    }

    /// Status filter values in URL order.
    pub fn project_status(&self) -> Vec<String> {
        self.params()
            .get_all(PROJECT_STATUS_KEY)
            .into_iter()
            .filter(|v| is_present(v))
            .map(str::to_string)
            .collect()
    }

    /// Set or clear the range type.
    pub fn set_range_type(&self, range_type: Option<&str>) {
        self.update(|params| {
            match range_type.filter(|v| is_present(v)) {
                Some(value) => params.set(RANGE_TYPE_KEY, value),
                None => params.remove(RANGE_TYPE_KEY),
            }
            params.set(PAGE_KEY, "1");
        });
    }

    /// Replace the status filter. Blank and stringified-missing values are
    /// skipped; order is preserved.
    pub fn set_project_status<I, S>(&self, statuses: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.update(|params| {
            params.remove(PROJECT_STATUS_KEY);
            for status in statuses {
                let status = status.as_ref();
                if is_present(status) {
                    params.append(PROJECT_STATUS_KEY, status);
                }
            }
            params.set(PAGE_KEY, "1");
        });
    }
}

impl Deref for ListFilterQueryState {
    type Target = PagingQueryState;

    fn deref(&self) -> &Self::Target {
        &self.paging
    }
}

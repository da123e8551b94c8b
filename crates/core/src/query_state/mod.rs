//! URL-backed list state.
//!
//! The query string is the single source of truth for paging and filters.
//! State is re-read from the navigator on every access and written back with
//! replace navigation.

pub mod browse;
pub mod list_filter;
pub mod paging;
pub mod params;

pub use browse::BrowseQueryState;
pub use list_filter::ListFilterQueryState;
pub use paging::{
    coerce_positive, parse_int_prefix, BindOptions, PageCallback, PaginationProps, PagingDefaults,
    PagingQueryState,
};
pub use params::QueryParams;

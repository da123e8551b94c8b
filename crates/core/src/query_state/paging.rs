//! Page, page size and page-group width backed by the URL query string.

use std::fmt;
use std::sync::Arc;

use crate::navigation::Navigator;
use crate::pagination::PageBlock;

use super::params::QueryParams;

pub const PAGE_KEY: &str = "page";
pub const SIZE_KEY: &str = "size";
pub const PER_GROUP_KEY: &str = "perGroup";

/// Page sizes offered by the size selector unless overridden.
pub const DEFAULT_SIZE_OPTIONS: &[u32] = &[10, 20, 50];

/// Values used when a key is absent from the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingDefaults {
    pub page: u32,
    pub size: u32,
    pub per_group: u32,
}

impl Default for PagingDefaults {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            per_group: 10,
        }
    }
}

/// Integer prefix of `raw`, the way browsers' `parseInt` reads it: leading
/// whitespace and one sign are allowed, parsing stops at the first non-digit.
/// Returns `None` when there are no digits.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let text = raw.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        seen = true;
        value = value.saturating_mul(10).saturating_add(i64::from(byte - b'0'));
    }

    seen.then_some(if negative { -value } else { value })
}

/// Coerce a raw query value into a positive integer.
///
/// An absent value falls back to `default`. Anything that does not parse,
/// or parses to less than 1, becomes 1.
pub fn coerce_positive(raw: Option<&str>, default: u32) -> u32 {
    let value = match raw {
        Some(text) => parse_int_prefix(text),
        None => Some(i64::from(default)),
    };
    match value {
        Some(v) if v >= 1 => u32::try_from(v).unwrap_or(u32::MAX),
        _ => 1,
    }
}

/// Callback handed to pagination components.
pub type PageCallback = Arc<dyn Fn(u32) + Send + Sync>;

/// Presentation options for [`PagingQueryState::bind_pagination`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindOptions {
    pub show_size_selector: bool,
    pub size_options: Vec<u32>,
    pub class_name: Option<String>,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self {
            show_size_selector: false,
            size_options: DEFAULT_SIZE_OPTIONS.to_vec(),
            class_name: None,
        }
    }
}

/// Everything a pagination component needs to render and report clicks.
#[derive(Clone)]
pub struct PaginationProps {
    pub page: u32,
    pub size: u32,
    pub total: u64,
    pub per_group: u32,
    pub on_page: PageCallback,
    pub on_size_change: PageCallback,
    pub show_size_selector: bool,
    pub size_options: Vec<u32>,
    pub class_name: Option<String>,
}

impl PaginationProps {
    pub fn block(&self) -> PageBlock {
        PageBlock::compute(self.page, self.size, self.total, self.per_group)
    }
}

impl fmt::Debug for PaginationProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationProps")
            .field("page", &self.page)
            .field("size", &self.size)
            .field("total", &self.total)
            .field("per_group", &self.per_group)
            .field("show_size_selector", &self.show_size_selector)
            .field("size_options", &self.size_options)
            .field("class_name", &self.class_name)
            .finish_non_exhaustive()
    }
}

/// Paging state read from, and written to, the current URL.
///
/// Values are read fresh from the navigator on every call. All writes use
/// replace navigation so paging never adds history entries.
#[derive(Clone)]
pub struct PagingQueryState {
    navigator: Arc<dyn Navigator>,
    defaults: PagingDefaults,
}

impl PagingQueryState {
    pub fn new(navigator: Arc<dyn Navigator>, defaults: PagingDefaults) -> Self {
        Self {
            navigator,
            defaults,
        }
    }

    /// Current query parameters.
    pub fn params(&self) -> QueryParams {
        QueryParams::parse(&self.navigator.location().query)
    }

    pub fn page(&self) -> u32 {
        coerce_positive(self.params().get(PAGE_KEY), self.defaults.page)
    }

    pub fn size(&self) -> u32 {
        coerce_positive(self.params().get(SIZE_KEY), self.defaults.size)
    }

    pub fn per_group(&self) -> u32 {
        coerce_positive(self.params().get(PER_GROUP_KEY), self.defaults.per_group)
    }

    pub fn set_page(&self, page: u32) {
        self.update(|params| params.set(PAGE_KEY, page.max(1).to_string()));
    }

    /// Change the page size. The page goes back to 1 because the old page
    /// no longer covers the same items.
    pub fn set_size(&self, size: u32) {
        self.update(|params| {
            params.set(SIZE_KEY, size.max(1).to_string());
            params.set(PAGE_KEY, "1");
        });
    }

    pub fn set_per_group(&self, per_group: u32) {
        self.update(|params| params.set(PER_GROUP_KEY, per_group.max(1).to_string()));
    }

    /// Apply `edit` to the current parameters and write them back with
    /// replace navigation.
    pub fn update(&self, edit: impl FnOnce(&mut QueryParams)) {
        let mut params = self.params();
        edit(&mut params);
        self.navigator.replace_query(&params.to_query_string());
    }

    /// Page block for the current page against `total` items.
    pub fn block(&self, total: u64) -> PageBlock {
        PageBlock::compute(self.page(), self.size(), total, self.per_group())
    }

    /// Build the props bundle for a pagination component.
    pub fn bind_pagination(&self, total: u64, opts: BindOptions) -> PaginationProps {
        let on_page = {
            let state = self.clone();
            Arc::new(move |page: u32| state.set_page(page)) as PageCallback
        };
        let on_size_change = {
            let state = self.clone();
            Arc::new(move |size: u32| state.set_size(size)) as PageCallback
        };

        PaginationProps {
            page: self.page(),
            size: self.size(),
            total,
            per_group: self.per_group(),
            on_page,
            on_size_change,
            show_size_selector: opts.show_size_selector,
            size_options: opts.size_options,
            class_name: opts.class_name,
        }
    }
}

impl fmt::Debug for PagingQueryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagingQueryState")
            .field("location", &self.navigator.location())
            .field("defaults", &self.defaults)
            .finish()
    }
}

//! Grouped page-number math for paginated lists.
//!
//! Page buttons are shown in blocks of `per_group`. Block navigation moves a
//! full block width, not a single page.

use serde::Serialize;

/// The block of page numbers containing the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBlock {
    pub last_page: u32,
    /// Current page clamped into `[1, last_page]`.
    pub page: u32,
    pub start_page: u32,
    pub end_page: u32,
    /// Target of the "previous block" button, `None` when disabled.
    pub prev_block_page: Option<u32>,
    /// Target of the "next block" button, `None` when disabled.
    pub next_block_page: Option<u32>,
}

impl PageBlock {
    /// Compute the block for `page` given the list `total` and page `size`.
    ///
    /// Zero `size` and `per_group` are treated as 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use fundhub_core::pagination::PageBlock;
    ///
    /// let block = PageBlock::compute(12, 10, 47, 5);
    /// assert_eq!((block.last_page, block.page), (5, 5));
    /// assert_eq!((block.start_page, block.end_page), (1, 5));
    /// assert_eq!(block.next_block_page, None);
    /// ```
    pub fn compute(page: u32, size: u32, total: u64, per_group: u32) -> Self {
        let size = u64::from(size.max(1));
        let per_group = per_group.max(1);

        let last_page = u32::try_from(total.div_ceil(size))
            .unwrap_or(u32::MAX)
            .max(1);
        let page = page.clamp(1, last_page);

        let block = (page - 1) / per_group;
        let start_page = block * per_group + 1;
        let end_page = start_page.saturating_add(per_group - 1).min(last_page);

        let prev_block_page =
            (start_page > 1).then(|| start_page.saturating_sub(per_group).max(1));
        let next_block_page =
            (end_page < last_page).then(|| end_page.saturating_add(per_group).min(last_page));

        Self {
            last_page,
            page,
            start_page,
            end_page,
            prev_block_page,
            next_block_page,
        }
    }

    /// Page numbers to render as buttons.
    pub fn pages(&self) -> std::ops::RangeInclusive<u32> {
        self.start_page..=self.end_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_block_when_pages_fit() {
        let block = PageBlock::compute(12, 10, 47, 5);
        assert_eq!(block.last_page, 5);
        assert_eq!(block.page, 5);
        assert_eq!(block.start_page, 1);
        assert_eq!(block.end_page, 5);
        assert_eq!(block.prev_block_page, None);
        assert_eq!(block.next_block_page, None);
    }

    #[test]
    fn empty_list_has_one_page() {
        let block = PageBlock::compute(3, 10, 0, 10);
        assert_eq!(block.last_page, 1);
        assert_eq!(block.page, 1);
        assert_eq!(block.pages().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn middle_block_moves_by_full_width() {
        // 23 pages, blocks of 5: page 8 sits in 6..=10.
        let block = PageBlock::compute(8, 10, 230, 5);
        assert_eq!((block.start_page, block.end_page), (6, 10));
        assert_eq!(block.prev_block_page, Some(1));
        assert_eq!(block.next_block_page, Some(15));
    }

    #[test]
    fn last_block_is_truncated() {
        let block = PageBlock::compute(22, 10, 230, 5);
        assert_eq!((block.start_page, block.end_page), (21, 23));
        assert_eq!(block.prev_block_page, Some(16));
        assert_eq!(block.next_block_page, None);
    }

    #[test]
    fn next_jump_clamps_to_last_page() {
        // 12 pages, blocks of 5: from 1..=5 next jumps to min(12, 10).
        let block = PageBlock::compute(1, 10, 120, 5);
        assert_eq!(block.next_block_page, Some(10));
        let block = PageBlock::compute(6, 10, 120, 5);
        assert_eq!(block.next_block_page, Some(12));
    }

    #[test]
    fn zero_inputs_are_treated_as_one() {
        let block = PageBlock::compute(0, 0, 3, 0);
        assert_eq!(block.last_page, 3);
        assert_eq!(block.page, 1);
        assert_eq!((block.start_page, block.end_page), (1, 1));
        assert_eq!(block.next_block_page, Some(2));
    }
}

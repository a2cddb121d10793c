use serde::Serialize;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    /// `per_page` is raised to at least 1.
    pub fn new(page: usize, per_page: usize) -> Self {
        Self {
            page,
            per_page: per_page.max(1),
        }
    }

    pub fn first(per_page: usize) -> Self {
        Self::new(1, per_page)
    }
}

/// One page of filtered records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Effective page after clamping, 1-based.
    pub page: usize,
    pub per_page: usize,
    pub total_items: usize,
    /// `ceil(total_items / per_page)`, 0 for an empty result.
    pub total_pages: usize,
}

impl<T: Clone> Page<T> {
    /// Slices `matches` to the requested page.
    ///
    /// Requests past the end clamp to the last page; page 0 clamps to 1.
    pub fn from_matches(matches: &[&T], request: PageRequest) -> Self {
        let per_page = request.per_page.max(1);
        let total_items = matches.len();
        let total_pages = total_items.div_ceil(per_page);
        let page = request.page.clamp(1, total_pages.max(1));

        let start = (page - 1) * per_page;
        let end = (start + per_page).min(total_items);
        let items = matches
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|item| (*item).clone())
            .collect();

        Self {
            items,
            page,
            per_page,
            total_items,
            total_pages,
        }
    }
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Short position label, e.g. `2 / 3`.
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.page, self.total_pages.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(n: usize) -> Vec<usize> {
        (1..=n).collect()
    }

    fn page_of(data: &[usize], page: usize, per_page: usize) -> Page<usize> {
        let refs: Vec<&usize> = data.iter().collect();
        Page::from_matches(&refs, PageRequest::new(page, per_page))
    }

    #[test]
    fn test_empty_has_zero_pages() {
        let page = page_of(&[], 3, 10);
        assert_eq!(page.total_pages, 0);
        assert_eq!(page.page, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn test_last_page_holds_remainder() {
        let data = numbers(25);
        let page = page_of(&data, 3, 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
        assert!(page.has_prev());
        assert!(!page.has_next());
    }

    #[test]
    fn test_exact_multiple_last_page_is_full() {
        let data = numbers(20);
        let page = page_of(&data, 4, 5);
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn test_out_of_range_clamps() {
        let data = numbers(12);
        let past = page_of(&data, 99, 5);
        assert_eq!(past.page, 3);
        assert_eq!(past.items, vec![11, 12]);

        let zero = page_of(&data, 0, 5);
        assert_eq!(zero.page, 1);
        assert_eq!(zero.items, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_every_item_appears_once_across_pages() {
        let data = numbers(23);
        let mut seen = Vec::new();
        for p in 1..=page_of(&data, 1, 4).total_pages {
            seen.extend(page_of(&data, p, 4).items);
        }
        assert_eq!(seen, data);
    }
}

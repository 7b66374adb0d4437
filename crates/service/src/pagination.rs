//! In-memory search and pagination for list screens
//!
//! `ListView` holds a fetched collection and slices the filtered view into
//! fixed-size pages. Inputs are normalized the same way everywhere: page
//! size is clamped to 1..=100 and page numbers to the valid range.

use models::search::json_values_as_text;
use models::Searchable;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 100;
pub const DEFAULT_VISIBLE_BUTTONS: usize = 5;

/// One control in a numbered pager.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageButton {
    Page(usize),
    Ellipsis,
}

/// Searches every stringified field of a serializable record.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchAllFields<T>(pub T);

impl<T: Serialize> Searchable for SearchAllFields<T> {
    fn search_fields(&self) -> Vec<String> {
        serde_json::to_value(&self.0).map(|v| json_values_as_text(&v)).unwrap_or_default()
    }
}

#[derive(Clone, Debug)]
pub struct ListView<T> {
    items: Vec<T>,
    search: String,
    page_size: usize,
    /// 1-based
    page: usize,
}

impl<T: Searchable> ListView<T> {
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self { items, search: String::new(), page_size: page_size.clamp(1, MAX_PAGE_SIZE), page: 1 }
    }

    /// Replace the collection (refresh after write). Keeps the search term
    /// and clamps the current page.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.page = self.page.min(self.total_pages());
    }

    pub fn items(&self) -> &[T] { &self.items }

    pub fn search(&self) -> &str { &self.search }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    pub fn page(&self) -> usize { self.page }

    pub fn page_size(&self) -> usize { self.page_size }

    pub fn filtered(&self) -> Vec<&T> {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return self.items.iter().collect();
        }
        self.items
            .iter()
            .filter(|item| item.search_fields().iter().any(|f| f.to_lowercase().contains(&needle)))
            .collect()
    }

    pub fn filtered_len(&self) -> usize { self.filtered().len() }

    /// At least 1, even for an empty view.
    pub fn total_pages(&self) -> usize { self.filtered_len().div_ceil(self.page_size).max(1) }

    pub fn page_items(&self) -> Vec<&T> {
        let start = (self.page - 1) * self.page_size;
        self.filtered().into_iter().skip(start).take(self.page_size).collect()
    }

    pub fn go_to(&mut self, page: usize) { self.page = page.clamp(1, self.total_pages()); }

    pub fn has_next(&self) -> bool { self.page < self.total_pages() }

    pub fn has_previous(&self) -> bool { self.page > 1 }

    pub fn next(&mut self) {
        if self.has_next() {
            self.page += 1;
        }
    }

    pub fn previous(&mut self) {
        if self.has_previous() {
            self.page -= 1;
        }
    }

    /// Numbered buttons with the first and last page always present and an
    /// ellipsis standing in for skipped runs.
    pub fn page_buttons(&self, max_visible: usize) -> Vec<PageButton> {
        page_buttons(self.page, self.total_pages(), max_visible)
    }
}

pub fn page_buttons(current: usize, total: usize, max_visible: usize) -> Vec<PageButton> {
    let max_visible = max_visible.max(3);
    if total <= max_visible {
        return (1..=total).map(PageButton::Page).collect();
    }
    let inner = max_visible - 2;
    let start = current.saturating_sub(inner / 2).clamp(2, total - inner);
    let end = start + inner - 1;

    let mut out = vec![PageButton::Page(1)];
    if start > 2 {
        out.push(PageButton::Ellipsis);
    }
    out.extend((start..=end).map(PageButton::Page));
    if end < total - 1 {
        out.push(PageButton::Ellipsis);
    }
    out.push(PageButton::Page(total));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use PageButton::{Ellipsis, Page};

    #[derive(Debug, PartialEq)]
    struct Row(&'static str);

    impl Searchable for Row {
        fn search_fields(&self) -> Vec<String> { vec![self.0.to_string()] }
    }

    fn rows(n: usize) -> Vec<Row> {
        const NAMES: [&str; 6] = ["Alice", "bob", "Carol", "dave", "ALINA", "eve"];
        (0..n).map(|i| Row(NAMES[i % NAMES.len()])).collect()
    }

    #[test]
    fn empty_search_is_first_page_of_unfiltered() {
        let expected: Vec<&str> = rows(12).iter().take(4).map(|r| r.0).collect();
        let mut view = ListView::new(rows(12), 4);
        view.go_to(2);
        view.set_search("");
        assert_eq!(view.page_items().iter().map(|r| r.0).collect::<Vec<_>>(), expected);
        view.set_search("   ");
        assert_eq!(view.page_items().iter().map(|r| r.0).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn search_is_case_insensitive_and_resets_page() {
        let mut view = ListView::new(rows(12), 2);
        view.go_to(3);
        view.set_search("al");
        assert_eq!(view.page(), 1);
        let names: Vec<&str> = view.filtered().iter().map(|r| r.0).collect();
        assert_eq!(names, vec!["Alice", "ALINA", "Alice", "ALINA"]);
        assert_eq!(view.total_pages(), 2);
    }

    #[test]
    fn page_size_is_clamped() {
        assert_eq!(ListView::new(rows(1), 0).page_size(), 1);
        assert_eq!(ListView::new(rows(1), 1000).page_size(), MAX_PAGE_SIZE);
    }

    #[test]
    fn navigation_stops_at_bounds() {
        let mut view = ListView::new(rows(5), 2);
        assert_eq!(view.total_pages(), 3);
        assert!(!view.has_previous());
        view.previous();
        assert_eq!(view.page(), 1);
        view.next();
        view.next();
        view.next();
        assert_eq!(view.page(), 3);
        assert!(!view.has_next());
        assert_eq!(view.page_items().len(), 1);
        view.go_to(0);
        assert_eq!(view.page(), 1);
        view.go_to(99);
        assert_eq!(view.page(), 3);
    }

    #[test]
    fn empty_view_has_one_page() {
        let view: ListView<Row> = ListView::new(vec![], 10);
        assert_eq!(view.total_pages(), 1);
        assert!(view.page_items().is_empty());
        assert_eq!(view.page_buttons(5), vec![Page(1)]);
    }

    #[test]
    fn set_items_clamps_current_page() {
        let mut view = ListView::new(rows(10), 2);
        view.go_to(5);
        view.set_items(rows(3));
        assert_eq!(view.page(), 2);
    }

    #[test]
    fn buttons_without_compression() {
        assert_eq!(page_buttons(2, 4, 5), vec![Page(1), Page(2), Page(3), Page(4)]);
    }

    #[test]
    fn buttons_compress_around_current() {
        assert_eq!(
            page_buttons(1, 10, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_buttons(5, 10, 5),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
        assert_eq!(
            page_buttons(10, 10, 5),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
        assert_eq!(
            page_buttons(3, 6, 5),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(6)]
        );
    }

    #[test]
    fn search_all_fields_sees_nested_values() {
        let mut view = ListView::new(
            vec![
                SearchAllFields(json!({"id": 1, "guest": {"name": "Zoe"}})),
                SearchAllFields(json!({"id": 2, "guest": {"name": "Max"}})),
            ],
            10,
        );
        view.set_search("zoe");
        assert_eq!(view.filtered_len(), 1);
    }
}

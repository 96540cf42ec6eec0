use std::ops::Range;

use crate::request::SearchRequest;
use crate::types::{ResultItem, ResultSet};

/// The installed result set plus selection and scroll position.
///
/// `selected` is always a valid index when there are items, and stays inside
/// `viewport_top..viewport_top + visible_rows`.
#[derive(Debug, Clone)]
pub struct ResultBrowser {
    results: ResultSet,
    request: SearchRequest,
    selected: usize,
    viewport_top: usize,
}

impl ResultBrowser {
    pub fn new(results: ResultSet, request: SearchRequest) -> Self {
        Self {
            results,
            request,
            selected: 0,
            viewport_top: 0,
        }
    }

    pub fn results(&self) -> &ResultSet {
        &self.results
    }

    /// The request that produced the current page
    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn viewport_top(&self) -> usize {
        self.viewport_top
    }

    pub fn selected_item(&self) -> Option<&ResultItem> {
        self.results.items.get(self.selected)
    }

    pub fn move_down(&mut self, visible_rows: usize) {
        if self.selected + 1 < self.results.len() {
            self.selected += 1;
            self.fit(visible_rows);
        }
    }

    pub fn move_up(&mut self, visible_rows: usize) {
        if self.selected > 0 {
            self.selected -= 1;
            self.fit(visible_rows);
        }
    }

    pub fn go_to_top(&mut self, visible_rows: usize) {
        self.selected = 0;
        self.fit(visible_rows);
    }

    pub fn go_to_bottom(&mut self, visible_rows: usize) {
        self.selected = self.results.len().saturating_sub(1);
        self.fit(visible_rows);
    }

    /// Scroll the minimum needed to keep the selection on screen.
    pub fn fit(&mut self, visible_rows: usize) {
        let rows = visible_rows.max(1);
        if self.selected < self.viewport_top {
            self.viewport_top = self.selected;
        } else if self.selected >= self.viewport_top + rows {
            self.viewport_top = self.selected + 1 - rows;
        }
    }

    /// Indices of the items on screen. The frame may be smaller than the
    /// size the viewport was last fitted to, so the selection is re-checked.
    pub fn visible_range(&self, visible_rows: usize) -> Range<usize> {
        let rows = visible_rows.max(1);
        let top = if self.selected >= self.viewport_top + rows {
            self.selected + 1 - rows
        } else {
            self.viewport_top
        };
        let end = (top + visible_rows).min(self.results.len());
        top.min(end)..end
    }
}

//! Client-side list state: sort, pagination window and row selection over one result set.

use std::{cmp::Ordering, collections::BTreeSet};

use shared::domain::{Vendor, VendorField, VendorId};
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

pub const PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: VendorField,
    pub direction: SortDirection,
}

#[derive(Debug, Clone)]
pub struct VendorListController {
    results: Vec<Vendor>,
    sort: Option<SortConfig>,
    current_page: usize,
    page_size: usize,
    selected: BTreeSet<VendorId>,
}

impl Default for VendorListController {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl VendorListController {
    pub fn new(page_size: usize) -> Self {
        Self {
            results: Vec::new(),
            sort: None,
            current_page: 1,
            page_size: page_size.max(1),
            selected: BTreeSet::new(),
        }
    }

    /// Installs a fresh search result; selection and page position do not carry over.
    pub fn replace_results(&mut self, results: Vec<Vendor>) {
        self.results = results;
        self.selected.clear();
        self.current_page = 1;
    }

    pub fn results(&self) -> &[Vendor] {
        &self.results
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn sort_config(&self) -> Option<SortConfig> {
        self.sort
    }

    /// Same key flips the direction; a new key starts ascending.
    pub fn sort(&mut self, key: VendorField) {
        self.sort = Some(match self.sort {
            Some(current) if current.key == key => SortConfig {
                key,
                direction: current.direction.flipped(),
            },
            _ => SortConfig {
                key,
                direction: SortDirection::Ascending,
            },
        });
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    pub fn sorted(&self) -> Vec<&Vendor> {
        let mut rows: Vec<&Vendor> = self.results.iter().collect();
        if let Some(SortConfig { key, direction }) = self.sort {
            // `sort_by` is stable, so equal keys keep their received order.
            rows.sort_by(|a, b| {
                let ordering = locale_compare(a.field(key), b.field(key));
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    pub fn total_pages(&self) -> usize {
        self.results.len().div_ceil(self.page_size)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    fn last_page(&self) -> usize {
        self.total_pages().max(1)
    }

    pub fn next_page(&mut self) {
        if self.current_page < self.total_pages() {
            self.current_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.last_page());
    }

    pub fn has_pagination(&self) -> bool {
        self.results.len() > self.page_size
    }

    pub fn visible_page(&self) -> Vec<&Vendor> {
        let start = (self.current_page - 1) * self.page_size;
        self.sorted()
            .into_iter()
            .skip(start)
            .take(self.page_size)
            .collect()
    }

    pub fn selected_ids(&self) -> &BTreeSet<VendorId> {
        &self.selected
    }

    pub fn is_selected(&self, id: VendorId) -> bool {
        self.selected.contains(&id)
    }

    /// Ids that are not part of the current results are ignored.
    pub fn toggle(&mut self, id: VendorId) {
        if self.selected.remove(&id) {
            return;
        }
        if self.results.iter().any(|vendor| vendor.id == id) {
            self.selected.insert(id);
        }
    }

    /// Duplicate ids in the results count once.
    pub fn all_selected(&self) -> bool {
        !self.results.is_empty()
            && self
                .results
                .iter()
                .all(|vendor| self.selected.contains(&vendor.id))
    }

    pub fn toggle_all(&mut self) {
        if self.all_selected() {
            self.selected.clear();
        } else {
            self.selected = self.results.iter().map(|vendor| vendor.id).collect();
        }
    }

    /// In-place replacement by id; returns false when the vendor is not listed.
    pub fn replace_vendor(&mut self, vendor: Vendor) -> bool {
        match self.results.iter_mut().find(|row| row.id == vendor.id) {
            Some(row) => {
                *row = vendor;
                true
            }
            None => false,
        }
    }

    pub fn remove_ids(&mut self, ids: &[VendorId]) {
        self.results.retain(|vendor| !ids.contains(&vendor.id));
        for id in ids {
            self.selected.remove(id);
        }
        self.current_page = self.current_page.min(self.last_page());
    }
}

/// Base letters first, ignoring accents and case; then unaccented ahead of
/// accented; then lowercase ahead of uppercase.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowercase_nfd(a).cmp(lowercase_nfd(b)))
        .then_with(|| {
            a.nfd()
                .zip(b.nfd())
                .map(|(x, y)| case_rank(x).cmp(&case_rank(y)))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(Ordering::Equal)
        })
}

fn base_letters(value: &str) -> impl Iterator<Item = char> + '_ {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn lowercase_nfd(value: &str) -> impl Iterator<Item = char> + '_ {
    value.nfd().flat_map(char::to_lowercase)
}

fn case_rank(c: char) -> u8 {
    u8::from(c.is_uppercase())
}

#[cfg(test)]
#[path = "tests/list_tests.rs"]
mod tests;

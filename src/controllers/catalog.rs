//! The browse-filter-search view model shared by the courses and blogs pages.

use std::future::Future;

use tokio::sync::RwLock;

use crate::{
    error::Result,
    models::{blog::Blog, course::Course},
    search::SearchGate,
};

/// The filter value that shows every category.
pub const ALL_CATEGORIES: &str = "All";

/// Records that belong to a category.
pub trait Categorized {
    fn category(&self) -> &str;
}

impl Categorized for Course {
    fn category(&self) -> &str {
        Course::category(self)
    }
}

impl Categorized for Blog {
    fn category(&self) -> &str {
        Blog::category(self)
    }
}

struct CatalogState<T> {
    all: Vec<T>,
    filter: String,
    displayed: Vec<T>,
}

/// A fetched collection plus the category filter and search shown over it.
pub struct Catalog<T> {
    state: RwLock<CatalogState<T>>,
    gate: SearchGate,
}

fn narrow<T: Categorized + Clone>(items: &[T], category: &str) -> Vec<T> {
    if category == ALL_CATEGORIES {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.category() == category)
        .cloned()
        .collect()
}

impl<T: Categorized + Clone> Catalog<T> {
    /// Creates a catalog showing every item.
    pub fn new(items: Vec<T>, gate: SearchGate) -> Self {
        Self {
            state: RwLock::new(CatalogState {
                displayed: items.clone(),
                all: items,
                filter: ALL_CATEGORIES.to_string(),
            }),
            gate,
        }
    }

    /// The items currently shown.
    pub async fn displayed(&self) -> Vec<T> {
        self.state.read().await.displayed.clone()
    }

    /// Every fetched item, ignoring filter and search.
    pub async fn all(&self) -> Vec<T> {
        self.state.read().await.all.clone()
    }

    pub async fn current_filter(&self) -> String {
        self.state.read().await.filter.clone()
    }

    /// Shows only `category` ([`ALL_CATEGORIES`] for everything).
    ///
    /// Filters the full collection, not the last search results.
    pub async fn filter(&self, category: &str) -> Vec<T> {
        let mut state = self.state.write().await;
        state.filter = category.to_string();
        state.displayed = narrow(&state.all, category);
        state.displayed.clone()
    }

    /// Runs a debounced search through `fetch`.
    ///
    /// A blank keyword cancels pending searches and re-applies the current
    /// filter. Results are narrowed by the active category.
    ///
    /// # Returns
    ///
    /// `true` if the displayed items changed, `false` if this search was
    /// superseded by a newer one.
    pub async fn search<F, Fut>(&self, keyword: &str, fetch: F) -> Result<bool>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = Result<Vec<T>>>,
    {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            self.gate.cancel();
            let filter = self.current_filter().await;
            self.filter(&filter).await;
            return Ok(true);
        }

        let keyword = keyword.to_string();
        let Some(results) = self.gate.run(|| fetch(keyword)).await? else {
            return Ok(false);
        };

        let mut state = self.state.write().await;
        state.displayed = narrow(&results, &state.filter);
        Ok(true)
    }
}

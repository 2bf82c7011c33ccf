//! Pagination and filtering state for the product list view.
//!
//! Pages come from the server; the availability and search filters are
//! applied client-side to the fetched page only, so they never see the
//! rest of the catalog. A filtered page can show fewer than `PAGE_SIZE`
//! rows while matches sit unseen on other pages; the filters narrow the
//! visible page, they do not search the catalog.

use tracing::info;

use crate::api::product_api::ProductApi;
use crate::errors::ApiError;
use crate::models::product_model::Product;

/// Products shown per page.
pub const PAGE_SIZE: usize = 5;

/// Availability filter values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    InStock,
    OutOfStock,
}

impl StatusFilter {
    pub fn matches(self, product: &Product) -> bool {
        match self {
            StatusFilter::InStock => product.in_stock,
            StatusFilter::OutOfStock => !product.in_stock,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::InStock => "In Stock",
            StatusFilter::OutOfStock => "Out of Stock",
        }
    }
}

/// Pagination state for the list view.
///
/// The page count derives from the server-reported item total, and the
/// current page snaps back into range when the total shrinks under it.
/// Changing either filter resets to page 1.
#[derive(Debug, Clone)]
pub struct PageState {
    page: usize,
    page_size: usize,
    total_pages: usize,
    status_filter: Option<StatusFilter>,
    search_term: String,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PAGE_SIZE,
            total_pages: 0,
            status_filter: None,
            search_term: String::new(),
        }
    }
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn status_filter(&self) -> Option<StatusFilter> {
        self.status_filter
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Recompute the page count from a server-reported item total and
    /// clamp the current page into the new range.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_pages = total_items.div_ceil(self.page_size);
        if self.total_pages == 0 {
            self.page = 1;
        } else if self.page > self.total_pages {
            self.page = self.total_pages;
        }
    }

    pub fn set_status_filter(&mut self, filter: Option<StatusFilter>) {
        self.status_filter = filter;
        self.page = 1;
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    /// Move to `page` when it is within `1..=total_pages`.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page >= 1 && page <= self.total_pages {
            self.page = page;
            true
        } else {
            false
        }
    }

    /// No-op on the last page.
    pub fn next_page(&mut self) -> bool {
        if self.page < self.total_pages {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// No-op on the first page.
    pub fn previous_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// `1..=total_pages`, for rendering the pager.
    pub fn pages(&self) -> Vec<usize> {
        (1..=self.total_pages).collect()
    }
}

/// Client-side post-filter over one fetched page slice. The availability
/// filter applies first, then a case-insensitive name or category search.
pub fn apply_filters(
    products: Vec<Product>,
    filter: Option<StatusFilter>,
    search_term: &str,
) -> Vec<Product> {
    let mut filtered = products;
    if let Some(filter) = filter {
        filtered.retain(|product| filter.matches(product));
    }
    let term = search_term.trim().to_lowercase();
    if !term.is_empty() {
        filtered.retain(|product| {
            product.name.to_lowercase().contains(&term)
                || product.category.to_lowercase().contains(&term)
        });
    }
    filtered
}

/// The list view: one fetched page slice plus its filtered rendering.
pub struct ListService {
    api: ProductApi,
    state: PageState,
    products: Vec<Product>,
}

impl ListService {
    pub fn new(api: ProductApi) -> Self {
        Self {
            api,
            state: PageState::new(),
            products: Vec::new(),
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// The filtered products of the current page.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Fetch the current page and re-apply the client-side filters.
    ///
    /// When the reported total has shrunk below the current page, the
    /// page snaps back into range and the snapped page is fetched once
    /// more, so the rows always belong to the page the pager shows.
    pub async fn refresh(&mut self) -> Result<(), ApiError> {
        let requested = self.state.page();
        let mut page = self
            .api
            .products_page(requested, self.state.page_size())
            .await?;
        self.state.set_total_items(page.total);
        if self.state.page() != requested {
            page = self
                .api
                .products_page(self.state.page(), self.state.page_size())
                .await?;
            self.state.set_total_items(page.total);
        }
        self.products = apply_filters(
            page.products,
            self.state.status_filter(),
            self.state.search_term(),
        );
        info!(
            "Showing page {} of {} ({} products after filters)",
            self.state.page(),
            self.state.total_pages(),
            self.products.len()
        );
        Ok(())
    }

    /// Change the availability filter. Resets to page 1, then refetches.
    pub async fn set_status_filter(&mut self, filter: Option<StatusFilter>) -> Result<(), ApiError> {
        self.state.set_status_filter(filter);
        self.refresh().await
    }

    /// Change the search term. Resets to page 1, then refetches.
    pub async fn set_search_term(&mut self, term: impl Into<String>) -> Result<(), ApiError> {
        self.state.set_search_term(term);
        self.refresh().await
    }

    /// Jump to a page; out-of-range targets are ignored without a fetch.
    pub async fn go_to_page(&mut self, page: usize) -> Result<(), ApiError> {
        if self.state.go_to_page(page) {
            self.refresh().await
        } else {
            Ok(())
        }
    }

    /// Advance one page; a no-op without a fetch on the last page.
    pub async fn next_page(&mut self) -> Result<(), ApiError> {
        if self.state.next_page() {
            self.refresh().await
        } else {
            Ok(())
        }
    }

    /// Go back one page; a no-op without a fetch on the first page.
    pub async fn previous_page(&mut self) -> Result<(), ApiError> {
        if self.state.previous_page() {
            self.refresh().await
        } else {
            Ok(())
        }
    }
}

//! Catalog state: the loaded page, filter criteria, and the derived view.
//!
//! The store is the single owner of this state. Callers hold an
//! `Arc<CatalogStore>` and go through the named actions below; every action
//! that touches `items` or the criteria recomputes `filtered_items` before
//! releasing the lock. Loads are tagged with a sequence number and a response
//! that is no longer the latest request is dropped without touching state.

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use anyhow::anyhow;
use shared::{
    domain::{FilterCriteria, FilterPatch, Item, ItemId, ItemPatch, NewItem},
    protocol::total_pages,
};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, error, info, warn};

use crate::{
    config::{PaginationMode, DEFAULT_ITEMS_PER_PAGE},
    error::{ClientError, ClientResult},
    gateway::CatalogGateway,
    query,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PageState {
    pub items: Vec<Item>,
    pub filtered_items: Vec<Item>,
    pub current_page: u32,
    pub items_per_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub is_loading: bool,
}

impl PageState {
    fn new(items_per_page: u32) -> Self {
        Self {
            items: Vec::new(),
            filtered_items: Vec::new(),
            current_page: 1,
            items_per_page: items_per_page.max(1),
            total_pages: 0,
            total_count: 0,
            is_loading: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    /// Items passing the active filters.
    pub filtered_count: usize,
    /// Items on the visible page.
    pub shown: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    LoadStarted { page: u32, seq: u64 },
    Loaded { page: u32, count: usize },
    LoadFailed { message: String },
    ViewChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    /// A newer load was issued while this one was in flight.
    Superseded,
}

struct CatalogState {
    page: PageState,
    filters: FilterCriteria,
    latest_request: u64,
}

pub struct CatalogStore {
    gateway: Arc<dyn CatalogGateway>,
    mode: PaginationMode,
    inner: Mutex<CatalogState>,
    events: broadcast::Sender<StoreEvent>,
}

impl CatalogStore {
    pub fn new(gateway: Arc<dyn CatalogGateway>) -> Arc<Self> {
        Self::with_options(gateway, PaginationMode::Server, DEFAULT_ITEMS_PER_PAGE)
    }

    pub fn with_options(
        gateway: Arc<dyn CatalogGateway>,
        mode: PaginationMode,
        items_per_page: u32,
    ) -> Arc<Self> {
        let (events, _) = broadcast::channel(64);
        Arc::new(Self {
            gateway,
            mode,
            inner: Mutex::new(CatalogState {
                page: PageState::new(items_per_page),
                filters: FilterCriteria::default(),
                latest_request: 0,
            }),
            events,
        })
    }

    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> PageState {
        self.inner.lock().await.page.clone()
    }

    pub async fn filters(&self) -> FilterCriteria {
        self.inner.lock().await.filters.clone()
    }

    /// Items for the current page of the view. With server paging the loaded
    /// page is the view; with client paging the filtered view is sliced.
    pub async fn visible_items(&self) -> Vec<Item> {
        let guard = self.inner.lock().await;
        visible_slice(&guard.page, self.mode).to_vec()
    }

    pub async fn page_info(&self) -> PageInfo {
        let guard = self.inner.lock().await;
        PageInfo {
            current_page: guard.page.current_page,
            total_pages: guard.page.total_pages,
            total_count: guard.page.total_count,
            filtered_count: guard.page.filtered_items.len(),
            shown: visible_slice(&guard.page, self.mode).len(),
        }
    }

    /// Fetches `page`/`limit` (or the current ones) and replaces the loaded
    /// items. On failure the previous items stay in place.
    pub async fn load_products(
        &self,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> ClientResult<LoadOutcome> {
        let (seq, page, limit) = {
            let mut guard = self.inner.lock().await;
            guard.latest_request += 1;
            let page = page.unwrap_or(guard.page.current_page).max(1);
            let limit = limit.unwrap_or(guard.page.items_per_page).max(1);
            guard.page.is_loading = true;
            (guard.latest_request, page, limit)
        };
        let _ = self.events.send(StoreEvent::LoadStarted { page, seq });

        let result = match self.mode {
            PaginationMode::Server => self.gateway.list(page, limit).await,
            PaginationMode::Client => self.gateway.list_all().await,
        };

        let mut guard = self.inner.lock().await;
        if seq != guard.latest_request {
            debug!(
                seq,
                latest = guard.latest_request,
                page,
                "catalog: discarding superseded load"
            );
            return Ok(LoadOutcome::Superseded);
        }
        guard.page.is_loading = false;

        match result {
            Ok(paged) => {
                let items = admit_items(paged.data);
                let count = items.len();
                let state = &mut guard.page;
                state.items = items;
                state.items_per_page = limit;
                state.current_page = page;
                if self.mode == PaginationMode::Server {
                    if paged.page > 0 {
                        state.current_page = paged.page;
                    }
                    state.total_count = paged.total;
                    state.total_pages = paged.total_pages;
                }
                refresh_view(&mut guard, self.mode);
                let current_page = guard.page.current_page;
                drop(guard);

                info!(page = current_page, count, "catalog: products loaded");
                let _ = self.events.send(StoreEvent::Loaded {
                    page: current_page,
                    count,
                });
                Ok(LoadOutcome::Applied)
            }
            Err(err) => {
                drop(guard);
                error!(page, %err, "catalog: failed to load products");
                let _ = self.events.send(StoreEvent::LoadFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Creates the item remotely, then reloads the current page. A failed
    /// reload is logged by [`Self::load_products`] and does not undo the create.
    pub async fn add_product(&self, new: NewItem) -> ClientResult<Item> {
        let created = self.gateway.create(&new).await?;
        info!(id = %created.id, name = %created.name, "catalog: product created");
        let _ = self.load_products(None, None).await;
        Ok(created)
    }

    /// Appends the item locally under a client-generated id, without any
    /// remote call.
    pub async fn insert_local(&self, new: NewItem) -> Item {
        let item = Item::from_new(ItemId::generate(), new);
        {
            let mut guard = self.inner.lock().await;
            guard.page.items.push(item.clone());
            if self.mode == PaginationMode::Server {
                guard.page.total_count += 1;
                guard.page.total_pages =
                    total_pages(guard.page.total_count, guard.page.items_per_page);
            }
            refresh_view(&mut guard, self.mode);
        }
        debug!(id = %item.id, "catalog: product added locally");
        let _ = self.events.send(StoreEvent::ViewChanged);
        item
    }

    pub async fn get_product(&self, id: &ItemId) -> ClientResult<Item> {
        self.gateway.get_by_id(id).await
    }

    pub async fn update_product(&self, id: &ItemId, patch: ItemPatch) -> ClientResult<Item> {
        patch
            .validate()
            .map_err(|e| ClientError::Unknown(anyhow!(e)))?;
        let updated = self.gateway.update(id, &patch).await?;
        info!(id = %updated.id, "catalog: product updated");
        let _ = self.load_products(None, None).await;
        Ok(updated)
    }

    pub async fn delete_product(&self, id: &ItemId) -> ClientResult<()> {
        self.gateway.delete(id).await?;
        info!(id = %id, "catalog: product deleted");
        let _ = self.load_products(None, None).await;
        Ok(())
    }

    /// Merges `patch` into the criteria and goes back to page 1. With server
    /// paging this only reshapes the loaded page; no fetch is issued.
    pub async fn set_filters(&self, patch: FilterPatch) {
        {
            let mut guard = self.inner.lock().await;
            guard.filters.merge(patch);
            guard.page.current_page = 1;
            refresh_view(&mut guard, self.mode);
        }
        let _ = self.events.send(StoreEvent::ViewChanged);
    }

    /// Moves to `page`. With server paging the page is fetched and
    /// `current_page` only changes once it has loaded.
    pub async fn set_page(&self, page: u32) -> ClientResult<LoadOutcome> {
        let page = page.max(1);
        match self.mode {
            PaginationMode::Server => self.load_products(Some(page), None).await,
            PaginationMode::Client => {
                {
                    let mut guard = self.inner.lock().await;
                    let last = guard.page.total_pages.max(1);
                    guard.page.current_page = page.min(last);
                }
                let _ = self.events.send(StoreEvent::ViewChanged);
                Ok(LoadOutcome::Applied)
            }
        }
    }

    /// Recomputes the filtered view from the loaded items and criteria.
    pub async fn apply_filters(&self) {
        {
            let mut guard = self.inner.lock().await;
            refresh_view(&mut guard, self.mode);
        }
        let _ = self.events.send(StoreEvent::ViewChanged);
    }
}

/// Drops loaded items with an invalid price or an id already seen earlier in
/// the same response.
fn admit_items(items: Vec<Item>) -> Vec<Item> {
    let mut seen = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| {
            if let Err(err) = item.validate() {
                warn!(id = %item.id, %err, "catalog: dropping item with invalid price");
                return false;
            }
            if !seen.insert(item.id.clone()) {
                warn!(id = %item.id, "catalog: dropping duplicate item id");
                return false;
            }
            true
        })
        .collect()
}

fn refresh_view(state: &mut CatalogState, mode: PaginationMode) {
    state.page.filtered_items = query::apply_filters(&state.page.items, &state.filters);
    if mode == PaginationMode::Client {
        let filtered = state.page.filtered_items.len() as u64;
        state.page.total_count = state.page.items.len() as u64;
        state.page.total_pages = total_pages(filtered, state.page.items_per_page);
        state.page.current_page = state.page.current_page.clamp(1, state.page.total_pages.max(1));
    }
}

fn visible_slice(page: &PageState, mode: PaginationMode) -> &[Item] {
    match mode {
        PaginationMode::Server => &page.filtered_items,
        PaginationMode::Client => {
            let per_page = page.items_per_page.max(1) as usize;
            let start = (page.current_page.max(1) as usize - 1).saturating_mul(per_page);
            let end = start.saturating_add(per_page).min(page.filtered_items.len());
            page.filtered_items.get(start..end).unwrap_or(&[])
        }
    }
}

/// Latch that lets a view trigger its first load exactly once, however many
/// times the mount signal fires.
#[derive(Debug, Default)]
pub struct InitialLoad {
    started: AtomicBool,
}

impl InitialLoad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Runs the initial load on the first call; later calls return `None`.
    pub async fn ensure_loaded(&self, store: &CatalogStore) -> Option<ClientResult<LoadOutcome>> {
        if self
            .started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("catalog: initial load already triggered");
            return None;
        }
        Some(store.load_products(None, None).await)
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;

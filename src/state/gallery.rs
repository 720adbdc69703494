//! Paginated photo list with infinite-scroll loading
//!
//! The loader never performs I/O. Each operation that needs a fetch
//! returns a [`PageRequest`]; the caller runs it and feeds the
//! [`PageResponse`] back through [`PhotoListLoader::complete`].

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::data::Photo;
use super::guard::{InFlightGuard, Ticket};
use crate::api::{ApiError, PhotoSource, PAGE_SIZE};

/// A page fetch the loader wants performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub ticket: Ticket,
    /// 1-indexed page number
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Perform the fetch against `source`
    pub async fn run(self, source: Arc<dyn PhotoSource>) -> PageResponse {
        let result = source.list_photos(self.page, self.limit).await;
        PageResponse {
            ticket: self.ticket,
            page: self.page,
            result,
        }
    }
}

/// The outcome of a [`PageRequest`]
#[derive(Debug, Clone)]
pub struct PageResponse {
    pub ticket: Ticket,
    pub page: u32,
    pub result: Result<Vec<Photo>, ApiError>,
}

/// What applying a response did to the loader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// This many photos were appended
    Appended(usize),
    /// The page was empty, no more pages to load
    Exhausted,
    /// The fetch failed, automatic loading stopped
    Failed,
    /// Stale ticket or disposed loader, nothing changed
    Discarded,
}

/// Owns the accumulated photo list and its pagination state
#[derive(Debug)]
pub struct PhotoListLoader {
    items: Vec<Photo>,
    /// Last page successfully appended (0 before the first load)
    current_page: u32,
    has_more: bool,
    error: Option<ApiError>,
    in_flight: InFlightGuard,
    initialized: bool,
    alive: bool,
}

impl Default for PhotoListLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoListLoader {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            current_page: 0,
            has_more: true,
            error: None,
            in_flight: InFlightGuard::new(),
            initialized: false,
            alive: true,
        }
    }

    /// Start loading page 1
    ///
    /// Only the first call does anything.
    pub fn initialize(&mut self) -> Option<PageRequest> {
        if self.initialized || !self.alive {
            return None;
        }
        self.initialized = true;
        info!("Loading photo gallery");
        self.load_more()
    }

    /// Request the page after the last one loaded
    ///
    /// No-op while a request is outstanding, after exhaustion or failure,
    /// or once disposed.
    pub fn load_more(&mut self) -> Option<PageRequest> {
        if !self.alive || !self.has_more {
            return None;
        }
        let ticket = self.in_flight.try_acquire()?;
        let page = self.current_page + 1;

        debug!(page, "requesting photo page");
        Some(PageRequest {
            ticket,
            page,
            limit: PAGE_SIZE,
        })
    }

    /// Clear the error and try the failed page again
    ///
    /// The cursor only advances on success, so this re-requests page 1
    /// after an initial failure and the next page after a later one.
    pub fn retry(&mut self) -> Option<PageRequest> {
        if !self.alive || self.in_flight.is_busy() {
            return None;
        }
        self.initialized = true;
        self.error = None;
        self.has_more = true;
        info!(page = self.current_page + 1, "retrying photo page");
        self.load_more()
    }

    /// Apply a finished request
    pub fn complete(&mut self, response: PageResponse) -> PageOutcome {
        if !self.alive || !self.in_flight.release(response.ticket) {
            debug!(page = response.page, "discarding stale photo page");
            return PageOutcome::Discarded;
        }

        match response.result {
            Ok(photos) if photos.is_empty() => {
                info!(page = response.page, "reached the end of the gallery");
                self.has_more = false;
                PageOutcome::Exhausted
            }
            Ok(photos) => {
                let count = photos.len();
                self.items.extend(photos);
                self.current_page = response.page;
                debug!(page = self.current_page, total = self.items.len(), "appended photos");
                PageOutcome::Appended(count)
            }
            Err(err) => {
                warn!(page = response.page, "failed to load photos: {}", err);
                self.error = Some(err);
                // Failure stops automatic loading until a manual retry
                self.has_more = false;
                PageOutcome::Failed
            }
        }
    }

    /// Tear down: nothing after this call mutates the loader
    pub fn dispose(&mut self) {
        if self.alive {
            debug!("disposing photo list loader");
        }
        self.alive = false;
        self.in_flight.cancel();
    }

    pub fn items(&self) -> &[Photo] {
        &self.items
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_busy()
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }
}

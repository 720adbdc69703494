//! Single-photo loader for the detail view

use std::sync::Arc;

use tracing::{debug, warn};

use super::data::Photo;
use super::guard::{InFlightGuard, Ticket};
use crate::api::{ApiError, PhotoSource};

/// A detail fetch the loader wants performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRequest {
    pub ticket: Ticket,
    pub id: String,
}

impl DetailRequest {
    pub async fn run(self, source: Arc<dyn PhotoSource>) -> DetailResponse {
        let result = source.photo(&self.id).await;
        DetailResponse {
            ticket: self.ticket,
            id: self.id,
            result,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DetailResponse {
    pub ticket: Ticket,
    pub id: String,
    pub result: Result<Photo, ApiError>,
}

/// Loads one photo by id
///
/// Every `load` supersedes the previous request, so a slow response for
/// an old id can't overwrite the current one.
#[derive(Debug)]
pub struct PhotoDetailLoader {
    id: Option<String>,
    photo: Option<Photo>,
    error: Option<ApiError>,
    in_flight: InFlightGuard,
    alive: bool,
}

impl Default for PhotoDetailLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PhotoDetailLoader {
    pub fn new() -> Self {
        Self {
            id: None,
            photo: None,
            error: None,
            in_flight: InFlightGuard::new(),
            alive: true,
        }
    }

    /// Start loading `id`
    ///
    /// With no id the loader settles immediately with no photo and
    /// nothing is fetched.
    pub fn load(&mut self, id: Option<&str>) -> Option<DetailRequest> {
        if !self.alive {
            return None;
        }

        let Some(id) = id else {
            self.in_flight.cancel();
            self.id = None;
            self.photo = None;
            self.error = None;
            return None;
        };

        // Same id already on its way
        if self.in_flight.is_busy() && self.id.as_deref() == Some(id) {
            return None;
        }

        if self.id.as_deref() != Some(id) {
            self.photo = None;
        }
        self.id = Some(id.to_string());
        self.error = None;

        let ticket = self.in_flight.supersede();
        debug!(id, "requesting photo details");
        Some(DetailRequest {
            ticket,
            id: id.to_string(),
        })
    }

    /// Apply a finished request; returns false if it was discarded
    pub fn complete(&mut self, response: DetailResponse) -> bool {
        if !self.alive || !self.in_flight.release(response.ticket) {
            debug!(id = %response.id, "discarding stale photo details");
            return false;
        }

        match response.result {
            Ok(photo) => self.photo = Some(photo),
            Err(err) => {
                warn!(id = %response.id, "failed to load photo: {}", err);
                self.error = Some(err);
            }
        }
        true
    }

    pub fn dispose(&mut self) {
        self.alive = false;
        self.in_flight.cancel();
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_busy()
    }
}

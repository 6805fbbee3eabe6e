//! Depot helper extensions.

use std::any::Any;

use autoparts_app::domain::callers::CallerUuid;
use salvo::prelude::{Depot, StatusError};

const CALLER_UUID_KEY: &str = "caller_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Stamp the authenticated caller identity onto the request.
    fn insert_caller_uuid(&mut self, caller: CallerUuid);

    /// The caller identity set by the auth middleware; 401 when absent.
    fn caller_uuid_or_401(&self) -> Result<CallerUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_caller_uuid(&mut self, caller: CallerUuid) {
        self.insert(CALLER_UUID_KEY, caller);
    }

    fn caller_uuid_or_401(&self) -> Result<CallerUuid, StatusError> {
        self.get::<CallerUuid>(CALLER_UUID_KEY)
            .copied()
            .map_err(|_ignored| StatusError::unauthorized())
    }
}

//! Caller identity extraction.
//!
//! Token issuance and session management live upstream; the bearer token on
//! the request *is* the opaque caller identity, and the core only ever sees
//! the parsed [`CallerUuid`](autoparts_app::domain::callers::CallerUuid).

pub(crate) mod middleware;

//! Transport seam between resource models and the remote API.
//!
//! Models never speak HTTP themselves. They build a path and hand it to a
//! [`Connection`], which answers with the decoded JSON body, `Ok(None)` when
//! the remote reports the resource as not found, or an error for anything
//! else. Timeouts and retries, if any, are the connection's business.

#[cfg(feature = "http")]
pub mod http;
pub mod mock;

#[cfg(feature = "http")]
pub use http::HttpConnection;
pub use mock::MockConnection;

use crate::error::{is_not_found, LifelineError, Result};
use serde_json::Value;

/// Trait for fetching resources from a remote API
///
/// Implementations must be shareable across the models of a registry, hence
/// the `Send + Sync` bound. A single request is a blocking call.
///
/// # Examples
///
/// ```
/// use lifeline::connection::{Connection, MockConnection};
/// use serde_json::json;
///
/// let conn = MockConnection::new().with_route("/headshots/5.json", json!({"id": 5}));
/// assert_eq!(conn.get("/headshots/5.json").unwrap(), Some(json!({"id": 5})));
/// assert_eq!(conn.get("/headshots/6.json").unwrap(), None);
/// ```
pub trait Connection: Send + Sync {
    /// Fetch the resource at `path`
    ///
    /// `path` is either relative to the connection's site (`/lawyers/42.json`)
    /// or an absolute URL taken verbatim from a `<attribute>_url` attribute.
    ///
    /// # Returns
    ///
    /// The decoded body, or `Ok(None)` if the remote reported not-found.
    ///
    /// # Errors
    ///
    /// Any other failure (transport, non-success status, undecodable body).
    fn get(&self, path: &str) -> Result<Option<Value>>;
}

/// Outcome of a request the remote answered with a non-success `status`
///
/// Not-found folds into `Ok(None)`; every other status is an error.
pub(crate) fn status_outcome(status: u16, url: &str) -> Result<Option<Value>> {
    let error = LifelineError::Status {
        status,
        url: url.to_string(),
    };
    if is_not_found(&error) {
        log::debug!("{} answered not found", url);
        return Ok(None);
    }
    Err(error)
}

//! Blocking HTTP connection built on `ureq`.

use crate::config::LifelineConfig;
use crate::connection::{status_outcome, Connection};
use crate::error::{LifelineError, Result};
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// A [`Connection`] that issues `GET` requests against a site
///
/// Relative paths are joined to the configured site; absolute URLs (as
/// found in `<attribute>_url` attributes) are requested as-is. A `404`
/// answers not-found; other non-success statuses are errors.
pub struct HttpConnection {
    agent: ureq::Agent,
    site: Url,
}

impl HttpConnection {
    /// Create a connection from the site and timeout in `config`
    pub fn new(config: &LifelineConfig) -> Result<Self> {
        let mut site = Url::parse(&config.site).map_err(|e| LifelineError::InvalidUrl {
            url: config.site.clone(),
            reason: e.to_string(),
        })?;
        if !site.path().ends_with('/') {
            let path = format!("{}/", site.path());
            site.set_path(&path);
        }
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build();
        Ok(Self { agent, site })
    }

    /// The base URL relative paths are appended to, always ending in `/`
    pub fn site(&self) -> &Url {
        &self.site
    }

    /// Full URL for a path or absolute URL
    ///
    /// A path is appended to the site's own path, leading `/` or not, so a
    /// site of `https://api.example.com/v1` sends `/lawyers/42.json` to
    /// `https://api.example.com/v1/lawyers/42.json`.
    pub fn url_for(&self, path: &str) -> Result<Url> {
        if let Ok(absolute) = Url::parse(path) {
            return Ok(absolute);
        }
        self.site
            .join(path.trim_start_matches('/'))
            .map_err(|e| LifelineError::InvalidUrl {
                url: path.to_string(),
                reason: e.to_string(),
            })
    }
}

impl std::fmt::Debug for HttpConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpConnection")
            .field("site", &self.site.as_str())
            .finish()
    }
}

impl Connection for HttpConnection {
    fn get(&self, path: &str) -> Result<Option<Value>> {
        let url = self.url_for(path)?;
        log::debug!("GET {}", url);

        match self
            .agent
            .get(url.as_str())
            .set("Accept", "application/json")
            .call()
        {
            Ok(response) => {
                let body = response
                    .into_string()
                    .map_err(|e| LifelineError::Transport(e.to_string()))?;
                if body.trim().is_empty() {
                    return Ok(Some(Value::Null));
                }
                Ok(Some(serde_json::from_str(&body)?))
            }
            Err(ureq::Error::Status(status, _)) => status_outcome(status, url.as_str()),
            Err(ureq::Error::Transport(transport)) => {
                Err(LifelineError::Transport(transport.to_string()))
            }
        }
    }
}

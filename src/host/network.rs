//! Simulated resource server with a memory cache.

use std::collections::{HashMap, HashSet};

/// Result of resolving a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded,
    Failed,
}

/// How a request was served.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    pub outcome: FetchOutcome,
    pub latency_ms: u64,
}

#[derive(Debug, Clone)]
pub struct Network {
    available: HashSet<String>,
    latency_ms: u64,
    cache: HashSet<String>,
    fetches: HashMap<String, usize>,
}

impl Default for Network {
    fn default() -> Self {
        Self::new(50)
    }
}

impl Network {
    pub fn new(latency_ms: u64) -> Self {
        Self {
            available: HashSet::new(),
            latency_ms,
            cache: HashSet::new(),
            fetches: HashMap::new(),
        }
    }

    pub fn with_resources<I, S>(mut self, urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.available.extend(urls.into_iter().map(Into::into));
        self
    }

    pub fn latency_ms(&self) -> u64 {
        self.latency_ms
    }

    /// Resolve `url`. Cached resources are served immediately without
    /// touching the network.
    pub fn request(&mut self, url: &str) -> Response {
        if self.cache.contains(url) {
            return Response {
                outcome: FetchOutcome::Loaded,
                latency_ms: 0,
            };
        }
        *self.fetches.entry(url.to_string()).or_default() += 1;
        let outcome = if self.available.contains(url) {
            self.cache.insert(url.to_string());
            FetchOutcome::Loaded
        } else {
            FetchOutcome::Failed
        };
        Response {
            outcome,
            latency_ms: self.latency_ms,
        }
    }

    /// Network round trips made for `url`.
    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetches.get(url).copied().unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.values().sum()
    }
}

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use crate::{model::CitySuggestion, service::WeatherService};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq)]
pub enum SuggestionOutcome {
    Ready(Vec<CitySuggestion>),
    /// A newer query superseded this one; the caller keeps what it shows.
    Stale,
}

/// Search-as-you-type front end for city lookup.
///
/// Each call to [`suggest`](Self::suggest) takes a generation ticket. Only
/// the holder of the newest ticket gets results, so responses that arrive
/// after the text changed are dropped instead of overwriting newer ones.
#[derive(Debug)]
pub struct SuggestionSession {
    service: WeatherService,
    debounce: Duration,
    generation: AtomicU64,
}

impl SuggestionSession {
    pub fn new(service: WeatherService, debounce: Duration) -> Self {
        Self {
            service,
            debounce,
            generation: AtomicU64::new(0),
        }
    }

    pub async fn suggest(&self, query: &str) -> SuggestionOutcome {
        let ticket = self.next_ticket();

        if query.trim().is_empty() {
            return SuggestionOutcome::Ready(Vec::new());
        }

        tokio::time::sleep(self.debounce).await;
        if !self.is_current(ticket) {
            return SuggestionOutcome::Stale;
        }

        let result = self.service.search_cities(query).await;
        if !self.is_current(ticket) {
            tracing::debug!(query, "Dropping suggestions for superseded query");
            return SuggestionOutcome::Stale;
        }

        match result {
            Ok(suggestions) => SuggestionOutcome::Ready(suggestions),
            Err(e) => {
                tracing::debug!(query, error = %e, "City suggestion lookup failed");
                SuggestionOutcome::Ready(Vec::new())
            }
        }
    }

    /// Invalidate any lookup in flight, e.g. after a suggestion was picked.
    pub fn clear(&self) {
        self.next_ticket();
    }

    fn next_ticket(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }
}

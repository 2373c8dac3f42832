//! Async front for the layout engine with stale-result suppression.
//!
//! Layout is CPU-bound, so each request runs on `tokio::task::spawn_blocking`
//! with owned snapshots of its terms, canvas and config. Every request takes a
//! ticket from a monotonic generation counter; a result is only handed back as
//! `Current` if no newer ticket was issued while it was computing. A refresh or
//! resize that arrives mid-computation therefore makes the older result
//! `Superseded` instead of letting it overwrite the newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::layout::engine::{compute_layout, Canvas, LayoutConfig, LayoutResult, Term};

/// Identifies one layout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayoutTicket {
    pub generation: u64,
    pub request_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LayoutOutcome {
    /// The request is still the latest; the result may be rendered.
    Current {
        ticket: LayoutTicket,
        result: LayoutResult,
    },
    /// A newer request was issued; the result was discarded.
    Superseded { ticket: LayoutTicket, latest: u64 },
}

impl LayoutOutcome {
    pub fn into_current(self) -> Option<LayoutResult> {
        match self {
            LayoutOutcome::Current { result, .. } => Some(result),
            LayoutOutcome::Superseded { .. } => None,
        }
    }
}

/// Issues tickets and runs layouts. Cheap to clone; clones share the counter.
#[derive(Debug, Clone, Default)]
pub struct LayoutScheduler {
    latest: Arc<AtomicU64>,
}

impl LayoutScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket newer than every ticket issued before it.
    pub fn begin(&self) -> LayoutTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        LayoutTicket {
            generation,
            request_id: Uuid::new_v4(),
        }
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, ticket: &LayoutTicket) -> bool {
        ticket.generation == self.latest_generation()
    }

    /// Takes a ticket and runs the layout for it.
    pub async fn submit(
        &self,
        terms: Vec<Term>,
        canvas: Canvas,
        config: LayoutConfig,
    ) -> Result<LayoutOutcome, AppError> {
        let ticket = self.begin();
        self.run(ticket, terms, canvas, config).await
    }

    /// Runs the layout for an already-issued ticket.
    ///
    /// Configuration errors are returned even if the ticket has been superseded.
    pub async fn run(
        &self,
        ticket: LayoutTicket,
        terms: Vec<Term>,
        canvas: Canvas,
        config: LayoutConfig,
    ) -> Result<LayoutOutcome, AppError> {
        let result = tokio::task::spawn_blocking(move || compute_layout(&terms, canvas, &config))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in layout: {e}")))??;

        let latest = self.latest_generation();
        if ticket.generation == latest {
            Ok(LayoutOutcome::Current { ticket, result })
        } else {
            debug!(
                request_id = %ticket.request_id,
                generation = ticket.generation,
                latest,
                "Word cloud: discarding superseded layout"
            );
            Ok(LayoutOutcome::Superseded { ticket, latest })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms() -> Vec<Term> {
        vec![Term::new("helpful", 4.0), Term::new("slow", 1.0)]
    }

    #[test]
    fn test_tickets_are_monotonic() {
        let scheduler = LayoutScheduler::new();
        let a = scheduler.begin();
        let b = scheduler.begin();
        assert!(b.generation > a.generation);
        assert_ne!(a.request_id, b.request_id);
        assert!(scheduler.is_current(&b));
        assert!(!scheduler.is_current(&a));
    }

    #[test]
    fn test_clones_share_the_generation_counter() {
        let scheduler = LayoutScheduler::new();
        let view = scheduler.clone();
        let a = scheduler.begin();
        let _b = view.begin();
        assert!(!scheduler.is_current(&a));
    }

    #[tokio::test]
    async fn test_submit_returns_current_result() {
        let scheduler = LayoutScheduler::new();
        let outcome = scheduler
            .submit(terms(), Canvas::new(400.0, 300.0), LayoutConfig::default())
            .await
            .unwrap();
        let result = outcome.into_current().expect("sole request must be current");
        assert_eq!(result.placed.len(), 2);
    }

    #[tokio::test]
    async fn test_older_ticket_is_superseded() {
        let scheduler = LayoutScheduler::new();
        let stale = scheduler.begin();
        let fresh = scheduler.begin();

        let stale_outcome = scheduler
            .run(stale, terms(), Canvas::new(400.0, 300.0), LayoutConfig::default())
            .await
            .unwrap();
        assert!(matches!(
            stale_outcome,
            LayoutOutcome::Superseded { latest, .. } if latest == fresh.generation
        ));

        let fresh_outcome = scheduler
            .run(fresh, terms(), Canvas::new(640.0, 300.0), LayoutConfig::default())
            .await
            .unwrap();
        assert!(fresh_outcome.into_current().is_some());
    }

    #[tokio::test]
    async fn test_configuration_error_propagates() {
        let scheduler = LayoutScheduler::new();
        let err = scheduler
            .submit(terms(), Canvas::new(0.0, 300.0), LayoutConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Layout(_)));
    }

    #[tokio::test]
    async fn test_independent_schedulers_run_concurrently() {
        let dashboard = LayoutScheduler::new();
        let analytics = LayoutScheduler::new();
        let (a, b) = tokio::join!(
            dashboard.submit(terms(), Canvas::new(500.0, 300.0), LayoutConfig::default()),
            analytics.submit(terms(), Canvas::new(500.0, 400.0), LayoutConfig::default()),
        );
        assert!(a.unwrap().into_current().is_some());
        assert!(b.unwrap().into_current().is_some());
    }
}

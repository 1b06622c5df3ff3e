use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

#[derive(Debug, Default)]
pub struct AppMetrics {
    plan_requests_total: AtomicU64,
    plan_failures_total: AtomicU64,
    places_resolved_total: AtomicU64,
    places_not_found_total: AtomicU64,
    place_cache_hits_total: AtomicU64,
    place_cache_misses_total: AtomicU64,
    provider_calls_total: AtomicU64,
    total_plan_latency_millis: AtomicU64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub plan_requests_total: u64,
    pub plan_failures_total: u64,
    pub places_resolved_total: u64,
    pub places_not_found_total: u64,
    pub place_cache_hits_total: u64,
    pub place_cache_misses_total: u64,
    pub provider_calls_total: u64,
    pub avg_plan_latency_millis: f64,
}

impl AppMetrics {
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn inc_plan_request(&self) {
        self.plan_requests_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_plan_failure(&self) {
        self.plan_failures_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_resolution(&self, found: bool) {
        let counter = if found {
            &self.places_resolved_total
        } else {
            &self.places_not_found_total
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_place_cache(&self, hit: bool) {
        let counter = if hit {
            &self.place_cache_hits_total
        } else {
            &self.place_cache_misses_total
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_provider_call(&self) {
        self.provider_calls_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn observe_plan_latency(&self, duration: Duration) {
        self.total_plan_latency_millis
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let requests = self.plan_requests_total.load(Ordering::Relaxed);
        let latency = self.total_plan_latency_millis.load(Ordering::Relaxed);

        MetricsSnapshot {
            plan_requests_total: requests,
            plan_failures_total: self.plan_failures_total.load(Ordering::Relaxed),
            places_resolved_total: self.places_resolved_total.load(Ordering::Relaxed),
            places_not_found_total: self.places_not_found_total.load(Ordering::Relaxed),
            place_cache_hits_total: self.place_cache_hits_total.load(Ordering::Relaxed),
            place_cache_misses_total: self.place_cache_misses_total.load(Ordering::Relaxed),
            provider_calls_total: self.provider_calls_total.load(Ordering::Relaxed),
            avg_plan_latency_millis: if requests == 0 {
                0.0
            } else {
                latency as f64 / requests as f64
            },
        }
    }
}

pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,tripflow_agents=info,tripflow_places=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .init();
    });
}

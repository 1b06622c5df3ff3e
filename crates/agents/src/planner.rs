use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};
use tripflow_core::{build_plan_from_model_text, Plan, PlanRequest};
use tripflow_observability::AppMetrics;

use crate::backend::{GenerationOptions, GenerativeBackend};
use crate::error::PlanError;
use crate::prompt::build_plan_prompt;

pub struct TripPlanner<G> {
    backend: G,
    metrics: Arc<AppMetrics>,
}

impl<G: GenerativeBackend> TripPlanner<G> {
    pub fn new(backend: G, metrics: Arc<AppMetrics>) -> Self {
        Self { backend, metrics }
    }

    pub fn backend(&self) -> &G {
        &self.backend
    }

    #[instrument(skip(self, request), fields(destination = %request.destination, days = request.days))]
    pub async fn generate_plan(&self, request: &PlanRequest) -> Result<Plan, PlanError> {
        let started = Instant::now();
        self.metrics.inc_plan_request();

        let result = self.plan(request).await;
        self.metrics.observe_plan_latency(started.elapsed());

        match &result {
            Ok(plan) => info!(
                title = %plan.title,
                days = plan.days.len(),
                places = plan.days.iter().map(|day| day.places.len()).sum::<usize>(),
                latency_ms = started.elapsed().as_millis() as u64,
                "plan generated"
            ),
            Err(error) => {
                self.metrics.inc_plan_failure();
                warn!(error = %error, "plan generation failed");
            }
        }
        result
    }

    async fn plan(&self, request: &PlanRequest) -> Result<Plan, PlanError> {
        let prompt = build_plan_prompt(request);
        let options = GenerationOptions {
            web_search_enabled: request.use_web_search,
        };

        let raw = self.backend.generate(&prompt, options).await?;
        debug!(chars = raw.len(), "model text received");

        Ok(build_plan_from_model_text(&raw, request)?)
    }
}

use crate::dedup::dedupe_places;
use crate::error::ParseError;
use crate::extract::extract_json_object;
use crate::models::{Plan, PlanRequest};
use crate::normalize::normalize_plan;
use crate::reorder::reorder_days_by_area;

pub fn build_plan_from_model_text(raw: &str, request: &PlanRequest) -> Result<Plan, ParseError> {
    let parsed = extract_json_object(raw)?;

    let mut plan = normalize_plan(
        &parsed,
        request.days as usize,
        &request.destination,
        &request.style,
    );
    dedupe_places(&mut plan.days);
    plan.days = reorder_days_by_area(std::mem::take(&mut plan.days));

    Ok(plan)
}

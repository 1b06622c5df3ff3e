use tripflow_core::PlanRequest;

pub fn build_plan_prompt(request: &PlanRequest) -> String {
    let mut lines = vec![
        "You are a professional travel planner. Build a day-by-day itinerary from the brief below."
            .to_string(),
        format!("- Destination: {}", request.destination.trim()),
        format!("- Length: {} days", request.days),
        format!("- Travelling with: {}", or_unspecified(&request.companions)),
        format!("- Style: {}", or_unspecified(&request.style)),
    ];
    if let Some(transportation) = non_blank(request.transportation.as_deref()) {
        lines.push(format!("- Getting around by: {transportation}"));
    }
    if let Some(month) = non_blank(request.month.as_deref()) {
        lines.push(format!("- Travel month: {month}"));
    }
    if request.use_web_search {
        lines.push(
            "Use web search to check that every place is currently open and worth visiting."
                .to_string(),
        );
    }

    lines.push(String::new());
    lines.push(format!(
        "Return exactly {} entries in \"days\". Group each day around one neighbourhood. \
Do not list hotels, accommodation, airports or flights. \
activityType must be one of \"meal\", \"sightseeing\" or \"activity\"; durationMin is minutes.",
        request.days
    ));
    lines.push("Respond with JSON only, no markdown and no commentary, in this shape:".to_string());
    lines.push(RESPONSE_SHAPE.to_string());
    lines.join("\n")
}

const RESPONSE_SHAPE: &str = r#"{
  "title": "Trip title",
  "days": [
    {
      "dayNumber": 1,
      "places": [
        {
          "placeName": "Place name",
          "description": "One-line reason to go",
          "activityType": "sightseeing",
          "durationMin": 90
        }
      ]
    }
  ]
}"#;

fn or_unspecified(value: &str) -> &str {
    non_blank(Some(value)).unwrap_or("not specified")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

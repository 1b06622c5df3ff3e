use serde_json::{Map, Value};

use crate::classify::{classify_activity, is_lodging_or_flight};
use crate::models::{Day, Place, Plan};

pub const DEFAULT_DURATION_MIN: u32 = 90;

pub fn normalize_plan(
    raw: &Map<String, Value>,
    requested_days: usize,
    destination: &str,
    style: &str,
) -> Plan {
    let title = raw
        .get("title")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| default_title(destination, style));

    let mut days = raw
        .get("days")
        .and_then(Value::as_array)
        .map(|days| {
            days.iter()
                .enumerate()
                .map(|(position, day)| normalize_day(day, position))
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    days.truncate(requested_days);
    while days.len() < requested_days {
        days.push(Day::empty(0));
    }
    renumber_days(&mut days);

    let destination = destination.trim();
    Plan {
        title,
        destination: (!destination.is_empty()).then(|| destination.to_string()),
        days,
    }
}

pub fn renumber_days(days: &mut [Day]) {
    for (idx, day) in days.iter_mut().enumerate() {
        day.day_number = idx as u32 + 1;
    }
}

fn default_title(destination: &str, style: &str) -> String {
    let label = [destination.trim(), style.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if label.is_empty() {
        "trip".to_string()
    } else {
        format!("{label} trip")
    }
}

fn normalize_day(raw: &Value, position: usize) -> Day {
    let day_number = positive_int(raw.get("dayNumber"))
        .or_else(|| positive_int(raw.get("day")))
        .and_then(|value| u32::try_from(value).ok())
        .unwrap_or(position as u32 + 1);

    let places = raw
        .get("places")
        .and_then(Value::as_array)
        .map(|places| places.iter().filter_map(normalize_place).collect())
        .unwrap_or_default();

    let mut day = Day { day_number, places };
    day.reindex_places();
    day
}

fn normalize_place(raw: &Value) -> Option<Place> {
    let object = raw.as_object()?;

    let place_name = non_empty_str(object.get("placeName"))
        .or_else(|| non_empty_str(object.get("name")))?
        .to_string();
    let description = object
        .get("description")
        .and_then(Value::as_str)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let lower = format!("{place_name} {description}").to_lowercase();
    if is_lodging_or_flight(&lower) {
        return None;
    }

    let activity_hint = non_empty_str(object.get("activityType"))
        .or_else(|| non_empty_str(object.get("theme")))
        .unwrap_or_default();

    Some(Place {
        order: 0,
        place_name,
        description,
        activity_type: classify_activity(activity_hint),
        duration_min: parse_duration(object.get("durationMin")),
    })
}

fn parse_duration(value: Option<&Value>) -> u32 {
    positive_int(value)
        .and_then(|minutes| u32::try_from(minutes).ok())
        .unwrap_or(DEFAULT_DURATION_MIN)
}

fn positive_int(value: Option<&Value>) -> Option<i64> {
    let parsed = match value? {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.is_finite())
                .map(|float| float.trunc() as i64)
        }),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    }?;

    (parsed > 0).then_some(parsed)
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::ActivityType;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn pads_and_truncates_to_requested_days() {
        let raw = object(json!({
            "title": "T",
            "days": [
                { "dayNumber": 1, "places": [] },
                { "dayNumber": 2, "places": [] },
                { "dayNumber": 3, "places": [] }
            ]
        }));

        for requested in 0..6 {
            let plan = normalize_plan(&raw, requested, "Helsinki", "relaxed");
            assert_eq!(plan.days.len(), requested);
            let numbers = plan.days.iter().map(|day| day.day_number).collect::<Vec<_>>();
            assert_eq!(numbers, (1..=requested as u32).collect::<Vec<_>>());
        }
    }

    #[test]
    fn replaces_bad_durations_with_default() {
        let raw = object(json!({
            "days": [{ "places": [
                { "placeName": "A", "durationMin": 45 },
                { "placeName": "B", "durationMin": "60" },
                { "placeName": "C", "durationMin": -5 },
                { "placeName": "D", "durationMin": "soon" },
                { "placeName": "E" },
                { "placeName": "F", "durationMin": 30.7 }
            ]}]
        }));

        let plan = normalize_plan(&raw, 1, "", "");
        let durations = plan.days[0]
            .places
            .iter()
            .map(|place| place.duration_min)
            .collect::<Vec<_>>();
        assert_eq!(durations, vec![45, 60, 90, 90, 90, 30]);
    }

    #[test]
    fn drops_lodging_and_flights_then_renumbers_order() {
        let raw = object(json!({
            "days": [{ "places": [
                { "placeName": "Hotel Kämp", "description": "check in" },
                { "placeName": "Market Square", "description": "morning stroll" },
                { "placeName": "Transfer", "description": "to Helsinki Airport" },
                { "placeName": "Löyly", "description": "sauna by the sea" }
            ]}]
        }));

        let plan = normalize_plan(&raw, 1, "Helsinki", "");
        let places = &plan.days[0].places;
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].place_name, "Market Square");
        assert_eq!(places[0].order, 0);
        assert_eq!(places[1].place_name, "Löyly");
        assert_eq!(places[1].order, 1);
    }

    #[test]
    fn reads_legacy_theme_and_day_fields() {
        let raw = object(json!({
            "days": [{ "day": 1, "places": [
                { "placeName": "Café Regatta", "theme": "식사" },
                { "placeName": "Sea kayaking", "activityType": "", "theme": "experience" },
                { "name": "Ateneum", "description": "art museum" },
                { "placeName": "   " }
            ]}]
        }));

        let plan = normalize_plan(&raw, 1, "Helsinki", "");
        let kinds = plan.days[0]
            .places
            .iter()
            .map(|place| place.activity_type)
            .collect::<Vec<_>>();
        assert_eq!(
            kinds,
            vec![ActivityType::Meal, ActivityType::Activity, ActivityType::Sightseeing]
        );
    }

    #[test]
    fn defaults_title_from_destination_and_style() {
        let plan = normalize_plan(&object(json!({ "title": "  " })), 2, "Helsinki", "foodie");
        assert_eq!(plan.title, "Helsinki foodie trip");
        assert_eq!(plan.destination.as_deref(), Some("Helsinki"));
        assert!(plan.days.iter().all(|day| day.places.is_empty()));
    }
}

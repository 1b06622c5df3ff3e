use std::collections::HashSet;

use unicode_segmentation::UnicodeSegmentation;

use crate::keywords::{AREA_STOPWORDS, AREA_SUFFIXES, GENERIC_AREA_PHRASES};
use crate::models::{Day, Place};
use crate::normalize::renumber_days;

pub const MIN_DAYS_FOR_REORDER: usize = 4;

pub fn area_hint(place: &Place) -> Option<String> {
    let text = place.search_text();
    let words = text.unicode_words().collect::<Vec<_>>();

    let named = words.windows(2).find_map(|pair| {
        let (name, suffix) = (pair[0], pair[1]);
        (AREA_SUFFIXES.contains(&suffix) && !AREA_STOPWORDS.contains(&name))
            .then(|| name.to_string())
    });
    if named.is_some() {
        return named;
    }

    GENERIC_AREA_PHRASES
        .iter()
        .find(|(phrase, _)| text.contains(phrase))
        .map(|(_, canonical)| canonical.to_string())
}

pub fn dominant_area(day: &Day) -> Option<String> {
    let mut votes: Vec<(String, usize)> = Vec::new();

    for hint in day.places.iter().filter_map(area_hint) {
        match votes.iter_mut().find(|(area, _)| *area == hint) {
            Some((_, count)) => *count += 1,
            None => votes.push((hint, 1)),
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (area, count) in votes {
        if best.as_ref().map_or(true, |(_, top)| count > *top) {
            best = Some((area, count));
        }
    }
    best.map(|(area, _)| area)
}

/// Greedy and stable: each step takes the first remaining day whose area
/// differs from the last placed one, else the first remaining day.
pub fn reorder_days_by_area(days: Vec<Day>) -> Vec<Day> {
    if days.len() < MIN_DAYS_FOR_REORDER {
        return days;
    }

    let areas = days.iter().map(dominant_area).collect::<Vec<_>>();
    let distinct = areas.iter().flatten().collect::<HashSet<_>>();
    if distinct.len() < 2 {
        return days;
    }

    let mut remaining = days.into_iter().zip(areas).collect::<Vec<_>>();
    let (first, mut last_area) = remaining.remove(0);
    let mut ordered = vec![first];

    while !remaining.is_empty() {
        let pick = last_area
            .as_ref()
            .and_then(|last| {
                remaining
                    .iter()
                    .position(|(_, area)| area.as_ref() != Some(last))
            })
            .unwrap_or(0);

        let (day, area) = remaining.remove(pick);
        ordered.push(day);
        last_area = area;
    }

    renumber_days(&mut ordered);
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityType;

    fn place(name: &str, description: &str) -> Place {
        Place {
            order: 0,
            place_name: name.to_string(),
            description: description.to_string(),
            activity_type: ActivityType::Sightseeing,
            duration_min: 90,
        }
    }

    fn day_in(day_number: u32, area: Option<&str>) -> Day {
        let description = area
            .map(|area| format!("in the {area} district"))
            .unwrap_or_default();
        Day {
            day_number,
            places: vec![place(&format!("Stop {day_number}"), &description)],
        }
    }

    fn order(days: &[Day]) -> Vec<String> {
        days.iter().map(|day| day.places[0].place_name.clone()).collect()
    }

    #[test]
    fn extracts_named_and_generic_hints() {
        assert_eq!(
            area_hint(&place("Kallio", "bars in the Kallio district")).as_deref(),
            Some("kallio")
        );
        assert_eq!(
            area_hint(&place("Gamla stan", "the old town area")).as_deref(),
            Some("old town")
        );
        assert_eq!(
            area_hint(&place("Harbour walk", "along the city centre waterfront")).as_deref(),
            Some("city center")
        );
        assert_eq!(area_hint(&place("Suomenlinna", "sea fortress")), None);
    }

    #[test]
    fn dominant_area_breaks_ties_by_first_seen() {
        let day = Day {
            day_number: 1,
            places: vec![
                place("A", "latin quarter"),
                place("B", "marais district"),
                place("C", "marais district"),
                place("D", "latin quarter"),
            ],
        };
        assert_eq!(dominant_area(&day).as_deref(), Some("latin"));
    }

    #[test]
    fn short_plans_are_untouched() {
        let days = vec![day_in(1, Some("kallio")), day_in(2, Some("kallio")), day_in(3, Some("punavuori"))];
        assert_eq!(reorder_days_by_area(days.clone()), days);
    }

    #[test]
    fn single_area_plans_are_untouched() {
        let days = vec![
            day_in(7, Some("kallio")),
            day_in(3, Some("kallio")),
            day_in(5, None),
            day_in(1, Some("kallio")),
        ];
        assert_eq!(reorder_days_by_area(days.clone()), days);
    }

    #[test]
    fn alternating_plans_only_get_renumbered() {
        let days = vec![
            day_in(4, Some("kallio")),
            day_in(3, Some("punavuori")),
            day_in(2, Some("kallio")),
            day_in(1, Some("punavuori")),
        ];

        let reordered = reorder_days_by_area(days);

        assert_eq!(order(&reordered), vec!["Stop 4", "Stop 3", "Stop 2", "Stop 1"]);
        let numbers = reordered.iter().map(|day| day.day_number).collect::<Vec<_>>();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn separates_back_to_back_areas() {
        let days = vec![
            day_in(1, Some("kallio")),
            day_in(2, Some("kallio")),
            day_in(3, Some("punavuori")),
            day_in(4, Some("punavuori")),
        ];

        let reordered = reorder_days_by_area(days);

        assert_eq!(order(&reordered), vec!["Stop 1", "Stop 3", "Stop 2", "Stop 4"]);
    }
}

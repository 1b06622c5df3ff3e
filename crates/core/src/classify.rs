use unicode_segmentation::UnicodeSegmentation;

use crate::keywords::{
    contains_any, ACTIVITY_FAMILIES, FLIGHT_KEYWORDS, HUB_KEYWORDS, HUB_WORD_SUFFIXES,
    LODGING_KEYWORDS,
};
use crate::models::ActivityType;

pub fn classify_activity(raw: &str) -> ActivityType {
    let lower = raw.trim().to_lowercase();

    if let Some(exact) = ActivityType::parse(&lower) {
        return exact;
    }

    ACTIVITY_FAMILIES
        .iter()
        .find(|family| family.matches(&lower))
        .map(|family| family.tag)
        .unwrap_or(ActivityType::Sightseeing)
}

pub fn is_lodging_or_flight(lower: &str) -> bool {
    contains_any(lower, LODGING_KEYWORDS) || contains_any(lower, FLIGHT_KEYWORDS)
}

pub fn is_repeatable_hub(lower: &str) -> bool {
    contains_any(lower, HUB_KEYWORDS)
        || lower.unicode_words().any(|word| {
            word.chars().count() > 1 && word.ends_with(HUB_WORD_SUFFIXES)
        })
}

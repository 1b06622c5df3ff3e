use std::collections::HashSet;

use crate::classify::is_repeatable_hub;
use crate::models::{Day, PlaceKey};

pub const SHORT_DAY_MAX_PLACES: usize = 4;

/// Greedy single pass over the whole plan dropping repeats of non-hub
/// places. Hubs and names without any alphanumeric content are always kept.
pub fn dedupe_places(days: &mut [Day]) {
    let mut seen: HashSet<PlaceKey> = HashSet::new();

    for day in days.iter_mut() {
        let crowded = day.places.len() > SHORT_DAY_MAX_PLACES;

        day.places.retain(|place| {
            let key = place.key();
            if key.is_empty() || is_repeatable_hub(&place.search_text()) {
                return true;
            }
            if crowded && seen.contains(&key) {
                return false;
            }
            seen.insert(key);
            true
        });

        day.reindex_places();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityType, Place};

    fn day(day_number: u32, names: &[&str]) -> Day {
        let mut day = Day {
            day_number,
            places: names
                .iter()
                .map(|name| Place {
                    order: 0,
                    place_name: name.to_string(),
                    description: String::new(),
                    activity_type: ActivityType::Sightseeing,
                    duration_min: 90,
                })
                .collect(),
        };
        day.reindex_places();
        day
    }

    fn names(day: &Day) -> Vec<&str> {
        day.places.iter().map(|place| place.place_name.as_str()).collect()
    }

    #[test]
    fn removes_repeat_from_crowded_later_day() {
        let mut days = vec![
            day(1, &["Ateneum", "Temppeliaukio Church", "Esplanadi", "Kiasma", "Löyly"]),
            day(2, &["Suomenlinna", "ateneum!", "Design Museum", "Oodi", "Kauppahalli"]),
        ];

        dedupe_places(&mut days);

        assert_eq!(days[0].places.len(), 5);
        assert_eq!(
            names(&days[1]),
            vec!["Suomenlinna", "Design Museum", "Oodi", "Kauppahalli"]
        );
        let orders = days[1].places.iter().map(|place| place.order).collect::<Vec<_>>();
        assert_eq!(orders, vec![0, 1, 2, 3]);
    }

    #[test]
    fn keeps_repeat_in_short_day() {
        let mut days = vec![
            day(1, &["Ateneum", "Kiasma", "Oodi", "Esplanadi", "Löyly"]),
            day(2, &["Ateneum", "Suomenlinna"]),
        ];

        dedupe_places(&mut days);

        assert_eq!(names(&days[1]), vec!["Ateneum", "Suomenlinna"]);
    }

    #[test]
    fn never_removes_hubs() {
        let mut days = vec![
            day(1, &["Helsinki Central Station", "A", "B", "C", "D"]),
            day(2, &["Helsinki Central Station", "E", "F", "G", "H"]),
        ];

        dedupe_places(&mut days);

        assert_eq!(days[1].places.len(), 5);
        assert_eq!(days[1].places[0].place_name, "Helsinki Central Station");
    }

    #[test]
    fn lookalike_hub_names_are_still_deduplicated() {
        let mut days = vec![
            day(1, &["서울역사박물관", "Metropolitan Museum of Art", "A", "B", "C"]),
            day(2, &["서울역사박물관", "Metropolitan Museum of Art", "D", "E", "F"]),
            day(3, &["서울역", "G", "H", "I", "J"]),
            day(4, &["서울역", "K", "L", "M", "N"]),
        ];

        dedupe_places(&mut days);

        assert_eq!(names(&days[1]), vec!["D", "E", "F"]);
        assert_eq!(days[3].places.len(), 5);
        assert_eq!(days[3].places[0].place_name, "서울역");
    }

    #[test]
    fn keeps_names_without_alphanumerics() {
        let mut days = vec![
            day(1, &["---", "A", "B", "C", "D"]),
            day(2, &["---", "E", "F", "G", "H"]),
        ];

        dedupe_places(&mut days);

        assert_eq!(days[1].places.len(), 5);
    }
}

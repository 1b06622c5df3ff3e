//! Fixed keyword tables behind every text heuristic in the pipelines.
//!
//! Tables are ordered; the first matching family wins. All keywords are
//! lowercase. Short ASCII keywords match whole words only; everything else
//! matches as a substring of lowercased text.

use unicode_segmentation::UnicodeSegmentation;

use crate::models::ActivityType;

const WHOLE_WORD_MAX_LEN: usize = 4;

#[derive(Debug, Clone, Copy)]
pub struct KeywordFamily<T: 'static> {
    pub tag: T,
    pub keywords: &'static [&'static str],
}

impl<T> KeywordFamily<T> {
    pub fn matches(&self, lower: &str) -> bool {
        contains_any(lower, self.keywords)
    }
}

pub const LODGING_KEYWORDS: &[&str] = &[
    "hotel",
    "hostel",
    "accommodation",
    "guesthouse",
    "guest house",
    "lodging",
    "ryokan",
    "호텔",
    "숙소",
    "숙박",
    "게스트하우스",
    "ホテル",
    "旅館",
    "酒店",
];

pub const FLIGHT_KEYWORDS: &[&str] = &[
    "flight",
    "airport",
    "airline",
    "항공",
    "공항",
    "비행기",
    "空港",
    "机场",
];

pub const HUB_KEYWORDS: &[&str] = &[
    "station",
    "terminal",
    "metro station",
    "subway",
    "city center",
    "city centre",
    "downtown",
    "shopping district",
    "shopping street",
    "shopping mall",
    "outlet",
    "터미널",
    "시내",
    "번화가",
    "駅",
];

/// A word ending in one of these is a hub ("서울역"), but the character
/// alone inside a word is not ("역사박물관").
pub const HUB_WORD_SUFFIXES: &[char] = &['역'];

pub const ACTIVITY_FAMILIES: &[KeywordFamily<ActivityType>] = &[
    KeywordFamily {
        tag: ActivityType::Meal,
        keywords: &[
            "meal",
            "food",
            "dining",
            "dinner",
            "lunch",
            "breakfast",
            "brunch",
            "restaurant",
            "cafe",
            "café",
            "coffee",
            "bakery",
            "dessert",
            "bistro",
            "eatery",
            "식사",
            "맛집",
            "카페",
            "음식",
            "레스토랑",
            "食事",
        ],
    },
    KeywordFamily {
        tag: ActivityType::Activity,
        keywords: &[
            "activity",
            "activities",
            "experience",
            "tour",
            "hiking",
            "hike",
            "workshop",
            "class",
            "cruise",
            "kayak",
            "surf",
            "ski",
            "skiing",
            "spa",
            "concert",
            "show",
            "adventure",
            "sport",
            "체험",
            "액티비티",
            "투어",
            "체육",
        ],
    },
];

pub const HASHTAG_FAMILIES: &[KeywordFamily<&str>] = &[
    KeywordFamily {
        tag: "#Cafe",
        keywords: &["cafe", "café", "coffee", "bakery", "dessert", "tea house"],
    },
    KeywordFamily {
        tag: "#Foodie",
        keywords: &["restaurant", "food", "dining", "bistro", "eatery", "meal_takeaway"],
    },
    KeywordFamily {
        tag: "#History",
        keywords: &[
            "museum",
            "history",
            "historic",
            "castle",
            "palace",
            "fortress",
            "monument",
            "memorial",
        ],
    },
    KeywordFamily {
        tag: "#Spiritual",
        keywords: &["temple", "shrine", "church", "cathedral", "mosque", "monastery"],
    },
    KeywordFamily {
        tag: "#Nature",
        keywords: &[
            "park", "garden", "beach", "mountain", "lake", "forest", "trail", "island", "river",
        ],
    },
    KeywordFamily {
        tag: "#Art",
        keywords: &["art", "gallery", "design", "exhibition"],
    },
    KeywordFamily {
        tag: "#Shopping",
        keywords: &["shopping", "market", "mall", "store", "boutique", "outlet"],
    },
    KeywordFamily {
        tag: "#Nightlife",
        keywords: &["bar", "pub", "night_club", "nightlife", "brewery"],
    },
    KeywordFamily {
        tag: "#View",
        keywords: &["view", "observatory", "tower", "lookout", "skyline", "observation"],
    },
    KeywordFamily {
        tag: "#Landmark",
        keywords: &["landmark", "tourist_attraction", "square", "bridge"],
    },
];

pub const DEFAULT_HASHTAG: &str = "#Travel";

pub const AREA_SUFFIXES: &[&str] = &["district", "neighborhood", "neighbourhood", "quarter", "area"];

/// Words that precede an area suffix without naming an area ("the area",
/// "surrounding neighborhood"), plus the tails of the generic phrases so
/// "old town area" falls through to the phrase table.
pub const AREA_STOPWORDS: &[&str] = &[
    "the",
    "this",
    "that",
    "an",
    "a",
    "same",
    "whole",
    "entire",
    "surrounding",
    "nearby",
    "local",
    "residential",
    "main",
    "town",
    "center",
    "centre",
    "downtown",
    "waterfront",
];

pub const GENERIC_AREA_PHRASES: &[(&str, &str)] = &[
    ("old town", "old town"),
    ("city center", "city center"),
    ("city centre", "city center"),
    ("downtown", "downtown"),
    ("waterfront", "waterfront"),
];

pub fn contains_any(input: &str, needles: &[&str]) -> bool {
    let mut words: Option<Vec<&str>> = None;

    needles.iter().any(|needle| {
        if needle.is_ascii() && needle.len() <= WHOLE_WORD_MAX_LEN {
            words
                .get_or_insert_with(|| input.unicode_words().collect())
                .iter()
                .any(|word| is_word_form(word, needle))
        } else {
            input.contains(needle)
        }
    })
}

fn is_word_form(word: &str, keyword: &str) -> bool {
    word == keyword || word.strip_suffix('s') == Some(keyword)
}

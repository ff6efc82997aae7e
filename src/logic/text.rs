use regex_lite::Regex;
use std::sync::OnceLock;

/// Weather phrase categories recognized in free-text forecast narratives.
/// The pattern sets are fixed domain knowledge, kept as data so they can be
/// tested and extended without touching evaluator logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    Snow,
    Rain,
    Ice,
    Hail,
    Fog,
    Heat,
}

const ALL_PHRASES: [Phrase; 6] = [
    Phrase::Snow,
    Phrase::Rain,
    Phrase::Ice,
    Phrase::Hail,
    Phrase::Fog,
    Phrase::Heat,
];

impl Phrase {
    /// Case-insensitive patterns for this category. A text belongs to the
    /// category when any pattern matches anywhere in it.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            Phrase::Snow => &[r"(?i)\bsnow\b", r"(?i)wintry mix", r"(?i)snowfall of \d+"],
            Phrase::Rain => &[r"(?i)\brain\b", r"(?i)showers", r"(?i)precipitation"],
            Phrase::Ice => &[r"(?i)freezing rain", r"(?i)\bice\b", r"(?i)icy conditions"],
            Phrase::Hail => &[r"(?i)\bhail\b"],
            Phrase::Fog => &[r"(?i)\bfog\b", r"(?i)low visibility", r"(?i)dense fog"],
            Phrase::Heat => &[r"(?i)heat index.*?\d+", r"(?i)hot and humid"],
        }
    }

    fn regexes(self) -> &'static [Regex] {
        static COMPILED: OnceLock<Vec<Vec<Regex>>> = OnceLock::new();
        let table = COMPILED.get_or_init(|| {
            ALL_PHRASES
                .iter()
                .map(|p| {
                    p.patterns()
                        .iter()
                        .map(|pattern| Regex::new(pattern).unwrap())
                        .collect()
                })
                .collect()
        });
        &table[self as usize]
    }

    pub fn matches(self, text: &str) -> bool {
        self.regexes().iter().any(|re| re.is_match(text))
    }
}

fn first_capture(re: &Regex, text: &str) -> Option<i64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// First integer following the phrase "heat index", e.g.
/// "... with a heat index near 104" -> 104.
pub fn heat_index_value(text: &str) -> Option<i64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?i)heat index.*?(\d+)").unwrap());
    first_capture(re, text)
}

/// First integer following the phrase "High near", the NWS wording for a
/// daytime period's expected high, e.g. "Sunny, with a high near 91" -> 91.
pub fn high_near_value(text: &str) -> Option<i64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"(?i)high near (\d+)").unwrap());
    first_capture(re, text)
}

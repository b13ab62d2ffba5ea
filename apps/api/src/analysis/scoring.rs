//! Resume scoring — five independent heuristics aggregated into a 0–100 score.
//!
//! | Sub-score   | Max | Signal                                           |
//! |-------------|-----|--------------------------------------------------|
//! | section     | 30  | required + optional sections present             |
//! | length      | 20  | whitespace-split word count                      |
//! | keyword     | 20  | action verbs + professional keywords             |
//! | formatting  | 15  | bullets, dates, blank-line ratio                 |
//! | jd_match    | 15  | job-description words found in the resume        |
//!
//! Each sub-scorer returns its own [`SubScore`]; [`score_resume`] concatenates the
//! suggestions in the order above.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use serde::{Deserialize, Serialize};

use crate::analysis::sections::{Section, SectionMap};

const REQUIRED_SECTIONS: [Section; 4] = [
    Section::ContactInfo,
    Section::Experience,
    Section::Education,
    Section::Skills,
];
const OPTIONAL_SECTIONS: [Section; 3] = [Section::Summary, Section::Projects, Section::Certifications];

const REQUIRED_SECTION_POINTS: f64 = 5.0;
const OPTIONAL_SECTION_POINTS: f64 = 10.0 / 3.0;

const ACTION_VERBS: &[&str] = &[
    "achieved",
    "improved",
    "developed",
    "managed",
    "led",
    "created",
    "implemented",
    "designed",
    "built",
    "launched",
    "optimized",
    "increased",
    "reduced",
    "streamlined",
    "coordinated",
    "executed",
    "delivered",
];

const PROFESSIONAL_KEYWORDS: &[&str] = &[
    "project",
    "team",
    "analysis",
    "strategy",
    "solution",
    "system",
    "process",
    "data",
    "customer",
    "business",
    "technical",
    "development",
];

const BULLET_GLYPHS: &[char] = &['•', '-', '*', '→', '▪'];

const JD_STOP_WORDS: &[&str] = &[
    "the", "and", "or", "in", "at", "to", "for", "of", "with", "a", "an", "is", "are", "be",
    "will",
];

/// Job descriptions shorter than this (after trimming) are treated as absent.
const MIN_JD_CHARS: usize = 50;

static DATE_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"\d{4}",
        r"\d{1,2}/\d{4}",
        r"(Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+\d{4}",
    ])
    .unwrap()
});

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").unwrap());

/// Full score report for one resume.
///
/// `overall_score` is always the sum of the five sub-scores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub overall_score: u32,
    pub section_score: u32,
    pub length_score: u32,
    pub keyword_score: u32,
    pub formatting_score: u32,
    pub jd_match_score: u32,
    pub suggestions: Vec<String>,
}

/// One sub-scorer's result: its points and the suggestions it raised.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubScore {
    pub score: u32,
    pub suggestions: Vec<String>,
}

impl SubScore {
    fn full(score: u32) -> Self {
        Self {
            score,
            suggestions: vec![],
        }
    }

    fn with_suggestion(score: u32, suggestion: &str) -> Self {
        Self {
            score,
            suggestions: vec![suggestion.to_string()],
        }
    }
}

/// Scores a resume against its detected sections and an optional job description.
/// An empty job description is the same as none.
pub fn score_resume(
    text: &str,
    sections: &SectionMap,
    job_description: Option<&str>,
) -> ScoreBreakdown {
    let section = section_score(sections);
    let length = length_score(text);
    let keyword = keyword_score(text);
    let formatting = formatting_score(text);
    let jd_match = jd_match_score(text, job_description);

    let overall_score =
        section.score + length.score + keyword.score + formatting.score + jd_match.score;

    let suggestions = [&section, &length, &keyword, &formatting, &jd_match]
        .into_iter()
        .flat_map(|sub| sub.suggestions.iter().cloned())
        .collect();

    ScoreBreakdown {
        overall_score,
        section_score: section.score,
        length_score: length.score,
        keyword_score: keyword.score,
        formatting_score: formatting.score,
        jd_match_score: jd_match.score,
        suggestions,
    }
}

/// Section completeness (max 30). Rounded once, after all points are summed.
pub fn section_score(sections: &SectionMap) -> SubScore {
    let mut points = 0.0_f64;
    let mut suggestions = Vec::new();

    for section in REQUIRED_SECTIONS {
        if sections.is_present(section) {
            points += REQUIRED_SECTION_POINTS;
        } else {
            suggestions.push(format!("Missing required section: {}", section.label()));
        }
    }

    for section in OPTIONAL_SECTIONS {
        if sections.is_present(section) {
            points += OPTIONAL_SECTION_POINTS;
        }
    }

    SubScore {
        score: points.round() as u32,
        suggestions,
    }
}

/// Length (max 20), tiered on word count.
pub fn length_score(text: &str) -> SubScore {
    match text.split_whitespace().count() {
        300..=800 => SubScore::full(20),
        200..=299 | 801..=1000 => SubScore::with_suggestion(
            15,
            "Resume length could be optimized (aim for 300-800 words)",
        ),
        100..=199 | 1001..=1500 => {
            SubScore::with_suggestion(10, "Resume is too short/long. Optimal range: 300-800 words")
        }
        _ => SubScore::with_suggestion(5, "Resume length is significantly outside optimal range"),
    }
}

/// Keyword density (max 20): action verbs and professional keywords, 10 points each.
pub fn keyword_score(text: &str) -> SubScore {
    let text_lower = text.to_lowercase();
    let mut result = SubScore::default();

    let parts = [
        (
            ACTION_VERBS,
            "Use more action verbs (achieved, developed, managed, etc.)",
        ),
        (
            PROFESSIONAL_KEYWORDS,
            "Include more professional keywords relevant to your field",
        ),
    ];

    for (vocabulary, suggestion) in parts {
        let hits = vocabulary
            .iter()
            .filter(|word| text_lower.contains(*word))
            .count();
        match keyword_tier_points(hits) {
            Some(points) => result.score += points,
            None => result.suggestions.push(suggestion.to_string()),
        }
    }

    result
}

/// `None` means the count is below the lowest tier.
fn keyword_tier_points(hits: usize) -> Option<u32> {
    match hits {
        n if n >= 8 => Some(10),
        n if n >= 5 => Some(7),
        n if n >= 3 => Some(4),
        _ => None,
    }
}

/// Formatting (max 15): starts full and loses 5 per missing signal.
pub fn formatting_score(text: &str) -> SubScore {
    let mut score: u32 = 15;
    let mut suggestions = Vec::new();

    if !text.contains(BULLET_GLYPHS) {
        score = score.saturating_sub(5);
        suggestions.push("Use bullet points to improve readability".to_string());
    }

    if !DATE_PATTERNS.is_match(text) {
        score = score.saturating_sub(5);
        suggestions.push("Include dates for experience and education".to_string());
    }

    if blank_line_ratio(text) > 0.5 {
        score = score.saturating_sub(5);
        suggestions.push("Reduce excessive whitespace for better formatting".to_string());
    }

    SubScore { score, suggestions }
}

/// Fraction of `\n`-separated lines that are empty after trimming.
fn blank_line_ratio(text: &str) -> f64 {
    let (total, blank) = text.split('\n').fold((0usize, 0usize), |(total, blank), line| {
        (total + 1, blank + usize::from(line.trim().is_empty()))
    });
    blank as f64 / total.max(1) as f64
}

/// Job-description match (max 15). A missing or short JD is not applicable and
/// scores 0 without a suggestion.
pub fn jd_match_score(text: &str, job_description: Option<&str>) -> SubScore {
    let Some(jd) = job_description else {
        return SubScore::default();
    };
    if jd.trim().chars().count() < MIN_JD_CHARS {
        return SubScore::default();
    }

    let candidates = jd_candidate_words(jd);
    if candidates.is_empty() {
        return SubScore::default();
    }

    let text_lower = text.to_lowercase();
    let matched = candidates
        .iter()
        .filter(|word| text_lower.contains(word.as_str()))
        .count();

    // Integer comparison keeps tier edges exact: matched/total >= pct/100.
    let reaches = |pct: usize| matched * 100 >= candidates.len() * pct;

    if reaches(40) {
        SubScore::full(15)
    } else if reaches(30) {
        SubScore::full(12)
    } else if reaches(20) {
        SubScore::full(9)
    } else if reaches(10) {
        SubScore::full(6)
    } else {
        SubScore::with_suggestion(
            0,
            "Resume has low keyword match with job description. Tailor it more closely.",
        )
    }
}

/// Lower-cased word tokens of the JD minus stop words and tokens of three
/// characters or fewer. Repeated words are kept.
fn jd_candidate_words(job_description: &str) -> Vec<String> {
    let jd_lower = job_description.to_lowercase();
    WORD_RE
        .find_iter(&jd_lower)
        .map(|m| m.as_str())
        .filter(|word| !JD_STOP_WORDS.contains(word) && word.chars().count() > 3)
        .map(String::from)
        .collect()
}

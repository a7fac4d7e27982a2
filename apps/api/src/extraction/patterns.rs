//! Pattern Library: compiled recognizers shared by every extraction stage.
//!
//! Everything here is compiled once and read-only afterwards, so concurrent
//! pipeline runs share the statics without coordination.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::SectionKey;

pub static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}\b").unwrap());

/// Loose international phone shape: optional country code, optional area code
/// (parenthesized or not), then two digit groups.
pub static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+?\d{1,3}[-.\s]?)?(?:\(?\d{2,4}\)?[-.\s]?)?\d{3,4}[-.\s]?\d{3,4}").unwrap()
});

pub static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:https?://)?(?:www\.)?[-a-z0-9@:%._+~#=]{1,256}\.[a-z0-9()]{1,6}\b[-a-z0-9()@:%_+.~#?&/=]*",
    )
    .unwrap()
});

/// Date tokens. Named groups tell the caller which shape matched:
/// `numeric` (MM/DD/YYYY), `month` (month name + year), `from`/`to` (bare
/// year or year range) and `ongoing` (present/current). Month ranges come
/// out as two consecutive `month` matches.
pub static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?P<numeric>\b\d{1,2}[-/]\d{1,2}[-/]\d{2,4}\b)|(?P<month>\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+\d{4}\b)|\b(?P<from>\d{4})(?:\s*[-–]\s*(?P<to>\d{4}))?\b|\b(?P<ongoing>present|current)\b",
    )
    .unwrap()
});

pub static LINKEDIN_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)linkedin\.com/(?:in/|profile/view\?id=)(?P<username>[\w-]+)").unwrap()
});

pub static GITHUB_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)github\.com/(?P<username>[\w-]+)").unwrap());

/// Dotted abbreviations end in punctuation, so only the bare words carry a
/// trailing word boundary.
pub static DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:(?:PhD|Doctorate|Masters?|MBA|Bachelor'?s?|Associate|Diploma|Certificate)\b|Ph\.D\.|M\.S\.|M\.A\.|B\.Sc\.|B\.S\.|B\.A\.|A\.S\.)",
    )
    .unwrap()
});

pub static GPA: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)GPA:?\s*([\d.]+)").unwrap());

/// Two or more capitalized words and nothing else. Case-sensitive on purpose.
pub static PERSON_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+$").unwrap());

/// "City, ST" on a single line.
pub static CITY_REGION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<city>[A-Z][a-z]+(?:[ \t]+[A-Z][a-z]+)*),[ \t]*(?P<region>[A-Z]{2})\b").unwrap()
});

/// Heading keywords per section, in detection order. First match wins, so the
/// broader keyword sets sit further down the list.
const SECTION_HEADER_PATTERNS: [(SectionKey, &str); 10] = [
    (
        SectionKey::Experience,
        r"(?i)\b(?:work\s+)?(?:experience|employment|work\s+history|professional\s+experience|career\s+history)\b",
    ),
    (
        SectionKey::Education,
        r"(?i)\b(?:education|academic\s+background|qualifications|degrees?)\b",
    ),
    (
        SectionKey::Skills,
        r"(?i)\b(?:skills|technical\s+skills|competencies|expertise|technologies|tools)\b",
    ),
    (SectionKey::Projects, r"(?i)\b(?:projects?|portfolio)\b"),
    (
        SectionKey::Certifications,
        r"(?i)\b(?:certifications?|certificates?|licenses?)\b",
    ),
    (
        SectionKey::Languages,
        r"(?i)\b(?:languages?|language\s+proficiency)\b",
    ),
    (
        SectionKey::Summary,
        r"(?i)\b(?:summary|objective|profile|about\s+me)\b",
    ),
    (
        SectionKey::Awards,
        r"(?i)\b(?:awards?|honors?|achievements?|recognition)\b",
    ),
    (
        SectionKey::Publications,
        r"(?i)\b(?:publications?|papers?|research)\b",
    ),
    (
        SectionKey::Volunteer,
        r"(?i)\b(?:volunteer|community\s+service|volunteering)\b",
    ),
];

static SECTION_HEADERS: Lazy<Vec<(SectionKey, Regex)>> = Lazy::new(|| {
    SECTION_HEADER_PATTERNS
        .iter()
        .map(|(key, pattern)| (*key, Regex::new(pattern).unwrap()))
        .collect()
});

/// Heading recognizers in detection order.
pub fn section_headers() -> &'static [(SectionKey, Regex)] {
    &SECTION_HEADERS
}

/// True when the line carries an e-mail, phone number or URL.
pub fn is_contact_line(line: &str) -> bool {
    EMAIL.is_match(line) || PHONE.is_match(line) || URL.is_match(line)
}

/// URL matches in document order, minus those that are really e-mail addresses.
pub fn find_urls(text: &str) -> impl Iterator<Item = &str> {
    URL.find_iter(text)
        .map(|m| m.as_str())
        .filter(|candidate| !(candidate.contains('@') && EMAIL.is_match(candidate)))
}

/// Date tokens in document order. A year range yields both of its ends.
pub fn extract_dates(text: &str) -> Vec<String> {
    let mut dates = Vec::new();
    for caps in DATE.captures_iter(text) {
        if let Some(from) = caps.name("from") {
            dates.push(from.as_str().to_string());
            if let Some(to) = caps.name("to") {
                dates.push(to.as_str().to_string());
            }
        } else if let Some(m) = caps.get(0) {
            dates.push(m.as_str().trim().to_string());
        }
    }
    dates
}

use lazy_static::lazy_static;
use regex::Regex;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const EMAIL_NOT_FOUND: &str = "Not Found";
pub const NOT_MENTIONED: &str = "Not Mentioned";

const NAME_SCAN_LINES: usize = 10;
const MAX_NAME_TOKENS: usize = 4;
const MAX_NAME_CHARS: usize = 40;

/// Degree abbreviations checked as plain substrings of the lowercased text.
pub const DEFAULT_QUALIFICATIONS: &[&str] = &[
    "b.tech", "m.tech", "b.e.", "m.e.", "b.sc", "m.sc", "bca", "mca", "bba", "mba", "b.com",
    "m.com", "phd",
];

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap();
    static ref YEARS_RE: Regex =
        Regex::new(r"(\d+(?:\.\d+)?)\s*\+?\s*(?:years?|yrs?)\b").unwrap();
    static ref EXPERIENCE_LABEL_RE: Regex =
        Regex::new(r"experience\s*[:\-]?\s*(\d+(?:\.\d+)?)").unwrap();
}

/// First short line near the top of the document, taken to be the candidate's name.
pub fn extract_name(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(NAME_SCAN_LINES)
        .find(|line| {
            let tokens = line.split_whitespace().count();
            (1..=MAX_NAME_TOKENS).contains(&tokens) && line.chars().count() <= MAX_NAME_CHARS
        })
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

pub fn extract_email(text: &str) -> String {
    EMAIL_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| EMAIL_NOT_FOUND.to_string())
}

/// "N years" from the first of two patterns that matches anywhere in the text.
///
/// The plain "N years" / "N yrs" form is tried before "experience: N", so an
/// early unrelated mention wins over a labelled one further down.
pub fn extract_experience(text: &str) -> String {
    let lowered = text.to_lowercase();

    [&*YEARS_RE, &*EXPERIENCE_LABEL_RE]
        .iter()
        .find_map(|re| re.captures(&lowered))
        .map(|caps| format!("{} years", &caps[1]))
        .unwrap_or_else(|| NOT_MENTIONED.to_string())
}

/// Every listed degree found in the text, uppercased and joined in list order.
pub fn extract_qualification<S: AsRef<str>>(text: &str, degrees: &[S]) -> String {
    let lowered = text.to_lowercase();
    let mut found: Vec<String> = Vec::new();

    for degree in degrees {
        let degree = degree.as_ref().trim().to_lowercase();
        if degree.is_empty() || !lowered.contains(&degree) {
            continue;
        }
        let label = degree.to_uppercase();
        if !found.contains(&label) {
            found.push(label);
        }
    }

    if found.is_empty() {
        NOT_MENTIONED.to_string()
    } else {
        found.join(", ")
    }
}

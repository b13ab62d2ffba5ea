//! Section detection — infers which conventional resume sections are present
//! from keyword occurrence in the extracted text.
//!
//! Matching is plain substring containment on the lower-cased text. A keyword
//! embedded inside a longer word still counts.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap());

static PHONE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\+?\d{1,3}[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}").unwrap()
});

static LINKEDIN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"linkedin\.com/in/[\w-]+").unwrap());

static GITHUB_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"github\.com/[\w-]+").unwrap());

/// A conventional resume division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    ContactInfo,
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Languages,
}

impl Section {
    pub const ALL: [Section; 8] = [
        Section::ContactInfo,
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Projects,
        Section::Certifications,
        Section::Languages,
    ];

    /// Human-readable name used in suggestions, e.g. "Contact Info".
    pub fn label(self) -> &'static str {
        match self {
            Section::ContactInfo => "Contact Info",
            Section::Summary => "Summary",
            Section::Experience => "Experience",
            Section::Education => "Education",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Certifications => "Certifications",
            Section::Languages => "Languages",
        }
    }

    /// Heading keywords for the section. Contact info is pattern-based and has none.
    fn keywords(self) -> &'static [&'static str] {
        match self {
            Section::ContactInfo => &[],
            Section::Summary => &[
                "summary",
                "objective",
                "profile",
                "about me",
                "professional summary",
            ],
            Section::Experience => &[
                "experience",
                "work history",
                "employment",
                "professional experience",
                "work experience",
            ],
            Section::Education => &[
                "education",
                "academic",
                "degree",
                "university",
                "college",
                "bachelor",
                "master",
                "phd",
            ],
            Section::Skills => &[
                "skills",
                "technical skills",
                "core competencies",
                "technologies",
                "expertise",
            ],
            Section::Projects => &["projects", "portfolio", "work samples"],
            Section::Certifications => &["certification", "certificate", "licensed", "credentials"],
            Section::Languages => &["languages", "language proficiency", "linguistic skills"],
        }
    }
}

/// Presence flag for every section. Serializes as an object with exactly eight keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionMap {
    pub contact_info: bool,
    pub summary: bool,
    pub experience: bool,
    pub education: bool,
    pub skills: bool,
    pub projects: bool,
    pub certifications: bool,
    pub languages: bool,
}

impl SectionMap {
    pub fn is_present(&self, section: Section) -> bool {
        match section {
            Section::ContactInfo => self.contact_info,
            Section::Summary => self.summary,
            Section::Experience => self.experience,
            Section::Education => self.education,
            Section::Skills => self.skills,
            Section::Projects => self.projects,
            Section::Certifications => self.certifications,
            Section::Languages => self.languages,
        }
    }

    fn set(&mut self, section: Section, present: bool) {
        let flag = match section {
            Section::ContactInfo => &mut self.contact_info,
            Section::Summary => &mut self.summary,
            Section::Experience => &mut self.experience,
            Section::Education => &mut self.education,
            Section::Skills => &mut self.skills,
            Section::Projects => &mut self.projects,
            Section::Certifications => &mut self.certifications,
            Section::Languages => &mut self.languages,
        };
        *flag = present;
    }
}

/// Contact fields pulled verbatim from the resume text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

/// Scans the text and flags each of the eight sections independently.
pub fn detect_sections(text: &str) -> SectionMap {
    let text_lower = text.to_lowercase();
    let mut sections = SectionMap::default();

    for section in Section::ALL {
        let present = match section {
            Section::ContactInfo => EMAIL_RE.is_match(text) || PHONE_RE.is_match(text),
            other => other
                .keywords()
                .iter()
                .any(|keyword| text_lower.contains(keyword)),
        };
        sections.set(section, present);
    }

    sections
}

/// Returns the first email, phone, LinkedIn and GitHub profile found in the text.
pub fn extract_contact_details(text: &str) -> ContactDetails {
    let text_lower = text.to_lowercase();
    let first = |re: &Regex, haystack: &str| re.find(haystack).map(|m| m.as_str().to_string());

    ContactDetails {
        email: first(&EMAIL_RE, text),
        phone: first(&PHONE_RE, text),
        linkedin: first(&LINKEDIN_RE, &text_lower),
        github: first(&GITHUB_RE, &text_lower),
    }
}

//! Static profile record consumed by the CV renderers.
//!
//! Everything here is plain data deserialised from the profile YAML document.
//! Translated fields are [`Localized`] pairs: the Portuguese value is the native
//! one, the English value is optional and falls back to the native value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language of a rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Native language of the profile data.
    Pt,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Pt, Language::En];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Language::Pt)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pt" | "pt-br" => Ok(Language::Pt),
            "en" | "en-us" => Ok(Language::En),
            other => Err(format!("unsupported language tag '{other}', expected pt or en")),
        }
    }
}

/// A string with a native value and an optional English translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub pt: String,
    #[serde(default)]
    pub en: Option<String>,
}

impl Localized {
    pub fn new(pt: impl Into<String>, en: Option<&str>) -> Self {
        Self {
            pt: pt.into(),
            en: en.map(str::to_string),
        }
    }

    /// Native-only value, no translation.
    pub fn native(pt: impl Into<String>) -> Self {
        Self::new(pt, None)
    }

    /// Resolves the value for `lang`. A blank translation counts as absent.
    pub fn resolve(&self, lang: Language) -> &str {
        match lang {
            Language::Pt => &self.pt,
            Language::En => match self.en.as_deref() {
                Some(en) if !en.trim().is_empty() => en,
                _ => &self.pt,
            },
        }
    }
}

impl From<&str> for Localized {
    fn from(value: &str) -> Self {
        Localized::native(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLinks {
    pub linkedin: String,
    pub github: String,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: Localized,
    pub summary: Localized,
    pub contact: Contact,
    pub social: SocialLinks,
}

/// A spoken language with its proficiency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSkill {
    pub name: String,
    pub level: Localized,
    /// Proficiency in percent, 0..=100.
    pub percent: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillSet {
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub areas: Vec<String>,
    #[serde(default)]
    pub languages: Vec<LanguageSkill>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectCategory {
    Web,
    Ai,
    Data,
    Cs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: u32,
    pub title: Localized,
    pub description: Localized,
    pub tech: String,
    pub category: ProjectCategory,
    pub link: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// The full record behind every CV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvData {
    pub profile: Profile,
    #[serde(default)]
    pub skills: SkillSet,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_falls_back_to_native_when_missing_or_blank() {
        let missing = Localized::native("Desenvolvedora");
        let blank = Localized::new("Desenvolvedora", Some("  "));
        let present = Localized::new("Desenvolvedora", Some("Developer"));

        assert_eq!(missing.resolve(Language::En), "Desenvolvedora");
        assert_eq!(blank.resolve(Language::En), "Desenvolvedora");
        assert_eq!(present.resolve(Language::En), "Developer");
        assert_eq!(present.resolve(Language::Pt), "Desenvolvedora");
    }

    #[test]
    fn language_tags_parse_case_insensitively() {
        assert_eq!("EN".parse::<Language>(), Ok(Language::En));
        assert_eq!("pt".parse::<Language>(), Ok(Language::Pt));
        assert!("fr".parse::<Language>().is_err());
    }
}

//! Request/response DTOs for the recommendation service

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================
// Auth
// ============================================

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful auth response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub user_name: Option<String>,
}

// ============================================
// Profile
// ============================================

/// Highest education level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    #[serde(rename = "High School")]
    HighSchool,
    #[default]
    Bachelor,
    Master,
    #[serde(rename = "PhD")]
    PhD,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 4] = [
        EducationLevel::HighSchool,
        EducationLevel::Bachelor,
        EducationLevel::Master,
        EducationLevel::PhD,
    ];

    /// Label used on the wire and in the form
    pub fn label(&self) -> &'static str {
        match self {
            EducationLevel::HighSchool => "High School",
            EducationLevel::Bachelor => "Bachelor",
            EducationLevel::Master => "Master",
            EducationLevel::PhD => "PhD",
        }
    }

    /// Parse a label, case-insensitively
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|level| level.label().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for EducationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| {
            format!(
                "unknown education level '{}' (expected one of: {})",
                s,
                Self::ALL.map(|level| level.label()).join(", ")
            )
        })
    }
}

/// User profile as exchanged with `/profile`
///
/// Every field is optional on the way in: a partially filled profile from the
/// server loads with defaults for whatever is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "string_or_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_education")]
    pub highest_education_level: EducationLevel,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub short_term_goal: String,
    #[serde(default, deserialize_with = "string_list")]
    pub programming_languages: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub technical_domains: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub preferred_domains: Vec<String>,
}

fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_education<'de, D>(deserializer: D) -> Result<EducationLevel, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(EducationLevel::from_label)
        .unwrap_or_default())
}

/// Accepts an array of strings; anything else loads as empty
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                serde_json::Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

// ============================================
// Recommendation
// ============================================

/// Structured output of `POST /api/recommend`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub expertise_field: String,
    /// Model confidence in `[0, 1]`
    pub confidence: f64,
    pub roadmap: String,
    pub explanation: String,
}

impl RecommendationResult {
    /// Confidence as a percentage with one decimal, e.g. `0.873 -> "87.3%"`
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}%", self.confidence * 100.0)
    }
}

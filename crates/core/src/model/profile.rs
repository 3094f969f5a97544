use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("role cannot be empty")]
    EmptyRole,

    #[error("unknown difficulty: {0}")]
    UnknownDifficulty(String),

    #[error("unknown experience level: {0}")]
    UnknownExperience(String),

    #[error("resume must be a PDF file")]
    UnsupportedResume,
}

//
// ─── ROLE ──────────────────────────────────────────────────────────────────────
//

/// Known role identifiers and their display labels.
const ROLE_LABELS: &[(&str, &str)] = &[
    ("frontend-developer", "Frontend Developer"),
    ("backend-developer", "Backend Developer"),
    ("full-stack-developer", "Full Stack Developer"),
    ("data-scientist", "Data Scientist"),
    ("machine-learning-engineer", "ML Engineer"),
    ("devops-engineer", "DevOps Engineer"),
    ("cybersecurity-analyst", "Cybersecurity Analyst"),
    ("product-manager", "Product Manager"),
    ("system-design", "System Design"),
];

/// Target role practised in a session, e.g. `backend-developer`.
///
/// The identifier is opaque to the orchestrator and passed to providers
/// untouched; unknown ids are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(String);

impl Role {
    /// Creates a role from its identifier.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::EmptyRole` for blank identifiers.
    pub fn new(id: impl Into<String>) -> Result<Self, ProfileError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ProfileError::EmptyRole);
        }
        Ok(Self(id))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable label: the catalog label for known roles, otherwise
    /// the identifier with dashes replaced by spaces.
    #[must_use]
    pub fn label(&self) -> String {
        ROLE_LABELS
            .iter()
            .find(|(id, _)| *id == self.0)
            .map_or_else(|| self.0.replace('-', " "), |(_, label)| (*label).to_string())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

/// Question difficulty for the session, fixed at start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Entry-level questions.
    Easy,
    /// Mid-level questions.
    Medium,
    /// Senior-level questions.
    Hard,
}

impl Difficulty {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(ProfileError::UnknownDifficulty(other.to_string())),
        }
    }
}

//
// ─── EXPERIENCE ────────────────────────────────────────────────────────────────
//

/// Self-reported experience level, selected before the session starts.
///
/// Opaque to the orchestrator; carried along for providers that want to
/// calibrate their questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Lead => "lead",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::Mid => "Mid-Level",
            ExperienceLevel::Senior => "Senior",
            ExperienceLevel::Lead => "Lead/Staff",
        }
    }

    /// Indicative years-of-experience range for the level.
    #[must_use]
    pub fn years_range(self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "0-2 years",
            ExperienceLevel::Mid => "2-5 years",
            ExperienceLevel::Senior => "5-8 years",
            ExperienceLevel::Lead => "8+ years",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExperienceLevel {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "junior" => Ok(Self::Junior),
            "mid" => Ok(Self::Mid),
            "senior" => Ok(Self::Senior),
            "lead" => Ok(Self::Lead),
            other => Err(ProfileError::UnknownExperience(other.to_string())),
        }
    }
}

//
// ─── RESUME ────────────────────────────────────────────────────────────────────
//

/// Resume file attached at session start.
///
/// Accepted and carried along but never parsed; providers are free to
/// ignore it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeAttachment {
    file_name: String,
    size_bytes: u64,
}

impl ResumeAttachment {
    /// Accepts a resume file reference.
    ///
    /// # Errors
    ///
    /// Returns `ProfileError::UnsupportedResume` for non-PDF file names.
    pub fn new(file_name: impl Into<String>, size_bytes: u64) -> Result<Self, ProfileError> {
        let file_name = file_name.into();
        if !file_name.to_ascii_lowercase().ends_with(".pdf") {
            return Err(ProfileError::UnsupportedResume);
        }
        Ok(Self {
            file_name,
            size_bytes,
        })
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}

//
// ─── SESSION CONFIG ────────────────────────────────────────────────────────────
//

/// Parameters fixed when the participant confirms their selection.
///
/// Construction requires every mandatory field, so "missing role/difficulty"
/// cannot reach the orchestrator or the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    role: Role,
    difficulty: Difficulty,
    experience: ExperienceLevel,
    resume: Option<ResumeAttachment>,
}

impl SessionConfig {
    #[must_use]
    pub fn new(role: Role, difficulty: Difficulty, experience: ExperienceLevel) -> Self {
        Self {
            role,
            difficulty,
            experience,
            resume: None,
        }
    }

    /// Attaches an optional resume.
    #[must_use]
    pub fn with_resume(mut self, resume: ResumeAttachment) -> Self {
        self.resume = Some(resume);
        self
    }

    #[must_use]
    pub fn role(&self) -> &Role {
        &self.role
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn experience(&self) -> ExperienceLevel {
        self.experience
    }

    #[must_use]
    pub fn resume(&self) -> Option<&ResumeAttachment> {
        self.resume.as_ref()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

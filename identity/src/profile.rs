//! Profile rows and the role-tagged `User` model.
//!
//! DESIGN
//! ======
//! `ProfileRow` mirrors the `profiles` table one-to-one so the data API can be
//! deserialized without custom glue. Everything above the wire works with
//! `User`, a sum type decoded from the row's `user_type` discriminator, so
//! role-specific fields are only reachable after an exhaustive match.

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// ROLE
// =============================================================================

/// Account role, fixed at signup. Gates which dashboard a user may open.
///
/// Decoding goes through [`FromStr`], so an unknown `user_type` column
/// surfaces as [`ProfileDecodeError::UnknownRole`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Role {
    Student,
    Company,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Company => "company",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ProfileDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "company" => Ok(Self::Company),
            other => Err(ProfileDecodeError::UnknownRole(other.to_owned())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = ProfileDecodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// COMPANY SIZE
// =============================================================================

/// Headcount bucket offered on the company signup form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanySize {
    #[serde(rename = "1-10")]
    Micro,
    #[serde(rename = "11-50")]
    Small,
    #[serde(rename = "51-200")]
    Medium,
    #[serde(rename = "201-500")]
    Large,
    #[serde(rename = "501-1000")]
    XLarge,
    #[serde(rename = "1000+")]
    Enterprise,
}

impl CompanySize {
    pub const ALL: [Self; 6] = [Self::Micro, Self::Small, Self::Medium, Self::Large, Self::XLarge, Self::Enterprise];

    /// Stored column value (e.g. `"51-200"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Micro => "1-10",
            Self::Small => "11-50",
            Self::Medium => "51-200",
            Self::Large => "201-500",
            Self::XLarge => "501-1000",
            Self::Enterprise => "1000+",
        }
    }

    /// Human label for select inputs.
    #[must_use]
    pub fn label(self) -> String {
        format!("{} employees", self.as_str())
    }
}

impl FromStr for CompanySize {
    type Err = ProfileDecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| ProfileDecodeError::UnknownCompanySize(s.to_owned()))
    }
}

// =============================================================================
// ERROR
// =============================================================================

/// A profile row could not be turned into a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileDecodeError {
    #[error("unknown user_type: {0}")]
    UnknownRole(String),
    #[error("unknown company_size: {0}")]
    UnknownCompanySize(String),
}

// =============================================================================
// PROFILE ROW
// =============================================================================

/// One row of the `profiles` table as returned by the data API.
///
/// Role-specific columns are nullable: the row is created by a database
/// trigger when the identity is created and filled in by the signup flow.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: String,
    pub user_id: String,
    pub user_type: Role,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub university: Option<String>,
    pub major: Option<String>,
    pub graduation_year: Option<i32>,
    pub skills: Option<Vec<String>>,
    pub bio: Option<String>,
    pub portfolio_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,

    pub company_name: Option<String>,
    pub industry: Option<String>,
    pub company_size: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub contact_first_name: Option<String>,
    pub contact_last_name: Option<String>,
    pub contact_position: Option<String>,
    pub headquarters: Option<String>,
    pub is_verified: Option<bool>,

    #[serde(default)]
    pub is_profile_complete: bool,
}

// =============================================================================
// USER
// =============================================================================

/// Named person at a company who handles student collaborations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPerson {
    pub first_name: String,
    pub last_name: String,
    pub position: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: String,
    pub user_id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub first_name: String,
    pub last_name: String,
    pub university: String,
    pub major: String,
    pub graduation_year: Option<i32>,
    /// Ordered as the student entered them.
    pub skills: Vec<String>,
    pub bio: Option<String>,
    pub portfolio_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub is_profile_complete: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub id: String,
    pub user_id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub company_name: String,
    pub industry: String,
    /// `None` until the signup write lands or when the column holds an unknown bucket.
    pub company_size: Option<CompanySize>,
    pub contact: ContactPerson,
    pub is_verified: bool,
    pub website: Option<String>,
    pub description: Option<String>,
    pub headquarters: Option<String>,
    pub is_profile_complete: bool,
}

/// The signed-in account, tagged by role.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "user_type", rename_all = "lowercase")]
pub enum User {
    Student(StudentProfile),
    Company(CompanyProfile),
}

impl User {
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Student(_) => Role::Student,
            Self::Company(_) => Role::Company,
        }
    }

    /// Identity id; the key the profile table is filtered by.
    #[must_use]
    pub fn user_id(&self) -> &str {
        match self {
            Self::Student(s) => &s.user_id,
            Self::Company(c) => &c.user_id,
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::Student(s) => &s.email,
            Self::Company(c) => &c.email,
        }
    }

    #[must_use]
    pub fn is_profile_complete(&self) -> bool {
        match self {
            Self::Student(s) => s.is_profile_complete,
            Self::Company(c) => c.is_profile_complete,
        }
    }

    /// First name for students, company name for companies.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Student(s) => &s.first_name,
            Self::Company(c) => &c.company_name,
        }
    }
}

impl From<ProfileRow> for User {
    fn from(row: ProfileRow) -> Self {
        match row.user_type {
            Role::Student => Self::Student(StudentProfile {
                id: row.id,
                user_id: row.user_id,
                email: row.email,
                created_at: row.created_at,
                updated_at: row.updated_at,
                first_name: row.first_name.unwrap_or_default(),
                last_name: row.last_name.unwrap_or_default(),
                university: row.university.unwrap_or_default(),
                major: row.major.unwrap_or_default(),
                graduation_year: row.graduation_year,
                skills: row.skills.unwrap_or_default(),
                bio: non_empty(row.bio),
                portfolio_url: non_empty(row.portfolio_url),
                linkedin_url: non_empty(row.linkedin_url),
                github_url: non_empty(row.github_url),
                is_profile_complete: row.is_profile_complete,
            }),
            Role::Company => Self::Company(CompanyProfile {
                id: row.id,
                user_id: row.user_id,
                email: row.email,
                created_at: row.created_at,
                updated_at: row.updated_at,
                company_name: row.company_name.unwrap_or_default(),
                industry: row.industry.unwrap_or_default(),
                company_size: row.company_size.as_deref().and_then(|s| s.parse().ok()),
                contact: ContactPerson {
                    first_name: row.contact_first_name.unwrap_or_default(),
                    last_name: row.contact_last_name.unwrap_or_default(),
                    position: row.contact_position.unwrap_or_default(),
                },
                is_verified: row.is_verified.unwrap_or(false),
                website: non_empty(row.website),
                description: non_empty(row.description),
                headquarters: non_empty(row.headquarters),
                is_profile_complete: row.is_profile_complete,
            }),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// =============================================================================
// PATCH
// =============================================================================

/// Partial profile update. Unset fields are left untouched by the data API.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_profile_complete: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graduation_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portfolio_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_size: Option<CompanySize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headquarters: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_verified: Option<bool>,
}

impl ProfilePatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the set fields onto a row, bumping nothing else.
    ///
    /// Used by in-memory service implementations; the real data API applies
    /// the patch server-side.
    pub fn apply_to(&self, row: &mut ProfileRow) {
        macro_rules! set {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = &self.$field {
                    row.$field = Some(value.clone());
                })*
            };
        }
        if let Some(role) = self.user_type {
            row.user_type = role;
        }
        if let Some(complete) = self.is_profile_complete {
            row.is_profile_complete = complete;
        }
        if let Some(size) = self.company_size {
            row.company_size = Some(size.as_str().to_owned());
        }
        set!(
            first_name,
            last_name,
            university,
            major,
            graduation_year,
            skills,
            bio,
            portfolio_url,
            linkedin_url,
            github_url,
            company_name,
            industry,
            website,
            description,
            contact_first_name,
            contact_last_name,
            contact_position,
            headquarters,
            is_verified,
        );
    }
}

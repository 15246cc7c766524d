//! Signup payloads and the profile fields they write.

#[cfg(test)]
#[path = "signup_test.rs"]
mod tests;

use crate::profile::{CompanySize, ContactPerson, ProfilePatch, Role};

/// How far ahead of the current year a graduation year may be.
pub const MAX_GRADUATION_YEARS_AHEAD: i32 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StudentSignupData {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub university: String,
    pub major: String,
    pub graduation_year: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompanySignupData {
    pub email: String,
    pub password: String,
    pub company_name: String,
    pub industry: String,
    pub company_size: CompanySize,
    pub contact: ContactPerson,
}

/// Everything needed to create an account of either role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignupData {
    Student(StudentSignupData),
    Company(CompanySignupData),
}

impl SignupData {
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Student(_) => Role::Student,
            Self::Company(_) => Role::Company,
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
    pub fn password(&self) -> &str {
        match self {
            Self::Student(s) => &s.password,
            Self::Company(c) => &c.password,
        }
    }

    /// Profile fields written right after the identity is created.
    ///
    /// Always marks the profile incomplete; students start with no skills and
    /// companies start unverified.
    #[must_use]
    pub fn profile_patch(&self) -> ProfilePatch {
        let base = ProfilePatch {
            user_type: Some(self.role()),
            is_profile_complete: Some(false),
            ..ProfilePatch::default()
        };
        match self {
            Self::Student(s) => ProfilePatch {
                first_name: Some(s.first_name.trim().to_owned()),
                last_name: Some(s.last_name.trim().to_owned()),
                university: Some(s.university.trim().to_owned()),
                major: Some(s.major.trim().to_owned()),
                graduation_year: Some(s.graduation_year),
                skills: Some(Vec::new()),
                ..base
            },
            Self::Company(c) => ProfilePatch {
                company_name: Some(c.company_name.trim().to_owned()),
                industry: Some(c.industry.trim().to_owned()),
                company_size: Some(c.company_size),
                contact_first_name: Some(c.contact.first_name.trim().to_owned()),
                contact_last_name: Some(c.contact.last_name.trim().to_owned()),
                contact_position: Some(c.contact.position.trim().to_owned()),
                is_verified: Some(false),
                ..base
            },
        }
    }

    /// Check required fields before anything is sent to the service.
    ///
    /// # Errors
    ///
    /// Returns a message suitable for display next to the form.
    pub fn validate(&self, current_year: i32) -> Result<(), &'static str> {
        if self.email().trim().is_empty() || !self.email().contains('@') {
            return Err("Enter a valid email address.");
        }
        if self.password().is_empty() {
            return Err("Enter a password.");
        }
        match self {
            Self::Student(s) => {
                let required = [&s.first_name, &s.last_name, &s.university, &s.major];
                if required.iter().any(|v| v.trim().is_empty()) {
                    return Err("Fill in all student fields.");
                }
                if s.graduation_year < current_year || s.graduation_year > current_year + MAX_GRADUATION_YEARS_AHEAD {
                    return Err("Graduation year is out of range.");
                }
            }
            Self::Company(c) => {
                let required = [
                    &c.company_name,
                    &c.industry,
                    &c.contact.first_name,
                    &c.contact.last_name,
                    &c.contact.position,
                ];
                if required.iter().any(|v| v.trim().is_empty()) {
                    return Err("Fill in all company fields.");
                }
            }
        }
        Ok(())
    }
}

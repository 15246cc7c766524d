//! Small input-normalization helpers shared by the forms.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use chrono::Datelike;

/// Cheap shape check; the auth service does the real validation.
pub fn is_plausible_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.trim().split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Trimmed value, or `None` when blank.
pub fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Comma-separated skills: trimmed, blanks dropped, case-insensitive
/// duplicates removed keeping the first spelling and the entered order.
pub fn parse_skills(raw: &str) -> Vec<String> {
    let mut skills: Vec<String> = Vec::new();
    for skill in raw.split(',').filter_map(non_blank) {
        if !skills.iter().any(|s| s.eq_ignore_ascii_case(&skill)) {
            skills.push(skill);
        }
    }
    skills
}

pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

//! Input Validation
//!
//! Field rules for every payload the API accepts. Checks run in a fixed
//! order and all failures are collected, so a client gets every problem with
//! a form in one response instead of one at a time.
//!
//! Lengths are counted in characters, not bytes, after trimming.

use crate::shared::error::{FieldError, SharedError};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;
pub const BIO_MAX_CHARS: usize = 500;
pub const PASSWORD_MIN_CHARS: usize = 6;
pub const TITLE_MAX_CHARS: usize = 100;
pub const CONTENT_MAX_CHARS: usize = 1000;
pub const COMMENT_MAX_CHARS: usize = 500;

const EMAIL_MAX_CHARS: usize = 254;
const EMAIL_LOCAL_MAX_CHARS: usize = 64;

/// Collects field errors while checks run
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` against `field` unless `ok` holds
    pub fn check(&mut self, ok: bool, field: &str, message: &str) -> &mut Self {
        if !ok {
            self.errors.push(FieldError::new(field, message));
        }
        self
    }

    pub fn finish(self) -> Result<(), SharedError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors.into())
        }
    }
}

fn char_len(value: &str) -> usize {
    value.trim().chars().count()
}

/// Canonical form used for storage and lookups
///
/// Emails compare case-insensitively, so they are trimmed and lowercased
/// before anything touches the database.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Structural email check
///
/// Accepts `local@domain.tld` where the domain has at least two labels made of
/// ASCII letters, digits and hyphens, and the top-level label has at least two
/// characters. Deliverability is not checked.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.is_empty() || email.chars().count() > EMAIL_MAX_CHARS {
        return false;
    }
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.len() > EMAIL_LOCAL_MAX_CHARS || domain.contains('@') {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld_ok = labels
        .last()
        .map(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false);

    labels_ok && tld_ok
}

fn check_name(v: &mut Validator, name: &str) {
    let len = char_len(name);
    if len == 0 {
        v.check(false, "name", "Name is required");
    } else {
        v.check(
            (NAME_MIN_CHARS..=NAME_MAX_CHARS).contains(&len),
            "name",
            "Name must be between 2 and 50 characters",
        );
    }
}

/// Rules for `POST /api/auth/register`
pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), SharedError> {
    let mut v = Validator::new();
    check_name(&mut v, name);
    v.check(is_valid_email(email), "email", "Please enter a valid email");
    v.check(
        password.chars().count() >= PASSWORD_MIN_CHARS,
        "password",
        "Password must be at least 6 characters long",
    );
    v.finish()
}

/// Rules for `POST /api/auth/login`
pub fn validate_login(email: &str, password: &str) -> Result<(), SharedError> {
    let mut v = Validator::new();
    v.check(is_valid_email(email), "email", "Please enter a valid email");
    v.check(!password.is_empty(), "password", "Password is required");
    v.finish()
}

/// Rules for `PUT /api/users/profile`
///
/// A blank name means "leave unchanged" and is not an error.
pub fn validate_profile_update(name: Option<&str>, bio: Option<&str>) -> Result<(), SharedError> {
    let mut v = Validator::new();
    if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
        check_name(&mut v, name);
    }
    if let Some(bio) = bio {
        v.check(
            char_len(bio) <= BIO_MAX_CHARS,
            "bio",
            "Bio cannot be more than 500 characters",
        );
    }
    v.finish()
}

/// Rules for the text fields of `POST /api/posts`
pub fn validate_new_post(title: &str, content: &str) -> Result<(), SharedError> {
    let mut v = Validator::new();
    v.check(char_len(title) > 0, "title", "Post title is required");
    v.check(
        char_len(title) <= TITLE_MAX_CHARS,
        "title",
        "Title cannot be more than 100 characters",
    );
    v.check(char_len(content) > 0, "content", "Post content is required");
    v.check(
        char_len(content) <= CONTENT_MAX_CHARS,
        "content",
        "Post cannot be more than 1000 characters",
    );
    v.finish()
}

/// Rules for `PUT /api/posts/{id}`
pub fn validate_post_update(title: Option<&str>, content: Option<&str>) -> Result<(), SharedError> {
    let mut v = Validator::new();
    if let Some(title) = title {
        v.check(char_len(title) > 0, "title", "Post title cannot be empty");
        v.check(
            char_len(title) <= TITLE_MAX_CHARS,
            "title",
            "Title cannot be more than 100 characters",
        );
    }
    if let Some(content) = content {
        v.check(char_len(content) > 0, "content", "Post content cannot be empty");
        v.check(
            char_len(content) <= CONTENT_MAX_CHARS,
            "content",
            "Post cannot be more than 1000 characters",
        );
    }
    v.finish()
}

/// Rules for `POST /api/posts/{id}/comments`
pub fn validate_comment(text: &str) -> Result<(), SharedError> {
    let mut v = Validator::new();
    v.check(char_len(text) > 0, "text", "Comment text is required");
    v.check(
        char_len(text) <= COMMENT_MAX_CHARS,
        "text",
        "Comment cannot be more than 500 characters",
    );
    v.finish()
}

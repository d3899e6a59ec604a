//! Login and signup form rules, checked before any request.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ApiError;

static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

fn invalid(message: &str) -> Result<(), ApiError> {
    Err(ApiError::Invalid(message.to_string()))
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(email))
}

pub fn validate_login(username: &str, password: &str) -> Result<(), ApiError> {
    if username.trim().is_empty() {
        return invalid("Username or email is required");
    }
    if password.trim().is_empty() {
        return invalid("Password is required");
    }
    Ok(())
}

pub fn validate_signup(username: &str, email: &str, password: &str) -> Result<(), ApiError> {
    let username = username.trim();
    let email = email.trim();

    if username.is_empty() {
        return invalid("Username is required");
    }
    if username.chars().count() < 3 {
        return invalid("Username must be at least 3 characters long");
    }
    if email.is_empty() {
        return invalid("Email is required");
    }
    if password.is_empty() {
        return invalid("Password is required");
    }
    if password.chars().count() < 6 {
        return invalid("Password must be at least 6 characters long");
    }
    if !is_valid_email(email) {
        return invalid("Please enter a valid email address");
    }
    Ok(())
}

//! # Profile
//!
//! The profile lives only in memory for the lifetime of the app; nothing here
//! is persisted or sent to the backend. [`ProfileSetup`] is the form draft and
//! [`ProfileStore::set`] turns it into a [`Profile`] with computed initials.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Student,
    Teacher,
    Alumni,
    Staff,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Student, Role::Teacher, Role::Alumni, Role::Staff];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Alumni => "Alumni",
            Role::Staff => "Staff",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Profile form draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSetup {
    pub full_name: String,
    pub role: Role,
    pub phone: String,
    pub bio: String,
    pub student_id: String,
    pub major: String,
    pub date_of_birth: String,
}

impl ProfileSetup {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.full_name.trim().is_empty() {
            return Err(ApiError::Invalid("Full name is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub full_name: String,
    pub role: Role,
    pub phone: String,
    pub bio: String,
    pub student_id: String,
    pub major: String,
    pub date_of_birth: String,
    pub avatar_initials: String,
}

impl From<ProfileSetup> for Profile {
    fn from(setup: ProfileSetup) -> Self {
        let avatar_initials = avatar_initials(&setup.full_name);
        Self {
            full_name: setup.full_name.trim().to_string(),
            role: setup.role,
            phone: setup.phone,
            bio: setup.bio,
            student_id: setup.student_id,
            major: setup.major,
            date_of_birth: setup.date_of_birth,
            avatar_initials,
        }
    }
}

impl Profile {
    /// Back to a draft, for editing.
    pub fn to_setup(&self) -> ProfileSetup {
        ProfileSetup {
            full_name: self.full_name.clone(),
            role: self.role,
            phone: self.phone.clone(),
            bio: self.bio.clone(),
            student_id: self.student_id.clone(),
            major: self.major.clone(),
            date_of_birth: self.date_of_birth.clone(),
        }
    }
}

/// First letters of the first and last names, or the first two letters of a
/// single name, upper-cased.
pub fn avatar_initials(full_name: &str) -> String {
    let tokens: Vec<&str> = full_name.split_whitespace().collect();
    match tokens.as_slice() {
        [] => String::new(),
        [only] => only.chars().take(2).collect::<String>().to_uppercase(),
        [first, .., last] => first
            .chars()
            .take(1)
            .chain(last.chars().take(1))
            .collect::<String>()
            .to_uppercase(),
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileStore {
    profile: Option<Profile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, setup: ProfileSetup) -> Result<&Profile, ApiError> {
        setup.validate()?;
        Ok(self.profile.insert(Profile::from(setup)))
    }

    pub fn get(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.profile.is_some()
    }

    pub fn clear(&mut self) {
        self.profile = None;
    }
}

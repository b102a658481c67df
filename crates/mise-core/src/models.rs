//! Core data models for mise.
//!
//! Entity structs mirror the database rows one-to-one and carry their
//! ownership links (`user_id`, `recipe_id`). They deliberately do not
//! implement `Serialize`: everything that leaves the process goes through the
//! allow-listed views in [`crate::views`].

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::defaults::{
    NAME_MAX_LEN, PASSWORD_MIN_LEN, RATING_MAX, TITLE_MAX_LEN, USERNAME_MAX_LEN,
};
use crate::error::{Error, Result};

// =============================================================================
// USERS
// =============================================================================

/// Identity principal. Owns every other entity, directly or through a recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2id PHC string.
    pub password_hash: String,
    pub created_at_utc: DateTime<Utc>,
}

/// Credentials submitted to the signup and login endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Validate signup credentials, trimming the username.
    pub fn validated(self) -> Result<Self> {
        let username = self.username.trim().to_string();
        if username.is_empty() {
            return Err(Error::InvalidInput("username is required".to_string()));
        }
        if username.chars().count() > USERNAME_MAX_LEN {
            return Err(Error::InvalidInput(format!(
                "username must be {} characters or less",
                USERNAME_MAX_LEN
            )));
        }
        if username.chars().any(char::is_whitespace) {
            return Err(Error::InvalidInput(
                "username cannot contain whitespace".to_string(),
            ));
        }
        if self.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(Error::InvalidInput(format!(
                "password must be at least {} characters",
                PASSWORD_MIN_LEN
            )));
        }
        Ok(Self {
            username,
            password: self.password,
        })
    }
}

// =============================================================================
// BRANDS AND UNITS
// =============================================================================

/// A product brand. `(name, user_id)` is unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub user_id: i64,
}

/// A measurement unit. `(name, user_id)` is unique.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: i64,
    pub name: String,
    pub user_id: i64,
}

/// Request body for creating a brand or unit.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNamedRequest {
    pub name: String,
}

impl CreateNamedRequest {
    pub fn validated(self) -> Result<Self> {
        Ok(Self {
            name: validate_name("name", &self.name)?,
        })
    }
}

// =============================================================================
// RECIPES
// =============================================================================

/// A recipe owned by a user.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub notes: String,
    pub rating: Option<i32>,
    pub servings: Option<i32>,
    pub user_id: i64,
    pub created_at_utc: DateTime<Utc>,
    pub updated_at_utc: DateTime<Utc>,
}

/// A recipe together with the collections shown on its detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDetail {
    pub recipe: Recipe,
    pub equipment: Vec<Equipment>,
    pub tags: Vec<Tag>,
    pub times: Vec<Time>,
}

/// Request for creating a new recipe.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateRecipeRequest {
    pub title: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub servings: Option<i32>,
}

impl CreateRecipeRequest {
    pub fn validated(self) -> Result<Self> {
        validate_rating(self.rating)?;
        validate_servings(self.servings)?;
        Ok(Self {
            title: validate_title(&self.title)?,
            ..self
        })
    }
}

/// Partial update of a recipe. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateRecipeRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
    #[serde(default)]
    pub servings: Option<i32>,
}

impl UpdateRecipeRequest {
    pub fn validated(self) -> Result<Self> {
        validate_rating(self.rating)?;
        validate_servings(self.servings)?;
        let title = match self.title {
            Some(title) => Some(validate_title(&title)?),
            None => None,
        };
        Ok(Self { title, ..self })
    }

    /// True when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.notes.is_none()
            && self.rating.is_none()
            && self.servings.is_none()
    }

    /// Apply this update to an in-memory recipe.
    pub fn apply_to(&self, recipe: &mut Recipe) {
        if let Some(title) = &self.title {
            recipe.title = title.clone();
        }
        if let Some(notes) = &self.notes {
            recipe.notes = notes.clone();
        }
        if self.rating.is_some() {
            recipe.rating = self.rating;
        }
        if self.servings.is_some() {
            recipe.servings = self.servings;
        }
    }
}

// =============================================================================
// RECIPE COMPONENTS
// =============================================================================

/// A piece of equipment a recipe calls for.
#[derive(Debug, Clone, PartialEq)]
pub struct Equipment {
    pub id: i64,
    pub description: String,
    pub recipe_id: i64,
}

/// A label attached to a recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub recipe_id: i64,
}

/// A duration attached to a recipe, such as prep or cook time.
#[derive(Debug, Clone, PartialEq)]
pub struct Time {
    pub id: i64,
    pub category: String,
    pub days: Option<i32>,
    pub hours: Option<i32>,
    pub minutes: Option<i32>,
    pub note: String,
    pub recipe_id: i64,
}

/// One step of a recipe's method.
#[derive(Debug, Clone, PartialEq)]
pub struct Direction {
    pub id: i64,
    pub description: String,
    pub recipe_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEquipmentRequest {
    pub description: String,
}

impl CreateEquipmentRequest {
    pub fn validated(self) -> Result<Self> {
        Ok(Self {
            description: validate_name("description", &self.description)?,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTagRequest {
    pub name: String,
}

impl CreateTagRequest {
    pub fn validated(self) -> Result<Self> {
        Ok(Self {
            name: validate_name("name", &self.name)?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTimeRequest {
    pub category: String,
    #[serde(default)]
    pub days: Option<i32>,
    #[serde(default)]
    pub hours: Option<i32>,
    #[serde(default)]
    pub minutes: Option<i32>,
    #[serde(default)]
    pub note: Option<String>,
}

impl CreateTimeRequest {
    pub fn validated(self) -> Result<Self> {
        let category = validate_name("category", &self.category)?;
        for (field, value) in [
            ("days", self.days),
            ("hours", self.hours),
            ("minutes", self.minutes),
        ] {
            if matches!(value, Some(v) if v < 0) {
                return Err(Error::InvalidInput(format!(
                    "{} cannot be negative",
                    field
                )));
            }
        }
        Ok(Self { category, ..self })
    }
}

/// Directions may be blank, matching the free-form text field they back.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDirectionRequest {
    #[serde(default)]
    pub description: String,
}

// =============================================================================
// VALIDATION HELPERS
// =============================================================================

fn validate_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(Error::InvalidInput("title is required".to_string()));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(Error::InvalidInput(format!(
            "title must be {} characters or less",
            TITLE_MAX_LEN
        )));
    }
    Ok(title.to_string())
}

fn validate_name(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::InvalidInput(format!("{} is required", field)));
    }
    if value.chars().count() > NAME_MAX_LEN {
        return Err(Error::InvalidInput(format!(
            "{} must be {} characters or less",
            field, NAME_MAX_LEN
        )));
    }
    Ok(value.to_string())
}

fn validate_rating(rating: Option<i32>) -> Result<()> {
    match rating {
        Some(r) if !(0..=RATING_MAX).contains(&r) => Err(Error::InvalidInput(format!(
            "rating must be between 0 and {}",
            RATING_MAX
        ))),
        _ => Ok(()),
    }
}

fn validate_servings(servings: Option<i32>) -> Result<()> {
    match servings {
        Some(s) if s < 1 => Err(Error::InvalidInput(
            "servings must be at least 1".to_string(),
        )),
        _ => Ok(()),
    }
}

//! Allow-listed JSON views of mise entities.
//!
//! Each view names exactly the fields that may leave the process. Ownership
//! links (`user_id`, `recipe_id`) and credentials are never part of a view.

use serde::Serialize;

use crate::models::{Brand, Direction, Equipment, Recipe, RecipeDetail, Tag, Time, Unit};

/// Equipment: `description`, `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquipmentView {
    pub description: String,
    pub id: i64,
}

impl From<&Equipment> for EquipmentView {
    fn from(e: &Equipment) -> Self {
        Self {
            description: e.description.clone(),
            id: e.id,
        }
    }
}

/// Tag: `id`, `name`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagView {
    pub id: i64,
    pub name: String,
}

impl From<&Tag> for TagView {
    fn from(t: &Tag) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
        }
    }
}

/// Time: `category`, `days`, `hours`, `id`, `minutes`, `note`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeView {
    pub category: String,
    pub days: Option<i32>,
    pub hours: Option<i32>,
    pub id: i64,
    pub minutes: Option<i32>,
    pub note: String,
}

impl From<&Time> for TimeView {
    fn from(t: &Time) -> Self {
        Self {
            category: t.category.clone(),
            days: t.days,
            hours: t.hours,
            id: t.id,
            minutes: t.minutes,
            note: t.note.clone(),
        }
    }
}

/// Direction: `description`, `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectionView {
    pub description: String,
    pub id: i64,
}

impl From<&Direction> for DirectionView {
    fn from(d: &Direction) -> Self {
        Self {
            description: d.description.clone(),
            id: d.id,
        }
    }
}

/// Brand or unit: `id`, `name`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedView {
    pub id: i64,
    pub name: String,
}

impl From<&Brand> for NamedView {
    fn from(b: &Brand) -> Self {
        Self {
            id: b.id,
            name: b.name.clone(),
        }
    }
}

impl From<&Unit> for NamedView {
    fn from(u: &Unit) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
        }
    }
}

/// Recipe list entry: `id`, `rating`, `title`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeSummaryView {
    pub id: i64,
    pub rating: Option<i32>,
    pub title: String,
}

impl From<&Recipe> for RecipeSummaryView {
    fn from(r: &Recipe) -> Self {
        Self {
            id: r.id,
            rating: r.rating,
            title: r.title.clone(),
        }
    }
}

/// Full recipe: `equipment`, `id`, `notes`, `rating`, `servings`, `tags`,
/// `times`, `title`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeView {
    pub equipment: Vec<EquipmentView>,
    pub id: i64,
    pub notes: String,
    pub rating: Option<i32>,
    pub servings: Option<i32>,
    pub tags: Vec<TagView>,
    pub times: Vec<TimeView>,
    pub title: String,
}

impl RecipeView {
    /// Build a view from a recipe and whichever collections were loaded.
    /// A missing collection becomes an empty list.
    pub fn new(
        recipe: &Recipe,
        equipment: Option<&[Equipment]>,
        tags: Option<&[Tag]>,
        times: Option<&[Time]>,
    ) -> Self {
        Self {
            equipment: many(equipment),
            id: recipe.id,
            notes: recipe.notes.clone(),
            rating: recipe.rating,
            servings: recipe.servings,
            tags: many(tags),
            times: many(times),
            title: recipe.title.clone(),
        }
    }
}

impl From<&RecipeDetail> for RecipeView {
    fn from(d: &RecipeDetail) -> Self {
        Self::new(
            &d.recipe,
            Some(d.equipment.as_slice()),
            Some(d.tags.as_slice()),
            Some(d.times.as_slice()),
        )
    }
}

fn many<'a, T, V>(items: Option<&'a [T]>) -> Vec<V>
where
    V: From<&'a T>,
{
    items
        .map(|items| items.iter().map(V::from).collect())
        .unwrap_or_default()
}

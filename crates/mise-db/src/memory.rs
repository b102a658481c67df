//! In-memory storage backend.
//!
//! Implements every repository trait over plain maps behind a single
//! `RwLock`, so each operation is atomic. Used by tests and by the server
//! when `STORAGE_BACKEND=memory`. Ownership and cascade rules match the
//! PostgreSQL schema.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use mise_core::{
    Brand, BrandRepository, CreateDirectionRequest, CreateEquipmentRequest, CreateRecipeRequest,
    CreateTagRequest, CreateTimeRequest, Direction, DirectionRepository, Equipment,
    EquipmentRepository, Error, Recipe, RecipeDetail, RecipeRepository, Result, Tag,
    TagRepository, Time, TimeRepository, Unit, UnitRepository, UpdateRecipeRequest, User,
    UserRepository,
};

#[derive(Debug, Default)]
struct Tables {
    last_id: i64,
    users: BTreeMap<i64, User>,
    tokens: HashMap<String, i64>,
    brands: BTreeMap<i64, Brand>,
    units: BTreeMap<i64, Unit>,
    recipes: BTreeMap<i64, Recipe>,
    equipment: BTreeMap<i64, Equipment>,
    tags: BTreeMap<i64, Tag>,
    times: BTreeMap<i64, Time>,
    directions: BTreeMap<i64, Direction>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    fn owned_recipe(&self, user_id: i64, recipe_id: i64) -> Result<&Recipe> {
        self.recipes
            .get(&recipe_id)
            .filter(|r| r.user_id == user_id)
            .ok_or_else(|| Error::not_found("Recipe", recipe_id))
    }

    fn owns_recipe(&self, user_id: i64, recipe_id: i64) -> bool {
        self.owned_recipe(user_id, recipe_id).is_ok()
    }

    fn remove_recipe(&mut self, recipe_id: i64) {
        self.recipes.remove(&recipe_id);
        self.equipment.retain(|_, e| e.recipe_id != recipe_id);
        self.tags.retain(|_, t| t.recipe_id != recipe_id);
        self.times.retain(|_, t| t.recipe_id != recipe_id);
        self.directions.retain(|_, d| d.recipe_id != recipe_id);
    }
}

/// Shared in-memory store. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| Error::Internal("memory store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| Error::Internal("memory store lock poisoned".to_string()))
    }
}

/// Case-insensitive substring filter, ordered by name length, then name.
fn autocomplete<'a, I>(candidates: I, term: &str, limit: i64) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = term.to_lowercase();
    let mut matches: Vec<&str> = candidates
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .collect();
    matches.sort_by(|a, b| {
        a.chars()
            .count()
            .cmp(&b.chars().count())
            .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
            .then_with(|| a.cmp(b))
    });
    matches.truncate(limit.max(0) as usize);
    matches
}

// =============================================================================
// USERS
// =============================================================================

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, username: &str, password_hash: &str, token_hash: &str) -> Result<User> {
        let mut t = self.write()?;
        if t.users.values().any(|u| u.username == username) {
            return Err(Error::Conflict(format!("Username '{}' is taken", username)));
        }
        let user = User {
            id: t.next_id(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at_utc: Utc::now(),
        };
        t.users.insert(user.id, user.clone());
        t.tokens.insert(token_hash.to_string(), user.id);
        Ok(user)
    }

    async fn get(&self, id: i64) -> Result<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .read()?
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn issue_token(&self, user_id: i64, token_hash: &str) -> Result<()> {
        let mut t = self.write()?;
        if !t.users.contains_key(&user_id) {
            return Err(Error::not_found("User", user_id));
        }
        t.tokens.insert(token_hash.to_string(), user_id);
        Ok(())
    }

    async fn resolve_token(&self, token_hash: &str) -> Result<Option<User>> {
        let t = self.read()?;
        Ok(t.tokens
            .get(token_hash)
            .and_then(|id| t.users.get(id))
            .cloned())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut t = self.write()?;
        if t.users.remove(&id).is_none() {
            return Err(Error::not_found("User", id));
        }
        t.tokens.retain(|_, owner| *owner != id);
        t.brands.retain(|_, b| b.user_id != id);
        t.units.retain(|_, u| u.user_id != id);
        let owned: Vec<i64> = t
            .recipes
            .values()
            .filter(|r| r.user_id == id)
            .map(|r| r.id)
            .collect();
        for recipe_id in owned {
            t.remove_recipe(recipe_id);
        }
        Ok(())
    }
}

// =============================================================================
// BRANDS AND UNITS
// =============================================================================

#[async_trait]
impl BrandRepository for MemoryStore {
    async fn create(&self, user_id: i64, name: &str) -> Result<Brand> {
        let mut t = self.write()?;
        if t.brands
            .values()
            .any(|b| b.user_id == user_id && b.name == name)
        {
            return Err(Error::Conflict(format!("Brand '{}' already exists", name)));
        }
        let brand = Brand {
            id: t.next_id(),
            name: name.to_string(),
            user_id,
        };
        t.brands.insert(brand.id, brand.clone());
        Ok(brand)
    }

    async fn list(&self, user_id: i64) -> Result<Vec<Brand>> {
        let mut brands: Vec<Brand> = self
            .read()?
            .brands
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        brands.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(brands)
    }

    async fn get(&self, user_id: i64, id: i64) -> Result<Brand> {
        self.read()?
            .brands
            .get(&id)
            .filter(|b| b.user_id == user_id)
            .cloned()
            .ok_or_else(|| Error::not_found("Brand", id))
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let mut t = self.write()?;
        match t.brands.get(&id) {
            Some(b) if b.user_id == user_id => {
                t.brands.remove(&id);
                Ok(())
            }
            _ => Err(Error::not_found("Brand", id)),
        }
    }
}

#[async_trait]
impl UnitRepository for MemoryStore {
    async fn create(&self, user_id: i64, name: &str) -> Result<Unit> {
        let mut t = self.write()?;
        if t.units
            .values()
            .any(|u| u.user_id == user_id && u.name == name)
        {
            return Err(Error::Conflict(format!("Unit '{}' already exists", name)));
        }
        let unit = Unit {
            id: t.next_id(),
            name: name.to_string(),
            user_id,
        };
        t.units.insert(unit.id, unit.clone());
        Ok(unit)
    }

    async fn list(&self, user_id: i64) -> Result<Vec<Unit>> {
        let mut units: Vec<Unit> = self
            .read()?
            .units
            .values()
            .filter(|u| u.user_id == user_id)
            .cloned()
            .collect();
        units.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(units)
    }

    async fn search(&self, user_id: i64, term: &str, limit: i64) -> Result<Vec<Unit>> {
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let needle = term.to_lowercase();
        let mut units: Vec<Unit> = self
            .read()?
            .units
            .values()
            .filter(|u| u.user_id == user_id && u.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        units.sort_by(|a, b| {
            a.name
                .chars()
                .count()
                .cmp(&b.name.chars().count())
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
                .then_with(|| a.name.cmp(&b.name))
                .then(a.id.cmp(&b.id))
        });
        units.truncate(limit.max(0) as usize);
        Ok(units)
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let mut t = self.write()?;
        match t.units.get(&id) {
            Some(u) if u.user_id == user_id => {
                t.units.remove(&id);
                Ok(())
            }
            _ => Err(Error::not_found("Unit", id)),
        }
    }
}

// =============================================================================
// RECIPES
// =============================================================================

#[async_trait]
impl RecipeRepository for MemoryStore {
    async fn create(&self, user_id: i64, req: CreateRecipeRequest) -> Result<i64> {
        let mut t = self.write()?;
        let now = Utc::now();
        let recipe = Recipe {
            id: t.next_id(),
            title: req.title,
            notes: req.notes.unwrap_or_default(),
            rating: req.rating,
            servings: req.servings,
            user_id,
            created_at_utc: now,
            updated_at_utc: now,
        };
        let id = recipe.id;
        t.recipes.insert(id, recipe);
        Ok(id)
    }

    async fn get(&self, user_id: i64, id: i64) -> Result<Recipe> {
        self.read()?.owned_recipe(user_id, id).cloned()
    }

    async fn get_detail(&self, user_id: i64, id: i64) -> Result<RecipeDetail> {
        let t = self.read()?;
        let recipe = t.owned_recipe(user_id, id)?.clone();
        Ok(RecipeDetail {
            recipe,
            equipment: t
                .equipment
                .values()
                .filter(|e| e.recipe_id == id)
                .cloned()
                .collect(),
            tags: t.tags.values().filter(|g| g.recipe_id == id).cloned().collect(),
            times: t.times.values().filter(|m| m.recipe_id == id).cloned().collect(),
        })
    }

    async fn list(&self, user_id: i64) -> Result<Vec<Recipe>> {
        let mut recipes: Vec<Recipe> = self
            .read()?
            .recipes
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        recipes.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(recipes)
    }

    async fn update(&self, user_id: i64, id: i64, req: UpdateRecipeRequest) -> Result<()> {
        let mut t = self.write()?;
        let recipe = t
            .recipes
            .get_mut(&id)
            .filter(|r| r.user_id == user_id)
            .ok_or_else(|| Error::not_found("Recipe", id))?;
        req.apply_to(recipe);
        recipe.updated_at_utc = Utc::now();
        Ok(())
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let mut t = self.write()?;
        t.owned_recipe(user_id, id)?;
        t.remove_recipe(id);
        Ok(())
    }
}

// =============================================================================
// RECIPE COMPONENTS
// =============================================================================

#[async_trait]
impl EquipmentRepository for MemoryStore {
    async fn create(
        &self,
        user_id: i64,
        recipe_id: i64,
        req: CreateEquipmentRequest,
    ) -> Result<i64> {
        let mut t = self.write()?;
        t.owned_recipe(user_id, recipe_id)?;
        let id = t.next_id();
        t.equipment.insert(
            id,
            Equipment {
                id,
                description: req.description,
                recipe_id,
            },
        );
        Ok(id)
    }

    async fn list_for_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Vec<Equipment>> {
        let t = self.read()?;
        t.owned_recipe(user_id, recipe_id)?;
        Ok(t.equipment
            .values()
            .filter(|e| e.recipe_id == recipe_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let mut t = self.write()?;
        let owned = t
            .equipment
            .get(&id)
            .is_some_and(|e| t.owns_recipe(user_id, e.recipe_id));
        if !owned {
            return Err(Error::not_found("Equipment", id));
        }
        t.equipment.remove(&id);
        Ok(())
    }

    async fn search(&self, user_id: i64, term: &str, limit: i64) -> Result<Vec<String>> {
        if term.is_empty() {
            return Ok(Vec::new());
        }
        let t = self.read()?;
        let descriptions: BTreeSet<&str> = t
            .equipment
            .values()
            .filter(|e| t.owns_recipe(user_id, e.recipe_id))
            .map(|e| e.description.as_str())
            .collect();
        Ok(autocomplete(descriptions, term, limit)
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn create(&self, user_id: i64, recipe_id: i64, req: CreateTagRequest) -> Result<i64> {
        let mut t = self.write()?;
        t.owned_recipe(user_id, recipe_id)?;
        let id = t.next_id();
        t.tags.insert(
            id,
            Tag {
                id,
                name: req.name,
                recipe_id,
            },
        );
        Ok(id)
    }

    async fn list_for_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Vec<Tag>> {
        let t = self.read()?;
        t.owned_recipe(user_id, recipe_id)?;
        Ok(t.tags
            .values()
            .filter(|g| g.recipe_id == recipe_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let mut t = self.write()?;
        let owned = t
            .tags
            .get(&id)
            .is_some_and(|g| t.owns_recipe(user_id, g.recipe_id));
        if !owned {
            return Err(Error::not_found("Tag", id));
        }
        t.tags.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl TimeRepository for MemoryStore {
    async fn create(&self, user_id: i64, recipe_id: i64, req: CreateTimeRequest) -> Result<i64> {
        let mut t = self.write()?;
        t.owned_recipe(user_id, recipe_id)?;
        let id = t.next_id();
        t.times.insert(
            id,
            Time {
                id,
                category: req.category,
                days: req.days,
                hours: req.hours,
                minutes: req.minutes,
                note: req.note.unwrap_or_default(),
                recipe_id,
            },
        );
        Ok(id)
    }

    async fn list_for_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Vec<Time>> {
        let t = self.read()?;
        t.owned_recipe(user_id, recipe_id)?;
        Ok(t.times
            .values()
            .filter(|m| m.recipe_id == recipe_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let mut t = self.write()?;
        let owned = t
            .times
            .get(&id)
            .is_some_and(|m| t.owns_recipe(user_id, m.recipe_id));
        if !owned {
            return Err(Error::not_found("Time", id));
        }
        t.times.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl DirectionRepository for MemoryStore {
    async fn create(
        &self,
        user_id: i64,
        recipe_id: i64,
        req: CreateDirectionRequest,
    ) -> Result<i64> {
        let mut t = self.write()?;
        t.owned_recipe(user_id, recipe_id)?;
        let id = t.next_id();
        t.directions.insert(
            id,
            Direction {
                id,
                description: req.description,
                recipe_id,
            },
        );
        Ok(id)
    }

    async fn list_for_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Vec<Direction>> {
        let t = self.read()?;
        t.owned_recipe(user_id, recipe_id)?;
        Ok(t.directions
            .values()
            .filter(|d| d.recipe_id == recipe_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<()> {
        let mut t = self.write()?;
        let owned = t
            .directions
            .get(&id)
            .is_some_and(|d| t.owns_recipe(user_id, d.recipe_id));
        if !owned {
            return Err(Error::not_found("Direction", id));
        }
        t.directions.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autocomplete_orders_by_length_then_name() {
        let names = ["Tablespoon", "tbsp", "Cup", "cupful", "Teaspoon"];
        let matches = autocomplete(names.iter().copied(), "SP", 10);
        assert_eq!(matches, vec!["tbsp", "Teaspoon", "Tablespoon"]);
    }

    #[test]
    fn test_autocomplete_ties_ignore_case() {
        let names = ["Cup", "bUp", "aup", "cup"];
        let matches = autocomplete(names.iter().copied(), "up", 10);
        assert_eq!(matches, vec!["aup", "bUp", "Cup", "cup"]);
    }

    #[tokio::test]
    async fn test_unit_search_ties_ignore_case() {
        let store = MemoryStore::new();
        let user = UserRepository::create(&store, "cook", "hash", "token")
            .await
            .unwrap();
        for name in ["Cup", "bUp", "aup"] {
            UnitRepository::create(&store, user.id, name).await.unwrap();
        }
        let names: Vec<String> = UnitRepository::search(&store, user.id, "UP", 10)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["aup", "bUp", "Cup"]);
    }

    #[test]
    fn test_autocomplete_truncates() {
        let names = ["a1", "a22", "a333"];
        assert_eq!(autocomplete(names.iter().copied(), "a", 2), vec!["a1", "a22"]);
        assert!(autocomplete(names.iter().copied(), "a", 0).is_empty());
    }

    #[tokio::test]
    async fn test_ids_are_unique_across_tables() {
        let store = MemoryStore::new();
        let user = UserRepository::create(&store, "cook", "hash", "token")
            .await
            .unwrap();
        let brand = BrandRepository::create(&store, user.id, "Acme").await.unwrap();
        let unit = UnitRepository::create(&store, user.id, "Cup").await.unwrap();
        assert_ne!(user.id, brand.id);
        assert_ne!(brand.id, unit.id);
    }

    #[tokio::test]
    async fn test_clones_share_tables() {
        let store = MemoryStore::new();
        let other = store.clone();
        let user = UserRepository::create(&store, "cook", "hash", "token")
            .await
            .unwrap();
        let found = UserRepository::get(&other, user.id).await.unwrap();
        assert_eq!(found, Some(user));
    }
}

use crate::utils::error::{RecipeError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};

pub const INGREDIENT_FORMAT_ERROR: &str = "Wrong ingredient format! Please use the correct format :)";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub quantity: Option<f64>,
    pub unit: String,
    pub description: String,
}

impl Ingredient {
    /// Parses a form entry of the shape `quantity,unit,description`.
    pub fn parse_entry(entry: &str) -> Result<Self> {
        let parts: Vec<&str> = entry.split(',').map(str::trim).collect();
        let [quantity, unit, description] = parts.as_slice() else {
            return Err(RecipeError::validation(INGREDIENT_FORMAT_ERROR));
        };

        let quantity = if quantity.is_empty() {
            None
        } else {
            let value: f64 = quantity
                .parse()
                .map_err(|_| RecipeError::validation(INGREDIENT_FORMAT_ERROR))?;
            validation::validate_quantity(value)
                .map_err(|_| RecipeError::validation(INGREDIENT_FORMAT_ERROR))?;
            Some(value)
        };

        Ok(Self {
            quantity,
            unit: unit.to_string(),
            description: description.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub source_url: String,
    pub image_url: String,
    pub servings: u32,
    pub cooking_time: u32,
    pub ingredients: Vec<Ingredient>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub bookmarked: bool,
}

impl Recipe {
    pub fn preview(&self) -> RecipePreview {
        RecipePreview {
            id: self.id.clone(),
            title: self.title.clone(),
            publisher: self.publisher.clone(),
            image_url: self.image_url.clone(),
            key: self.key.clone(),
        }
    }

    pub(crate) fn scale_servings(&mut self, new_servings: u32) {
        if self.servings == 0 {
            self.servings = new_servings;
            return;
        }
        let factor = f64::from(new_servings) / f64::from(self.servings);
        for ingredient in &mut self.ingredients {
            if let Some(quantity) = ingredient.quantity.as_mut() {
                *quantity *= factor;
            }
        }
        self.servings = new_servings;
    }
}

/// One entry of a search result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipePreview {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Payload of the add-recipe form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub title: String,
    pub source_url: String,
    pub image_url: String,
    pub publisher: String,
    pub cooking_time: u32,
    pub servings: u32,
    /// Raw `quantity,unit,description` entries; blank entries are ignored.
    #[serde(default)]
    pub ingredients: Vec<String>,
}

impl NewRecipe {
    pub fn parse_ingredients(&self) -> Result<Vec<Ingredient>> {
        self.ingredients
            .iter()
            .filter(|entry| !entry.trim().is_empty())
            .map(|entry| Ingredient::parse_entry(entry))
            .collect()
    }

    /// Ingredients are checked first so a malformed entry gets the format message.
    pub fn into_draft(self) -> Result<RecipeDraft> {
        let ingredients = self.parse_ingredients()?;
        self.validate()?;
        Ok(RecipeDraft {
            title: self.title,
            source_url: self.source_url,
            image_url: self.image_url,
            publisher: self.publisher,
            cooking_time: self.cooking_time,
            servings: self.servings,
            ingredients,
        })
    }
}

impl Validate for NewRecipe {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("title", &self.title)
            .and_then(|_| validation::validate_non_empty_string("publisher", &self.publisher))
            .and_then(|_| validation::validate_url("sourceUrl", &self.source_url))
            .and_then(|_| validation::validate_url("image", &self.image_url))
            .and_then(|_| validation::validate_range("cookingTime", self.cooking_time, 1, 24 * 60))
            .map_err(validation::as_input_error)?;
        validation::validate_servings(self.servings)
    }
}

/// Body sent to the API when creating a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub title: String,
    pub source_url: String,
    pub image_url: String,
    pub publisher: String,
    pub cooking_time: u32,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<RecipePreview>,
    pub page: usize,
    pub results_per_page: usize,
}

impl SearchState {
    pub fn new(results_per_page: usize) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            page: 1,
            results_per_page: results_per_page.max(1),
        }
    }

    pub fn num_pages(&self) -> usize {
        self.results.len().div_ceil(self.results_per_page).max(1)
    }

    pub fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.num_pages())
    }

    pub fn page_slice(&self, page: usize) -> &[RecipePreview] {
        let page = self.clamp_page(page);
        let start = ((page - 1) * self.results_per_page).min(self.results.len());
        let end = (page * self.results_per_page).min(self.results.len());
        &self.results[start..end]
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.num_pages()
    }
}

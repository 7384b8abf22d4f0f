use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One recipe, as exported by Mela, with its date converted to UTC.
///
/// Field order here is the field order of written JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Link without its protocol when the link is a URL, otherwise a UUID.
    /// Assigned by Mela; passed through untouched.
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, rename = "yield", skip_serializing_if = "Option::is_none")]
    pub recipe_yield: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<String>,
    /// Also shown as "source" in Mela; a URL or plain text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<String>,
    /// Tags, in the order Mela lists them.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub want_to_cook: bool,
    #[serde(default)]
    pub favorite: bool,
    /// Keys not modelled above, kept as found.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A `.melarecipe` document as stored on disk: a [`Recipe`] whose date is
/// still a raw Swift time interval.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawRecipe {
    pub id: String,
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, rename = "yield")]
    pub recipe_yield: Option<String>,
    #[serde(default)]
    pub cook_time: Option<String>,
    #[serde(default)]
    pub prep_time: Option<String>,
    #[serde(default)]
    pub total_time: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub nutrition: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub want_to_cook: bool,
    #[serde(default)]
    pub favorite: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawRecipe {
    /// Attach the converted date, consuming the raw document.
    pub(crate) fn into_recipe(self, date: DateTime<Utc>) -> Recipe {
        Recipe {
            id: self.id,
            date,
            images: self.images,
            title: self.title,
            recipe_yield: self.recipe_yield,
            cook_time: self.cook_time,
            prep_time: self.prep_time,
            total_time: self.total_time,
            link: self.link,
            text: self.text,
            ingredients: self.ingredients,
            instructions: self.instructions,
            notes: self.notes,
            nutrition: self.nutrition,
            categories: self.categories,
            want_to_cook: self.want_to_cook,
            favorite: self.favorite,
            extra: self.extra,
        }
    }
}

/// What a Mela export file decodes to.
#[derive(Debug, Clone, PartialEq)]
pub enum RecipeFile {
    /// A `.melarecipe` document.
    Single(Recipe),
    /// A `.melarecipes` archive, in archive order.
    Collection(Vec<Recipe>),
}

impl RecipeFile {
    pub fn len(&self) -> usize {
        match self {
            RecipeFile::Single(_) => 1,
            RecipeFile::Collection(recipes) => recipes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into a list, regardless of which kind of file it came from.
    pub fn into_recipes(self) -> Vec<Recipe> {
        match self {
            RecipeFile::Single(recipe) => vec![recipe],
            RecipeFile::Collection(recipes) => recipes,
        }
    }
}

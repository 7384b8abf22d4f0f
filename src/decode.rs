use serde_json::Value;

use crate::date;
use crate::error::ParseError;
use crate::recipe::{RawRecipe, Recipe};

/// Decode one `.melarecipe` document.
pub fn decode_recipe(text: &str) -> Result<Recipe, ParseError> {
    let raw: RawRecipe = serde_json::from_str(text)?;
    finish(raw)
}

/// Decode one `.melarecipe` document from raw bytes (must be UTF-8 JSON).
pub fn decode_recipe_slice(bytes: &[u8]) -> Result<Recipe, ParseError> {
    let raw: RawRecipe = serde_json::from_slice(bytes)?;
    finish(raw)
}

fn finish(mut raw: RawRecipe) -> Result<Recipe, ParseError> {
    let interval = match raw.date.take() {
        None | Some(Value::Null) => return Err(ParseError::MissingDate),
        Some(value) => value,
    };
    let date = interval
        .as_f64()
        .and_then(date::time_interval_to_date)
        .ok_or(ParseError::InvalidDate(interval))?;
    Ok(raw.into_recipe(date))
}


#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_decode_banana_bread() {
        let recipe = decode_recipe(fixtures::BANANA_BREAD).unwrap();
        assert_eq!(recipe.id, "www.bonappetit.com/recipe/banana-bread");
        assert_eq!(recipe.title.as_deref(), Some("Banana Bread"));
        assert_eq!(
            recipe.link.as_deref(),
            Some("https://www.bonappetit.com/recipe/banana-bread")
        );
        assert_eq!(recipe.categories, vec!["Baking", "Breakfast"]);
        assert_eq!(recipe.recipe_yield.as_deref(), Some("1 loaf"));
        assert!(recipe.images[0].starts_with("/9j/4AAQSkZJRg"));
        assert!(recipe.favorite);
        assert!(!recipe.want_to_cook);
        let expected = Utc.with_ymd_and_hms(2021, 9, 7, 12, 0, 0).unwrap();
        assert_eq!(recipe.date, expected);
        assert!(recipe.extra.is_empty());
    }

    #[test]
    fn test_decode_slice_matches_str() {
        let a = decode_recipe(fixtures::BANANA_BREAD).unwrap();
        let bytes = fixtures::BANANA_BREAD.as_bytes();
        let b = decode_recipe_slice(bytes).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fractional_and_negative_dates() {
        let recipe = decode_recipe(&fixtures::minimal("a", -86_400.5)).unwrap();
        let expected = date::REFERENCE_EPOCH_MILLIS - 86_400_500;
        assert_eq!(recipe.date.timestamp_millis(), expected);
    }

    #[test]
    fn test_missing_date() {
        let err = decode_recipe(r#"{"id":"x","title":"t"}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingDate));

        let err = decode_recipe(r#"{"id":"x","date":null}"#).unwrap_err();
        assert!(matches!(err, ParseError::MissingDate));
    }

    #[test]
    fn test_non_numeric_date() {
        let err = decode_recipe(r#"{"id":"x","date":"soon"}"#).unwrap_err();
        match err {
            ParseError::InvalidDate(value) => assert_eq!(value, "soon"),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_invalid_json() {
        let err = decode_recipe("{not json").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));

        let err = decode_recipe("[]").unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));

        // id is required
        let err = decode_recipe(r#"{"date":0}"#).unwrap_err();
        assert!(matches!(err, ParseError::Json(_)));
    }
}

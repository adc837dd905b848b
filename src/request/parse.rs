use serde_json::{Map, Value};
use strsim::jaro_winkler;
use tracing::warn;

use crate::error::{MealError, Result};
use crate::models::{AdjustmentRequest, MealItem, Nutrient, NutrientProfile};
use crate::optimizer::constants::NAME_KEY_SIMILARITY;

const REQUEST: &str = "request";
const TARGET: &str = "target";

/// Build a validated request from a JSON document.
///
/// `food_items` may sit at the top level or under `meal`. Every problem is
/// reported before any optimization runs.
pub fn parse_request(document: &Value) -> Result<AdjustmentRequest> {
    let root = as_object(document, REQUEST, REQUEST)?;

    let target_value = present(root, TARGET, REQUEST)?;
    let target = parse_target(target_value)?;

    let meal = root.get("meal").and_then(Value::as_object);
    let items_value = root
        .get("food_items")
        .or_else(|| meal.and_then(|m| m.get("food_items")))
        .ok_or_else(|| MealError::missing("food_items", REQUEST))?;

    let items = items_value
        .as_array()
        .ok_or_else(|| MealError::invalid("food_items", REQUEST, "expected a list"))?
        .iter()
        .enumerate()
        .map(|(index, value)| parse_item(value, index))
        .collect::<Result<Vec<_>>>()?;

    let meal_name = meal
        .and_then(|m| m.get("meal_name"))
        .or_else(|| root.get("meal_name"))
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(AdjustmentRequest {
        meal_name,
        target,
        items,
    })
}

/// Parse a target profile. Targets may be zero but never negative.
pub fn parse_target(value: &Value) -> Result<NutrientProfile> {
    let object = as_object(value, TARGET, REQUEST)?;
    let profile = parse_profile(object, TARGET)?;
    Ok(profile)
}

/// Parse a single food item; `index` only feeds error locations.
pub fn parse_item(value: &Value, index: usize) -> Result<MealItem> {
    let location = format!("food_items[{}]", index);
    let object = as_object(value, "food_item", &location)?;

    let name = resolve_name(object, &location)?;
    let quantity = parse_quantity(present(object, "quantity", &location)?, &location)?;
    let nutrients = parse_profile(object, &location)?;

    Ok(MealItem::new(name, quantity, nutrients))
}

fn parse_profile(object: &Map<String, Value>, location: &str) -> Result<NutrientProfile> {
    let mut profile = NutrientProfile::default();
    for nutrient in Nutrient::ALL {
        let key = nutrient.key();
        let value = present(object, key, location)?
            .as_f64()
            .ok_or_else(|| MealError::invalid(key, location, "expected a number"))?;
        if !value.is_finite() || value < 0.0 {
            return Err(MealError::invalid(
                key,
                location,
                format!("must be a non-negative number, got {}", value),
            ));
        }
        *profile.get_mut(nutrient) = value;
    }
    Ok(profile)
}

/// Quantities arrive as numbers or numeric strings.
fn parse_quantity(value: &Value, location: &str) -> Result<f64> {
    let quantity = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| MealError::invalid("quantity", location, "not representable"))?,
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| {
            MealError::invalid("quantity", location, format!("'{}' is not a number", s))
        })?,
        _ => {
            return Err(MealError::invalid(
                "quantity",
                location,
                "expected a number or numeric string",
            ));
        }
    };

    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(MealError::invalid(
            "quantity",
            location,
            format!("must be positive, got {}", quantity),
        ));
    }
    Ok(quantity)
}

/// Read `name`, falling back to a near-miss key such as `mame`.
fn resolve_name(object: &Map<String, Value>, location: &str) -> Result<String> {
    if let Some(value) = object.get("name") {
        return value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| MealError::invalid("name", location, "expected a string"));
    }

    let fallback = object
        .iter()
        .filter(|(key, value)| value.is_string() && !is_known_key(key))
        .map(|(key, value)| (key, value, jaro_winkler(&key.to_lowercase(), "name")))
        .filter(|(_, _, similarity)| *similarity >= NAME_KEY_SIMILARITY)
        .max_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal));

    match fallback {
        Some((key, value, _)) => {
            warn!(%location, %key, "no `name` field; using similar key");
            Ok(value.as_str().unwrap_or_default().to_string())
        }
        None => Ok(String::new()),
    }
}

fn is_known_key(key: &str) -> bool {
    key == "quantity" || Nutrient::ALL.iter().any(|n| n.key() == key)
}

fn present<'a>(object: &'a Map<String, Value>, field: &str, location: &str) -> Result<&'a Value> {
    match object.get(field) {
        Some(Value::Null) | None => Err(MealError::missing(field, location)),
        Some(value) => Ok(value),
    }
}

fn as_object<'a>(value: &'a Value, field: &str, location: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| MealError::invalid(field, location, "expected an object"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> Value {
        json!({
            "target": {"calorie": 2504.0, "protein": 210.0, "fats": 75.0, "carbs": 469.0},
            "food_items": [
                {"name": "Beef", "quantity": 150, "protein": 39.0, "carbs": 0.0, "fats": 15.0, "calorie": 300.0},
                {"name": "Rice", "quantity": "200", "protein": 5.4, "carbs": 56.0, "fats": 0.6, "calorie": 260.0}
            ]
        })
    }

    #[test]
    fn test_parse_top_level_items() {
        let request = parse_request(&sample_document()).unwrap();
        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[1].quantity, 200.0);
        assert_eq!(request.target.calorie, 2504.0);
        assert!(request.meal_name.is_none());
    }

    #[test]
    fn test_parse_nested_meal() {
        let document = json!({
            "target": {"calorie": 2504.0, "protein": 210.0, "fats": 75.0, "carbs": 469.0},
            "meal": {
                "meal_name": "Lean Beef and Jasmine Rice Bowl",
                "food_items": [
                    {"name": "TEST FOOD", "quantity": 1.0, "protein": 1.0, "carbs": 0.0, "fats": 0.0, "calorie": 4.0}
                ]
            }
        });
        let request = parse_request(&document).unwrap();
        assert_eq!(
            request.meal_name.as_deref(),
            Some("Lean Beef and Jasmine Rice Bowl")
        );
        assert_eq!(request.items[0].name, "TEST FOOD");
    }

    #[test]
    fn test_missing_target() {
        let mut document = sample_document();
        document.as_object_mut().unwrap().remove("target");
        match parse_request(&document) {
            Err(MealError::MissingField { field, location }) => {
                assert_eq!(field, "target");
                assert_eq!(location, "request");
            }
            other => panic!("expected missing field, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_item_nutrient_names_index() {
        let mut document = sample_document();
        document["food_items"][1]
            .as_object_mut()
            .unwrap()
            .remove("fats");
        match parse_request(&document) {
            Err(MealError::MissingField { field, location }) => {
                assert_eq!(field, "fats");
                assert_eq!(location, "food_items[1]");
            }
            other => panic!("expected missing field, got {:?}", other),
        }
    }

    #[test]
    fn test_null_counts_as_missing() {
        let mut document = sample_document();
        document["target"]["protein"] = Value::Null;
        assert!(matches!(
            parse_request(&document),
            Err(MealError::MissingField { .. })
        ));
    }

    #[test]
    fn test_wrong_type_is_invalid() {
        let mut document = sample_document();
        document["food_items"][0]["protein"] = json!("lots");
        assert!(matches!(
            parse_request(&document),
            Err(MealError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_bad_quantities() {
        for bad in [json!(0), json!(-2.0), json!("abc"), json!(true)] {
            let mut document = sample_document();
            document["food_items"][0]["quantity"] = bad;
            assert!(matches!(
                parse_request(&document),
                Err(MealError::InvalidField { .. })
            ));
        }
    }

    #[test]
    fn test_negative_target_rejected() {
        let mut document = sample_document();
        document["target"]["carbs"] = json!(-1.0);
        assert!(parse_request(&document).is_err());
    }

    #[test]
    fn test_zero_target_accepted() {
        let mut document = sample_document();
        document["target"]["protein"] = json!(0);
        let request = parse_request(&document).unwrap();
        assert_eq!(request.target.protein, 0.0);
    }

    #[test]
    fn test_misspelled_name_key() {
        let item = json!({"mame": "Avocado", "quantity": 1, "protein": 2.0, "carbs": 9.0, "fats": 15.0, "calorie": 160.0});
        let parsed = parse_item(&item, 0).unwrap();
        assert_eq!(parsed.name, "Avocado");
    }

    #[test]
    fn test_missing_name_is_empty() {
        let item = json!({"quantity": 1, "protein": 2.0, "carbs": 9.0, "fats": 15.0, "calorie": 160.0, "unit": "each"});
        let parsed = parse_item(&item, 0).unwrap();
        assert_eq!(parsed.name, "");
    }

    #[test]
    fn test_missing_food_items() {
        let document = json!({"target": {"calorie": 1.0, "protein": 1.0, "fats": 1.0, "carbs": 1.0}});
        match parse_request(&document) {
            Err(MealError::MissingField { field, .. }) => assert_eq!(field, "food_items"),
            other => panic!("expected missing field, got {:?}", other),
        }
    }
}

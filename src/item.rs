use serde::{Deserialize, Serialize};
use crate::{CatalogError, Result};

/// A single catalog record. `name` is the unique key, `price` is never negative.
///
/// The serialized form, `{"name": .., "price": ..}`, is used both for HTTP response bodies and
/// for the documents kept by every store engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// the unique name of the item
    pub name: String,
    /// the item's price
    pub price: f64,
}

impl Item {
    /// builder method to construct a new `Item`
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Item { name: name.into(), price }
    }
}

/// The query string parameters accepted by the catalog routes.
///
/// Both fields are kept as raw strings so that validation errors can be reported with the
/// catalog's own messages instead of a generic extractor rejection. When a parameter is
/// repeated only its first value counts, other parameters are ignored.
#[derive(Debug, Default)]
pub struct ItemQuery {
    /// the `item` parameter, i.e. the item name
    pub item: Option<String>,
    /// the `price` parameter, as sent by the caller
    pub price: Option<String>,
}

impl ItemQuery {
    /// returns the item name, or [`CatalogError::MissingParam`] if it is absent or blank
    pub fn name(&self) -> Result<&str> {
        match self.item.as_deref() {
            Some(name) if !name.trim().is_empty() => Ok(name),
            _ => Err(CatalogError::MissingParam("item")),
        }
    }

    /// returns the parsed price parameter, see [`parse_price`]
    pub fn price(&self) -> Result<f64> {
        match self.price.as_deref() {
            Some(raw) => parse_price(raw),
            None => Err(CatalogError::MissingParam("price")),
        }
    }
}

impl FromIterator<(String, String)> for ItemQuery {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut query = ItemQuery::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "item" => &mut query.item,
                "price" => &mut query.price,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }
}

/// parses a price from its string form
///
/// # Errors
/// returns [`CatalogError::InvalidPrice`] if `raw` is not a number, or is negative, NaN or
/// infinite
pub fn parse_price(raw: &str) -> Result<f64> {
    let price: f64 = raw
        .trim()
        .parse()
        .map_err(|e| CatalogError::InvalidPrice(format!("{:?} is not a number ({})", raw, e)))?;

    if !price.is_finite() {
        return Err(CatalogError::InvalidPrice(format!("{} is not a finite number", raw)));
    }
    if price < 0.0 {
        return Err(CatalogError::InvalidPrice(format!("{} is negative", raw)));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn parses_plain_prices() {
        assert_eq!(parse_price("9.99").unwrap(), 9.99);
        assert_eq!(parse_price(" 0 ").unwrap(), 0.0);
        assert_eq!(parse_price("12").unwrap(), 12.0);
    }

    #[test]
    fn rejects_bad_prices() {
        for raw in ["", "abc", "-1", "NaN", "inf", "1,5"] {
            let err = parse_price(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "{:?} should be rejected", raw);
        }
    }

    #[test]
    fn blank_names_are_missing() {
        let query = ItemQuery { item: Some("   ".into()), price: None };
        assert!(matches!(query.name(), Err(CatalogError::MissingParam("item"))));
        assert!(matches!(query.price(), Err(CatalogError::MissingParam("price"))));
    }

    #[test]
    fn names_are_kept_exactly_as_given() {
        let query = ItemQuery { item: Some(" Widget ".into()), price: None };
        assert_eq!(query.name().unwrap(), " Widget ");
    }

    #[test]
    fn first_value_of_a_repeated_parameter_wins() {
        let query: ItemQuery = [("item", "a"), ("color", "red"), ("item", "b"), ("price", "2")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(query.name().unwrap(), "a");
        assert_eq!(query.price().unwrap(), 2.0);
    }

    #[test]
    fn item_serializes_as_name_and_price() {
        let json = serde_json::to_string(&Item::new("Widget", 9.99)).unwrap();
        assert_eq!(json, r#"{"name":"Widget","price":9.99}"#);
    }
}

//! Record-to-item transformation
//!
//! Turns one resource record into a Collection+JSON item: the identity
//! field's value becomes the item href, relation fields become item links,
//! and every remaining field lands in the data list with its value carried
//! verbatim.

use serde_json::Value;

use crate::render::classifier::Classification;
use crate::types::{Attribute, Item, Link};

/// Transform one record into an item.
///
/// Data entries keep the record's own field order; links follow the
/// schema's declared order. A record that is not a JSON object produces an
/// item with no href, no data, and no links, since there are no fields to
/// transform.
pub fn transform_record(record: Value, classification: &Classification) -> Item {
    let map = match record {
        Value::Object(map) => map,
        other => {
            log::warn!(
                "expected a JSON object for an item record, got {}",
                json_kind(&other)
            );
            return Item {
                href: None,
                data: Vec::new(),
                links: Vec::new(),
            };
        }
    };

    let href = classification
        .identity
        .as_deref()
        .and_then(|name| map.get(name))
        .and_then(href_text);

    let mut links = Vec::new();
    for relation in &classification.relations {
        let value = match map.get(&relation.name) {
            Some(value) => value,
            None => continue,
        };
        match value {
            Value::Null => {}
            Value::String(target) => links.push(Link::new(&relation.name, target)),
            Value::Array(targets) => {
                if !relation.many {
                    log::warn!(
                        "field '{}' is declared single-valued but carried {} hrefs",
                        relation.name,
                        targets.len()
                    );
                }
                links.extend(
                    targets
                        .iter()
                        .filter_map(href_text)
                        .map(|target| Link::new(&relation.name, target)),
                );
            }
            other => {
                if let Some(target) = href_text(other) {
                    links.push(Link::new(&relation.name, target));
                }
            }
        }
    }

    let data = map
        .into_iter()
        .filter(|(name, _)| !classification.is_identity(name) && !classification.is_relation(name))
        .map(|(name, value)| Attribute { name, value })
        .collect();

    Item { href, data, links }
}

/// Coerce a field value into href text.
///
/// Strings pass through unchanged and null yields nothing. Any other value
/// is rendered as compact JSON so a numeric id still produces a usable
/// href instead of being dropped.
fn href_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(href) => Some(href.clone()),
        other => serde_json::to_string(other).ok(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

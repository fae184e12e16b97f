//! Collection assembly
//!
//! Builds the full envelope for one response: picks the collection shape
//! from the payload variant, places pagination cursors and service-index
//! entries as top-level links, and delegates record transformation to the
//! item transformer.
//!
//! Copyright (c) 2026 Collectra Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;

use crate::render::classifier::classify;
use crate::render::item::transform_record;
use crate::types::{Document, ErrorObject, Link, Payload, ResourceSchema};

/// Assemble the document for one payload.
///
/// `href` is the effective request URL the envelope carries. When no
/// schema is supplied every record field renders as plain data, so items
/// come out with no href and no links.
pub fn assemble(href: &str, schema: Option<&ResourceSchema>, payload: Payload) -> Document {
    let mut document = Document::new(href);
    let collection = &mut document.collection;
    let classification = schema.map(classify).unwrap_or_default();

    match payload {
        Payload::Record(record) => {
            collection.items.push(transform_record(record, &classification));
        }
        Payload::List(records) => {
            collection.items = records
                .into_iter()
                .map(|record| transform_record(record, &classification))
                .collect();
        }
        Payload::Page(page) => {
            if let Some(next) = page.next {
                collection.links.push(Link::next(next));
            }
            if let Some(previous) = page.previous {
                collection.links.push(Link::previous(previous));
            }
            collection.items = page
                .results
                .into_iter()
                .map(|record| transform_record(record, &classification))
                .collect();
        }
        Payload::Index(listing) => {
            for (rel, target) in listing {
                match target {
                    Value::String(target) => collection.links.push(Link::new(rel, target)),
                    _ => log::warn!("service index entry '{}' is not a URL string, skipped", rel),
                }
            }
        }
        Payload::Fault(fault) => {
            collection.error = ErrorObject::message(fault.message);
        }
        // The emitter short-circuits before assembly; an explicit call
        // still gets a well-formed empty envelope.
        Payload::Empty => {}
    }

    document
}

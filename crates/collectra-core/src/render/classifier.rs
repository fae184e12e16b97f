//! Field classification for item rendering
//!
//! Splits a resource schema into the single field that supplies the item
//! href and the ordered set of fields that render as item links. Plain
//! fields are left alone; the item transformer treats every record field
//! the classifier did not claim as data.

use crate::types::{FieldKind, ResourceSchema};

/// A link-producing field picked out by the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationField {
    /// Field name as it appears in the record
    pub name: String,

    /// True when the field's value carries many hrefs
    pub many: bool,
}

/// The classifier's verdict on one schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Name of the field whose value becomes the item href, if any
    pub identity: Option<String>,

    /// Link-producing fields, in declared order
    pub relations: Vec<RelationField>,
}

impl Classification {
    /// True when `name` is the identity field.
    pub fn is_identity(&self, name: &str) -> bool {
        self.identity.as_deref() == Some(name)
    }

    /// True when `name` is one of the relation fields.
    pub fn is_relation(&self, name: &str) -> bool {
        self.relations.iter().any(|field| field.name == name)
    }
}

/// Classify a schema's fields for item rendering.
///
/// The first field tagged as identity supplies the item href. Any later
/// identity field is demoted to a single-valued relation so its URL still
/// surfaces, as an item link under the field's own name.
pub fn classify(schema: &ResourceSchema) -> Classification {
    let mut classification = Classification::default();

    for field in &schema.fields {
        match field.kind {
            FieldKind::Identity => {
                if classification.identity.is_none() {
                    classification.identity = Some(field.name.clone());
                } else {
                    classification.relations.push(RelationField {
                        name: field.name.clone(),
                        many: false,
                    });
                }
            }
            FieldKind::Relation { many } => {
                classification.relations.push(RelationField {
                    name: field.name.clone(),
                    many,
                });
            }
            FieldKind::Plain => {}
        }
    }

    classification
}

//! Core types for the Collectra rendering engine
//!
//! This module defines the wire-side document model (the Collection+JSON
//! envelope and its parts) and the collaborator-facing input model: the
//! discriminated response payload, the per-field metadata that drives
//! classification, and the request context the emitter reads the base URL
//! from.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::error::{Error, Result};

/// The only content type the engine emits, regardless of payload shape.
pub const MEDIA_TYPE: &str = "application/vnd.collection+json";

/// Media type version stamped into every envelope.
pub const COLLECTION_VERSION: &str = "1.0";

/// Top-level wire document: the `collection` wrapper object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The envelope carrying all response data
    pub collection: Collection,
}

impl Document {
    /// Create a document around a fresh envelope for the given href.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            collection: Collection::new(href),
        }
    }
}

/// The Collection+JSON envelope.
///
/// `version`, `queries`, and `template` are fixed by contract; `links`,
/// `items`, and `error` are filled by the assembler depending on the
/// payload shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    /// Media type version, always `"1.0"`
    pub version: String,

    /// Effective request URL
    pub href: String,

    /// Top-level links: pagination cursors or API-root listings
    pub links: Vec<Link>,

    /// Transformed resource items
    pub items: Vec<Item>,

    /// Query templates; fixed empty in this scope
    pub queries: Vec<Value>,

    /// Write template; fixed empty in this scope
    pub template: Map<String, Value>,

    /// Error object; serializes as `{}` unless a fault was rendered
    pub error: ErrorObject,
}

impl Collection {
    /// Create an empty envelope with the fixed fields populated.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            version: COLLECTION_VERSION.to_string(),
            href: href.into(),
            links: Vec::new(),
            items: Vec::new(),
            queries: Vec::new(),
            template: Map::new(),
            error: ErrorObject::default(),
        }
    }
}

/// One resource's transformed representation within the envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Self link; present iff the record had a non-null identity value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    /// Plain attributes, in the record's original field order
    pub data: Vec<Attribute>,

    /// Relation links, in declared field order; omitted from the wire
    /// when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
}

impl Item {
    /// Find an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.data.iter().find(|a| a.name == name)
    }

    /// All links with the given rel, in order.
    pub fn links_with_rel<'a>(&'a self, rel: &'a str) -> impl Iterator<Item = &'a Link> {
        self.links.iter().filter(move |l| l.rel == rel)
    }
}

/// One `{name, value}` entry in an item's data list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Field name
    pub name: String,
    /// Field value, carried verbatim with no type coercion
    pub value: Value,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A `{rel, href}` link, used both per-item and at the envelope top level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Link relation name
    pub rel: String,
    /// Link target URL
    pub href: String,
}

impl Link {
    /// Create a new link.
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }

    /// Pagination link to the next page.
    pub fn next(href: impl Into<String>) -> Self {
        Self::new("next", href)
    }

    /// Pagination link to the previous page.
    pub fn previous(href: impl Into<String>) -> Self {
        Self::new("previous", href)
    }
}

/// The envelope's error object.
///
/// Serializes as `{}` when no message is set and `{"message": "..."}` when
/// a fault was rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// Human-readable fault message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorObject {
    /// Error object carrying a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// True when no fault was rendered.
    pub fn is_empty(&self) -> bool {
        self.message.is_none()
    }
}

/// Per-field classification tag supplied by the serialization layer.
///
/// This is the typed side-channel that replaces runtime type inspection of
/// serializer fields: the caller states what each field *is* instead of the
/// engine sniffing what it looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    /// The resource's canonical self-referencing URL
    Identity,
    /// A reference to another resource by URL
    Relation {
        /// True when the field carries many references (one-to-many or
        /// many-to-many) rather than a single one
        #[serde(default)]
        many: bool,
    },
    /// An ordinary attribute rendered into item data
    Plain,
}

/// One declared field: its name and classification tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name as it appears in the record
    pub name: String,
    /// Classification tag
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Declare the identity field.
    pub fn identity(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Identity,
        }
    }

    /// Declare a single-valued relation field.
    pub fn relation(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Relation { many: false },
        }
    }

    /// Declare a multi-valued relation field.
    pub fn relation_many(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Relation { many: true },
        }
    }

    /// Declare a plain attribute field.
    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FieldKind::Plain,
        }
    }
}

/// Ordered field metadata for one resource type.
///
/// Field order is the serializer's declared order; the classifier and the
/// item transformer preserve it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSchema {
    /// Declared fields, in order
    pub fields: Vec<FieldSpec>,
}

impl ResourceSchema {
    /// Create a schema from declared fields.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }
}

/// A paginated wrapper produced upstream: cursors plus a result list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Cursor to the next page, if any
    pub next: Option<String>,
    /// Cursor to the previous page, if any
    pub previous: Option<String>,
    /// Resource records on this page
    pub results: Vec<Value>,
}

/// A framework-level error body surfaced by the upstream exception path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    /// Human-readable message
    pub message: String,
}

impl Fault {
    /// Create a fault from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The discriminated response body handed to the engine.
///
/// The caller decides which variant applies; in particular `Index` (the
/// service-root listing) and `Fault` are explicit decisions that are never
/// inferred from data shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A single resource record (a JSON object)
    Record(Value),
    /// A list of resource records
    List(Vec<Value>),
    /// A paginated wrapper around resource records
    Page(Page),
    /// API-root listing: sub-resource name to absolute URL
    Index(Map<String, Value>),
    /// Framework-level error
    Fault(Fault),
    /// No content; rendering short-circuits to a zero-length body
    Empty,
}

impl Payload {
    /// Classify a raw JSON body for callers that have not discriminated it
    /// themselves.
    ///
    /// Recognized shapes: JSON null becomes [`Payload::Empty`], an array
    /// becomes [`Payload::List`], and an object carrying *exactly* the keys
    /// `next`/`previous`/`results` with (null-or-string, null-or-string,
    /// array) values becomes [`Payload::Page`]. Everything else falls
    /// through to [`Payload::Record`]. `Index` and `Fault` are never
    /// inferred here.
    pub fn classify(body: Value) -> Payload {
        match body {
            Value::Null => Payload::Empty,
            Value::Array(records) => Payload::List(records),
            Value::Object(mut map) if Self::is_page_shape(&map) => {
                let next = take_cursor(map.remove("next"));
                let previous = take_cursor(map.remove("previous"));
                let results = match map.remove("results") {
                    Some(Value::Array(records)) => records,
                    _ => Vec::new(),
                };
                Payload::Page(Page {
                    next,
                    previous,
                    results,
                })
            }
            other => Payload::Record(other),
        }
    }

    /// True for the no-content payload.
    pub fn is_empty(&self) -> bool {
        matches!(self, Payload::Empty)
    }

    fn is_page_shape(map: &Map<String, Value>) -> bool {
        if map.len() != 3 {
            return false;
        }
        let cursor_ok =
            |value: Option<&Value>| matches!(value, Some(Value::Null) | Some(Value::String(_)));
        cursor_ok(map.get("next"))
            && cursor_ok(map.get("previous"))
            && matches!(map.get("results"), Some(Value::Array(_)))
    }
}

fn take_cursor(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(cursor)) => Some(cursor),
        _ => None,
    }
}

/// The slice of the current request the emitter needs: its absolute URL.
#[derive(Debug, Clone)]
pub struct RequestContext {
    url: Url,
}

impl RequestContext {
    /// Parse an absolute request URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Href`] when the value is not an absolute URL.
    pub fn new(url: &str) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|source| Error::Href {
            value: url.to_string(),
            source,
        })?;
        Ok(Self { url: parsed })
    }

    /// Wrap an already-parsed URL.
    pub fn from_url(url: Url) -> Self {
        Self { url }
    }

    /// The request's absolute URL (scheme, host, path, query) with any
    /// fragment stripped.
    pub fn href(&self) -> String {
        if self.url.fragment().is_none() {
            return self.url.to_string();
        }
        let mut url = self.url.clone();
        url.set_fragment(None);
        url.to_string()
    }

    /// The request path, for base-href override hooks that rewrite the
    /// scheme and authority but keep the path.
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// The underlying parsed URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// The emitter's output: serialized document bytes plus the fixed media
/// type. The HTTP status stays whatever the upstream layer chose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Serialized document; zero-length for empty bodies
    pub body: Vec<u8>,
    /// Always [`MEDIA_TYPE`]
    pub media_type: &'static str,
}

impl Rendered {
    /// A zero-length body for no-content responses.
    pub fn empty() -> Self {
        Self {
            body: Vec::new(),
            media_type: MEDIA_TYPE,
        }
    }

    /// A serialized document body.
    pub fn document(body: Vec<u8>) -> Self {
        Self {
            body,
            media_type: MEDIA_TYPE,
        }
    }

    /// True when the body is zero-length.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

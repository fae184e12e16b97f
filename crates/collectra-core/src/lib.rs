//! Collectra Core - Collection+JSON rendering engine for REST APIs
//!
//! This crate turns already-serialized response bodies into
//! `application/vnd.collection+json` documents: single records, record
//! lists, paginated wrappers, service-root indexes, and framework errors
//! all come out as the same versioned envelope.
//!
//! # Main Components
//!
//! - **Error Handling**: Error types using `thiserror`
//! - **Core Types**: The wire document model, per-field metadata, and the
//!   discriminated response payload
//! - **Field Classification**: Split a resource schema into the identity
//!   field and the link-producing relation fields
//! - **Rendering Pipeline**: Transform records into items, assemble the
//!   envelope, and emit serialized bytes with the fixed media type
//!
//! # Example
//!
//! ```
//! use collectra_core::{render, FieldSpec, Payload, RequestContext, ResourceSchema};
//! use serde_json::json;
//!
//! # fn main() -> collectra_core::Result<()> {
//! let request = RequestContext::new("http://testserver/rest-api/dummy/1/")?;
//! let schema = ResourceSchema::new(vec![
//!     FieldSpec::identity("url"),
//!     FieldSpec::plain("name"),
//! ]);
//!
//! let rendered = render(
//!     &request,
//!     Some(&schema),
//!     Payload::Record(json!({
//!         "url": "http://testserver/rest-api/dummy/1/",
//!         "name": "Foobar Baz",
//!     })),
//! )?;
//!
//! assert_eq!(rendered.media_type, "application/vnd.collection+json");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod render;
pub mod types;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use render::{
    assemble, classify, render, transform_record, Classification, HrefHook, RelationField,
    Renderer,
};
pub use types::{
    // Wire document model
    Attribute, Collection, Document, ErrorObject, Item, Link,

    // Field metadata
    FieldKind, FieldSpec, ResourceSchema,

    // Inbound payloads
    Fault, Page, Payload,

    // Request context and emitter output
    Rendered, RequestContext,
};

// Re-export wire constants
pub use types::{COLLECTION_VERSION, MEDIA_TYPE};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

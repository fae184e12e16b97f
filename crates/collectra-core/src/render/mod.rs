//! Collection+JSON rendering pipeline
//!
//! This module wires the field classifier, the item transformer, and the
//! collection assembler into the response emitter callers interact with.
//! The emitter owns the two policies that sit outside document assembly:
//! computing the effective envelope href (including the caller-supplied
//! override hook) and short-circuiting no-content responses to a
//! zero-length body.
//!
//! Copyright (c) 2026 Collectra Team
//! Licensed under the Apache-2.0 license

pub mod assembler;
pub mod classifier;
pub mod item;

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::types::{Payload, Rendered, RequestContext, ResourceSchema};

pub use assembler::assemble;
pub use classifier::{classify, Classification, RelationField};
pub use item::transform_record;

/// Hook that computes the envelope href from the current request.
pub type HrefHook = Arc<dyn Fn(&RequestContext) -> String + Send + Sync>;

/// The response emitter.
///
/// A renderer is cheap to clone and safe to share across request-handling
/// threads. By default the envelope href is the request's own URL; a
/// base-href hook supplied at construction replaces that lookup, which is
/// how deployments behind a rewriting proxy emit externally valid URLs.
#[derive(Clone, Default)]
pub struct Renderer {
    base_href: Option<HrefHook>,
}

impl Renderer {
    /// Create a renderer that uses the request URL as the envelope href.
    pub fn new() -> Self {
        Self { base_href: None }
    }

    /// Create a renderer whose envelope href comes from `hook` instead of
    /// the request URL.
    pub fn with_base_href<F>(hook: F) -> Self
    where
        F: Fn(&RequestContext) -> String + Send + Sync + 'static,
    {
        Self {
            base_href: Some(Arc::new(hook)),
        }
    }

    /// Render one response payload into serialized document bytes.
    ///
    /// [`Payload::Empty`] short-circuits to a zero-length body before any
    /// document is assembled, so no-content responses stay truly empty.
    /// The media type on the result is fixed regardless of payload shape.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Json`] when document serialization fails.
    pub fn render(
        &self,
        request: &RequestContext,
        schema: Option<&ResourceSchema>,
        payload: Payload,
    ) -> Result<Rendered> {
        if payload.is_empty() {
            return Ok(Rendered::empty());
        }

        let href = self.effective_href(request);
        let document = assemble(&href, schema, payload);
        let body = serde_json::to_vec(&document)?;
        Ok(Rendered::document(body))
    }

    fn effective_href(&self, request: &RequestContext) -> String {
        match &self.base_href {
            Some(hook) => hook(request),
            None => request.href(),
        }
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("base_href", &self.base_href.as_ref().map(|_| "<hook>"))
            .finish()
    }
}

/// Render a payload with the default emitter configuration.
///
/// Convenience wrapper over [`Renderer::render`] for callers that do not
/// override the envelope href.
pub fn render(
    request: &RequestContext,
    schema: Option<&ResourceSchema>,
    payload: Payload,
) -> Result<Rendered> {
    Renderer::new().render(request, schema, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Document, Fault, FieldSpec, MEDIA_TYPE};
    use serde_json::json;

    fn request() -> RequestContext {
        RequestContext::new("http://testserver/rest-api/dummy/").unwrap()
    }

    #[test]
    fn test_render_produces_a_parseable_document() {
        let schema = ResourceSchema::new(vec![
            FieldSpec::identity("url"),
            FieldSpec::plain("name"),
        ]);
        let payload = Payload::Record(json!({
            "url": "http://testserver/rest-api/dummy/1/",
            "name": "Foobar Baz",
        }));

        let rendered = render(&request(), Some(&schema), payload).unwrap();
        assert_eq!(rendered.media_type, MEDIA_TYPE);

        let document: Document = serde_json::from_slice(&rendered.body).unwrap();
        assert_eq!(document.collection.version, "1.0");
        assert_eq!(document.collection.href, "http://testserver/rest-api/dummy/");
        assert_eq!(document.collection.items.len(), 1);
    }

    #[test]
    fn test_empty_payload_short_circuits_to_empty_body() {
        let rendered = render(&request(), None, Payload::Empty).unwrap();
        assert!(rendered.body.is_empty());
        assert_eq!(rendered.media_type, MEDIA_TYPE);
    }

    #[test]
    fn test_envelope_href_keeps_the_query_string() {
        let request = RequestContext::new("http://testserver/rest-api/dummy/?page=2").unwrap();
        let rendered = render(&request, None, Payload::List(Vec::new())).unwrap();

        let document: Document = serde_json::from_slice(&rendered.body).unwrap();
        assert_eq!(
            document.collection.href,
            "http://testserver/rest-api/dummy/?page=2"
        );
    }

    #[test]
    fn test_base_href_hook_replaces_request_url() {
        let renderer =
            Renderer::with_base_href(|request| format!("http://rewritten.com{}", request.path()));
        let rendered = renderer
            .render(&request(), None, Payload::List(Vec::new()))
            .unwrap();

        let document: Document = serde_json::from_slice(&rendered.body).unwrap();
        assert_eq!(document.collection.href, "http://rewritten.com/rest-api/dummy/");
    }

    #[test]
    fn test_fault_renders_error_message() {
        let rendered = render(&request(), None, Payload::Fault(Fault::new("lol nice one")))
            .unwrap();

        let document: Document = serde_json::from_slice(&rendered.body).unwrap();
        assert_eq!(
            document.collection.error.message.as_deref(),
            Some("lol nice one")
        );
        assert!(document.collection.items.is_empty());
    }

    #[test]
    fn test_renderer_is_cloneable() {
        let renderer = Renderer::with_base_href(|request| request.href());
        let clone = renderer.clone();
        let rendered = clone
            .render(&request(), None, Payload::List(Vec::new()))
            .unwrap();
        assert!(!rendered.body.is_empty());
    }
}

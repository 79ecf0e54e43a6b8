use futures_util::{Stream, TryStreamExt};
use postern_common::{ConditionalSend, ResourceIdentifier};
use postern_rdf::{Quad, QuadStore};

use crate::ResourceStoreError;

/// The content type of the internal quad representation.
pub const INTERNAL_QUADS: &str = "internal/quads";

/// A stream of quads produced by a [ResourceStore](crate::ResourceStore).
#[cfg(not(target_arch = "wasm32"))]
pub type QuadStream = futures_util::stream::BoxStream<'static, Result<Quad, ResourceStoreError>>;

/// A stream of quads produced by a [ResourceStore](crate::ResourceStore).
#[cfg(target_arch = "wasm32")]
pub type QuadStream =
    futures_util::stream::LocalBoxStream<'static, Result<Quad, ResourceStoreError>>;

/// Boxes a stream of quads behind the cross-target [QuadStream] alias.
pub fn boxed_quad_stream(
    stream: impl Stream<Item = Result<Quad, ResourceStoreError>> + ConditionalSend + 'static,
) -> QuadStream {
    use futures_util::StreamExt;

    #[cfg(not(target_arch = "wasm32"))]
    return stream.boxed();
    #[cfg(target_arch = "wasm32")]
    return stream.boxed_local();
}

/// The content negotiation preferences of a representation request.
#[derive(Clone, Debug, Default)]
pub struct RepresentationPreferences {
    /// The preferred content type, if any.
    pub content_type: Option<String>,
}

impl RepresentationPreferences {
    /// Preferences asking for the internal quad representation.
    pub fn quads() -> Self {
        Self {
            content_type: Some(INTERNAL_QUADS.to_string()),
        }
    }
}

/// A resource representation returned by a [ResourceStore](crate::ResourceStore).
pub struct Representation {
    /// The identifier the representation was produced for.
    pub identifier: ResourceIdentifier,
    /// The content type of the data.
    pub content_type: String,
    /// The representation data as a quad stream.
    pub data: QuadStream,
}

impl std::fmt::Debug for Representation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Representation")
            .field("identifier", &self.identifier)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

impl Representation {
    /// Drains the data stream into a [QuadStore].
    pub async fn into_quad_store(self) -> Result<QuadStore, ResourceStoreError> {
        self.data.try_collect().await
    }
}

#![doc(html_root_url = "https://docs.rs/dom-sugar/0.0.1")]
#![warn(clippy::pedantic)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod ancestry;
pub mod delegation;
pub mod document;
pub mod element;
pub mod error;
pub mod insert;
pub mod registry;
pub mod scroll;
pub mod selector;

pub use document::ExtendedDocument;
pub use element::ExtendedElement;
pub use error::DomError;
pub use registry::{ensure_extended, ExtendedNode};

/// Page content only appears in logs with the `dangerous-logging` feature.
#[cfg(feature = "dangerous-logging")]
pub(crate) fn redact(content: &str) -> &str {
	content
}

#[cfg(not(feature = "dangerous-logging"))]
pub(crate) fn redact(_: &str) -> &str {
	"<redacted>"
}

//! [`ExtendedDocument`], the entry point for creating and finding extended elements.

use crate::{
	element::ExtendedElement,
	error::DomError,
	registry::{ensure_extended, ExtendedNode},
	selector,
};
use core::ops::Deref;
use tracing::instrument;
use web_sys::{Document, Element, HtmlAudioElement, HtmlImageElement, Node};

/// The document-level entry point: element creation plus the same selection helpers as [`ExtendedElement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendedDocument(Document);

impl From<Document> for ExtendedDocument {
	fn from(document: Document) -> Self {
		Self(document)
	}
}

impl Deref for ExtendedDocument {
	type Target = Document;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl ExtendedDocument {
	/// The document of the current `window`.
	///
	/// # Errors
	///
	/// Iff there is no `window` (for example in a worker) or it has no `document`.
	pub fn current() -> Result<Self, DomError> {
		let window = web_sys::window().ok_or(DomError::NoWindow)?;
		window.document().map(Self).ok_or(DomError::NoDocument)
	}

	/// Creates an extended element with the given tag name.
	///
	/// # Errors
	///
	/// Iff `tag_name` isn't a valid element name.
	#[instrument(skip(self))]
	pub fn create(&self, tag_name: &str) -> Result<ExtendedElement, DomError> {
		Ok(self.0.create_element(tag_name)?.into())
	}

	/// A new extended `<img>`.
	///
	/// # Errors
	///
	/// Iff the constructor throws.
	pub fn image(&self) -> Result<ExtendedElement, DomError> {
		Ok(Element::from(HtmlImageElement::new()?).into())
	}

	/// A new extended `<audio>`.
	///
	/// # Errors
	///
	/// Iff the constructor throws.
	pub fn audio(&self) -> Result<ExtendedElement, DomError> {
		Ok(Element::from(HtmlAudioElement::new()?).into())
	}

	/// The extended `<body>`, if there is one yet.
	#[must_use]
	pub fn body(&self) -> Option<ExtendedElement> {
		self.0.body().map(ExtendedElement::from)
	}

	/// See [`selector::resolve`].
	#[must_use]
	pub fn find(&self, selector: &str) -> Option<ExtendedElement> {
		selector::resolve(&self.0, selector)
	}

	/// See [`selector::resolve_all`].
	#[must_use]
	pub fn find_all(&self, selector: &str) -> Vec<ExtendedElement> {
		selector::resolve_all(&self.0, selector)
	}

	/// See [`selector::count`].
	#[must_use]
	pub fn total(&self, selector: &str) -> usize {
		selector::count(&self.0, selector)
	}

	/// Extends `node` if it's an element. See [`ensure_extended`].
	#[must_use]
	pub fn extend(&self, node: impl Into<Node>) -> ExtendedNode {
		ensure_extended(node.into())
	}
}

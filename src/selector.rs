//! Selector resolution with the `>` shorthand for direct children.
//!
//! `"> li.active"` tests only the immediate element children of the root, in document order.
//! Every other selector goes to the native descendant query.

use crate::{element::ExtendedElement, error::describe};
use tracing::{error, instrument};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlCollection, NodeList};

/// A parsed selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
	/// Matches among all descendants.
	Descendant(&'a str),
	/// Matches among direct element children only. The `>` is already stripped.
	Children(&'a str),
}

impl<'a> Selector<'a> {
	#[must_use]
	pub fn parse(selector: &'a str) -> Self {
		match selector.strip_prefix('>') {
			Some(rest) => Self::Children(rest.trim()),
			None => Self::Descendant(selector),
		}
	}
}

/// Something selectors can be resolved against. Both elements and documents qualify.
pub trait QueryRoot {
	fn query_selector(&self, selector: &str) -> Result<Option<Element>, wasm_bindgen::JsValue>;
	fn query_selector_all(&self, selector: &str) -> Result<NodeList, wasm_bindgen::JsValue>;
	fn children(&self) -> HtmlCollection;
}

impl QueryRoot for Element {
	fn query_selector(&self, selector: &str) -> Result<Option<Element>, wasm_bindgen::JsValue> {
		Element::query_selector(self, selector)
	}

	fn query_selector_all(&self, selector: &str) -> Result<NodeList, wasm_bindgen::JsValue> {
		Element::query_selector_all(self, selector)
	}

	fn children(&self) -> HtmlCollection {
		Element::children(self)
	}
}

impl QueryRoot for Document {
	fn query_selector(&self, selector: &str) -> Result<Option<Element>, wasm_bindgen::JsValue> {
		Document::query_selector(self, selector)
	}

	fn query_selector_all(&self, selector: &str) -> Result<NodeList, wasm_bindgen::JsValue> {
		Document::query_selector_all(self, selector)
	}

	fn children(&self) -> HtmlCollection {
		Document::children(self)
	}
}

/// Tests `element` against `selector`, logging and rejecting unparsable selectors.
pub(crate) fn matches(element: &Element, selector: &str) -> bool {
	element.matches(selector).unwrap_or_else(|error| {
		error!(selector, "Failed to match selector: {}", describe(&error));
		false
	})
}

fn matching_children<'a>(root: &'a impl QueryRoot, selector: &'a str) -> impl Iterator<Item = Element> + 'a {
	let children = root.children();
	(0..children.length())
		.filter_map(move |i| children.item(i))
		.filter(move |child| matches(child, selector))
}

/// The first match, or [`None`] if there is none.
#[instrument(skip(root))]
pub fn resolve(root: &impl QueryRoot, selector: &str) -> Option<ExtendedElement> {
	let found = match Selector::parse(selector) {
		Selector::Children(selector) => matching_children(root, selector).next(),
		Selector::Descendant(selector) => root.query_selector(selector).unwrap_or_else(|error| {
			error!(selector, "Failed to query selector: {}", describe(&error));
			None
		}),
	};
	found.map(ExtendedElement::from)
}

/// All matches in document order. Never fails; unmatched or unparsable selectors yield an empty [`Vec`].
#[instrument(skip(root))]
pub fn resolve_all(root: &impl QueryRoot, selector: &str) -> Vec<ExtendedElement> {
	match Selector::parse(selector) {
		Selector::Children(selector) => matching_children(root, selector).map(ExtendedElement::from).collect(),
		Selector::Descendant(selector) => match root.query_selector_all(selector) {
			Ok(nodes) => (0..nodes.length())
				.filter_map(|i| nodes.item(i))
				.filter_map(|node| node.dyn_into::<Element>().ok())
				.map(ExtendedElement::from)
				.collect(),
			Err(error) => {
				error!(selector, "Failed to query selector: {}", describe(&error));
				Vec::new()
			}
		},
	}
}

/// The number of matches [`resolve_all`] would return, without extending them.
#[instrument(skip(root))]
pub fn count(root: &impl QueryRoot, selector: &str) -> usize {
	match Selector::parse(selector) {
		Selector::Children(selector) => matching_children(root, selector).count(),
		Selector::Descendant(selector) => match root.query_selector_all(selector) {
			Ok(nodes) => nodes.length() as usize,
			Err(error) => {
				error!(selector, "Failed to query selector: {}", describe(&error));
				0
			}
		},
	}
}

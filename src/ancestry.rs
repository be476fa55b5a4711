//! Upward searches from a node towards the document root.

use crate::{element::ExtendedElement, selector::matches};
use tracing::instrument;
use wasm_bindgen::JsCast;
use web_sys::{Element, Node};

/// Finds the nearest ancestor of `node` that matches `selector`.
///
/// `node` itself is never tested, and neither is the document's root element: Reaching `<html>` ends the search with [`None`].
/// So does leaving the element tree, which happens for detached subtrees.
#[instrument(skip(node))]
pub fn closest_parent(node: &Node, selector: &str) -> Option<ExtendedElement> {
	let root = node.owner_document().and_then(|document| document.document_element());
	let mut current = node.parent_node();
	while let Some(ancestor) = current {
		let element = ancestor.dyn_into::<Element>().ok()?;
		if root.as_ref() == Some(&element) {
			return None;
		}
		if matches(&element, selector) {
			return Some(element.into());
		}
		current = element.parent_node();
	}
	None
}

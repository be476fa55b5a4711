//! Anything that can be inserted in one call: single nodes, or several at once through a `DocumentFragment`.

use crate::{element::ExtendedElement, error::DomError};
use web_sys::{Document, Element, HtmlElement, Node};

pub trait Insertable {
	/// Produces the node to hand to the native insertion call.
	///
	/// Multiple nodes are first moved into a fresh `DocumentFragment` of `document`, in order.
	///
	/// # Errors
	///
	/// Iff a node can't be moved into the fragment, for example because it's an ancestor of the insertion point.
	fn to_insertion(&self, document: &Document) -> Result<Node, DomError>;
}

impl Insertable for Node {
	fn to_insertion(&self, _: &Document) -> Result<Node, DomError> {
		Ok(self.clone())
	}
}

impl Insertable for Element {
	fn to_insertion(&self, _: &Document) -> Result<Node, DomError> {
		Ok(self.clone().into())
	}
}

impl Insertable for HtmlElement {
	fn to_insertion(&self, _: &Document) -> Result<Node, DomError> {
		Ok(self.clone().into())
	}
}

impl Insertable for ExtendedElement {
	fn to_insertion(&self, _: &Document) -> Result<Node, DomError> {
		let node: &Node = self.as_ref();
		Ok(node.clone())
	}
}

impl<T: AsRef<Node>> Insertable for [T] {
	fn to_insertion(&self, document: &Document) -> Result<Node, DomError> {
		let fragment = document.create_document_fragment();
		for node in self {
			fragment.append_child(node.as_ref())?;
		}
		Ok(fragment.into())
	}
}

impl<T: AsRef<Node>, const N: usize> Insertable for [T; N] {
	fn to_insertion(&self, document: &Document) -> Result<Node, DomError> {
		self[..].to_insertion(document)
	}
}

impl<T: AsRef<Node>> Insertable for Vec<T> {
	fn to_insertion(&self, document: &Document) -> Result<Node, DomError> {
		self[..].to_insertion(document)
	}
}

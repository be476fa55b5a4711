use dom_sugar::{registry, ExtendedNode};
use std::rc::Rc;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

use web_fixture_::document;

#[wasm_bindgen_test]
fn create_extends() {
	let document = document();
	let header = document.create("h1").unwrap();
	header.add_classes(&["first", "head"]).unwrap().set_plaintext("Header text");

	assert_eq!(header.behavior().tag_name(), "H1");
	assert_eq!(header.outer_html(), r#"<h1 class="first head">Header text</h1>"#);
	assert!(Rc::ptr_eq(header.behavior(), &registry::get("h1").unwrap()));
	assert!(document.create("not valid").is_err());
}

#[wasm_bindgen_test]
fn image_and_audio_are_extended() {
	let document = document();

	let image = document.image().unwrap();
	assert_eq!(image.behavior().tag_name(), "IMG");
	image.set_attr("alt", "picture").unwrap();
	assert_eq!(image.attr("alt").as_deref(), Some("picture"));

	let audio = document.audio().unwrap();
	assert_eq!(audio.behavior().tag_name(), "AUDIO");
	assert!(audio.behavior().capabilities().html);
}

#[wasm_bindgen_test]
fn body_is_extended() {
	let document = document();
	let body = document.body().unwrap();

	assert_eq!(body.behavior().tag_name(), "BODY");
	assert_eq!(document.find("body").unwrap(), body);
}

#[wasm_bindgen_test]
fn extend_passes_non_elements_through() {
	let document = document();

	let text = document.create_text_node("loose");
	assert!(matches!(document.extend(text), ExtendedNode::Other(_)));

	let element = document.create_element("aside").unwrap();
	let extended = document.extend(element.clone()).into_element().unwrap();
	assert_eq!(extended, element);
}

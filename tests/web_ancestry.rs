use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

use web_fixture_::{document, fixture};

const TREE: &str = r#"<section id="ancestry-panel" class="panel"><div class="panel"><span class="leaf"></span></div></section>"#;

#[wasm_bindgen_test]
fn finds_nearest_matching_ancestor() {
	let root = fixture(TREE);
	let leaf = root.find(".leaf").unwrap();

	let panel = leaf.closest_parent("#ancestry-panel").unwrap();
	assert_eq!(panel.behavior().tag_name(), "SECTION");

	let nearest = leaf.closest_parent(".panel").unwrap();
	assert_eq!(nearest.behavior().tag_name(), "DIV");
}

#[wasm_bindgen_test]
fn starting_node_is_not_tested() {
	let root = fixture(TREE);
	let leaf = root.find(".leaf").unwrap();

	assert!(leaf.closest_parent(".leaf").is_none());
}

#[wasm_bindgen_test]
fn stops_at_the_root_element() {
	let root = fixture(TREE);
	let leaf = root.find(".leaf").unwrap();

	assert!(leaf.closest_parent("#no-such-panel").is_none());
	assert!(leaf.closest_parent("html").is_none());
	assert_eq!(leaf.closest_parent("body").unwrap(), document().body().unwrap());
}

#[wasm_bindgen_test]
fn detached_subtrees_end_the_search() {
	let document = document();
	let outer = document.create("div").unwrap();
	outer.set_html(r#"<p><em></em></p>"#);
	let em = outer.find("em").unwrap();

	assert_eq!(em.closest_parent("div").unwrap(), outer);
	assert!(em.closest_parent("body").is_none());
}

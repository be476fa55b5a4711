use dom_sugar::{DomError, ExtendedNode};
use std::{cell::Cell, rc::Rc};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

wasm_bindgen_test_configure!(run_in_browser);

use web_fixture_::{document, fixture};

#[wasm_bindgen_test]
fn content() {
	let root = fixture("");

	assert_eq!(root.set_html("<b>bold</b> move").html(), "<b>bold</b> move");
	assert_eq!(root.plaintext(), "bold move");
	assert_eq!(root.set_plaintext("<i>not markup</i>").total("i"), 0);
	assert_eq!(root.plaintext(), "<i>not markup</i>");
	assert_eq!(root.empty().html(), "");
}

#[wasm_bindgen_test]
fn attributes() {
	let root = fixture("");

	root.set_attrs([("id", "element-attributes"), ("align", "center")]).unwrap();
	assert_eq!(root.attr("align").as_deref(), Some("center"));
	assert_eq!(root.remove_attr("align").unwrap().attr("align"), None);
	assert!(matches!(root.set_attr("not valid", "x"), Err(DomError::Js(_))));
}

#[wasm_bindgen_test]
fn dataset() {
	let root = fixture("");

	root.set_data("userId", "7").unwrap();
	assert_eq!(root.attr("data-user-id").as_deref(), Some("7"));
	assert_eq!(root.data("userId"), "7");
	assert_eq!(root.data("missing"), "");

	root.set_data_json("count", &JsValue::from(42)).unwrap();
	root.set_data_json("label", &JsValue::from_str("plain")).unwrap();
	assert_eq!(root.data("count"), "42");
	assert_eq!(root.data("label"), "plain");

	root.set_data_map([("a", "1"), ("b", "2")]).unwrap();
	root.clear_data(&["a", "userId"]);
	assert_eq!(root.data("a"), "1");
	assert_eq!(root.data("userId"), "7");
	assert_eq!(root.data("b"), "");
	assert_eq!(root.data("count"), "");

	assert_eq!(root.remove_data("a").data("a"), "");
}

#[wasm_bindgen_test]
fn inline_style() {
	let root = fixture("");

	root.set_css("marginTop", "12px").unwrap();
	assert_eq!(root.css("margin-top"), "12px");
	assert_eq!(root.css("marginTop"), "12px");

	root.set_css_map([("color", "red"), ("--accent", "blue")]).unwrap();
	assert_eq!(root.css("color"), "red");
	assert_eq!(root.css("--accent"), "blue");

	root.set_css("cssFloat", "left").unwrap();
	assert_eq!(root.css("float"), "left");
	assert_eq!(root.css("cssFloat"), "left");
}

#[wasm_bindgen_test]
fn classes() {
	let root = fixture("");

	root.add_classes(&["first", "head", "keep"]).unwrap().add_class("extra").unwrap();
	assert_eq!(root.class_name(), "first head keep extra");

	root.remove_class("extra").unwrap();
	root.remove_classes(&["first"]).unwrap();
	assert_eq!(root.class_name(), "head keep");

	root.clear_class_list(&["keep"]);
	assert_eq!(root.class_name(), "keep");
	assert!(root.add_class("has space").is_err());
}

#[wasm_bindgen_test]
fn form_values() {
	let root = fixture(r#"<input value="start"><textarea>area</textarea><select><option>x</option><option>y</option></select><p></p>"#);

	let input = root.find("input").unwrap();
	assert_eq!(input.val().as_deref(), Some("start"));
	assert_eq!(input.set_val("typed").val().as_deref(), Some("typed"));

	assert_eq!(root.find("textarea").unwrap().val().as_deref(), Some("area"));
	let select = root.find("select").unwrap();
	assert_eq!(select.set_val("y").val().as_deref(), Some("y"));

	let p = root.find("p").unwrap();
	assert_eq!(p.set_val("ignored").val(), None);
}

#[wasm_bindgen_test]
fn insertion() {
	let document = document();
	let root = fixture(r#"<p class="middle"></p>"#);
	let middle = root.find("p").unwrap();

	let a = document.create("a").unwrap();
	let b = document.create("b").unwrap();
	root.append(&[a, b]).unwrap();
	root.prepend(&document.create("i").unwrap()).unwrap();
	middle.before(&document.create("s").unwrap()).unwrap();
	middle.after(&vec![document.create("u").unwrap(), document.create("em").unwrap()]).unwrap();

	let tags: Vec<String> = root.find_all("> *").iter().map(|element| element.behavior().tag_name().to_owned()).collect();
	assert_eq!(tags, ["I", "S", "P", "U", "EM", "A", "B"]);

	middle.remove().unwrap();
	assert_eq!(root.total("> p"), 0);
	assert_eq!(middle.remove().err(), Some(DomError::Detached));
	assert_eq!(middle.after(&document.create("q").unwrap()).err(), Some(DomError::Detached));

	root.append(&middle).unwrap();
	assert_eq!(root.find("> :last-child").unwrap(), middle);
}

#[wasm_bindgen_test]
fn traversal() {
	let root = fixture(r#"text<b></b><i></i>"#);
	let b = root.find("b").unwrap();

	assert!(matches!(root.first_child(), Some(ExtendedNode::Other(_))));
	assert_eq!(root.last_child().and_then(ExtendedNode::into_element).unwrap().behavior().tag_name(), "I");
	assert_eq!(b.next_sibling().and_then(ExtendedNode::into_element), root.find("i"));
	assert!(matches!(b.previous_sibling(), Some(ExtendedNode::Other(_))));
	assert_eq!(b.parent_node().and_then(ExtendedNode::into_element).unwrap(), root);
}

#[wasm_bindgen_test]
fn cloning() {
	let root = fixture(r#"<ul class="list"><li></li><li></li></ul>"#);
	let list = root.find("ul").unwrap();

	let deep = list.clone_node(true).unwrap();
	assert_ne!(deep, list);
	assert_eq!(deep.total("> li"), 2);
	assert!(std::rc::Rc::ptr_eq(deep.behavior(), list.behavior()));

	let shallow = list.clone_node(false).unwrap();
	assert_eq!(shallow.total("li"), 0);
	assert_eq!(shallow.class_name(), "list");
}

#[wasm_bindgen_test]
fn clicks() {
	let root = fixture(r#"<button></button>"#);
	let button = root.find("button").unwrap();
	let count = Rc::new(Cell::new(0));

	button
		.on_click({
			let count = Rc::clone(&count);
			move |_| count.set(count.get() + 1)
		})
		.unwrap()
		.trigger_click()
		.unwrap();
	assert_eq!(count.get(), 1);

	let svg_root = fixture(r#"<svg><circle r="1"></circle></svg>"#);
	let circle = svg_root.find("circle").unwrap();
	let svg_count = Rc::new(Cell::new(0));
	svg_root
		.on_click({
			let svg_count = Rc::clone(&svg_count);
			move |_| svg_count.set(svg_count.get() + 1)
		})
		.unwrap();
	circle.trigger_click().unwrap();
	assert_eq!(svg_count.get(), 1);
}

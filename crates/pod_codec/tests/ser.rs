use pod_codec::to_text;
use pod_runtime::{DICT, Dict, Heap, LIST};

#[test]
fn scalars_in_insertion_order() {
    let heap = Heap::new();
    let mut dict = Dict::new(&heap);
    dict.insert("a", heap.int(1)).unwrap();
    dict.insert("b", heap.text("x")).unwrap();
    assert_eq!(to_text(&dict), r#"{"a":1,"b":"x"}"#);
}

#[test]
fn empty_dictionary_is_a_bare_object() {
    let heap = Heap::new();
    assert_eq!(to_text(&Dict::new(&heap)), "{}");
}

#[test]
fn every_scalar_shape_has_a_literal_form() {
    let heap = Heap::new();
    let mut dict = Dict::new(&heap);
    dict.insert("i", heap.int(-42)).unwrap();
    dict.insert("u", heap.uint(u64::MAX)).unwrap();
    dict.insert("f", heap.float(2.02)).unwrap();
    dict.insert("t", heap.boolean(true)).unwrap();
    dict.insert("x", heap.boolean(false)).unwrap();
    dict.insert("z", heap.null()).unwrap();
    assert_eq!(
        to_text(&dict),
        r#"{"i":-42,"u":18446744073709551615,"f":2.02,"t":true,"x":false,"z":null}"#
    );
}

#[test]
fn floats_keep_their_shape_on_the_wire() {
    let heap = Heap::new();
    let mut dict = Dict::new(&heap);
    dict.insert("whole", heap.float(3.0)).unwrap();
    dict.insert("tiny", heap.float(1.4e-12)).unwrap();
    assert_eq!(to_text(&dict), r#"{"whole":3.0,"tiny":1.4e-12}"#);
}

#[test]
fn text_is_escaped() {
    let heap = Heap::new();
    let mut dict = Dict::new(&heap);
    dict.insert("s", heap.text("\"\\/\u{0008}\u{000C}\n\r\t"))
        .unwrap();
    assert_eq!(to_text(&dict), r#"{"s":"\"\\\/\b\f\n\r\t"}"#);
}

#[test]
fn unescapable_control_characters_are_dropped() {
    let heap = Heap::new();
    let mut dict = Dict::new(&heap);
    dict.insert("s", heap.text("a\u{0001}b\u{001F}c")).unwrap();
    assert_eq!(to_text(&dict), r#"{"s":"abc"}"#);
}

#[test]
fn keys_are_escaped_like_any_text() {
    let heap = Heap::new();
    let mut dict = Dict::new(&heap);
    dict.insert("quo\"te", heap.int(1)).unwrap();
    assert_eq!(to_text(&dict), r#"{"quo\"te":1}"#);
}

#[test]
fn containers_nest_recursively() {
    let heap = Heap::new();
    let mut dict = Dict::new(&heap);

    let child = dict.add_new("obj", &DICT).unwrap();
    let inner = child.as_dict_mut().unwrap();
    inner.insert("k", heap.null()).unwrap();

    let wrapper = dict.add_new("arr", &LIST).unwrap();
    let items = wrapper.as_list_mut().unwrap();
    items.push(heap.boolean(true));
    items.push(heap.text("s"));
    let nested = items.push_new(&LIST);
    nested.as_list_mut().unwrap().push(heap.int(0));

    assert_eq!(to_text(&dict), r#"{"obj":{"k":null},"arr":[true,"s",[0]]}"#);
}

#[test]
fn shapes_without_render_fall_back_to_unknown_type() {
    let heap = Heap::new();
    let mut dict = Dict::new(&heap);
    dict.insert("blob", heap.bytes(vec![0xde, 0xad])).unwrap();
    dict.insert("after", heap.int(1)).unwrap();
    assert_eq!(to_text(&dict), r#"{"blob":"Unknown Type","after":1}"#);
}

#[test]
fn output_is_readable_by_an_independent_parser() {
    let heap = Heap::new();
    let mut dict = Dict::new(&heap);
    dict.insert("n", heap.int(-7)).unwrap();
    dict.insert("s", heap.text("a/b\nc")).unwrap();
    let wrapper = dict.add_new("l", &LIST).unwrap();
    wrapper.as_list_mut().unwrap().push(heap.float(0.25));

    let text = to_text(&dict);
    let parsed: serde_json::Value = serde_json::from_str(&text).expect("well-formed");
    assert_eq!(parsed["n"], serde_json::json!(-7));
    assert_eq!(parsed["s"], serde_json::json!("a/b\nc"));
    assert_eq!(parsed["l"][0], serde_json::json!(0.25));
}

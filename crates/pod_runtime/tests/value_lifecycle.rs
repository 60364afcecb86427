use pod_runtime::{
    BOOL, BYTES, DICT, FLOAT, Heap, INT, LIST, NULL, Selector, TEXT, UINT, ValueError,
};

#[test]
fn fresh_values_start_zeroed() {
    let heap = Heap::new();
    assert_eq!(heap.alloc(&INT).as_int(), Some(0));
    assert_eq!(heap.alloc(&UINT).as_uint(), Some(0));
    assert_eq!(heap.alloc(&FLOAT).as_float(), Some(0.0));
    assert_eq!(heap.alloc(&BOOL).as_bool(), Some(false));
    assert_eq!(heap.alloc(&TEXT).as_text(), Some(""));
    assert_eq!(heap.alloc(&BYTES).as_bytes(), Some(&[][..]));
    assert!(heap.alloc(&NULL).is_null());
    assert!(heap.alloc(&LIST).as_list().is_some_and(|l| l.is_empty()));
    assert!(heap.alloc(&DICT).as_dict().is_some_and(|d| d.is_empty()));
}

#[test]
fn shape_identity_is_descriptor_identity() {
    let heap = Heap::new();
    let v = heap.int(7);
    assert!(v.is_of(&INT));
    assert!(!v.is_of(&UINT));
    assert!(!v.is_of(&FLOAT));
    assert_eq!(v.shape_name(), "int");
    assert!(v.descriptor().is(&INT));
}

#[test]
fn wrong_shape_accessors_read_as_absent() {
    let heap = Heap::new();
    let mut v = heap.int(7);
    assert_eq!(v.as_text(), None);
    assert_eq!(v.as_float(), None);
    assert!(v.as_dict().is_none());
    assert!(v.as_list_mut().is_none());
    assert!(!v.set_bool(true));
    assert!(!v.set_text("nope"));
    assert_eq!(v.as_int(), Some(7));
}

#[test]
fn deep_copy_shares_no_state_with_the_source() {
    let heap = Heap::new();
    let mut original = heap.text("before");
    let copy = original.deep_copy().expect("text is copyable");
    assert!(original.equals(&copy));

    original.set_text("after");
    assert_eq!(copy.as_text(), Some("before"));
    assert!(!original.equals(&copy));
}

#[test]
fn bytes_shape_has_no_copy_support() {
    let heap = Heap::new();
    assert!(!BYTES.is_copyable());
    let blob = heap.bytes(vec![1, 2, 3]);
    assert_eq!(
        blob.deep_copy().unwrap_err(),
        ValueError::NotCopyable { shape: "bytes" }
    );
}

#[test]
fn copy_failure_propagates_through_containers_without_leaking() {
    let heap = Heap::new();
    {
        let mut wrapper = heap.alloc(&LIST);
        let items = wrapper.as_list_mut().expect("list shape");
        items.push(heap.int(1));
        items.push(heap.bytes(vec![0xde, 0xad]));

        let err = wrapper.deep_copy().unwrap_err();
        assert_eq!(err, ValueError::NotCopyable { shape: "bytes" });
        assert_eq!(heap.live_objects(), 3);
    }
    assert_eq!(heap.live_bytes(), 0);
    assert_eq!(heap.live_objects(), 0);
}

#[test]
fn render_goes_through_capability_dispatch() {
    let heap = Heap::new();
    assert_eq!(heap.int(42).render().as_deref(), Some("42"));
    assert_eq!(heap.int(-42).render().as_deref(), Some("-42"));
    assert_eq!(heap.uint(7).render().as_deref(), Some("7"));
    assert_eq!(heap.float(2.5).render().as_deref(), Some("2.5"));
    assert_eq!(heap.boolean(true).render().as_deref(), Some("true"));
    assert_eq!(heap.null().render().as_deref(), Some("null"));
    assert_eq!(heap.text("hi").render().as_deref(), Some("hi"));

    assert!(heap.bytes(vec![1]).render().is_none());
    assert!(BYTES.capability(Selector::Render).is_none());
    assert!(BYTES.capability(Selector::Equals).is_some());
}

#[test]
fn equals_checks_shape_before_dispatch() {
    let heap = Heap::new();
    assert!(heap.int(3).equals(&heap.int(3)));
    assert!(!heap.int(3).equals(&heap.int(4)));
    // Same numeric value, different shape.
    assert!(!heap.int(3).equals(&heap.uint(3)));
    assert!(!heap.float(3.0).equals(&heap.int(3)));
    assert!(heap.bytes(vec![1, 2]).equals(&heap.bytes(vec![1, 2])));
    assert!(!heap.bytes(vec![1, 2]).equals(&heap.bytes(vec![1])));
}

#[test]
fn equals_recurses_into_containers() {
    let heap = Heap::new();
    let build = |text: &str| {
        let mut v = heap.alloc(&DICT);
        let d = v.as_dict_mut().expect("dict shape");
        d.add_new("n", &INT).unwrap().set_int(1);
        let inner = d.add_new("items", &LIST).unwrap();
        let items = inner.as_list_mut().expect("list shape");
        items.push(heap.text(text));
        v
    };
    let a = build("same");
    let b = build("same");
    let c = build("different");
    assert!(a.equals(&b));
    assert!(a == b);
    assert!(!a.equals(&c));
}

#[test]
fn gauge_returns_to_zero_and_heaps_are_independent() {
    let first = Heap::new();
    let second = Heap::new();
    assert!(!first.same_gauge(&second));

    {
        let _a = first.int(1);
        let _b = first.text("hello");
        let _c = first.alloc(&DICT);
        assert_eq!(first.live_objects(), 3);
        assert!(first.live_bytes() > 0);
        assert_eq!(second.live_objects(), 0);
        assert_eq!(second.live_bytes(), 0);
    }
    assert_eq!(first.live_objects(), 0);
    assert_eq!(first.live_bytes(), 0);
}

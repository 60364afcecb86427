use pod_runtime::Text;
use proptest::prelude::*;

const INLINE_CAP: usize = 22;

proptest! {
    #[test]
    fn text_from_str_respects_inline_boundary(s in ".*") {
        let t = Text::from_str(&s);
        prop_assert_eq!(t.len(), s.len());
        prop_assert_eq!(t.as_str(), s.as_str());
        if s.len() <= INLINE_CAP {
            match t {
                Text::Inline { .. } => {},
                _ => prop_assert!(false, "expected Inline for len<=INLINE_CAP"),
            }
        } else {
            match t {
                Text::Heap { .. } => {},
                _ => prop_assert!(false, "expected Heap for len>INLINE_CAP"),
            }
        }
    }
}

proptest! {
    #[test]
    fn text_push_str_matches_string_append(a in ".*", b in ".*") {
        let mut t = Text::from_str(&a);
        t.push_str(&b);
        let expected = format!("{}{}", a, b);
        prop_assert_eq!(t.as_str(), expected.as_str());
        prop_assert_eq!(t.len(), expected.len());
    }
}

proptest! {
    #[test]
    fn text_equality_tracks_content(a in ".{0,30}", b in ".{0,30}") {
        let ta = Text::from_str(&a);
        let tb = Text::from_str(&b);
        prop_assert_eq!(ta == tb, a == b);
    }
}

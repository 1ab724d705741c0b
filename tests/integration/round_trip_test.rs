//! Integration tests for JSON -> ZW -> JSON round trips

#[cfg(test)]
mod round_trip_tests {
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use zwconv::{convert_json_to_zw_string, convert_zw_to_json_object, prettify_zw, to_zw};

    fn round_trip(value: &Value) -> Option<Value> {
        let zw = to_zw(value, Some("ZW-TEST")).unwrap();
        convert_zw_to_json_object(&zw)
    }

    #[test]
    fn test_plain_document_round_trips() {
        let value = json!({
            "title": "The Awakening",
            "act": 1,
            "rating": 4.5,
            "draft": false,
            "editor": null,
            "meta": {"location": "forest", "time": {"hour": 6, "minute": 30}},
            "tags": ["dawn", "journey", 3],
            "empty_list": [],
            "empty_map": {}
        });
        assert_eq!(round_trip(&value), Some(value));
    }

    #[test]
    fn test_numeric_string_and_number_stay_distinct() {
        let value = json!({"as_string": "42", "as_number": 42});
        let zw = to_zw(&value, Some("ZW-TEST")).unwrap();
        assert!(zw.contains("as_string: \"42\""));
        assert!(zw.contains("as_number: 42\n") || zw.ends_with("as_number: 42"));
        assert_eq!(convert_zw_to_json_object(&zw), Some(value));
    }

    #[test]
    fn test_keyword_strings_round_trip() {
        let value = json!({"a": "true", "b": "NULL", "c": "False", "d": "", "e": "say \"hi\""});
        assert_eq!(round_trip(&value), Some(value));
    }

    #[test]
    fn test_empty_string_document() {
        let zw = convert_json_to_zw_string(r#"{"a": ""}"#, Some("ZW-T"));
        assert_eq!(zw, "ZW-T:\n  a: \"\"");
        assert_eq!(convert_zw_to_json_object(&zw), Some(json!({"a": ""})));
    }

    #[test]
    fn test_list_of_objects_round_trips() {
        let value = json!({
            "items": [{"x": 1}, {"x": 2}],
            "dialogue": [
                {"speaker": "Tran", "line": "We leave at dawn.", "mood": {"tone": "calm"}},
                {"speaker": "Mai", "cues": ["nod", "smile"]}
            ]
        });
        assert_eq!(round_trip(&value), Some(value));
    }

    #[test]
    fn test_multiline_strings_round_trip() {
        let value = json!({
            "text": "line1\nline2",
            "poem": "first\n  indented\nlast",
            "list": ["a\nb", {"note": "one\ntwo"}]
        });
        assert_eq!(round_trip(&value), Some(value));
    }

    #[test]
    fn test_array_root_round_trips() {
        let value = json!([1, "two", {"three": 3}]);
        let zw = convert_json_to_zw_string(&value.to_string(), None);
        assert!(zw.starts_with("ZW-ARRAY:\n"));
        assert_eq!(convert_zw_to_json_object(&zw), Some(value));
    }

    #[test]
    fn test_prettify_preserves_meaning() {
        let messy = "ZW-TEST:\n   meta:\n       a: 1\n   list:\n      - x: 1\n        y: two\n";
        let pretty = prettify_zw(messy);
        assert_eq!(
            pretty,
            "ZW-TEST:\n  meta:\n    a: 1\n  list:\n    - x: 1\n      y: two"
        );
        assert_eq!(
            convert_zw_to_json_object(&pretty),
            convert_zw_to_json_object(messy)
        );
    }
}

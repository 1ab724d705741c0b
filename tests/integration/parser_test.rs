//! Integration tests for ZW parsing and ZW -> JSON conversion

#[cfg(test)]
mod parser_tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use zwconv::parser::{ItemValue, ZwValue};
    use zwconv::{convert_zw_to_json_object, parse_zw, validate_zw, ZwParser};

    const SCENE: &str = "\
ZW-NARRATIVE-SCENE:
  # Opening scene
  TITLE: The Awakening
  META:
    ACT: 1
    DRAFT: false
    RATING: 4.5

  CAST:
    - Tran
    - Mai
  DIALOGUE:
    - SPEAKER: Tran
      LINE: We leave at dawn.
    - SPEAKER: Mai
      LINE: Then we rest now.
  NOTES: The light is thin
  and the road is long.
";

    #[test]
    fn test_root_key_is_the_type_declaration() {
        let root = parse_zw(SCENE, ":").unwrap().unwrap();
        assert_eq!(root.key, "ZW-NARRATIVE-SCENE");
        assert_eq!(root.depth, 0);
    }

    #[test]
    fn test_full_document_to_json() {
        assert_eq!(
            convert_zw_to_json_object(SCENE),
            Some(json!({
                "TITLE": "The Awakening",
                "META": {"ACT": 1, "DRAFT": false, "RATING": 4.5},
                "CAST": ["Tran", "Mai"],
                "DIALOGUE": [
                    {"SPEAKER": "Tran", "LINE": "We leave at dawn."},
                    {"SPEAKER": "Mai", "LINE": "Then we rest now."}
                ],
                "NOTES": "The light is thin\nand the road is long."
            }))
        );
    }

    #[test]
    fn test_fenced_document() {
        let fenced = "```zw\nZW-NOTE:\n  TEXT: inside a fence\n```";
        assert_eq!(
            convert_zw_to_json_object(fenced),
            Some(json!({"TEXT": "inside a fence"}))
        );
    }

    #[test]
    fn test_malformed_root_is_an_error_not_a_node() {
        let err = parse_zw("FOO: bar", ":").unwrap_err();
        assert_eq!(err.line_number, Some(1));
        assert!(validate_zw("ZW-OK:"));
        assert!(!validate_zw("FOO: bar"));
        assert_eq!(convert_zw_to_json_object("FOO: bar"), None);
    }

    #[test]
    fn test_text_without_root_never_succeeds() {
        for text in ["just words", "- item", "  : nothing", "FOO: bar\n  A: 1"] {
            assert!(parse_zw(text, ":").is_err(), "{:?}", text);
        }
    }

    #[test]
    fn test_two_and_three_space_indents_share_depth() {
        let root = parse_zw("R:\n  A: 1\n   B: 2\n", ":").unwrap().unwrap();
        let depths: Vec<usize> = root.children().iter().map(|n| n.depth).collect();
        assert_eq!(depths, vec![1, 1]);
    }

    #[test]
    fn test_key_value_list_items_keep_item_key() {
        let root = parse_zw("R:\n  items:\n    - x: 1\n    - x: 2\n", ":")
            .unwrap()
            .unwrap();
        let items = root.get("items").unwrap().items();
        assert_eq!(items.len(), 2);
        for (item, expected) in items.iter().zip(["1", "2"]) {
            assert_eq!(item.item_key.as_deref(), Some("x"));
            assert_eq!(item.value, ItemValue::Scalar(expected.to_string()));
        }
    }

    #[test]
    fn test_scalar_typing() {
        let text = "R:\n  a: 007\n  b: 1e5\n  c: True\n  d: null\n  e: \"42\"\n  f: -0.5\n  g: [] # Empty list\n";
        assert_eq!(
            convert_zw_to_json_object(text),
            Some(json!({
                "a": "007",
                "b": "1e5",
                "c": true,
                "d": null,
                "e": "42",
                "f": -0.5,
                "g": []
            }))
        );
    }

    #[test]
    fn test_custom_delimiter_document() {
        let parser = ZwParser::new("=");
        let root = parser.parse("ZW-CFG=\n  MODE= fast\n  LIMITS=\n    MAX= 3\n").unwrap().unwrap();
        assert_eq!(root.get("MODE").and_then(|n| n.scalar()), Some("fast"));
        assert!(matches!(root.get("LIMITS").unwrap().value, ZwValue::Sections(_)));
    }

    #[test]
    fn test_keys_after_plain_items_keep_their_types() {
        assert_eq!(
            convert_zw_to_json_object("ZW-X:\n  L:\n    - 1\n    - 2\n    NOTE: x\n"),
            Some(json!({"L": [1, 2, {"NOTE": "x"}]}))
        );
        assert_eq!(
            convert_zw_to_json_object("ZW-X:\n  L:\n    - a\n    S:\n      K: 1\n"),
            Some(json!({"L": ["a", {"S": {"K": 1}}]}))
        );
    }

    #[test]
    fn test_partially_quoted_text_is_kept_verbatim() {
        assert_eq!(
            convert_zw_to_json_object("ZW-X:\n  LINE: \"Hi\" she said \"bye\"\n"),
            Some(json!({"LINE": "\"Hi\" she said \"bye\""}))
        );
    }
}

//! Integration tests for JSON -> ZW serialization

#[cfg(test)]
mod serializer_tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use zwconv::{
        convert_json_to_zw_string, convert_zw_to_json_object, to_zw, to_zw_with_config,
        ConversionError, ZwConfig,
    };

    #[test]
    fn test_list_of_objects_layout() {
        let zw = to_zw(&json!({"items": [{"x": 1}, {"x": 2}]}), Some("ZW-TEST")).unwrap();
        assert_eq!(zw, "ZW-TEST:\n  items:\n    - x: 1\n    - x: 2");
    }

    #[test]
    fn test_quoting_rules() {
        let zw = to_zw(
            &json!({"s": "42", "n": 42, "t": "true", "z": "null", "w": "plain words", "e": ""}),
            Some("ZW-Q"),
        )
        .unwrap();
        assert_eq!(
            zw,
            "ZW-Q:\n  s: \"42\"\n  n: 42\n  t: \"true\"\n  z: \"null\"\n  w: plain words\n  e: \"\""
        );
    }

    #[test]
    fn test_numbers_use_canonical_form() {
        let zw = to_zw(&json!({"a": 1.0, "b": 0.1, "c": 1e21, "d": -3}), Some("ZW-N")).unwrap();
        assert_eq!(zw, "ZW-N:\n  a: 1\n  b: 0.1\n  c: 1e+21\n  d: -3");
    }

    #[test]
    fn test_empty_object_root_is_bare_declaration() {
        assert_eq!(to_zw(&json!({}), Some("ZW-EMPTY")).unwrap(), "ZW-EMPTY:");
    }

    #[test]
    fn test_primitive_root_uses_value_entry() {
        let zw = to_zw(&json!(3.5), None).unwrap();
        assert_eq!(zw, "ZW-VALUE:\n  value: 3.5");
        assert_eq!(convert_zw_to_json_object(&zw), Some(json!({"value": 3.5})));
    }

    #[test]
    fn test_lossy_list_elements() {
        let zw = to_zw(&json!({"l": [{}, [1, 2], []]}), Some("ZW-L")).unwrap();
        assert_eq!(
            zw,
            "ZW-L:\n  l:\n    - {}\n    - [1,2]\n    - [] # Empty list"
        );
        assert_eq!(
            convert_zw_to_json_object(&zw),
            Some(json!({"l": ["{}", "[1,2]", []]}))
        );
    }

    #[test]
    fn test_invalid_json_becomes_comment_document() {
        let zw = convert_json_to_zw_string("{\"a\": ", Some("ZW-X"));
        assert!(zw.starts_with("# Error: "), "{}", zw);
        assert_eq!(convert_zw_to_json_object(&zw), None);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ZwConfig::new().with_root_type(Some("bad root".to_string()));
        let err = to_zw_with_config(&json!({}), &config).unwrap_err();
        assert!(matches!(err, ConversionError::Conversion { .. }));
    }

    #[test]
    fn test_custom_delimiter_output_reparses() {
        let config = ZwConfig::new()
            .with_delimiter("=")
            .with_root_type(Some("ZW-CFG".to_string()));
        let zw = to_zw_with_config(&json!({"mode": "fast", "limits": {"max": 3}}), &config).unwrap();
        assert_eq!(zw, "ZW-CFG=\n  mode= fast\n  limits=\n    max= 3");
    }

    #[test]
    fn test_depth_limit() {
        let config = ZwConfig::new().with_max_depth(Some(3));
        let deep = json!({"a": {"b": {"c": {"d": 1}}}});
        assert!(to_zw_with_config(&deep, &config).is_err());
        assert!(to_zw_with_config(&json!({"a": {"b": {"c": 1}}}), &config).is_ok());
    }
}

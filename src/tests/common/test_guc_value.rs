use crate::*;

pub fn test_parse_bool() {
    info!("test_parse_bool");

    for text in ["true", "TRUE", "t", "tr", "yes", "y", "on", "ON", "1", " true "] {
        assert_eq!(parse_bool(text), Some(true), "{}", text);
    }
    for text in ["false", "f", "fal", "no", "n", "off", "of", "OFF", "0"] {
        assert_eq!(parse_bool(text), Some(false), "{}", text);
    }
    for text in ["", "o", "truth", "2", "10", "nope", "enable"] {
        assert_eq!(parse_bool(text), None, "{}", text);
    }
}

pub fn test_parse_int() {
    info!("test_parse_int");

    assert_eq!(parse_int("a.b", "42"), Ok(42));
    assert_eq!(parse_int("a.b", " -7 "), Ok(-7));
    assert_eq!(parse_int("a.b", "+7"), Ok(7));
    assert_eq!(parse_int("a.b", "0x10"), Ok(16));
    assert_eq!(parse_int("a.b", "0XfF"), Ok(255));
    assert_eq!(parse_int("a.b", "2147483647"), Ok(i32::MAX));
    assert_eq!(parse_int("a.b", "-2147483648"), Ok(i32::MIN));

    assert_eq!(
        parse_int("a.b", "2147483648"),
        Err(GucError::out_of_range("a.b", 2147483648, i32::MIN, i32::MAX))
    );
    for text in ["", "-", "abc", "12abc", "1.5", "0x", "1 2"] {
        assert_eq!(
            parse_int("a.b", text),
            Err(GucError::invalid_value("a.b", text)),
            "{}",
            text
        );
    }
}

pub fn test_parse_by_kind() {
    info!("test_parse_by_kind");

    assert_eq!(
        GucValue::parse("a.flag", GucKind::Bool, "on"),
        Ok(GucValue::Bool(true))
    );
    assert_eq!(
        GucValue::parse("a.flag", GucKind::Bool, "maybe"),
        Err(GucError::requires_boolean("a.flag"))
    );
    assert_eq!(
        GucValue::parse("a.count", GucKind::Int, "12"),
        Ok(GucValue::Int(12))
    );
}

pub fn test_format() {
    info!("test_format");

    assert_eq!(GucValue::Bool(true).to_string(), "on");
    assert_eq!(GucValue::Bool(false).to_string(), "off");
    assert_eq!(GucValue::Int(16777216).to_string(), "16777216");
    assert_eq!(GucValue::Int(-1).to_string(), "-1");
    assert_eq!(GucKind::Int.to_string(), "integer");
    assert_eq!(GucKind::Bool.to_string(), "bool");

    assert_eq!(
        serde_json::to_value(GucValue::Int(3)).expect("should serialize"),
        serde_json::json!(3)
    );
    assert_eq!(
        serde_json::to_value(GucValue::Bool(true)).expect("should serialize"),
        serde_json::json!(true)
    );
}

pub fn test_typed_conversion() {
    info!("test_typed_conversion");

    assert_eq!(i32::from_guc_value(&GucValue::Int(5)), Some(5));
    assert_eq!(i32::from_guc_value(&GucValue::Bool(true)), None);
    assert_eq!(bool::from_guc_value(&GucValue::Bool(true)), Some(true));
    assert_eq!(bool::from_guc_value(&GucValue::Int(1)), None);
    assert_eq!(7i32.into_guc_value(), GucValue::from(7));
    assert_eq!(<bool as GucType>::KIND, GucKind::Bool);
}

pub fn test_all() {
    test_parse_bool();
    test_parse_int();
    test_parse_by_kind();
    test_format();
    test_typed_conversion();
}

use serde_json::json;
use uval::prelude::*;

// === String ===

#[test]
fn string_loose_coercion() {
    let r = uval::string().validate(&json!(123));
    assert!(r.valid);
    assert_eq!(r.value, json!("123"));
    assert!(r.error.is_empty());
    assert_eq!(serde_json::to_value(&r).unwrap()["error"], json!(""));

    assert_eq!(uval::string().validate(&json!(1.5)).value, json!("1.5"));
    assert_eq!(uval::string().validate(&json!(-7)).value, json!("-7"));
    assert_eq!(uval::string().validate(&json!(0.0000001)).value, json!("1e-7"));
    assert_eq!(uval::string().validate(&json!(1e21)).value, json!("1e+21"));
}

#[test]
fn string_strict_rejects_numbers() {
    let r = uval::string().strict().validate(&json!(123));
    assert!(!r.valid);
    assert_eq!(r.value, json!(123));
    assert_eq!(r.error.as_str(), Some("expected string value"));

    let r = uval::string().strict_msg("text only").validate(&json!(1));
    assert_eq!(r.error.as_str(), Some("text only"));
}

#[test]
fn string_rejects_other_types() {
    let s = uval::string();
    for v in [json!(true), json!([]), json!({"a": 1})] {
        let r = s.validate(&v);
        assert!(!r.valid);
        assert_eq!(r.error.as_str(), Some("expected string value"));
        assert_eq!(r.value, v);
    }
}

#[test]
fn string_type_error_override() {
    let r = uval::string().type_error("need text").validate(&json!(false));
    assert_eq!(r.error.as_str(), Some("need text"));
}

#[test]
fn string_nullish_and_required() {
    let s = uval::string();
    assert!(s.validate(&json!(null)).valid);
    assert_eq!(s.validate(&json!(null)).value, json!(null));
    assert!(s.validate(&json!("")).valid);

    let s = uval::string().required().min_length(3);
    let r = s.validate(&json!(null));
    assert!(!r.valid);
    assert_eq!(r.error.as_str(), Some("required field"));
    assert_eq!(s.validate(&json!("")).error.as_str(), Some("required field"));

    let s = uval::string().required_msg("name please");
    assert_eq!(s.validate(&json!("")).error.as_str(), Some("name please"));

    let s = uval::string().required().not_required();
    assert!(s.validate(&json!(null)).valid);
}

#[test]
fn string_length_family() {
    let s = uval::string().min_length(3).max_length(5);
    assert!(!s.is_valid(&json!("ab")));
    assert!(s.is_valid(&json!("abc")));
    assert!(s.is_valid(&json!("abcde")));
    assert!(!s.is_valid(&json!("abcdef")));

    assert_eq!(
        s.validate(&json!("ab")).error.as_str(),
        Some("minimum field length 3 characters")
    );
    assert_eq!(
        s.validate(&json!("abcdef")).error.as_str(),
        Some("maximum field length 5 characters")
    );

    let s = uval::string().length(4);
    assert!(s.is_valid(&json!("abcd")));
    assert_eq!(
        s.validate(&json!("abc")).error.as_str(),
        Some("field length must be 4 characters")
    );
}

#[test]
fn string_length_counts_utf16_units() {
    let s = uval::string().length(3);
    assert!(s.is_valid(&json!("жук")));
    assert!(s.is_valid(&json!("日本語")));

    // characters outside the BMP take two units
    assert!(!uval::string().max_length(1).is_valid(&json!("😀")));
    assert!(uval::string().length(2).is_valid(&json!("😀")));
    assert!(uval::string().min_length(3).is_valid(&json!("a😀")));
}

#[test]
fn string_length_checks_coerced_value() {
    let s = uval::string().length(3);
    assert!(s.is_valid(&json!(123)));
    assert!(!s.is_valid(&json!(12)));
}

#[test]
fn string_first_failure_wins() {
    let s = uval::string()
        .max_length(2)
        .matches(uval::regex_lite::Regex::new(r"^\d+$").unwrap());
    let r = s.validate(&json!("abc"));
    assert_eq!(r.error.as_str(), Some("maximum field length 2 characters"));
    assert_eq!(r.value, json!("abc"));

    let r = s.validate(&json!("ab"));
    assert_eq!(r.error.as_str(), Some("invalid data format"));
}

#[test]
fn string_invalid_keeps_original_value() {
    let r = uval::string().length(1).validate(&json!(42));
    assert!(!r.valid);
    assert_eq!(r.value, json!(42));
}

#[test]
fn string_matches() {
    let s = uval::string().matches_msg(
        uval::regex_lite::Regex::new(r"^[a-z]+@[a-z]+\.[a-z]+$").unwrap(),
        "bad email",
    );
    assert!(s.is_valid(&json!("a@b.cd")));
    assert_eq!(s.validate(&json!("nope")).error.as_str(), Some("bad email"));
}

#[test]
fn string_one_of_literals() {
    let s = uval::string().one_of(["red", "green"]);
    assert!(s.is_valid(&json!("red")));
    let r = s.validate(&json!("blue"));
    assert_eq!(
        r.error.as_str(),
        Some("value must be equal to one of the following values: red, green")
    );
}

#[test]
fn string_one_of_mixes_references() {
    let s = uval::string().one_of(vec![
        Candidate::from("fixed"),
        Candidate::from(uval::ref_path("primary")),
    ]);
    let parent = json!({"primary": "blue"});
    let ctx = Context::new().with_parent(&parent);
    let opts = ValidateOptions::default();

    assert!(s.validate_with(&json!("blue"), &opts, &ctx).valid);
    assert!(s.validate_with(&json!("fixed"), &opts, &ctx).valid);
    assert!(!s.validate_with(&json!("green"), &opts, &ctx).valid);
    // without a parent the reference never matches
    assert!(!s.is_valid(&json!("blue")));

    let r = s.validate_with(&json!("green"), &opts, &ctx);
    assert_eq!(
        r.error.as_str(),
        Some("value must be equal to one of the following values: fixed, primary")
    );
}

#[test]
fn string_equals_reference() {
    let s = uval::string().equals(uval::ref_path("password"));
    let parent = json!({"password": "s"});
    let ctx = Context::new().with_parent(&parent);

    let r = s.validate_with(&json!("s"), &ValidateOptions::default(), &ctx);
    assert!(r.valid);
    assert_eq!(r.value, json!("s"));

    let r = s.validate_with(&json!("t"), &ValidateOptions::default(), &ctx);
    assert_eq!(r.error.as_str(), Some("field must match password field"));
}

#[test]
fn string_equals_literal() {
    let s = uval::string().equals_msg("yes", "type yes");
    assert!(s.is_valid(&json!("yes")));
    assert_eq!(s.validate(&json!("no")).error.as_str(), Some("type yes"));
}

#[test]
fn string_equals_non_string_target_never_matches() {
    let s = uval::string().equals(uval::ref_path("n"));
    let parent = json!({"n": 5});
    let ctx = Context::new().with_parent(&parent);
    assert!(!s.validate_with(&json!("5"), &ValidateOptions::default(), &ctx).valid);
}

#[test]
fn string_one_of_clears_length_family() {
    let s = uval::string().min_length(10).one_of(["a", "b"]);
    assert!(s.is_valid(&json!("a")));

    let s = uval::string().one_of(["a", "b"]).min_length(10);
    assert!(s.is_valid(&json!("zzzzzzzzzz")));
    assert!(!s.is_valid(&json!("a")));
}

#[test]
fn string_equals_and_one_of_exclusive() {
    let s = uval::string().equals("x").one_of(["y"]);
    assert!(s.is_valid(&json!("y")));
    assert!(!s.is_valid(&json!("x")));

    let s = uval::string().one_of(["y"]).equals("x");
    assert!(s.is_valid(&json!("x")));
    assert!(!s.is_valid(&json!("y")));

    let s = uval::string().max_length(1).equals("long value");
    assert!(s.is_valid(&json!("long value")));
}

#[test]
fn string_resetting_check_replaces_it() {
    let s = uval::string().min_length(5).max_length(8).min_length(2);
    assert!(s.is_valid(&json!("abc")));
    // min_length keeps its position ahead of max_length
    let r = s.validate(&json!("a"));
    assert_eq!(r.error.as_str(), Some("minimum field length 2 characters"));
}

// === Number ===

#[test]
fn number_min_message() {
    let r = uval::number().min(2.0).validate(&json!(0));
    assert!(!r.valid);
    assert_eq!(r.value, json!(0));
    assert_eq!(
        r.error.as_str(),
        Some("minimum value is greater than or equal to 2")
    );
}

#[test]
fn number_max_message() {
    let r = uval::number().max(2.5).validate(&json!(3));
    assert_eq!(
        r.error.as_str(),
        Some("the maximum value is less than or equal to 2.5")
    );
    assert!(uval::number().max(2.5).is_valid(&json!(2.5)));
}

#[test]
fn number_loose_strings() {
    let n = uval::number();
    assert_eq!(n.validate(&json!("42")).value, json!(42));
    assert_eq!(n.validate(&json!(" 1.5 ")).value, json!(1.5));
    assert_eq!(n.validate(&json!("1e3")).value, json!(1000));
    assert_eq!(n.validate(&json!("0x1f")).value, json!(31));
    assert_eq!(n.validate(&json!("-3")).value, json!(-3));
}

#[test]
fn number_rejects_garbage() {
    let n = uval::number();
    for v in [json!("1px"), json!("abc"), json!("NaN"), json!("  "), json!(true), json!([1])] {
        let r = n.validate(&v);
        assert!(!r.valid, "{v} should be rejected");
        assert_eq!(r.error.as_str(), Some("expected number value"));
        assert_eq!(r.value, v);
    }
}

#[test]
fn number_rejects_infinity_strings() {
    assert!(!uval::number().is_valid(&json!("Infinity")));
    assert!(!uval::number().is_valid(&json!("1e400")));
}

#[test]
fn number_strict() {
    let n = uval::number().strict();
    assert!(n.is_valid(&json!(4)));
    assert!(!n.is_valid(&json!("4")));
    let r = uval::number().strict_msg("numbers only").validate(&json!("4"));
    assert_eq!(r.error.as_str(), Some("numbers only"));
}

#[test]
fn number_blank_is_absent() {
    assert!(uval::number().is_valid(&json!("")));
    let r = uval::number().required().validate(&json!(""));
    assert_eq!(r.error.as_str(), Some("required field"));
}

#[test]
fn number_checks_run_after_coercion() {
    let n = uval::number().min(10.0);
    assert!(n.is_valid(&json!("10")));
    let r = n.validate(&json!("9"));
    assert!(!r.valid);
    assert_eq!(r.value, json!("9"));
}

#[test]
fn number_preserves_native_values() {
    assert_eq!(uval::number().validate(&json!(2.0)).value, json!(2.0));
    assert_eq!(uval::number().validate(&json!(-0.25)).value, json!(-0.25));
}

// === Boolean ===

#[test]
fn boolean_loose() {
    let b = uval::boolean();
    assert_eq!(b.validate(&json!(true)).value, json!(true));
    assert_eq!(b.validate(&json!(1)).value, json!(true));
    assert_eq!(b.validate(&json!(0)).value, json!(false));
    assert!(!b.is_valid(&json!(2)));
    assert!(!b.is_valid(&json!("true")));
    assert_eq!(
        b.validate(&json!("true")).error.as_str(),
        Some("expected boolean value")
    );
}

#[test]
fn boolean_strict() {
    let b = uval::boolean().strict();
    assert!(b.is_valid(&json!(false)));
    assert!(!b.is_valid(&json!(0)));
}

#[test]
fn boolean_is_true_and_is_false_replace_each_other() {
    let b = uval::boolean().is_true();
    assert!(b.is_valid(&json!(true)));
    assert_eq!(b.validate(&json!(false)).error.as_str(), Some("value must be \"true\""));

    let b = uval::boolean().is_true().is_false();
    assert!(b.is_valid(&json!(false)));
    assert_eq!(b.validate(&json!(1)).error.as_str(), Some("value must be \"false\""));

    let b = uval::boolean().is_false_msg("must decline");
    assert_eq!(b.validate(&json!(true)).error.as_str(), Some("must decline"));
}

#[test]
fn boolean_required() {
    let b = uval::boolean().required();
    assert!(!b.is_valid(&json!(null)));
    // empty string is not nullish for booleans
    assert_eq!(
        b.validate(&json!("")).error.as_str(),
        Some("expected boolean value")
    );
}

// === Schema trait ===

#[test]
fn schema_kinds() {
    assert_eq!(uval::string().kind(), uval::SchemaKind::String);
    assert_eq!(uval::number().kind().name(), "number");
    assert_eq!(uval::boolean().kind().to_string(), "boolean");
}

#[test]
fn schemas_usable_as_trait_objects() {
    let schemas = vec![
        std::sync::Arc::new(uval::string()) as SchemaRef,
        std::sync::Arc::new(uval::number()) as SchemaRef,
        std::sync::Arc::new(uval::boolean()) as SchemaRef,
    ];
    let results: Vec<bool> = schemas.iter().map(|s| s.is_valid(&json!(1))).collect();
    assert_eq!(results, vec![true, true, true]);
}

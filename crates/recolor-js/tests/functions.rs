//! User function tests for recolor-js
//!
//! Functions written the way palette authors write them.

use recolor_color::{Color, ColorLike, ColorTransform, normalize};
use recolor_js::{CompileError, JsConfig, JsTransform, UserFunction};

fn apply(body: &str, literal: &str) -> Color {
    let color = recolor_color::parse(literal).unwrap();
    let mut function = JsTransform::compile(body).unwrap();
    let result = function.transform(&color.to_hex(), color).unwrap();
    normalize(&result).unwrap()
}

#[test]
fn test_invert_function() {
    let color = apply("return color_rgb_value_invert(color);", "#ffffff");
    assert_eq!(color.to_css_text(), "#000000");
}

#[test]
fn test_palette_lookup() {
    let body = r##"
        var palette = { "#ff0000": "teal", "#0000ff": [255, 255, 0] };
        return palette[hexcolor] || color;
    "##;
    assert_eq!(apply(body, "red").to_css_text(), "#008080");
    assert_eq!(apply(body, "blue").to_css_text(), "#ffff00");
    assert_eq!(apply(body, "lime").to_css_text(), "#00ff00");
}

#[test]
fn test_darken_keeps_alpha() {
    let body = "return color_mul(color, [128, 128, 128, 1]);";
    assert_eq!(apply(body, "rgba(255, 255, 255, 0.5)").to_css_text(), "rgba(128,128,128,0.5)");
}

#[test]
fn test_chained_helpers() {
    let body = "return color_cut_contrast(color_soft_contrast(color, 1), 0);";
    assert_eq!(apply(body, "#000000").to_css_text(), "#000000");
}

#[test]
fn test_non_finite_result_is_hard_failure() {
    let color = Color::BLACK;
    let mut function = JsTransform::compile("return color_div(color, [0, 0, 0, 1]);").unwrap();
    let result = function.transform("#000000", color).unwrap();

    match &result {
        ColorLike::Components(values) => assert!(values[0].is_nan()),
        other => panic!("Expected components, got {:?}", other),
    }
    assert!(normalize(&result).unwrap_err().is_hard());
}

#[test]
fn test_runtime_error_names_the_problem() {
    let mut function = JsTransform::compile("return undefinedHelper(color);").unwrap();
    let err = function.transform("#000000", Color::BLACK).unwrap_err();
    assert!(err.message().starts_with("ReferenceError"));
    assert!(err.message().contains("undefinedHelper"));
}

#[test]
fn test_compile_errors() {
    assert!(matches!(JsTransform::compile("return {"), Err(CompileError::Syntax(_))));
    assert!(matches!(UserFunction::compile("return }"), UserFunction::Broken(_)));
    assert!(UserFunction::compile("return color;").is_compiled());
}

#[test]
fn test_memory_limit() {
    let config = JsConfig {
        memory_limit: 4 * 1024 * 1024,
        ..JsConfig::default()
    };
    let body = "var big = []; \
                for (var i = 0; i < 10000000; i++) big.push('item' + i); \
                return color;";
    let mut function = JsTransform::with_config(body, &config).unwrap();
    assert!(function.transform("#000000", Color::BLACK).is_err());
}

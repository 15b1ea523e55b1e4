//! Color API bindings
//!
//! Exposes the color arithmetic to user functions as global functions over
//! `[r, g, b, a]` arrays.

use recolor_color::{Color, arithmetic, clamp01, clamp255, wrap255};
use rquickjs::function::Opt;
use rquickjs::{Ctx, Function};

type Binary = fn(Color, Color) -> Color;
type WithAmount = fn(Color, f64) -> Color;

const BINARY: &[(&str, Binary)] = &[
    ("color_add", arithmetic::add),
    ("color_sub", arithmetic::subtract),
    ("color_mul", arithmetic::multiply),
    ("color_div", arithmetic::divide),
    ("color_mod", arithmetic::modulo),
    ("color_pow", arithmetic::power),
    ("color_shift", arithmetic::shift),
];

const WITH_AMOUNT: &[(&str, WithAmount)] = &[
    ("color_rgb_value_shift", arithmetic::rgb_value_shift),
    ("color_soft_contrast", arithmetic::soft_contrast),
    ("color_cut_contrast", arithmetic::cut_contrast),
];

const SCALAR: &[(&str, fn(f64) -> f64)] = &[
    ("sign", arithmetic::sign),
    ("abs", f64::abs),
    ("smoothstep", arithmetic::smoothstep),
    ("clamp255", clamp255),
    ("clamp01", clamp01),
    ("wrap255", wrap255),
    // older names
    ("clamp1f", clamp01),
    ("close255", wrap255),
];

/// Install the color API into the global object
pub fn install_color_api(ctx: &Ctx<'_>) -> rquickjs::Result<()> {
    let globals = ctx.globals();

    for &(name, op) in BINARY {
        let function = Function::new(ctx.clone(), move |a: Vec<f64>, b: Vec<f64>| {
            Ok::<_, rquickjs::Error>(components(op(to_color(a)?, to_color(b)?)))
        })?;
        globals.set(name, function)?;
    }

    for &(name, op) in WITH_AMOUNT {
        let function = Function::new(ctx.clone(), move |c: Vec<f64>, amount: f64| {
            Ok::<_, rquickjs::Error>(components(op(to_color(c)?, amount)))
        })?;
        globals.set(name, function)?;
    }

    for &(name, op) in SCALAR {
        globals.set(name, Function::new(ctx.clone(), move |x: f64| op(x))?)?;
    }

    globals.set(
        "color_lerp",
        Function::new(ctx.clone(), |a: Vec<f64>, b: Vec<f64>, t: f64| {
            Ok::<_, rquickjs::Error>(components(arithmetic::lerp(to_color(a)?, to_color(b)?, t)))
        })?,
    )?;

    globals.set(
        "color_rgb_value_invert",
        Function::new(ctx.clone(), |c: Vec<f64>, scale: Opt<f64>| {
            // a missing, zero or NaN scale means a full invert
            let scale = scale.0.filter(|s| *s != 0.0 && !s.is_nan()).unwrap_or(1.0);
            Ok::<_, rquickjs::Error>(components(arithmetic::rgb_value_invert(to_color(c)?, scale)))
        })?,
    )?;

    globals.set(
        "lerp",
        Function::new(ctx.clone(), |a: f64, b: f64, t: f64| arithmetic::lerp_scalar(a, b, t))?,
    )?;

    tracing::debug!("Installed color API");
    Ok(())
}

/// Accept `[r, g, b]` or `[r, g, b, a]`
fn to_color(values: Vec<f64>) -> rquickjs::Result<Color> {
    match *values.as_slice() {
        [r, g, b] => Ok(Color::rgb(r, g, b)),
        [r, g, b, a] => Ok(Color::new(r, g, b, a)),
        _ => Err(rquickjs::Error::new_from_js_message(
            "array",
            "color",
            format!("expected 3 or 4 color components, got {}", values.len()),
        )),
    }
}

fn components(color: Color) -> Vec<f64> {
    color.to_array().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rquickjs::{Context, Runtime, Value};

    fn eval_components(code: &str) -> Vec<f64> {
        let runtime = Runtime::new().unwrap();
        let context = Context::full(&runtime).unwrap();
        context.with(|ctx| {
            install_color_api(&ctx).unwrap();
            ctx.eval::<Vec<f64>, _>(code).unwrap()
        })
    }

    fn eval_number(code: &str) -> f64 {
        let runtime = Runtime::new().unwrap();
        let context = Context::full(&runtime).unwrap();
        context.with(|ctx| {
            install_color_api(&ctx).unwrap();
            ctx.eval::<f64, _>(code).unwrap()
        })
    }

    #[test]
    fn test_color_shift_wraps() {
        assert_eq!(
            eval_components("color_shift([250, 250, 250, 1], [10, 10, 10, 0])"),
            vec![4.0, 4.0, 4.0, 1.0]
        );
    }

    #[test]
    fn test_three_components_get_alpha() {
        assert_eq!(eval_components("color_add([1, 2, 3], [1, 1, 1])"), vec![2.0, 3.0, 4.0, 2.0]);
    }

    #[test]
    fn test_color_mul_and_lerp() {
        assert_eq!(
            eval_components("color_mul([255, 128, 0, 0.5], [255, 255, 255, 0.5])"),
            vec![255.0, 128.0, 0.0, 0.25]
        );
        assert_eq!(
            eval_components("color_lerp([0, 0, 0, 0], [100, 200, 50, 1], 0.5)"),
            vec![50.0, 100.0, 25.0, 0.5]
        );
    }

    #[test]
    fn test_invert_default_scale() {
        let full = vec![255.0, 255.0, 255.0, 1.0];
        assert_eq!(eval_components("color_rgb_value_invert([0, 0, 0, 1])"), full);
        assert_eq!(eval_components("color_rgb_value_invert([0, 0, 0, 1], 0)"), full);
        assert_eq!(
            eval_components("color_rgb_value_invert([0, 0, 0, 1], 0.5)"),
            vec![127.5, 127.5, 127.5, 1.0]
        );
    }

    #[test]
    fn test_scalar_helpers() {
        assert_eq!(eval_number("sign(-4) + sign(0) + sign(9)"), 0.0);
        assert_eq!(eval_number("lerp(10, 20, 0.25)"), 12.5);
        assert_eq!(eval_number("clamp255(300) + clamp01(-1)"), 255.0);
        assert_eq!(eval_number("wrap255(-1)"), 255.0);
        assert_eq!(eval_number("close255(260)"), 4.0);
        assert_eq!(eval_number("smoothstep(0.5)"), 0.5);
    }

    #[test]
    fn test_wrong_arity_throws() {
        let runtime = Runtime::new().unwrap();
        let context = Context::full(&runtime).unwrap();
        context.with(|ctx| {
            install_color_api(&ctx).unwrap();
            let caught: Value = ctx
                .eval(
                    "(function() { try { color_add([1, 2], [1, 2, 3]); return 'no'; } \
                     catch (e) { return 'threw'; } })()",
                )
                .unwrap();
            assert_eq!(caught.as_string().unwrap().to_string().unwrap(), "threw");
        });
    }
}

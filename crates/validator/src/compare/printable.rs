//! Type-aware rendering of comparison targets.

use crate::coerce::Dynamic;

/// Render `value` with its type name, as `int64(5)` or `string("abc")`.
///
/// Floats print with six fractional digits.
pub fn printable(value: &Dynamic) -> String {
    let ty = value.type_name();
    match value {
        Dynamic::String(s) => format!("{ty}({s:?})"),
        Dynamic::Float32(v) => format!("{ty}({v:.6})"),
        Dynamic::Float64(v) => format!("{ty}({v:.6})"),
        other => format!("{ty}({other})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coerce::CustomValue;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case(Dynamic::from("abc"), r#"string("abc")"#)]
    #[case(Dynamic::from(5_i64), "int64(5)")]
    #[case(Dynamic::from(5_isize), "int(5)")]
    #[case(Dynamic::from(1.5_f64), "float64(1.500000)")]
    #[case(Dynamic::from(true), "bool(true)")]
    #[case(Dynamic::from(Decimal::new(125, 2)), "decimal(1.25)")]
    #[case(Dynamic::from(vec!["a", "b"]), "[]string([a b])")]
    #[case(Dynamic::from(vec![1_i64, 2]), "[]int64([1 2])")]
    fn renders_type_and_value(#[case] value: Dynamic, #[case] expected: &str) {
        assert_eq!(printable(&value), expected);
    }

    #[test]
    fn custom_values_use_type_name() {
        #[derive(Debug)]
        struct Level(u8);
        let rendered = printable(&Dynamic::from(CustomValue::new(Level(2))));
        assert!(rendered.ends_with("Level(Level(2))"), "{rendered}");
    }
}

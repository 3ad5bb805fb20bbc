//! Pure helper functions for extracting typed parameters from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing, or the value has the wrong type or does not fit the target
//! integer width, the default is returned.

use serde_json::Value;

/// Extracts a `u32` from `params[name]`, returning `default` if missing, wrong type, or too large.
///
/// Accepts hexadecimal strings with a `0x` prefix as well as JSON integers,
/// since seeds are usually written in hex.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    match params.get(name) {
        Some(Value::String(s)) => parse_hex_u32(s).unwrap_or(default),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(default),
        None => default,
    }
}

/// Extracts a `u64` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_u64(params: &Value, name: &str, default: u64) -> u64 {
    params.get(name).and_then(Value::as_u64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

fn parse_hex_u32(s: &str) -> Option<u32> {
    let digits = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))?;
    u32::from_str_radix(&digits.replace('_', ""), 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- param_u32 --

    #[test]
    fn param_u32_extracts_existing_integer() {
        let params = json!({"attempts": 231});
        assert_eq!(param_u32(&params, "attempts", 0), 231);
    }

    #[test]
    fn param_u32_extracts_hex_string() {
        let params = json!({"seed_u": "0xC0DE_15AF"});
        assert_eq!(param_u32(&params, "seed_u", 0), 0xC0DE_15AF);
    }

    #[test]
    fn param_u32_returns_default_for_decimal_string() {
        let params = json!({"seed_u": "12345"});
        assert_eq!(param_u32(&params, "seed_u", 9), 9);
    }

    #[test]
    fn param_u32_returns_default_when_too_large() {
        let params = json!({"attempts": 1_u64 << 40});
        assert_eq!(param_u32(&params, "attempts", 7), 7);
    }

    #[test]
    fn param_u32_returns_default_for_negative_integer() {
        let params = json!({"attempts": -1});
        assert_eq!(param_u32(&params, "attempts", 5), 5);
    }

    #[test]
    fn param_u32_returns_default_when_key_missing() {
        assert_eq!(param_u32(&json!({}), "attempts", 231), 231);
    }

    // -- param_u64 --

    #[test]
    fn param_u64_extracts_large_integer() {
        let params = json!({"rounds": 1_000_000_000_000_u64});
        assert_eq!(param_u64(&params, "rounds", 0), 1_000_000_000_000);
    }

    #[test]
    fn param_u64_returns_default_for_float_value() {
        let params = json!({"rounds": 2.5});
        assert_eq!(param_u64(&params, "rounds", 99), 99);
    }

    #[test]
    fn param_u64_returns_default_for_non_object() {
        let params = json!("not an object");
        assert_eq!(param_u64(&params, "rounds", 7), 7);
    }

    // -- param_usize --

    #[test]
    fn param_usize_extracts_existing_integer() {
        let params = json!({"workers": 8});
        assert_eq!(param_usize(&params, "workers", 0), 8);
    }

    #[test]
    fn param_usize_returns_default_for_string_value() {
        let params = json!({"workers": "many"});
        assert_eq!(param_usize(&params, "workers", 4), 4);
    }

    // -- param_string --

    #[test]
    fn param_string_extracts_existing_string() {
        let params = json!({"policy": "sequential"});
        assert_eq!(param_string(&params, "policy", "parallel"), "sequential");
    }

    #[test]
    fn param_string_returns_default_for_wrong_type() {
        let params = json!({"policy": 42});
        assert_eq!(param_string(&params, "policy", "parallel"), "parallel");
    }
}

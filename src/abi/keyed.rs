//! Assigning field keys to decoded tuple/array-of-tuple components, with a
//! deterministic collision policy for unnamed or repeated names (spec
//! §4.3).

use super::signature::Param;
use super::value::Value;
use std::collections::HashMap;

/// Pair each component value with a key: its declared name if present and
/// non-empty, otherwise its positional index as a string. Collisions
/// (including a named component colliding with another component's
/// positional fallback) are broken by appending `_1`, `_2`, … in traversal
/// order.
pub fn keyed_components(params: &[Param], values: Vec<Value>) -> Vec<(String, Value)> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(values.len());
    for (i, (param, value)) in params.iter().zip(values).enumerate() {
        let base_key = match &param.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => i.to_string(),
        };
        let key = match seen.get_mut(&base_key) {
            None => {
                seen.insert(base_key.clone(), 0);
                base_key
            }
            Some(count) => {
                *count += 1;
                format!("{base_key}_{count}")
            }
        };
        out.push((key, value));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::types::parse_type;
    use alloy_primitives::U256;

    fn param(position: usize, name: Option<&str>) -> Param {
        Param { position, name: name.map(str::to_owned), ty: parse_type("uint256").unwrap(), indexed: None }
    }

    #[test]
    fn falls_back_to_positional_index_when_unnamed() {
        let params = vec![param(0, None), param(1, Some("value"))];
        let values = vec![Value::Uint(U256::from(1u64)), Value::Uint(U256::from(2u64))];
        let keyed = keyed_components(&params, values);
        assert_eq!(keyed[0].0, "0");
        assert_eq!(keyed[1].0, "value");
    }

    #[test]
    fn suffixes_repeated_keys_in_traversal_order() {
        // second param's explicit name "1" collides with the first param's
        // positional fallback.
        let params = vec![param(0, None), param(1, Some("1"))];
        let values = vec![Value::Uint(U256::from(1u64)), Value::Uint(U256::from(2u64))];
        let keyed = keyed_components(&params, values);
        assert_eq!(keyed[0].0, "1");
        assert_eq!(keyed[1].0, "1_1");
    }
}

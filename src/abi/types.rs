//! ABI type descriptors: parsing, canonical form, and static/dynamic
//! classification (spec §3, §4.1).

use crate::error::{Error, Result};

/// One array dimension, in the order it appears in the type string (e.g.
/// `uint256[2][]` yields `[Fixed(2), Dynamic]`; the *last* entry is the
/// outermost array, matching how Solidity reads array suffixes
/// right-to-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayDim {
    /// `[N]` — a fixed-size array of exactly `N` elements. `N` is always
    /// `>= 1`; `[0]` is rejected at parse time.
    Fixed(usize),
    /// `[]` — a dynamic-length array.
    Dynamic,
}

/// The base kind of an ABI type, before any array dimensions are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BaseKind {
    /// `address`.
    Address,
    /// `bool`.
    Bool,
    /// `string` (UTF-8, dynamic length).
    String,
    /// `bytes` (dynamic length).
    Bytes,
    /// `uintN`, `8 <= N <= 256`, `N % 8 == 0`.
    Uint(usize),
    /// `intN`, `8 <= N <= 256`, `N % 8 == 0`.
    Int(usize),
    /// `bytesN`, `1 <= N <= 32`.
    FixedBytes(usize),
    /// A tuple of child descriptors, in declaration order.
    Tuple(Vec<AbiType>),
}

impl BaseKind {
    /// Canonical textual form of this base kind alone (no array suffixes).
    pub fn canonical(&self) -> String {
        match self {
            Self::Address => "address".to_owned(),
            Self::Bool => "bool".to_owned(),
            Self::String => "string".to_owned(),
            Self::Bytes => "bytes".to_owned(),
            Self::Uint(bits) => format!("uint{bits}"),
            Self::Int(bits) => format!("int{bits}"),
            Self::FixedBytes(n) => format!("bytes{n}"),
            Self::Tuple(children) => {
                let parts: Vec<String> = children.iter().map(AbiType::canonical).collect();
                format!("({})", parts.join(","))
            }
        }
    }
}

/// A parsed ABI type: a base kind plus zero or more array dimensions.
///
/// Two descriptors are equal iff their [`canonical`](AbiType::canonical)
/// forms are equal — `derive(PartialEq)` here is already structural
/// equality over the canonicalized fields (bit widths and dims are stored
/// in already-canonical form; there is no alternate spelling for the same
/// type at this representation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiType {
    /// The base kind, e.g. `uint256` or a tuple.
    pub base: BaseKind,
    /// Array dimensions applied on top of `base`, outermost last.
    pub dims: Vec<ArrayDim>,
}

impl AbiType {
    /// Construct a bare (non-array) type.
    pub fn leaf(base: BaseKind) -> Self {
        Self { base, dims: Vec::new() }
    }

    /// The canonical signature-text form of this type: the form a selector
    /// is computed over. Never includes parameter names or `indexed`.
    pub fn canonical(&self) -> String {
        let mut out = self.base.canonical();
        for dim in &self.dims {
            match dim {
                ArrayDim::Fixed(n) => out.push_str(&format!("[{n}]")),
                ArrayDim::Dynamic => out.push_str("[]"),
            }
        }
        out
    }

    /// Whether this type is dynamic: `string`, `bytes`, any `T[]`, or any
    /// tuple/fixed array that transitively contains a dynamic component.
    /// Everything else is static (spec §4.1).
    pub fn is_dynamic(&self) -> bool {
        if let Some(ArrayDim::Dynamic) = self.dims.last() {
            return true;
        }
        if !self.dims.is_empty() {
            // A fixed array is dynamic iff its element type is.
            return self.element_type().is_dynamic();
        }
        match &self.base {
            BaseKind::String | BaseKind::Bytes => true,
            BaseKind::Tuple(children) => children.iter().any(AbiType::is_dynamic),
            BaseKind::Address
            | BaseKind::Bool
            | BaseKind::Uint(_)
            | BaseKind::Int(_)
            | BaseKind::FixedBytes(_) => false,
        }
    }

    /// The outermost array dimension, if any.
    pub fn outer_dim(&self) -> Option<ArrayDim> {
        self.dims.last().copied()
    }

    /// The element type obtained by stripping the outermost array
    /// dimension. Panics if `self` has no array dimensions — callers must
    /// check [`Self::outer_dim`] first.
    pub fn element_type(&self) -> Self {
        assert!(!self.dims.is_empty(), "element_type called on a non-array AbiType");
        Self { base: self.base.clone(), dims: self.dims[..self.dims.len() - 1].to_vec() }
    }
}

/// Parse a standalone ABI type string, e.g. `"uint256[2][]"` or
/// `"(uint256,bool)[]"`.
pub fn parse_type(s: &str) -> Result<AbiType> {
    let (ty, rest) = parse_type_prefix(s)?;
    if !rest.trim().is_empty() {
        return Err(Error::InvalidType(format!("unexpected trailing input in type `{s}`: `{rest}`")));
    }
    Ok(ty)
}

/// Parse one type starting at the front of `s`, returning the type and
/// whatever text followed it (used by the parameter-list parser, where a
/// type is followed by an optional `indexed` modifier and/or a name).
pub(crate) fn parse_type_prefix(s: &str) -> Result<(AbiType, &str)> {
    let s = s.trim_start();
    let (base, mut rest) = if s.starts_with('(') {
        let close = find_matching_paren(s)?;
        let inner = &s[1..close];
        let mut children = Vec::new();
        if !inner.trim().is_empty() {
            for part in split_top_level(inner)? {
                children.push(parse_type(part.trim())?);
            }
        }
        (BaseKind::Tuple(children), &s[close + 1..])
    } else {
        let idx = s
            .find(|c: char| c == '[' || c.is_whitespace() || c == ',' || c == ')')
            .unwrap_or(s.len());
        if idx == 0 {
            return Err(Error::InvalidType(format!("expected a type at `{s}`")));
        }
        let ident = &s[..idx];
        (parse_base_kind(ident)?, &s[idx..])
    };

    let mut dims = Vec::new();
    while let Some(after_bracket) = rest.strip_prefix('[') {
        let close = after_bracket
            .find(']')
            .ok_or_else(|| Error::InvalidType(format!("unterminated `[` in `{s}`")))?;
        let num_str = &after_bracket[..close];
        if num_str.is_empty() {
            dims.push(ArrayDim::Dynamic);
        } else {
            let n: usize = num_str
                .parse()
                .map_err(|_| Error::InvalidType(format!("invalid array size `[{num_str}]`")))?;
            if n == 0 {
                return Err(Error::InvalidType("array size must be a positive integer".into()));
            }
            dims.push(ArrayDim::Fixed(n));
        }
        rest = &after_bracket[close + 1..];
    }

    Ok((AbiType { base, dims }, rest))
}

fn parse_base_kind(ident: &str) -> Result<BaseKind> {
    match ident {
        "address" => Ok(BaseKind::Address),
        "bool" => Ok(BaseKind::Bool),
        "string" => Ok(BaseKind::String),
        "bytes" => Ok(BaseKind::Bytes),
        "byte" => Ok(BaseKind::FixedBytes(1)),
        "uint" => Ok(BaseKind::Uint(256)),
        "int" => Ok(BaseKind::Int(256)),
        "fixed" | "ufixed" => Err(Error::InvalidType(
            "fixed-point ABI types are not supported by this codec".into(),
        )),
        _ => {
            if let Some(digits) = ident.strip_prefix("uint") {
                parse_bit_width(digits).map(BaseKind::Uint)
            } else if let Some(digits) = ident.strip_prefix("int") {
                parse_bit_width(digits).map(BaseKind::Int)
            } else if let Some(digits) = ident.strip_prefix("bytes") {
                parse_byte_width(digits).map(BaseKind::FixedBytes)
            } else if ident.starts_with("fixed") || ident.starts_with("ufixed") {
                Err(Error::InvalidType(
                    "fixed-point ABI types are not supported by this codec".into(),
                ))
            } else {
                Err(Error::InvalidType(format!("unknown base type `{ident}`")))
            }
        }
    }
}

fn parse_bit_width(digits: &str) -> Result<usize> {
    let bits: usize =
        digits.parse().map_err(|_| Error::InvalidType(format!("invalid integer size `{digits}`")))?;
    if bits == 0 || bits > 256 || bits % 8 != 0 {
        return Err(Error::InvalidType(format!(
            "integer bit width must be a multiple of 8 in 8..=256, got {bits}"
        )));
    }
    Ok(bits)
}

fn parse_byte_width(digits: &str) -> Result<usize> {
    let n: usize =
        digits.parse().map_err(|_| Error::InvalidType(format!("invalid bytes size `{digits}`")))?;
    if n == 0 || n > 32 {
        return Err(Error::InvalidType(format!("bytesN size must be in 1..=32, got {n}")));
    }
    Ok(n)
}

/// Find the index (within `s`) of the `)` that matches the `(` at index 0.
pub(crate) fn find_matching_paren(s: &str) -> Result<usize> {
    let mut depth = 0i32;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(Error::InvalidType(format!("mismatched parentheses in `{s}`")))
}

/// Split `s` on top-level commas (commas nested inside parentheses do not
/// split).
pub(crate) fn split_top_level(s: &str) -> Result<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&s[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        if depth < 0 {
            return Err(Error::InvalidType(format!("mismatched parentheses in `{s}`")));
        }
    }
    parts.push(&s[start..]);
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_aliases() {
        assert_eq!(parse_type("uint").unwrap().canonical(), "uint256");
        assert_eq!(parse_type("int").unwrap().canonical(), "int256");
        assert_eq!(parse_type("byte").unwrap().canonical(), "bytes1");
    }

    #[test]
    fn parses_nested_tuple_array() {
        let ty = parse_type("(uint256,bool)[]").unwrap();
        assert!(ty.is_dynamic());
        assert_eq!(ty.canonical(), "(uint256,bool)[]");
    }

    #[test]
    fn fixed_array_of_dynamic_element_is_dynamic() {
        let ty = parse_type("string[3]").unwrap();
        assert!(ty.is_dynamic());
    }

    #[test]
    fn fixed_array_of_static_element_is_static() {
        let ty = parse_type("uint256[3]").unwrap();
        assert!(!ty.is_dynamic());
    }

    #[test]
    fn rejects_out_of_range_size_suffix() {
        assert!(parse_type("uint300").is_err());
        assert!(parse_type("bytes33").is_err());
        assert!(parse_type("uint7").is_err());
    }

    #[test]
    fn rejects_zero_size_fixed_array() {
        assert!(parse_type("uint256[0]").is_err());
    }

    #[test]
    fn rejects_mismatched_parens() {
        assert!(parse_type("(uint256,bool").is_err());
    }

    #[test]
    fn bar_bytes3_array2_matches_scenario_a() {
        let ty = parse_type("bytes3[2]").unwrap();
        assert_eq!(ty.canonical(), "bytes3[2]");
        assert!(!ty.is_dynamic());
    }
}

//! Function/event/error signature parsing: `"transfer(address,uint256)"`,
//! `"Transfer(address indexed from, address indexed to, uint256 value)"`.

use super::types::{find_matching_paren, parse_type_prefix, split_top_level, AbiType};
use crate::error::{Error, Result};

/// What kind of signature this is. `indexed` parameter modifiers are only
/// meaningful on [`SignatureKind::Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureKind {
    /// A contract function selector.
    Function,
    /// An event, hashed into `topic0`.
    Event,
    /// A custom Solidity error.
    Error,
    /// A contract constructor. Unlike the other kinds, it has no name —
    /// `name` is always empty and `canonical()` omits it.
    Constructor,
}

/// One parameter of a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Position within the parameter list, 0-based.
    pub position: usize,
    /// The declared name, if any (tuple components are often unnamed).
    pub name: Option<String>,
    /// The parameter's ABI type.
    pub ty: AbiType,
    /// Whether this parameter is `indexed`. Always `None` outside events.
    pub indexed: Option<bool>,
}

/// A parsed function/event/error signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// What kind of signature this is.
    pub kind: SignatureKind,
    /// The declared name, e.g. `"transfer"`.
    pub name: String,
    /// Input parameters, in declaration order.
    pub inputs: Vec<Param>,
    /// Output parameters. Always empty for events and errors; may be
    /// empty for functions whose return type wasn't supplied as text.
    pub outputs: Vec<Param>,
    /// Whether an event was declared `anonymous` (topic0 is then omitted).
    /// Always `false` outside events.
    pub anonymous: bool,
}

impl Signature {
    /// The canonical `name(type,type,...)` form this signature's selector
    /// or `topic0` is hashed over. Never includes names or `indexed`. A
    /// constructor has no name, so its canonical form is bare `(type,...)`.
    pub fn canonical(&self) -> String {
        let parts: Vec<String> = self.inputs.iter().map(|p| p.ty.canonical()).collect();
        format!("{}({})", self.name, parts.join(","))
    }
}

/// Parse a signature of the given kind from its text form.
pub fn parse_signature(kind: SignatureKind, text: &str) -> Result<Signature> {
    let text = text.trim();
    let anonymous = matches!(kind, SignatureKind::Event) && text.ends_with("anonymous");
    let text = if anonymous {
        text.trim_end_matches("anonymous").trim_end()
    } else {
        text
    };

    let open = text
        .find('(')
        .ok_or_else(|| Error::InvalidType(format!("signature `{text}` has no `(`")))?;
    let name = text[..open].trim();
    if name.is_empty() && kind != SignatureKind::Constructor {
        return Err(Error::InvalidType(format!("signature `{text}` is missing a name")));
    }
    if kind == SignatureKind::Constructor && !name.is_empty() && name != "constructor" {
        return Err(Error::InvalidType(format!(
            "a constructor signature has no name; got `{name}`"
        )));
    }
    let rest = &text[open..];
    let close = find_matching_paren(rest)?;
    if close != rest.len() - 1 {
        return Err(Error::InvalidType(format!(
            "unexpected trailing input after parameter list in `{text}`"
        )));
    }
    let inner = &rest[1..close];
    let inputs = parse_param_list(kind, inner)?;

    let name = if kind == SignatureKind::Constructor { String::new() } else { name.to_owned() };
    Ok(Signature { kind, name, inputs, outputs: Vec::new(), anonymous })
}

fn parse_param_list(kind: SignatureKind, inner: &str) -> Result<Vec<Param>> {
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    split_top_level(inner)?
        .into_iter()
        .enumerate()
        .map(|(position, part)| parse_param(kind, position, part.trim()))
        .collect()
}

fn parse_param(kind: SignatureKind, position: usize, part: &str) -> Result<Param> {
    let (ty, rest) = parse_type_prefix(part)?;
    let mut tokens = rest.split_whitespace();

    let mut indexed = None;
    let mut next = tokens.next();
    if next == Some("indexed") {
        if kind != SignatureKind::Event {
            return Err(Error::InvalidType(format!(
                "`indexed` is only valid on event parameters (got `{part}`)"
            )));
        }
        indexed = Some(true);
        next = tokens.next();
    } else if kind == SignatureKind::Event {
        indexed = Some(false);
    }

    let name = next.map(str::to_owned);
    if tokens.next().is_some() {
        return Err(Error::InvalidType(format!("unexpected trailing tokens in parameter `{part}`")));
    }

    Ok(Param { position, name, ty, indexed })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_function_signature() {
        let sig = parse_signature(SignatureKind::Function, "transfer(address,uint256)").unwrap();
        assert_eq!(sig.canonical(), "transfer(address,uint256)");
        assert_eq!(sig.inputs.len(), 2);
        assert!(sig.inputs[0].indexed.is_none());
    }

    #[test]
    fn parses_event_signature_with_indexed_and_names() {
        let sig = parse_signature(
            SignatureKind::Event,
            "Transfer(address indexed from, address indexed to, uint256 value)",
        )
        .unwrap();
        assert_eq!(sig.canonical(), "Transfer(address,address,uint256)");
        assert_eq!(sig.inputs[0].indexed, Some(true));
        assert_eq!(sig.inputs[2].indexed, Some(false));
        assert_eq!(sig.inputs[0].name.as_deref(), Some("from"));
    }

    #[test]
    fn rejects_indexed_on_function_params() {
        assert!(parse_signature(SignatureKind::Function, "f(uint256 indexed x)").is_err());
    }

    #[test]
    fn parses_anonymous_event() {
        let sig = parse_signature(SignatureKind::Event, "Ping(uint256 x) anonymous").unwrap();
        assert!(sig.anonymous);
    }

    #[test]
    fn parses_nested_tuple_parameter() {
        let sig = parse_signature(SignatureKind::Function, "sam(bytes,bool,uint256[])").unwrap();
        assert_eq!(sig.canonical(), "sam(bytes,bool,uint256[])");
    }

    #[test]
    fn parses_bare_constructor_signature() {
        let sig = parse_signature(SignatureKind::Constructor, "(address,uint256)").unwrap();
        assert_eq!(sig.name, "");
        assert_eq!(sig.canonical(), "(address,uint256)");
    }

    #[test]
    fn parses_named_constructor_signature() {
        let sig = parse_signature(SignatureKind::Constructor, "constructor(address owner)").unwrap();
        assert_eq!(sig.name, "");
        assert_eq!(sig.inputs[0].name.as_deref(), Some("owner"));
        assert_eq!(sig.canonical(), "(address)");
    }

    #[test]
    fn rejects_a_named_non_constructor_prefix_on_constructor_kind() {
        assert!(parse_signature(SignatureKind::Constructor, "init(uint256)").is_err());
    }
}

//! Non-owning textual view over a byte-string.

use std::fmt;

/// A borrowed, `0x`-prefixed hex rendering of a byte slice.
///
/// `HexView` never allocates; it borrows the bytes it was built from and
/// only allocates a `String` when [`ToString`]/[`fmt::Display`] is asked to
/// materialize one. Equality is always byte-equality, never
/// string-equality, so `HexView` over `[0xAB]` equals `HexView` over the
/// same bytes regardless of how either side would render case.
#[derive(Clone, Copy)]
pub struct HexView<'a>(pub &'a [u8]);

impl<'a> HexView<'a> {
    /// Borrow `bytes` as a hex view.
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self(bytes)
    }

    /// The underlying bytes.
    pub const fn as_bytes(&self) -> &'a [u8] {
        self.0
    }
}

impl fmt::Display for HexView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for HexView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HexView({self})")
    }
}

impl PartialEq for HexView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for HexView<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_with_0x_prefix() {
        assert_eq!(HexView::new(&[0xde, 0xad]).to_string(), "0xdead");
    }

    #[test]
    fn equality_is_byte_equality() {
        assert_eq!(HexView::new(&[0xAB]), HexView::new(&[0xAB]));
        assert_ne!(HexView::new(&[0xAB]), HexView::new(&[0xAC]));
    }
}

//! A [`Lit`] references a variable of the AIG and can be complemented (indicates the presence of a NOT gate).
//!
//! The encoding is the one of the AIGER format: `lit = 2 * var + complement`.

use std::{fmt::Display, ops::Not};

/// A variable index.
///
/// Variable 0 is reserved for the constants [`Lit::FALSE`] and [`Lit::TRUE`].
pub type Var = u32;

/// A signal reference: a variable index and an inversion bit.
///
/// ```rust
/// use aigkit::Lit;
/// let a = Lit::from_var(3, false);
/// assert_eq!(a, Lit::new(6));
/// assert_eq!(!a, Lit::new(7));
/// assert_eq!((!a).canonical(), a);
/// assert_eq!((!a).var(), 3);
/// assert!(Lit::TRUE.is_const());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Lit(u32);

impl Lit {
    /// The constant low/false signal.
    pub const FALSE: Lit = Lit(0);
    /// The constant high/true signal.
    pub const TRUE: Lit = Lit(1);

    /// Wraps a raw AIGER literal.
    pub const fn new(raw: u32) -> Self {
        Lit(raw)
    }

    pub const fn from_var(var: Var, complement: bool) -> Self {
        Lit((var << 1) | complement as u32)
    }

    /// The raw AIGER integer.
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The same literal with its inversion bit cleared.
    pub const fn canonical(self) -> Self {
        Lit(self.0 & !1)
    }

    /// The variable index (the literal without its inversion bit).
    pub const fn var(self) -> Var {
        self.0 >> 1
    }

    pub const fn is_inverted(self) -> bool {
        self.0 & 1 == 1
    }

    /// True for [`Lit::FALSE`] and [`Lit::TRUE`], which never refer to a node.
    pub const fn is_const(self) -> bool {
        self.0 <= 1
    }

    /// Redirects this literal to `var`, keeping the inversion bit.
    pub const fn with_var(self, var: Var) -> Self {
        Lit::from_var(var, self.is_inverted())
    }

    /// Complements the literal when `complement` is true.
    pub const fn xor(self, complement: bool) -> Self {
        Lit(self.0 ^ complement as u32)
    }
}

impl Not for Lit {
    type Output = Self;

    fn not(self) -> Self::Output {
        Lit(self.0 ^ 1)
    }
}

impl From<u32> for Lit {
    fn from(value: u32) -> Self {
        Lit(value)
    }
}

impl Display for Lit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn constants() {
        assert!(Lit::FALSE.is_const());
        assert!(Lit::TRUE.is_const());
        assert!(!Lit::new(2).is_const());
        assert_eq!(!Lit::FALSE, Lit::TRUE);
        assert_eq!(Lit::TRUE.canonical(), Lit::FALSE);
        assert_eq!(Lit::TRUE.var(), 0);
    }

    #[test]
    fn encoding() {
        let l = Lit::new(13);
        assert_eq!(l.var(), 6);
        assert!(l.is_inverted());
        assert_eq!(l.canonical(), Lit::new(12));
        assert!(!l.canonical().is_inverted());
        assert_eq!(Lit::from_var(6, true), l);
        assert_eq!(Lit::from_var(6, false), l.canonical());
    }

    #[test]
    fn phase_is_kept_when_redirected() {
        assert_eq!(Lit::new(15).with_var(4), Lit::new(9));
        assert_eq!(Lit::new(14).with_var(4), Lit::new(8));
        assert_eq!(Lit::new(8).xor(true), Lit::new(9));
        assert_eq!(Lit::new(9).xor(true), Lit::new(8));
        assert_eq!(Lit::new(9).xor(false), Lit::new(9));
    }

    #[test]
    fn raw_conversions() {
        let l = Lit::from(13);
        assert_eq!(l, Lit::new(13));
        assert_eq!(l.raw(), 13);
        assert_eq!((!l).raw(), 12);
        assert_eq!(Lit::from_var(6, false).raw(), 12);
        assert_eq!(Lit::TRUE.raw(), 1);
        let raws = [0u32, 1, 7].map(Lit::from).map(Lit::raw);
        assert_eq!(raws, [0, 1, 7]);
    }

    #[test]
    fn display_is_raw() {
        assert_eq!(Lit::new(42).to_string(), "42");
        assert_eq!((!Lit::new(42)).to_string(), "43");
    }
}

// ============================================================================
// Bounded Integer
// Integer validated against an inclusive min-max range at construction
// ============================================================================

use crate::errors::{NumericError, NumericResult};

/// Integer guaranteed to lie within `[MIN, MAX]` (inclusive).
///
/// Construction is the only failure point; once built, the value can be
/// read without further checks. Used for decimal scales and requested
/// decimal places, both bounded to `0..=18`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounded<const MIN: u16, const MAX: u16>(u16);

/// Scale or decimal-place count, `0..=18`.
pub type ScaleBound = Bounded<0, 18>;

impl<const MIN: u16, const MAX: u16> Bounded<MIN, MAX> {
    const VALID_RANGE: () = assert!(MIN <= MAX);

    /// # Errors
    /// [`NumericError::OutOfRange`] when `value` lies outside `[MIN, MAX]`.
    #[inline]
    pub fn try_new(value: u16) -> NumericResult<Self> {
        #[allow(clippy::let_unit_value)]
        let () = Self::VALID_RANGE;
        if value >= MIN && value <= MAX {
            Ok(Self(value))
        } else {
            Err(NumericError::OutOfRange)
        }
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn min() -> u16 {
        MIN
    }

    #[inline]
    pub const fn max() -> u16 {
        MAX
    }
}

impl<const MIN: u16, const MAX: u16> TryFrom<u16> for Bounded<MIN, MAX> {
    type Error = NumericError;

    #[inline]
    fn try_from(value: u16) -> NumericResult<Self> {
        Self::try_new(value)
    }
}

impl<const MIN: u16, const MAX: u16> From<Bounded<MIN, MAX>> for u16 {
    #[inline]
    fn from(bounded: Bounded<MIN, MAX>) -> u16 {
        bounded.get()
    }
}

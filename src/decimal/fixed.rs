// ============================================================================
// Fixed-Point Decimal, Static Scale
// Sub-unit count guarded by Safe<I>, scale fixed at compile time
// ============================================================================

use super::kernel;
use super::{pow10, DynamicDecimal, Float, Imprecise};
use crate::bounded::ScaleBound;
use crate::errors::{NumericError, NumericResult};
use crate::integer::DecimalInteger;
use crate::safe::Safe;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Base-10 fixed-point number with `SCALE` fractional digits.
///
/// Internally an integer count of 10^-SCALE units ("sub-units", e.g. cents
/// for SCALE=2) held in a [`Safe`], so arithmetic never panics: overflow
/// poisons the value and the failure surfaces once, when
/// [`value`](Decimal::value) or [`format`](Decimal::format) reads it.
///
/// # Type Parameters
/// - `I`: sub-unit integer, `i64` or `i128`
/// - `SCALE`: fractional digits, 0-18
///
/// # Example
/// ```
/// use safe_decimal::Decimal;
///
/// let price: Decimal<i64, 2> = "42.55".parse().unwrap();
/// let vat: Decimal<i64, 2> = ".19".parse().unwrap();
/// let due = price * vat;
/// assert_eq!(due.value(), Ok(808)); // 8.0845 rounded to 8.08
/// assert_eq!(due.format(2).unwrap(), "8.08");
/// ```
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Decimal<I: DecimalInteger, const SCALE: u16> {
    sub_units: Safe<I>,
}

/// Decimal backed by an `i64` sub-unit count.
pub type Decimal64<const SCALE: u16> = Decimal<i64, SCALE>;

/// Decimal backed by an `i128` sub-unit count, for magnitudes or scales an
/// `i64` cannot hold.
pub type Decimal128<const SCALE: u16> = Decimal<i128, SCALE>;

impl<I: DecimalInteger, const SCALE: u16> Decimal<I, SCALE> {
    const SCALE_OK: () = assert!(SCALE <= 18, "scale is limited to 18");

    /// The denominator, 10^SCALE.
    pub const DENOMINATOR: u64 = pow10(SCALE);

    /// Wrap a raw sub-unit count (the value times 10^SCALE).
    #[inline]
    pub fn from_sub_units(sub_units: I) -> Self {
        Self::from_safe(Safe::new(sub_units))
    }

    #[inline]
    pub(crate) fn from_safe(sub_units: Safe<I>) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::SCALE_OK;
        Self { sub_units }
    }

    #[inline]
    pub(crate) fn sub_units(&self) -> Safe<I> {
        self.sub_units
    }

    /// Number of digits tracked right of the decimal point.
    #[inline]
    pub const fn scale(&self) -> u16 {
        SCALE
    }

    #[inline]
    pub const fn denominator(&self) -> u64 {
        Self::DENOMINATOR
    }

    /// Whether the sub-unit count survived every operation applied so far.
    #[inline]
    pub fn has_value(&self) -> bool {
        self.sub_units.has_value()
    }

    /// Read the sub-unit count.
    ///
    /// # Errors
    /// [`NumericError::OverflowOrDivideByZero`] when any prior arithmetic
    /// step overflowed.
    #[inline]
    pub fn value(&self) -> NumericResult<I> {
        self.sub_units.value()
    }

    /// Read the sub-unit count, substituting `alt` when poisoned.
    #[inline]
    pub fn value_or(&self, alt: I) -> I {
        self.sub_units.value_or(alt)
    }

    /// Render with `decimal_places` fractional digits, `.` as the decimal
    /// point and no thousands separator.
    ///
    /// Fewer places than the stored scale round half away from zero; more
    /// places pad with literal zeros.
    ///
    /// # Errors
    /// [`NumericError::OverflowOrDivideByZero`] when the value is poisoned,
    /// [`NumericError::OutOfRange`] when `decimal_places` exceeds 18.
    #[inline]
    pub fn format(&self, decimal_places: u16) -> NumericResult<String> {
        self.format_with(decimal_places, '.', None)
    }

    /// Render with an explicit decimal point and optional thousands
    /// separator (grouping the integer digits in threes).
    pub fn format_with(
        &self,
        decimal_places: u16,
        decimal_point: char,
        thousands_separator: Option<char>,
    ) -> NumericResult<String> {
        let places = ScaleBound::try_new(decimal_places)?;
        kernel::format_sub_units(
            self.sub_units,
            SCALE,
            Self::DENOMINATOR,
            places,
            decimal_point,
            thousands_separator,
        )
    }

    /// Round to zero decimal places, half away from zero. The result stays
    /// expressed in sub-units of the original scale.
    ///
    /// Can poison on overflow of the half-denominator step.
    #[must_use]
    pub fn round(self) -> Self {
        if Self::DENOMINATOR > 1 {
            Self::from_safe(kernel::round_sub_units(self.sub_units, Self::DENOMINATOR))
        } else {
            self
        }
    }

    /// Round to `decimal_places`, half away from zero. A no-op when
    /// `decimal_places >= SCALE`.
    #[must_use]
    pub fn round_to(self, decimal_places: u16) -> Self {
        if decimal_places < SCALE {
            Self::from_safe(kernel::round_sub_units(
                self.sub_units,
                Self::DENOMINATOR / pow10(decimal_places),
            ))
        } else {
            self
        }
    }

    /// Convert to a floating-point quotient.
    ///
    /// `None` when the value is poisoned or when the sub-unit count or the
    /// denominator fall outside `F`'s exactly-representable integer range.
    /// A value that comes back from this conversion re-enters through
    /// [`Imprecise`] only.
    #[inline]
    pub fn to_float<F: Float>(&self) -> Option<F> {
        kernel::sub_units_to_float(self.sub_units, Self::DENOMINATOR)
    }

    /// Re-scale into a runtime-scaled decimal.
    pub fn to_dynamic(&self) -> DynamicDecimal<I> {
        let scale = ScaleBound::try_new(SCALE).expect("scale within bounds");
        DynamicDecimal::from_safe(self.sub_units, scale)
    }

    /// Convert to [`rust_decimal::Decimal`] for API boundaries.
    ///
    /// # Errors
    /// [`NumericError::OverflowOrDivideByZero`] when poisoned,
    /// [`NumericError::OutOfRange`] when the sub-unit count exceeds the
    /// target's 96-bit mantissa.
    pub fn to_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        let value = self.sub_units.value()?;
        rust_decimal::Decimal::try_from_i128_with_scale(value.to_i128(), u32::from(SCALE))
            .map_err(|_| NumericError::OutOfRange)
    }

    /// Convert from [`rust_decimal::Decimal`], rescaling to `SCALE`.
    ///
    /// # Errors
    /// [`NumericError::OutOfRange`] when the scaled value does not fit `I`,
    /// [`NumericError::PrecisionLoss`] when the input carries significant
    /// digits past `SCALE`.
    pub fn from_decimal(d: rust_decimal::Decimal) -> NumericResult<Self> {
        use rust_decimal::prelude::ToPrimitive;

        let scaled = d
            .checked_mul(rust_decimal::Decimal::from(Self::DENOMINATOR))
            .ok_or(NumericError::OutOfRange)?;
        let raw = scaled.to_i128().ok_or(NumericError::OutOfRange)?;
        let value = I::from_i128(raw).ok_or(NumericError::OutOfRange)?;

        if d.scale() > u32::from(SCALE) {
            let reconstructed =
                rust_decimal::Decimal::try_from_i128_with_scale(raw, u32::from(SCALE))
                    .map_err(|_| NumericError::OutOfRange)?;
            if reconstructed != d {
                return Err(NumericError::PrecisionLoss);
            }
        }

        Ok(Self::from_sub_units(value))
    }
}

impl<I: DecimalInteger, const SCALE: u16> Default for Decimal<I, SCALE> {
    #[inline]
    fn default() -> Self {
        Self::from_sub_units(I::ZERO)
    }
}

// ============================================================================
// Parsing
// ============================================================================

impl<I: DecimalInteger, const SCALE: u16> std::str::FromStr for Decimal<I, SCALE> {
    type Err = NumericError;

    /// Parse `["-"] digit* ["." digit*]`.
    ///
    /// Fractional digits past `SCALE` fail with `OutOfRange`, trailing
    /// garbage with `InvalidCharacter`, and a magnitude past `I`'s range
    /// with `OverflowOrDivideByZero`. A lone `"-"` or `"-."` parses as
    /// zero; callers must not rely on this for validation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        kernel::parse_sub_units(s, Self::DENOMINATOR).map(Self::from_sub_units)
    }
}

impl<I: DecimalInteger, F: Float, const SCALE: u16> TryFrom<Imprecise<F>> for Decimal<I, SCALE> {
    type Error = NumericError;

    /// Scale the float by the denominator and round half away from zero.
    ///
    /// # Errors
    /// [`NumericError::PrecisionLoss`] when the denominator or the rounded
    /// magnitude is not exactly representable in `F` (or does not fit `I`).
    fn try_from(fp: Imprecise<F>) -> Result<Self, Self::Error> {
        kernel::sub_units_from_float(fp.get(), Self::DENOMINATOR).map(Self::from_sub_units)
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

// Addition and subtraction require equal scales, which the types enforce;
// failures poison instead of panicking.

impl<I: DecimalInteger, const SCALE: u16> Add for Decimal<I, SCALE> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::from_safe(self.sub_units + rhs.sub_units)
    }
}

impl<I: DecimalInteger, const SCALE: u16> AddAssign for Decimal<I, SCALE> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.sub_units += rhs.sub_units;
    }
}

impl<I: DecimalInteger, const SCALE: u16> Sub for Decimal<I, SCALE> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::from_safe(self.sub_units - rhs.sub_units)
    }
}

impl<I: DecimalInteger, const SCALE: u16> SubAssign for Decimal<I, SCALE> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.sub_units -= rhs.sub_units;
    }
}

impl<I: DecimalInteger, const SCALE: u16> Neg for Decimal<I, SCALE> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_safe(-self.sub_units)
    }
}

// Multiplication rescales by the right-hand operand's denominator, so the
// result keeps the left operand's scale whatever the right operand's is.

impl<I: DecimalInteger, const SCALE: u16, const RHS_SCALE: u16> Mul<Decimal<I, RHS_SCALE>>
    for Decimal<I, SCALE>
{
    type Output = Decimal<I, SCALE>;

    #[inline]
    fn mul(self, rhs: Decimal<I, RHS_SCALE>) -> Self::Output {
        Self::from_safe(kernel::mul_rescale(
            self.sub_units,
            rhs.sub_units,
            Decimal::<I, RHS_SCALE>::DENOMINATOR,
        ))
    }
}

impl<I: DecimalInteger, const SCALE: u16, const RHS_SCALE: u16> MulAssign<Decimal<I, RHS_SCALE>>
    for Decimal<I, SCALE>
{
    #[inline]
    fn mul_assign(&mut self, rhs: Decimal<I, RHS_SCALE>) {
        self.sub_units = kernel::mul_rescale(
            self.sub_units,
            rhs.sub_units,
            Decimal::<I, RHS_SCALE>::DENOMINATOR,
        );
    }
}

// ============================================================================
// Comparison
// ============================================================================

// Delegates to Safe, poison rules included: two poisoned decimals are
// equal, a poisoned decimal orders below every valued one.

impl<I: DecimalInteger, const SCALE: u16> PartialEq for Decimal<I, SCALE> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.sub_units == other.sub_units
    }
}

impl<I: DecimalInteger, const SCALE: u16> Eq for Decimal<I, SCALE> {}

impl<I: DecimalInteger, const SCALE: u16> PartialOrd for Decimal<I, SCALE> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.sub_units.cmp(&other.sub_units))
    }
}

impl<I: DecimalInteger, const SCALE: u16> Ord for Decimal<I, SCALE> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.sub_units.cmp(&other.sub_units)
    }
}

impl<I: DecimalInteger, const SCALE: u16> Hash for Decimal<I, SCALE> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sub_units.hash(state);
    }
}

impl<I: DecimalInteger, const SCALE: u16> fmt::Debug for Decimal<I, SCALE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_units.value() {
            Ok(v) => write!(f, "Decimal<{}>({})", SCALE, v),
            Err(_) => write!(f, "Decimal<{}>(poisoned)", SCALE),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

// ============================================================================
// Fixed-Point Decimal, Dynamic Scale
// Same semantics as Decimal, scale selected at runtime
// ============================================================================

use super::kernel;
use super::{pow10, Decimal, Float, Imprecise};
use crate::bounded::ScaleBound;
use crate::errors::{NumericError, NumericResult};
use crate::integer::DecimalInteger;
use crate::safe::Safe;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// [`Decimal`] with the scale held at runtime instead of in the type.
///
/// The denominator is recomputed from the stored scale on each access.
/// Use this when the number of fractional digits is configuration rather
/// than part of the program:
///
/// ```
/// use safe_decimal::{DynamicDecimal, ScaleBound};
///
/// let scale = ScaleBound::try_new(2).unwrap();
/// let price = DynamicDecimal::<i64>::parse("42.55", scale).unwrap();
/// assert_eq!(price.value(), Ok(4255));
/// assert_eq!(price.format(2).unwrap(), "42.55");
/// ```
///
/// Addition, subtraction and comparison assume both operands share one
/// scale; only multiplication is defined across scales.
#[derive(Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DynamicDecimal<I: DecimalInteger> {
    sub_units: Safe<I>,
    scale: ScaleBound,
}

impl<I: DecimalInteger> DynamicDecimal<I> {
    /// Wrap a raw sub-unit count (the value times 10^scale).
    #[inline]
    pub fn new(sub_units: I, scale: ScaleBound) -> Self {
        Self::from_safe(Safe::new(sub_units), scale)
    }

    /// Like [`new`](Self::new), validating the scale.
    ///
    /// # Errors
    /// [`NumericError::OutOfRange`] when `scale` exceeds 18.
    #[inline]
    pub fn try_new(sub_units: I, scale: u16) -> NumericResult<Self> {
        Ok(Self::new(sub_units, ScaleBound::try_new(scale)?))
    }

    #[inline]
    pub(crate) fn from_safe(sub_units: Safe<I>, scale: ScaleBound) -> Self {
        Self { sub_units, scale }
    }

    #[inline]
    pub(crate) fn sub_units(&self) -> Safe<I> {
        self.sub_units
    }

    /// Parse `["-"] digit* ["." digit*]` at the given scale.
    ///
    /// Same grammar and failure kinds as the static type's `FromStr`.
    pub fn parse(s: &str, scale: ScaleBound) -> NumericResult<Self> {
        kernel::parse_sub_units(s, pow10(scale.get())).map(|sub| Self::new(sub, scale))
    }

    /// Scale the float by the denominator and round half away from zero.
    ///
    /// # Errors
    /// [`NumericError::PrecisionLoss`] as for the static type.
    pub fn from_imprecise<F: Float>(fp: Imprecise<F>, scale: ScaleBound) -> NumericResult<Self> {
        kernel::sub_units_from_float(fp.get(), pow10(scale.get())).map(|sub| Self::new(sub, scale))
    }

    #[inline]
    pub fn scale(&self) -> u16 {
        self.scale.get()
    }

    #[inline]
    pub fn denominator(&self) -> u64 {
        pow10(self.scale.get())
    }

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

    #[inline]
    pub fn value_or(&self, alt: I) -> I {
        self.sub_units.value_or(alt)
    }

    /// Render with `decimal_places` fractional digits, `.` as the decimal
    /// point and no thousands separator.
    #[inline]
    pub fn format(&self, decimal_places: u16) -> NumericResult<String> {
        self.format_with(decimal_places, '.', None)
    }

    /// Render with an explicit decimal point and optional thousands
    /// separator.
    pub fn format_with(
        &self,
        decimal_places: u16,
        decimal_point: char,
        thousands_separator: Option<char>,
    ) -> NumericResult<String> {
        let places = ScaleBound::try_new(decimal_places)?;
        kernel::format_sub_units(
            self.sub_units,
            self.scale.get(),
            self.denominator(),
            places,
            decimal_point,
            thousands_separator,
        )
    }

    /// Round to zero decimal places, half away from zero.
    #[must_use]
    pub fn round(self) -> Self {
        let denom = self.denominator();
        if denom > 1 {
            Self::from_safe(kernel::round_sub_units(self.sub_units, denom), self.scale)
        } else {
            self
        }
    }

    /// Round to `decimal_places`, half away from zero. A no-op when
    /// `decimal_places >= scale()`.
    #[must_use]
    pub fn round_to(self, decimal_places: u16) -> Self {
        if decimal_places < self.scale.get() {
            Self::from_safe(
                kernel::round_sub_units(
                    self.sub_units,
                    self.denominator() / pow10(decimal_places),
                ),
                self.scale,
            )
        } else {
            self
        }
    }

    /// Convert to a floating-point quotient; `None` when poisoned or not
    /// exactly representable.
    #[inline]
    pub fn to_float<F: Float>(&self) -> Option<F> {
        kernel::sub_units_to_float(self.sub_units, self.denominator())
    }

    /// Convert to [`rust_decimal::Decimal`] for API boundaries.
    pub fn to_decimal(&self) -> NumericResult<rust_decimal::Decimal> {
        let value = self.sub_units.value()?;
        rust_decimal::Decimal::try_from_i128_with_scale(value.to_i128(), u32::from(self.scale.get()))
            .map_err(|_| NumericError::OutOfRange)
    }
}

impl<I: DecimalInteger> Add for DynamicDecimal<I> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        debug_assert_eq!(self.scale, rhs.scale);
        Self::from_safe(self.sub_units + rhs.sub_units, self.scale)
    }
}

impl<I: DecimalInteger> AddAssign for DynamicDecimal<I> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        debug_assert_eq!(self.scale, rhs.scale);
        self.sub_units += rhs.sub_units;
    }
}

impl<I: DecimalInteger> Sub for DynamicDecimal<I> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        debug_assert_eq!(self.scale, rhs.scale);
        Self::from_safe(self.sub_units - rhs.sub_units, self.scale)
    }
}

impl<I: DecimalInteger> SubAssign for DynamicDecimal<I> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        debug_assert_eq!(self.scale, rhs.scale);
        self.sub_units -= rhs.sub_units;
    }
}

impl<I: DecimalInteger> Neg for DynamicDecimal<I> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::from_safe(-self.sub_units, self.scale)
    }
}

impl<I: DecimalInteger> Mul for DynamicDecimal<I> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self::from_safe(
            kernel::mul_rescale(self.sub_units, rhs.sub_units, rhs.denominator()),
            self.scale,
        )
    }
}

impl<I: DecimalInteger> MulAssign for DynamicDecimal<I> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        self.sub_units = kernel::mul_rescale(self.sub_units, rhs.sub_units, rhs.denominator());
    }
}

// Multiplication across the static/dynamic divide; the result keeps the
// left operand's flavor and scale.

impl<I: DecimalInteger, const RHS_SCALE: u16> Mul<Decimal<I, RHS_SCALE>> for DynamicDecimal<I> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Decimal<I, RHS_SCALE>) -> Self {
        Self::from_safe(
            kernel::mul_rescale(
                self.sub_units,
                rhs.sub_units(),
                Decimal::<I, RHS_SCALE>::DENOMINATOR,
            ),
            self.scale,
        )
    }
}

impl<I: DecimalInteger, const SCALE: u16> Mul<DynamicDecimal<I>> for Decimal<I, SCALE> {
    type Output = Decimal<I, SCALE>;

    #[inline]
    fn mul(self, rhs: DynamicDecimal<I>) -> Self::Output {
        Self::from_safe(kernel::mul_rescale(
            self.sub_units(),
            rhs.sub_units,
            rhs.denominator(),
        ))
    }
}

// Comparison tracks the sub-unit count only; operands are assumed to share
// one scale.

impl<I: DecimalInteger> PartialEq for DynamicDecimal<I> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.sub_units == other.sub_units
    }
}

impl<I: DecimalInteger> Eq for DynamicDecimal<I> {}

impl<I: DecimalInteger> PartialOrd for DynamicDecimal<I> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.sub_units.cmp(&other.sub_units))
    }
}

impl<I: DecimalInteger> Ord for DynamicDecimal<I> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.sub_units.cmp(&other.sub_units)
    }
}

impl<I: DecimalInteger> Hash for DynamicDecimal<I> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sub_units.hash(state);
    }
}

impl<I: DecimalInteger> fmt::Debug for DynamicDecimal<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_units.value() {
            Ok(v) => write!(f, "DynamicDecimal({}, scale={})", v, self.scale.get()),
            Err(_) => write!(f, "DynamicDecimal(poisoned, scale={})", self.scale.get()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

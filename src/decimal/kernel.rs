// ============================================================================
// Decimal Kernels
// Scale-agnostic parsing, formatting, rounding and rescaling
// ============================================================================
//
// Both decimal flavors delegate here; the static type passes its
// compile-time denominator, the dynamic type recomputes one per call.

use super::{pow10, Float};
use crate::bounded::ScaleBound;
use crate::errors::{NumericError, NumericResult};
use crate::integer::DecimalInteger;
use crate::safe::Safe;

/// Parse `["-"] digit* ["." digit*]` into a sub-unit count.
///
/// Integer digits accumulate through `Safe`, so a magnitude past `I`'s
/// range surfaces as `OverflowOrDivideByZero`. A lone `"-"`, `"-."` or the
/// empty string parses as zero; callers must not rely on this for
/// validation.
pub(crate) fn parse_sub_units<I: DecimalInteger>(s: &str, denominator: u64) -> NumericResult<I> {
    let bytes = s.as_bytes();
    let mut index = 0;
    let mut negative = false;

    if index < bytes.len() && bytes[index] == b'-' {
        negative = true;
        index += 1;
    }

    let mut sub = Safe::new(I::ZERO);
    while index < bytes.len() && bytes[index].is_ascii_digit() {
        sub *= I::from_u64(10);
        sub += I::from_u64(u64::from(bytes[index] - b'0'));
        index += 1;
    }

    sub *= I::from_u64(denominator);

    if index < bytes.len() && bytes[index] == b'.' {
        index += 1;
        let mut multiplier = denominator / 10;
        while index < bytes.len() && bytes[index].is_ascii_digit() {
            if multiplier == 0 {
                tracing::trace!(denominator, "fractional digit past available precision");
                return Err(NumericError::OutOfRange);
            }
            // Cannot overflow u64: multiplier <= 10^17, the digit is at most 9.
            sub += I::from_u64(multiplier * u64::from(bytes[index] - b'0'));
            multiplier /= 10;
            index += 1;
        }
    }

    if index != bytes.len() {
        tracing::trace!(rest = &s[index..], "trailing input after digits");
        return Err(NumericError::InvalidCharacter);
    }

    if negative {
        sub = -sub;
    }

    sub.value()
}

/// Split a sub-unit count into integer and fractional digits and render
/// them, rescaling first when fewer places than the stored scale are
/// requested.
pub(crate) fn format_sub_units<I: DecimalInteger>(
    sub: Safe<I>,
    scale: u16,
    denominator: u64,
    decimal_places: ScaleBound,
    decimal_point: char,
    thousands_separator: Option<char>,
) -> NumericResult<String> {
    let value = sub.value()?;
    let (negative, mut magnitude) = value.to_parts();
    let places = decimal_places.get();

    let mut out = String::new();
    if negative {
        out.push('-');
    }

    let mut denom = u128::from(denominator);
    if places < scale {
        // Second rounding pass at the requested precision; none of this can
        // overflow in u128.
        denom = u128::from(pow10(places));
        let denom_round = u128::from(denominator / pow10(places));
        let base = magnitude / denom_round;
        let rem = magnitude % denom_round;
        magnitude = if rem >= denom_round / 2 { base + 1 } else { base };
    }

    let base = magnitude / denom;
    let frac = magnitude % denom;

    match thousands_separator {
        Some(separator) => push_grouped(&mut out, base, separator),
        None => out.push_str(&base.to_string()),
    }

    if places > 0 {
        out.push(decimal_point);
        if places <= scale {
            push_padded(&mut out, frac, places as usize);
        } else {
            if scale > 0 {
                push_padded(&mut out, frac, scale as usize);
            }
            for _ in scale..places {
                out.push('0');
            }
        }
    }

    Ok(out)
}

/// Round a sub-unit count to a coarser precision, half away from zero.
///
/// The result stays expressed in the original scale's units; overflow in
/// the half-step addition poisons.
pub(crate) fn round_sub_units<I: DecimalInteger>(sub: Safe<I>, denom_round: u64) -> Safe<I> {
    let mut i = sub;
    if i < I::ZERO {
        i -= I::from_u64(denom_round / 2);
    } else {
        i += I::from_u64(denom_round / 2);
    }
    i /= I::from_u64(denom_round);
    i *= I::from_u64(denom_round);
    i
}

/// Multiply raw sub-unit counts and rescale by the right-hand operand's
/// denominator, half away from zero, keeping the left operand's scale.
pub(crate) fn mul_rescale<I: DecimalInteger>(
    lhs: Safe<I>,
    rhs: Safe<I>,
    rhs_denominator: u64,
) -> Safe<I> {
    let mut i = lhs;
    i *= rhs;
    if i < I::ZERO {
        i -= I::from_u64(rhs_denominator / 2);
    } else {
        i += I::from_u64(rhs_denominator / 2);
    }
    i /= I::from_u64(rhs_denominator);
    i
}

/// Convert a floating-point value into a sub-unit count, rounding half
/// away from zero.
pub(crate) fn sub_units_from_float<I: DecimalInteger, F: Float>(
    fp: F,
    denominator: u64,
) -> NumericResult<I> {
    if u128::from(denominator) > F::MAX_EXACT_MAGNITUDE {
        tracing::trace!(denominator, "denominator not exactly representable");
        return Err(NumericError::PrecisionLoss);
    }

    let abs_rounded = (fp.abs() * F::from_exact_magnitude(u128::from(denominator))).round();

    // Also rejects NaN and the infinities.
    if !(abs_rounded <= F::from_exact_magnitude(F::MAX_EXACT_MAGNITUDE)) {
        tracing::trace!("rounded magnitude not exactly representable");
        return Err(NumericError::PrecisionLoss);
    }

    let magnitude = abs_rounded.to_magnitude();
    I::from_parts(fp.is_sign_negative(), magnitude).ok_or(NumericError::PrecisionLoss)
}

/// Convert a sub-unit count to a floating-point quotient.
///
/// `None` when the value is poisoned or when the value or denominator fall
/// outside `F`'s exactly-representable integer range.
pub(crate) fn sub_units_to_float<I: DecimalInteger, F: Float>(
    sub: Safe<I>,
    denominator: u64,
) -> Option<F> {
    let value = sub.value().ok()?;
    let (negative, magnitude) = value.to_parts();
    if magnitude > F::MAX_EXACT_MAGNITUDE || u128::from(denominator) > F::MAX_EXACT_MAGNITUDE {
        return None;
    }
    let quotient =
        F::from_exact_magnitude(magnitude) / F::from_exact_magnitude(u128::from(denominator));
    Some(if negative { -quotient } else { quotient })
}

fn push_padded(out: &mut String, value: u128, min_digits: usize) {
    let digits = value.to_string();
    for _ in digits.len()..min_digits {
        out.push('0');
    }
    out.push_str(&digits);
}

fn push_grouped(out: &mut String, value: u128, separator: char) {
    let digits = value.to_string();
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
}

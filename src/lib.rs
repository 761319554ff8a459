// ============================================================================
// Safe Decimal Library
// Overflow-tracked integers and fixed-point decimal arithmetic
// ============================================================================

//! # Safe Decimal
//!
//! Overflow-safe numeric primitives for money-like quantities: an integer
//! wrapper that poisons on overflow instead of panicking, and fixed-point
//! decimals built on top of it.
//!
//! ## Features
//!
//! - **Sticky poison tracking** — arithmetic never panics; overflow and
//!   division by zero clear a validity flag that only full reassignment
//!   restores, so a whole calculation can be checked once at the end
//! - **Fixed-point decimals** with a compile-time scale ([`Decimal`]) or a
//!   runtime scale ([`DynamicDecimal`]), 0 to 18 fractional digits
//! - **Half-away-from-zero rounding** everywhere: multiplication rescaling,
//!   explicit `round`, and formatting at a coarser precision
//! - **Explicit imprecision** — floating-point construction only through
//!   the [`Imprecise`] marker, never implicitly
//! - **Text in, text out** — decimal-string parsing and formatting with
//!   configurable decimal point and thousands separator
//!
//! ## Example
//!
//! ```rust
//! use safe_decimal::{Decimal, NumericError, Safe};
//!
//! // Chain arithmetic and check for failure once at the end.
//! let total = (Safe::new(100_u8) * 3) + 1;
//! assert_eq!(total.value(), Err(NumericError::OverflowOrDivideByZero));
//!
//! let price: Decimal<i64, 2> = "42.55".parse()?;
//! let vat: Decimal<i64, 2> = ".19".parse()?;
//! let gross = price + (price * vat);
//! assert_eq!(gross.format(2)?, "50.63");
//! # Ok::<(), safe_decimal::NumericError>(())
//! ```

pub mod bounded;
pub mod decimal;
pub mod errors;
pub mod integer;
pub mod safe;

pub use bounded::{Bounded, ScaleBound};
pub use decimal::{Decimal, Decimal128, Decimal64, DynamicDecimal, Float, Imprecise};
pub use errors::{NumericError, NumericResult};
pub use integer::{DecimalInteger, Integer};
pub use safe::Safe;

// Re-exports for convenience
pub mod prelude {
    pub use crate::bounded::{Bounded, ScaleBound};
    pub use crate::decimal::{Decimal, Decimal128, Decimal64, DynamicDecimal, Imprecise};
    pub use crate::errors::{NumericError, NumericResult};
    pub use crate::safe::Safe;
}

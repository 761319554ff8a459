// ============================================================================
// Basic Usage Example
// ============================================================================

use safe_decimal::prelude::*;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt::init();

    println!("=== Safe Decimal Example ===\n");

    // Overflow-tracked integers: poison instead of panic.
    println!("Safe arithmetic...");
    let i = Safe::new(30_000_i16);
    let ok = i + 2_000;
    let overflowed = i + 3_000;
    println!("  30000 + 2000 = {:?}", ok.value());
    println!("  30000 + 3000 = {:?} (i16 overflow)", overflowed.value());
    println!("  fallback     = {}\n", overflowed.value_or(0));

    // Fixed-point decimals with a compile-time scale.
    println!("Invoice with 19% VAT...");
    let net: Decimal64<4> = "900.25".parse().unwrap();
    let vat_rate: Decimal64<2> = ".19".parse().unwrap();

    let vat = net * vat_rate; // Keeps the 4-digit scale.
    let gross = (net + vat).round_to(2);

    println!("  net   = {}", net.format(2).unwrap());
    println!("  vat   = {}", vat.format(2).unwrap());
    println!("  gross = {}", gross.format(2).unwrap());
    println!(
        "  gross = {} (grouped)\n",
        gross.format_with(2, ',', Some(' ')).unwrap()
    );

    // Runtime-selected scale.
    println!("Dynamic scale from configuration...");
    let scale = ScaleBound::try_new(6).unwrap();
    let precise = DynamicDecimal::<i64>::parse("0.000125", scale).unwrap();
    println!("  sub-units   = {:?}", precise.value());
    println!("  denominator = {}", precise.denominator());
    println!("  formatted   = {}\n", precise.format(6).unwrap());

    // Floating point only enters through the explicit marker.
    println!("Imprecise float input...");
    let from_float = Decimal64::<4>::try_from(Imprecise(0.0583)).unwrap();
    println!("  0.0583 -> {} sub-units", from_float.value().unwrap());
    match Decimal64::<4>::try_from(Imprecise(i64::MAX as f64)) {
        Ok(_) => unreachable!(),
        Err(e) => println!("  i64::MAX as f64 -> {}", e),
    }

    // Failures surface once, at the final read.
    println!("\nDeferred failure...");
    let balance = Decimal64::<2>::from_sub_units(i64::MAX - 10);
    let total = balance + Decimal64::<2>::from_sub_units(100);
    match total.format(2) {
        Ok(text) => println!("  total = {}", text),
        Err(e) => println!("  total unavailable: {}", e),
    }
}

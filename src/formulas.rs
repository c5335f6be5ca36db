//! Closed-form time-value-of-money formulas
//!
//! Pure functions on per-period rates. They give the same results as the
//! enumerative cash flow model in constant time.

use crate::error::{ValuationError, ValuationResult};

fn check_rate(rate: f64) -> ValuationResult<()> {
    if !rate.is_finite() {
        return Err(ValuationError::domain(format!("rate must be finite, got {}", rate)));
    }
    if rate <= -1.0 {
        return Err(ValuationError::domain(format!(
            "rate of {} is -100% or below; discounting is undefined",
            rate
        )));
    }
    Ok(())
}

fn check_periods(number_periods: u32) -> ValuationResult<()> {
    if number_periods == 0 {
        return Err(ValuationError::domain("number of periods must be positive"));
    }
    Ok(())
}

fn check_growth(rate: f64, growth_rate: f64) -> ValuationResult<()> {
    check_rate(growth_rate)?;
    if growth_rate == rate {
        return Err(ValuationError::domain("growth rate must not equal discount rate"));
    }
    Ok(())
}

fn check_nonzero(rate: f64) -> ValuationResult<()> {
    if rate == 0.0 {
        return Err(ValuationError::domain("rate must not be zero"));
    }
    Ok(())
}

/// Present value of `number_periods` payments made at the end of each period
///
/// * `growth_rate` - `None` for level payments. `Some(g)` grows each payment by `g`
///   per period, with the first payment equal to `payment`.
pub fn present_value_annuity(
    payment: f64,
    discount_rate: f64,
    number_periods: u32,
    growth_rate: Option<f64>,
) -> ValuationResult<f64> {
    check_rate(discount_rate)?;
    check_periods(number_periods)?;
    let n = number_periods as f64;

    match growth_rate {
        None => {
            check_nonzero(discount_rate)?;
            Ok(payment * (1.0 - (1.0 + discount_rate).powf(-n)) / discount_rate)
        }
        Some(g) => {
            check_growth(discount_rate, g)?;
            let ratio = (1.0 + g) / (1.0 + discount_rate);
            Ok(payment / (discount_rate - g) * (1.0 - ratio.powf(n)))
        }
    }
}

/// Present value of a payment stream that never ends
///
/// The growing form is `payment * (1 + g) / (rate - g)`: the first payment
/// has already grown once when it is received at the end of period one.
pub fn present_value_perpetuity(
    payment: f64,
    discount_rate: f64,
    growth_rate: Option<f64>,
) -> ValuationResult<f64> {
    check_rate(discount_rate)?;

    match growth_rate {
        None => {
            check_nonzero(discount_rate)?;
            Ok(payment / discount_rate)
        }
        Some(g) => {
            check_growth(discount_rate, g)?;
            Ok(payment * (1.0 + g) / (discount_rate - g))
        }
    }
}

/// Level payment that amortizes `present_value` over `number_periods` at `rate`
///
/// Inverse of the ordinary [`present_value_annuity`].
pub fn payment_annuity(present_value: f64, rate: f64, number_periods: u32) -> ValuationResult<f64> {
    check_rate(rate)?;
    check_periods(number_periods)?;
    check_nonzero(rate)?;

    let n = number_periods as f64;
    Ok(rate * present_value / (1.0 - (1.0 + rate).powf(-n)))
}

/// Convert an annual effective rate to the effective rate per period
/// for `periods_per_year` periods
pub fn rate_conversion(base_rate: f64, periods_per_year: f64) -> ValuationResult<f64> {
    check_rate(base_rate)?;
    if !periods_per_year.is_finite() || periods_per_year <= 0.0 {
        return Err(ValuationError::domain(format!(
            "periods per year must be positive, got {}",
            periods_per_year
        )));
    }

    Ok((1.0 + base_rate).powf(1.0 / periods_per_year) - 1.0)
}

//! Saturating money arithmetic.
//!
//! Amounts come from the backend or from form input, so sums and ratios
//! clamp at the `Decimal` bounds instead of panicking.

use rust_decimal::Decimal;

/// Saturating sum of amounts.
#[must_use]
pub fn total(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Saturating running totals, one per input amount.
#[must_use]
pub fn running_totals(amounts: &[Decimal]) -> Vec<Decimal> {
    amounts
        .iter()
        .scan(Decimal::ZERO, |acc, v| {
            *acc = acc.saturating_add(*v);
            Some(*acc)
        })
        .collect()
}

/// `part` as a percentage of `whole`, two decimals.
///
/// A zero `whole` yields zero. An unrepresentable ratio clamps to the
/// bound with the ratio's sign.
#[must_use]
pub fn percentage(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    match part
        .checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    {
        Some(pct) => pct.round_dp(2),
        None if part.is_sign_negative() == whole.is_sign_negative() => Decimal::MAX,
        None => Decimal::MIN,
    }
}

//! Rental pricing and payment reconciliation.
//!
//! Everything here is a pure function of its arguments, so the same inputs
//! always give the same [`Money`].

use common::Money;
use derive_more::{Display, Error as StdError};
use rust_decimal::Decimal;

use crate::domain::{
    contract::{RentalPeriod, RentalType},
    Contract, Payment,
};

/// Number of days billed as one month.
const DAYS_IN_MONTH: i64 = 30;

/// Number of days added before rounding to months, so that the last half a
/// month and more is billed as a whole one.
const MONTH_GRACE_DAYS: i64 = 15;

/// Computes the total price of renting for the provided [`RentalPeriod`].
///
/// - [`RentalType::Daily`] bills every started day: `days × unit_price`.
/// - [`RentalType::Monthly`] bills
///   `max(1, ceil((days + 15) / 30)) × unit_price`.
///
/// # Errors
///
/// - [`Error::InvalidPeriod`] if the period doesn't end after it starts.
/// - [`Error::InvalidPrice`] if the `unit_price` is negative.
/// - [`Error::Overflow`] if the total price doesn't fit into [`Money`].
pub fn total_price(
    period: &RentalPeriod,
    unit_price: Money,
    rental_type: RentalType,
) -> Result<Money, Error> {
    if !period.is_valid() {
        return Err(Error::InvalidPeriod(*period));
    }
    if unit_price.is_negative() {
        return Err(Error::InvalidPrice(unit_price));
    }

    let days = period.days();
    let units = match rental_type {
        RentalType::Daily => days,
        RentalType::Monthly => {
            ceil_div(days + MONTH_GRACE_DAYS, DAYS_IN_MONTH).max(1)
        }
    };

    unit_price
        .checked_mul(Decimal::from(units))
        .ok_or(Error::Overflow(unit_price))
}

/// Sums the amounts of the provided [`Payment`]s.
pub fn paid<'p>(payments: impl IntoIterator<Item = &'p Payment>) -> Money {
    payments.into_iter().map(|p| p.amount).sum()
}

/// Computes what remains to be paid of the `total_price` after the provided
/// [`Payment`]s.
///
/// Never negative: an overpayment leaves nothing outstanding.
///
/// The [`Payment`]s are trusted to belong to the same [`Contract`].
pub fn outstanding<'p>(
    total_price: Money,
    payments: impl IntoIterator<Item = &'p Payment>,
) -> Money {
    total_price.saturating_sub(paid(payments))
}

/// Computes the revenue actually received across the provided [`Contract`]s.
///
/// This is the cash received, which is not the same as the billed total
/// prices.
pub fn revenue<'c, P>(contracts: impl IntoIterator<Item = (&'c Contract, P)>) -> Money
where
    P: IntoIterator<Item = &'c Payment>,
{
    contracts
        .into_iter()
        .map(|(_, payments)| paid(payments))
        .sum()
}

/// Reconciled balance of a [`Contract`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Balance {
    /// Total price billed.
    pub total: Money,

    /// Sum of all the received payments.
    ///
    /// May exceed the `total` if the tenant overpaid.
    pub paid: Money,

    /// What remains to be paid, never negative.
    pub outstanding: Money,
}

impl Balance {
    /// Reconciles the `total_price` against the provided [`Payment`]s.
    pub fn of<'p>(
        total_price: Money,
        payments: impl IntoIterator<Item = &'p Payment>,
    ) -> Self {
        let paid = paid(payments);
        Self {
            total: total_price,
            paid,
            outstanding: total_price.saturating_sub(paid),
        }
    }

    /// Indicates whether nothing remains to be paid.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.outstanding.is_zero()
    }
}

/// Error of pricing a [`RentalPeriod`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// [`RentalPeriod`] doesn't end after it starts.
    #[display("`RentalPeriod({_0})` must end after it starts")]
    InvalidPeriod(#[error(not(source))] RentalPeriod),

    /// Unit price is negative.
    #[display("unit price `{_0}` must not be negative")]
    InvalidPrice(#[error(not(source))] Money),

    /// Total price doesn't fit into [`Money`].
    #[display("total price of unit price `{_0}` overflows")]
    Overflow(#[error(not(source))] Money),
}

/// Divides `lhs` by a positive `rhs`, rounding towards positive infinity.
fn ceil_div(lhs: i64, rhs: i64) -> i64 {
    let quotient = lhs / rhs;
    if lhs % rhs > 0 {
        quotient + 1
    } else {
        quotient
    }
}

#[cfg(test)]
mod tests {
    use common::{Date, Money};
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    use crate::domain::{
        contract::{self, RentalPeriod, RentalType},
        payment, property, tenant, Contract, Payment,
    };

    use super::{outstanding, paid, revenue, total_price, Balance, Error};

    fn period(start: &str, end: &str) -> RentalPeriod {
        RentalPeriod::new(start.parse().unwrap(), end.parse().unwrap())
    }

    fn money(amount: i64) -> Money {
        Money::new(Decimal::from(amount))
    }

    fn payment(id: i64, amount: i64) -> Payment {
        Payment {
            id: id.into(),
            contract_id: 1.into(),
            amount: money(amount),
            date: "2024-01-01".parse().unwrap(),
            note: None,
            is_paid: true,
        }
    }

    fn contract(id: i64, total_price: i64) -> Contract {
        Contract {
            id: contract::Id::from(id),
            property_id: property::Id::from(1),
            tenant_id: tenant::Id::from(1),
            period: period("2024-01-01", "2024-02-01"),
            deposit: Money::ZERO,
            total_price: money(total_price),
            status: contract::Status::Active,
        }
    }

    fn period_of(days: i64) -> RentalPeriod {
        let start: Date = "2024-01-01".parse().unwrap();
        RentalPeriod::new(start, start.checked_add_days(days).unwrap())
    }

    #[test]
    fn reports_overflowing_total() {
        let huge = Money::new(Decimal::MAX);

        assert_eq!(
            total_price(&period("2024-01-01", "2024-01-05"), huge, RentalType::Daily),
            Err(Error::Overflow(huge)),
        );
        assert_eq!(
            total_price(
                &period("2024-01-01", "2024-01-10"),
                huge,
                RentalType::Monthly,
            ),
            Ok(huge),
        );
    }

    #[test]
    fn bills_daily_per_day() {
        assert_eq!(
            total_price(
                &period("2024-01-01", "2024-01-05"),
                money(100_000),
                RentalType::Daily,
            ),
            Ok(money(400_000)),
        );
    }

    #[test]
    fn bills_short_monthly_stay_as_one_month() {
        assert_eq!(
            total_price(
                &period("2024-01-01", "2024-01-10"),
                money(1_000_000),
                RentalType::Monthly,
            ),
            Ok(money(1_000_000)),
        );
    }

    #[test]
    fn rounds_monthly_stay_up_after_half_a_month() {
        // 50 days: ceil((50 + 15) / 30) = 3
        assert_eq!(
            total_price(
                &period("2024-01-01", "2024-02-20"),
                money(1_000_000),
                RentalType::Monthly,
            ),
            Ok(money(3_000_000)),
        );

        // 45 days: ceil((45 + 15) / 30) = 2
        assert_eq!(
            total_price(&period_of(45), money(10), RentalType::Monthly),
            Ok(money(20)),
        );
        // 46 days: ceil((46 + 15) / 30) = 3
        assert_eq!(
            total_price(&period_of(46), money(10), RentalType::Monthly),
            Ok(money(30)),
        );
    }

    #[test]
    fn rejects_invalid_period() {
        let backwards = period("2024-01-05", "2024-01-01");
        assert_eq!(
            total_price(&backwards, money(100_000), RentalType::Daily),
            Err(Error::InvalidPeriod(backwards)),
        );

        let empty = period("2024-01-05", "2024-01-05");
        assert_eq!(
            total_price(&empty, money(100_000), RentalType::Monthly),
            Err(Error::InvalidPeriod(empty)),
        );
    }

    #[test]
    fn rejects_negative_price() {
        assert_eq!(
            total_price(
                &period("2024-01-01", "2024-01-05"),
                money(-1),
                RentalType::Daily,
            ),
            Err(Error::InvalidPrice(money(-1))),
        );
    }

    #[test]
    fn period_is_checked_before_price() {
        let backwards = period("2024-01-05", "2024-01-01");
        assert_eq!(
            total_price(&backwards, money(-1), RentalType::Daily),
            Err(Error::InvalidPeriod(backwards)),
        );
    }

    #[test]
    fn free_contracts_cost_nothing() {
        for rental_type in RentalType::all() {
            assert_eq!(
                total_price(
                    &period("2024-01-01", "2024-03-01"),
                    Money::ZERO,
                    rental_type,
                ),
                Ok(Money::ZERO),
            );
        }
    }

    #[test]
    fn keeps_fractional_unit_price() {
        let unit_price = Money::new("1500.50".parse().unwrap());
        assert_eq!(
            total_price(&period_of(3), unit_price, RentalType::Daily),
            Ok(Money::new("4501.50".parse().unwrap())),
        );
    }

    #[test]
    fn subtracts_payments_from_total() {
        assert_eq!(
            outstanding(money(500_000), &[payment(1, 200_000), payment(2, 100_000)]),
            money(200_000),
        );
    }

    #[test]
    fn clamps_overpayment_to_zero() {
        assert_eq!(outstanding(money(500_000), &[payment(1, 600_000)]), Money::ZERO);

        let balance = Balance::of(money(500_000), &[payment(1, 600_000)]);
        assert_eq!(balance.paid, money(600_000));
        assert_eq!(balance.outstanding, Money::ZERO);
        assert!(balance.is_settled());
    }

    #[test]
    fn nothing_paid_leaves_total_outstanding() {
        assert_eq!(outstanding(money(500_000), &[]), money(500_000));

        let balance = Balance::of(money(500_000), &[]);
        assert_eq!(balance.paid, Money::ZERO);
        assert!(!balance.is_settled());
    }

    #[test]
    fn revenue_counts_received_cash_only() {
        let first = contract(1, 1_000_000);
        let second = contract(2, 300_000);
        let third = contract(3, 700_000);
        let first_payments = [payment(1, 200_000), payment(2, 50_000)];
        let second_payments = [payment(3, 400_000)];

        assert_eq!(
            revenue([
                (&first, &first_payments[..]),
                (&second, &second_payments[..]),
                (&third, &[][..]),
            ]),
            money(650_000),
        );
    }

    #[test]
    fn revenue_of_nothing_is_zero() {
        let nothing: [(&Contract, &[Payment]); 0] = [];
        assert_eq!(revenue(nothing), Money::ZERO);
    }

    fn amounts() -> impl Strategy<Value = Vec<i64>> {
        prop::collection::vec(0_i64..5_000_000, 0..12)
    }

    fn to_payments(amounts: &[i64]) -> Vec<Payment> {
        amounts
            .iter()
            .zip(1..)
            .map(|(amount, id)| payment(id, *amount))
            .collect()
    }

    proptest! {
        #[test]
        fn pricing_is_monotonic(
            days in 1_i64..2_000,
            extra in 0_i64..400,
            unit_price in 0_i64..10_000_000,
            monthly in any::<bool>(),
        ) {
            let rental_type = if monthly {
                RentalType::Monthly
            } else {
                RentalType::Daily
            };
            let shorter =
                total_price(&period_of(days), money(unit_price), rental_type)
                    .unwrap();
            let longer = total_price(
                &period_of(days + extra),
                money(unit_price),
                rental_type,
            )
            .unwrap();

            prop_assert!(shorter <= longer);
        }

        #[test]
        fn monthly_stay_under_half_a_month_bills_one_month(
            days in 1_i64..15,
            unit_price in 0_i64..10_000_000,
        ) {
            prop_assert_eq!(
                total_price(&period_of(days), money(unit_price), RentalType::Monthly),
                Ok(money(unit_price)),
            );
        }

        #[test]
        fn outstanding_is_never_negative(
            total in 0_i64..10_000_000,
            amounts in amounts(),
        ) {
            let payments = to_payments(&amounts);
            prop_assert!(!outstanding(money(total), &payments).is_negative());
        }

        #[test]
        fn outstanding_decreases_by_each_payment(
            total in 0_i64..10_000_000,
            amounts in amounts(),
        ) {
            let payments = to_payments(&amounts);
            let sum: i64 = amounts.iter().sum();

            prop_assert_eq!(
                outstanding(money(total), &payments),
                outstanding(money(total), &[]).saturating_sub(money(sum)),
            );
            prop_assert_eq!(paid(&payments), money(sum));
        }

        #[test]
        fn outstanding_ignores_payment_order(
            total in 0_i64..10_000_000,
            amounts in amounts(),
        ) {
            let payments = to_payments(&amounts);
            let mut reversed = payments.clone();
            reversed.reverse();

            prop_assert_eq!(
                outstanding(money(total), &payments),
                outstanding(money(total), &reversed),
            );
        }

        #[test]
        fn revenue_equals_sum_of_paid(
            ledgers in prop::collection::vec((0_i64..10_000_000, amounts()), 0..8),
        ) {
            let contracts = ledgers
                .iter()
                .zip(1..)
                .map(|((total, amounts), id)| {
                    (contract(id, *total), to_payments(amounts))
                })
                .collect::<Vec<_>>();

            let expected = contracts
                .iter()
                .map(|(_, payments)| paid(payments))
                .sum::<Money>();
            prop_assert_eq!(
                revenue(contracts.iter().map(|(c, p)| (c, p))),
                expected,
            );

            let without_overpayment = contracts
                .iter()
                .all(|(c, p)| paid(p) <= c.total_price);
            if without_overpayment {
                let billed_minus_outstanding = contracts
                    .iter()
                    .map(|(c, p)| {
                        c.total_price.saturating_sub(outstanding(c.total_price, p))
                    })
                    .sum::<Money>();
                prop_assert_eq!(billed_minus_outstanding, expected);
            }
        }
    }
}

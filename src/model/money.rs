use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A currency amount held as a whole number of cents.
///
/// Every menu price is exact in cents, so sums never drift. Rounding only
/// happens when an amount is divided ([`Money::div_round`]) or converted from
/// a float. On the wire it is a decimal dollar amount (`4.5`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", from = "f64")]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub fn dollars(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Multiplies by a unit count (pastry quantity).
    pub fn times(self, count: i64) -> Money {
        Money(self.0 * count)
    }

    /// Divides and rounds half away from zero to the cent. Division by zero yields zero.
    pub fn div_round(self, divisor: u64) -> Money {
        if divisor == 0 {
            return Money::ZERO;
        }
        let divisor = divisor as i128;
        let cents = self.0 as i128;
        let half = divisor / 2;
        let rounded = if cents >= 0 {
            (cents + half) / divisor
        } else {
            (cents - half) / divisor
        };
        Money(rounded as i64)
    }
}

impl From<f64> for Money {
    fn from(dollars: f64) -> Self {
        Money((dollars * 100.0).round() as i64)
    }
}

impl From<Money> for f64 {
    fn from(money: Money) -> Self {
        money.dollars()
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}${}.{:02}", sign, abs / 100, abs % 100)
    }
}

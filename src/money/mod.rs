use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Signed currency amount with exactly two decimal digits, stored as cents.
///
/// All arithmetic happens on integer cents, so rounding is applied once when a
/// value enters the system (parsing, division) and never drifts afterwards.
/// Rounding policy is round-half-away-from-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

/// Largest magnitude accepted when converting from a float, in major units.
const MAX_FLOAT_MAJOR: f64 = 1.0e15;

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Converts a float amount in major units, rounding half away from zero
    /// to two decimals. Returns `None` for non-finite or absurdly large input.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() || value.abs() > MAX_FLOAT_MAJOR {
            return None;
        }
        Some(Money((value * 100.0).round() as i64))
    }

    /// The amount in major units as a float, for serialization and display.
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Even split of `total` across `n` participants, rounded half away from
    /// zero. Zero participants yields zero.
    pub fn equal_share(total: Money, n: usize) -> Money {
        if n == 0 {
            return Money::zero();
        }
        Money(div_round_half_away(total.0, n as i64))
    }
}

/// Round-half-away-from-zero integer division.
fn div_round_half_away(numerator: i64, divisor: i64) -> i64 {
    debug_assert!(divisor > 0);
    let sign = if numerator < 0 { -1 } else { 1 };
    let magnitude = (numerator.abs() * 2 + divisor) / (divisor * 2);
    sign * magnitude
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.0.abs() / 100, self.0.abs() % 100)
    }
}

impl FromStr for Money {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| format!("`{}` is not a valid amount", s))?;
        Money::from_f64(value).ok_or_else(|| format!("`{}` is not a valid amount", s))
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, value| acc + value)
    }
}

// Serialized as a plain decimal number so the JSON payload matches what a
// key-value store fed by a web front end would contain.
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_f64(value).ok_or_else(|| de::Error::custom("amount is not a finite number"))
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// Identifier of a product line in the cart.
pub type ItemId = u32;

/// A monetary value in minor units (cents).
///
/// Totals are summed in integer cents so the derived cart total never drifts
/// from the per-item prices. Displays with exactly two decimal places.
///
/// `+` and `*` saturate at the i64 bounds instead of panicking; catalogs are
/// checked with [`Money::checked_mul`] and [`Money::checked_add`] on load so
/// seeded carts never reach the bounds.
///
/// # Examples
///
/// ```
/// use tcart::domain::Money;
///
/// let price = Money::from_cents(59999);
/// assert_eq!(price.to_string(), "599.99");
/// assert_eq!((price * 2).to_string(), "1199.98");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Converts a decimal currency amount, rounding to the nearest cent.
    ///
    /// Returns `None` for non-finite values and amounts that do not fit.
    pub fn from_decimal(value: f64) -> Option<Self> {
        let cents = (value * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
        if cents.is_finite() && cents >= i64::MIN as f64 && cents < i64::MAX as f64 {
            Some(Money(cents as i64))
        } else {
            None
        }
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_mul(self, rhs: u32) -> Option<Money> {
        self.0.checked_mul(i64::from(rhs)).map(Money)
    }

    /// Parses a decimal string such as `"599.99"`, `"12"` or `"0.5"`.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (whole, frac) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (digits, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return None;
        }
        if frac.len() > 2 || !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
            return None;
        }

        let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().ok()? * 10,
            _ => frac.parse().ok()?,
        };

        let cents = whole.checked_mul(100)?.checked_add(frac)?;
        Some(Money(if negative { -cents } else { cents }))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(rhs)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct MoneyVisitor;

        impl Visitor<'_> for MoneyVisitor {
            type Value = Money;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a decimal amount such as 599.99 or \"599.99\"")
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Money, E> {
                Money::from_decimal(value)
                    .ok_or_else(|| E::custom(format!("amount out of range: {}", value)))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Money, E> {
                value
                    .checked_mul(100)
                    .map(Money)
                    .ok_or_else(|| E::custom("amount out of range"))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Money, E> {
                i64::try_from(value)
                    .ok()
                    .and_then(|v| v.checked_mul(100))
                    .map(Money)
                    .ok_or_else(|| E::custom("amount out of range"))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Money, E> {
                Money::parse(value).ok_or_else(|| E::custom(format!("invalid amount: {}", value)))
            }
        }

        deserializer.deserialize_any(MoneyVisitor)
    }
}

/// One product entry in the cart together with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ItemId,
    pub title: String,
    pub price: Money,
    #[serde(default, alias = "img")]
    pub image: String,
    #[serde(default = "default_amount")]
    pub amount: u32,
}

fn default_amount() -> u32 {
    1
}

impl LineItem {
    pub fn new(id: ItemId, title: impl Into<String>, price: Money, image: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
            amount: 1,
        }
    }

    /// Price multiplied by the current quantity.
    pub fn line_total(&self) -> Money {
        self.price * self.amount
    }
}

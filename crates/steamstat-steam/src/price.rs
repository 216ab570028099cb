//! Store price quotes and amount extraction from formatted prices.

use crate::models::AppData;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Current store price of one title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceQuote {
    /// Listed with a price.
    Priced {
        /// Localized display string from the store
        formatted: String,
        /// ISO 4217 currency code, when the store sent one
        currency: Option<String>,
    },
    /// Listed as free to play.
    Free,
    /// No price data: not listed, delisted, or the lookup failed.
    Unknown,
}

impl PriceQuote {
    /// Classifies a store `appdetails` data object.
    pub fn from_app_data(data: &AppData) -> Self {
        match &data.price_overview {
            Some(overview) => Self::Priced {
                formatted: overview.final_formatted.clone(),
                currency: Some(overview.currency.clone()).filter(|c| !c.is_empty()),
            },
            None if data.is_free => Self::Free,
            None => Self::Unknown,
        }
    }

    /// Whole-unit amount this quote contributes to a library total.
    ///
    /// `None` for [`PriceQuote::Unknown`].
    pub fn amount(&self) -> Option<u64> {
        match self {
            Self::Priced {
                formatted,
                currency,
            } => Some(extract_amount_in(formatted, currency.as_deref())),
            Self::Free => Some(0),
            Self::Unknown => None,
        }
    }

    /// Whether the store gave a definite answer.
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Currency code of a priced quote.
    pub fn currency(&self) -> Option<&str> {
        match self {
            Self::Priced { currency, .. } => currency.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for PriceQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Priced { formatted, .. } => f.write_str(formatted),
            Self::Free => f.write_str("Free"),
            Self::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Extracts the whole-unit amount from a formatted store price.
///
/// Reads the first run of ASCII digits. A single separator (space, no-break
/// space, thin space, comma, period or apostrophe) followed by exactly three
/// digits is a thousands group and is skipped, so `"1 234 руб."` yields 1234.
/// Any other character ends the amount, which drops a fractional part:
/// `"599,99€"` yields 599. Text without digits, such as `"Free"`, yields 0.
///
/// Without a currency a period before three digits always reads as a group,
/// so `"4.350 KD"` yields 4350. Use [`extract_amount_in`] when the currency
/// is known.
pub fn extract_amount(formatted: &str) -> u64 {
    extract_amount_in(formatted, None)
}

/// ISO 4217 codes whose minor unit has three digits.
pub const THREE_DECIMAL_CURRENCIES: [&str; 7] = ["BHD", "IQD", "JOD", "KWD", "LYD", "OMR", "TND"];

/// Like [`extract_amount`], reading a period as the decimal mark for
/// currencies with three minor digits: `"4.350 KD"` in `KWD` yields 4.
pub fn extract_amount_in(formatted: &str, currency: Option<&str>) -> u64 {
    let decimal_mark = currency
        .filter(|code| THREE_DECIMAL_CURRENCIES.contains(code))
        .map(|_| '.');

    let chars: Vec<char> = formatted.chars().collect();
    let Some(start) = chars.iter().position(char::is_ascii_digit) else {
        debug!(formatted, "Formatted price has no digits, counting as 0");
        return 0;
    };

    let mut amount: u64 = 0;
    let mut i = start;
    while i < chars.len() {
        let c = chars[i];
        if let Some(digit) = c.to_digit(10) {
            amount = amount.saturating_mul(10).saturating_add(u64::from(digit));
        } else if Some(c) == decimal_mark
            || !(is_group_separator(c) && starts_digit_group(&chars[i + 1..]))
        {
            break;
        }
        i += 1;
    }

    amount
}

const fn is_group_separator(c: char) -> bool {
    matches!(
        c,
        ' ' | '\u{00A0}' | '\u{202F}' | '\u{2009}' | ',' | '.' | '\''
    )
}

fn starts_digit_group(rest: &[char]) -> bool {
    rest.len() >= 3
        && rest[..3].iter().all(char::is_ascii_digit)
        && !rest.get(3).is_some_and(char::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceOverview;
    use proptest::prelude::*;

    #[test]
    fn test_extract_amount_with_space_groups() {
        assert_eq!(extract_amount("1 234 руб."), 1234);
        assert_eq!(extract_amount("1\u{00A0}234\u{00A0}567 руб."), 1_234_567);
        assert_eq!(extract_amount("2\u{202F}499 ₸"), 2499);
    }

    #[test]
    fn test_extract_amount_simple() {
        assert_eq!(extract_amount("399 руб."), 399);
        assert_eq!(extract_amount("¥ 68.00"), 68);
        assert_eq!(extract_amount("599,99€"), 599);
        assert_eq!(extract_amount("$1,234.56"), 1234);
        assert_eq!(extract_amount("1.234,56€"), 1234);
    }

    #[test]
    fn test_extract_amount_digit_free_is_zero() {
        assert_eq!(extract_amount("Free"), 0);
        assert_eq!(extract_amount("Бесплатно"), 0);
        assert_eq!(extract_amount(""), 0);
    }

    #[test]
    fn test_extract_amount_separator_without_group() {
        // "12 34" is not a thousands group
        assert_eq!(extract_amount("12 34"), 12);
        assert_eq!(extract_amount("1 2345"), 1);
    }

    #[test]
    fn test_extract_amount_three_decimal_currencies() {
        assert_eq!(extract_amount_in("4.350 KD", Some("KWD")), 4);
        assert_eq!(extract_amount_in("1.250 BD", Some("BHD")), 1);
        assert_eq!(extract_amount_in("1,250.000 KD", Some("KWD")), 1250);
        assert_eq!(extract_amount_in("1.234,56€", Some("EUR")), 1234);
        assert_eq!(extract_amount_in("1 234 руб.", None), 1234);
        // Without a currency the period still reads as a group
        assert_eq!(extract_amount("4.350 KD"), 4350);
    }

    #[test]
    fn test_priced_amount_uses_currency() {
        let quote = PriceQuote::Priced {
            formatted: "4.350 KD".to_string(),
            currency: Some("KWD".to_string()),
        };
        assert_eq!(quote.amount(), Some(4));
    }

    #[test]
    fn test_quote_from_app_data() {
        let priced = AppData {
            name: Some("Portal 2".to_string()),
            is_free: false,
            price_overview: Some(PriceOverview {
                currency: "RUB".to_string(),
                initial: Some(39900),
                final_price: Some(39900),
                discount_percent: Some(0),
                final_formatted: "399 руб.".to_string(),
            }),
        };
        let quote = PriceQuote::from_app_data(&priced);
        assert_eq!(quote.amount(), Some(399));
        assert_eq!(quote.currency(), Some("RUB"));
        assert_eq!(quote.to_string(), "399 руб.");

        let free = AppData {
            is_free: true,
            ..AppData::default()
        };
        assert_eq!(PriceQuote::from_app_data(&free), PriceQuote::Free);
        assert_eq!(PriceQuote::Free.amount(), Some(0));

        let unlisted = AppData::default();
        assert_eq!(PriceQuote::from_app_data(&unlisted), PriceQuote::Unknown);
        assert_eq!(PriceQuote::Unknown.amount(), None);
        assert!(!PriceQuote::Unknown.is_known());
    }

    proptest! {
        #[test]
        fn test_property_plain_number_roundtrips(n in 0u64..1_000_000_000) {
            prop_assert_eq!(extract_amount(&format!("{n} руб.")), n);
        }

        #[test]
        fn test_property_space_grouped_number(n in 0u64..1_000_000_000) {
            let digits = n.to_string();
            let mut grouped = String::new();
            for (i, c) in digits.chars().enumerate() {
                if i > 0 && (digits.len() - i) % 3 == 0 {
                    grouped.push(' ');
                }
                grouped.push(c);
            }
            prop_assert_eq!(extract_amount(&format!("{grouped} руб.")), n);
        }

        #[test]
        fn test_property_digit_free_is_zero(s in "[a-zA-Zа-яА-Я €$]*") {
            prop_assert_eq!(extract_amount(&s), 0);
        }
    }
}

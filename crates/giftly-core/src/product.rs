//! Product card logic: price parsing, rupee formatting, discount detection.
//!
//! Prices arrive as numbers or loosely formatted strings (`"1,299"`,
//! `"499.00"`). Anything unparsable is treated as zero rather than an error.

use giftly_types::feedback::FeedbackTarget;
use giftly_types::product::{PriceValue, Product};

/// Image shown when a product image fails to load.
pub const FALLBACK_IMAGE: &str = "/shopping-assistant-fo5Sg.png";

const RUPEE: char = '\u{20b9}';

/// Numeric value of a price; unparsable or non-finite values become 0.
pub fn parse_price(price: &PriceValue) -> f64 {
    let value = match price {
        PriceValue::Number(n) => *n,
        PriceValue::Text(s) => leading_float(&s.replace(',', "")).unwrap_or(0.0),
    };
    if value.is_finite() { value } else { 0.0 }
}

/// Parse the longest numeric prefix of `s`, ignoring leading whitespace.
fn leading_float(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Group an integer digit string the Indian way: `1234567` -> `12,34,567`.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// Format a price in rupees with Indian digit grouping, e.g. `₹1,23,456.5`.
///
/// Up to three fraction digits are kept; trailing zeros are dropped.
pub fn format_price(price: &PriceValue) -> String {
    let value = parse_price(price);
    // Round half away from zero; `{:.3}` alone rounds exact ties to even.
    let fixed = format!("{:.3}", (value.abs() * 1000.0).round() / 1000.0);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');
    let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };

    let mut out = format!("{RUPEE}{sign}{}", group_indian(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// A discount is shown when the discounted price is positive and differs
/// from the list price.
pub fn has_discount(product: &Product) -> bool {
    let discounted = parse_price(&product.discounted_price);
    discounted > 0.0 && discounted != parse_price(&product.price)
}

/// Display-ready card data for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    /// Price to show prominently (the discounted one when discounted).
    pub display_price: String,
    /// Struck-through list price, only when discounted.
    pub original_price: Option<String>,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub url: String,
    pub image: String,
    feedback: Option<(String, String)>,
}

impl ProductCard {
    pub fn from_product(product: &Product, session_id: Option<&str>, message_id: Option<&str>) -> Self {
        let (display_price, original_price) = if has_discount(product) {
            (
                format_price(&product.discounted_price),
                Some(format_price(&product.price)),
            )
        } else {
            (format_price(&product.price), None)
        };

        let image = if product.image.trim().is_empty() {
            FALLBACK_IMAGE.to_string()
        } else {
            product.image.clone()
        };

        let feedback = match (session_id, message_id) {
            (Some(s), Some(m)) if !s.is_empty() && !m.is_empty() => Some((s.to_string(), m.to_string())),
            _ => None,
        };

        Self {
            id: product.id.clone(),
            title: product.title.clone(),
            display_price,
            original_price,
            description: Some(product.description.clone()).filter(|d| !d.is_empty()),
            brand: product.brand.clone().filter(|b| !b.is_empty()),
            url: product.url.clone(),
            image,
            feedback,
        }
    }

    /// Feedback is offered only when both session and message ids are known.
    pub fn can_provide_feedback(&self) -> bool {
        self.feedback.is_some()
    }

    /// Target for the feedback dialog, when feedback is available.
    pub fn feedback_target(&self) -> Option<FeedbackTarget> {
        self.feedback.as_ref().map(|(session_id, message_id)| FeedbackTarget {
            session_id: session_id.clone(),
            message_id: message_id.clone(),
            product_id: self.id.clone(),
            product_title: self.title.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: PriceValue, discounted: PriceValue) -> Product {
        Product {
            id: "p-1".to_string(),
            title: "Ceramic Mug".to_string(),
            price,
            discounted_price: discounted,
            url: "https://shop.example/p-1".to_string(),
            image: "https://shop.example/p-1.jpg".to_string(),
            description: String::new(),
            brand: None,
            category: None,
            score: None,
            rank: None,
        }
    }

    #[test]
    fn test_parse_price_variants() {
        assert_eq!(parse_price(&PriceValue::Number(499.0)), 499.0);
        assert_eq!(parse_price(&"1,299".into()), 1299.0);
        assert_eq!(parse_price(&"1,23,456.75".into()), 123456.75);
        assert_eq!(parse_price(&" 350 INR".into()), 350.0);
        assert_eq!(parse_price(&".5".into()), 0.5);
        assert_eq!(parse_price(&"1e3".into()), 1000.0);
    }

    #[test]
    fn test_parse_price_malformed_falls_back_to_zero() {
        assert_eq!(parse_price(&"".into()), 0.0);
        assert_eq!(parse_price(&"N/A".into()), 0.0);
        assert_eq!(parse_price(&"\u{20b9}500".into()), 0.0);
        assert_eq!(parse_price(&PriceValue::Number(f64::NAN)), 0.0);
    }

    #[test]
    fn test_format_price_indian_grouping() {
        assert_eq!(format_price(&PriceValue::Number(0.0)), "\u{20b9}0");
        assert_eq!(format_price(&PriceValue::Number(999.0)), "\u{20b9}999");
        assert_eq!(format_price(&PriceValue::Number(1000.0)), "\u{20b9}1,000");
        assert_eq!(format_price(&PriceValue::Number(123456.0)), "\u{20b9}1,23,456");
        assert_eq!(format_price(&PriceValue::Number(12345678.0)), "\u{20b9}1,23,45,678");
        assert_eq!(format_price(&"2,499.50".into()), "\u{20b9}2,499.5");
        assert_eq!(format_price(&PriceValue::Number(10.12345)), "\u{20b9}10.123");
    }

    #[test]
    fn test_format_price_rounds_ties_away_from_zero() {
        assert_eq!(format_price(&PriceValue::Number(1.0625)), "\u{20b9}1.063");
        assert_eq!(format_price(&PriceValue::Number(0.0005)), "\u{20b9}0.001");
        assert_eq!(format_price(&PriceValue::Number(-2.0625)), "\u{20b9}-2.063");
    }

    #[test]
    fn test_format_price_malformed_shows_placeholder() {
        assert_eq!(format_price(&"call for price".into()), "\u{20b9}0");
    }

    #[test]
    fn test_has_discount_rules() {
        assert!(has_discount(&product(1999.0.into(), "1,499".into())));
        assert!(!has_discount(&product(1999.0.into(), "1,999".into())));
        assert!(!has_discount(&product(1999.0.into(), 0.0.into())));
        assert!(!has_discount(&product(1999.0.into(), "oops".into())));
    }

    #[test]
    fn test_card_prices_when_discounted() {
        let card = ProductCard::from_product(&product("2,000".into(), 1500.0.into()), None, None);
        assert_eq!(card.display_price, "\u{20b9}1,500");
        assert_eq!(card.original_price.as_deref(), Some("\u{20b9}2,000"));
        assert!(card.description.is_none());
    }

    #[test]
    fn test_card_feedback_requires_both_ids() {
        let p = product(500.0.into(), 500.0.into());
        assert!(!ProductCard::from_product(&p, Some("s"), None).can_provide_feedback());
        assert!(!ProductCard::from_product(&p, None, Some("m")).can_provide_feedback());

        let card = ProductCard::from_product(&p, Some("s"), Some("m"));
        assert!(card.can_provide_feedback());
        let target = card.feedback_target().unwrap();
        assert_eq!(target.product_id, "p-1");
        assert_eq!(target.session_id, "s");
        assert_eq!(target.message_id, "m");
    }

    #[test]
    fn test_card_uses_fallback_image() {
        let mut p = product(100.0.into(), 0.0.into());
        p.image = String::new();
        let card = ProductCard::from_product(&p, None, None);
        assert_eq!(card.image, FALLBACK_IMAGE);
        assert!(card.original_price.is_none());
    }
}

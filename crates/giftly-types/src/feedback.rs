//! Product feedback records sent to the shopping API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::{ClosedSet, closed_set, parse_member};
use crate::error::{FeedbackError, UnknownValue};

/// Maximum number of predefined reasons per feedback.
pub const MAX_REASONS: usize = 3;

/// Character limit for the custom reason.
pub const CUSTOM_REASON_MAX_CHARS: usize = 200;

/// Character limit for the original query field.
pub const USER_QUERY_MAX_CHARS: usize = 500;

/// Character limit for the free-form "more details" field.
pub const MORE_DETAILS_MAX_CHARS: usize = 1000;

closed_set! {
    /// Predefined reasons a user can attach to product feedback.
    FeedbackReason, "feedback reason" {
        NotRelevant => "Not relevant to my query",
        PriceMismatch => "Too expensive / price mismatch",
        PoorImage => "Poor image or unclear product",
        MissingDetails => "Missing key details (size/material/specs)",
        BetterAlternatives => "Better alternatives recommended",
        IncorrectCategory => "Incorrect category or tags",
        Unavailable => "Outdated or unavailable item",
        QualityConcerns => "Quality concerns / looks cheap",
        StyleMismatch => "Style doesn't match examples",
        DeliveryConcerns => "Delivery / shipping concerns",
    }
}

/// Optional feedback category. Serialized as its lowercase wire value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackCategory {
    Relevance,
    Price,
    Quality,
    Style,
    Availability,
    Specs,
    Usability,
    Other,
}

impl FeedbackCategory {
    pub const ALL: &'static [FeedbackCategory] = &[
        FeedbackCategory::Relevance,
        FeedbackCategory::Price,
        FeedbackCategory::Quality,
        FeedbackCategory::Style,
        FeedbackCategory::Availability,
        FeedbackCategory::Specs,
        FeedbackCategory::Usability,
        FeedbackCategory::Other,
    ];

    /// Value sent as `feedback_type`.
    pub const fn value(self) -> &'static str {
        match self {
            FeedbackCategory::Relevance => "relevance",
            FeedbackCategory::Price => "price",
            FeedbackCategory::Quality => "quality",
            FeedbackCategory::Style => "style",
            FeedbackCategory::Availability => "availability",
            FeedbackCategory::Specs => "specs",
            FeedbackCategory::Usability => "usability",
            FeedbackCategory::Other => "other",
        }
    }

    /// Label shown in the category picker.
    pub const fn label(self) -> &'static str {
        match self {
            FeedbackCategory::Relevance => "Relevance",
            FeedbackCategory::Price => "Price",
            FeedbackCategory::Quality => "Quality",
            FeedbackCategory::Style => "Style",
            FeedbackCategory::Availability => "Availability",
            FeedbackCategory::Specs => "Specs",
            FeedbackCategory::Usability => "Usability",
            FeedbackCategory::Other => "Other",
        }
    }
}

impl ClosedSet for FeedbackCategory {
    const KIND: &'static str = "feedback category";

    fn all() -> &'static [Self] {
        Self::ALL
    }

    fn label(self) -> &'static str {
        FeedbackCategory::label(self)
    }
}

impl fmt::Display for FeedbackCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for FeedbackCategory {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_member(s)
    }
}

/// A star rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(stars: u8) -> Result<Self, FeedbackError> {
        if (Self::MIN..=Self::MAX).contains(&stars) {
            Ok(Self(stars))
        } else {
            Err(FeedbackError::InvalidRating(stars))
        }
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = FeedbackError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.0)
    }
}

/// Identifies what a piece of feedback is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackTarget {
    pub session_id: String,
    pub message_id: String,
    pub product_id: String,
    /// Product title as received; may contain HTML markup.
    pub product_title: String,
}

/// The `reason` field: one reason is sent as a bare string, several as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReasonValue {
    One(FeedbackReason),
    Many(Vec<FeedbackReason>),
}

impl ReasonValue {
    /// Shape a reason list for the wire; `None` when nothing is selected.
    pub fn from_selected(reasons: &[FeedbackReason]) -> Option<Self> {
        match reasons {
            [] => None,
            [single] => Some(ReasonValue::One(*single)),
            many => Some(ReasonValue::Many(many.to_vec())),
        }
    }
}

/// Body of `POST /api/feedback/product`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFeedback {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "messageID")]
    pub message_id: String,
    #[serde(rename = "productId")]
    pub product_id: String,
    pub rating: Rating,
    pub reason: Option<ReasonValue>,
    pub reason_text: Option<String>,
    pub user_query: Option<String>,
    pub feedback_type: Option<FeedbackCategory>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert_eq!(Rating::new(1).unwrap().stars(), 1);
        assert_eq!(Rating::new(5).unwrap().stars(), 5);
        assert_eq!(Rating::new(6), Err(FeedbackError::InvalidRating(6)));
    }

    #[test]
    fn test_rating_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("4").is_ok());
        assert!(serde_json::from_str::<Rating>("9").is_err());
    }

    #[test]
    fn test_category_parses_value_or_label() {
        assert_eq!("specs".parse::<FeedbackCategory>().unwrap(), FeedbackCategory::Specs);
        assert_eq!("Usability".parse::<FeedbackCategory>().unwrap(), FeedbackCategory::Usability);
        assert!("speed".parse::<FeedbackCategory>().is_err());
        assert_eq!(FeedbackCategory::ALL.len(), 8);
        assert_eq!(FeedbackReason::ALL.len(), 10);
    }

    #[test]
    fn test_reason_value_shapes() {
        assert_eq!(ReasonValue::from_selected(&[]), None);
        assert_eq!(
            ReasonValue::from_selected(&[FeedbackReason::PoorImage]),
            Some(ReasonValue::One(FeedbackReason::PoorImage))
        );
        assert_eq!(
            ReasonValue::from_selected(&[FeedbackReason::PoorImage, FeedbackReason::NotRelevant]),
            Some(ReasonValue::Many(vec![
                FeedbackReason::PoorImage,
                FeedbackReason::NotRelevant
            ]))
        );
    }

    #[test]
    fn test_product_feedback_wire_format() {
        let feedback = ProductFeedback {
            session_id: "s-1".to_string(),
            message_id: "m-1".to_string(),
            product_id: "p-1".to_string(),
            rating: Rating::new(2).unwrap(),
            reason: ReasonValue::from_selected(&[FeedbackReason::PriceMismatch]),
            reason_text: None,
            user_query: Some("gift for dad".to_string()),
            feedback_type: Some(FeedbackCategory::Price),
        };
        let json = serde_json::to_value(&feedback).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "sessionId": "s-1",
                "messageID": "m-1",
                "productId": "p-1",
                "rating": 2,
                "reason": "Too expensive / price mismatch",
                "reason_text": null,
                "user_query": "gift for dad",
                "feedback_type": "price"
            })
        );
    }
}

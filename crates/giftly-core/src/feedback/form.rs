//! Feedback form state and payload shaping.

use giftly_types::error::FeedbackError;
use giftly_types::feedback::{
    CUSTOM_REASON_MAX_CHARS, FeedbackCategory, FeedbackReason, FeedbackTarget, MAX_REASONS,
    MORE_DETAILS_MAX_CHARS, ProductFeedback, Rating, ReasonValue, USER_QUERY_MAX_CHARS,
};
use giftly_types::filter::{Toggle, truncate_chars};

/// Everything the user has entered in the feedback dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackForm {
    target: FeedbackTarget,
    rating: Option<Rating>,
    reasons: Vec<FeedbackReason>,
    show_custom_reason: bool,
    custom_reason: String,
    category: Option<FeedbackCategory>,
    user_query: String,
    /// Set when the query was supplied by the caller; the field is read-only then.
    prefilled_query: Option<String>,
    more_details: String,
}

impl FeedbackForm {
    pub fn new(target: FeedbackTarget) -> Self {
        Self {
            target,
            rating: None,
            reasons: Vec::new(),
            show_custom_reason: false,
            custom_reason: String::new(),
            category: None,
            user_query: String::new(),
            prefilled_query: None,
            more_details: String::new(),
        }
    }

    /// Pre-fill the original query. A pre-filled query cannot be edited.
    pub fn with_user_query(mut self, query: &str) -> Self {
        if !query.is_empty() {
            let query = truncate_chars(query, USER_QUERY_MAX_CHARS);
            self.user_query = query.clone();
            self.prefilled_query = Some(query);
        }
        self
    }

    pub fn target(&self) -> &FeedbackTarget {
        &self.target
    }

    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    pub fn reasons(&self) -> &[FeedbackReason] {
        &self.reasons
    }

    pub fn shows_custom_reason(&self) -> bool {
        self.show_custom_reason
    }

    pub fn custom_reason(&self) -> &str {
        &self.custom_reason
    }

    pub fn category(&self) -> Option<FeedbackCategory> {
        self.category
    }

    pub fn user_query(&self) -> &str {
        &self.user_query
    }

    pub fn is_query_locked(&self) -> bool {
        self.prefilled_query.is_some()
    }

    pub fn more_details(&self) -> &str {
        &self.more_details
    }

    /// Set the star rating (1-5).
    pub fn set_rating(&mut self, stars: u8) -> Result<Rating, FeedbackError> {
        let rating = Rating::new(stars)?;
        self.rating = Some(rating);
        Ok(rating)
    }

    /// Whether the chip for `reason` is enabled.
    pub fn can_toggle_reason(&self, reason: FeedbackReason) -> bool {
        self.reasons.contains(&reason) || self.reasons.len() < MAX_REASONS
    }

    /// Add or remove a predefined reason; at most three may be selected.
    pub fn toggle_reason(&mut self, reason: FeedbackReason) -> Result<Toggle, FeedbackError> {
        if let Some(pos) = self.reasons.iter().position(|r| *r == reason) {
            self.reasons.remove(pos);
            Ok(Toggle::Removed)
        } else if self.reasons.len() >= MAX_REASONS {
            Err(FeedbackError::ReasonLimit { max: MAX_REASONS })
        } else {
            self.reasons.push(reason);
            Ok(Toggle::Added)
        }
    }

    /// Show or hide the custom reason field. Entered text is kept either way.
    pub fn toggle_custom_reason(&mut self) -> bool {
        self.show_custom_reason = !self.show_custom_reason;
        self.show_custom_reason
    }

    pub fn set_custom_reason(&mut self, text: &str) {
        self.show_custom_reason = true;
        self.custom_reason = truncate_chars(text, CUSTOM_REASON_MAX_CHARS);
    }

    pub fn set_category(&mut self, category: Option<FeedbackCategory>) {
        self.category = category;
    }

    /// Edit the original query. Ignored when the query was pre-filled.
    pub fn set_user_query(&mut self, text: &str) {
        if self.prefilled_query.is_none() {
            self.user_query = truncate_chars(text, USER_QUERY_MAX_CHARS);
        }
    }

    pub fn set_more_details(&mut self, text: &str) {
        self.more_details = truncate_chars(text, MORE_DETAILS_MAX_CHARS);
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        self.rating.is_some()
    }

    /// Custom reason and more details, trimmed and joined by one space.
    fn reason_text(&self) -> Option<String> {
        let parts: Vec<&str> = [self.custom_reason.trim(), self.more_details.trim()]
            .into_iter()
            .filter(|p| !p.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// Shape the form into the wire record.
    pub fn to_payload(&self) -> Result<ProductFeedback, FeedbackError> {
        let rating = self.rating.ok_or(FeedbackError::MissingRating)?;
        let user_query = self.user_query.trim();

        Ok(ProductFeedback {
            session_id: self.target.session_id.clone(),
            message_id: self.target.message_id.clone(),
            product_id: self.target.product_id.clone(),
            rating,
            reason: ReasonValue::from_selected(&self.reasons),
            reason_text: self.reason_text(),
            user_query: (!user_query.is_empty()).then(|| user_query.to_string()),
            feedback_type: self.category,
        })
    }

    /// Clear everything the user entered. A pre-filled query is restored.
    pub fn reset(&mut self) {
        let target = self.target.clone();
        let prefilled = self.prefilled_query.take();
        *self = FeedbackForm::new(target);
        if let Some(query) = prefilled {
            self.user_query = query.clone();
            self.prefilled_query = Some(query);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> FeedbackTarget {
        FeedbackTarget {
            session_id: "sess-1".to_string(),
            message_id: "msg-1".to_string(),
            product_id: "prod-1".to_string(),
            product_title: "<b>Scented Candle</b>".to_string(),
        }
    }

    #[test]
    fn test_missing_rating_blocks_payload() {
        let form = FeedbackForm::new(target());
        assert!(!form.can_submit());
        assert_eq!(form.to_payload(), Err(FeedbackError::MissingRating));
    }

    #[test]
    fn test_set_rating_validates_range() {
        let mut form = FeedbackForm::new(target());
        assert_eq!(form.set_rating(0), Err(FeedbackError::InvalidRating(0)));
        assert!(form.rating().is_none());
        assert_eq!(form.set_rating(4).unwrap().stars(), 4);
        assert!(form.can_submit());
    }

    #[test]
    fn test_minimal_payload_uses_nulls() {
        let mut form = FeedbackForm::new(target());
        form.set_rating(5).unwrap();
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.session_id, "sess-1");
        assert_eq!(payload.message_id, "msg-1");
        assert_eq!(payload.product_id, "prod-1");
        assert_eq!(payload.reason, None);
        assert_eq!(payload.reason_text, None);
        assert_eq!(payload.user_query, None);
        assert_eq!(payload.feedback_type, None);
    }

    #[test]
    fn test_reason_cap_is_three() {
        let mut form = FeedbackForm::new(target());
        form.toggle_reason(FeedbackReason::NotRelevant).unwrap();
        form.toggle_reason(FeedbackReason::PoorImage).unwrap();
        form.toggle_reason(FeedbackReason::Unavailable).unwrap();
        assert!(!form.can_toggle_reason(FeedbackReason::StyleMismatch));
        assert_eq!(
            form.toggle_reason(FeedbackReason::StyleMismatch),
            Err(FeedbackError::ReasonLimit { max: 3 })
        );
        assert_eq!(form.reasons().len(), 3);

        assert_eq!(form.toggle_reason(FeedbackReason::PoorImage), Ok(Toggle::Removed));
        assert_eq!(form.toggle_reason(FeedbackReason::StyleMismatch), Ok(Toggle::Added));
    }

    #[test]
    fn test_payload_shapes_reasons() {
        let mut form = FeedbackForm::new(target());
        form.set_rating(2).unwrap();
        form.toggle_reason(FeedbackReason::PriceMismatch).unwrap();
        assert_eq!(
            form.to_payload().unwrap().reason,
            Some(ReasonValue::One(FeedbackReason::PriceMismatch))
        );

        form.toggle_reason(FeedbackReason::QualityConcerns).unwrap();
        assert_eq!(
            form.to_payload().unwrap().reason,
            Some(ReasonValue::Many(vec![
                FeedbackReason::PriceMismatch,
                FeedbackReason::QualityConcerns
            ]))
        );
    }

    #[test]
    fn test_reason_text_joins_custom_and_details() {
        let mut form = FeedbackForm::new(target());
        form.set_rating(3).unwrap();
        form.set_custom_reason("  smells odd ");
        form.set_more_details(" arrived late  ");
        assert_eq!(
            form.to_payload().unwrap().reason_text.as_deref(),
            Some("smells odd arrived late")
        );

        form.set_more_details("");
        assert_eq!(
            form.to_payload().unwrap().reason_text.as_deref(),
            Some("smells odd")
        );
    }

    #[test]
    fn test_hiding_custom_field_keeps_its_text_in_payload() {
        let mut form = FeedbackForm::new(target());
        form.set_rating(3).unwrap();
        form.set_custom_reason("smells odd");
        assert!(form.shows_custom_reason());

        assert!(!form.toggle_custom_reason());
        assert_eq!(form.custom_reason(), "smells odd");
        assert_eq!(
            form.to_payload().unwrap().reason_text.as_deref(),
            Some("smells odd")
        );
    }

    #[test]
    fn test_free_text_limits() {
        let mut form = FeedbackForm::new(target());
        form.set_custom_reason(&"c".repeat(250));
        form.set_user_query(&"q".repeat(600));
        form.set_more_details(&"d".repeat(1200));
        assert_eq!(form.custom_reason().chars().count(), 200);
        assert_eq!(form.user_query().chars().count(), 500);
        assert_eq!(form.more_details().chars().count(), 1000);
    }

    #[test]
    fn test_prefilled_query_is_locked_and_survives_reset() {
        let mut form = FeedbackForm::new(target()).with_user_query("Diwali for mom");
        assert!(form.is_query_locked());
        form.set_user_query("something else");
        assert_eq!(form.user_query(), "Diwali for mom");

        form.set_rating(1).unwrap();
        form.set_category(Some(FeedbackCategory::Relevance));
        form.reset();
        assert!(form.rating().is_none());
        assert!(form.category().is_none());
        assert_eq!(form.user_query(), "Diwali for mom");
        assert!(form.is_query_locked());
    }

    #[test]
    fn test_user_query_trimmed_in_payload() {
        let mut form = FeedbackForm::new(target());
        form.set_rating(4).unwrap();
        form.set_user_query("  headphones  ");
        form.set_category(Some(FeedbackCategory::Specs));
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.user_query.as_deref(), Some("headphones"));
        assert_eq!(payload.feedback_type, Some(FeedbackCategory::Specs));
    }
}

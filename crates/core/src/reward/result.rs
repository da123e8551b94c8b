//! Field keys and result types produced by the reward validator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::input::RewardDraft;

/// A validated reward field.
///
/// Variant order is the order messages are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RewardField {
    RewardName,
    Price,
    RewardContent,
    IsPosting,
    DeliveryDate,
    RewardCnt,
}

impl RewardField {
    pub const ALL: [RewardField; 6] = [
        RewardField::RewardName,
        RewardField::Price,
        RewardField::RewardContent,
        RewardField::IsPosting,
        RewardField::DeliveryDate,
        RewardField::RewardCnt,
    ];

    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            RewardField::RewardName => "rewardName",
            RewardField::Price => "price",
            RewardField::RewardContent => "rewardContent",
            RewardField::IsPosting => "isPosting",
            RewardField::DeliveryDate => "deliveryDate",
            RewardField::RewardCnt => "rewardCnt",
        }
    }
}

/// Per-field error messages for one reward. A missing key means the field is
/// valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RewardFieldErrors(BTreeMap<RewardField, String>);

impl RewardFieldErrors {
    pub fn get(&self, field: RewardField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: RewardField) -> bool {
        self.0.contains_key(&field)
    }

    /// Set (or overwrite) the message for `field`. Empty messages are ignored.
    pub fn set(&mut self, field: RewardField, message: impl Into<String>) {
        let message = message.into();
        if !message.is_empty() {
            self.0.insert(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Messages in field order.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.values().map(String::as_str)
    }
}

/// Outcome of validating a single reward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardValidation {
    pub ok: bool,
    pub errors: RewardFieldErrors,
    pub all_errors: Vec<String>,
    /// Present only when `ok` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<RewardDraft>,
}

/// Outcome of validating a list of rewards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardListValidation {
    pub ok: bool,
    /// Index-aligned with the input list; empty for valid items.
    pub field_errors_list: Vec<RewardFieldErrors>,
    pub all_errors: Vec<String>,
    /// Normalized name keys shared by two or more rewards.
    pub duplicates: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_follow_field_order_not_insert_order() {
        let mut errors = RewardFieldErrors::default();
        errors.set(RewardField::RewardCnt, "count");
        errors.set(RewardField::RewardName, "name");
        errors.set(RewardField::DeliveryDate, "date");
        let messages: Vec<&str> = errors.messages().collect();
        assert_eq!(messages, vec!["name", "date", "count"]);
    }

    #[test]
    fn empty_message_is_not_recorded() {
        let mut errors = RewardFieldErrors::default();
        errors.set(RewardField::Price, "");
        assert!(errors.is_empty());
    }

    #[test]
    fn serializes_with_wire_names() {
        let mut errors = RewardFieldErrors::default();
        errors.set(RewardField::RewardName, "bad name");
        errors.set(RewardField::IsPosting, "bad flag");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["rewardName"], "bad name");
        assert_eq!(json["isPosting"], "bad flag");
        for field in RewardField::ALL {
            let key = serde_json::to_value(field).unwrap();
            assert_eq!(key, field.as_str());
        }
    }
}

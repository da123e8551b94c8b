//! Reward input shapes and their normalization into [`RewardFields`].
//!
//! Rewards reach the validator as raw editor strings, as typed records loaded
//! from the API, or as loosely typed JSON. All are folded into one canonical
//! shape at the boundary so the rules only ever deal with [`RewardFields`].

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::dates::DateInput;
use crate::types::DbId;

/// Raw reward values exactly as typed in the reward editor.
///
/// Empty strings mean "not entered". `price` may carry thousands separators.
/// An empty `reward_cnt` means unlimited stock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RewardForm {
    pub reward_name: String,
    pub price: String,
    pub reward_content: String,
    pub delivery_date: String,
    pub reward_cnt: String,
    pub is_posting: String,
}

/// A reward as stored by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_id: Option<DbId>,
    pub reward_name: Option<String>,
    pub price: Option<i64>,
    pub reward_content: Option<String>,
    pub delivery_date: Option<DateInput>,
    /// `None` means unlimited stock, `Some(0)` means sold out.
    pub reward_cnt: Option<i64>,
    pub is_posting: Option<String>,
}

/// A reward decoded from JSON of unknown provenance.
///
/// Every field takes a string, a number or `null`, so any mix of editor text
/// and typed values reaches the rules instead of failing to decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RewardJson {
    pub reward_name: Option<Value>,
    pub price: Option<Value>,
    pub reward_content: Option<Value>,
    pub delivery_date: Option<Value>,
    pub reward_cnt: Option<Value>,
    pub is_posting: Option<Value>,
}

/// Any reward shape accepted by the validator.
///
/// Deserialization always goes through [`RewardJson`]; the typed variants are
/// for in-process callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RewardInput {
    Record(RewardRecord),
    Form(RewardForm),
    Json(RewardJson),
}

impl<'de> Deserialize<'de> for RewardInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        RewardJson::deserialize(deserializer).map(RewardInput::Json)
    }
}

impl From<RewardForm> for RewardInput {
    fn from(form: RewardForm) -> Self {
        RewardInput::Form(form)
    }
}

impl From<RewardRecord> for RewardInput {
    fn from(record: RewardRecord) -> Self {
        RewardInput::Record(record)
    }
}

/// A numeric field after boundary parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericValue {
    Missing,
    Invalid,
    Value(i64),
}

impl NumericValue {
    fn from_option(value: Option<i64>) -> Self {
        value.map_or(NumericValue::Missing, NumericValue::Value)
    }

    /// A float with no fractional part counts as an integer.
    fn from_f64(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            NumericValue::Value(value as i64)
        } else {
            NumericValue::Invalid
        }
    }

    /// Parse editor text. Commas are accepted as thousands separators.
    fn parse_text(raw: &str) -> Self {
        let text: String = raw.trim().chars().filter(|c| *c != ',').collect();
        if text.is_empty() {
            return NumericValue::Missing;
        }
        if let Ok(value) = text.parse::<i64>() {
            return NumericValue::Value(value);
        }
        text.parse::<f64>()
            .map_or(NumericValue::Invalid, NumericValue::from_f64)
    }

    fn from_json(value: Option<&Value>) -> Self {
        match value {
            None | Some(Value::Null) => NumericValue::Missing,
            Some(Value::String(text)) => NumericValue::parse_text(text),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(value) => NumericValue::Value(value),
                None => n.as_f64().map_or(NumericValue::Invalid, NumericValue::from_f64),
            },
            Some(_) => NumericValue::Invalid,
        }
    }
}

/// The canonical reward shape the rules run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardFields {
    pub name: Option<String>,
    pub price: NumericValue,
    pub content: Option<String>,
    pub delivery_date: Option<DateInput>,
    pub count: NumericValue,
    pub is_posting: Option<String>,
}

fn non_blank(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Scalar JSON as text. Arrays and objects count as absent.
fn json_text(value: Option<&Value>) -> Option<Cow<'_, str>> {
    match value? {
        Value::String(text) => Some(Cow::Borrowed(text)),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

fn json_date(value: Option<&Value>) -> Option<DateInput> {
    match value? {
        Value::Null => None,
        Value::String(text) => non_blank(text).map(DateInput::Text),
        Value::Number(n) => Some(
            n.as_i64()
                .map_or_else(|| DateInput::Text(n.to_string()), DateInput::EpochMillis),
        ),
        other => Some(DateInput::Text(other.to_string())),
    }
}

impl RewardInput {
    /// Fold this input into the canonical [`RewardFields`].
    pub fn to_fields(&self) -> RewardFields {
        match self {
            RewardInput::Form(form) => RewardFields {
                name: Some(form.reward_name.clone()),
                price: NumericValue::parse_text(&form.price),
                content: Some(form.reward_content.clone()),
                delivery_date: non_blank(&form.delivery_date).map(DateInput::Text),
                count: NumericValue::parse_text(&form.reward_cnt),
                is_posting: non_blank(&form.is_posting),
            },
            RewardInput::Record(record) => RewardFields {
                name: record.reward_name.clone(),
                price: NumericValue::from_option(record.price),
                content: record.reward_content.clone(),
                delivery_date: record.delivery_date.clone(),
                count: NumericValue::from_option(record.reward_cnt),
                is_posting: record.is_posting.clone(),
            },
            RewardInput::Json(json) => RewardFields {
                name: json_text(json.reward_name.as_ref()).map(Cow::into_owned),
                price: NumericValue::from_json(json.price.as_ref()),
                content: json_text(json.reward_content.as_ref()).map(Cow::into_owned),
                delivery_date: json_date(json.delivery_date.as_ref()),
                count: NumericValue::from_json(json.reward_cnt.as_ref()),
                is_posting: json_text(json.is_posting.as_ref())
                    .and_then(|text| non_blank(&text)),
            },
        }
    }

    /// The raw reward name, if any, used for duplicate grouping.
    pub fn reward_name(&self) -> Option<Cow<'_, str>> {
        match self {
            RewardInput::Form(form) => Some(Cow::Borrowed(form.reward_name.as_str())),
            RewardInput::Record(record) => record.reward_name.as_deref().map(Cow::Borrowed),
            RewardInput::Json(json) => json_text(json.reward_name.as_ref()),
        }
    }
}

/// Whether the reward ships a physical item (`Y`) or is provided otherwise
/// (`N`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Posting {
    #[serde(rename = "Y")]
    Yes,
    #[serde(rename = "N")]
    No,
}

impl Posting {
    /// Case-insensitive parse of `Y` / `N`; anything else is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "Y" => Some(Posting::Yes),
            "N" => Some(Posting::No),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Posting::Yes => "Y",
            Posting::No => "N",
        }
    }
}

/// A validated reward with trimmed and parsed values, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardDraft {
    pub reward_name: String,
    pub price: i64,
    pub reward_content: String,
    pub delivery_date: NaiveDate,
    pub reward_cnt: Option<i64>,
    pub is_posting: Posting,
}

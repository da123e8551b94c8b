//! Single-reward rules. Pure logic, never panics, never errors.

use chrono::NaiveDate;

use crate::dates::{format_date, DateInput};
use crate::error::CoreError;

use super::input::{NumericValue, Posting, RewardDraft, RewardFields, RewardInput};
use super::result::{RewardField, RewardFieldErrors, RewardValidation};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub const NAME_MAX_CHARS: usize = 255;
pub const CONTENT_MAX_CHARS: usize = 255;
pub const PRICE_MIN: i64 = 1_000;
pub const PRICE_MAX: i64 = 30_000_000;

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

pub const MSG_NAME_REQUIRED: &str = "리워드명을 입력해주세요.";
pub const MSG_NAME_TOO_LONG: &str = "리워드명은 255자 이하로 입력해주세요.";
pub const MSG_PRICE_REQUIRED: &str = "가격을 숫자로 입력해주세요.";
pub const MSG_PRICE_TOO_LOW: &str = "가격은 1,000원 이상이어야 합니다.";
pub const MSG_PRICE_TOO_HIGH: &str = "가격은 30,000,000원 이하여야 합니다.";
pub const MSG_CONTENT_REQUIRED: &str = "리워드 내용을 입력해주세요.";
pub const MSG_CONTENT_TOO_LONG: &str = "리워드 내용은 255자 이하로 입력해주세요.";
pub const MSG_POSTING_INVALID: &str = "배송 여부는 Y 또는 N 중 하나여야 합니다.";
pub const MSG_FUNDING_END_MISSING: &str = "펀딩 종료일을 먼저 설정해주세요.";
pub const MSG_COUNT_NEGATIVE: &str = "수량은 0 이상이어야 합니다.";
pub const MSG_COUNT_INVALID: &str = "수량은 정수로 입력해주세요.";

/// Date label for shipped rewards.
pub const LABEL_DELIVERY: &str = "배송 예정일";
/// Date label for rewards provided without shipping.
pub const LABEL_PROVISION: &str = "제공 예정일";

/// Context a reward is validated against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewardContext {
    /// Last day the project accepts backing.
    pub funding_end_date: Option<DateInput>,
}

impl RewardContext {
    pub fn with_funding_end(date: impl Into<DateInput>) -> Self {
        Self {
            funding_end_date: Some(date.into()),
        }
    }
}

/// Validate a single reward.
///
/// Never fails: every rule violation is reported in the returned
/// [`RewardValidation`]. `normalized` is populated only when `ok` is true.
pub fn validate_reward(input: &RewardInput, ctx: &RewardContext) -> RewardValidation {
    validate_fields(&input.to_fields(), ctx)
}

/// Validate a reward already folded into [`RewardFields`].
pub fn validate_fields(fields: &RewardFields, ctx: &RewardContext) -> RewardValidation {
    let name = check_text(
        fields.name.as_deref(),
        NAME_MAX_CHARS,
        MSG_NAME_REQUIRED,
        MSG_NAME_TOO_LONG,
    );
    let price = check_price(fields.price);
    let content = check_text(
        fields.content.as_deref(),
        CONTENT_MAX_CHARS,
        MSG_CONTENT_REQUIRED,
        MSG_CONTENT_TOO_LONG,
    );
    let posting = fields
        .is_posting
        .as_deref()
        .and_then(Posting::parse)
        .ok_or_else(|| MSG_POSTING_INVALID.to_string());
    let delivery_date = check_delivery_date(
        fields.delivery_date.as_ref(),
        ctx.funding_end_date.as_ref(),
        date_label(posting.as_ref().ok().copied()),
    );
    let count = check_count(fields.count);

    let mut errors = RewardFieldErrors::default();
    record(&mut errors, RewardField::RewardName, &name);
    record(&mut errors, RewardField::Price, &price);
    record(&mut errors, RewardField::RewardContent, &content);
    record(&mut errors, RewardField::IsPosting, &posting);
    record(&mut errors, RewardField::DeliveryDate, &delivery_date);
    record(&mut errors, RewardField::RewardCnt, &count);

    let all_errors: Vec<String> = errors.messages().map(str::to_string).collect();

    let normalized = match (name, price, content, posting, delivery_date, count) {
        (
            Ok(reward_name),
            Ok(price),
            Ok(reward_content),
            Ok(is_posting),
            Ok(delivery_date),
            Ok(reward_cnt),
        ) => Some(RewardDraft {
            reward_name,
            price,
            reward_content,
            delivery_date,
            reward_cnt,
            is_posting,
        }),
        _ => None,
    };

    RewardValidation {
        ok: all_errors.is_empty(),
        errors,
        all_errors,
        normalized,
    }
}

/// Validate a reward and return its normalized draft, or fail with every
/// violation joined by newlines.
pub fn assert_valid_reward(
    input: &RewardInput,
    ctx: &RewardContext,
) -> Result<RewardDraft, CoreError> {
    let result = validate_reward(input, ctx);
    match result.normalized {
        Some(draft) if result.ok => Ok(draft),
        _ => {
            tracing::debug!(violations = result.all_errors.len(), "Reward rejected");
            Err(CoreError::Validation(result.all_errors.join("\n")))
        }
    }
}

/// Label used in date messages, chosen by the shipping flag.
pub fn date_label(posting: Option<Posting>) -> &'static str {
    match posting {
        Some(Posting::No) => LABEL_PROVISION,
        _ => LABEL_DELIVERY,
    }
}

fn record<T>(errors: &mut RewardFieldErrors, field: RewardField, outcome: &Result<T, String>) {
    if let Err(message) = outcome {
        errors.set(field, message.as_str());
    }
}

fn check_text(
    value: Option<&str>,
    max_chars: usize,
    required: &str,
    too_long: &str,
) -> Result<String, String> {
    let trimmed = value.map(str::trim).unwrap_or_default();
    match trimmed.chars().count() {
        0 => Err(required.to_string()),
        n if n > max_chars => Err(too_long.to_string()),
        _ => Ok(trimmed.to_string()),
    }
}

fn check_price(price: NumericValue) -> Result<i64, String> {
    match price {
        NumericValue::Missing | NumericValue::Invalid => Err(MSG_PRICE_REQUIRED.to_string()),
        NumericValue::Value(p) if p < PRICE_MIN => Err(MSG_PRICE_TOO_LOW.to_string()),
        NumericValue::Value(p) if p > PRICE_MAX => Err(MSG_PRICE_TOO_HIGH.to_string()),
        NumericValue::Value(p) => Ok(p),
    }
}

fn check_count(count: NumericValue) -> Result<Option<i64>, String> {
    match count {
        NumericValue::Missing => Ok(None),
        NumericValue::Invalid => Err(MSG_COUNT_INVALID.to_string()),
        NumericValue::Value(n) if n < 0 => Err(MSG_COUNT_NEGATIVE.to_string()),
        NumericValue::Value(n) => Ok(Some(n)),
    }
}

fn check_delivery_date(
    delivery: Option<&DateInput>,
    funding_end: Option<&DateInput>,
    label: &str,
) -> Result<NaiveDate, String> {
    let delivery = delivery.ok_or_else(|| format!("{label}을 입력해주세요."))?;
    let delivery = delivery
        .to_local_date()
        .ok_or_else(|| format!("{label} 형식이 올바르지 않습니다."))?;
    let funding_end = funding_end
        .and_then(DateInput::to_local_date)
        .ok_or_else(|| MSG_FUNDING_END_MISSING.to_string())?;

    if delivery > funding_end {
        Ok(delivery)
    } else {
        Err(format!(
            "{label}은 펀딩 종료일({}) 이후여야 합니다.",
            format_date(funding_end)
        ))
    }
}

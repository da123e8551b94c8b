//! Reward list validation with duplicate-name detection.

use indexmap::IndexMap;

use crate::error::CoreError;

use super::input::{RewardDraft, RewardInput};
use super::result::{RewardField, RewardFieldErrors, RewardListValidation};
use super::validator::{validate_reward, RewardContext};

pub const MSG_DUPLICATE_NAME: &str = "중복된 리워드명이 있습니다.";

/// Normalize a reward name into its duplicate-detection key: trimmed,
/// internal whitespace collapsed to one space, lowercased.
///
/// # Examples
///
/// ```
/// use fundhub_core::reward::normalize_name_key;
///
/// assert_eq!(normalize_name_key(" Cool  Thing "), "cool thing");
/// assert_eq!(normalize_name_key("cool\tthing"), "cool thing");
/// ```
pub fn normalize_name_key(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Validate every reward in `inputs` and check names for duplicates.
///
/// Item messages are prefixed with the 1-based position (`"#2: ..."`). Every
/// duplicate group is reported once in `duplicates` and `all_errors`, and each
/// member's `rewardName` error is replaced with the duplicate message.
pub fn validate_reward_list(
    inputs: &[RewardInput],
    ctx: &RewardContext,
) -> RewardListValidation {
    validate_with_drafts(inputs, ctx).0
}

/// Validate a list and return every normalized draft, or fail with all list
/// messages joined by newlines.
pub fn assert_valid_reward_list(
    inputs: &[RewardInput],
    ctx: &RewardContext,
) -> Result<Vec<RewardDraft>, CoreError> {
    let (result, drafts) = validate_with_drafts(inputs, ctx);
    if !result.ok {
        tracing::debug!(
            rewards = inputs.len(),
            violations = result.all_errors.len(),
            duplicates = result.duplicates.len(),
            "Reward list rejected"
        );
        return Err(CoreError::Validation(result.all_errors.join("\n")));
    }
    // Every item passed, so every draft is present.
    Ok(drafts.into_iter().flatten().collect())
}

fn validate_with_drafts(
    inputs: &[RewardInput],
    ctx: &RewardContext,
) -> (RewardListValidation, Vec<Option<RewardDraft>>) {
    let mut field_errors_list: Vec<RewardFieldErrors> = Vec::with_capacity(inputs.len());
    let mut drafts = Vec::with_capacity(inputs.len());
    let mut all_errors = Vec::new();
    let mut item_failed = false;

    for (idx, input) in inputs.iter().enumerate() {
        let result = validate_reward(input, ctx);
        if !result.ok {
            item_failed = true;
            all_errors.extend(
                result
                    .all_errors
                    .iter()
                    .map(|message| format!("#{}: {message}", idx + 1)),
            );
        }
        field_errors_list.push(result.errors);
        drafts.push(result.normalized);
    }

    let mut duplicates = Vec::new();
    for (key, members) in group_by_name(inputs) {
        if members.len() < 2 {
            continue;
        }
        all_errors.push(MSG_DUPLICATE_NAME.to_string());
        for idx in members {
            field_errors_list[idx].set(RewardField::RewardName, MSG_DUPLICATE_NAME);
        }
        duplicates.push(key);
    }

    let result = RewardListValidation {
        ok: !item_failed && duplicates.is_empty(),
        field_errors_list,
        all_errors,
        duplicates,
    };
    (result, drafts)
}

/// Group item indices by normalized name, in first-seen order. Missing and
/// blank names share the empty key.
fn group_by_name(inputs: &[RewardInput]) -> IndexMap<String, Vec<usize>> {
    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (idx, input) in inputs.iter().enumerate() {
        let key = normalize_name_key(input.reward_name().as_deref().unwrap_or_default());
        groups.entry(key).or_default().push(idx);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reward::input::RewardForm;
    use crate::reward::validator::{MSG_NAME_TOO_LONG, MSG_PRICE_TOO_LOW};
    use assert_matches::assert_matches;

    fn ctx() -> RewardContext {
        RewardContext::with_funding_end("2025-06-30")
    }

    fn reward(name: &str) -> RewardInput {
        RewardInput::Form(RewardForm {
            reward_name: name.into(),
            price: "20000".into(),
            reward_content: "Limited edition print".into(),
            delivery_date: "2025-08-01".into(),
            reward_cnt: "".into(),
            is_posting: "Y".into(),
        })
    }

    #[test]
    fn valid_distinct_list_passes() {
        let result = validate_reward_list(&[reward("Basic"), reward("Deluxe")], &ctx());
        assert!(result.ok);
        assert!(result.all_errors.is_empty());
        assert!(result.duplicates.is_empty());
        assert_eq!(result.field_errors_list.len(), 2);
        assert!(result.field_errors_list.iter().all(RewardFieldErrors::is_empty));
    }

    #[test]
    fn duplicate_names_ignore_case_and_spacing() {
        let result =
            validate_reward_list(&[reward(" Cool  Thing "), reward("cool thing")], &ctx());
        assert!(!result.ok);
        assert_eq!(result.duplicates, vec!["cool thing".to_string()]);
        for errors in &result.field_errors_list {
            assert_eq!(errors.get(RewardField::RewardName), Some(MSG_DUPLICATE_NAME));
        }
        assert_eq!(result.all_errors.len(), 1);
    }

    #[test]
    fn duplicate_group_reported_once() {
        let inputs = [reward("A"), reward("a"), reward("B"), reward(" A ")];
        let result = validate_reward_list(&inputs, &ctx());
        assert_eq!(result.duplicates, vec!["a".to_string()]);
        assert!(result.field_errors_list[2].is_empty());
        assert!(result.field_errors_list[3].contains(RewardField::RewardName));
    }

    #[test]
    fn item_errors_are_prefixed_with_position() {
        let mut bad = reward("Cheap");
        if let RewardInput::Form(form) = &mut bad {
            form.price = "10".into();
        }
        let result = validate_reward_list(&[reward("Fine"), bad], &ctx());
        assert!(!result.ok);
        assert_eq!(result.all_errors, vec![format!("#2: {MSG_PRICE_TOO_LOW}")]);
        assert!(result.field_errors_list[0].is_empty());
        assert!(result.field_errors_list[1].contains(RewardField::Price));
    }

    #[test]
    fn duplicate_message_overwrites_name_error() {
        let long = "x".repeat(300);
        let result = validate_reward_list(&[reward(&long), reward(&long.to_uppercase())], &ctx());
        assert!(result.all_errors.iter().any(|m| m.ends_with(MSG_NAME_TOO_LONG)));
        assert_eq!(
            result.field_errors_list[0].get(RewardField::RewardName),
            Some(MSG_DUPLICATE_NAME)
        );
    }

    #[test]
    fn blank_names_form_one_duplicate_group() {
        let result = validate_reward_list(&[reward(""), reward("  "), reward("Named")], &ctx());
        assert!(!result.ok);
        assert_eq!(result.duplicates, vec![String::new()]);
        for errors in &result.field_errors_list[..2] {
            assert_eq!(errors.get(RewardField::RewardName), Some(MSG_DUPLICATE_NAME));
        }
        assert!(result.field_errors_list[2].is_empty());
    }

    #[test]
    fn duplicate_message_is_generic() {
        let result = validate_reward_list(&[reward("Cool Thing"), reward("cool  thing")], &ctx());
        assert_eq!(result.all_errors, vec![MSG_DUPLICATE_NAME.to_string()]);
        assert_eq!(result.duplicates, vec!["cool thing".to_string()]);
    }

    #[test]
    fn empty_list_is_ok() {
        let result = validate_reward_list(&[], &ctx());
        assert!(result.ok);
        assert!(result.field_errors_list.is_empty());
    }

    #[test]
    fn assert_list_returns_drafts_in_order() {
        let drafts = assert_valid_reward_list(&[reward("One"), reward("Two")], &ctx()).unwrap();
        let names: Vec<&str> = drafts.iter().map(|d| d.reward_name.as_str()).collect();
        assert_eq!(names, vec!["One", "Two"]);
    }

    #[test]
    fn assert_list_rejects_duplicates() {
        let err = assert_valid_reward_list(&[reward("One"), reward("one")], &ctx()).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains(MSG_DUPLICATE_NAME));
    }
}

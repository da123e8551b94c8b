//! End-to-end checks of the reward validation engine through the public API.

use assert_matches::assert_matches;
use chrono::NaiveDate;

use fundhub_core::dates::DateInput;
use fundhub_core::error::CoreError;
use fundhub_core::reward::validator::{MSG_POSTING_INVALID, MSG_PRICE_REQUIRED};
use fundhub_core::reward::{
    assert_valid_reward, validate_reward, validate_reward_list, Posting, RewardContext,
    RewardField, RewardForm, RewardInput, RewardRecord, MSG_DUPLICATE_NAME,
};

fn funding_end() -> RewardContext {
    RewardContext::with_funding_end(NaiveDate::from_ymd_opt(2025, 9, 30).unwrap())
}

fn record(name: &str, price: i64, delivery: DateInput) -> RewardInput {
    RewardInput::Record(RewardRecord {
        reward_id: None,
        reward_name: Some(name.to_string()),
        price: Some(price),
        reward_content: Some("Hand-bound notebook".to_string()),
        delivery_date: Some(delivery),
        reward_cnt: None,
        is_posting: Some("N".to_string()),
    })
}

fn oct(day: u32) -> DateInput {
    DateInput::Date(NaiveDate::from_ymd_opt(2025, 10, day).unwrap())
}

// ---------------------------------------------------------------------------
// Price bounds
// ---------------------------------------------------------------------------

#[test]
fn out_of_range_prices_fail_on_price() {
    for price in [0, 999, 30_000_001, -1, i64::MAX] {
        let result = validate_reward(&record("Notebook", price, oct(1)), &funding_end());
        assert!(!result.ok, "price {price} should be rejected");
        assert!(result.errors.contains(RewardField::Price));
    }
}

#[test]
fn missing_price_on_record_fails() {
    let mut input = record("Notebook", 5_000, oct(1));
    if let RewardInput::Record(r) = &mut input {
        r.price = None;
    }
    let result = validate_reward(&input, &funding_end());
    assert!(result.errors.contains(RewardField::Price));
}

// ---------------------------------------------------------------------------
// Delivery date against funding end
// ---------------------------------------------------------------------------

#[test]
fn same_day_as_funding_end_fails() {
    let same_day = DateInput::Text("2025-09-30".into());
    let result = validate_reward(&record("Notebook", 5_000, same_day), &funding_end());
    assert!(!result.ok);
    assert!(result.errors.contains(RewardField::DeliveryDate));
}

#[test]
fn one_day_after_funding_end_passes() {
    let result = validate_reward(&record("Notebook", 5_000, oct(1)), &funding_end());
    assert!(result.ok, "{:?}", result.all_errors);
    let draft = result.normalized.unwrap();
    assert_eq!(draft.is_posting, Posting::No);
    assert_eq!(draft.reward_cnt, None);
}

#[test]
fn datetime_inputs_compare_by_date_only() {
    let late_evening = NaiveDate::from_ymd_opt(2025, 9, 30)
        .unwrap()
        .and_hms_opt(23, 59, 0)
        .unwrap();
    let result = validate_reward(
        &record("Notebook", 5_000, DateInput::DateTime(late_evening)),
        &funding_end(),
    );
    assert!(result.errors.contains(RewardField::DeliveryDate));
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

#[test]
fn spaced_and_cased_names_are_one_duplicate() {
    let rewards = [
        RewardInput::Form(RewardForm {
            reward_name: " Cool  Thing ".into(),
            price: "10000".into(),
            reward_content: "A thing".into(),
            delivery_date: "2025-10-10".into(),
            reward_cnt: "5".into(),
            is_posting: "Y".into(),
        }),
        record("cool thing", 12_000, oct(2)),
    ];
    let result = validate_reward_list(&rewards, &funding_end());

    assert!(!result.ok);
    assert_eq!(result.duplicates.len(), 1);
    assert_eq!(result.duplicates[0], "cool thing");
    for errors in &result.field_errors_list {
        assert_eq!(errors.get(RewardField::RewardName), Some(MSG_DUPLICATE_NAME));
    }
}

#[test]
fn list_result_serializes_with_wire_names() {
    let rewards = [record("A", 10, oct(1))];
    let json = serde_json::to_value(validate_reward_list(&rewards, &funding_end())).unwrap();
    assert_eq!(json["ok"], false);
    assert!(json["fieldErrorsList"][0]["price"].is_string());
    assert_eq!(json["allErrors"][0].as_str().unwrap().get(..4), Some("#1: "));
    assert!(json["duplicates"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// JSON input
// ---------------------------------------------------------------------------

#[test]
fn mixed_json_shapes_reach_the_rules() {
    let rewards: Vec<RewardInput> = serde_json::from_str(
        r#"[
            {"rewardName": "Typed", "price": "15000", "rewardContent": "Notebook",
             "deliveryDate": "2025-10-01", "rewardCnt": null, "isPosting": "Y"},
            {"rewardName": "Broken", "price": "abc", "rewardContent": "Notebook",
             "deliveryDate": "2025-10-01", "isPosting": null},
            {"rewardName": "Float", "price": 15000.0, "rewardContent": "Notebook",
             "deliveryDate": "2025-10-01", "rewardCnt": 3, "isPosting": "n"}
        ]"#,
    )
    .unwrap();
    let result = validate_reward_list(&rewards, &funding_end());

    assert!(!result.ok);
    assert!(result.field_errors_list[0].is_empty());
    assert!(result.field_errors_list[2].is_empty());

    let broken = &result.field_errors_list[1];
    assert_eq!(broken.get(RewardField::Price), Some(MSG_PRICE_REQUIRED));
    assert_eq!(broken.get(RewardField::IsPosting), Some(MSG_POSTING_INVALID));
    assert!(result.all_errors.iter().all(|m| m.starts_with("#2: ")));
}

#[test]
fn json_single_reward_normalizes() {
    let input: RewardInput = serde_json::from_str(
        r#"{"rewardName": " Notebook ", "price": "12,000", "rewardContent": "A5",
            "deliveryDate": "2025-10-01", "rewardCnt": null, "isPosting": "y"}"#,
    )
    .unwrap();
    let draft = assert_valid_reward(&input, &funding_end()).unwrap();
    assert_eq!(draft.reward_name, "Notebook");
    assert_eq!(draft.price, 12_000);
    assert_eq!(draft.reward_cnt, None);
    assert_eq!(draft.is_posting, Posting::Yes);
}

// ---------------------------------------------------------------------------
// Fail-fast wrapper
// ---------------------------------------------------------------------------

#[test]
fn assert_valid_reward_behaviour() {
    let invalid = record("", 10, oct(1));
    assert_matches!(
        assert_valid_reward(&invalid, &funding_end()),
        Err(CoreError::Validation(msg)) if !msg.is_empty() && msg.contains('\n')
    );

    let draft = assert_valid_reward(&record("Notebook", 5_000, oct(1)), &funding_end()).unwrap();
    assert_eq!(draft.reward_name, "Notebook");
    assert_eq!(draft.price, 5_000);
}

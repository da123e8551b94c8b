//! Reward validation engine.
//!
//! Validates rewards one at a time or as a list (with duplicate-name
//! detection), producing per-field messages instead of failing. The
//! `assert_*` variants are for call sites that want a `Result`.

pub mod input;
pub mod list;
pub mod result;
pub mod validator;

pub use input::{
    NumericValue, Posting, RewardDraft, RewardFields, RewardForm, RewardInput, RewardJson,
    RewardRecord,
};
pub use list::{
    assert_valid_reward_list, normalize_name_key, validate_reward_list, MSG_DUPLICATE_NAME,
};
pub use result::{RewardField, RewardFieldErrors, RewardListValidation, RewardValidation};
pub use validator::{assert_valid_reward, validate_fields, validate_reward, RewardContext};

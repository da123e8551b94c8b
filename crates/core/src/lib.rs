//! Domain logic for the fundhub crowdfunding client.
//!
//! Pure, synchronous building blocks shared by the REST client and any UI
//! layer: reward validation, URL-backed query state, page-block math and the
//! navigation capability they write through.

pub mod dates;
pub mod error;
pub mod navigation;
pub mod pagination;
pub mod query_state;
pub mod reward;
pub mod types;

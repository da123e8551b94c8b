//! REST client, client-side stores and the notification stream listener for
//! the fundhub crowdfunding marketplace.

pub mod api;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod notifications;
pub mod response;
pub mod session;

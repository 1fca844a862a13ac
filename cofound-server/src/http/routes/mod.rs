//! Route handlers organized by resource

pub mod admin;
pub mod auth;
pub mod cards;
pub mod companies;
pub mod favorites;
pub mod health;
pub mod posts;
pub mod subscriptions;
pub mod users;

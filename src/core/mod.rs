//! Core business logic - framework-agnostic ordering operations.
//!
//! Everything here works against a plain database connection and returns
//! typed results; no HTTP types leak in. Callers resolve a principal once
//! and pass it down, so each function states its own authorization.

/// Cart reads and mutations for customers
pub mod cart;
/// Staff group rosters and grants
pub mod groups;
/// Ordering specs and page windows shared by listings
pub mod listing;
/// Menu browsing and manager-side menu curation
pub mod menu;
/// Role-scoped order listings
pub mod order_query;
/// Checkout and the order delivery lifecycle
pub mod orders;
/// Pure permission predicates over roles
pub mod policy;
/// Principal resolution and role precedence
pub mod roles;

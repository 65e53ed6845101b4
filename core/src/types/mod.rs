//! Domain DTOs and view models for the facility API.
//!
//! # Design
//! DTOs mirror the backend's JSON schema field for field. View models
//! (`Customer`, `Game`, `Discount`, `CollectionItem`, `ScheduledEvent`) are
//! what the dashboard renders; `services` produces them from DTOs. The
//! mock-server crate keeps its own copies of the wire types and the
//! integration tests catch schema drift.

pub mod auth;
pub mod checkout;
pub mod collections;
pub mod courts;
pub mod credit_packages;
pub mod customers;
pub mod discounts;
pub mod events;
pub mod games;
pub mod locations;
pub mod memberships;
pub mod staff;
pub mod teams;

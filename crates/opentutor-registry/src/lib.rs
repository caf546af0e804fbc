//! # opentutor-registry
//!
//! **Identity plane**: role-tagged user profiles. Every other component
//! queries the registry for authorization — the market gates course
//! creation on the Instructor role, purchases and reviews on the Student
//! role, and the escrow gates offers on registration.
//!
//! Profiles are written exactly once. There is no update or delete: the
//! role chosen at registration is immutable for the account's lifetime,
//! which is what lets the other planes treat a profile read as a stable
//! authorization fact rather than a mutable trust assumption.

pub mod registry;

pub use registry::IdentityRegistry;

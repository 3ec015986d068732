//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on protocol translation and auth plumbing.

pub mod account;
pub mod catalog;
pub mod lead;
pub mod media;
pub mod session;
pub mod settings;
pub mod storage;

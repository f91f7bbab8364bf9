//! Core types for Lavka.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod enums;
pub mod id;
pub mod slug;

pub use email::{Email, EmailError};
pub use enums::{Currency, OrderStatus, Role, Unit};
pub use id::*;
pub use slug::{Slug, SlugError};

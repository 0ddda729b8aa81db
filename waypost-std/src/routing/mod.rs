//! # Route Tables
//!
//! This module provides the default [`RouteTable`] implementation:
//!
//! - [`Pattern`]: compiled path templates with `{param}` and `{*catch_all}` placeholders.
//! - [`PatternTable`]: a linear table choosing the most specific match.
//!
//! [`RouteTable`]: waypost_core::RouteTable

pub mod pattern;
pub mod table;

pub use pattern::Pattern;
pub use table::PatternTable;

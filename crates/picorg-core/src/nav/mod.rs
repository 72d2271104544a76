//! Navigation logic for picorg.
//!
//! This module contains the navigation [`history::History`], listing
//! [`filter`]ing/sorting, and the [`navigator::Navigator`] composition
//! root that ties history, scanning and the organization cache together.

pub mod filter;
pub mod history;
pub mod navigator;

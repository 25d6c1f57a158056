//! Age and birthday calculator.
//!
//! [`age`] is the pure core: it takes a validated birth date and an explicit
//! reference instant and returns an [`age::AgeBreakdown`]. [`input`] collects
//! the birth date (CLI argument or interactive prompt) and [`render`] turns
//! the breakdown into terminal output, including the live countdown.

pub mod age;
pub mod input;
pub mod render;

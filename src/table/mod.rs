//! # Trial Table Module
//!
//! Loads one trial's motion-capture export: a delimited text table whose
//! first three rows label every column with a (signal group, axis, unit)
//! triple, followed by one row per captured time sample.
//!
//! ```text
//! ,RPelvisAngles,,,RElbowMoment
//! Frame,X',Y',Z',X
//! ,deg/s,deg/s,deg/s,N.mm/kg
//! 1,10.2,3.1,-44.0,120.5
//! 2,11.0,3.3,-47.9,131.0
//! ```
//!
//! Blank group cells inherit the group to their left, matching the merged
//! cells of the original spreadsheet.

mod column;
mod error;
mod reader;


pub use column::ColumnKey;
pub use error::TableError;
pub use reader::{delimiter_for, RawTrialTable, HEADER_ROWS};

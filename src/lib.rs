//! Small cli that checks whether a list of LeetCode users got an accepted submission today and
//! reports the result on the console and as a desktop notification.
//!

pub mod checker;
pub mod cli;
pub mod notify;
pub mod report;
pub mod roster;
pub mod utils;

//! Integration suites for the Ferry routing stack.

mod availability;
mod end_to_end;

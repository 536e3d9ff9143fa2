//! Foundation utilities shared by every shell module

pub mod logging;
pub mod math;
pub mod time;

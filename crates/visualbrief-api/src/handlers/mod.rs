pub mod analyze;
pub mod brief;
pub mod session;

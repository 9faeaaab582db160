pub mod application;
pub mod job;

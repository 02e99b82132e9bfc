pub mod job;
pub mod seen_job;

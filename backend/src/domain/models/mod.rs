pub mod binding;
pub mod patient;
pub mod schedule;
pub mod specialist;

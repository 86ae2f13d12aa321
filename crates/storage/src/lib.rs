#![forbid(unsafe_code)]

pub mod json;
pub mod record;
pub mod repository;

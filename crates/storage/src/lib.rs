#![forbid(unsafe_code)]

pub mod fixtures;
pub mod repository;
pub mod sqlite;

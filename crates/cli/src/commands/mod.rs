//! CLI Commands

pub mod data;
pub mod plan;

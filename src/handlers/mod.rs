// src/handlers/mod.rs

pub mod access;
pub mod admin;
pub mod quiz;
pub mod results;

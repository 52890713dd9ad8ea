// src/models/mod.rs

pub mod evaluation;
pub mod participant;
pub mod question;

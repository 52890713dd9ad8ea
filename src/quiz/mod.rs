// src/quiz/mod.rs

pub mod attempt;
pub mod bank;
pub mod scorer;
pub mod selector;

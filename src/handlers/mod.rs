// src/handlers/mod.rs
pub mod prices;
pub mod upstream;

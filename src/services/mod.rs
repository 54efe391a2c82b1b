// src/services/mod.rs
pub mod bls;
pub mod catalog;
pub mod history;
pub mod nass;
pub mod prices;
pub mod reconcile;

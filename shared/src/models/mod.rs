//! Domain Models

pub mod account;
pub mod application;
pub mod clinic;
pub mod doctor;
pub mod menu;
pub mod role;

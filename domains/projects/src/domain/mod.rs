//! Domain layer for the Projects domain

pub mod entities;
pub mod lifecycle;

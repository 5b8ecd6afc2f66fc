//! Domain logic

pub mod communication;
pub mod licenses;

//! NEO Impact - near-Earth object impact viewer
//!
//! A library crate providing the orbit, impact-energy and animation
//! components of the viewer for testing and integration purposes.

pub mod animator;
pub mod body;
pub mod camera;
pub mod catalog;
pub mod config;
pub mod impact;
pub mod input;
pub mod neo;
pub mod orbit;
pub mod render;
pub mod simulation;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;

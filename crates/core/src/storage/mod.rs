//! JSON file storage for sessions, challenges and progression

mod models;
mod store;

pub use models::*;
pub use store::{JsonStore, Loaded, CHALLENGES_FILE, PROGRESSION_FILE};

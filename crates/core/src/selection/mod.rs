//! Two-click move selection
//!
//! A click on one of your pieces picks it up, a click on a legal destination
//! completes the move. Rejected clicks leave the selection as it was.

mod session;
mod state;

pub use session::BoardSession;
pub use state::{ClickOutcome, Selection, SelectionError};

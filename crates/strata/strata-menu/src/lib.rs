//! Operator menu for exercising a [`strata_buffer::PriorityBuffer`] by hand.
//!
//! The menu is a finite-state machine with a pure transition function
//! ([`Session::step`]). Executing the resulting [`Command`] and printing is
//! left to the caller, see `bins/strata`.

mod input;
pub mod render;
mod session;

pub use input::{Action, Input};
pub use session::{Command, MenuState, Outcome, Session, execute};

use strata_buffer::{BufferError, Priority, PriorityBuffer};
use tracing::{debug, trace};

use crate::input::{Action, Input};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuState {
    /// Transient: clears the buffer once at start-up.
    Init,
    EnterAction,
    EnterPriority,
    EnterValue,
    /// Transient: issues one retrieval.
    RetrieveValue,
    /// Transient: issues one reset.
    Reset,
    Exit,
}

impl MenuState {
    /// Transient states advance without consuming a line.
    pub fn awaits_input(self) -> bool {
        matches!(
            self,
            MenuState::EnterAction | MenuState::EnterPriority | MenuState::EnterValue
        )
    }
}

/// A single engine operation requested by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Insert(Priority, u8),
    Retrieve,
    Reset,
}

/// Result of running a [`Command`] against the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Inserted {
        priority: Priority,
        value: u8,
        evicted: Option<(Priority, u8)>,
    },
    Retrieved(Priority, u8),
    Cleared,
    Failed(BufferError),
}

/// Menu position plus the operator's sticky priority selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    state: MenuState,
    priority: Priority,
    /// Set while EnterPriority belongs to an insert rather than a plain
    /// selection.
    inserting: bool,
}

impl Session {
    pub fn new(start_priority: Priority) -> Self {
        Self {
            state: MenuState::Init,
            priority: start_priority,
            inserting: false,
        }
    }

    #[inline]
    pub fn state(&self) -> MenuState {
        self.state
    }

    #[inline]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    #[inline]
    pub fn awaits_input(&self) -> bool {
        self.state.awaits_input()
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        self.state == MenuState::Exit
    }

    /// Advances the menu by one transition.
    ///
    /// Transient states ignore `input`. Input a state cannot use leaves the
    /// session unchanged so the caller re-prompts. `quit` is accepted from
    /// every state that reads input. At most one command is produced.
    pub fn step(self, input: Input) -> (Session, Option<Command>) {
        let (next, command) = self.transition(input);
        if command.is_none() && next == self && self.awaits_input() {
            debug!(state = ?self.state, ?input, "input ignored");
        } else {
            trace!(from = ?self.state, to = ?next.state, ?command, "menu step");
        }
        (next, command)
    }

    fn transition(self, input: Input) -> (Session, Option<Command>) {
        match self.state {
            MenuState::Init => (self.goto(MenuState::EnterAction), Some(Command::Reset)),
            MenuState::RetrieveValue => {
                (self.goto(MenuState::EnterAction), Some(Command::Retrieve))
            }
            MenuState::Reset => (self.goto(MenuState::EnterAction), Some(Command::Reset)),
            MenuState::Exit => (self, None),

            _ if input == Input::Action(Action::Quit) => (self.goto(MenuState::Exit), None),

            MenuState::EnterAction => match input {
                Input::Action(Action::Insert) => (
                    Session {
                        state: MenuState::EnterPriority,
                        inserting: true,
                        ..self
                    },
                    None,
                ),
                Input::Action(Action::SelectPriority) => (
                    Session {
                        state: MenuState::EnterPriority,
                        inserting: false,
                        ..self
                    },
                    None,
                ),
                Input::Action(Action::Retrieve) => (self.goto(MenuState::RetrieveValue), None),
                Input::Action(Action::Reset) => (self.goto(MenuState::Reset), None),
                Input::Number(n) => match u8::try_from(n) {
                    Ok(value) => (self, Some(Command::Insert(self.priority, value))),
                    Err(_) => (self, None),
                },
                _ => (self, None),
            },

            MenuState::EnterPriority => {
                let chosen = match input {
                    Input::Priority(p) => Some(p),
                    Input::Number(n) => u8::try_from(n)
                        .ok()
                        .and_then(|level| Priority::try_from(level).ok()),
                    _ => None,
                };
                match chosen {
                    Some(priority) => {
                        let state = if self.inserting {
                            MenuState::EnterValue
                        } else {
                            MenuState::EnterAction
                        };
                        (
                            Session {
                                state,
                                priority,
                                ..self
                            },
                            None,
                        )
                    }
                    None => (self, None),
                }
            }

            MenuState::EnterValue => match input {
                Input::Number(n) => match u8::try_from(n) {
                    Ok(value) => (
                        Session {
                            state: MenuState::EnterAction,
                            inserting: false,
                            ..self
                        },
                        Some(Command::Insert(self.priority, value)),
                    ),
                    Err(_) => (self, None),
                },
                _ => (self, None),
            },
        }
    }

    fn goto(self, state: MenuState) -> Session {
        Session { state, ..self }
    }
}

/// Runs one command against the buffer. Engine failures become
/// [`Outcome::Failed`]; they are operator feedback, not errors.
pub fn execute<const CAP: usize>(command: Command, buf: &mut PriorityBuffer<u8, CAP>) -> Outcome {
    match command {
        Command::Insert(priority, value) => match buf.insert(priority, value) {
            Ok(evicted) => Outcome::Inserted {
                priority,
                value,
                evicted,
            },
            Err(e) => Outcome::Failed(e),
        },
        Command::Retrieve => match buf.retrieve() {
            Ok((priority, value)) => Outcome::Retrieved(priority, value),
            Err(e) => Outcome::Failed(e),
        },
        Command::Reset => {
            buf.reset();
            Outcome::Cleared
        }
    }
}

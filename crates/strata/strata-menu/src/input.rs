use strata_buffer::Priority;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Insert,
    /// Change the selected priority without inserting.
    SelectPriority,
    Retrieve,
    Reset,
    Quit,
}

/// One line of operator input, classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Action(Action),
    Priority(Priority),
    Number(u64),
    Blank,
    Invalid,
}

impl Input {
    /// Classifies a line. Matching is case-insensitive; surrounding
    /// whitespace is ignored.
    ///
    /// Digits are always a [`Input::Number`]; whether a number means a level
    /// or a value depends on the menu state.
    pub fn classify(line: &str) -> Input {
        let line = line.trim();
        if line.is_empty() {
            return Input::Blank;
        }
        if line.bytes().all(|b| b.is_ascii_digit()) {
            return line.parse().map(Input::Number).unwrap_or(Input::Invalid);
        }

        let action = match line.to_ascii_lowercase().as_str() {
            "i" | "insert" => Some(Action::Insert),
            "p" | "priority" => Some(Action::SelectPriority),
            "g" | "get" | "retrieve" => Some(Action::Retrieve),
            "r" | "reset" => Some(Action::Reset),
            "q" | "quit" | "exit" => Some(Action::Quit),
            _ => None,
        };
        if let Some(action) = action {
            return Input::Action(action);
        }
        line.parse::<Priority>()
            .map(Input::Priority)
            .unwrap_or(Input::Invalid)
    }
}

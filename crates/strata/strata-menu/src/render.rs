//! Plain text views for the operator terminal.

use std::fmt;

use strata_buffer::{BufferError, Priority, PriorityBuffer};

use crate::session::{MenuState, Outcome, Session};

pub const MENU: &str = "\
  i, insert     insert a value (asks priority, then value)
  p, priority   select the priority used for bare numbers
  <0..=255>     insert the number at the selected priority
  g, get        retrieve the highest-priority oldest value
  r, reset      clear the buffer
  q, quit       exit";

/// Prompt for the state the session is waiting in.
pub struct Prompt<'a>(pub &'a Session);

impl fmt::Display for Prompt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let session = self.0;
        match session.state() {
            MenuState::EnterAction => write!(f, "[{}] action> ", session.priority()),
            MenuState::EnterPriority => f.write_str("priority (low/mid/high or 0-2)> "),
            MenuState::EnterValue => write!(f, "{} value (0-255)> ", session.priority()),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Outcome::Inserted {
                priority,
                value,
                evicted: None,
            } => write!(f, "inserted {value} at {priority}"),
            Outcome::Inserted {
                priority,
                value,
                evicted: Some((old_priority, old_value)),
            } => write!(
                f,
                "inserted {value} at {priority}, evicted {old_value} from {old_priority}"
            ),
            Outcome::Retrieved(priority, value) => write!(f, "retrieved {value} ({priority})"),
            Outcome::Cleared => f.write_str("buffer cleared"),
            Outcome::Failed(BufferError::BufferEmpty) => f.write_str("nothing to retrieve"),
            Outcome::Failed(e) => write!(f, "rejected: {e}"),
        }
    }
}

/// Occupancy line followed by one row per level, highest first.
///
/// ```text
/// 4/4 used
///   HIGH | 4 5
///   MID  | 3
///   LOW  | 2
/// ```
pub struct Contents<'a, const CAP: usize>(pub &'a PriorityBuffer<u8, CAP>);

impl<const CAP: usize> fmt::Display for Contents<'_, CAP> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buf = self.0;
        write!(f, "{}/{} used", buf.len(), buf.capacity())?;
        for priority in Priority::ALL.into_iter().rev() {
            write!(f, "\n  {:<4} |", priority.name())?;
            for (_, value) in buf.iter_level(priority) {
                write!(f, " {value}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Input;

    #[test]
    fn contents_lists_levels_high_first() {
        let mut buf = PriorityBuffer::<u8, 4>::new();
        for (p, v) in [
            (Priority::Low, 1),
            (Priority::Low, 2),
            (Priority::Mid, 3),
            (Priority::High, 4),
            (Priority::High, 5),
        ] {
            buf.insert(p, v).unwrap();
        }
        assert_eq!(
            Contents(&buf).to_string(),
            "4/4 used\n  HIGH | 4 5\n  MID  | 3\n  LOW  | 2"
        );
    }

    #[test]
    fn empty_contents() {
        let buf = PriorityBuffer::<u8, 3>::new();
        assert_eq!(
            Contents(&buf).to_string(),
            "0/3 used\n  HIGH |\n  MID  |\n  LOW  |"
        );
    }

    #[test]
    fn outcome_text() {
        let evicting = Outcome::Inserted {
            priority: Priority::High,
            value: 5,
            evicted: Some((Priority::Low, 1)),
        };
        assert_eq!(evicting.to_string(), "inserted 5 at HIGH, evicted 1 from LOW");
        assert_eq!(
            Outcome::Failed(BufferError::BufferEmpty).to_string(),
            "nothing to retrieve"
        );
        assert!(
            Outcome::Failed(BufferError::BufferFull {
                priority: Priority::Mid
            })
            .to_string()
            .starts_with("rejected: buffer full")
        );
    }

    #[test]
    fn prompts_follow_state() {
        let (s, _) = Session::new(Priority::Mid).step(Input::Blank);
        assert_eq!(Prompt(&s).to_string(), "[MID] action> ");
        let (s, _) = s.step(Input::classify("i"));
        assert!(Prompt(&s).to_string().starts_with("priority"));
        let (s, _) = s.step(Input::classify("2"));
        assert_eq!(Prompt(&s).to_string(), "HIGH value (0-255)> ");
        assert_eq!(Prompt(&Session::new(Priority::Low)).to_string(), "");
    }
}

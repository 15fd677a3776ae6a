use crate::error::BufferError;
use std::fmt;
use std::str::FromStr;

/// Importance of a buffered element. `High` outranks `Mid` outranks `Low`.
///
/// The discriminant doubles as the index into per-level bookkeeping arrays.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
    #[default]
    Low = 0,
    Mid = 1,
    High = 2,
}

impl Priority {
    /// Number of levels. Fixed at compile time.
    pub const COUNT: usize = 3;

    /// Every level, lowest first.
    pub const ALL: [Priority; Self::COUNT] = [Priority::Low, Priority::Mid, Priority::High];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Mid => "MID",
            Priority::High => "HIGH",
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = BufferError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Priority::Low),
            1 => Ok(Priority::Mid),
            2 => Ok(Priority::High),
            other => Err(BufferError::InvalidPriority(other)),
        }
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority as u8
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected a priority (low, mid, high or a level 0..=2)")]
pub struct ParsePriorityError;

/// Accepts level names in any case (`"high"`, `"Mid"`) and bare levels (`"0"`).
impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(level) = s.parse::<u8>() {
            return Priority::try_from(level).map_err(|_| ParsePriorityError);
        }
        Priority::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or(ParsePriorityError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_precedence() {
        assert!(Priority::High > Priority::Mid);
        assert!(Priority::Mid > Priority::Low);
        assert_eq!(Priority::ALL.iter().map(|p| p.index()).collect::<Vec<_>>(), [0, 1, 2]);
    }

    #[test]
    fn try_from_rejects_levels_past_high() {
        assert_eq!(Priority::try_from(2), Ok(Priority::High));
        assert_eq!(Priority::try_from(3), Err(BufferError::InvalidPriority(3)));
        assert_eq!(Priority::try_from(255), Err(BufferError::InvalidPriority(255)));
    }

    #[test]
    fn parses_names_and_levels() {
        assert_eq!("high".parse::<Priority>(), Ok(Priority::High));
        assert_eq!(" Mid ".parse::<Priority>(), Ok(Priority::Mid));
        assert_eq!("LOW".parse::<Priority>(), Ok(Priority::Low));
        assert_eq!("1".parse::<Priority>(), Ok(Priority::Mid));
        assert_eq!("3".parse::<Priority>(), Err(ParsePriorityError));
        assert_eq!("urgent".parse::<Priority>(), Err(ParsePriorityError));
    }
}

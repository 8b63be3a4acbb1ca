use std::fmt;

/// Major-version family selecting arity, classification, date and URL rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Epoch {
    /// 4.x, four release components (4.3.33.0)
    Legacy,
    /// 5.x, three release components
    Five,
    /// 6.x, three release components
    Six,
}

impl Epoch {
    /// Map a major version to its epoch, `None` when unsupported
    pub fn from_major(major: u32) -> Option<Self> {
        match major {
            4 => Some(Epoch::Legacy),
            5 => Some(Epoch::Five),
            6 => Some(Epoch::Six),
            _ => None,
        }
    }

    pub fn major(&self) -> u32 {
        match self {
            Epoch::Legacy => 4,
            Epoch::Five => 5,
            Epoch::Six => 6,
        }
    }

    /// Number of numeric release components a version of this epoch carries
    pub fn arity(&self) -> usize {
        match self {
            Epoch::Legacy => 4,
            Epoch::Five | Epoch::Six => 3,
        }
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.major())
    }
}

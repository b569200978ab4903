/// The dealer's answer to one submitted candidate. The empty half of an
/// `Option<Ruling>` cell means nothing is pending; a ruling is final for the
/// submission it answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ruling {
    /// the group was valid: a point and the point freeze
    Legal,
    /// the group was not: the penalty freeze, nothing else
    Illegal,
}

impl Display for Ruling {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            Self::Legal => write!(f, "legal"),
            Self::Illegal => write!(f, "illegal"),
        }
    }
}

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

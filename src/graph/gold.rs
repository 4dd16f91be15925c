//! Exact gold arithmetic.
//!
//! Alerted forts surrender half their value, so every total is a multiple
//! of one half. Storing the number of halves keeps sums and comparisons exact.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Serialize, Serializer};

/// An amount of stolen gold, counted in halves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Gold {
    halves: u64,
}

impl Gold {
    pub const ZERO: Gold = Gold { halves: 0 };

    /// The full value of a fort.
    pub const fn whole(value: u32) -> Self {
        Gold {
            halves: value as u64 * 2,
        }
    }

    /// Half the value of a fort.
    pub const fn half(value: u32) -> Self {
        Gold {
            halves: value as u64,
        }
    }

    /// Gold collected from a fort: halved when alerted, unless immune.
    pub const fn collected(value: u32, alerted: bool, immune: bool) -> Self {
        if alerted && !immune {
            Gold::half(value)
        } else {
            Gold::whole(value)
        }
    }

    /// Returns the raw count of halves.
    pub const fn halves(self) -> u64 {
        self.halves
    }

    pub fn as_f64(self) -> f64 {
        self.halves as f64 / 2.0
    }
}

impl Add for Gold {
    type Output = Gold;

    fn add(self, rhs: Gold) -> Gold {
        Gold {
            halves: self.halves + rhs.halves,
        }
    }
}

impl AddAssign for Gold {
    fn add_assign(&mut self, rhs: Gold) {
        self.halves += rhs.halves;
    }
}

impl Sum for Gold {
    fn sum<I: Iterator<Item = Gold>>(iter: I) -> Gold {
        iter.fold(Gold::ZERO, Add::add)
    }
}

impl fmt::Display for Gold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.halves % 2 == 0 {
            write!(f, "{}", self.halves / 2)
        } else {
            write!(f, "{}.5", self.halves / 2)
        }
    }
}

impl Serialize for Gold {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

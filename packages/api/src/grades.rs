//! Letter grades and percentages for marks.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Grade {
    F,
    C,
    CPlus,
    B,
    BPlus,
    A,
    APlus,
}

impl Grade {
    /// Lower bounds are inclusive: 90 is an A+, 89.99 an A.
    pub fn from_percentage(percentage: f64) -> Self {
        match percentage {
            p if p >= 90.0 => Grade::APlus,
            p if p >= 80.0 => Grade::A,
            p if p >= 70.0 => Grade::BPlus,
            p if p >= 60.0 => Grade::B,
            p if p >= 50.0 => Grade::CPlus,
            p if p >= 40.0 => Grade::C,
            _ => Grade::F,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `obtained / total * 100`, or 0 when there is nothing to divide by.
pub fn percentage(obtained: f64, total: f64) -> f64 {
    if total <= 0.0 {
        0.0
    } else {
        obtained / total * 100.0
    }
}

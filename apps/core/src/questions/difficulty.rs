use std::fmt;

use serde::{Deserialize, Serialize};

/// Question tier, picked from the expected monthly salary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Junior,
    Mid,
    Senior,
    Expert,
}

impl Difficulty {
    pub const ALL: [Self; 4] = [Self::Junior, Self::Mid, Self::Senior, Self::Expert];

    /// Keeps only the ASCII digits of `salary` ("15,001" reads as 15001).
    /// Nothing numeric counts as 0; values too large saturate.
    pub fn from_salary(salary: &str) -> Self {
        let amount = salary
            .bytes()
            .filter(u8::is_ascii_digit)
            .fold(0u64, |acc, digit| {
                acc.saturating_mul(10).saturating_add(u64::from(digit - b'0'))
            });

        match amount {
            0..=7_999 => Self::Junior,
            8_000..=15_000 => Self::Mid,
            15_001..=50_000 => Self::Senior,
            _ => Self::Expert,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Junior => "junior",
            Self::Mid => "mid",
            Self::Senior => "senior",
            Self::Expert => "expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_thresholds() {
        let cases = [
            ("6000", Difficulty::Junior),
            ("7999", Difficulty::Junior),
            ("8000", Difficulty::Mid),
            ("15000", Difficulty::Mid),
            ("15,001", Difficulty::Senior),
            ("50000", Difficulty::Senior),
            ("50001", Difficulty::Expert),
            ("", Difficulty::Junior),
            ("面议", Difficulty::Junior),
            ("99999999999999999999999", Difficulty::Expert),
        ];
        for (salary, expected) in cases {
            assert_eq!(Difficulty::from_salary(salary), expected, "salary {salary:?}");
        }
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Difficulty::Senior).ok().as_deref(), Some("\"senior\""));
        assert_eq!(Difficulty::Mid.to_string(), "mid");
    }
}

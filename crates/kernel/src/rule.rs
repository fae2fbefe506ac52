//! Birth/survival rules in `B3/S23` notation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest neighbour count a rule can name.
pub const MAX_RULE_COUNT: u32 = 63;

/// Errors from building or parsing a [`Rule`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("malformed rule {0:?}: expected B<digits>/S<digits>")]
    Malformed(String),
    #[error("neighbour count {0} exceeds the maximum of 63")]
    CountOutOfRange(u32),
}

/// Outer-totalistic birth/survival rule.
///
/// A dead cell is born when its live-neighbour count is in `birth`; a live
/// cell survives when its count is in `survival`. Counts are stored as bit
/// sets over `0..=MAX_RULE_COUNT`.
///
/// A cell with no live neighbours never appears in the propagated counts,
/// so a `0` in either set has no effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rule {
    birth: u64,
    survival: u64,
}

impl Rule {
    /// Conway's Game of Life, B3/S23.
    pub const fn conway() -> Self {
        Self {
            birth: 1 << 3,
            survival: (1 << 2) | (1 << 3),
        }
    }

    pub fn new(birth: &[u32], survival: &[u32]) -> Result<Self, RuleError> {
        Ok(Self {
            birth: mask(birth)?,
            survival: mask(survival)?,
        })
    }

    /// Whether a cell is alive next generation given its state and count.
    pub fn fires(&self, alive: bool, count: u32) -> bool {
        if count > MAX_RULE_COUNT {
            return false;
        }
        let set = if alive { self.survival } else { self.birth };
        set & (1u64 << count) != 0
    }

    pub fn birth_counts(&self) -> Vec<u32> {
        counts(self.birth)
    }

    pub fn survival_counts(&self) -> Vec<u32> {
        counts(self.survival)
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::conway()
    }
}

fn mask(counts: &[u32]) -> Result<u64, RuleError> {
    counts.iter().try_fold(0u64, |acc, &n| {
        if n > MAX_RULE_COUNT {
            Err(RuleError::CountOutOfRange(n))
        } else {
            Ok(acc | (1u64 << n))
        }
    })
}

fn counts(mask: u64) -> Vec<u32> {
    (0..=MAX_RULE_COUNT).filter(|&n| mask & (1u64 << n) != 0).collect()
}

/// Parse the digits following a `B` or `S` prefix, one count per digit.
fn section(part: &str, prefix: char, whole: &str) -> Result<Vec<u32>, RuleError> {
    let mut chars = part.chars();
    match chars.next() {
        Some(c) if c.eq_ignore_ascii_case(&prefix) => {}
        _ => return Err(RuleError::Malformed(whole.to_owned())),
    }
    chars
        .map(|c| c.to_digit(10).ok_or_else(|| RuleError::Malformed(whole.to_owned())))
        .collect()
}

impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (b, sv) = s
            .split_once('/')
            .ok_or_else(|| RuleError::Malformed(s.to_owned()))?;
        Rule::new(&section(b, 'B', s)?, &section(sv, 'S', s)?)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B")?;
        for n in self.birth_counts() {
            write!(f, "{n}")?;
        }
        write!(f, "/S")?;
        for n in self.survival_counts() {
            write!(f, "{n}")?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Rule {
    type Error = RuleError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rule> for String {
    fn from(rule: Rule) -> Self {
        rule.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conway_fires_like_b3_s23() {
        let r = Rule::conway();
        assert!(r.fires(false, 3));
        assert!(!r.fires(false, 2));
        assert!(r.fires(true, 2));
        assert!(r.fires(true, 3));
        for n in [0, 1, 4, 5, 8, 26] {
            assert!(!r.fires(true, n));
            assert!(!r.fires(false, n));
        }
        assert!(!r.fires(true, 200));
    }

    #[test]
    fn parse_and_display() {
        let r: Rule = "B3/S23".parse().unwrap();
        assert_eq!(r, Rule::conway());
        assert_eq!(r.to_string(), "B3/S23");

        let highlife: Rule = "b36/s23".parse().unwrap();
        assert_eq!(highlife.birth_counts(), vec![3, 6]);
        assert_eq!(highlife.to_string(), "B36/S23");

        let seeds: Rule = "B2/S".parse().unwrap();
        assert!(seeds.survival_counts().is_empty());
    }

    #[test]
    fn malformed_rules_are_rejected() {
        for bad in ["", "B3", "S23/B3", "B3/S2x", "23/3"] {
            assert!(
                matches!(bad.parse::<Rule>(), Err(RuleError::Malformed(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn out_of_range_count() {
        assert_eq!(Rule::new(&[64], &[]), Err(RuleError::CountOutOfRange(64)));
        assert!(Rule::new(&[63], &[26]).is_ok());
    }

    #[test]
    fn serde_uses_notation() {
        let json = serde_json::to_string(&Rule::conway()).unwrap();
        assert_eq!(json, "\"B3/S23\"");
        let back: Rule = serde_json::from_str("\"B36/S23\"").unwrap();
        assert_eq!(back.birth_counts(), vec![3, 6]);
    }
}

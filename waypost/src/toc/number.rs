use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Dotted chapter number, e.g. `1.2.3`.
///
/// Ordering follows the component sequence, so `1.2` sorts before `1.10`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SectionNumber {
  /// Number components (e.g., `[1, 2, 3]` for `1.2.3`).
  pub parts: Vec<u32>,
}

impl SectionNumber {
  /// Nesting depth of the numbered chapter (number of parts - 1).
  #[must_use]
  pub fn depth(&self) -> usize {
    self.parts.len().saturating_sub(1)
  }
}

impl fmt::Display for SectionNumber {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = self
      .parts
      .iter()
      .map(ToString::to_string)
      .collect::<Vec<_>>()
      .join(".");
    write!(f, "{s}")
  }
}

impl FromStr for SectionNumber {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let parts: Result<Vec<u32>, _> = s
      .trim_end_matches('.')
      .split('.')
      .map(str::parse::<u32>)
      .collect();

    match parts {
      Ok(parts) if !parts.is_empty() => Ok(Self { parts }),
      _ => Err(format!("invalid section number: '{s}'")),
    }
  }
}

impl Serialize for SectionNumber {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for SectionNumber {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    s.parse().map_err(de::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Tests can unwrap")]

  use super::*;

  #[test]
  fn test_parse_and_display() {
    let number: SectionNumber = "15.2.1".parse().unwrap();
    assert_eq!(number.parts, vec![15, 2, 1]);
    assert_eq!(number.to_string(), "15.2.1");
    assert_eq!(number.depth(), 2);
  }

  #[test]
  fn test_trailing_dot_is_tolerated() {
    let number: SectionNumber = "3.".parse().unwrap();
    assert_eq!(number.parts, vec![3]);
  }

  #[test]
  fn test_rejects_garbage() {
    assert!("".parse::<SectionNumber>().is_err());
    assert!("a.b".parse::<SectionNumber>().is_err());
    assert!("1..2".parse::<SectionNumber>().is_err());
  }

  #[test]
  fn test_ordering() {
    let a: SectionNumber = "1.2".parse().unwrap();
    let b: SectionNumber = "1.10".parse().unwrap();
    assert!(a < b);
  }
}

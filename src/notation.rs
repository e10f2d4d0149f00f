//! Dart notation parsing and hit-frequency weighting.

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};

/// Weight added to the exact notation of a hit.
pub const EXACT_WEIGHT: f64 = 1.0;
/// Weight added to the bare numeric segment of a hit.
pub const BASE_WEIGHT: f64 = 0.5;
/// Extra base weight when consecutive darts of a turn hit the same segment.
pub const SAME_DIGIT_BOOST: f64 = 0.25;

/// Bull segment number.
pub const BULL: u8 = 25;

/// Multiplier ring of a dart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ring {
    /// Single segment (or outer bull).
    Single,
    /// Double ring (or bullseye).
    Double,
    /// Treble ring.
    Treble,
}

impl Ring {
    /// Numeric multiplier of the ring.
    #[must_use]
    pub const fn multiplier(self) -> u32 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Treble => 3,
        }
    }
}

/// A single dart written in board notation (`T20`, `D16`, `S5`, `20`, `BULL`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DartNotation {
    /// Segment number (1-20, or 25 for the bull).
    pub segment: u8,
    /// Ring the dart landed in.
    pub ring: Ring,
}

impl DartNotation {
    /// Parses a notation string.
    ///
    /// Returns `None` for misses (`0`, `M`) and anything that is not a valid
    /// board segment. Trebles on the bull are rejected.
    ///
    /// # Example
    ///
    /// ```
    /// use dartscore::{DartNotation, Ring};
    ///
    /// let dart = DartNotation::parse("T20").unwrap();
    /// assert_eq!(dart.ring, Ring::Treble);
    /// assert_eq!(dart.points(), 60);
    /// assert_eq!(DartNotation::parse("DBULL").unwrap().points(), 50);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        let text = upper.as_str();

        match text {
            "BULL" | "SB" | "OB" => {
                return Some(Self {
                    segment: BULL,
                    ring: Ring::Single,
                });
            }
            "DBULL" | "DB" | "BE" | "50" => {
                return Some(Self {
                    segment: BULL,
                    ring: Ring::Double,
                });
            }
            _ => {}
        }

        let (ring, digits) = match text.as_bytes().first()? {
            b'S' => (Ring::Single, &text[1..]),
            b'D' => (Ring::Double, &text[1..]),
            b'T' => (Ring::Treble, &text[1..]),
            _ => (Ring::Single, text),
        };

        let segment: u8 = digits.parse().ok()?;
        let valid = matches!(segment, 1..=20) || (segment == BULL && ring != Ring::Treble);
        valid.then_some(Self { segment, ring })
    }

    /// Points scored by this dart.
    #[must_use]
    pub const fn points(self) -> u32 {
        self.segment as u32 * self.ring.multiplier()
    }

    /// Bare numeric segment, e.g. `"20"` for `T20`.
    #[must_use]
    pub fn base(self) -> String {
        self.segment.to_string()
    }
}

/// Merges the darts of one turn into a hit-frequency map.
///
/// Each parsed dart adds [`EXACT_WEIGHT`] to its notation as written
/// (upper-cased) and [`BASE_WEIGHT`] to its bare segment when the two differ.
/// A dart on the same segment as the previous dart of the turn adds
/// [`SAME_DIGIT_BOOST`] to the segment as well. Unparseable entries are
/// skipped.
pub fn merge_hits<S: AsRef<str>>(hits: &mut BTreeMap<String, f64>, notations: &[S]) {
    let mut previous: Option<u8> = None;

    for raw in notations {
        let Some(dart) = DartNotation::parse(raw.as_ref()) else {
            previous = None;
            continue;
        };

        let exact = raw.as_ref().trim().to_ascii_uppercase();
        let base = dart.base();

        *hits.entry(exact.clone()).or_insert(0.0) += EXACT_WEIGHT;
        if exact != base {
            *hits.entry(base.clone()).or_insert(0.0) += BASE_WEIGHT;
        }
        if previous == Some(dart.segment) {
            *hits.entry(base).or_insert(0.0) += SAME_DIGIT_BOOST;
        }

        previous = Some(dart.segment);
    }
}

/// Adds every weight of `from` into `into`.
pub fn accumulate_hits(into: &mut BTreeMap<String, f64>, from: &BTreeMap<String, f64>) {
    for (notation, weight) in from {
        *into.entry(notation.clone()).or_insert(0.0) += weight;
    }
}

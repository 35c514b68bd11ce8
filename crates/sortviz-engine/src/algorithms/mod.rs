//! The six animated sorting algorithms.
//!
//! Each algorithm only touches the sequence through a [`StepContext`], which
//! paces the run and reports every compare, change and settle.

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::step::StepContext;

pub use bubble::bubble_sort;
pub use heap::heap_sort;
pub use insertion::insertion_sort;
pub use merge::merge_sort;
pub use quick::quick_sort;
pub use selection::selection_sort;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl Algorithm {
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Merge,
        Algorithm::Quick,
        Algorithm::Heap,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
            Algorithm::Merge => "merge",
            Algorithm::Quick => "quick",
            Algorithm::Heap => "heap",
        }
    }

    /// Whether equal elements keep their relative order.
    pub fn is_stable(self) -> bool {
        matches!(self, Algorithm::Insertion | Algorithm::Merge)
    }

    pub fn sort<T: Ord + Copy>(self, ctx: &mut StepContext<'_, T>) -> Result<(), EngineError> {
        match self {
            Algorithm::Bubble => bubble_sort(ctx),
            Algorithm::Selection => selection_sort(ctx),
            Algorithm::Insertion => insertion_sort(ctx),
            Algorithm::Merge => merge_sort(ctx),
            Algorithm::Quick => quick_sort(ctx),
            Algorithm::Heap => heap_sort(ctx),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = EngineError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lowered = value.trim().to_ascii_lowercase();
        let wanted = lowered
            .strip_suffix("sort")
            .unwrap_or(lowered.as_str())
            .trim_end_matches(['-', '_', ' ']);
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.name() == wanted)
            .ok_or_else(|| {
                EngineError::invalid("algorithm", format!("unknown algorithm '{value}'"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("quick".parse::<Algorithm>().unwrap(), Algorithm::Quick);
        assert_eq!("Heap".parse::<Algorithm>().unwrap(), Algorithm::Heap);
        assert_eq!("bubble-sort".parse::<Algorithm>().unwrap(), Algorithm::Bubble);
        assert_eq!("mergeSort".parse::<Algorithm>().unwrap(), Algorithm::Merge);
        assert!("bogo".parse::<Algorithm>().is_err());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for algorithm in Algorithm::ALL {
            assert_eq!(
                algorithm.to_string().parse::<Algorithm>().unwrap(),
                algorithm
            );
        }
    }

    #[test]
    fn only_merge_and_insertion_are_stable() {
        let stable: Vec<_> = Algorithm::ALL
            .into_iter()
            .filter(|algorithm| algorithm.is_stable())
            .collect();
        assert_eq!(stable, vec![Algorithm::Insertion, Algorithm::Merge]);
    }
}

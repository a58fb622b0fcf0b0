use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::hash::Hash;

use thiserror::Error;
use tracing::debug;

use crate::grid::Grid;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HistoryError {
    #[error("Index out of bounds: {index} (history has {len} generations)")]
    OutOfBounds { index: usize, len: usize },
}

/// Two generations with identical cells. `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub first: usize,
    pub second: usize,
}

impl Cycle {
    /// Number of generations between the two repeated steps
    pub fn period(&self) -> usize {
        self.second - self.first
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cycle detected between steps {} and {}",
            self.first, self.second
        )
    }
}

/// Every generation simulated so far, starting from a seed.
///
/// Generation `i + 1` is always the next generation of generation `i`. Generations are only
/// ever appended.
#[derive(Debug, Clone)]
pub struct History {
    /// Never empty. Index `0` is the seed.
    snapshots: Vec<Grid>,
}

impl History {
    pub fn new(seed: Grid) -> Self {
        Self {
            snapshots: vec![seed],
        }
    }

    /// Number of generations, including the seed
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false, a history holds at least its seed.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshot_at(&self, index: usize) -> Result<&Grid, HistoryError> {
        self.snapshots.get(index).ok_or(HistoryError::OutOfBounds {
            index,
            len: self.snapshots.len(),
        })
    }

    /// The most recent generation
    pub fn current(&self) -> &Grid {
        // `snapshots` holds at least the seed
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// All generations, oldest first
    pub fn snapshots(&self) -> &[Grid] {
        &self.snapshots
    }

    pub fn iter(&self) -> impl Iterator<Item = &Grid> {
        self.snapshots.iter()
    }

    /// Simulate `n` more generations, appending each one.
    pub fn advance(&mut self, n: usize) {
        if n == 0 {
            return;
        }

        let (rows, cols) = (self.current().rows(), self.current().cols());
        self.snapshots.reserve(n);

        for _ in 0..n {
            let next = self.current().next_generation();

            assert!(
                next.rows() == rows && next.cols() == cols,
                "next generation changed dimensions from {rows}x{cols} to {}x{}",
                next.rows(),
                next.cols()
            );

            self.snapshots.push(next);
        }

        debug!(steps = n, len = self.snapshots.len(), "advanced history");
    }

    /// Find the first pair of equal generations `(i, j)`, `i < j`, ordered by `i` and then by
    /// `j`.
    pub fn find_cycle(&self) -> Option<Cycle> {
        let (first, second) = first_repeat(&self.snapshots)?;

        Some(Cycle { first, second })
    }

    /// A one line summary of [`History::find_cycle`]
    pub fn cycle_report(&self) -> String {
        match self.find_cycle() {
            Some(cycle) => cycle.to_string(),
            None => "No cycle detected.".to_string(),
        }
    }

    /// Every generation in its text form, labeled with its step
    pub fn render(&self) -> String {
        let mut s = String::from("Generation History:\n");

        for (i, grid) in self.snapshots.iter().enumerate() {
            s.push_str(&format!("Step {i}:\n"));
            s.push_str(&grid.encode());
            s.push('\n');
        }

        s
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Returns the lowest `i` that has a later equal item, paired with the lowest such `j`.
///
/// Items are indexed by first occurrence, so this is linear rather than comparing every pair.
fn first_repeat<T: Eq + Hash>(items: &[T]) -> Option<(usize, usize)> {
    // item -> (first index, second index)
    let mut seen: HashMap<&T, (usize, Option<usize>)> = HashMap::with_capacity(items.len());

    for (j, item) in items.iter().enumerate() {
        match seen.entry(item) {
            Entry::Occupied(mut e) => {
                let (_, second) = e.get_mut();
                if second.is_none() {
                    *second = Some(j);
                }
            }
            Entry::Vacant(e) => {
                e.insert((j, None));
            }
        }
    }

    seen.into_values()
        .filter_map(|(i, j)| Some((i, j?)))
        .min_by_key(|&(i, _)| i)
}

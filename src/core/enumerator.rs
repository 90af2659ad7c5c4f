use crate::core::profile::RankTable;
use crate::core::stability::is_stable_assignment;
use crate::error::{MatchingError, Result};
use crate::models::{Matching, PreferenceProfile};

/// Lexicographic permutations of `0..n`, starting from the identity
///
/// Yields n! items for n ≥ 1. Item k assigns receiver `perm[p]` to proposer
/// p, so the order follows the profile's declared receiver order.
#[derive(Debug, Clone)]
pub struct Permutations {
    current: Vec<usize>,
    done: bool,
}

impl Permutations {
    pub fn new(n: usize) -> Self {
        Self {
            current: (0..n).collect(),
            done: false,
        }
    }
}

impl Iterator for Permutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.current.clone();
        self.done = !next_permutation(&mut self.current);
        Some(item)
    }
}

/// Advance `perm` to its lexicographic successor; false once it was the last
fn next_permutation(perm: &mut [usize]) -> bool {
    let len = perm.len();
    if len < 2 {
        return false;
    }

    let mut i = len - 1;
    while i > 0 && perm[i - 1] >= perm[i] {
        i -= 1;
    }
    if i == 0 {
        return false;
    }

    let mut j = len - 1;
    while perm[j] <= perm[i - 1] {
        j -= 1;
    }
    perm.swap(i - 1, j);
    perm[i..].reverse();
    true
}

/// All stable matchings of `profile`, in enumeration order
///
/// Exhaustive over all n! bijections, so only practical for small n; callers
/// that accept user input should go through `Matcher`, which bounds n.
pub fn enumerate_stable_matchings(profile: &PreferenceProfile) -> Result<Vec<Matching>> {
    let table = profile.rank_table()?;
    let assignments = stable_assignments(&table)?;

    Ok(assignments
        .iter()
        .map(|assignment| table.matching_from(assignment))
        .collect())
}

/// Stable assignments over a validated table, with the number of candidates examined
pub(crate) fn stable_assignments_counted(table: &RankTable) -> Result<(Vec<Vec<usize>>, usize)> {
    let n = table.size();
    let mut stable = Vec::new();
    let mut examined = 0usize;

    for candidate in Permutations::new(n) {
        if candidate.len() != n {
            return Err(MatchingError::InvariantViolation(format!(
                "candidate matching has {} pairs, expected {}",
                candidate.len(),
                n
            )));
        }
        examined += 1;
        if is_stable_assignment(table, &candidate) {
            stable.push(candidate);
        }
    }

    // A complete strict profile always has a stable matching
    if stable.is_empty() {
        tracing::error!("No stable matching among {} candidates for n={}", examined, n);
        return Err(MatchingError::InvariantViolation(format!(
            "no stable matching found among {} candidates",
            examined
        )));
    }

    tracing::debug!(
        "Examined {} candidates, {} stable (n={})",
        examined,
        stable.len(),
        n
    );

    Ok((stable, examined))
}

#[inline]
fn stable_assignments(table: &RankTable) -> Result<Vec<Vec<usize>>> {
    stable_assignments_counted(table).map(|(stable, _)| stable)
}

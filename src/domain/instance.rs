use super::error::InstanceError;

/// Weighted set cover instance
///
/// `membership[e]` holds the 0-based indices of the sets containing element
/// `e`. Instances are validated on construction and never mutated afterwards,
/// so one instance can feed any number of solves.
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemInstance {
    universe_size: usize,
    set_count: usize,
    weights: Vec<f64>,
    membership: Vec<Vec<usize>>,
}

impl ProblemInstance {
    /// Build an instance from 0-based membership lists.
    pub fn new(
        universe_size: usize,
        set_count: usize,
        weights: Vec<f64>,
        membership: Vec<Vec<usize>>,
    ) -> Result<Self, InstanceError> {
        if weights.len() != set_count {
            return Err(InstanceError::WeightCountMismatch {
                expected: set_count,
                found: weights.len(),
            });
        }
        if membership.len() != universe_size {
            return Err(InstanceError::MembershipCountMismatch {
                expected: universe_size,
                found: membership.len(),
            });
        }

        for (set, &weight) in weights.iter().enumerate() {
            if !weight.is_finite() {
                return Err(InstanceError::NonFiniteWeight { set, weight });
            }
            if weight < 0.0 {
                return Err(InstanceError::NegativeWeight { set, weight });
            }
        }

        let mut normalized = Vec::with_capacity(membership.len());
        for (element, mut sets) in membership.into_iter().enumerate() {
            if sets.is_empty() {
                return Err(InstanceError::EmptyMembership { element });
            }
            if let Some(&set) = sets.iter().find(|&&s| s >= set_count) {
                return Err(InstanceError::SetIndexOutOfRange {
                    element,
                    set,
                    set_count,
                });
            }
            sets.sort_unstable();
            sets.dedup();
            normalized.push(sets);
        }

        Ok(Self {
            universe_size,
            set_count,
            weights,
            membership: normalized,
        })
    }

    /// Build an instance from 1-based membership lists, as written in instance files.
    pub fn from_one_based(
        universe_size: usize,
        set_count: usize,
        weights: Vec<f64>,
        membership: Vec<Vec<usize>>,
    ) -> Result<Self, InstanceError> {
        let mut zero_based = Vec::with_capacity(membership.len());
        for (element, sets) in membership.into_iter().enumerate() {
            let shifted = sets
                .into_iter()
                .map(|s| s.checked_sub(1).ok_or(InstanceError::ZeroSetIndex { element }))
                .collect::<Result<Vec<_>, _>>()?;
            zero_based.push(shifted);
        }
        Self::new(universe_size, set_count, weights, zero_based)
    }

    pub fn universe_size(&self) -> usize {
        self.universe_size
    }

    pub fn set_count(&self) -> usize {
        self.set_count
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn weight(&self, set: usize) -> f64 {
        self.weights[set]
    }

    pub fn membership(&self) -> &[Vec<usize>] {
        &self.membership
    }

    /// Sets containing `element`, sorted ascending.
    pub fn sets_containing(&self, element: usize) -> &[usize] {
        &self.membership[element]
    }

    /// Minimum-weight set containing `element`; the lowest index wins ties.
    pub fn cheapest_set_for(&self, element: usize) -> usize {
        let sets = &self.membership[element];
        let mut best = sets[0];
        for &set in &sets[1..] {
            if self.weights[set] < self.weights[best] {
                best = set;
            }
        }
        best
    }

    /// Whether some selected set contains `element`.
    pub fn is_covered<F>(&self, element: usize, selected: F) -> bool
    where
        F: Fn(usize) -> bool,
    {
        self.membership[element].iter().any(|&s| selected(s))
    }

    /// Elements not covered by the selection, in index order.
    pub fn uncovered_elements(&self, selection: &[usize]) -> Vec<usize> {
        let mut chosen = vec![false; self.set_count];
        for &set in selection {
            if let Some(flag) = chosen.get_mut(set) {
                *flag = true;
            }
        }
        (0..self.universe_size)
            .filter(|&e| !self.is_covered(e, |s| chosen[s]))
            .collect()
    }

    pub fn covers(&self, selection: &[usize]) -> bool {
        self.uncovered_elements(selection).is_empty()
    }

    /// Total weight of a selection, each distinct set counted once.
    pub fn weight_of(&self, selection: &[usize]) -> f64 {
        let mut seen = vec![false; self.set_count];
        let mut total = 0.0;
        for &set in selection {
            if !seen[set] {
                seen[set] = true;
                total += self.weights[set];
            }
        }
        total
    }
}

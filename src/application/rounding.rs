// Randomized rounding of a fractional cover
//
// Each trial includes set `i` independently with probability `x[i]`, the
// set's value in the LP relaxation. Trials are repeated while a counter that
// starts at 1 doubles up to the set count, giving `O(log n)` trials whose
// picks are unioned. Elements that are still uncovered afterwards are repaired
// with their cheapest incident set, so the result is always a feasible cover.

use std::collections::BTreeSet;

use log::debug;
use rand::Rng;

use crate::domain::ProblemInstance;

/// Tuning for the rounding trials
#[derive(Debug, Clone, Default)]
pub struct RoundingConfig {
    /// Counter value that ends the doubling schedule; the set count when `None`
    pub trial_threshold: Option<usize>,
}

impl RoundingConfig {
    pub fn with_trial_threshold(mut self, threshold: usize) -> Self {
        self.trial_threshold = Some(threshold);
        self
    }

    pub fn threshold_for(&self, set_count: usize) -> usize {
        self.trial_threshold.unwrap_or(set_count)
    }
}

/// Number of trials the doubling schedule runs for `threshold`.
///
/// The counter starts at 1 and doubles after every trial until it reaches the
/// threshold, so at least one trial always runs.
pub fn trial_count(threshold: usize) -> usize {
    let mut counter = 1usize;
    let mut trials = 1;
    while counter < threshold {
        counter = counter.saturating_mul(2);
        trials += 1;
    }
    trials
}

/// An element left uncovered by the trials and the set added for it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repair {
    pub element: usize,
    pub set: usize,
}

/// Result of rounding a fractional cover
#[derive(Debug, Clone)]
pub struct RoundingOutcome {
    /// Chosen sets, ascending
    pub included: Vec<usize>,
    /// Size of the included set after each trial
    pub included_sizes: Vec<usize>,
    pub repairs: Vec<Repair>,
    pub total_weight: f64,
}

impl RoundingOutcome {
    pub fn trials(&self) -> usize {
        self.included_sizes.len()
    }
}

pub struct RoundingEngine<'a> {
    instance: &'a ProblemInstance,
    config: RoundingConfig,
}

impl<'a> RoundingEngine<'a> {
    pub fn new(instance: &'a ProblemInstance, config: RoundingConfig) -> Self {
        Self { instance, config }
    }

    /// Round `fractional` (one value per set) into a feasible cover.
    pub fn run<R: Rng + ?Sized>(&self, fractional: &[f64], rng: &mut R) -> RoundingOutcome {
        let probabilities = self.probabilities(fractional);
        let trials = trial_count(self.config.threshold_for(self.instance.set_count()));

        let mut included = BTreeSet::new();
        let mut included_sizes = Vec::with_capacity(trials);
        for trial in 0..trials {
            let added = self.trial(&probabilities, &mut included, rng);
            debug!(
                "rounding trial {}/{}: {} new sets, {} included",
                trial + 1,
                trials,
                added,
                included.len()
            );
            included_sizes.push(included.len());
        }

        let repairs = self.repair(&mut included);
        let included: Vec<usize> = included.into_iter().collect();
        let total_weight = included.iter().map(|&s| self.instance.weight(s)).sum();

        RoundingOutcome {
            included,
            included_sizes,
            repairs,
            total_weight,
        }
    }

    /// One independent trial; returns how many sets were newly included.
    pub fn trial<R: Rng + ?Sized>(
        &self,
        probabilities: &[f64],
        included: &mut BTreeSet<usize>,
        rng: &mut R,
    ) -> usize {
        let mut added = 0;
        for (set, &p) in probabilities.iter().enumerate() {
            if rng.gen::<f64>() < p && included.insert(set) {
                added += 1;
            }
        }
        added
    }

    /// Add the cheapest incident set of every element `included` misses.
    ///
    /// Elements are scanned in index order against the shared `included` set,
    /// so a repair for one element also counts for the elements after it.
    pub fn repair(&self, included: &mut BTreeSet<usize>) -> Vec<Repair> {
        let mut repairs = Vec::new();
        for element in 0..self.instance.universe_size() {
            if self.instance.is_covered(element, |s| included.contains(&s)) {
                continue;
            }
            let set = self.instance.cheapest_set_for(element);
            debug!("repair: element {} uncovered, adding set {}", element, set);
            included.insert(set);
            repairs.push(Repair { element, set });
        }
        repairs
    }

    /// Clamp relaxation values into `[0, 1]`; missing or NaN entries count as 0.
    pub fn probabilities(&self, fractional: &[f64]) -> Vec<f64> {
        (0..self.instance.set_count())
            .map(|i| match fractional.get(i) {
                Some(x) if !x.is_nan() => x.clamp(0.0, 1.0),
                _ => 0.0,
            })
            .collect()
    }
}

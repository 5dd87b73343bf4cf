use crate::types::energy_result::EnergyResult;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;

/// Default number of entries kept in a ranked snapshot.
pub const DEFAULT_TOP_N: usize = 10;

/// The best regions of one ranking pass, highest energy first.
///
/// Ranking is a stable sort: regions with equal energy keep their catalog order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RankedSnapshot {
    entries: Vec<EnergyResult>,
}

impl RankedSnapshot {
    /// Sorts `results` by energy (descending, stable) and keeps the first `limit`.
    pub fn rank(mut results: Vec<EnergyResult>, limit: usize) -> Self {
        results.sort_by_key(|r| Reverse(OrderedFloat(r.energy_mj)));
        results.truncate(limit);
        Self { entries: results }
    }

    /// Wraps rows that are already ranked, e.g. ones read back from storage.
    pub(crate) fn from_ranked(entries: Vec<EnergyResult>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[EnergyResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnergyResult> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<EnergyResult> {
        self.entries
    }
}

impl IntoIterator for RankedSnapshot {
    type Item = EnergyResult;
    type IntoIter = std::vec::IntoIter<EnergyResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a RankedSnapshot {
    type Item = &'a EnergyResult;
    type IntoIter = std::slice::Iter<'a, EnergyResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

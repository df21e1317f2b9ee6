use nuis_core::{InteractionRecord, MEV_PER_GEV};
use serde::{Deserialize, Serialize};

/// Beam energy window in GeV, half-open `[min, max)`.
///
/// Equal bounds mean "no cut". Selections test [`EnuRange::is_unbounded`]
/// before applying the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EnuRange {
    /// Lower edge in GeV.
    pub min: f64,
    /// Upper edge in GeV.
    pub max: f64,
}

impl EnuRange {
    /// Builds a window from its edges in GeV.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// A window that never cuts.
    pub const fn unbounded() -> Self {
        Self { min: 0.0, max: 0.0 }
    }

    /// True when the bounds coincide and no cut applies.
    pub fn is_unbounded(&self) -> bool {
        self.min == self.max
    }

    /// Whether an energy in GeV lies inside `[min, max)`.
    pub fn contains_gev(&self, energy: f64) -> bool {
        energy >= self.min && energy < self.max
    }

    /// Whether an energy in MeV lies inside the window after conversion of
    /// the edges.
    pub fn contains_mev(&self, energy: f64) -> bool {
        energy >= self.min * MEV_PER_GEV && energy < self.max * MEV_PER_GEV
    }
}

/// Raw window test on the beam energy, ignoring the no-cut convention.
pub fn is_enu_in_range(record: &InteractionRecord, range: EnuRange) -> bool {
    range.contains_mev(record.beam_energy())
}

/// Beam energy cut used by every selection: skipped when the range is
/// unbounded, otherwise [`is_enu_in_range`].
pub fn passes_enu_cut(record: &InteractionRecord, range: EnuRange) -> bool {
    range.is_unbounded() || is_enu_in_range(record, range)
}

//! One aligned stdout line per compared case.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Entity counts per result source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCounts {
    pub baseline: usize,
    pub solver_a: usize,
    pub solver_b: usize,
}

/// The four case-level error norms, each measured against the baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorNorms {
    pub voltage_solver_a: f64,
    pub voltage_solver_b: f64,
    pub current_solver_a: f64,
    pub current_solver_b: f64,
}

/// Aggregate result of one case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub root: String,
    /// Bus-phase voltage entries per source.
    pub buses: SourceCounts,
    /// Branch-phase current entries per source.
    pub links: SourceCounts,
    pub norms: ErrorNorms,
}

impl fmt::Display for CaseSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<16} Nbus=[{:>6},{:>6},{:>6}] Nlink=[{:>6},{:>6},{:>6}] MAEv=[{:>7.4},{:>7.4}] MAEi=[{:>9.4},{:>9.4}]",
            self.root,
            self.buses.baseline,
            self.buses.solver_a,
            self.buses.solver_b,
            self.links.baseline,
            self.links.solver_a,
            self.links.solver_b,
            self.norms.voltage_solver_a,
            self.norms.voltage_solver_b,
            self.norms.current_solver_a,
            self.norms.current_solver_b,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_uses_fixed_widths() {
        let summary = CaseSummary {
            root: "IEEE13".into(),
            buses: SourceCounts {
                baseline: 41,
                solver_a: 41,
                solver_b: 40,
            },
            links: SourceCounts {
                baseline: 37,
                solver_a: 37,
                solver_b: 29,
            },
            norms: ErrorNorms {
                voltage_solver_a: 0.0012,
                voltage_solver_b: 0.01,
                current_solver_a: 1.5,
                current_solver_b: 12.25,
            },
        };
        assert_eq!(
            summary.to_string(),
            "IEEE13           Nbus=[    41,    41,    40] Nlink=[    37,    37,    29] \
             MAEv=[ 0.0012, 0.0100] MAEi=[   1.5000,  12.2500]"
        );
    }

    #[test]
    fn long_root_is_not_truncated() {
        let summary = CaseSummary {
            root: "A_VERY_LONG_CASE_ROOT".into(),
            buses: SourceCounts::default(),
            links: SourceCounts::default(),
            norms: ErrorNorms::default(),
        };
        assert!(summary.to_string().starts_with("A_VERY_LONG_CASE_ROOT Nbus=[     0,"));
    }
}

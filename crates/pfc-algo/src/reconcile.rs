//! Entity name reconciliation between solver B and solver A.
//!
//! Solver B names a branch `PREFIX_NAME` and reports currents by phase
//! letter. Solver A names the same device `CLASS.NAME` and reports currents by
//! conductor ordinal, counting only conductors that carry current. The class
//! follows from the prefix ([`LinkPrefix::solver_a_class`]); the conductor
//! does not follow from anything in the data, so the pairing is delegated to
//! a [`BranchMatcher`].
//!
//! [`PositionalOrdinalMatcher`] pairs phases positionally: the phases solver B
//! reports, taken in A, B, C order, are matched to ordinals 1, 2, 3 on the
//! solver-A side, and the ordinal only advances when solver A has that
//! conductor. A device whose solvers disagree on phase order will be paired
//! wrongly without any error.

use std::collections::HashSet;

use pfc_core::{CurrentMap, DiffRecord, EntityId, LinkPrefix, Phase};
use tracing::debug;

/// Pairing of one solver-B link phase with a solver-A conductor.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkMatch {
    /// Solver-B key, `PREFIX_NAME_PHASE`.
    pub link_phase: EntityId,
    /// Matched solver-A key, `CLASS.NAME.ORDINAL`, if one was found.
    pub conductor: Option<EntityId>,
}

/// Strategy for aligning the phases of one solver-B link with solver-A
/// conductors.
pub trait BranchMatcher {
    /// One [`LinkMatch`] for every phase of `link` present in `solver_b`.
    fn match_link(&self, link: &str, solver_b: &CurrentMap, solver_a: &CurrentMap) -> Vec<LinkMatch>;
}

/// Positional phase-to-ordinal alignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalOrdinalMatcher;

impl PositionalOrdinalMatcher {
    /// Solver-A device name for a solver-B link, e.g. `LINE_632670` becomes
    /// `LINE.632670` and `REG_RG60` becomes `TRANSFORMER.RG60`.
    pub fn solver_a_device(link: &str) -> Option<String> {
        LinkPrefix::split(link)
            .map(|(prefix, rest)| format!("{}{}", prefix.solver_a_class(), rest.to_uppercase()))
    }
}

impl BranchMatcher for PositionalOrdinalMatcher {
    fn match_link(&self, link: &str, solver_b: &CurrentMap, solver_a: &CurrentMap) -> Vec<LinkMatch> {
        let device = Self::solver_a_device(link);
        let mut next_ordinal = 1;
        let mut matches = Vec::new();
        for phase in Phase::ALL {
            let link_phase = EntityId::link(link, phase);
            if !solver_b.contains_key(&link_phase) {
                continue;
            }
            let conductor = device
                .as_deref()
                .map(|name| EntityId::branch(name, next_ordinal))
                .filter(|candidate| solver_a.contains_key(candidate));
            if conductor.is_some() {
                next_ordinal += 1;
            }
            matches.push(LinkMatch {
                link_phase,
                conductor,
            });
        }
        matches
    }
}

/// Cross-solver current comparison result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// Matched link phases, keyed by the solver-B identifier with the
    /// solver-A identifier as reference, in link order.
    pub records: Vec<DiffRecord>,
    /// Solver-B link phases with no solver-A conductor. They take no part in
    /// the comparison.
    pub unmatched: Vec<EntityId>,
}

/// Compare solver-B link currents with `reference` currents in solver-A
/// naming. Links listed twice are compared once.
pub fn reconcile_currents(
    links: &[String],
    solver_b: &CurrentMap,
    reference: &CurrentMap,
    matcher: &dyn BranchMatcher,
) -> Reconciliation {
    let mut seen = HashSet::new();
    let mut out = Reconciliation::default();
    for link in links {
        if !seen.insert(link.as_str()) {
            continue;
        }
        for m in matcher.match_link(link, solver_b, reference) {
            let pair = m.conductor.and_then(|conductor| {
                let base = reference.get(&conductor)?;
                let value = solver_b.get(&m.link_phase)?;
                Some(DiffRecord::new(m.link_phase.clone(), *base, *value).with_reference(conductor))
            });
            match pair {
                Some(record) => out.records.push(record),
                None => out.unmatched.push(m.link_phase),
            }
        }
    }
    debug!(
        links = seen.len(),
        matched = out.records.len(),
        unmatched = out.unmatched.len(),
        "reconciled solver-B currents"
    );
    out
}

//! Entity identifiers shared by every result table.
//!
//! The solvers name the same physical things differently: solver A writes
//! branches as `CLASS.NAME.<ordinal>` while solver B writes links as
//! `PREFIX_NAME_<phase>`. Buses are `NAME_<phase>` on every side. Rather than
//! concatenating strings, each key is an [`EntityId`] carrying its kind, its
//! canonical name and its terminal (a phase letter or a conductor ordinal),
//! so a bus key can never collide with a branch key.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Conductor phase letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    A,
    B,
    C,
}

impl Phase {
    /// Phases in the fixed order used wherever phases are scanned.
    pub const ALL: [Phase; 3] = [Phase::A, Phase::B, Phase::C];

    /// Map a solver-A node index onto a phase: 1 is A, 2 is B, anything else is C.
    pub fn from_node_index(index: i64) -> Self {
        match index {
            1 => Phase::A,
            2 => Phase::B,
            _ => Phase::C,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Phase::A => 'A',
            Phase::B => 'B',
            Phase::C => 'C',
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// What kind of element an identifier refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Voltage measurement point.
    Bus,
    /// Current-carrying device (line, switch, transformer, regulator).
    Branch,
}

/// Which conductor of an entity is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Terminal {
    /// Explicit phase letter (`_A`, `_B`, `_C`).
    Phase(Phase),
    /// 1-based ordinal over the conductors actually present (`.1`, `.2`, `.3`).
    Ordinal(u32),
}

/// Canonical key of one bus-phase or branch-conductor.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId {
    kind: EntityKind,
    name: String,
    terminal: Terminal,
}

impl EntityId {
    /// Bus-phase key, rendered `NAME_A`.
    pub fn bus(name: &str, phase: Phase) -> Self {
        Self {
            kind: EntityKind::Bus,
            name: canonical_name(name),
            terminal: Terminal::Phase(phase),
        }
    }

    /// Solver-A branch conductor, rendered `CLASS.NAME.1`.
    pub fn branch(name: &str, ordinal: u32) -> Self {
        Self {
            kind: EntityKind::Branch,
            name: canonical_name(name),
            terminal: Terminal::Ordinal(ordinal),
        }
    }

    /// Solver-B link phase, rendered `PREFIX_NAME_A`.
    pub fn link(name: &str, phase: Phase) -> Self {
        Self {
            kind: EntityKind::Branch,
            name: canonical_name(name),
            terminal: Terminal::Phase(phase),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terminal(&self) -> Terminal {
        self.terminal
    }

    pub fn phase(&self) -> Option<Phase> {
        match self.terminal {
            Terminal::Phase(phase) => Some(phase),
            Terminal::Ordinal(_) => None,
        }
    }

    pub fn ordinal(&self) -> Option<u32> {
        match self.terminal {
            Terminal::Ordinal(ordinal) => Some(ordinal),
            Terminal::Phase(_) => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.terminal {
            Terminal::Phase(phase) => write!(f, "{}_{}", self.name, phase),
            Terminal::Ordinal(ordinal) => write!(f, "{}.{}", self.name, ordinal),
        }
    }
}

/// Solver-B link prefixes that mark a branch of interest, and the solver-A
/// element class each one corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkPrefix {
    Line,
    Regulator,
    Switch,
    Transformer,
}

impl LinkPrefix {
    pub const ALL: [LinkPrefix; 4] = [
        LinkPrefix::Line,
        LinkPrefix::Regulator,
        LinkPrefix::Switch,
        LinkPrefix::Transformer,
    ];

    /// Prefix on the solver-B link name.
    pub fn solver_b(self) -> &'static str {
        match self {
            LinkPrefix::Line => "LINE_",
            LinkPrefix::Regulator => "REG_",
            LinkPrefix::Switch => "SWT_",
            LinkPrefix::Transformer => "XF_",
        }
    }

    /// Element class of the same device in solver-A naming. Switches are
    /// lines and regulators are transformers there.
    pub fn solver_a_class(self) -> &'static str {
        match self {
            LinkPrefix::Line | LinkPrefix::Switch => "LINE.",
            LinkPrefix::Regulator | LinkPrefix::Transformer => "TRANSFORMER.",
        }
    }

    /// Match a link name (any case) against the prefix table, returning the
    /// prefix and the remainder of the name.
    pub fn split(link: &str) -> Option<(LinkPrefix, &str)> {
        Self::ALL.into_iter().find_map(|prefix| {
            let tag = prefix.solver_b();
            let head = link.get(..tag.len())?;
            head.eq_ignore_ascii_case(tag)
                .then(|| (prefix, &link[tag.len()..]))
        })
    }
}

/// Canonical form of a raw name field: trimmed, unquoted, upper-case.
pub fn canonical_name(raw: &str) -> String {
    raw.trim().trim_matches('"').trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_each_naming_convention() {
        assert_eq!(EntityId::bus("650", Phase::A).to_string(), "650_A");
        assert_eq!(
            EntityId::branch("Line.632670", 2).to_string(),
            "LINE.632670.2"
        );
        assert_eq!(
            EntityId::link("line_632670", Phase::C).to_string(),
            "LINE_632670_C"
        );
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(
            EntityId::bus("rg60", Phase::B),
            EntityId::bus("\"RG60\"", Phase::B)
        );
    }

    #[test]
    fn bus_and_branch_namespaces_do_not_collide() {
        let bus = EntityId::bus("X", Phase::A);
        let link = EntityId::link("X", Phase::A);
        assert_eq!(bus.to_string(), link.to_string());
        assert_ne!(bus, link);
    }

    #[test]
    fn node_index_maps_to_phase() {
        assert_eq!(Phase::from_node_index(1), Phase::A);
        assert_eq!(Phase::from_node_index(2), Phase::B);
        assert_eq!(Phase::from_node_index(3), Phase::C);
        assert_eq!(Phase::from_node_index(0), Phase::C);
    }

    #[test]
    fn link_prefix_table() {
        let (prefix, rest) = LinkPrefix::split("SWT_671692").unwrap();
        assert_eq!(prefix, LinkPrefix::Switch);
        assert_eq!(rest, "671692");
        assert_eq!(prefix.solver_a_class(), "LINE.");
        let (prefix, rest) = LinkPrefix::split("reg_Reg1").unwrap();
        assert_eq!(prefix.solver_a_class(), "TRANSFORMER.");
        assert_eq!(rest, "Reg1");
        assert!(LinkPrefix::split("LOAD_671").is_none());
        assert!(LinkPrefix::split("XF").is_none());
    }

    #[test]
    fn accessors_expose_terminal() {
        let id = EntityId::branch("TRANSFORMER.REG1", 3);
        assert_eq!(id.kind(), EntityKind::Branch);
        assert_eq!(id.ordinal(), Some(3));
        assert_eq!(id.phase(), None);
    }
}

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
// (none)

/// The pseudo-user whose permission level is unioned into every caller's
/// effective level, letting an actor owner expose an operation to anyone.
pub const WORLD: &str = "WORLD";

/// Ordered permission level. Comparison is by rank: `NONE < READ < EXECUTE
/// < UPDATE`. A grant at level `L` implies every level below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum PermissionLevel {
    None = 0,
    Read = 1,
    Execute = 2,
    Update = 3,
}

impl PermissionLevel {
    /// Parse a level from its wire representation (`"READ"`, `"UPDATE"`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NONE" => Some(Self::None),
            "READ" => Some(Self::Read),
            "EXECUTE" => Some(Self::Execute),
            "UPDATE" => Some(Self::Update),
            _ => None,
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "NONE",
            Self::Read => "READ",
            Self::Execute => "EXECUTE",
            Self::Update => "UPDATE",
        };
        write!(f, "{s}")
    }
}

impl Default for PermissionLevel {
    fn default() -> Self {
        Self::None
    }
}

/// One `(user, actor_db_id, level)` grant. The creator of an actor is
/// granted `Update` atomically with the actor's insertion (§3 invariant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    pub user: String,
    pub level: PermissionLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_spec() {
        assert!(PermissionLevel::None < PermissionLevel::Read);
        assert!(PermissionLevel::Read < PermissionLevel::Execute);
        assert!(PermissionLevel::Execute < PermissionLevel::Update);
    }

    #[test]
    fn grant_implies_lower_levels() {
        let granted = PermissionLevel::Update;
        assert!(granted >= PermissionLevel::Read);
        assert!(granted >= PermissionLevel::Execute);
    }

    #[test]
    fn parse_roundtrips_display() {
        for lvl in [
            PermissionLevel::None,
            PermissionLevel::Read,
            PermissionLevel::Execute,
            PermissionLevel::Update,
        ] {
            assert_eq!(PermissionLevel::parse(&lvl.to_string()), Some(lvl));
        }
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_eq!(PermissionLevel::parse("SUPERADMIN"), None);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(PermissionLevel::parse("read"), Some(PermissionLevel::Read));
    }
}

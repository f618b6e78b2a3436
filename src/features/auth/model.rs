use serde::{Deserialize, Serialize};
use sqlx::Type;
use utoipa::ToSchema;

/// Caller role, resolved from the bearer credential.
///
/// A closed set with exhaustive matching at every authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Citizen,
    Staff,
    Admin,
}

impl Role {
    /// Parse a role claim. The two admin spellings are equivalent; anything
    /// else is rejected rather than defaulted.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "citizen" => Some(Role::Citizen),
            "staff" => Some(Role::Staff),
            "admin" | "administrator" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Staff and admins may triage reports (status/severity changes,
    /// officer assignment).
    pub fn can_triage(&self) -> bool {
        match self {
            Role::Citizen => false,
            Role::Staff | Role::Admin => true,
        }
    }

    pub fn is_admin(&self) -> bool {
        match self {
            Role::Admin => true,
            Role::Citizen | Role::Staff => false,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Citizen => write!(f, "citizen"),
            Role::Staff => write!(f, "staff"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub role: Role,
}

impl AuthenticatedUser {
    /// Full report detail is visible to the owner and to triage roles.
    pub fn can_view_report_of(&self, owner_id: i64) -> bool {
        self.user_id == owner_id || self.role.can_triage()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        assert_eq!(Role::parse("citizen"), Some(Role::Citizen));
        assert_eq!(Role::parse("staff"), Some(Role::Staff));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
    }

    #[test]
    fn test_both_admin_spellings_are_equivalent() {
        assert_eq!(Role::parse("admin"), Role::parse("administrator"));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::parse("Admin"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_triage_rights() {
        assert!(!Role::Citizen.can_triage());
        assert!(Role::Staff.can_triage());
        assert!(Role::Admin.can_triage());
        assert!(!Role::Staff.is_admin());
        assert!(Role::Admin.is_admin());
    }

    #[test]
    fn test_report_visibility() {
        let owner = AuthenticatedUser {
            user_id: 42,
            role: Role::Citizen,
        };
        let other = AuthenticatedUser {
            user_id: 7,
            role: Role::Citizen,
        };
        let staff = AuthenticatedUser {
            user_id: 7,
            role: Role::Staff,
        };
        assert!(owner.can_view_report_of(42));
        assert!(!other.can_view_report_of(42));
        assert!(staff.can_view_report_of(42));
    }
}

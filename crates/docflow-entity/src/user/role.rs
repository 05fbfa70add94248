//! User role enumeration and the role set a user holds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use docflow_core::AppError;

/// Roles available in the workflow.
///
/// Roles are not ranked: a user holding several roles receives the union
/// of what each role allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// System administrator.
    Admin,
    /// Technical leader of a project.
    TechLeader,
    /// Author of technical deliverables.
    Designer,
    /// Client-side reviewer.
    Client,
    /// Read-only access.
    Reader,
}

impl UserRole {
    /// Every role.
    pub const ALL: [UserRole; 5] = [
        Self::Admin,
        Self::TechLeader,
        Self::Designer,
        Self::Client,
        Self::Reader,
    ];

    /// Return the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::TechLeader => "TECH_LEADER",
            Self::Designer => "DESIGNER",
            Self::Client => "CLIENT",
            Self::Reader => "READER",
        }
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::TechLeader => "Tech Leader",
            Self::Designer => "Designer",
            Self::Client => "Client",
            Self::Reader => "Reader",
        }
    }

    /// Check if this role manages projects (ADMIN or TECH_LEADER).
    pub fn is_manager(&self) -> bool {
        matches!(self, Self::Admin | Self::TechLeader)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "ADMIN" => Ok(Self::Admin),
            "TECH_LEADER" | "TECHLEADER" => Ok(Self::TechLeader),
            "DESIGNER" => Ok(Self::Designer),
            "CLIENT" => Ok(Self::Client),
            "READER" => Ok(Self::Reader),
            _ => Err(AppError::validation(format!(
                "Invalid user role: '{s}'. Expected one of: admin, tech_leader, designer, client, reader"
            ))),
        }
    }
}

/// A non-empty, duplicate-free, ordered set of roles.
///
/// The first role is the user's primary role, the one stamped on the
/// version records they author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<UserRole>", into = "Vec<UserRole>")]
pub struct RoleSet(Vec<UserRole>);

impl RoleSet {
    /// Build a role set, dropping duplicates while keeping first-seen order.
    pub fn new(roles: impl IntoIterator<Item = UserRole>) -> Result<Self, AppError> {
        let mut unique = Vec::new();
        for role in roles {
            if !unique.contains(&role) {
                unique.push(role);
            }
        }
        if unique.is_empty() {
            return Err(AppError::validation("A user must hold at least one role"));
        }
        Ok(Self(unique))
    }

    /// A set holding a single role.
    pub fn single(role: UserRole) -> Self {
        Self(vec![role])
    }

    /// The primary role.
    pub fn primary(&self) -> UserRole {
        self.0[0]
    }

    /// Whether the set contains `role`.
    pub fn contains(&self, role: UserRole) -> bool {
        self.0.contains(&role)
    }

    /// Whether the set contains any of `roles`.
    pub fn contains_any(&self, roles: &[UserRole]) -> bool {
        roles.iter().any(|r| self.contains(*r))
    }

    /// Whether the holder manages projects (ADMIN or TECH_LEADER).
    pub fn is_manager(&self) -> bool {
        self.0.iter().any(UserRole::is_manager)
    }

    /// Iterate over the roles in order.
    pub fn iter(&self) -> impl Iterator<Item = UserRole> + '_ {
        self.0.iter().copied()
    }

    /// Number of roles.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; a role set is never empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Add `role` if missing, remove it if present.
    ///
    /// Removing the last remaining role is rejected.
    pub fn toggle(&mut self, role: UserRole) -> Result<(), AppError> {
        if let Some(pos) = self.0.iter().position(|r| *r == role) {
            if self.0.len() == 1 {
                return Err(AppError::validation(
                    "Cannot remove the last role of a user",
                ));
            }
            self.0.remove(pos);
        } else {
            self.0.push(role);
        }
        Ok(())
    }
}

impl TryFrom<Vec<UserRole>> for RoleSet {
    type Error = AppError;

    fn try_from(roles: Vec<UserRole>) -> Result<Self, Self::Error> {
        Self::new(roles)
    }
}

impl From<RoleSet> for Vec<UserRole> {
    fn from(set: RoleSet) -> Self {
        set.0
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(UserRole::as_str).collect();
        write!(f, "{}", names.join(", "))
    }
}

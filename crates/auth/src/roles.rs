use serde::{Deserialize, Serialize};

/// Role granted to an identity within its shop.
///
/// Closed set with a total order: `Admin < SuperAdmin`. A SuperAdmin may do
/// everything an Admin may. Guests have no role at all (no valid token).
/// Any other string is rejected at deserialization.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::SuperAdmin => "SuperAdmin",
        }
    }

    /// True when this role meets or exceeds `required`.
    pub fn satisfies(self, required: Role) -> bool {
        self >= required
    }

    /// Only SuperAdmin may see purchase (cost) prices.
    pub fn can_see_cost_price(self) -> bool {
        self == Role::SuperAdmin
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

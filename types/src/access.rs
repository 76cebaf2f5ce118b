//! Role-based access control.
//!
//! Every component owns one [`AccessControl`]: an explicit capability map from
//! identity to the set of roles it holds. Mutating operations check the caller
//! against it before touching any state. There is no global authority; the
//! deployer of a component starts out as its only admin.

use crate::address::Address;
use crate::error::AccessDenied;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// A capability that gates a class of privileged operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Manages fees, treasuries, parameters, and role grants.
    Admin,
    /// Drives dispute status, voting sessions, reputation, and slashing.
    System,
    /// Decides appeals.
    Arbitrator,
    /// Attests that submitted evidence matches its content hash.
    Verifier,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Admin => "admin",
            Role::System => "system",
            Role::Arbitrator => "arbitrator",
            Role::Verifier => "verifier",
        };
        f.write_str(name)
    }
}

/// Capability sets keyed by identity.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AccessControl {
    grants: HashMap<Address, BTreeSet<Role>>,
}

impl AccessControl {
    /// Create a control set whose only grant is `Admin` for `admin`.
    pub fn with_admin(admin: Address) -> Self {
        let mut grants = HashMap::new();
        grants.insert(admin, BTreeSet::from([Role::Admin]));
        Self { grants }
    }

    pub fn has_role(&self, who: &Address, role: Role) -> bool {
        self.grants.get(who).is_some_and(|roles| roles.contains(&role))
    }

    /// Fail with [`AccessDenied`] unless `who` holds `role`.
    pub fn require(&self, who: &Address, role: Role) -> Result<(), AccessDenied> {
        if self.has_role(who, role) {
            Ok(())
        } else {
            Err(AccessDenied::MissingRole {
                caller: who.clone(),
                role,
            })
        }
    }

    /// Grant `role` to `grantee`. Only admins may grant.
    pub fn grant(
        &mut self,
        caller: &Address,
        role: Role,
        grantee: Address,
    ) -> Result<bool, AccessDenied> {
        self.require(caller, Role::Admin)?;
        Ok(self.grants.entry(grantee).or_default().insert(role))
    }

    /// Revoke `role` from `grantee`. Only admins may revoke.
    pub fn revoke(
        &mut self,
        caller: &Address,
        role: Role,
        grantee: &Address,
    ) -> Result<bool, AccessDenied> {
        self.require(caller, Role::Admin)?;
        let removed = match self.grants.get_mut(grantee) {
            Some(roles) => roles.remove(&role),
            None => false,
        };
        if self.grants.get(grantee).is_some_and(|roles| roles.is_empty()) {
            self.grants.remove(grantee);
        }
        Ok(removed)
    }

    /// Roles currently held by `who`.
    pub fn roles_of(&self, who: &Address) -> Vec<Role> {
        self.grants
            .get(who)
            .map(|roles| roles.iter().copied().collect())
            .unwrap_or_default()
    }
}

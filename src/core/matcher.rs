//! External principal matching
//!
//! Turns a raw assignment value from a role mapping into the target
//! descriptor a grant points at.

use super::types::{GrantTarget, MatchKey, PrincipalKind, ResourceId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Role-mapping user value meaning "all users"
pub const WILDCARD: &str = "*";

/// How mapped users are resolved by the downstream identity system
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserMatchKey {
    Email,
    #[default]
    #[serde(alias = "login")]
    Username,
    Id,
}

impl UserMatchKey {
    pub fn match_key(self) -> MatchKey {
        match self {
            UserMatchKey::Email => MatchKey::Email,
            UserMatchKey::Username => MatchKey::Username,
            UserMatchKey::Id => MatchKey::Id,
        }
    }
}

impl fmt::Display for UserMatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.match_key().as_str())
    }
}

impl FromStr for UserMatchKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(UserMatchKey::Email),
            "username" | "login" => Ok(UserMatchKey::Username),
            "id" => Ok(UserMatchKey::Id),
            other => Err(format!(
                "invalid user match key '{}': expected one of email, username, id",
                other
            )),
        }
    }
}

/// Stateless matcher configured once per connector
#[derive(Debug, Clone, Default)]
pub struct ExternalMatcher {
    user_match_key: UserMatchKey,
    internal_users: HashSet<String>,
}

impl ExternalMatcher {
    pub fn new(user_match_key: UserMatchKey) -> Self {
        Self {
            user_match_key,
            internal_users: HashSet::new(),
        }
    }

    /// Resolve mapped users naming one of `users` to the internal user resource
    pub fn with_internal_users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.internal_users = users.into_iter().map(Into::into).collect();
        self
    }

    pub fn user_match_key(&self) -> UserMatchKey {
        self.user_match_key
    }

    /// Target for a mapped user identifier
    pub fn match_user(&self, user: &str) -> GrantTarget {
        if user == WILDCARD {
            return GrantTarget::ExternalMatchAll {
                principal_kind: PrincipalKind::User,
            };
        }
        if self.internal_users.contains(user) {
            return GrantTarget::Internal {
                principal: ResourceId::user(user),
            };
        }
        GrantTarget::ExternalMatch {
            principal_kind: PrincipalKind::User,
            key: self.user_match_key.match_key(),
            value: user.to_string(),
        }
    }

    /// Target for a mapped backend role. Backend roles are always matched by
    /// name; `*` has no special meaning here.
    pub fn match_group(&self, backend_role: &str) -> GrantTarget {
        GrantTarget::ExternalMatch {
            principal_kind: PrincipalKind::Group,
            key: MatchKey::Name,
            value: backend_role.to_string(),
        }
    }
}

//! Identity types resolved by the upstream credential layer.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::HeaderMap, request::Parts},
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::AppError;

/// Role of an authenticated user.
///
/// Adding a role is a compile-time exercise: the guard matches exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Franchisee,
    Manager,
    Mechanic,
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(Role::Owner),
            "franchisee" => Ok(Role::Franchisee),
            "manager" => Ok(Role::Manager),
            "mechanic" => Ok(Role::Mechanic),
            _ => Err(()),
        }
    }
}

/// Who is asking. Immutable once derived from the request identity headers.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: Uuid,
    pub role: Role,
    /// Home franchise for `Role::Franchisee` principals.
    pub home_franchisee_id: Option<Uuid>,
}

impl Principal {
    /// Gate for owner-only operations.
    pub fn require_owner(&self) -> Result<(), AppError> {
        match self.role {
            Role::Owner => Ok(()),
            _ => Err(AppError::Forbidden),
        }
    }

    /// Gate for franchisee-only operations over the caller's own franchise.
    pub fn require_franchisee(&self, franchisee_id: Uuid) -> Result<(), AppError> {
        match (self.role, self.home_franchisee_id) {
            (Role::Franchisee, Some(home)) if home == franchisee_id => Ok(()),
            _ => Err(AppError::Forbidden),
        }
    }
}

/// Tenant fields the access guard needs.
#[derive(Debug, Clone, FromRow)]
pub struct TenantRef {
    pub id: Uuid,
    pub franchisee_id: Uuid,
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let headers = &parts.headers;

        let user_id = header_str(headers, "x-user-id")
            .and_then(|v| Uuid::parse_str(v).ok())
            .ok_or(AppError::Forbidden)?;

        // An unknown role value is indistinguishable from no rights at all.
        let role = header_str(headers, "x-user-role")
            .and_then(|v| Role::from_str(v).ok())
            .ok_or(AppError::Forbidden)?;

        let home_franchisee_id = match header_str(headers, "x-franchisee-id") {
            Some(v) => Some(Uuid::parse_str(v).map_err(|_| AppError::Forbidden)?),
            None => None,
        };

        Ok(Principal {
            user_id,
            role,
            home_franchisee_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from_str("owner"), Ok(Role::Owner));
        assert_eq!(Role::from_str("franchisee"), Ok(Role::Franchisee));
        assert_eq!(Role::from_str("manager"), Ok(Role::Manager));
        assert_eq!(Role::from_str("mechanic"), Ok(Role::Mechanic));
        assert!(Role::from_str("admin").is_err());
        assert!(Role::from_str("OWNER").is_err());
        assert!(Role::from_str("").is_err());
    }

    #[test]
    fn test_require_owner() {
        let owner = Principal {
            user_id: Uuid::new_v4(),
            role: Role::Owner,
            home_franchisee_id: None,
        };
        assert!(owner.require_owner().is_ok());

        let manager = Principal {
            role: Role::Manager,
            ..owner.clone()
        };
        assert!(matches!(manager.require_owner(), Err(AppError::Forbidden)));
    }

    #[test]
    fn test_require_franchisee_own_franchise_only() {
        let franchise = Uuid::new_v4();
        let other = Uuid::new_v4();
        let principal = Principal {
            user_id: Uuid::new_v4(),
            role: Role::Franchisee,
            home_franchisee_id: Some(franchise),
        };

        assert!(principal.require_franchisee(franchise).is_ok());
        assert!(matches!(
            principal.require_franchisee(other),
            Err(AppError::Forbidden)
        ));

        // Even the owner may not use the franchisee-scoped report endpoint.
        let owner = Principal {
            role: Role::Owner,
            home_franchisee_id: None,
            ..principal
        };
        assert!(matches!(
            owner.require_franchisee(franchise),
            Err(AppError::Forbidden)
        ));
    }
}

//! Caller identity as resolved by the authentication layer.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DispatchError, DispatchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Operator,
    Barber,
    Customer,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operator => write!(f, "OPERATOR"),
            Self::Barber => write!(f, "BARBER"),
            Self::Customer => write!(f, "CUSTOMER"),
        }
    }
}

/// An authenticated principal. For barbers `id` is the barber record id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub role: Role,
    pub is_active: bool,
}

impl Actor {
    pub fn operator(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Operator,
            is_active: true,
        }
    }

    pub fn barber(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Barber,
            is_active: true,
        }
    }

    pub fn customer(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: Role::Customer,
            is_active: true,
        }
    }
}

/// Returns the actor id when `actor` is present, active and holds `role`.
pub fn authorize(actor: Option<&Actor>, role: Role) -> DispatchResult<&str> {
    let actor = actor.ok_or_else(|| DispatchError::Unauthorized("Authentication required".to_string()))?;
    if !actor.is_active {
        return Err(DispatchError::Unauthorized(format!("Account {} is inactive", actor.id)));
    }
    if actor.role != role {
        return Err(DispatchError::Unauthorized(format!(
            "{role} access required, caller is {}",
            actor.role
        )));
    }
    Ok(&actor.id)
}

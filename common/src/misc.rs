use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of account a session or a store record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Driver,
    Passenger,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Driver => "driver",
            Role::Passenger => "passenger",
        }
    }

    /// Capitalized name used in client-facing messages.
    pub fn title(&self) -> &'static str {
        match self {
            Role::Driver => "Driver",
            Role::Passenger => "Passenger",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

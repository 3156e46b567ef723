use std::str::FromStr;

/// User roles recognized by the gateway. Stored as plain text in the
/// `users` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }
}

impl ToString for Role {
    fn to_string(&self) -> String {
        self.as_str().to_string()
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "customer" => Ok(Role::Customer),
            other => Err(format!("Invalid role '{}'", other)),
        }
    }
}

//! The demo command set: a tiny versioned auth API under `Api::AppName::V1`.

use serde::Serialize;
use serde_json::Value;
use summon::{Args, Command, Errors};

/// A session issued by [`Authenticate`].
#[derive(Debug, Serialize)]
pub struct Session {
    pub email: String,
    pub token: String,
}

/// Authenticates a user from an email and password.
///
/// Accepts named or positional arguments, so it can be dispatched from a
/// request body or a route.
pub struct Authenticate {
    email: String,
    password: String,
}

impl Command for Authenticate {
    type Output = Session;

    fn from_args(args: &Args) -> anyhow::Result<Self> {
        let email = args
            .get("email")
            .or_else(|| args.position(0))
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("missing required argument \"email\""))?;
        let password = args
            .get("password")
            .or_else(|| args.position(1))
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow::anyhow!("missing required argument \"password\""))?;
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }

    fn execute(&mut self, errors: &mut Errors) -> Option<Session> {
        if !self.email.contains('@') {
            errors.add("email", "is not a valid address");
        }
        if self.password.len() < 6 {
            errors.add("password", "is too short (minimum is 6 characters)");
        }
        if !errors.is_empty() {
            return None;
        }
        // a real implementation would check a credential store here
        Some(Session {
            email: self.email.clone(),
            token: format!("tok-{:x}", self.email.len() * 7919),
        })
    }
}

/// Registers a new account, demonstrating multi-field validation errors.
pub struct RegisterUser {
    email: String,
    password: String,
    password_confirmation: String,
}

impl Command for RegisterUser {
    type Output = String;

    fn from_args(args: &Args) -> anyhow::Result<Self> {
        let field = |name: &str| {
            args.get(name)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Ok(Self {
            email: field("email"),
            password: field("password"),
            password_confirmation: field("password_confirmation"),
        })
    }

    fn execute(&mut self, errors: &mut Errors) -> Option<String> {
        if self.email.is_empty() {
            errors.add("email", "is required");
        }
        if self.password != self.password_confirmation {
            errors.add("password_confirmation", "does not match password");
        }
        if self.password.len() < 6 {
            errors.add("password", "is too short (minimum is 6 characters)");
        }
        if !errors.is_empty() {
            return None;
        }
        Some(self.email.clone())
    }
}

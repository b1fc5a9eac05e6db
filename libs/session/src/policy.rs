//! Access policy for guarded areas.
//!
//! A guarded area declares an [`AccessRule`]. Before entering it the caller
//! asks for a [`Decision`]: allow, or redirect somewhere the current session
//! may go. Evaluation is a pure function of the identity and the rule.

use eventdesk_model::{Identity, Role};
use tracing::debug;

use crate::store::SessionStore;

pub const LOGIN_PATH: &str = "/login";
pub const ORGANIZER_HOME_PATH: &str = "/dashboard-admin";
pub const PARTICIPANT_HOME_PATH: &str = "/dashboard-participant";

/// Requirement attached to a guarded area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessRule {
    pub required_role: Option<Role>,
}

impl AccessRule {
    /// Any authenticated identity may enter.
    pub const AUTHENTICATED: AccessRule = AccessRule {
        required_role: None,
    };

    pub const fn role(role: Role) -> Self {
        Self {
            required_role: Some(role),
        }
    }
}

/// Where a denied navigation should go instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Home(Role),
}

impl Redirect {
    pub fn path(self) -> &'static str {
        match self {
            Redirect::Login => LOGIN_PATH,
            Redirect::Home(role) => home_path(role),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(Redirect),
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// Home area of a role.
pub fn home_path(role: Role) -> &'static str {
    match role {
        Role::Organizer => ORGANIZER_HOME_PATH,
        Role::Regular => PARTICIPANT_HOME_PATH,
    }
}

/// Decide whether `identity` may enter an area guarded by `rule`.
///
/// A mismatched role is sent to its own home rather than to login.
pub fn evaluate(identity: Option<&Identity>, rule: &AccessRule) -> Decision {
    let Some(identity) = identity else {
        return Decision::Redirect(Redirect::Login);
    };

    match rule.required_role {
        None => Decision::Allow,
        Some(required) if required == identity.role => Decision::Allow,
        Some(_) => Decision::Redirect(Redirect::Home(identity.role)),
    }
}

/// Evaluates rules against whatever identity the session store holds.
#[derive(Debug, Clone)]
pub struct AccessGuard {
    session: SessionStore,
}

impl AccessGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    pub fn check(&self, rule: &AccessRule) -> Decision {
        let identity = self.session.identity();
        let decision = evaluate(identity.as_ref(), rule);
        debug!(
            required_role = ?rule.required_role,
            current_role = ?identity.as_ref().map(|i| i.role),
            ?decision,
            "Evaluated access rule"
        );
        decision
    }
}

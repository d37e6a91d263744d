//! Route gate driven by the presence of a session credential.

use std::sync::Arc;

use tracing::{debug, info};

use crate::session::SessionStore;

pub const LOGIN_ROUTE: &str = "/login";
pub const DEFAULT_ROUTE: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    /// Credential not checked yet. Nothing but a loading placeholder may render.
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Loading,
    Render,
    Redirect(String),
}

pub struct SessionGuard {
    session: Arc<dyn SessionStore>,
    state: GuardState,
    active_route: Option<String>,
}

impl SessionGuard {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self {
            session,
            state: GuardState::Unknown,
            active_route: None,
        }
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    pub fn active_route(&self) -> Option<&str> {
        self.active_route.as_deref()
    }

    /// What the shell should show right now, without re-reading the session.
    pub fn decision(&self) -> GuardDecision {
        match (self.state, self.active_route.as_deref()) {
            (GuardState::Unknown, _) | (_, None) => GuardDecision::Loading,
            (state, Some(route)) => decide(state, route),
        }
    }

    /// Reads the credential for `route` and transitions accordingly.
    pub fn check(&mut self, route: &str) -> GuardDecision {
        let route = normalize_route(route);
        self.state = if self.session.credential().is_some() {
            GuardState::Authenticated
        } else {
            GuardState::Unauthenticated
        };
        let decision = decide(self.state, &route);
        match &decision {
            GuardDecision::Redirect(target) => {
                info!(from = %route, to = %target, state = ?self.state, "guard: redirecting");
            }
            _ => debug!(route = %route, state = ?self.state, "guard: access granted"),
        }
        self.active_route = Some(route);
        decision
    }

    /// Re-runs the check only when the active route actually changed.
    pub fn navigate(&mut self, route: &str) -> GuardDecision {
        let route = normalize_route(route);
        if self.state != GuardState::Unknown && self.active_route.as_deref() == Some(route.as_str())
        {
            return self.decision();
        }
        self.check(&route)
    }

    /// Follows redirects until a route renders. Returns the final route.
    pub fn resolve(&mut self, route: &str) -> String {
        let mut route = normalize_route(route);
        // Two hops at most: a redirect always lands on a route that renders
        // for the state that produced it.
        for _ in 0..2 {
            match self.check(&route) {
                GuardDecision::Redirect(target) => route = target,
                GuardDecision::Render | GuardDecision::Loading => break,
            }
        }
        route
    }
}

fn decide(state: GuardState, route: &str) -> GuardDecision {
    match state {
        GuardState::Unknown => GuardDecision::Loading,
        GuardState::Unauthenticated if route != LOGIN_ROUTE => {
            GuardDecision::Redirect(LOGIN_ROUTE.to_string())
        }
        GuardState::Authenticated if route == LOGIN_ROUTE => {
            GuardDecision::Redirect(DEFAULT_ROUTE.to_string())
        }
        GuardState::Authenticated | GuardState::Unauthenticated => GuardDecision::Render,
    }
}

pub fn normalize_route(route: &str) -> String {
    let route = route.trim();
    let route = route.split(['?', '#']).next().unwrap_or_default();
    let trimmed = route.trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_ROUTE.to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
#[path = "tests/guard_tests.rs"]
mod tests;

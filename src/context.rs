//! Request-scoped context and injectable time source.

use std::fmt;

use chrono::{
    DateTime,
    Utc,
};

use crate::culture::Culture;

/// Principal name recorded when no authenticated user is known.
pub const ANONYMOUS_PRINCIPAL: &str = "anonymous";

/// Per-request values the localizer reads instead of process-wide state.
///
/// Every concurrent request carries its own context, so the active culture never leaks between
/// requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    /// Culture the caller wants text in
    culture: Culture,
    /// Name of the acting user, stamped on seeded prompts
    principal: String,
}

impl RequestContext {
    #[must_use]
    pub fn new(culture: Culture, principal: impl Into<String>) -> Self {
        Self { culture, principal: principal.into() }
    }

    /// Context for an unauthenticated caller.
    #[must_use]
    pub fn anonymous(culture: Culture) -> Self {
        Self::new(culture, ANONYMOUS_PRINCIPAL)
    }

    /// Active culture of the request.
    #[must_use]
    pub const fn culture(&self) -> &Culture {
        &self.culture
    }

    /// Acting principal of the request.
    #[must_use]
    pub fn principal(&self) -> &str {
        &self.principal
    }
}

/// Source of the current time for provenance stamps.
pub trait Clock: fmt::Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a given instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

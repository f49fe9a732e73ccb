//! Request match rules

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::fingerprint::fingerprint_request;
use crate::message::Request;

/// Equivalence predicate between an incoming and a recorded request
///
/// Implementations must be pure: the same pair always gives the same answer.
pub trait MatchRule: Send + Sync {
    /// Whether `candidate` should be served by an interaction recorded for `recorded`
    fn is_match(&self, candidate: &Request, recorded: &Request) -> bool;
}

impl<F> MatchRule for F
where
    F: Fn(&Request, &Request) -> bool + Send + Sync,
{
    fn is_match(&self, candidate: &Request, recorded: &Request) -> bool {
        self(candidate, recorded)
    }
}

/// Match rule shared between a tape and its callers
pub type SharedMatchRule = Arc<dyn MatchRule>;

/// Wrap a closure as a shared match rule
pub fn rule_fn<F>(rule: F) -> SharedMatchRule
where
    F: Fn(&Request, &Request) -> bool + Send + Sync + 'static,
{
    Arc::new(rule)
}

/// Default rule: same method and same URL
pub fn default_match_rule() -> SharedMatchRule {
    Arc::new(ComposedMatchRule::of([MatchRules::Method, MatchRules::Uri]))
}

/// Position of the first recorded request that `candidate` matches
///
/// Scans in iteration order; the first match wins.
pub fn find_match<'a, I>(rule: &dyn MatchRule, candidate: &Request, recorded: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Request>,
{
    recorded
        .into_iter()
        .position(|existing| rule.is_match(candidate, existing))
}

/// Built-in single-aspect match rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchRules {
    /// Same HTTP method, ignoring case
    Method,
    /// Identical URL
    Uri,
    /// Same host, ignoring case
    Host,
    /// Same effective port
    Port,
    /// Same URL path, after dot-segment removal
    Path,
    /// Same decoded query parameters, in any order
    Query,
    /// Same `Authorization` header
    Authorization,
    /// Same `Accept` header
    Accept,
    /// Identical body
    Body,
    /// Same method, path, query, headers and body
    Fingerprint,
}

impl MatchRule for MatchRules {
    fn is_match(&self, candidate: &Request, recorded: &Request) -> bool {
        match self {
            Self::Method => candidate.method.eq_ignore_ascii_case(&recorded.method),
            Self::Uri => candidate.url == recorded.url,
            Self::Host => present_and_equal(candidate.host(), recorded.host()),
            Self::Port => present_and_equal(candidate.port(), recorded.port()),
            Self::Path => present_and_equal(candidate.path(), recorded.path()),
            Self::Query => present_and_equal(sorted_query(candidate), sorted_query(recorded)),
            Self::Authorization => {
                candidate.header("Authorization") == recorded.header("Authorization")
            }
            Self::Accept => candidate.header("Accept") == recorded.header("Accept"),
            Self::Body => {
                candidate.body.as_deref().unwrap_or_default()
                    == recorded.body.as_deref().unwrap_or_default()
            }
            Self::Fingerprint => fingerprint_request(candidate) == fingerprint_request(recorded),
        }
    }
}

/// URL-derived aspects only match when both URLs parse
fn present_and_equal<T: PartialEq>(a: Option<T>, b: Option<T>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn sorted_query(request: &Request) -> Option<Vec<(String, String)>> {
    let mut pairs = request.query_pairs()?;
    pairs.sort();
    Some(pairs)
}

impl fmt::Display for MatchRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Method => "method",
            Self::Uri => "uri",
            Self::Host => "host",
            Self::Port => "port",
            Self::Path => "path",
            Self::Query => "query",
            Self::Authorization => "authorization",
            Self::Accept => "accept",
            Self::Body => "body",
            Self::Fingerprint => "fingerprint",
        };
        f.write_str(name)
    }
}

/// Rule that matches only when every component rule matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMatchRule {
    rules: Vec<MatchRules>,
}

impl ComposedMatchRule {
    /// Compose the given rules
    pub fn of(rules: impl IntoIterator<Item = MatchRules>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Component rules
    pub fn rules(&self) -> &[MatchRules] {
        &self.rules
    }
}

impl MatchRule for ComposedMatchRule {
    fn is_match(&self, candidate: &Request, recorded: &Request) -> bool {
        self.rules
            .iter()
            .all(|rule| rule.is_match(candidate, recorded))
    }
}

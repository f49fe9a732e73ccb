//! Tape engine: lazy index, matching and mode-dependent playback

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::config::{LimitsConfig, ScrubConfig, TapeConfig};
use crate::fingerprint::short_id;
use crate::matching::{MatchRule, SharedMatchRule};
use crate::message::{Request, Response};
use crate::mode::TapeMode;
use crate::{Result, TapeError};

use super::index::InteractionIndex;
use super::Interaction;

/// Play and record counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TapeStats {
    /// Successful plays
    pub hits: usize,
    /// Plays that found nothing to serve
    pub misses: usize,
    /// Interactions recorded
    pub recorded: usize,
}

/// Everything guarded by the tape lock
struct TapeState {
    mode: TapeMode,
    match_rule: SharedMatchRule,
    /// Source of truth, in recording order
    interactions: Vec<Arc<Interaction>>,
    /// Derived from `interactions`; `None` until first needed
    index: Option<InteractionIndex>,
    stats: TapeStats,
}

impl TapeState {
    /// Build the index if needed and hand it out with the rule it was built with
    fn indexed(&mut self) -> (&mut InteractionIndex, &dyn MatchRule, bool) {
        let sequential = self.mode.is_sequential();
        let rule = self.match_rule.as_ref();
        let interactions = &self.interactions;
        let index = self
            .index
            .get_or_insert_with(|| InteractionIndex::build(interactions, rule, sequential));

        (index, rule, sequential)
    }
}

/// A named set of recorded HTTP interactions that can be played back or appended to
///
/// All operations take one lock for their full duration, so concurrent
/// callers on the same tape are serialized.
pub struct Tape {
    name: String,
    scrub: ScrubConfig,
    limits: LimitsConfig,
    state: Mutex<TapeState>,
}

impl Tape {
    /// Create an empty tape with default settings
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_config(name, &TapeConfig::default())
    }

    /// Create an empty tape using mode, match rules, scrub list and limits from `config`
    pub fn from_config(name: impl Into<String>, config: &TapeConfig) -> Self {
        Self {
            name: name.into(),
            scrub: config.scrub.clone(),
            limits: config.limits,
            state: Mutex::new(TapeState {
                mode: config.mode,
                match_rule: config.match_rule(),
                interactions: Vec::new(),
                index: None,
                stats: TapeStats::default(),
            }),
        }
    }

    /// Builder-style mode assignment
    #[must_use]
    pub fn with_mode(mut self, mode: TapeMode) -> Self {
        self.state_mut().mode = mode;
        self
    }

    /// Builder-style match rule assignment
    #[must_use]
    pub fn with_match_rule(mut self, rule: SharedMatchRule) -> Self {
        self.state_mut().match_rule = rule;
        self
    }

    /// Tape name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current mode
    pub fn mode(&self) -> TapeMode {
        self.lock().mode
    }

    /// Assign a new mode
    ///
    /// Switching between sequential and non-sequential modes discards the
    /// index; it is rebuilt from the recorded interactions on next use.
    pub fn set_mode(&self, mode: TapeMode) {
        let mut state = self.lock();
        if state.mode.is_sequential() != mode.is_sequential() {
            state.index = None;
        }
        state.mode = mode;
    }

    /// Current match rule
    pub fn match_rule(&self) -> SharedMatchRule {
        Arc::clone(&self.lock().match_rule)
    }

    /// Assign a new match rule; the index is rebuilt on next use
    pub fn set_match_rule(&self, rule: SharedMatchRule) {
        let mut state = self.lock();
        state.match_rule = rule;
        state.index = None;
    }

    /// Whether `play` is allowed
    pub fn is_readable(&self) -> bool {
        self.mode().is_readable()
    }

    /// Whether `record` is allowed
    pub fn is_writable(&self) -> bool {
        self.mode().is_writable()
    }

    /// Whether playback is sequential
    pub fn is_sequential(&self) -> bool {
        self.mode().is_sequential()
    }

    /// Number of recorded interactions
    pub fn size(&self) -> usize {
        self.lock().interactions.len()
    }

    /// Snapshot of the recorded interactions, in recording order
    pub fn interactions(&self) -> Vec<Arc<Interaction>> {
        self.lock().interactions.clone()
    }

    /// Replace every recorded interaction and rebuild the index
    pub fn set_interactions(&self, interactions: impl IntoIterator<Item = Interaction>) {
        let interactions: Vec<_> = interactions.into_iter().map(Arc::new).collect();

        let mut state = self.lock();
        let index = InteractionIndex::build(
            &interactions,
            state.match_rule.as_ref(),
            state.mode.is_sequential(),
        );
        state.interactions = interactions;
        state.index = Some(index);
    }

    /// Play and record counters
    pub fn stats(&self) -> TapeStats {
        self.lock().stats
    }

    /// Whether `play` would currently serve `request`
    ///
    /// Does not consume anything. Builds the index if it is not built yet.
    ///
    /// # Errors
    ///
    /// Returns `IndexInconsistency` if the matched key has no group
    pub fn seek(&self, request: &Request) -> Result<bool> {
        let mut state = self.lock();
        let (index, rule, sequential) = state.indexed();

        let Some(position) = index.find(request, rule) else {
            return Ok(false);
        };

        if sequential {
            Ok(!index.stack(position)?.is_empty())
        } else {
            Ok(true)
        }
    }

    /// Number of interactions `play` can still serve for `request`
    ///
    /// `None` when no key matches. Builds the index if it is not built yet.
    ///
    /// # Errors
    ///
    /// Returns `IndexInconsistency` if the matched key has no group
    pub fn remaining(&self, request: &Request) -> Result<Option<usize>> {
        let mut state = self.lock();
        let (index, rule, _) = state.indexed();

        index
            .find(request, rule)
            .map(|position| index.stack(position).map(|stack| stack.len()))
            .transpose()
    }

    /// Serve the recorded response for `request`
    ///
    /// Non-sequential tapes return the latest interaction recorded for the
    /// request's key and can serve it any number of times. Sequential tapes
    /// serve each recorded interaction once, in recording order.
    ///
    /// # Errors
    ///
    /// - `NotReadable` if the mode does not allow playback
    /// - `NoMatch` if no recorded request matches
    /// - `SequenceExhausted` if a sequential key has nothing left to serve
    /// - `IndexInconsistency` if the matched key has no usable group
    pub fn play(&self, request: &Request) -> Result<Response> {
        let mut guard = self.lock();

        if !guard.mode.is_readable() {
            return Err(TapeError::NotReadable {
                tape: self.name.clone(),
            });
        }

        let state = &mut *guard;
        let (index, rule, sequential) = state.indexed();

        let Some(position) = index.find(request, rule) else {
            state.stats.misses += 1;
            warn!("Tape '{}': no match for {}", self.name, request);
            return Err(TapeError::NoMatch {
                tape: self.name.clone(),
                request: request.to_string(),
            });
        };

        let stack = index.stack_mut(position)?;
        let served = if sequential {
            stack.pop()
        } else {
            stack.peek().cloned()
        };

        let Some(interaction) = served else {
            state.stats.misses += 1;
            if sequential {
                warn!("Tape '{}': sequence exhausted for {}", self.name, request);
                return Err(TapeError::SequenceExhausted {
                    tape: self.name.clone(),
                    request: request.to_string(),
                });
            }
            return Err(TapeError::IndexInconsistency(format!(
                "empty group at key position {position} on non-sequential tape '{}'",
                self.name
            )));
        };

        state.stats.hits += 1;
        debug!(
            "Tape '{}': played {} -> {} (key: {})",
            self.name,
            request,
            interaction.response.status,
            short_id(&interaction.request)
        );

        Ok(interaction.response.clone())
    }

    /// Record an interaction
    ///
    /// Scrubbed headers are removed from both sides first. Sequential tapes
    /// always append, and a built index queues the new interaction behind
    /// what is still waiting for its key, so playback progress is kept.
    /// Other tapes overwrite the last recorded interaction whose request
    /// matches, or append when none does, and rebuild the index on next use.
    ///
    /// # Errors
    ///
    /// - `NotWritable` if the mode does not allow recording
    /// - `DataTooLarge` if a body exceeds the configured limits
    pub fn record(&self, request: Request, response: Response) -> Result<()> {
        let mut guard = self.lock();

        if !guard.mode.is_writable() {
            return Err(TapeError::NotWritable {
                tape: self.name.clone(),
            });
        }

        check_size(request.body_len(), self.limits.max_request_body)?;
        check_size(response.body_len(), self.limits.max_response_body)?;

        let interaction = Arc::new(Interaction::new(
            request.without_headers(&self.scrub.request_headers),
            response.without_headers(&self.scrub.response_headers),
        ));

        let state = &mut *guard;
        let sequential = state.mode.is_sequential();
        let rule = state.match_rule.as_ref();

        // Consult the rule before storing anything
        let (existing, queued_key) = if sequential {
            let key = state
                .index
                .as_ref()
                .map(|index| index.find(&interaction.request, rule));
            (None, key)
        } else {
            let existing = state
                .interactions
                .iter()
                .rposition(|recorded| rule.is_match(&interaction.request, &recorded.request));
            (existing, None)
        };

        match existing.and_then(|position| state.interactions.get_mut(position)) {
            Some(slot) => *slot = Arc::clone(&interaction),
            None => state.interactions.push(Arc::clone(&interaction)),
        }

        debug!(
            "Tape '{}': recorded {} -> {} (key: {}, {})",
            self.name,
            interaction.request,
            interaction.response.status,
            short_id(&interaction.request),
            if existing.is_some() { "overwrite" } else { "append" }
        );

        match queued_key {
            Some(key) => {
                if let Some(index) = state.index.as_mut() {
                    index.insert_recorded(key, interaction);
                }
            }
            // Latest-wins indexes hold no playback progress
            None => state.index = None,
        }
        state.stats.recorded += 1;

        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, TapeState> {
        // No operation leaves the state half-updated
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn state_mut(&mut self) -> &mut TapeState {
        self.state.get_mut().unwrap_or_else(PoisonError::into_inner)
    }
}

fn check_size(size: usize, limit: usize) -> Result<()> {
    if size > limit {
        return Err(TapeError::DataTooLarge { size, limit });
    }
    Ok(())
}

impl Default for Tape {
    fn default() -> Self {
        Self::new(super::DEFAULT_TAPE)
    }
}

impl fmt::Display for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tape[{}]", self.name)
    }
}

impl fmt::Debug for Tape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Tape")
            .field("name", &self.name)
            .field("mode", &state.mode)
            .field("size", &state.interactions.len())
            .field("indexed", &state.index.is_some())
            .field("stats", &state.stats)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use crate::matching::{default_match_rule, rule_fn, ComposedMatchRule, MatchRules};
    use crate::message::{VIA, X_OKREPLAY};

    fn get(path: &str) -> Request {
        Request::new("GET", format!("http://api.example.com{path}"))
    }

    fn ok(body: &'static str) -> Response {
        Response::new(200).with_body(body)
    }

    fn body(response: &Response) -> &[u8] {
        response.body.as_deref().unwrap_or_default()
    }

    #[test]
    fn test_new_tape_defaults() {
        let tape = Tape::new("fresh");

        assert_eq!(tape.name(), "fresh");
        assert_eq!(tape.mode(), TapeMode::ReadWrite);
        assert_eq!(tape.size(), 0);
        assert_eq!(tape.to_string(), "Tape[fresh]");
        assert_eq!(Tape::default().name(), "default");
    }

    #[test]
    fn test_play_not_readable() {
        for mode in [TapeMode::Disabled, TapeMode::WriteOnly, TapeMode::WriteSequential] {
            let tape = Tape::new("locked").with_mode(mode);

            let err = tape.play(&get("/a")).unwrap_err();
            assert!(
                matches!(err, TapeError::NotReadable { ref tape } if tape == "locked"),
                "{mode}: {err}"
            );
        }
    }

    #[test]
    fn test_record_not_writable() {
        for mode in [TapeMode::Disabled, TapeMode::ReadOnly, TapeMode::ReadSequential] {
            let tape = Tape::new("locked").with_mode(mode);

            let err = tape.record(get("/a"), ok("1")).unwrap_err();
            assert!(matches!(err, TapeError::NotWritable { .. }), "{mode}: {err}");
            assert_eq!(tape.size(), 0);
        }
    }

    #[test]
    fn test_record_then_play_round_trip() {
        let tape = Tape::new("round-trip");
        let response = Response::new(201)
            .with_header("Content-Type", "application/json")
            .with_body("{}");

        tape.record(get("/items"), response.clone()).unwrap();

        assert_eq!(tape.play(&get("/items")).unwrap(), response);
    }

    #[test]
    fn test_latest_record_wins() {
        let tape = Tape::new("overwrite");

        tape.record(get("/a"), ok("1")).unwrap();
        tape.record(get("/a"), ok("2")).unwrap();

        assert_eq!(tape.size(), 1);
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"2");
    }

    #[test]
    fn test_non_sequential_play_is_repeatable() {
        let tape = Tape::new("repeat");
        tape.record(get("/a"), ok("1")).unwrap();

        let first = tape.play(&get("/a")).unwrap();
        let second = tape.play(&get("/a")).unwrap();

        assert_eq!(first, second);
        assert_eq!(tape.remaining(&get("/a")).unwrap(), Some(1));
    }

    #[test]
    fn test_sequential_plays_in_recording_order() {
        let tape = Tape::new("sequence").with_mode(TapeMode::ReadWriteSequential);

        tape.record(get("/a"), ok("R1")).unwrap();
        tape.record(get("/a"), ok("R2")).unwrap();
        assert_eq!(tape.size(), 2);

        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"R1");
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"R2");

        let err = tape.play(&get("/a")).unwrap_err();
        assert!(matches!(err, TapeError::SequenceExhausted { .. }), "{err}");
    }

    #[test]
    fn test_sequential_single_entry_is_playable() {
        let tape = Tape::new("single").with_mode(TapeMode::ReadWriteSequential);
        tape.record(get("/only"), ok("once")).unwrap();

        assert!(tape.seek(&get("/only")).unwrap());
        assert_eq!(body(&tape.play(&get("/only")).unwrap()), b"once");
        assert!(!tape.seek(&get("/only")).unwrap());
    }

    #[test]
    fn test_sequential_keys_are_independent() {
        let tape = Tape::new("keys").with_mode(TapeMode::ReadWriteSequential);
        tape.record(get("/a"), ok("a1")).unwrap();
        tape.record(get("/b"), ok("b1")).unwrap();
        tape.record(get("/a"), ok("a2")).unwrap();

        assert_eq!(body(&tape.play(&get("/b")).unwrap()), b"b1");
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"a1");
        assert!(tape.play(&get("/b")).is_err());
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"a2");
    }

    #[test]
    fn test_no_match() {
        let tape = Tape::new("empty");

        assert!(!tape.seek(&get("/missing")).unwrap());
        let err = tape.play(&get("/missing")).unwrap_err();
        assert!(
            matches!(err, TapeError::NoMatch { ref request, .. } if request == "GET http://api.example.com/missing"),
            "{err}"
        );
    }

    #[test]
    fn test_seek_does_not_consume() {
        let tape = Tape::new("seek").with_mode(TapeMode::ReadWriteSequential);
        tape.record(get("/a"), ok("1")).unwrap();
        tape.record(get("/a"), ok("2")).unwrap();

        for _ in 0..5 {
            assert!(tape.seek(&get("/a")).unwrap());
        }

        assert_eq!(tape.size(), 2);
        assert_eq!(tape.remaining(&get("/a")).unwrap(), Some(2));
        assert_eq!(tape.stats(), TapeStats { hits: 0, misses: 0, recorded: 2 });
    }

    #[test]
    fn test_record_scrubs_headers() {
        let tape = Tape::new("scrub");
        let request = get("/a").with_header(VIA, "1.1 proxy").with_header("Accept", "*/*");
        let response = ok("1")
            .with_header("via", "1.1 proxy")
            .with_header(X_OKREPLAY, "PLAY")
            .with_header("Content-Type", "text/plain");

        tape.record(request, response).unwrap();

        let stored = &tape.interactions()[0];
        assert_eq!(stored.request.headers, vec![("Accept".to_string(), "*/*".to_string())]);
        assert_eq!(
            stored.response.headers,
            vec![("Content-Type".to_string(), "text/plain".to_string())]
        );
    }

    #[test]
    fn test_record_after_play_keeps_sequence_progress() {
        let tape = Tape::new("interleaved").with_mode(TapeMode::ReadWriteSequential);
        tape.record(get("/a"), ok("1")).unwrap();
        tape.record(get("/a"), ok("2")).unwrap();

        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"1");

        tape.record(get("/a"), ok("3")).unwrap();
        tape.record(get("/new"), ok("n")).unwrap();

        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"2");
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"3");
        assert!(tape.play(&get("/a")).is_err());
        assert_eq!(body(&tape.play(&get("/new")).unwrap()), b"n");
    }

    #[test]
    fn test_record_after_play_non_sequential_serves_latest() {
        let tape = Tape::new("interleaved");
        tape.record(get("/a"), ok("1")).unwrap();
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"1");

        tape.record(get("/a"), ok("2")).unwrap();

        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"2");
    }

    #[test]
    fn test_record_over_loaded_duplicates_survives_rebuild() {
        let tape = Tape::new("duplicates");
        tape.set_interactions(vec![
            Interaction::new(get("/a"), ok("1")),
            Interaction::new(get("/a"), ok("2")),
        ]);

        tape.record(get("/a"), ok("3")).unwrap();
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"3");

        tape.set_match_rule(default_match_rule());

        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"3");
        assert_eq!(tape.size(), 2);
    }

    #[test]
    fn test_record_after_leaving_sequential_mode_serves_latest() {
        let tape = Tape::new("switch").with_mode(TapeMode::WriteSequential);
        tape.record(get("/a"), ok("1")).unwrap();
        tape.record(get("/a"), ok("2")).unwrap();

        tape.set_mode(TapeMode::ReadWrite);
        tape.record(get("/a"), ok("3")).unwrap();

        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"3");
        tape.set_match_rule(default_match_rule());
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"3");

        // Going back to sequential keeps the older recording first
        tape.set_mode(TapeMode::ReadWriteSequential);
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"1");
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"3");
    }

    #[test]
    fn test_panicking_rule_leaves_record_unapplied() {
        let rule = rule_fn(|candidate: &Request, recorded: &Request| {
            assert!(!candidate.url.ends_with("/boom"), "rule failure");
            candidate.url == recorded.url
        });
        let tape = Tape::new("panicky")
            .with_mode(TapeMode::ReadWriteSequential)
            .with_match_rule(rule);
        tape.record(get("/a"), ok("1")).unwrap();
        assert!(tape.seek(&get("/a")).unwrap());

        let outcome = catch_unwind(AssertUnwindSafe(|| tape.record(get("/boom"), ok("x"))));

        assert!(outcome.is_err());
        assert_eq!(tape.size(), 1);
        assert_eq!(tape.stats().recorded, 1);
        assert_eq!(tape.remaining(&get("/a")).unwrap(), Some(1));
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"1");
    }

    #[test]
    fn test_set_interactions_non_sequential_serves_latest() {
        let tape = Tape::new("loaded").with_mode(TapeMode::ReadOnly);
        tape.set_interactions(vec![
            Interaction::new(get("/a"), ok("1")),
            Interaction::new(get("/a"), ok("2")),
        ]);

        assert_eq!(tape.size(), 2);
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"2");
    }

    #[test]
    fn test_set_interactions_sequential() {
        let tape = Tape::new("loaded").with_mode(TapeMode::ReadSequential);
        tape.set_interactions(vec![
            Interaction::new(get("/a"), ok("1")),
            Interaction::new(get("/b"), ok("b")),
            Interaction::new(get("/a"), ok("2")),
        ]);

        assert_eq!(tape.remaining(&get("/a")).unwrap(), Some(2));
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"1");
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"2");
        assert!(matches!(
            tape.play(&get("/a")),
            Err(TapeError::SequenceExhausted { .. })
        ));
    }

    #[test]
    fn test_set_mode_rebuilds_index() {
        let tape = Tape::new("switch").with_mode(TapeMode::ReadOnly);
        tape.set_interactions(vec![
            Interaction::new(get("/a"), ok("1")),
            Interaction::new(get("/a"), ok("2")),
        ]);
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"2");

        tape.set_mode(TapeMode::ReadSequential);

        assert!(tape.is_sequential());
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"1");
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"2");
    }

    #[test]
    fn test_set_mode_within_family_keeps_progress() {
        let tape = Tape::new("progress").with_mode(TapeMode::ReadWriteSequential);
        tape.record(get("/a"), ok("1")).unwrap();
        tape.record(get("/a"), ok("2")).unwrap();
        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"1");

        tape.set_mode(TapeMode::ReadSequential);

        assert_eq!(body(&tape.play(&get("/a")).unwrap()), b"2");
    }

    #[test]
    fn test_set_match_rule_rebuilds_index() {
        let tape = Tape::new("rules");
        tape.record(get("/a?page=1"), ok("1")).unwrap();
        assert!(!tape.seek(&get("/a?page=2")).unwrap());

        tape.set_match_rule(Arc::new(ComposedMatchRule::of([
            MatchRules::Method,
            MatchRules::Path,
        ])));

        assert!(tape.seek(&get("/a?page=2")).unwrap());
        assert_eq!(body(&tape.play(&get("/a?page=2")).unwrap()), b"1");
    }

    #[test]
    fn test_closure_match_rule() {
        let tape = Tape::new("closure").with_match_rule(rule_fn(|candidate, recorded| {
            candidate.path() == recorded.path()
        }));
        tape.record(Request::new("POST", "http://a/x"), ok("x")).unwrap();

        assert_eq!(body(&tape.play(&Request::new("GET", "http://b/x")).unwrap()), b"x");
    }

    #[test]
    fn test_data_too_large() {
        let mut config = TapeConfig::default();
        config.limits.max_response_body = 4;
        let tape = Tape::from_config("limits", &config);

        let err = tape.record(get("/a"), ok("too long")).unwrap_err();

        assert!(matches!(err, TapeError::DataTooLarge { size: 8, limit: 4 }), "{err}");
        assert_eq!(tape.size(), 0);
        assert_eq!(tape.stats().recorded, 0);
    }

    #[test]
    fn test_stats() {
        let tape = Tape::new("stats").with_mode(TapeMode::ReadWriteSequential);
        tape.record(get("/a"), ok("1")).unwrap();

        tape.play(&get("/a")).unwrap();
        let _ = tape.play(&get("/a"));
        let _ = tape.play(&get("/b"));

        assert_eq!(tape.stats(), TapeStats { hits: 1, misses: 2, recorded: 1 });
    }

    #[test]
    fn test_from_config() {
        let mut config = TapeConfig::default();
        config.mode = TapeMode::ReadWriteSequential;
        config.match_rules = vec![MatchRules::Method, MatchRules::Path];
        config.scrub.request_headers = vec!["Authorization".to_string()];
        let tape = Tape::from_config("configured", &config);

        tape.record(
            get("/a?x=1").with_header("Authorization", "secret"),
            ok("1"),
        )
        .unwrap();

        assert!(tape.is_sequential());
        assert!(tape.interactions()[0].request.headers.is_empty());
        assert!(tape.seek(&get("/a?x=2")).unwrap());
    }
}

//! Registry of named tapes

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::info;

use crate::config::TapeConfig;
use crate::{Result, TapeError};

use super::{Interaction, Tape};

/// Named tapes created from one configuration
pub struct TapeRegistry {
    tapes: DashMap<String, Arc<Tape>>,
    /// Slots taken against `limits.max_tapes`
    reserved: AtomicUsize,
    config: TapeConfig,
}

impl TapeRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new(config: TapeConfig) -> Self {
        Self {
            tapes: DashMap::new(),
            reserved: AtomicUsize::new(0),
            config,
        }
    }

    /// Configuration applied to new tapes
    pub fn config(&self) -> &TapeConfig {
        &self.config
    }

    /// Get a tape, creating an empty one if needed
    ///
    /// # Errors
    ///
    /// Returns error if the name is invalid or the tape limit is reached
    pub fn get_or_create(&self, name: &str) -> Result<Arc<Tape>> {
        if let Some(tape) = self.tapes.get(name) {
            return Ok(Arc::clone(&tape));
        }

        validate_tape_name(name)?;

        match self.tapes.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(Arc::clone(entry.get())),
            Entry::Vacant(entry) => {
                self.reserve_slot()?;
                info!("Inserting tape '{}' (mode: {})", name, self.config.mode);
                let tape = Arc::new(Tape::from_config(name, &self.config));
                entry.insert(Arc::clone(&tape));
                Ok(tape)
            }
        }
    }

    fn reserve_slot(&self) -> Result<()> {
        let limit = self.config.limits.max_tapes;
        self.reserved
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |taken| {
                (taken < limit).then_some(taken + 1)
            })
            .map(|_| ())
            .map_err(|_| TapeError::TapeLimitReached(limit))
    }

    /// Load interactions into a tape, creating it if needed
    ///
    /// # Errors
    ///
    /// Returns error if the tape cannot be created
    pub fn load(
        &self,
        name: &str,
        interactions: impl IntoIterator<Item = Interaction>,
    ) -> Result<Arc<Tape>> {
        let tape = self.get_or_create(name)?;
        tape.set_interactions(interactions);
        info!("Loaded tape '{}': {} interactions", name, tape.size());
        Ok(tape)
    }

    /// Get an existing tape
    pub fn get(&self, name: &str) -> Option<Arc<Tape>> {
        self.tapes.get(name).map(|tape| Arc::clone(&tape))
    }

    /// Remove a tape, handing it back to the caller
    pub fn eject(&self, name: &str) -> Option<Arc<Tape>> {
        let (_, tape) = self.tapes.remove(name)?;
        self.reserved.fetch_sub(1, Ordering::AcqRel);
        info!(
            "Ejected tape '{}': {} interactions, {:?}",
            name,
            tape.size(),
            tape.stats()
        );
        Some(tape)
    }

    /// Names of all tapes, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tapes.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of tapes
    pub fn len(&self) -> usize {
        self.tapes.len()
    }

    /// Whether the registry holds no tapes
    pub fn is_empty(&self) -> bool {
        self.tapes.is_empty()
    }
}

impl Default for TapeRegistry {
    fn default() -> Self {
        Self::new(TapeConfig::default())
    }
}

/// Validate a tape name
///
/// # Errors
///
/// Returns error if tape name is invalid
pub fn validate_tape_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(TapeError::InvalidTapeName(
            "Tape name cannot be empty".to_string(),
        ));
    }

    if name.len() > 255 {
        return Err(TapeError::InvalidTapeName(format!(
            "Tape name too long: {} > 255",
            name.len()
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(TapeError::InvalidTapeName(
            "Tape name cannot contain path separators".to_string(),
        ));
    }

    if name.starts_with('.') {
        return Err(TapeError::InvalidTapeName(
            "Tape name cannot start with dot".to_string(),
        ));
    }

    if name.contains('\0') {
        return Err(TapeError::InvalidTapeName(
            "Tape name cannot contain null bytes".to_string(),
        ));
    }

    if name.contains("..") {
        return Err(TapeError::InvalidTapeName(
            "Tape name cannot contain '..'".to_string(),
        ));
    }

    Ok(())
}

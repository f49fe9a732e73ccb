//! Tapedeck - record/replay tapes of HTTP interactions for deterministic tests
//!
//! A [`Tape`] holds recorded request/response pairs. Tests record real
//! traffic once, then replay the matching responses without touching the
//! network.
//!
//! ```
//! use tapedeck::{Request, Response, Tape, TapeMode};
//!
//! let tape = Tape::new("example").with_mode(TapeMode::ReadWriteSequential);
//! let request = Request::new("GET", "http://api.example.com/jobs/1");
//!
//! tape.record(request.clone(), Response::new(202).with_body("queued"))?;
//! tape.record(request.clone(), Response::new(200).with_body("done"))?;
//!
//! assert_eq!(tape.play(&request)?.status, 202);
//! assert_eq!(tape.play(&request)?.status, 200);
//! assert!(tape.play(&request).is_err());
//! # Ok::<(), tapedeck::TapeError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, clippy::all, clippy::pedantic, clippy::cargo)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::field_reassign_with_default,
    clippy::multiple_crate_versions
)]

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod matching;
pub mod message;
pub mod mode;
pub mod tape;

pub use config::TapeConfig;
pub use error::{Result, TapeError};
pub use matching::{rule_fn, ComposedMatchRule, MatchRule, MatchRules, SharedMatchRule};
pub use message::{Request, Response};
pub use mode::TapeMode;
pub use tape::{Interaction, Tape, TapeRegistry, TapeStats};

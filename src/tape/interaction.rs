//! Recorded request/response pairs

use std::time::SystemTime;

use crate::message::{Request, Response};

/// One recorded request/response pair
///
/// Interactions are never modified after creation. A tape replaces or
/// accumulates them, and shares them between its log and its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    /// When the interaction was recorded
    pub recorded_at: SystemTime,
    /// Request as stored
    pub request: Request,
    /// Response as stored
    pub response: Response,
}

impl Interaction {
    /// Create an interaction stamped with the current time
    pub fn new(request: Request, response: Response) -> Self {
        Self::recorded_at(SystemTime::now(), request, response)
    }

    /// Create an interaction with an explicit timestamp
    pub fn recorded_at(recorded_at: SystemTime, request: Request, response: Response) -> Self {
        Self {
            recorded_at,
            request,
            response,
        }
    }
}

//! Tape modes

use std::fmt;

use serde::{Deserialize, Serialize};

/// Read/write permissions of a tape
///
/// Each mode is a fixed combination of three flags: readable, writable
/// and sequential. Modes never change on their own; callers assign them
/// through [`Tape::set_mode`](crate::tape::Tape::set_mode).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TapeMode {
    /// Neither readable nor writable
    Disabled,
    /// Replay only
    ReadOnly,
    /// Record only
    WriteOnly,
    /// Replay recorded interactions, record new ones
    #[default]
    ReadWrite,
    /// Replay each recorded interaction once, in recording order
    ReadSequential,
    /// Record every interaction, keeping duplicates in order
    WriteSequential,
    /// Sequential replay and recording
    ReadWriteSequential,
}

impl TapeMode {
    /// All modes, in declaration order
    pub const ALL: [Self; 7] = [
        Self::Disabled,
        Self::ReadOnly,
        Self::WriteOnly,
        Self::ReadWrite,
        Self::ReadSequential,
        Self::WriteSequential,
        Self::ReadWriteSequential,
    ];

    /// Whether `play` is allowed
    #[must_use]
    pub const fn is_readable(self) -> bool {
        matches!(
            self,
            Self::ReadOnly | Self::ReadWrite | Self::ReadSequential | Self::ReadWriteSequential
        )
    }

    /// Whether `record` is allowed
    #[must_use]
    pub const fn is_writable(self) -> bool {
        matches!(
            self,
            Self::WriteOnly | Self::ReadWrite | Self::WriteSequential | Self::ReadWriteSequential
        )
    }

    /// Whether interactions are consumed in recording order
    #[must_use]
    pub const fn is_sequential(self) -> bool {
        matches!(
            self,
            Self::ReadSequential | Self::WriteSequential | Self::ReadWriteSequential
        )
    }

    /// Configuration name of the mode
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::ReadOnly => "read-only",
            Self::WriteOnly => "write-only",
            Self::ReadWrite => "read-write",
            Self::ReadSequential => "read-sequential",
            Self::WriteSequential => "write-sequential",
            Self::ReadWriteSequential => "read-write-sequential",
        }
    }
}

impl fmt::Display for TapeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

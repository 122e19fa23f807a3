// Copyright (c) 2024 Botho Foundation

//! Error types for raffle draws.

use displaydoc::Display;
use thiserror::Error;

/// Errors that can occur while running a raffle.
#[derive(Clone, Debug, Display, Error, PartialEq, Eq)]
pub enum DrawError {
    /// Duplicate item name: {0}
    DuplicateItem(String),

    /// Unknown participant: {0}
    UnknownParticipant(String),

    /// No winner selected for item {0} despite eligible participants
    NoWinnerSelected(String),
}

use std::fmt;

/// Lifecycle of a single ask request. Failures while retrieving or composing
/// go straight back to `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionPhase {
    Idle,
    AwaitingQuestion,
    Retrieving,
    Composing,
    AppendingTurn,
}

impl InteractionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionPhase::Idle => "IDLE",
            InteractionPhase::AwaitingQuestion => "AWAITING_QUESTION",
            InteractionPhase::Retrieving => "RETRIEVING",
            InteractionPhase::Composing => "COMPOSING",
            InteractionPhase::AppendingTurn => "APPENDING_TURN",
        }
    }

    /// Successor on the success path.
    pub fn next(&self) -> Self {
        match self {
            InteractionPhase::Idle => InteractionPhase::AwaitingQuestion,
            InteractionPhase::AwaitingQuestion => InteractionPhase::Retrieving,
            InteractionPhase::Retrieving => InteractionPhase::Composing,
            InteractionPhase::Composing => InteractionPhase::AppendingTurn,
            InteractionPhase::AppendingTurn => InteractionPhase::Idle,
        }
    }
}

impl fmt::Display for InteractionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

//! Connectivity change signal.

/// Signal that connectivity may have changed.
///
/// Carries no payload: receivers re-read interface state rather than
/// trusting anything the source observed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeEvent;

//! Contracts with the session collaborator.

use crate::Flash;

/// An ordered list of pending flashes that is read once, then cleared.
pub trait FlashSource {
    /// Take every pending flash in insertion order, leaving none behind.
    fn take_flashes(&mut self) -> Vec<Flash>;
}

impl FlashSource for Vec<Flash> {
    fn take_flashes(&mut self) -> Vec<Flash> {
        std::mem::take(self)
    }
}

//! Concurrency guard for run-to-completion turn processing.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::AiError;

/// Clears the `busy` flag on drop, so an abandoned or cancelled turn cannot
/// wedge the session.
pub(super) struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    /// Attempt to acquire the busy flag. Fails when a turn is already in
    /// flight on this session.
    pub(super) fn acquire(flag: &'a AtomicBool) -> Result<Self, AiError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(AiError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_while_held() {
        let flag = AtomicBool::new(false);
        let _guard = BusyGuard::acquire(&flag).unwrap();
        assert!(matches!(BusyGuard::acquire(&flag), Err(AiError::Busy)));
    }

    #[test]
    fn drop_releases_the_flag() {
        let flag = AtomicBool::new(false);
        drop(BusyGuard::acquire(&flag).unwrap());
        assert!(BusyGuard::acquire(&flag).is_ok());
    }
}

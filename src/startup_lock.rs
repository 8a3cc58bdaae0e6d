use super::*;

#[derive(ThisError, Debug, Copy, Clone, PartialEq, Eq)]
#[error("Already started")]
pub struct StartupLockAlreadyStartedError;

/// RAII-style lock for a one-time startup operation
/// Must call 'success()' on this lock to report a successful startup
/// Dropping this lock without calling 'success()' first indicates a failed
/// startup, which may be retried
#[derive(Debug)]
pub struct StartupLockGuard<'a> {
    guard: RwLockWriteGuard<'a, bool>,
}

impl<'a> StartupLockGuard<'a> {
    /// Call this function at the end of a successful startup
    /// operation to switch the state of the StartupLock.
    pub fn success(mut self) {
        *self.guard = true;
    }
}

/// Tracks whether a region of code has been started up.
/// Guarantees that the startup can only succeed once per lock; a startup in
/// progress blocks concurrent attempts, and a failed startup leaves the lock
/// in the not-started state. Usable as a `static`.
#[derive(Debug)]
pub struct StartupLock {
    startup_state: RwLock<bool>,
}

impl StartupLock {
    pub const fn new() -> Self {
        Self {
            startup_state: const_rwlock(false),
        }
    }

    /// Start up if things are not already started up
    /// One must call 'success()' on the returned startup lock guard if startup was successful
    /// otherwise the startup lock will not shift to the 'started' state.
    pub fn startup(&self) -> Result<StartupLockGuard, StartupLockAlreadyStartedError> {
        let guard = self
            .startup_state
            .try_write()
            .ok_or(StartupLockAlreadyStartedError)?;
        if *guard {
            return Err(StartupLockAlreadyStartedError);
        }
        Ok(StartupLockGuard { guard })
    }

    /// Like [`StartupLock::startup`], but waits out a startup already in
    /// progress instead of failing. Fails only if that startup succeeded.
    pub fn startup_wait(&self) -> Result<StartupLockGuard, StartupLockAlreadyStartedError> {
        let guard = self.startup_state.write();
        if *guard {
            return Err(StartupLockAlreadyStartedError);
        }
        Ok(StartupLockGuard { guard })
    }

    /// Check if this StartupLock is currently in a started state
    /// Returns false is the state is in transition
    pub fn is_started(&self) -> bool {
        let Some(guard) = self.startup_state.try_read() else {
            return false;
        };
        *guard
    }
}

impl Default for StartupLock {
    fn default() -> Self {
        Self::new()
    }
}

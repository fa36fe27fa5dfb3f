use std::ops::{Deref, DerefMut};

use crate::data_handling::Dataset;
use crate::models::Machine;

/// Scoped lock on a machine for the duration of one evaluation.
///
/// Unlocks on drop only if this guard acquired the lock, so a machine the
/// caller locked beforehand stays locked and a machine locked here is
/// released on every exit path, including early returns with an error.
pub(crate) struct LockGuard<'m, M: Machine + ?Sized> {
    machine: &'m mut M,
    owns_lock: bool,
}

impl<'m, M: Machine + ?Sized> LockGuard<'m, M> {
    pub(crate) fn acquire(machine: &'m mut M, data: &Dataset, autolock: bool) -> Self {
        if machine.is_locked() {
            log::debug!(
                "{} arrived locked; leaving the lock to its owner",
                machine.name()
            );
            return LockGuard {
                machine,
                owns_lock: false,
            };
        }

        let mut owns_lock = false;
        if autolock && machine.supports_locking() {
            if let Some(features) = data.features() {
                match machine.lock(features, data.labels()) {
                    Ok(()) => {
                        log::debug!("Locked {} for evaluation", machine.name());
                        owns_lock = true;
                    }
                    Err(e) => log::warn!(
                        "Failed to lock {}, evaluating without locking: {:#}",
                        machine.name(),
                        e
                    ),
                }
            }
        }

        LockGuard { machine, owns_lock }
    }

    pub(crate) fn owns_lock(&self) -> bool {
        self.owns_lock
    }
}

impl<M: Machine + ?Sized> Deref for LockGuard<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        self.machine
    }
}

impl<M: Machine + ?Sized> DerefMut for LockGuard<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        self.machine
    }
}

impl<M: Machine + ?Sized> Drop for LockGuard<'_, M> {
    fn drop(&mut self) {
        if self.owns_lock {
            self.machine.unlock();
            log::debug!("Unlocked {}", self.machine.name());
        }
    }
}

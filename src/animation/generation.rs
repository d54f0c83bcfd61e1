// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generation counter for cooperative cancellation.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic animation generation plus the generation owning the device.
///
/// Every [`begin`](Self::begin) claims the device for a fresh generation.
/// A run holds on to its [`Lease`] and checks [`Lease::is_current`] before
/// each write; once a newer run has begun the check fails and the old run
/// stops.
///
/// The device is animating while an owner is recorded. Only the owner can
/// release it, so a superseded run never clears the flag of its successor.
///
/// # Examples
///
/// ```
/// use wled_slide::animation::GenerationCounter;
///
/// let counter = GenerationCounter::new();
/// let first = counter.begin();
/// assert!(counter.is_animating());
///
/// let second = counter.begin();
/// assert!(!first.is_current());
///
/// drop(first);
/// assert!(counter.is_animating());
///
/// drop(second);
/// assert!(!counter.is_animating());
/// ```
#[derive(Debug, Default)]
pub struct GenerationCounter {
    current: AtomicU64,
    // 0 means idle; generations start at 1
    owner: AtomicU64,
}

impl GenerationCounter {
    /// Creates an idle counter at generation 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation and marks the device as animating.
    #[must_use = "dropping the lease ends the animation immediately"]
    pub fn begin(&self) -> Lease<'_> {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.owner.fetch_max(generation, Ordering::SeqCst);
        Lease {
            counter: self,
            generation,
        }
    }

    /// Returns the latest generation.
    #[must_use]
    pub fn current(&self) -> u64 {
        self.current.load(Ordering::SeqCst)
    }

    /// Returns `true` if `generation` is the latest one.
    #[must_use]
    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }

    /// Returns `true` while a run owns the device.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.owner.load(Ordering::SeqCst) != 0
    }

    /// Releases the device if `generation` still owns it.
    ///
    /// Returns `true` if the animating flag was cleared.
    pub fn finish(&self, generation: u64) -> bool {
        self.owner
            .compare_exchange(generation, 0, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Orphans any run in flight and clears the animating flag.
    ///
    /// Used when the device is removed; the in-flight loop observes a stale
    /// generation at its next checkpoint and exits without writing.
    pub fn retire(&self) -> u64 {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.owner.store(0, Ordering::SeqCst);
        generation
    }
}

/// A claim on the device for one generation.
///
/// Dropping the lease calls [`GenerationCounter::finish`], so the animating
/// flag is released on every exit path, including a cancelled future.
#[derive(Debug)]
pub struct Lease<'a> {
    counter: &'a GenerationCounter,
    generation: u64,
}

impl Lease<'_> {
    /// Returns the generation of this run.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns `true` if no newer run has begun.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.counter.is_current(self.generation)
    }
}

impl Drop for Lease<'_> {
    fn drop(&mut self) {
        self.counter.finish(self.generation);
    }
}

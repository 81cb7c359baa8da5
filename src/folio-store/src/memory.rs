//! Memory accounting for record collections.
//!
//! Every collection draws the bytes it owns (record slots plus title buffers)
//! from a [`MemoryManager`]. A refused reservation surfaces as
//! `AllocationError`, the same way a failed allocator request does.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common_error::{FolioError, FolioResult};

/// Memory manager for tracking and limiting memory usage.
pub trait MemoryManager: Send + Sync + std::fmt::Debug {
    /// Reserve memory. Returns `AllocationError` if the limit is exceeded.
    fn reserve(&self, bytes: usize) -> FolioResult<()>;

    /// Release previously reserved memory.
    fn release(&self, bytes: usize);

    /// Get current memory usage.
    fn used(&self) -> usize;

    /// Get memory limit (None = unlimited).
    fn limit(&self) -> Option<usize>;

    /// Get available memory (limit - used, or usize::MAX if unlimited).
    fn available(&self) -> usize {
        match self.limit() {
            Some(limit) => limit.saturating_sub(self.used()),
            None => usize::MAX,
        }
    }
}

/// No-op memory manager for unlimited memory.
#[derive(Debug, Default)]
pub struct NoopMemoryManager;

impl NoopMemoryManager {
    /// Create a new no-op memory manager.
    pub fn new() -> Self {
        Self
    }
}

impl MemoryManager for NoopMemoryManager {
    fn reserve(&self, _bytes: usize) -> FolioResult<()> {
        Ok(())
    }

    fn release(&self, _bytes: usize) {}

    fn used(&self) -> usize {
        0
    }

    fn limit(&self) -> Option<usize> {
        None
    }
}

/// Tracking memory manager with limit enforcement.
#[derive(Debug)]
pub struct TrackingMemoryManager {
    /// Current memory usage.
    used: AtomicUsize,
    /// Memory limit (None = unlimited).
    limit: Option<usize>,
}

impl TrackingMemoryManager {
    /// Create a new tracking memory manager.
    ///
    /// # Arguments
    ///
    /// * `limit` - Memory limit in bytes. A zero limit refuses every
    ///   non-empty reservation.
    pub fn new(limit: usize) -> Self {
        Self::with_limit(Some(limit))
    }

    /// Create an unlimited tracking memory manager (for accounting only).
    pub fn unlimited() -> Self {
        Self::with_limit(None)
    }

    /// Create a manager with an optional limit (None = unlimited).
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            used: AtomicUsize::new(0),
            limit,
        }
    }
}

impl Default for TrackingMemoryManager {
    fn default() -> Self {
        Self::unlimited()
    }
}

impl MemoryManager for TrackingMemoryManager {
    fn reserve(&self, bytes: usize) -> FolioResult<()> {
        if bytes == 0 {
            return Ok(());
        }

        let mut current = self.used.load(Ordering::Relaxed);
        loop {
            let new = current.saturating_add(bytes);

            if let Some(limit) = self.limit.filter(|&limit| new > limit) {
                return Err(FolioError::allocation(format!(
                    "memory limit exceeded: {} + {} > {} bytes",
                    current, bytes, limit
                )));
            }

            match self
                .used
                .compare_exchange_weak(current, new, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return Ok(()),
                Err(actual) => current = actual,
            }
        }
    }

    fn release(&self, bytes: usize) {
        if bytes == 0 {
            return;
        }

        // Saturating so a stray double release cannot wrap the counter.
        let mut current = self.used.load(Ordering::Relaxed);
        loop {
            let new = current.saturating_sub(bytes);
            match self
                .used
                .compare_exchange_weak(current, new, Ordering::SeqCst, Ordering::Relaxed)
            {
                Ok(_) => return,
                Err(actual) => current = actual,
            }
        }
    }

    fn used(&self) -> usize {
        self.used.load(Ordering::SeqCst)
    }

    fn limit(&self) -> Option<usize> {
        self.limit
    }
}

/// Tracking manager that refuses exactly one reservation.
///
/// Reservation calls are numbered from 1, zero-byte calls included. The call
/// numbered `fail_on` returns `AllocationError`; all others go through to an
/// unlimited [`TrackingMemoryManager`], so `used()` still reports leaks.
#[derive(Debug)]
pub struct FailingMemoryManager {
    inner: TrackingMemoryManager,
    fail_on: usize,
    calls: AtomicUsize,
}

impl FailingMemoryManager {
    /// Fail the `fail_on`-th reservation (1-based).
    pub fn fail_on(fail_on: usize) -> Self {
        Self {
            inner: TrackingMemoryManager::unlimited(),
            fail_on,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of reservations attempted so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MemoryManager for FailingMemoryManager {
    fn reserve(&self, bytes: usize) -> FolioResult<()> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(FolioError::allocation(format!(
                "simulated failure on reservation {call} ({bytes} bytes)"
            )));
        }
        self.inner.reserve(bytes)
    }

    fn release(&self, bytes: usize) {
        self.inner.release(bytes);
    }

    fn used(&self) -> usize {
        self.inner.used()
    }

    fn limit(&self) -> Option<usize> {
        self.inner.limit()
    }
}

/// RAII guard for memory reservations.
///
/// Automatically releases memory when dropped.
#[derive(Debug)]
pub struct MemoryReservation {
    manager: Arc<dyn MemoryManager>,
    bytes: usize,
}

impl MemoryReservation {
    /// Create a new memory reservation.
    pub fn try_new(manager: Arc<dyn MemoryManager>, bytes: usize) -> FolioResult<Self> {
        manager.reserve(bytes)?;
        Ok(Self { manager, bytes })
    }

    /// Get the reserved size.
    pub fn size(&self) -> usize {
        self.bytes
    }

    /// Grow the reservation by additional bytes.
    pub fn grow(&mut self, additional: usize) -> FolioResult<()> {
        self.manager.reserve(additional)?;
        self.bytes += additional;
        Ok(())
    }

    /// Release all reserved memory without waiting for drop.
    pub fn free(mut self) {
        self.manager.release(self.bytes);
        self.bytes = 0;
    }
}

impl Drop for MemoryReservation {
    fn drop(&mut self) {
        if self.bytes > 0 {
            self.manager.release(self.bytes);
        }
    }
}

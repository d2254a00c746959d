use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use sqd_model::Fingerprint;
use sqd_reconcile::{Solver, SolverInput};
use tokio::sync::Semaphore;

fn fingerprint_of(input: &SolverInput) -> Fingerprint {
    Fingerprint::new(input.mission.id, input.variant)
}

/// Completes immediately with the input's fingerprint.
#[derive(Debug, Default)]
pub struct InstantSolver {
    calls: AtomicUsize,
}

impl InstantSolver {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Solver for InstantSolver {
    type Output = Fingerprint;

    async fn calculate(&self, input: SolverInput) -> Fingerprint {
        self.calls.fetch_add(1, Ordering::SeqCst);
        fingerprint_of(&input)
    }
}

/// Every computation blocks until the test releases a permit, so tests
/// control exactly when each one completes.
#[derive(Debug)]
pub struct GatedSolver {
    gate: Semaphore,
    calls: AtomicUsize,
    started: Mutex<Vec<Fingerprint>>,
}

impl Default for GatedSolver {
    fn default() -> Self {
        Self {
            gate: Semaphore::new(0),
            calls: AtomicUsize::new(0),
            started: Mutex::new(Vec::new()),
        }
    }
}

impl GatedSolver {
    /// Let `n` waiting (or future) computations finish.
    pub fn release(&self, n: usize) {
        self.gate.add_permits(n);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Fingerprints in the order their computations started.
    pub fn started(&self) -> Vec<Fingerprint> {
        self.started.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Solver for GatedSolver {
    type Output = Fingerprint;

    async fn calculate(&self, input: SolverInput) -> Fingerprint {
        let fp = fingerprint_of(&input);
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut started) = self.started.lock() {
            started.push(fp);
        }
        if let Ok(permit) = self.gate.acquire().await {
            permit.forget();
        }
        fp
    }
}

/// Panics inside the worker; the handle ends up `Lost`.
#[derive(Debug, Default)]
pub struct PanickingSolver {
    calls: AtomicUsize,
}

impl PanickingSolver {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Solver for PanickingSolver {
    type Output = Fingerprint;

    async fn calculate(&self, input: SolverInput) -> Fingerprint {
        self.calls.fetch_add(1, Ordering::SeqCst);
        panic!("solver failure for {}", fingerprint_of(&input));
    }
}

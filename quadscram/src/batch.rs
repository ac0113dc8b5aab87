//! Data-parallel execution of many independent scrambler instances.
//!
//! State lives in parallel arrays, one lane vector per register index, so
//! each phase of the cycle runs as a uniform pass over the lanes. Instances
//! never read or write each other's state; a batch of N produces exactly
//! what N scalar [`Scrambler`](crate::scrambler::Scrambler)s would.

use thiserror::Error;

use crate::control::{advance_selection, CtrlSignals, LfsrIndex};
use crate::feedback::{Feedback, TapWiring};
use crate::scrambler::DEFAULT_SEED;

/// Error when constructing a [`BatchScrambler`] with no instances.
#[derive(Copy, Clone, Debug, Error)]
#[error("batch requires at least one instance")]
pub struct BatchSizeError;

/// Error when a batch tick receives a slice that does not match the batch
/// width.
#[derive(Copy, Clone, Debug, Error)]
#[error("expected {expected} elements per lane, got {got}")]
pub struct LengthMismatch {
    /// Number of instances in the batch.
    pub expected: usize,
    /// Length of the offending slice.
    pub got: usize,
}

/// N independent scrambler instances advanced in lockstep, using the
/// tap-driven register update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchScrambler {
    regs: [Vec<u32>; 4],
    sel: Vec<LfsrIndex>,
    latch: Vec<LfsrIndex>,
    seed: u32,
}

impl BatchScrambler {
    /// Create `n` instances seeded with the reference key.
    pub fn new(n: usize) -> Result<Self, BatchSizeError> {
        Self::with_seed(n, DEFAULT_SEED)
    }

    /// Create `n` instances that seed their registers from `seed`.
    pub fn with_seed(n: usize, seed: u32) -> Result<Self, BatchSizeError> {
        if n == 0 {
            return Err(BatchSizeError);
        }
        Ok(BatchScrambler {
            regs: [vec![seed; n], vec![seed; n], vec![seed; n], vec![seed; n]],
            sel: vec![LfsrIndex::L0; n],
            latch: vec![LfsrIndex::L0; n],
            seed,
        })
    }

    /// Number of instances in the batch.
    pub fn len(&self) -> usize {
        self.sel.len()
    }

    /// Registers of instance `i`, gathered across the lanes.
    pub fn registers(&self, i: usize) -> [u32; 4] {
        [
            self.regs[0][i],
            self.regs[1][i],
            self.regs[2][i],
            self.regs[3][i],
        ]
    }

    /// Selector of instance `i`.
    pub fn selector(&self, i: usize) -> LfsrIndex {
        self.sel[i]
    }

    /// Enable latch of instance `i`.
    pub fn enable_latch(&self, i: usize) -> LfsrIndex {
        self.latch[i]
    }

    fn check_len(&self, got: usize) -> Result<(), LengthMismatch> {
        if got == self.len() {
            Ok(())
        } else {
            Err(LengthMismatch {
                expected: self.len(),
                got,
            })
        }
    }

    /// Advance every instance one clock cycle.
    ///
    /// Each slice must be exactly as long as the batch; lengths are checked
    /// before any state is touched, so a mismatch updates nothing.
    pub fn tick(
        &mut self,
        ctrl: &[CtrlSignals],
        data_in: &[u32],
        data_out: &mut [u32],
    ) -> Result<(), LengthMismatch> {
        self.check_len(ctrl.len())?;
        self.check_len(data_in.len())?;
        self.check_len(data_out.len())?;

        // combinational output for every instance
        for i in 0..self.len() {
            data_out[i] = if ctrl[i].contains(CtrlSignals::ENCODE_EN) {
                data_in[i] ^ self.regs[self.sel[i].index()][i]
            } else {
                data_in[i]
            };
        }

        // selection update, elementwise
        for i in 0..self.len() {
            let sampled = LfsrIndex::from_sampled(data_out[i]);
            let (sel, latch) = advance_selection(self.sel[i], self.latch[i], ctrl[i], sampled);
            self.sel[i] = sel;
            self.latch[i] = latch;
        }

        // reseed exactly the instances whose own ctrl asserts reset/init
        for i in 0..self.len() {
            if ctrl[i].seeding() {
                for lane in &mut self.regs {
                    lane[i] = self.seed;
                }
            }
        }

        // advance the selected register of every running instance; grouping
        // by register index keeps the inner loop's wiring uniform
        for index in LfsrIndex::ALL {
            let lane = &mut self.regs[index.index()];
            for i in 0..lane.len() {
                if self.sel[i] == index && !ctrl[i].seeding() {
                    lane[i] = TapWiring::step(index, lane[i]);
                }
            }
        }

        Ok(())
    }
}

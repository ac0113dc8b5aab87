//! The scalar scrambler engine: four registers, a selector, and the clocked
//! `tick` that masks one data word per cycle.

use std::marker::PhantomData;

use log::trace;

use crate::control::{advance_selection, CtrlSignals, LfsrIndex, SelectorSource};
use crate::feedback::{Feedback, TapWiring};

/// Value every register is reseeded to unless a different seed is
/// configured.
pub const DEFAULT_SEED: u32 = 0x9a8b_3c6d;

/// One scrambler instance.
///
/// `F` selects the register-update formulation. The formulations are
/// step-equivalent, so the type parameter defaults to the table-driven one;
/// the hardware-literal wiring is mostly useful for cross-checking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scrambler<F: Feedback = TapWiring> {
    regs: [u32; 4],
    sel: LfsrIndex,
    latch: LfsrIndex,
    seed: u32,
    source: SelectorSource,
    _feedback: PhantomData<F>,
}

impl Scrambler {
    /// Create a scrambler with the reference seed and the tap-driven update.
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl<F: Feedback> Default for Scrambler<F> {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl<F: Feedback> Scrambler<F> {
    /// Create a scrambler that seeds its registers from `seed` instead of
    /// the reference key. Both ends of a link must agree on the seed.
    pub fn with_seed(seed: u32) -> Self {
        Scrambler {
            regs: [seed; 4],
            sel: LfsrIndex::L0,
            latch: LfsrIndex::L0,
            seed,
            source: SelectorSource::Output,
            _feedback: PhantomData,
        }
    }

    /// Change which word the selector field is sampled from.
    pub fn selector_source(mut self, source: SelectorSource) -> Self {
        self.source = source;
        self
    }

    /// Current contents of the four registers.
    pub fn registers(&self) -> &[u32; 4] {
        &self.regs
    }

    /// Register the data path is masked with this cycle.
    pub fn selector(&self) -> LfsrIndex {
        self.sel
    }

    /// The hardware's one-cycle-delayed record of the active register.
    pub fn enable_latch(&self) -> LfsrIndex {
        self.latch
    }

    /// Advance one clock cycle and return the cycle's output word.
    ///
    /// The output is computed combinationally from the pre-update state:
    /// passthrough unless `ENCODE_EN`, otherwise the input XORed with the
    /// selected register. The selector then resamples per the control
    /// inputs, and either all four registers reseed (`RESET`/`INIT`) or the
    /// register named by the updated selector advances one feedback step.
    pub fn tick(&mut self, ctrl: CtrlSignals, data_in: u32) -> u32 {
        let data_out = if ctrl.contains(CtrlSignals::ENCODE_EN) {
            data_in ^ self.regs[self.sel.index()]
        } else {
            data_in
        };

        let sampled = LfsrIndex::from_sampled(match self.source {
            SelectorSource::Output => data_out,
            SelectorSource::DataIn => data_in,
        });
        let (sel, latch) = advance_selection(self.sel, self.latch, ctrl, sampled);
        if sel != self.sel {
            trace!("selector {:?} -> {:?}", self.sel, sel);
        }
        self.sel = sel;
        self.latch = latch;

        if ctrl.seeding() {
            trace!("reseeding registers to {:#010x}", self.seed);
            self.regs = [self.seed; 4];
        } else {
            let active = self.sel.index();
            self.regs[active] = F::step(self.sel, self.regs[active]);
        }

        data_out
    }
}

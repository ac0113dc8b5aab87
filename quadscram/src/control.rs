//! Control inputs and the selection state machine shared by the scalar and
//! batch engines.

use bitflags::bitflags;

use crate::bits::BitGroup;

/// Field of the sampled data word that selects the active LFSR.
pub(crate) const SEL_FIELD: BitGroup = BitGroup::span(11, 10);

bitflags! {
    /// Per-cycle control inputs to the scrambler block.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
    pub struct CtrlSignals: u8 {
        /// Reseeds all four registers and resamples the selector.
        const RESET = 0b0001;
        /// Same register effect as RESET, driven as a separate signal by the
        /// surrounding hardware.
        const INIT = 0b0010;
        /// Lets the selector resample from the data path this cycle.
        const LFSR_EN = 0b0100;
        /// Enables the XOR mask; when clear the data word passes through.
        const ENCODE_EN = 0b1000;
    }
}

impl CtrlSignals {
    /// True when this cycle reseeds the registers instead of advancing them.
    #[inline]
    pub fn seeding(self) -> bool {
        self.intersects(Self::RESET.union(Self::INIT))
    }
}

/// Index of one of the four LFSRs.
///
/// The selector and the enable latch only ever hold one of these values, so
/// register-bank indexing never needs a range check.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[repr(u8)]
pub enum LfsrIndex {
    /// Register 0, polynomial taps {21, 15, 11, 9, 7}.
    #[default]
    L0 = 0,
    /// Register 1, polynomial taps {27, 23, 13, 11, 5}.
    L1 = 1,
    /// Register 2, polynomial taps {23, 17, 15, 7, 3}.
    L2 = 2,
    /// Register 3, polynomial taps {25, 17, 14, 9, 8}.
    L3 = 3,
}

impl LfsrIndex {
    /// All four indices in order.
    pub const ALL: [LfsrIndex; 4] =
        [LfsrIndex::L0, LfsrIndex::L1, LfsrIndex::L2, LfsrIndex::L3];

    /// Decode the selector field (bits 11..10) of a sampled data word.
    #[inline]
    pub fn from_sampled(word: u32) -> LfsrIndex {
        match SEL_FIELD.extract(word) {
            0 => LfsrIndex::L0,
            1 => LfsrIndex::L1,
            2 => LfsrIndex::L2,
            3 => LfsrIndex::L3,
            _ => unreachable!("selector field is two bits wide"),
        }
    }

    /// Position of this register in a `[T; 4]` bank.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Which word of the cycle the selector field is sampled from.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum SelectorSource {
    /// Sample this cycle's computed output, as the hardware does.
    #[default]
    Output,
    /// Sample the unmodified input word.
    ///
    /// An [`Output`](SelectorSource::Output)-sampling scrambler and a
    /// `DataIn`-sampling descrambler track the same word (the one on the
    /// wire), so their register evolution stays in lockstep.
    DataIn,
}

/// One update of the selection state. Returns the new `(selector, latch)`.
///
/// On a seeding cycle the latch copies the new selector forward rather than
/// holding the previous one; on an enabled running cycle the latch takes the
/// outgoing selector.
#[inline]
pub(crate) fn advance_selection(
    sel: LfsrIndex,
    latch: LfsrIndex,
    ctrl: CtrlSignals,
    sampled: LfsrIndex,
) -> (LfsrIndex, LfsrIndex) {
    if ctrl.seeding() {
        (sampled, sampled)
    } else if ctrl.contains(CtrlSignals::LFSR_EN) {
        (sampled, sel)
    } else {
        (sel, latch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sampled_field_is_bits_11_to_10() {
        assert_eq!(LfsrIndex::from_sampled(0x0000_0000), LfsrIndex::L0);
        assert_eq!(LfsrIndex::from_sampled(0x0000_0400), LfsrIndex::L1);
        assert_eq!(LfsrIndex::from_sampled(0x0000_0800), LfsrIndex::L2);
        assert_eq!(LfsrIndex::from_sampled(0x0000_0f00), LfsrIndex::L3);
        // bits outside the field are ignored
        assert_eq!(LfsrIndex::from_sampled(0xffff_f3ff), LfsrIndex::L0);
    }

    #[test]
    fn seeding_cycles() {
        assert!(CtrlSignals::RESET.seeding());
        assert!(CtrlSignals::INIT.seeding());
        assert!((CtrlSignals::RESET | CtrlSignals::ENCODE_EN).seeding());
        assert!(!CtrlSignals::empty().seeding());
        assert!(!(CtrlSignals::LFSR_EN | CtrlSignals::ENCODE_EN).seeding());
    }

    #[test]
    fn seeding_copies_selector_forward() {
        let (sel, latch) = advance_selection(
            LfsrIndex::L1,
            LfsrIndex::L2,
            CtrlSignals::INIT,
            LfsrIndex::L3,
        );
        assert_eq!(sel, LfsrIndex::L3);
        assert_eq!(latch, LfsrIndex::L3);
    }

    #[test]
    fn enable_latches_old_selector() {
        let (sel, latch) = advance_selection(
            LfsrIndex::L1,
            LfsrIndex::L2,
            CtrlSignals::LFSR_EN,
            LfsrIndex::L0,
        );
        assert_eq!(sel, LfsrIndex::L0);
        assert_eq!(latch, LfsrIndex::L1);
    }

    #[test]
    fn idle_cycle_holds_state() {
        let (sel, latch) = advance_selection(
            LfsrIndex::L1,
            LfsrIndex::L2,
            CtrlSignals::ENCODE_EN,
            LfsrIndex::L0,
        );
        assert_eq!(sel, LfsrIndex::L1);
        assert_eq!(latch, LfsrIndex::L2);
    }
}

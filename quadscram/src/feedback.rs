//! The two formulations of the per-cycle register update.
//!
//! [`SliceWiring`] transcribes the hardware's per-register bit reassignments
//! literally. [`TapWiring`] computes the same update from the tap table: the
//! wiring shifts every bit up one position, feeds the old MSB back into bit
//! 0, and XORs the old MSB into each tap position on the way. The two are
//! step-equivalent for every register; the batch engine relies on that.

use once_cell::sync::Lazy;

use crate::bits::BitGroup;
use crate::control::LfsrIndex;

/// Feedback tap positions of each register, excluding the implicit tap at
/// bit 31.
pub const TAPS: [[u32; 5]; 4] = [
    [21, 15, 11, 9, 7],
    [27, 23, 13, 11, 5],
    [23, 17, 15, 7, 3],
    [25, 17, 14, 9, 8],
];

const MSB: BitGroup = BitGroup::at(31);

/// Per-register XOR-injection masks derived from [`TAPS`]: one bit per tap
/// position, plus bit 0 for the wrapped-around MSB.
static INJECT: Lazy<[u32; 4]> = Lazy::new(|| {
    TAPS.map(|taps| taps.iter().fold(1u32, |mask, &tap| mask | (1 << tap)))
});

/// A register-update strategy: one feedback-shift step of the register at
/// `index`.
pub trait Feedback {
    /// Advance `value` by one step using the wiring of the register at
    /// `index`.
    fn step(index: LfsrIndex, value: u32) -> u32;
}

/// Tap-table-driven update: shift left one bit, then XOR the old MSB into
/// the tap positions and bit 0.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct TapWiring;

impl Feedback for TapWiring {
    #[inline]
    fn step(index: LfsrIndex, value: u32) -> u32 {
        let shifted = value << 1;
        if MSB.extract_bool(value) {
            shifted ^ INJECT[index.index()]
        } else {
            shifted
        }
    }
}

/// Hardware-literal update: each register's wiring written out
/// position-for-position.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SliceWiring;

impl Feedback for SliceWiring {
    fn step(index: LfsrIndex, value: u32) -> u32 {
        match index {
            LfsrIndex::L0 => step_l0(value),
            LfsrIndex::L1 => step_l1(value),
            LfsrIndex::L2 => step_l2(value),
            LfsrIndex::L3 => step_l3(value),
        }
    }
}

fn step_l0(v: u32) -> u32 {
    let msb = MSB.extract(v);
    let mut next = 0;
    BitGroup::span(31, 22).apply(&mut next, BitGroup::span(30, 21).extract(v));
    BitGroup::at(21).apply(&mut next, msb ^ BitGroup::at(20).extract(v));
    BitGroup::span(20, 16).apply(&mut next, BitGroup::span(19, 15).extract(v));
    BitGroup::at(15).apply(&mut next, msb ^ BitGroup::at(14).extract(v));
    BitGroup::span(14, 12).apply(&mut next, BitGroup::span(13, 11).extract(v));
    BitGroup::at(11).apply(&mut next, msb ^ BitGroup::at(10).extract(v));
    BitGroup::at(10).apply(&mut next, BitGroup::at(9).extract(v));
    BitGroup::at(9).apply(&mut next, msb ^ BitGroup::at(8).extract(v));
    BitGroup::at(8).apply(&mut next, BitGroup::at(7).extract(v));
    BitGroup::at(7).apply(&mut next, msb ^ BitGroup::at(6).extract(v));
    BitGroup::span(6, 1).apply(&mut next, BitGroup::span(5, 0).extract(v));
    BitGroup::at(0).apply(&mut next, msb);
    next
}

fn step_l1(v: u32) -> u32 {
    let msb = MSB.extract(v);
    let mut next = 0;
    BitGroup::span(31, 28).apply(&mut next, BitGroup::span(30, 27).extract(v));
    BitGroup::at(27).apply(&mut next, msb ^ BitGroup::at(26).extract(v));
    BitGroup::span(26, 24).apply(&mut next, BitGroup::span(25, 23).extract(v));
    BitGroup::at(23).apply(&mut next, msb ^ BitGroup::at(22).extract(v));
    BitGroup::span(22, 14).apply(&mut next, BitGroup::span(21, 13).extract(v));
    BitGroup::at(13).apply(&mut next, msb ^ BitGroup::at(12).extract(v));
    BitGroup::at(12).apply(&mut next, BitGroup::at(11).extract(v));
    BitGroup::at(11).apply(&mut next, msb ^ BitGroup::at(10).extract(v));
    BitGroup::span(10, 6).apply(&mut next, BitGroup::span(9, 5).extract(v));
    BitGroup::at(5).apply(&mut next, msb ^ BitGroup::at(4).extract(v));
    BitGroup::span(4, 1).apply(&mut next, BitGroup::span(3, 0).extract(v));
    BitGroup::at(0).apply(&mut next, msb);
    next
}

fn step_l2(v: u32) -> u32 {
    let msb = MSB.extract(v);
    let mut next = 0;
    BitGroup::span(31, 24).apply(&mut next, BitGroup::span(30, 23).extract(v));
    BitGroup::at(23).apply(&mut next, msb ^ BitGroup::at(22).extract(v));
    BitGroup::span(22, 18).apply(&mut next, BitGroup::span(21, 17).extract(v));
    BitGroup::at(17).apply(&mut next, msb ^ BitGroup::at(16).extract(v));
    BitGroup::at(16).apply(&mut next, BitGroup::at(15).extract(v));
    BitGroup::at(15).apply(&mut next, msb ^ BitGroup::at(14).extract(v));
    BitGroup::span(14, 8).apply(&mut next, BitGroup::span(13, 7).extract(v));
    BitGroup::at(7).apply(&mut next, msb ^ BitGroup::at(6).extract(v));
    BitGroup::span(6, 4).apply(&mut next, BitGroup::span(5, 3).extract(v));
    BitGroup::at(3).apply(&mut next, msb ^ BitGroup::at(2).extract(v));
    BitGroup::span(2, 1).apply(&mut next, BitGroup::span(1, 0).extract(v));
    BitGroup::at(0).apply(&mut next, msb);
    next
}

fn step_l3(v: u32) -> u32 {
    let msb = MSB.extract(v);
    let mut next = 0;
    BitGroup::span(31, 26).apply(&mut next, BitGroup::span(30, 25).extract(v));
    BitGroup::at(25).apply(&mut next, msb ^ BitGroup::at(24).extract(v));
    BitGroup::span(24, 18).apply(&mut next, BitGroup::span(23, 17).extract(v));
    BitGroup::at(17).apply(&mut next, msb ^ BitGroup::at(16).extract(v));
    BitGroup::span(16, 15).apply(&mut next, BitGroup::span(15, 14).extract(v));
    BitGroup::at(14).apply(&mut next, msb ^ BitGroup::at(13).extract(v));
    BitGroup::span(13, 10).apply(&mut next, BitGroup::span(12, 9).extract(v));
    BitGroup::at(9).apply(&mut next, msb ^ BitGroup::at(8).extract(v));
    BitGroup::at(8).apply(&mut next, msb ^ BitGroup::at(7).extract(v));
    BitGroup::span(7, 1).apply(&mut next, BitGroup::span(6, 0).extract(v));
    BitGroup::at(0).apply(&mut next, msb);
    next
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn formulations_agree() {
        let mut rng = Pcg32::seed_from_u64(0x5eed);
        for index in LfsrIndex::ALL {
            for _ in 0..10_000 {
                let value: u32 = rng.gen();
                assert_eq!(
                    SliceWiring::step(index, value),
                    TapWiring::step(index, value),
                    "index {:?}, value {:#010x}",
                    index,
                    value
                );
            }
        }
    }

    #[test]
    fn known_steps_from_reference_seed() {
        const SEED: u32 = 0x9a8b_3c6d;
        const EXPECTED: [u32; 4] = [0x3536_f25b, 0x3d96_50fb, 0x3594_f853, 0x3714_3bdb];
        for index in LfsrIndex::ALL {
            assert_eq!(SliceWiring::step(index, SEED), EXPECTED[index.index()]);
            assert_eq!(TapWiring::step(index, SEED), EXPECTED[index.index()]);
        }
    }

    #[test]
    fn msb_injects_at_taps() {
        // From a lone MSB the next state is exactly the tap positions plus
        // bit 0.
        for index in LfsrIndex::ALL {
            let expected = TAPS[index.index()]
                .iter()
                .fold(1u32, |mask, &tap| mask | (1 << tap));
            assert_eq!(SliceWiring::step(index, 0x8000_0000), expected);
            assert_eq!(TapWiring::step(index, 0x8000_0000), expected);
        }
    }

    #[test]
    fn low_half_is_a_plain_shift() {
        // With bit 31 clear, the step degenerates to a left shift.
        for index in LfsrIndex::ALL {
            assert_eq!(TapWiring::step(index, 0x0000_0001), 0x0000_0002);
            assert_eq!(SliceWiring::step(index, 0x1234_5678), 0x2468_acf0);
        }
    }

    #[test]
    fn zero_is_a_fixed_point() {
        for index in LfsrIndex::ALL {
            assert_eq!(TapWiring::step(index, 0), 0);
            assert_eq!(SliceWiring::step(index, 0), 0);
        }
    }
}

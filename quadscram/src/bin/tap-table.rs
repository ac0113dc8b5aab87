//! Prints the wiring of the four LFSRs and the reference keystream for
//! comparison against the hardware description.

use quadscram::control::{CtrlSignals, LfsrIndex};
use quadscram::feedback::{Feedback, TapWiring, TAPS};
use quadscram::scrambler::{Scrambler, DEFAULT_SEED};

fn main() {
    println!("seed: {:#010x}", DEFAULT_SEED);
    println!();
    println!("| register | taps (bit 31 implicit) | injection mask |");
    println!("|----------|------------------------|----------------|");
    for index in LfsrIndex::ALL {
        let taps = TAPS[index.index()];
        let mask = taps.iter().fold(1u32, |mask, &tap| mask | (1 << tap));
        println!(
            "| {:?}       | {:>2} {:>2} {:>2} {:>2} {:>2}         | {:#010x}     |",
            index, taps[0], taps[1], taps[2], taps[3], taps[4], mask
        );
    }

    println!();
    println!("first keystream words per register:");
    for index in LfsrIndex::ALL {
        let mut value = DEFAULT_SEED;
        print!("{:?}:", index);
        for _ in 0..8 {
            print!(" {:#010x}", value);
            value = TapWiring::step(index, value);
        }
        println!();
    }

    let mut scrambler = Scrambler::new();
    scrambler.tick(CtrlSignals::INIT, 0x0000_0f00);
    println!();
    print!("free-running output from zero input:");
    for _ in 0..8 {
        print!(" {:#010x}", scrambler.tick(CtrlSignals::ENCODE_EN, 0));
    }
    println!();
}

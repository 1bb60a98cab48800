//! Backing Memory Tests.

use mipsim_core::soc::Memory;
use mipsim_core::soc::memory::{DATA_BASE, STACK_BASE, TEXT_BASE};

/// Words written to mapped regions read back.
#[test]
fn mapped_regions_round_trip() {
    let mut mem = Memory::new();
    mem.write_u32(TEXT_BASE, 0x1234_5678);
    mem.write_u32(DATA_BASE + 0x40, 0xAABB_CCDD);
    mem.write_u32(STACK_BASE + 0x1000, 0x0F0F_0F0F);

    assert_eq!(mem.read_u32(TEXT_BASE), 0x1234_5678);
    assert_eq!(mem.read_u32(DATA_BASE + 0x40), 0xAABB_CCDD);
    assert_eq!(mem.read_u32(STACK_BASE + 0x1000), 0x0F0F_0F0F);
}

/// Unmapped reads return zero; unmapped writes are dropped without effect.
#[test]
fn unmapped_accesses_are_benign() {
    let mut mem = Memory::new();
    assert_eq!(mem.read_u32(0x0000_0000), 0);
    mem.write_u32(0x0000_0000, 0xFFFF_FFFF);
    assert_eq!(mem.read_u32(0x0000_0000), 0);
}

/// `write_words` lays a program image down contiguously.
#[test]
fn write_words_is_contiguous() {
    let mut mem = Memory::new();
    mem.write_words(TEXT_BASE, &[1, 2, 3]);
    assert_eq!(mem.read_u32(TEXT_BASE), 1);
    assert_eq!(mem.read_u32(TEXT_BASE + 4), 2);
    assert_eq!(mem.read_u32(TEXT_BASE + 8), 3);
}

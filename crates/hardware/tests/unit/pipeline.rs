//! End-to-End Pipeline Tests.
//!
//! Small assembled programs run through the full simulator: forwarding,
//! load-use, sub-word memory traffic, branch flushes, jumps, the
//! multiplier/divider, and the halt convention. Programs end with
//! `addiu $v0, $zero, 10; syscall` unless the halt itself is under test.

use crate::common::asm::{self, A0, A1, RA, S0, S1, S2, T0, T1, T2, T3, T4, T5, T6, T7, V0, ZERO};
use crate::common::harness::{TestContext, with_halt};

/// ALU results forward to the next instruction without going through the
/// register file first.
#[test]
fn alu_forwarding_chain() {
    let mut ctx = TestContext::with_program(&with_halt(&[
        asm::addiu(T0, ZERO, 5),
        asm::addu(T1, T0, T0),
        asm::ori(T2, T1, 0x00F0),
    ]));
    ctx.run_to_halt();

    assert_eq!(ctx.reg(T0), 5);
    assert_eq!(ctx.reg(T1), 10);
    assert_eq!(ctx.reg(T2), 0xFA);
    assert_eq!(ctx.sim.pipe.stats.inst_retire, 5);
}

/// A load immediately consumed by an ALU op delivers the loaded value
/// through the bypass network.
#[test]
fn load_use_forwards_loaded_value() {
    let mut ctx = TestContext::with_program(&with_halt(&[
        asm::lui(A0, 0x1000),
        asm::lw(T0, 0, A0),
        asm::addu(T1, T0, T0),
    ]));
    ctx.sim.pipe.mem.write_u32(0x1000_0000, 0x89AB_CDEF);
    ctx.run_to_halt();

    assert_eq!(ctx.reg(T0), 0x89AB_CDEF);
    assert_eq!(ctx.reg(T1), 0x89AB_CDEFu32.wrapping_mul(2));
}

/// Sub-word loads extract the right lane and extend from the masked
/// sub-word, so negative bytes and halfwords come out sign-extended.
#[test]
fn subword_loads_extract_and_extend() {
    let mut ctx = TestContext::with_program(&with_halt(&[
        asm::lui(A0, 0x1000),
        asm::lb(T0, 0, A0),
        asm::lbu(T1, 1, A0),
        asm::lh(T2, 2, A0),
        asm::lhu(T3, 2, A0),
        asm::lh(T4, 0, A0),
    ]));
    ctx.sim.pipe.mem.write_u32(0x1000_0000, 0x8234_8680);
    ctx.run_to_halt();

    assert_eq!(ctx.reg(T0), 0xFFFF_FF80);
    assert_eq!(ctx.reg(T1), 0x86);
    assert_eq!(ctx.reg(T2), 0xFFFF_8234);
    assert_eq!(ctx.reg(T3), 0x8234);
    assert_eq!(ctx.reg(T4), 0xFFFF_8680);
}

/// SW writes the word; SH and SB read-modify-write their lanes; a final LW
/// observes all three merges.
#[test]
fn stores_merge_subwords() {
    let mut ctx = TestContext::with_program(&with_halt(&[
        asm::lui(A0, 0x1000),
        asm::lui(T0, 0x1111),
        asm::ori(T0, T0, 0x2222),
        asm::sw(T0, 0, A0),
        asm::ori(T1, ZERO, 0xBEEF),
        asm::sh(T1, 2, A0),
        asm::ori(T2, ZERO, 0xAB),
        asm::sb(T2, 0, A0),
        asm::lw(T3, 0, A0),
    ]));
    ctx.run_to_halt();

    assert_eq!(ctx.reg(T3), 0xBEEF_22AB);
}

/// A taken branch resolved in execute squashes exactly the two wrong-path
/// instructions behind it (scenario: decode and execute slots).
#[test]
fn taken_branch_flushes_two_in_flight() {
    let mut ctx = TestContext::with_program(&with_halt(&[
        asm::beq(ZERO, ZERO, 2),
        asm::addiu(T0, ZERO, 1), // wrong path
        asm::addiu(T1, ZERO, 1), // wrong path
        asm::addiu(T2, ZERO, 1), // branch target
    ]));
    ctx.run_to_halt();

    assert_eq!(ctx.reg(T0), 0);
    assert_eq!(ctx.reg(T1), 0);
    assert_eq!(ctx.reg(T2), 1);
    assert_eq!(ctx.sim.pipe.stats.squashes, 1);
}

/// A not-taken branch squashes nothing and falls through.
#[test]
fn not_taken_branch_falls_through() {
    let mut ctx = TestContext::with_program(&with_halt(&[
        asm::bne(ZERO, ZERO, 2),
        asm::addiu(T0, ZERO, 1),
        asm::addiu(T1, ZERO, 1),
        asm::addiu(T2, ZERO, 1),
    ]));
    ctx.run_to_halt();

    assert_eq!(ctx.reg(T0), 1);
    assert_eq!(ctx.reg(T1), 1);
    assert_eq!(ctx.reg(T2), 1);
    assert_eq!(ctx.sim.pipe.stats.squashes, 0);
}

/// BLTZAL writes the link register even when the branch is not taken.
#[test]
fn bltzal_links_unconditionally() {
    // bltzal $zero: 0 < 0 is false, so control falls through but $ra is
    // still written with pc + 4.
    let bltzal = asm::i_type(0x01, ZERO, 0x10, 2);
    let mut ctx = TestContext::with_program(&with_halt(&[bltzal, asm::addiu(T0, ZERO, 1)]));
    ctx.run_to_halt();

    assert_eq!(ctx.reg(T0), 1);
    assert_eq!(ctx.reg(RA), 0x0040_0004);
    assert_eq!(ctx.sim.pipe.stats.squashes, 0);
}

/// JAL followed by JR through `$ra` returns control to the instruction
/// after the JAL (no delay slots in this model), squashing the wrong path
/// behind each jump.
#[test]
fn jal_jr_round_trip() {
    let mut ctx = TestContext::with_program(&[
        asm::jal(0x0040_0014),    // 0x400000: call
        asm::addiu(S0, ZERO, 7),  // 0x400004: return lands here
        asm::addiu(V0, ZERO, 10), // 0x400008
        asm::syscall(),           // 0x40000C
        asm::addiu(S1, ZERO, 99), // 0x400010: fetched behind the halt, never retires
        asm::addiu(S2, ZERO, 3),  // 0x400014: subroutine body
        asm::jr(RA),              // 0x400018: return
    ]);
    ctx.run_to_halt();

    assert_eq!(ctx.reg(S2), 3, "subroutine body must run");
    assert_eq!(ctx.reg(S0), 7, "return path must run");
    assert_eq!(ctx.reg(RA), 0x0040_0004);
    assert_eq!(ctx.reg(S1), 0, "ops behind the halt never commit");
    assert_eq!(ctx.sim.pipe.stats.squashes, 2);
    assert_eq!(ctx.sim.pipe.pc, 0x0040_000C);
}

/// MULT/DIV write HI/LO; MFHI/MFLO observe them after the latency.
#[test]
fn mult_and_div_through_hilo() {
    let mut ctx = TestContext::with_program(&with_halt(&[
        asm::lui(T0, 0x4000),
        asm::lui(T1, 0x0004),
        asm::mult(T0, T1), // 2^30 * 2^18 = 2^48
        asm::mfhi(T2),
        asm::mflo(T3),
        asm::ori(A0, ZERO, 100),
        asm::ori(A1, ZERO, 7),
        asm::div(A0, A1),
        asm::mflo(T4),
        asm::mfhi(T5),
        asm::divu(A0, ZERO), // divide by zero: HI = LO = 0, no trap
        asm::mflo(T6),
        asm::mfhi(T7),
    ]));
    ctx.run_to_halt();

    assert_eq!(ctx.reg(T2), 0x0001_0000);
    assert_eq!(ctx.reg(T3), 0);
    assert_eq!(ctx.reg(T4), 14);
    assert_eq!(ctx.reg(T5), 2);
    assert_eq!(ctx.reg(T6), 0);
    assert_eq!(ctx.reg(T7), 0);
}

/// MTHI/MTLO route register values into HI/LO.
#[test]
fn mthi_mtlo_route_values() {
    let mut ctx = TestContext::with_program(&with_halt(&[
        asm::ori(T0, ZERO, 0x1234),
        asm::mthi(T0),
        asm::ori(T1, ZERO, 0x4321),
        asm::mtlo(T1),
        asm::mfhi(T2),
        asm::mflo(T3),
    ]));
    ctx.run_to_halt();

    assert_eq!(ctx.reg(T2), 0x1234);
    assert_eq!(ctx.reg(T3), 0x4321);
}

/// An instruction word matching no known opcode flows through as a nop:
/// no destination written, no side effect, still retired.
#[test]
fn unknown_opcode_is_a_nop() {
    let mut ctx = TestContext::with_program(&with_halt(&[
        asm::ori(T0, ZERO, 5),
        0x7111_2222, // opcode 0x1C: not in the decoder
        asm::ori(T1, ZERO, 6),
    ]));
    ctx.run_to_halt();

    assert_eq!(ctx.reg(T0), 5);
    assert_eq!(ctx.reg(T1), 6);
    assert_eq!(ctx.sim.pipe.stats.inst_retire, 5);
}

/// Register `$zero` is never observed as non-zero, even as a destination.
#[test]
fn register_zero_is_immutable() {
    let mut ctx = TestContext::with_program(&with_halt(&[
        asm::addiu(ZERO, ZERO, 5),
        asm::addu(T0, ZERO, ZERO),
    ]));
    ctx.run_to_halt();

    assert_eq!(ctx.reg(ZERO), 0);
    assert_eq!(ctx.reg(T0), 0);
}

/// The halt convention: syscall with v0 == 10 clears the run bit and leaves
/// PC pointing at the syscall itself; nothing behind it commits.
#[test]
fn syscall_halt_rewinds_pc() {
    let mut ctx = TestContext::with_program(&[
        asm::addiu(V0, ZERO, 10),
        asm::syscall(),          // 0x400004
        asm::addiu(T0, ZERO, 1), // behind the halt
    ]);
    ctx.run_to_halt();

    assert!(!ctx.sim.is_running());
    assert_eq!(ctx.sim.pipe.pc, 0x0040_0004);
    assert_eq!(ctx.reg(T0), 0);
    assert_eq!(ctx.sim.pipe.stats.inst_retire, 2);
}

/// A jump to a misaligned target parks the machine: fetch logs the bad PC
/// and declines every cycle instead of corrupting state.
#[test]
fn misaligned_jump_target_stalls_fetch() {
    let mut ctx = TestContext::with_program(&[
        asm::lui(T0, 0x0040),
        asm::ori(T0, T0, 0x0002),
        asm::jr(T0),
    ]);
    let _ = ctx.sim.run(2000);

    assert!(ctx.sim.is_running(), "a misaligned PC cannot halt the machine");
    assert_eq!(ctx.sim.pipe.pc, 0x0040_0002);
}

/// Stored data survives a store-then-load through the data cache at the
/// same aligned address.
#[test]
fn store_load_same_address() {
    let mut ctx = TestContext::with_program(&with_halt(&[
        asm::lui(A0, 0x1000),
        asm::ori(T0, ZERO, 0x5A5A),
        asm::sw(T0, 0x40, A0),
        asm::lw(T1, 0x40, A0),
    ]));
    ctx.run_to_halt();

    assert_eq!(ctx.reg(T1), 0x5A5A);
}

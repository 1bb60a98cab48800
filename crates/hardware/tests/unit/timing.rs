//! Cycle-Exact Controller Tests.
//!
//! These tests pin down the stall arbitration of the per-tick controller:
//! the 50-cycle cache-miss windows and the multiplier/divider latencies,
//! observed tick by tick through the public pipeline state.

use crate::common::asm::{self, A0, T0, T1, T2, T3, ZERO};
use crate::common::harness::{TestContext, with_halt};

/// Scenario: cold instruction cache. Cycle 1 issues the fetch and misses;
/// cycles 2-50 only tick the stall down; cycle 51 retries, hits, and
/// advances the PC.
#[test]
fn icache_cold_miss_window() {
    let mut ctx = TestContext::with_program(&with_halt(&[]));

    for _ in 0..50 {
        ctx.sim.tick();
    }
    assert_eq!(ctx.sim.pipe.stats.inst_fetch, 0, "nothing fetched during the stall");
    assert_eq!(ctx.sim.pipe.pc, 0x0040_0000, "PC must not advance during the stall");
    assert_eq!(ctx.sim.pipe.icache.stats.accesses, 1);
    assert_eq!(ctx.sim.pipe.icache.stats.misses, 1);

    ctx.sim.tick(); // cycle 51: the retry hits the freshly filled line
    assert_eq!(ctx.sim.pipe.stats.inst_fetch, 1);
    assert_eq!(ctx.sim.pipe.pc, 0x0040_0004);
    assert_eq!(ctx.sim.pipe.icache.stats.accesses, 2);
    assert_eq!(ctx.sim.pipe.icache.stats.hits, 1);
}

/// A dcache miss arms a 50-cycle window: 49 countdown ticks, then the
/// last-stall-cycle tick re-drives the access and completes the load.
#[test]
fn dcache_miss_window() {
    let mut ctx = TestContext::with_program(&with_halt(&[
        asm::lui(A0, 0x1000),
        asm::lw(T0, 0, A0),
    ]));
    ctx.sim.pipe.mem.write_u32(0x1000_0000, 0x89AB_CDEF);

    let mut guard = 0;
    while ctx.sim.pipe.dcache_stall == 0 {
        ctx.sim.tick();
        guard += 1;
        assert!(guard < 300, "load never reached the data cache");
    }
    assert_eq!(ctx.sim.pipe.dcache_stall, 50);
    assert!(ctx.sim.pipe.mem_in.is_some(), "the load waits in the memory slot");

    for _ in 0..49 {
        ctx.sim.tick();
    }
    assert_eq!(ctx.sim.pipe.dcache_stall, 1);
    assert!(ctx.sim.pipe.mem_in.is_some());

    ctx.sim.tick(); // last stall cycle: memory re-drives the access and hits
    assert_eq!(ctx.sim.pipe.dcache_stall, 0);
    assert!(ctx.sim.pipe.mem_in.is_none());

    ctx.run_to_halt();
    assert_eq!(ctx.reg(T0), 0x89AB_CDEF);
}

/// Counts how many ticks `inst` spends in the execute slot once it arrives.
fn ticks_held_in_execute(ctx: &mut TestContext, inst: u32) -> u32 {
    let in_execute =
        |ctx: &TestContext| ctx.sim.pipe.execute_in.as_ref().map(|op| op.inst) == Some(inst);

    let mut guard = 0;
    while !in_execute(ctx) {
        ctx.sim.tick();
        guard += 1;
        assert!(guard < 1000, "instruction never reached execute");
    }

    let mut held = 0;
    while in_execute(ctx) {
        ctx.sim.tick();
        held += 1;
        assert!(held < 100, "instruction never left execute");
    }
    held
}

/// MFHI right behind a MULT waits until four cycles after the multiply.
#[test]
fn mfhi_waits_out_the_multiplier() {
    let mut ctx = TestContext::with_program(&with_halt(&[
        asm::lui(T0, 0x4000),
        asm::lui(T1, 0x0004),
        asm::mult(T0, T1),
        asm::mfhi(T2),
        asm::mflo(T3),
    ]));

    let held = ticks_held_in_execute(&mut ctx, asm::mfhi(T2));
    assert_eq!(held, 4);

    ctx.run_to_halt();
    assert_eq!(ctx.reg(T2), 0x0001_0000);
}

/// MFLO behind a DIVU waits out the 32-cycle divider, divide-by-zero
/// included.
#[test]
fn mflo_waits_out_the_divider() {
    let mut ctx = TestContext::with_program(&with_halt(&[
        asm::ori(A0, ZERO, 100),
        asm::divu(A0, ZERO),
        asm::mflo(T0),
    ]));

    let held = ticks_held_in_execute(&mut ctx, asm::mflo(T0));
    assert_eq!(held, 32);

    ctx.run_to_halt();
    assert_eq!(ctx.reg(T0), 0);
}

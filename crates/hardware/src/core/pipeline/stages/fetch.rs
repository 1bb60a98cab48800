//! Instruction Fetch (IF) Stage.
//!
//! Reads the instruction cache at the current PC and emits a fresh op into
//! the decode slot. An icache miss arms the icache stall counter and leaves
//! the PC alone so the same fetch is retried once the penalty has elapsed.

use crate::core::pipeline::Pipeline;
use crate::core::pipeline::op::PipeOp;
use tracing::{error, trace};

/// Executes the fetch stage.
///
/// Preconditions: the decode slot must be empty (otherwise the pipeline is
/// backed up and fetch stalls in place) and the run bit must still be set.
pub fn fetch_stage(pipe: &mut Pipeline) {
    if pipe.decode_in.is_some() {
        return;
    }
    if !pipe.run_bit {
        return;
    }

    // A misaligned PC is a configuration problem, not an ISA event: log it
    // and produce nothing this cycle.
    if pipe.pc & 0x3 != 0 {
        error!(pc = format_args!("{:#010x}", pipe.pc), "misaligned PC; fetch suppressed");
        return;
    }

    let (hit, inst) = pipe.icache.access(&mut pipe.mem, pipe.pc, false, 0);
    if !hit {
        // Retry the same PC after the penalty; the line was filled by the
        // miss, so the retry will hit.
        pipe.icache_stall = pipe.miss_penalty;
        trace!(pc = format_args!("{:#010x}", pipe.pc), "IF miss");
        return;
    }

    trace!(
        pc = format_args!("{:#010x}", pipe.pc),
        inst = format_args!("{inst:#010x}"),
        "IF"
    );
    pipe.decode_in = Some(PipeOp::new(pipe.pc, inst));
    pipe.pc = pipe.pc.wrapping_add(4);
    pipe.stats.inst_fetch += 1;
}

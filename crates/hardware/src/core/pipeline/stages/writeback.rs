//! Write-Back (WB) Stage.
//!
//! Commits the destination register, handles the syscall halt convention,
//! and retires the op. This stage never stalls; it always drains its input
//! slot.

use crate::core::pipeline::Pipeline;
use crate::isa::{abi, opcodes};
use tracing::trace;

/// Executes the write-back stage.
pub fn writeback_stage(pipe: &mut Pipeline) {
    let Some(op) = pipe.wb_in.take() else {
        return;
    };

    if let Some(dst) = op.dst {
        if dst != 0 {
            pipe.regs.write(dst, op.dst_value);
            trace!(
                pc = format_args!("{:#010x}", op.pc),
                reg = abi::NAMES[dst],
                value = format_args!("{:#010x}", op.dst_value),
                "WB"
            );
        }
    }

    // Halt convention: syscall with v0 == 10 rewinds PC to the syscall
    // itself and clears the run bit, so the driver observes PC pointing at
    // the halting instruction.
    if op.opcode == opcodes::OP_SPECIAL
        && op.subop == opcodes::SUBOP_SYSCALL
        && op.src1_value == abi::SYSCALL_HALT
    {
        pipe.pc = op.pc;
        pipe.run_bit = false;
        trace!(pc = format_args!("{:#010x}", op.pc), "halt");
    }

    pipe.stats.inst_retire += 1;
}

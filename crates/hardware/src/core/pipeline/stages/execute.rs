//! Execute (EX) Stage.
//!
//! Resolves source operands through the bypass network, runs the ALU,
//! shifter, and comparison logic, drives the multi-cycle multiplier/divider,
//! resolves branch conditions, and computes effective addresses for memory
//! ops. A taken branch whose target is not the fall-through path schedules a
//! pipeline recovery.
//!
//! The stage declines to advance (leaving its input slot occupied) when the
//! downstream slot is full, when a source depends on an unready value in the
//! memory slot, or when HI/LO are touched while the multiplier is busy.

use crate::core::pipeline::{BRANCH_FLUSH_DEPTH, DIV_LATENCY, MULT_LATENCY, Pipeline};
use crate::isa::opcodes;
use tracing::trace;

/// Resolves one source register through the bypass network.
///
/// Priority order: `$zero` reads 0; an op in the memory slot with a matching
/// destination forwards its value if ready and demands a stall (`None`)
/// otherwise; an op in the write-back slot with a matching destination
/// forwards; anything else reads the architectural register file.
///
/// The write-back-slot forward is what makes a value produced by the memory
/// stage this very cycle visible; committed values are already in the
/// register file because write-back runs first in the sweep.
fn resolve_source(pipe: &Pipeline, r: usize) -> Option<u32> {
    if r == 0 {
        return Some(0);
    }
    if let Some(mem_op) = &pipe.mem_in {
        if mem_op.dst == Some(r) {
            return if mem_op.dst_ready {
                Some(mem_op.dst_value)
            } else {
                None
            };
        }
    }
    if let Some(wb_op) = &pipe.wb_in {
        if wb_op.dst == Some(r) {
            return Some(wb_op.dst_value);
        }
    }
    Some(pipe.regs.read(r))
}

/// Executes the execute stage.
///
/// Precondition: the memory slot is empty and the execute slot is not.
pub fn execute_stage(pipe: &mut Pipeline) {
    // The multiplier/divider counts down whenever execute is clocked, even
    // on cycles where the stage itself cannot advance an op.
    if pipe.multiplier_stall > 0 {
        pipe.multiplier_stall -= 1;
    }

    if pipe.mem_in.is_some() {
        return;
    }
    let Some(mut op) = pipe.execute_in.take() else {
        return;
    };

    if let Some(r) = op.src1 {
        match resolve_source(pipe, r) {
            Some(v) => op.src1_value = v,
            None => {
                // Producer not ready (load-use); wait in place.
                pipe.execute_in = Some(op);
                return;
            }
        }
    }
    if let Some(r) = op.src2 {
        match resolve_source(pipe, r) {
            Some(v) => op.src2_value = v,
            None => {
                pipe.execute_in = Some(op);
                return;
            }
        }
    }

    match op.opcode {
        opcodes::OP_SPECIAL => {
            op.dst_ready = true;
            match op.subop {
                opcodes::SUBOP_SLL => op.dst_value = op.src2_value << op.shamt,
                opcodes::SUBOP_SLLV => op.dst_value = op.src2_value << (op.src1_value & 0x1F),
                opcodes::SUBOP_SRL => op.dst_value = op.src2_value >> op.shamt,
                opcodes::SUBOP_SRLV => op.dst_value = op.src2_value >> (op.src1_value & 0x1F),
                opcodes::SUBOP_SRA => {
                    op.dst_value = ((op.src2_value as i32) >> op.shamt) as u32;
                }
                opcodes::SUBOP_SRAV => {
                    op.dst_value = ((op.src2_value as i32) >> (op.src1_value & 0x1F)) as u32;
                }

                opcodes::SUBOP_JR | opcodes::SUBOP_JALR => {
                    op.dst_value = op.pc.wrapping_add(4);
                    op.branch_dest = op.src1_value;
                    op.branch_taken = true;
                }

                opcodes::SUBOP_MULT => {
                    // The product is written right away; readers of HI/LO are
                    // held off in execute until the latency elapses. A later
                    // MULT/DIV overwrites the pair and re-arms the counter.
                    let prod = i64::from(op.src1_value as i32) * i64::from(op.src2_value as i32);
                    let uprod = prod as u64;
                    pipe.hi = (uprod >> 32) as u32;
                    pipe.lo = uprod as u32;
                    pipe.multiplier_stall = MULT_LATENCY;
                }
                opcodes::SUBOP_MULTU => {
                    let prod = u64::from(op.src1_value) * u64::from(op.src2_value);
                    pipe.hi = (prod >> 32) as u32;
                    pipe.lo = prod as u32;
                    pipe.multiplier_stall = MULT_LATENCY;
                }
                opcodes::SUBOP_DIV => {
                    if op.src2_value == 0 {
                        // Divide by zero is not trapped in this model.
                        pipe.hi = 0;
                        pipe.lo = 0;
                    } else {
                        let a = op.src1_value as i32;
                        let b = op.src2_value as i32;
                        pipe.lo = a.wrapping_div(b) as u32;
                        pipe.hi = a.wrapping_rem(b) as u32;
                    }
                    pipe.multiplier_stall = DIV_LATENCY;
                }
                opcodes::SUBOP_DIVU => {
                    if op.src2_value == 0 {
                        pipe.hi = 0;
                        pipe.lo = 0;
                    } else {
                        pipe.lo = op.src1_value / op.src2_value;
                        pipe.hi = op.src1_value % op.src2_value;
                    }
                    pipe.multiplier_stall = DIV_LATENCY;
                }

                opcodes::SUBOP_MFHI => {
                    if pipe.multiplier_stall > 0 {
                        pipe.execute_in = Some(op);
                        return;
                    }
                    op.dst_value = pipe.hi;
                }
                opcodes::SUBOP_MFLO => {
                    if pipe.multiplier_stall > 0 {
                        pipe.execute_in = Some(op);
                        return;
                    }
                    op.dst_value = pipe.lo;
                }
                opcodes::SUBOP_MTHI => {
                    // Held back while the unit is busy to respect the WAW
                    // dependence on HI.
                    if pipe.multiplier_stall > 0 {
                        pipe.execute_in = Some(op);
                        return;
                    }
                    pipe.hi = op.src1_value;
                }
                opcodes::SUBOP_MTLO => {
                    if pipe.multiplier_stall > 0 {
                        pipe.execute_in = Some(op);
                        return;
                    }
                    pipe.lo = op.src1_value;
                }

                opcodes::SUBOP_ADD | opcodes::SUBOP_ADDU => {
                    op.dst_value = op.src1_value.wrapping_add(op.src2_value);
                }
                opcodes::SUBOP_SUB | opcodes::SUBOP_SUBU => {
                    op.dst_value = op.src1_value.wrapping_sub(op.src2_value);
                }
                opcodes::SUBOP_AND => op.dst_value = op.src1_value & op.src2_value,
                opcodes::SUBOP_OR => op.dst_value = op.src1_value | op.src2_value,
                opcodes::SUBOP_NOR => op.dst_value = !(op.src1_value | op.src2_value),
                opcodes::SUBOP_XOR => op.dst_value = op.src1_value ^ op.src2_value,
                opcodes::SUBOP_SLT => {
                    op.dst_value = ((op.src1_value as i32) < (op.src2_value as i32)) as u32;
                }
                opcodes::SUBOP_SLTU => {
                    op.dst_value = (op.src1_value < op.src2_value) as u32;
                }

                // Syscall carries its resolved v0/v1 to write-back; unknown
                // functions pass through with no effect.
                _ => {}
            }
        }

        opcodes::OP_BRSPEC => match op.subop {
            opcodes::BROP_BLTZ | opcodes::BROP_BLTZAL => {
                if (op.src1_value as i32) < 0 {
                    op.branch_taken = true;
                }
            }
            opcodes::BROP_BGEZ | opcodes::BROP_BGEZAL => {
                if (op.src1_value as i32) >= 0 {
                    op.branch_taken = true;
                }
            }
            _ => {}
        },

        opcodes::OP_BEQ => {
            if op.src1_value == op.src2_value {
                op.branch_taken = true;
            }
        }
        opcodes::OP_BNE => {
            if op.src1_value != op.src2_value {
                op.branch_taken = true;
            }
        }
        opcodes::OP_BLEZ => {
            if (op.src1_value as i32) <= 0 {
                op.branch_taken = true;
            }
        }
        opcodes::OP_BGTZ => {
            if (op.src1_value as i32) > 0 {
                op.branch_taken = true;
            }
        }

        opcodes::OP_ADDI | opcodes::OP_ADDIU => {
            op.dst_ready = true;
            op.dst_value = op.src1_value.wrapping_add(op.se_imm16);
        }
        opcodes::OP_SLTI => {
            op.dst_ready = true;
            op.dst_value = ((op.src1_value as i32) < (op.se_imm16 as i32)) as u32;
        }
        opcodes::OP_SLTIU => {
            op.dst_ready = true;
            op.dst_value = (op.src1_value < op.se_imm16) as u32;
        }
        opcodes::OP_ANDI => {
            op.dst_ready = true;
            op.dst_value = op.src1_value & op.imm16;
        }
        opcodes::OP_ORI => {
            op.dst_ready = true;
            op.dst_value = op.src1_value | op.imm16;
        }
        opcodes::OP_XORI => {
            op.dst_ready = true;
            op.dst_value = op.src1_value ^ op.imm16;
        }
        opcodes::OP_LUI => {
            op.dst_ready = true;
            op.dst_value = op.imm16 << 16;
        }

        opcodes::OP_LW | opcodes::OP_LH | opcodes::OP_LHU | opcodes::OP_LB | opcodes::OP_LBU => {
            op.mem_addr = op.src1_value.wrapping_add(op.se_imm16);
        }
        opcodes::OP_SW | opcodes::OP_SH | opcodes::OP_SB => {
            op.mem_addr = op.src1_value.wrapping_add(op.se_imm16);
            op.mem_value = op.src2_value;
        }

        _ => {}
    }

    // A taken branch whose target is not the naturally fetched fall-through
    // schedules a recovery; the controller applies it after the sweep.
    if op.branch_taken && op.branch_dest != op.pc.wrapping_add(4) {
        pipe.recover(BRANCH_FLUSH_DEPTH, op.branch_dest);
    }

    trace!(
        pc = format_args!("{:#010x}", op.pc),
        taken = op.branch_taken,
        "EX"
    );
    pipe.mem_in = Some(op);
}

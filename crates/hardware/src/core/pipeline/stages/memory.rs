//! Memory Access (MEM) Stage.
//!
//! Drives the data cache for loads and stores. All cache transactions are
//! word-aligned: sub-word loads extract and extend after the word read, and
//! sub-word stores are modeled as read-modify-write (the preceding word read
//! brings the line in, so the following word write hits).
//!
//! A dcache miss arms the dcache stall counter and leaves the op in the
//! memory slot; the access is re-driven after the penalty elapses.

use crate::core::pipeline::Pipeline;
use crate::isa::opcodes;
use tracing::trace;

/// Executes the memory stage.
///
/// Precondition: the write-back slot is empty (write-back always drains
/// first in the sweep) and the memory slot is not.
pub fn mem_stage(pipe: &mut Pipeline) {
    let Some(mut op) = pipe.mem_in.take() else {
        return;
    };

    if op.is_mem {
        let line_addr = op.mem_addr & !3;
        if op.mem_write {
            let store_val = match op.opcode {
                opcodes::OP_SH => {
                    // Read-modify-write: merge the halfword into the line's word.
                    let (hit, word) = pipe.dcache.access(&mut pipe.mem, line_addr, false, 0);
                    if !hit {
                        pipe.dcache_stall = pipe.miss_penalty;
                        pipe.mem_in = Some(op);
                        return;
                    }
                    if op.mem_addr & 2 != 0 {
                        (word & 0x0000FFFF) | (op.mem_value << 16)
                    } else {
                        (word & 0xFFFF0000) | (op.mem_value & 0xFFFF)
                    }
                }
                opcodes::OP_SB => {
                    let (hit, word) = pipe.dcache.access(&mut pipe.mem, line_addr, false, 0);
                    if !hit {
                        pipe.dcache_stall = pipe.miss_penalty;
                        pipe.mem_in = Some(op);
                        return;
                    }
                    let byte = op.mem_value & 0xFF;
                    match op.mem_addr & 3 {
                        0 => (word & 0xFFFFFF00) | byte,
                        1 => (word & 0xFFFF00FF) | (byte << 8),
                        2 => (word & 0xFF00FFFF) | (byte << 16),
                        _ => (word & 0x00FFFFFF) | (byte << 24),
                    }
                }
                // SW and anything else writes the full word.
                _ => op.mem_value,
            };

            let (hit, _) = pipe.dcache.access(&mut pipe.mem, line_addr, true, store_val);
            if !hit {
                pipe.dcache_stall = pipe.miss_penalty;
                pipe.mem_in = Some(op);
                return;
            }
            trace!(
                pc = format_args!("{:#010x}", op.pc),
                addr = format_args!("{:#010x}", op.mem_addr),
                data = format_args!("{store_val:#010x}"),
                "MEM store"
            );
        } else {
            let (hit, word) = pipe.dcache.access(&mut pipe.mem, line_addr, false, 0);
            if !hit {
                pipe.dcache_stall = pipe.miss_penalty;
                pipe.mem_in = Some(op);
                return;
            }

            // Sub-word extraction. Sign extension is computed from the
            // already-masked sub-word, so negative bytes and halfwords
            // extend correctly.
            let mut val = word;
            match op.opcode {
                opcodes::OP_LH | opcodes::OP_LHU => {
                    val = if op.mem_addr & 2 != 0 {
                        (val >> 16) & 0xFFFF
                    } else {
                        val & 0xFFFF
                    };
                    if op.opcode == opcodes::OP_LH && val & 0x8000 != 0 {
                        val |= 0xFFFF8000;
                    }
                }
                opcodes::OP_LB | opcodes::OP_LBU => {
                    val = match op.mem_addr & 3 {
                        0 => val & 0xFF,
                        1 => (val >> 8) & 0xFF,
                        2 => (val >> 16) & 0xFF,
                        _ => (val >> 24) & 0xFF,
                    };
                    if op.opcode == opcodes::OP_LB && val & 0x80 != 0 {
                        val |= 0xFFFFFF80;
                    }
                }
                // LW takes the word as-is.
                _ => {}
            }
            op.dst_value = val;
            op.dst_ready = true;
            trace!(
                pc = format_args!("{:#010x}", op.pc),
                addr = format_args!("{:#010x}", op.mem_addr),
                data = format_args!("{val:#010x}"),
                "MEM load"
            );
        }
    }

    pipe.wb_in = Some(op);
}

use crate::cpu_65xx::opcodes_logical::{add_with_carry, compare, subtract_with_borrow};
use crate::cpu_65xx::*;

/// Shift left then OR into the accumulator.
/// Function: {adr}:={adr}*2 A:=A or {adr}
/// Flags: N Z C
pub fn slo(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    let result = operand.value << 1;
    cpu.c = (operand.value & 0x80 != 0) as u8;
    cpu.store_operand(operand.target, result);
    cpu.a |= result;
    cpu.set_zn(cpu.a);
}

/// Rotate left then AND into the accumulator.
/// Function: {adr}:={adr}rol A:=A and {adr}
/// Flags: N Z C
pub fn rla(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    let result = (operand.value << 1) | cpu.c;
    cpu.c = (operand.value & 0x80 != 0) as u8;
    cpu.store_operand(operand.target, result);
    cpu.a &= result;
    cpu.set_zn(cpu.a);
}

/// Shift right then EOR into the accumulator.
/// Function: {adr}:={adr}/2 A:=A exor {adr}
/// Flags: N Z C
pub fn sre(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    let result = operand.value >> 1;
    cpu.c = operand.value & 1;
    cpu.store_operand(operand.target, result);
    cpu.a ^= result;
    cpu.set_zn(cpu.a);
}

/// Rotate right then add the result. The rotate's carry-out feeds the add.
/// Function: {adr}:={adr}ror A:=A adc {adr}
/// Flags: N V Z C
pub fn rra(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    let result = (cpu.c << 7) | (operand.value >> 1);
    cpu.c = operand.value & 1;
    cpu.store_operand(operand.target, result);
    add_with_carry(cpu, result);
}

/// Store A AND X. No flags.
/// Function: {adr}:=A&X
/// Flags:
pub fn axs(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    cpu.store_operand(operand.target, cpu.a & cpu.x);
}

/// Load A and X together.
/// Function: A,X:={adr}
/// Flags: N Z
pub fn lax(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    cpu.a = operand.value;
    cpu.x = operand.value;
    cpu.set_zn(cpu.a);
}

/// Decrement then compare.
/// Function: {adr}:={adr}-1 A-{adr}
/// Flags: N Z C
pub fn dcp(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    let result = operand.value.wrapping_sub(1);
    cpu.store_operand(operand.target, result);
    compare(cpu, cpu.a, result);
}

/// Increment then subtract.
/// Function: {adr}:={adr}+1 A:=A-{adr}
/// Flags: N V Z C
pub fn isc(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    let result = operand.value.wrapping_add(1);
    cpu.store_operand(operand.target, result);
    subtract_with_borrow(cpu, result);
}

/// AND immediate, with the sign bit copied into the carry.
/// Function: A:=A&#{imm}
/// Flags: N Z C
pub fn anc(cpu: &mut Cpu, _mode: Mode, ops: &[u8], _pcp: u32) {
    cpu.a &= ops[0];
    cpu.set_zn(cpu.a);
    cpu.c = cpu.n;
}

/// AND immediate then shift right.
/// Function: A:=(A&#{imm})/2
/// Flags: N Z C
pub fn alr(cpu: &mut Cpu, _mode: Mode, ops: &[u8], _pcp: u32) {
    let tmp = cpu.a & ops[0];
    cpu.c = tmp & 1;
    cpu.a = tmp >> 1;
    cpu.set_zn(cpu.a);
}

/// AND immediate then rotate right, with C and V read out of odd places.
/// Function: A:=(A&#{imm})ror
/// Flags: N V Z C
pub fn arr(cpu: &mut Cpu, _mode: Mode, ops: &[u8], _pcp: u32) {
    let tmp = cpu.a & ops[0];
    cpu.a = (cpu.c << 7) | (tmp >> 1);
    cpu.c = (tmp & 0x80 != 0) as u8;
    cpu.set_zn(cpu.a);
    cpu.v = (cpu.a >> 6 ^ cpu.a >> 5) & 1;
}

/// Hardware-unstable on real silicon; modelled deterministically as X AND
/// the immediate.
/// Function: A:=X&#{imm}
/// Flags: N Z
pub fn xaa(cpu: &mut Cpu, _mode: Mode, ops: &[u8], _pcp: u32) {
    cpu.a = cpu.x & ops[0];
    cpu.set_zn(cpu.a);
}

/// Load A and X with the immediate ANDed against a bus constant. With the
/// magic constant fixed at 0xff this collapses to a plain load, which is
/// what blargg's test ROM verified on a real NES.
/// Function: A,X:=#{imm}
/// Flags: N Z
pub fn lxa(cpu: &mut Cpu, _mode: Mode, ops: &[u8], _pcp: u32) {
    cpu.a |= 0xff;
    cpu.a &= ops[0];
    cpu.x = cpu.a;
    cpu.set_zn(cpu.a);
}

/// The immediate AXS variant: subtract from A AND X, result into X.
/// Function: X:=A&X-#{imm}
/// Flags: N Z C
pub fn sbx(cpu: &mut Cpu, _mode: Mode, ops: &[u8], _pcp: u32) {
    let tmp = ((cpu.a & cpu.x) as u32).wrapping_sub(ops[0] as u32);
    cpu.set_zn(tmp as u8);
    cpu.c = (tmp as i32 >= 0) as u8;
    cpu.x = tmp as u8;
}

/// Store A AND X AND the incremented high address byte. Unstable on real
/// silicon; the AND-with-high+1 form is the fixed deterministic model.
/// Function: {adr}:=A&X&H
/// Flags:
pub fn ahx(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    match operand.target {
        Target::Memory(addr) => {
            let value = cpu.a & cpu.x & ((addr >> 8) as u8).wrapping_add(1);
            cpu.store_operand(operand.target, value);
        }
        _ => unreachable!("AHX with a non-memory operand"),
    }
}

/// The SHY/SHX core. The stored value is the register ANDed with the high
/// operand byte plus one, and on a real part that value also corrupts the
/// high byte of the effective address.
fn store_high_and(cpu: &mut Cpu, ops: &[u8], addr_index: u8, data: u8) {
    let value = data & ops[1].wrapping_add(1);
    let addr = u16::from_le_bytes([ops[0].wrapping_add(addr_index), value]);
    cpu.write_byte(addr, value);
}

/// Function: {adr}:=Y&H
/// Flags:
pub fn shy(cpu: &mut Cpu, _mode: Mode, ops: &[u8], _pcp: u32) {
    store_high_and(cpu, ops, cpu.x, cpu.y);
}

/// Function: {adr}:=X&H
/// Flags:
pub fn shx(cpu: &mut Cpu, _mode: Mode, ops: &[u8], _pcp: u32) {
    store_high_and(cpu, ops, cpu.y, cpu.x);
}

/// Load A AND X into S, then store like AHX.
/// Function: S:=A&X {adr}:=S&H
/// Flags:
pub fn tas(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    match operand.target {
        Target::Memory(addr) => {
            cpu.s = cpu.a & cpu.x;
            let value = cpu.s & ((addr >> 8) as u8).wrapping_add(1);
            cpu.store_operand(operand.target, value);
        }
        _ => unreachable!("TAS with a non-memory operand"),
    }
}

/// AND the operand into S and fan it out to A and X.
/// Function: A,X,S:={adr}&S
/// Flags: N Z
pub fn las(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    cpu.s &= operand.value;
    cpu.a = cpu.s;
    cpu.x = cpu.s;
    cpu.set_zn(cpu.a);
}

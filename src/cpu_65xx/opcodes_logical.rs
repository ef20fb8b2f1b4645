use crate::cpu_65xx::*;

/// Apply the logical "or" operator on the accumulator.
/// Function: A:=A or {adr}
/// Flags: N Z
pub fn ora(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    cpu.a |= operand.value;
    cpu.set_zn(cpu.a);
}

/// Apply the logical "and" operator on the accumulator.
/// Function: A:=A&{adr}
/// Flags: N Z
pub fn and(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    cpu.a &= operand.value;
    cpu.set_zn(cpu.a);
}

/// Logical Exclusive OR
/// Function: A:=A exor {adr}
/// Flags: N Z
pub fn eor(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    cpu.a ^= operand.value;
    cpu.set_zn(cpu.a);
}

/// The ADC core, shared with RRA. Binary mode works on nine bits so the
/// carry out is just bit 8 of the result.
///
/// In decimal mode the nibbles are corrected to wrap at ten, and the parts
/// disagree about when the flags are latched: the NMOS 6502 takes Z (and N)
/// from the uncorrected binary result, the CMOS parts and the HuC from the
/// corrected accumulator. http://www.6502.org/tutorials/decimal_mode.html
pub(crate) fn add_with_carry(cpu: &mut Cpu, m: u8) {
    let a = cpu.a;
    let mut tmp = a as u32 + m as u32 + cpu.c as u32;
    if cpu.config.bcd && cpu.d != 0 {
        let nmos = cpu.config.variant == Variant::Nmos6502;
        if nmos {
            cpu.z = (tmp as u8 == 0) as u8;
        }
        if (a & 0xf) + (m & 0xf) + cpu.c > 9 {
            tmp += 6;
        }
        cpu.v = ((a ^ m) & 0x80 == 0 && (a as u32 ^ tmp) & 0x80 != 0) as u8;
        if nmos {
            cpu.n = (tmp & 0x80 != 0) as u8;
        }
        if tmp > 0x99 {
            tmp += 0x60;
        }
        cpu.c = (tmp > 0x99) as u8;
        cpu.a = tmp as u8;
        if !nmos {
            cpu.set_zn(cpu.a);
        }
    } else {
        cpu.v = ((a ^ m) & 0x80 == 0 && (a as u32 ^ tmp) & 0x80 != 0) as u8;
        cpu.c = (tmp > 0xff) as u8;
        cpu.a = tmp as u8;
        cpu.set_zn(cpu.a);
    }
}

/// The SBC core, shared with ISC. The borrow is the inverted carry, so the
/// conventional prelude is SEC. The decimal correction mirrors ADC, with
/// the same NMOS-versus-CMOS difference in when Z and N are latched.
pub(crate) fn subtract_with_borrow(cpu: &mut Cpu, m: u8) {
    let a = cpu.a;
    let borrow = (cpu.c == 0) as u32;
    let mut tmp = (a as u32).wrapping_sub(m as u32).wrapping_sub(borrow);
    cpu.v = ((a as u32 ^ tmp) & 0x80 != 0 && (a ^ m) & 0x80 != 0) as u8;
    if !(cpu.config.bcd && cpu.d != 0) {
        cpu.set_zn(tmp as u8);
    } else {
        let nmos = cpu.config.variant == Variant::Nmos6502;
        if nmos {
            cpu.set_zn(tmp as u8);
        }
        if ((a & 0xf) as i32 - borrow as i32) < (m & 0xf) as i32 {
            tmp = tmp.wrapping_sub(6);
        }
        // An underflowed tmp compares high here, so borrowed results get
        // the 0x60 correction too.
        if tmp > 0x99 {
            tmp = tmp.wrapping_sub(0x60);
        }
        if !nmos {
            cpu.set_zn(tmp as u8);
        }
    }
    cpu.c = (tmp as i32 >= 0) as u8;
    cpu.a = tmp as u8;
}

/// Add with Carry
/// Function: A:=A+{adr}+C
/// Flags: N V Z C
pub fn adc(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    add_with_carry(cpu, operand.value);
}

/// Subtract with Carry
/// Function: A:=A-{adr}+C-1
/// Flags: N V Z C
pub fn sbc(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    subtract_with_borrow(cpu, operand.value);
}

/// CMP and friends work in terms of subtraction: the carry is set when the
/// register is greater than or equal to the operand.
/// http://6502.org/tutorials/compare_instructions.html
pub(crate) fn compare(cpu: &mut Cpu, register: u8, m: u8) {
    let tmp = (register as u32).wrapping_sub(m as u32);
    cpu.set_zn(tmp as u8);
    cpu.c = (tmp as i32 >= 0) as u8;
}

/// Compare A with source
/// Function: A-{adr}
/// Flags: N Z C
pub fn cmp(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    compare(cpu, cpu.a, operand.value);
}

/// Compare X with source
/// Function: X-{adr}
/// Flags: N Z C
pub fn cpx(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    compare(cpu, cpu.x, operand.value);
}

/// Compare Y with source
/// Function: Y-{adr}
/// Flags: N Z C
pub fn cpy(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    compare(cpu, cpu.y, operand.value);
}

/// Decrement at an address
/// Function: {adr}:={adr}-1
/// Flags: N Z
pub fn dec(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    let result = operand.value.wrapping_sub(1);
    cpu.store_operand(operand.target, result);
    cpu.set_zn(result);
}

/// Decrement X
/// Function: X:=X-1
/// Flags: N Z
pub fn dex(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.set_zn(cpu.x);
}

/// Decrement Y
/// Function: Y:=Y-1
/// Flags: N Z
pub fn dey(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.set_zn(cpu.y);
}

/// Increment at an address
/// Function: {adr}:={adr}+1
/// Flags: N Z
pub fn inc(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    let result = operand.value.wrapping_add(1);
    cpu.store_operand(operand.target, result);
    cpu.set_zn(result);
}

/// Increment X
/// Function: X:=X+1
/// Flags: N Z
pub fn inx(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.set_zn(cpu.x);
}

/// Increment Y
/// Function: Y:=Y+1
/// Flags: N Z
pub fn iny(cpu: &mut Cpu, _mode: Mode, _ops: &[u8], _pcp: u32) {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.set_zn(cpu.y);
}

/// Arithmetic shift left
/// Function: {adr}:={adr}*2
/// Flags: N Z C
pub fn asl(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    let result = operand.value << 1;
    // The Carry flag contains the bit that was shifted out:
    cpu.c = (operand.value & 0x80 != 0) as u8;
    cpu.store_operand(operand.target, result);
    cpu.set_zn(result);
}

/// Rotate left
/// Function: {adr}:={adr}*2+C
/// Flags: N Z C
pub fn rol(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    let result = (operand.value << 1) | cpu.c;
    cpu.c = (operand.value & 0x80 != 0) as u8;
    cpu.store_operand(operand.target, result);
    cpu.set_zn(result);
}

/// Logical shift right
/// Function: {adr}:={adr}/2
/// Flags: N Z C
pub fn lsr(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    let result = operand.value >> 1;
    cpu.c = operand.value & 1;
    cpu.store_operand(operand.target, result);
    cpu.set_zn(result);
}

/// Rotate right
/// Function: {adr}:={adr}/2+C*128
/// Flags: N Z C
pub fn ror(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    let result = (cpu.c << 7) | (operand.value >> 1);
    cpu.c = operand.value & 1;
    cpu.store_operand(operand.target, result);
    cpu.set_zn(result);
}

/// Test and reset bits. The complement of A masks the operand; Z reports
/// on the bits that were set in both.
/// Function: {adr}:={adr}&~A
/// Flags: Z
pub fn trb(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    let result = !cpu.a & operand.value;
    cpu.z = (cpu.a & operand.value == 0) as u8;
    cpu.store_operand(operand.target, result);
}

/// Test and set bits.
/// Function: {adr}:={adr} or A
/// Flags: Z
pub fn tsb(cpu: &mut Cpu, mode: Mode, ops: &[u8], pcp: u32) {
    let operand = cpu.fetch_operand(mode, ops, pcp);
    let result = cpu.a | operand.value;
    cpu.z = (cpu.a & operand.value == 0) as u8;
    cpu.store_operand(operand.target, result);
}

use crate::opcodes::Mode;

/// Render the operand bytes of an instruction the way a disassembly listing
/// would print them. `p` is the slice of bytes following the opcode in the
/// fetch buffer; modes that take fewer bytes ignore the rest.
pub fn operand_string(mode: Mode, p: &[u8]) -> String {
    match mode {
        Mode::Implied => String::new(),
        Mode::Implied2 => format!(" ${:02x}", p[0]),
        Mode::BlockMove => format!(
            " ${:02x}{:02x}, ${:02x}{:02x}, ${:02x}{:02x}",
            p[1], p[0], p[3], p[2], p[5], p[4]
        ),
        Mode::Immediate => format!(" #${:02x}", p[0]),
        Mode::ZeroPage => format!(" ${:02x}", p[0]),
        Mode::ZeroPageX => format!(" ${:02x}, x", p[0]),
        Mode::ZeroPageY => format!(" ${:02x}, y", p[0]),
        Mode::ZeroPageRelative => format!(" ${:02x}, {}", p[0], p[1] as i8),
        Mode::ZeroPageIndirect => format!(" (${:02x})", p[0]),
        Mode::IndirectX => format!(" (${:02x}, x)", p[0]),
        Mode::IndirectY => format!(" (${:02x}), y", p[0]),
        Mode::Absolute => format!(" ${:02x}{:02x}", p[1], p[0]),
        Mode::AbsoluteX => format!(" ${:02x}{:02x}, x", p[1], p[0]),
        Mode::AbsoluteY => format!(" ${:02x}{:02x}, y", p[1], p[0]),
        Mode::Indirect => format!(" (${:02x}{:02x})", p[1], p[0]),
        Mode::AbsoluteIndexedIndirect => format!(" (${:02x}{:02x}, x)", p[1], p[0]),
        Mode::Relative => format!(" {}", p[0] as i8),
        Mode::ImmediateZeroPage => format!(" #${:02x}, ${:02x}", p[0], p[1]),
        Mode::ImmediateZeroPageX => format!(" #${:02x}, ${:02x}, x", p[0], p[1]),
        Mode::ImmediateAbsolute => format!(" #${:02x}, ${:02x}{:02x}", p[0], p[2], p[1]),
        Mode::ImmediateAbsoluteX => format!(" #${:02x}, ${:02x}{:02x}, x", p[0], p[2], p[1]),
        Mode::RegisterA => " A".to_string(),
    }
}

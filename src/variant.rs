use bitflags::bitflags;

bitflags! {
    /// The packed layout of the status register as it appears on the stack.
    ///
    ///   7  bit  0
    /// ---- ----
    /// NVTB DIZC
    /// |||| ||||
    /// |||| |||+- Carry
    /// |||| ||+-- Zero
    /// |||| |+--- Interrupt Disable
    /// |||| +---- Decimal
    /// |||+------ Break
    /// ||+------- Memory transfer (HuC6280); unused bit 5 everywhere else
    /// |+-------- Overflow
    /// +--------- Negative
    ///
    /// The CPU itself holds every flag as its own 0/1 byte and only builds
    /// this packed byte at push sites, consuming it again at pop sites.
    pub struct Status: u8 {
        const CARRY             = 0b0000_0001;
        const ZERO              = 0b0000_0010;
        const INTERRUPT_DISABLE = 0b0000_0100;
        const DECIMAL           = 0b0000_1000;
        const BREAK             = 0b0001_0000;
        const MEMORY            = 0b0010_0000;
        const OVERFLOW          = 0b0100_0000;
        const NEGATIVE          = 0b1000_0000;
    }
}

/// The processor model being emulated. Chosen at construction time and fixed
/// for the lifetime of the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// The original NMOS part, undocumented opcodes and all.
    Nmos6502,
    /// WDC 65C02.
    Cmos65C02,
    /// Rockwell R65C02: the 65C02 plus BBRn/BBSn/RMBn/SMBn.
    R65C02,
    /// Hudson HuC6280, the PC Engine CPU.
    HuC6280,
}

impl Variant {
    /// How many bytes a single instruction fetch pulls in through the host,
    /// starting at the opcode. Longest instruction plus one.
    pub fn max_fetch(self) -> usize {
        match self {
            Variant::HuC6280 => 8,
            _ => 4,
        }
    }

    /// Initial value of the T flag after init/reset and after interrupt entry.
    pub fn t_init(self) -> u8 {
        match self {
            Variant::HuC6280 => 0,
            _ => 1,
        }
    }

    /// Initial value of the B flag after init/reset.
    pub fn b_init(self) -> u8 {
        match self {
            Variant::HuC6280 => 0,
            _ => 1,
        }
    }

    /// The flags PLP restores from the stack. Everything not in the mask
    /// keeps its synthetic value (B and T read as 1 on anything but the HuC).
    pub fn plp_mask(self) -> Status {
        match self {
            Variant::HuC6280 => Status::all(),
            _ => Status::NEGATIVE
                | Status::OVERFLOW
                | Status::DECIMAL
                | Status::INTERRUPT_DISABLE
                | Status::ZERO
                | Status::CARRY,
        }
    }

    /// The flags an interrupt entry (BRK, IRQ, NMI) leaves untouched. The
    /// NMOS part famously clears nothing, the CMOS parts clear D, the HuC
    /// clears D and T.
    pub fn interrupt_preserved(self) -> Status {
        match self {
            Variant::Nmos6502 => Status::all(),
            Variant::HuC6280 => Status::all() - Status::DECIMAL - Status::MEMORY,
            _ => Status::all() - Status::DECIMAL,
        }
    }

    /// Where BRK (and a host-injected IRQ) reads the new program counter.
    pub fn irq_brk_vector(self) -> u16 {
        match self {
            Variant::HuC6280 => 0xFFF6,
            _ => 0xFFFE,
        }
    }

    pub fn nmi_vector(self) -> u16 {
        match self {
            Variant::HuC6280 => 0xFFFC,
            _ => 0xFFFA,
        }
    }

    pub fn reset_vector(self) -> u16 {
        match self {
            Variant::HuC6280 => 0xFFFE,
            _ => 0xFFFC,
        }
    }

    /// Cycles a taken conditional branch costs on top of its base cost.
    pub fn branch_penalty(self) -> u32 {
        match self {
            Variant::HuC6280 => 2,
            _ => 1,
        }
    }
}

/// Construction-time configuration. The variant picks the opcode table and
/// the behavioural quirks; the two switches cover the common second-source
/// differences without needing their own variants.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub variant: Variant,
    /// Honour the D flag in ADC/SBC. The Ricoh 2A03 in the NES leaves the
    /// flag addressable but wires the decimal correction off.
    pub bcd: bool,
    /// Count the one-cycle penalty for indexed reads and taken branches that
    /// cross a page.
    pub page_cross_penalty: bool,
}

impl Config {
    pub fn new(variant: Variant) -> Config {
        Config {
            variant,
            bcd: true,
            page_cross_penalty: true,
        }
    }

    /// The NES CPU: an NMOS 6502 with the decimal correction disconnected.
    pub fn ricoh_2a03() -> Config {
        Config {
            variant: Variant::Nmos6502,
            bcd: false,
            page_cross_penalty: true,
        }
    }
}

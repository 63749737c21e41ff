//! Memory-mapped register block.
//!
//! The block lives at a fabricated base address. Reads and writes go to a
//! plain register file; nothing is ever dereferenced at `base`.

use crate::HwError;
use strum::EnumCount;
use strum_macros::{EnumCount, EnumIter, IntoStaticStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumCount, EnumIter, IntoStaticStr)]
#[repr(usize)]
pub enum Register {
    TimerPeriod,
    TimerControl,
    WatchdogReset,
}

impl Register {
    pub fn index(self) -> usize {
        self as usize
    }
}

#[derive(Clone, Debug)]
pub struct Mmio {
    base: u32,
    registers: Vec<u32>,
    writes: u64,
}

impl Mmio {
    /// Maps `register_count` word registers at `base` and zeroes them.
    pub fn setup(base: u32, register_count: usize) -> Result<Self, HwError> {
        if base == 0 || base % 4 != 0 {
            return Err(HwError::MmioBase(base));
        }
        if register_count < Register::COUNT {
            return Err(HwError::MmioRegisters {
                needed: Register::COUNT,
                got: register_count,
            });
        }
        let mut registers = Vec::new();
        registers
            .try_reserve_exact(register_count)
            .map_err(|_| HwError::MmioRegisterFile(register_count))?;
        registers.resize(register_count, 0);
        tracing::debug!("MMIO block at {base:#x} with {register_count} registers");
        Ok(Self {
            base,
            registers,
            writes: 0,
        })
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    /// Bus address of `reg`. Wraps at the top of the 32-bit bus.
    pub fn address_of(&self, reg: Register) -> u32 {
        self.base.wrapping_add((reg.index() * 4) as u32)
    }

    pub fn read(&self, reg: Register) -> u32 {
        self.registers[reg.index()]
    }

    pub fn write(&mut self, reg: Register, value: u32) {
        let name: &'static str = reg.into();
        tracing::trace!("mmio {name} @ {:#x} <- {value:#x}", self.address_of(reg));
        self.registers[reg.index()] = value;
        self.writes += 1;
    }

    /// Number of writes since setup.
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

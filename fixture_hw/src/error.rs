use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HwError {
    #[error("failed to allocate main memory pool of {0} bytes")]
    MainPool(usize),
    #[error("all {0} memory pool slots are in use")]
    PoolSlotsExhausted(usize),
    #[error("failed to allocate DMA memory pool of {0} bytes")]
    DmaPool(usize),
    #[error("failed to set up DMA memory")]
    DmaSetup(#[source] Box<HwError>),
    #[error("invalid MMIO base address {0:#x}")]
    MmioBase(u32),
    #[error("MMIO block needs at least {needed} registers, got {got}")]
    MmioRegisters { needed: usize, got: usize },
    #[error("failed to allocate a register file of {0} registers")]
    MmioRegisterFile(usize),
    #[error("memory setup failed")]
    Memory(#[source] Box<HwError>),
    #[error("interrupt setup failed")]
    Interrupts(#[source] Box<HwError>),
}

impl HwError {
    /// The negative status code the failing setup step reports.
    pub fn code(&self) -> i32 {
        match self {
            HwError::MainPool(_)
            | HwError::PoolSlotsExhausted(_)
            | HwError::MmioBase(_)
            | HwError::MmioRegisters { .. }
            | HwError::MmioRegisterFile(_)
            | HwError::Memory(_) => -1,
            HwError::DmaPool(_) | HwError::DmaSetup(_) | HwError::Interrupts(_) => -2,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Number of I/O ports. Fixed; only the first `CONFIGURED_PORTS` get a
/// device personality.
pub const MAX_IO_PORTS: usize = 16;
pub const CONFIGURED_PORTS: usize = 4;

pub const I2C_SLAVE_ADDRESS: u8 = 0x50;
pub const UART_BAUD_RATE: u32 = 115_200;
pub const UART_DATA_BITS: u8 = 8;
pub const SPI_CLOCK_HZ: u32 = 10_000_000;
pub const I2C_CLOCK_HZ: u32 = 400_000;
/// Bytes moved by one SPI transfer.
pub const SPI_TRANSFER_SIZE: u64 = 32;

pub const TIMER_ENABLE: u32 = 1 << 0;
pub const TIMER_INTERRUPT_ENABLE: u32 = 1 << 1;
pub const WATCHDOG_MAGIC: u32 = 0x5A5A_A5A5;

/// Timer ticks between two maintenance passes.
pub const MAINTENANCE_INTERVAL: u32 = 100;
/// Ports past this many operations get their counters reset.
pub const MAX_OPERATIONS_PER_PORT: u64 = 1000;
/// Every n-th I2C transaction is not acknowledged.
pub const I2C_NACK_INTERVAL: u32 = 10;

/// The fabricated hardware parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Platform {
    pub mmio_base: u32,
    pub mmio_registers: usize,
    pub max_memory_pools: usize,
    pub main_memory_size: usize,
    pub dma_memory_size: usize,
    pub timer_frequency: u32,
    pub watchdog_timeout: u32,
    pub max_errors_per_port: u32,
}

pub const HW_PLATFORM: Platform = Platform {
    mmio_base: 0x4000_0000,
    mmio_registers: 64,
    max_memory_pools: 4,
    main_memory_size: 1 << 20,
    dma_memory_size: 64 << 10,
    timer_frequency: 1_000_000,
    watchdog_timeout: 1000,
    max_errors_per_port: 10,
};

impl Default for Platform {
    fn default() -> Self {
        HW_PLATFORM
    }
}

impl Platform {
    /// Timer reload value for a 1 ms tick.
    pub fn timer_period(&self) -> u32 {
        self.timer_frequency / 1000
    }
}

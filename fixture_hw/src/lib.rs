//! Stub hardware for profiler fixtures.
//!
//! Nothing here touches real devices. MMIO lands in a simulated register
//! file, memory pools are heap buffers handed out by a bump allocator, and
//! I/O "transfers" only move counters.

mod addr;
pub use addr::ByteAddr;

mod error;
pub use error::HwError;

mod platform;
pub use platform::*;

mod mmio;
pub use mmio::{Mmio, Register};

mod memory;
pub use memory::{MemoryPool, MemoryPools, PoolStats};

mod interrupts;
pub use interrupts::{Interrupt, InterruptController};

mod io;
pub use io::{GpioDirection, IoPort, IoStatus, IoSystem, PortKind, PortStats, SpiMode};

mod hardware;
pub use hardware::Hardware;

mod config;
pub use config::SimConfig;

mod simulation;
pub use simulation::{SimReport, run_simulation};

use crate::{HwError, IoSystem, MemoryPools, SimConfig};

/// Top-level hardware state: memory pools, I/O and a wrapping cycle state.
#[derive(Debug)]
pub struct Hardware {
    state: u32,
    advanced_after: u32,
    error_threshold: u32,
    memory: MemoryPools,
    io: IoSystem,
}

impl Hardware {
    /// Brings up memory, then interrupts. Memory is released again when
    /// interrupt setup fails.
    pub fn init(config: &SimConfig) -> Result<Self, HwError> {
        tracing::info!("Initializing hardware components...");
        let platform = &config.platform;

        let mut memory =
            MemoryPools::setup(platform).map_err(|e| HwError::Memory(Box::new(e)))?;
        let io = match IoSystem::setup_interrupts(platform) {
            Ok(io) => io,
            Err(e) => {
                memory.cleanup();
                return Err(HwError::Interrupts(Box::new(e)));
            }
        };

        tracing::info!("Hardware initialization complete");
        Ok(Self {
            state: 1,
            advanced_after: config.advanced_after,
            error_threshold: config.error_threshold,
            memory,
            io,
        })
    }

    pub fn process_cycle(&mut self, cycle: u32) {
        self.state = (self.state + 1) % 1000;
        if cycle > self.advanced_after {
            self.io.advanced_processing();
        }
    }

    pub fn check_error_condition(&self) -> bool {
        self.state > self.error_threshold
    }

    pub fn handle_error(&mut self) {
        tracing::warn!("Error condition detected!");
        self.state = 0;
    }

    pub fn cleanup(&mut self) {
        tracing::info!("Cleaning up hardware resources...");
        self.state = 0;
        self.memory.cleanup();
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn memory(&self) -> &MemoryPools {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut MemoryPools {
        &mut self.memory
    }

    pub fn io(&self) -> &IoSystem {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut IoSystem {
        &mut self.io
    }
}

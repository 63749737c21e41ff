//! I/O ports and their interrupt plumbing.
//!
//! Ports 0..4 are a UART, an SPI master, an I2C master and a GPIO bank. The
//! remaining ports stay inactive. A "transfer" only moves counters.

use crate::{
    CONFIGURED_PORTS, HwError, I2C_CLOCK_HZ, I2C_NACK_INTERVAL, I2C_SLAVE_ADDRESS, Interrupt,
    InterruptController, MAX_IO_PORTS, MAX_OPERATIONS_PER_PORT, Mmio, Platform, Register,
    SPI_CLOCK_HZ, SPI_TRANSFER_SIZE, TIMER_ENABLE, TIMER_INTERRUPT_ENABLE, UART_BAUD_RATE,
    UART_DATA_BITS, WATCHDOG_MAGIC,
};
use serde::Serialize;
use strum_macros::{Display, EnumIter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumIter, Serialize)]
pub enum PortKind {
    Uart,
    Spi,
    I2c,
    Gpio,
}

impl PortKind {
    pub fn of_port(id: usize) -> Option<Self> {
        match id {
            0 => Some(PortKind::Uart),
            1 => Some(PortKind::Spi),
            2 => Some(PortKind::I2c),
            3 => Some(PortKind::Gpio),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, Serialize)]
pub enum IoStatus {
    #[default]
    Inactive,
    Ready,
    Busy,
    Complete,
    Error,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpiMode {
    #[default]
    Mode0,
    Mode1,
    Mode2,
    Mode3,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GpioDirection {
    #[default]
    Input,
    Output,
}

#[derive(Clone, Debug, Default)]
pub struct IoPort {
    pub id: usize,
    pub status: IoStatus,
    pub data_ready: bool,
    pub data_size: u64,
    pub error_count: u32,
    pub interrupt_enabled: bool,
    pub pending: Option<Interrupt>,

    // UART
    pub baud_rate: u32,
    pub data_bits: u8,
    // SPI / I2C
    pub clock_speed: u32,
    pub spi_mode: SpiMode,
    pub address: u8,
    // GPIO
    pub direction: GpioDirection,
    pub pull_up: bool,
    pub gpio_state: bool,

    pub bytes_transferred: u64,
    pub operations_completed: u64,
}

impl IoPort {
    fn new(id: usize) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn kind(&self) -> Option<PortKind> {
        PortKind::of_port(self.id)
    }

    fn handle_uart_data(&mut self) -> bool {
        if self.data_ready {
            self.bytes_transferred += self.data_size;
            self.data_ready = false;
        }
        true
    }

    fn handle_spi_transfer(&mut self) -> bool {
        self.bytes_transferred += SPI_TRANSFER_SIZE;
        true
    }

    fn handle_i2c_transaction(&mut self, acked: bool) -> bool {
        if acked {
            self.bytes_transferred += self.data_size;
        } else {
            self.error_count += 1;
        }
        acked
    }

    fn handle_gpio_operation(&mut self) -> bool {
        self.gpio_state = !self.gpio_state;
        true
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PortStats {
    pub id: usize,
    pub kind: Option<PortKind>,
    pub status: IoStatus,
    pub bytes_transferred: u64,
    pub operations_completed: u64,
    pub error_count: u32,
    pub gpio_state: bool,
}

/// The port table together with the MMIO block and interrupt state.
#[derive(Clone, Debug)]
pub struct IoSystem {
    platform: Platform,
    ports: Vec<IoPort>,
    mmio: Mmio,
    interrupts: InterruptController,
    i2c_checks: u32,
}

impl IoSystem {
    pub fn setup_interrupts(platform: &Platform) -> Result<Self, HwError> {
        tracing::info!("Setting up interrupt handlers...");
        let ports = (0..MAX_IO_PORTS).map(IoPort::new).collect();
        let mmio = Self::setup_mmio(platform)
            .inspect_err(|_| tracing::error!("Failed to setup MMIO"))?;

        let mut io = Self {
            platform: platform.clone(),
            ports,
            mmio,
            interrupts: InterruptController::default(),
            i2c_checks: 0,
        };
        io.configure_interrupt_vectors();
        tracing::info!("Interrupt setup completed");
        Ok(io)
    }

    fn setup_mmio(platform: &Platform) -> Result<Mmio, HwError> {
        Mmio::setup(platform.mmio_base, platform.mmio_registers)
    }

    fn configure_interrupt_vectors(&mut self) {
        self.setup_timer_interrupt();
        for id in 0..CONFIGURED_PORTS {
            self.setup_io_interrupt(id);
        }
        self.setup_error_interrupts();
    }

    fn setup_timer_interrupt(&mut self) {
        tracing::info!("Configuring timer interrupt...");
        let period = self.platform.timer_period();
        self.mmio.write(Register::TimerPeriod, period);
        self.mmio
            .write(Register::TimerControl, TIMER_ENABLE | TIMER_INTERRUPT_ENABLE);
    }

    /// Gives port `id` its device personality and enables its interrupt.
    /// Unknown ids are ignored.
    pub fn setup_io_interrupt(&mut self, id: usize) {
        let Some(port) = self.ports.get_mut(id) else {
            return;
        };
        port.status = IoStatus::Ready;
        port.interrupt_enabled = true;

        match port.kind() {
            Some(PortKind::Uart) => {
                port.baud_rate = UART_BAUD_RATE;
                port.data_bits = UART_DATA_BITS;
            }
            Some(PortKind::Spi) => {
                port.clock_speed = SPI_CLOCK_HZ;
                port.spi_mode = SpiMode::Mode0;
            }
            Some(PortKind::I2c) => {
                port.clock_speed = I2C_CLOCK_HZ;
                port.address = I2C_SLAVE_ADDRESS;
            }
            Some(PortKind::Gpio) => {
                port.direction = GpioDirection::Output;
                port.pull_up = true;
            }
            None => {}
        }
    }

    fn setup_error_interrupts(&self) {
        // Memory, bus, parity and watchdog sources share the error line.
        tracing::info!("Setting up error interrupt handlers...");
    }

    /// Queues `size` bytes of inbound data on port `id`.
    pub fn receive(&mut self, id: usize, size: u64) {
        if let Some(port) = self.ports.get_mut(id) {
            port.data_ready = true;
            port.data_size = size;
        }
    }

    /// One pass of port processing, interrupt servicing and timer upkeep.
    pub fn advanced_processing(&mut self) {
        for id in 0..self.ports.len() {
            if self.ports[id].status == IoStatus::Ready {
                self.process_io_port(id);
            }
        }
        self.handle_pending_interrupts();
        self.update_system_timers();
    }

    /// Runs one operation on a ready port. Returns `false` if the port was
    /// not ready.
    pub fn process_io_port(&mut self, id: usize) -> bool {
        if !matches!(self.ports.get(id), Some(p) if p.status == IoStatus::Ready) {
            return false;
        }
        let acked = match PortKind::of_port(id) {
            Some(PortKind::I2c) => self.check_i2c_ack(),
            _ => true,
        };

        let port = &mut self.ports[id];
        port.status = IoStatus::Busy;
        let ok = match port.kind() {
            Some(PortKind::Uart) => port.handle_uart_data(),
            Some(PortKind::Spi) => port.handle_spi_transfer(),
            Some(PortKind::I2c) => port.handle_i2c_transaction(acked),
            Some(PortKind::Gpio) => port.handle_gpio_operation(),
            None => true,
        };
        port.operations_completed += 1;

        match (port.interrupt_enabled, ok) {
            (true, true) => {
                port.status = IoStatus::Complete;
                port.pending = Some(Interrupt::IoComplete);
            }
            (true, false) => {
                port.status = IoStatus::Ready;
                port.pending = Some(Interrupt::Error);
            }
            (false, _) => port.status = IoStatus::Ready,
        }
        true
    }

    /// Every `I2C_NACK_INTERVAL`-th check fails.
    fn check_i2c_ack(&mut self) -> bool {
        self.i2c_checks += 1;
        self.i2c_checks % I2C_NACK_INTERVAL != 0
    }

    pub fn handle_pending_interrupts(&mut self) {
        if self.interrupts.take_timer() {
            self.service_interrupt(Interrupt::Timer);
        }
        for id in 0..self.ports.len() {
            if let Some(irq) = self.ports[id].pending.take() {
                self.service_interrupt(irq);
            }
        }
    }

    pub fn service_interrupt(&mut self, irq: Interrupt) {
        self.interrupts.record(irq);
        match irq {
            Interrupt::Timer => self.handle_timer_interrupt(),
            Interrupt::IoComplete => self.handle_io_complete(),
            Interrupt::Error => self.handle_error_interrupt(),
        }
    }

    fn handle_timer_interrupt(&mut self) {
        if self.interrupts.tick_timer() {
            self.perform_periodic_maintenance();
        }
    }

    fn handle_io_complete(&mut self) {
        for port in &mut self.ports {
            if port.status == IoStatus::Complete {
                port.status = IoStatus::Ready;
            }
        }
    }

    fn handle_error_interrupt(&mut self) {
        tracing::info!("Handling error interrupt");
        self.check_memory_errors();
        self.check_bus_errors();
        self.check_parity_errors();
    }

    fn check_memory_errors(&self) {
        tracing::trace!("memory controller status: clean");
    }

    fn check_bus_errors(&self) {
        tracing::trace!("bus controller status: clean");
    }

    fn check_parity_errors(&self) {
        tracing::trace!("parity status: clean");
    }

    pub fn update_system_timers(&mut self) {
        self.interrupts.raise_timer();
        if self
            .interrupts
            .tick_system_time(self.platform.watchdog_timeout)
        {
            self.reset_watchdog();
        }
    }

    fn reset_watchdog(&mut self) {
        self.mmio.write(Register::WatchdogReset, WATCHDOG_MAGIC);
    }

    fn perform_periodic_maintenance(&mut self) {
        self.cleanup_completed_operations();
        self.update_statistics();
        self.check_system_health();
    }

    fn cleanup_completed_operations(&mut self) {
        for port in &mut self.ports {
            if port.operations_completed > MAX_OPERATIONS_PER_PORT {
                port.operations_completed = 0;
                port.error_count = 0;
            }
        }
    }

    fn update_statistics(&self) {
        let bytes: u64 = self.ports.iter().map(|p| p.bytes_transferred).sum();
        let errors: u32 = self.ports.iter().map(|p| p.error_count).sum();
        tracing::debug!(
            ticks = self.interrupts.timer_ticks(),
            "{bytes} bytes transferred, {errors} port errors"
        );
    }

    fn check_system_health(&mut self) {
        let max_errors = self.platform.max_errors_per_port;
        for port in &mut self.ports {
            if port.error_count > max_errors {
                tracing::warn!("High error count on port {}", port.id);
                port.status = IoStatus::Error;
            }
        }
    }

    pub fn ports(&self) -> &[IoPort] {
        &self.ports
    }

    pub fn mmio(&self) -> &Mmio {
        &self.mmio
    }

    pub fn interrupts(&self) -> &InterruptController {
        &self.interrupts
    }

    pub fn stats(&self) -> Vec<PortStats> {
        self.ports
            .iter()
            .filter(|p| p.status != IoStatus::Inactive)
            .map(|p| PortStats {
                id: p.id,
                kind: p.kind(),
                status: p.status,
                bytes_transferred: p.bytes_transferred,
                operations_completed: p.operations_completed,
                error_count: p.error_count,
                gpio_state: p.gpio_state,
            })
            .collect()
    }
}

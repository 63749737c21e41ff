use crate::{Hardware, HwError, PoolStats, PortStats, SimConfig};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct SimReport {
    pub cycles_run: u32,
    /// Cycle at which the error path fired and ended the run.
    pub error_cycle: Option<u32>,
    pub pools: Vec<PoolStats>,
    pub ports: Vec<PortStats>,
    pub timer_ticks: u32,
    pub watchdog_resets: u32,
    pub mmio_writes: u64,
}

/// Initializes the hardware, runs the cycle loop and tears everything down.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport, HwError> {
    let mut hw = Hardware::init(config)?;

    let mut cycles_run = 0;
    let mut error_cycle = None;
    for cycle in 0..config.cycles {
        hw.process_cycle(cycle);
        cycles_run += 1;

        if config.report_interval != 0 && cycle % config.report_interval == 0 {
            tracing::info!("Processed {cycle} cycles");
        }

        if hw.check_error_condition() {
            hw.handle_error();
            error_cycle = Some(cycle);
            break;
        }
    }

    hw.memory().print_stats();
    let report = SimReport {
        cycles_run,
        error_cycle,
        pools: hw.memory().stats(),
        ports: hw.io().stats(),
        timer_ticks: hw.io().interrupts().timer_ticks(),
        watchdog_resets: hw.io().interrupts().watchdog_resets(),
        mmio_writes: hw.io().mmio().writes(),
    };
    hw.cleanup();
    Ok(report)
}

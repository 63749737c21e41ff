use anyhow::Result;
use fixture_hw::{
    HW_PLATFORM, Hardware, HwError, IoStatus, Platform, PortKind, SPI_TRANSFER_SIZE, SimConfig,
    run_simulation,
};

#[test]
fn test_default_run_takes_error_path() -> Result<()> {
    let report = run_simulation(&SimConfig::default())?;

    // The state starts at 1 and gains one per cycle, so it passes 950 at cycle 949.
    assert_eq!(report.error_cycle, Some(949));
    assert_eq!(report.cycles_run, 950);
    // Cycles 501..=949 run the advanced path; each services the previous tick.
    assert_eq!(report.timer_ticks, 448);
    assert_eq!(report.watchdog_resets, 0);
    assert_eq!(report.mmio_writes, 2);

    assert_eq!(report.pools.len(), 2);
    assert!(report.pools.iter().all(|p| p.allocated == 0));

    let port = |kind| {
        report
            .ports
            .iter()
            .find(|p| p.kind == Some(kind))
            .expect("configured port")
    };
    assert_eq!(report.ports.len(), 4);
    assert_eq!(port(PortKind::Spi).bytes_transferred, 449 * SPI_TRANSFER_SIZE);
    assert_eq!(port(PortKind::Uart).operations_completed, 449);
    assert!(port(PortKind::Gpio).gpio_state);

    let i2c = port(PortKind::I2c);
    assert_eq!(i2c.status, IoStatus::Error);
    assert_eq!(i2c.error_count, 20);
    assert_eq!(i2c.operations_completed, 201);
    Ok(())
}

#[test]
fn test_short_run_never_reaches_advanced_path() -> Result<()> {
    let config = SimConfig {
        cycles: 100,
        ..SimConfig::default()
    };
    let report = run_simulation(&config)?;
    assert_eq!(report.cycles_run, 100);
    assert_eq!(report.error_cycle, None);
    assert!(report.ports.iter().all(|p| p.operations_completed == 0));
    Ok(())
}

#[test]
fn test_config_file_drives_run() -> Result<()> {
    let config = SimConfig::from_json(
        r#"{
            "cycles": 300,
            "report_interval": 0,
            "advanced_after": 0,
            "error_threshold": 2000,
            "platform": { "watchdog_timeout": 100 }
        }"#,
    )?;
    let report = run_simulation(&config)?;
    assert_eq!(report.cycles_run, 300);
    assert_eq!(report.error_cycle, None);
    assert_eq!(report.watchdog_resets, 2);
    assert_eq!(report.mmio_writes, 4);
    Ok(())
}

#[test]
fn test_init_failure_codes() {
    let init = |platform: Platform| {
        Hardware::init(&SimConfig {
            platform,
            ..SimConfig::default()
        })
        .unwrap_err()
    };

    let err = init(Platform {
        main_memory_size: usize::MAX,
        ..HW_PLATFORM
    });
    assert!(matches!(&err, HwError::Memory(e) if **e == HwError::MainPool(usize::MAX)));
    assert_eq!(err.code(), -1);

    let err = init(Platform {
        max_memory_pools: 1,
        ..HW_PLATFORM
    });
    assert!(matches!(&err, HwError::Memory(e) if matches!(**e, HwError::DmaSetup(_))));
    assert_eq!(err.code(), -1);

    let err = init(Platform {
        mmio_base: 0x4000_0003,
        ..HW_PLATFORM
    });
    assert_eq!(
        err,
        HwError::Interrupts(Box::new(HwError::MmioBase(0x4000_0003)))
    );
    assert_eq!(err.code(), -2);
}

#[test]
fn test_oversized_platform_values_from_config() -> Result<()> {
    let config = SimConfig::from_json(
        r#"{ "cycles": 10, "platform": { "max_memory_pools": 18446744073709551615 } }"#,
    )?;
    let report = run_simulation(&config)?;
    assert_eq!(report.cycles_run, 10);
    assert_eq!(report.pools.len(), 2);

    let config =
        SimConfig::from_json(r#"{ "platform": { "mmio_registers": 18446744073709551615 } }"#)?;
    let err = run_simulation(&config).unwrap_err();
    assert_eq!(
        err,
        HwError::Interrupts(Box::new(HwError::MmioRegisterFile(usize::MAX)))
    );
    assert_eq!(err.code(), -2);

    let config = SimConfig::from_json(
        r#"{ "cycles": 600, "platform": { "mmio_base": 4294967292, "watchdog_timeout": 10 } }"#,
    )?;
    let report = run_simulation(&config)?;
    assert!(report.watchdog_resets > 0);
    Ok(())
}

#[test]
fn test_hardware_memory_round_trip() -> Result<()> {
    let mut hw = Hardware::init(&SimConfig::default())?;
    let addr = hw.memory_mut().allocate(64);
    assert_eq!(hw.memory().pool_of(addr.unwrap()), Some(0));
    assert!(hw.memory_mut().free(addr));

    hw.process_cycle(0);
    assert_eq!(hw.state(), 2);
    assert!(!hw.check_error_condition());
    hw.cleanup();
    assert!(hw.memory().is_empty());
    assert_eq!(hw.state(), 0);
    Ok(())
}

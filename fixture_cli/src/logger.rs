use clap::Args;

/// Logging options shared by every fixture binary.
#[derive(Clone, Debug, Args)]
pub struct LogArgs {
    /// Print logs as a span tree instead of flat lines.
    #[arg(long, global = true)]
    pub forest: bool,

    /// Only print program output.
    #[arg(short, long, global = true, conflicts_with = "forest")]
    pub quiet: bool,
}

impl LogArgs {
    /// Installs the global subscriber. Logs go to stderr so that stdout only
    /// carries the program's own output. `RUST_LOG` overrides the level.
    pub fn setup_logger(&self) {
        use tracing_forest::ForestLayer;
        use tracing_subscriber::{
            EnvFilter, Registry, filter::LevelFilter, fmt, layer::SubscriberExt,
            util::SubscriberInitExt,
        };

        if self.quiet {
            return;
        }

        let default_filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::INFO.into())
            .from_env_lossy();

        let fmt_layer = fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .without_time();

        let result = Registry::default()
            .with(self.forest.then_some(ForestLayer::default()))
            .with((!self.forest).then_some(fmt_layer))
            .with(default_filter)
            .try_init();
        if let Err(e) = result {
            eprintln!("could not install logger: {e}");
        }
    }
}

use anyhow::Context;
use bridge::bridge::GuiBridge;
use bridge::model::VisualizationModel;
use clap::Parser;
use generator::beacon::{build_fixture, BeaconProfile};
use magnocore::acquisition::{ReplayFixture, SampleSource};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::ReplayConfig;
use workflow::runner::Runner;

mod bridge;
mod generator;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Replay driver for the magnetic beacon localization core")]
struct Args {
    /// Replay a recorded CSV fixture (x,y,z per line) instead of a
    /// synthetic capture
    #[arg(long)]
    fixture: Option<PathBuf>,
    /// Load replay parameters from YAML
    #[arg(long)]
    workflow: Option<PathBuf>,
    #[arg(long, default_value_t = 0.01)]
    sampling_interval: f64,
    #[arg(long, default_value_t = 1)]
    refresh_rate: usize,
    #[arg(long, default_value_t = 8)]
    normalise_window: usize,
    /// Ticks to drive in a single offline run
    #[arg(long, default_value_t = 2000)]
    ticks: usize,
    /// Replay continuously at the sampling interval until Ctrl+C
    #[arg(long, default_value_t = false)]
    watch: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = args.workflow {
        ReplayConfig::load(path)?
    } else {
        ReplayConfig::from_args(args.sampling_interval, args.refresh_rate, args.normalise_window)
    };

    let source: Box<dyn SampleSource> = if let Some(path) = &args.fixture {
        let fixture = ReplayFixture::from_path(path)
            .with_context(|| format!("reading fixture {}", path.display()))?;
        if fixture.is_empty() {
            log::warn!("fixture is empty, replay will idle");
        }
        Box::new(fixture)
    } else {
        let profile = BeaconProfile {
            frame_size: config.to_pipeline_config().frame_size(),
            ..Default::default()
        };
        Box::new(build_fixture(&profile))
    };

    let mut runner = Runner::new(&config, source)?;
    let latest = runner.subscribe();
    let gui_bridge = GuiBridge::new(runner.subscribe());

    if args.watch {
        gui_bridge.publish_status("Replaying continuously (Ctrl+C to stop)...");
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating replay runtime")?;
        runtime.block_on(async {
            let mut ticker =
                tokio::time::interval(Duration::from_secs_f64(config.sampling_interval));
            let ctrl_c = signal::ctrl_c();
            tokio::pin!(ctrl_c);
            loop {
                tokio::select! {
                    result = &mut ctrl_c => {
                        result.context("awaiting Ctrl+C to exit")?;
                        break;
                    }
                    _ = ticker.tick() => {
                        runner.step();
                    }
                }
            }
            Ok::<(), anyhow::Error>(())
        })?;
    } else {
        let summary = runner.run(args.ticks);

        println!(
            "Offline replay -> ticks {}, cycles {}, skipped {}, last position {:?}",
            summary.ticks, summary.cycles, summary.skipped, summary.last_position
        );

        let peaks = latest
            .borrow()
            .as_ref()
            .map(|output| output.peaks.clone())
            .unwrap_or_default();
        let model = VisualizationModel {
            cycles: summary.cycles,
            peaks,
            position: summary.last_position,
        };
        gui_bridge.publish(&model)?;
        gui_bridge.publish_status("Offline replay results ready.");

        let report = serde_json::to_string(&summary).context("serializing run summary")?;
        let report_path = PathBuf::from("tools/data/replay_summary.log");
        if let Some(parent) = report_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(report_path)?;
        writeln!(file, "{}", report)?;
    }

    Ok(())
}

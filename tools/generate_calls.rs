//! Synthetic Call Log Generator
//!
//! Writes a call log CSV mixing legitimate callers with injected robocaller
//! patterns (high volume, short duration), for exercising the pipeline end
//! to end.

use anyhow::Result;
use rand::Rng;
use robocall_detection::types::CallRecord;
use tracing::info;

/// Call generator for testing
struct CallGenerator {
    rng: rand::rngs::ThreadRng,
    humans: usize,
    bots: usize,
    receivers: usize,
}

impl CallGenerator {
    fn new(humans: usize, bots: usize, receivers: usize) -> Self {
        Self {
            rng: rand::thread_rng(),
            humans,
            bots,
            receivers,
        }
    }

    /// Generate a call from an ordinary account: moderate volume pool,
    /// conversational durations
    fn generate_legitimate(&mut self) -> CallRecord {
        let caller = format!("human_{:04}", self.rng.gen_range(0..self.humans));
        CallRecord::new(
            caller,
            self.random_receiver(),
            self.rng.gen_range(20.0..300.0),
        )
    }

    /// Generate a call from a robocaller account: small caller pool so volume
    /// concentrates, durations of a few seconds
    fn generate_robocall(&mut self) -> CallRecord {
        let caller = format!("bot_{:02}", self.rng.gen_range(0..self.bots));
        CallRecord::new(
            caller,
            self.random_receiver(),
            self.rng.gen_range(1.0..12.0),
        )
    }

    fn random_receiver(&mut self) -> String {
        format!("recv_{:04}", self.rng.gen_range(0..self.receivers))
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("generate_calls=info".parse()?),
        )
        .init();

    info!("Starting synthetic call log generator");

    // Parse arguments
    let args: Vec<String> = std::env::args().collect();
    let output_path = args.get(1).map(|s| s.as_str()).unwrap_or("call_logs.csv");
    let count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(20_000);
    let robocall_rate: f64 = args.get(3).and_then(|s| s.parse().ok()).unwrap_or(0.2);
    let humans: usize = args.get(4).and_then(|s| s.parse().ok()).unwrap_or(200);
    let bots: usize = args.get(5).and_then(|s| s.parse().ok()).unwrap_or(10);

    info!(
        output_path = %output_path,
        count = count,
        robocall_rate = robocall_rate,
        humans = humans,
        bots = bots,
        "Configuration loaded"
    );

    let mut generator = CallGenerator::new(humans, bots, 500);
    let mut rng = rand::thread_rng();
    let mut writer = csv::Writer::from_path(output_path)?;

    let mut legitimate_count = 0u64;
    let mut robocall_count = 0u64;

    for _ in 0..count {
        let record = if rng.gen_bool(robocall_rate) {
            robocall_count += 1;
            generator.generate_robocall()
        } else {
            legitimate_count += 1;
            generator.generate_legitimate()
        };
        writer.serialize(&record)?;
    }
    writer.flush()?;

    info!(
        "Completed! Wrote {} calls ({} legitimate, {} robocalls) to {}",
        count, legitimate_count, robocall_count, output_path
    );

    Ok(())
}

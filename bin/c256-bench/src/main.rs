use anyhow::{bail, Context};
use c256_codec::{active_engine, Block, Codec, CodecParams};
use clap::Parser;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Round-trip timing harness: random originals, random erasures, verify.
#[derive(Parser)]
struct Cli {
    /// Original block count
    #[arg(short = 'k', default_value_t = 48)] originals: usize,
    /// Recovery block count
    #[arg(short = 'm', default_value_t = 96)] recovery: usize,
    /// Bytes per block
    #[arg(short = 'l', default_value_t = 1400)] block_bytes: usize,
    /// Trial count
    trials: u32,
    /// Fixed PRNG seed (defaults to entropy)
    #[arg(long)] seed: Option<u64>,
}

#[derive(Default)]
struct Totals {
    encode: Duration,
    decode: Duration,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.trials == 0 {
        bail!("trial count must be at least 1");
    }

    c256_codec::initialize().context("field table setup")?;
    let params = CodecParams::new(cli.originals, cli.recovery, cli.block_bytes)
        .context("invalid codec parameters")?;
    if !params.is_word_aligned() {
        warn!("block size {} is not a multiple of {} bytes; tail bytes take the slow path", cli.block_bytes, c256_core::WORD_BYTES);
    }
    let codec = Codec::with_default_tables(params);

    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);

    info!(
        "Params: block-size = {} k = {} m = {} trials = {} seed = {:#x} engine = {}",
        cli.block_bytes, cli.originals, cli.recovery, cli.trials, seed, active_engine()
    );

    let mut totals = Totals::default();
    let mut last_print = None;
    for trial in 0..cli.trials {
        let percent = trial * 100 / cli.trials;
        if percent % 10 == 0 && last_print != Some(percent) {
            last_print = Some(percent);
            info!("......{}%", percent);
        }
        run_trial(&codec, &mut rng, &mut totals).with_context(|| format!("trial {}", trial))?;
    }

    let bytes = (cli.block_bytes * cli.originals) as f64;
    report("Encoder", totals.encode, cli.trials, bytes);
    report("Decoder", totals.decode, cli.trials, bytes);
    Ok(())
}

fn run_trial(codec: &Codec<'_>, rng: &mut StdRng, totals: &mut Totals) -> anyhow::Result<()> {
    let params = *codec.params();
    let (k, m, block_bytes) = (params.original_count(), params.recovery_count(), params.block_bytes());

    let originals: Vec<Vec<u8>> = (0..k)
        .map(|_| {
            let mut v = vec![0u8; block_bytes];
            rng.fill(v.as_mut_slice());
            v
        })
        .collect();
    let refs: Vec<&[u8]> = originals.iter().map(|b| b.as_slice()).collect();

    let mut recovery = vec![0u8; m * block_bytes];
    let t0 = Instant::now();
    codec.encode_into(&refs, &mut recovery)?;
    totals.encode += t0.elapsed();

    // Lose as many originals as the recovery rows can cover.
    let erasures = m.min(k);
    let lost = index::sample(rng, k, erasures);
    let mut slots: Vec<(u8, Vec<u8>)> = (0..k).map(|i| (i as u8, originals[i].clone())).collect();
    for (j, gap) in lost.iter().enumerate() {
        let start = j * block_bytes;
        slots[gap] = (params.recovery_row(j)?, recovery[start..start + block_bytes].to_vec());
    }
    let mut blocks: Vec<Block> = slots.iter_mut().map(|(r, d)| Block::new(*r, d.as_mut_slice())).collect();

    let t1 = Instant::now();
    codec.decode(&mut blocks)?;
    totals.decode += t1.elapsed();

    for b in &blocks {
        if *b.data != *originals[b.row as usize] {
            bail!("data corruption in row {}", b.row);
        }
    }
    Ok(())
}

fn report(label: &str, total: Duration, trials: u32, bytes: f64) {
    let usec = total.as_secs_f64() * 1e6 / trials as f64;
    if usec > 0.0 {
        info!("{}: {:.2} usec, {:.2} MBps", label, usec, bytes / usec);
    } else {
        info!("{}: too fast to measure", label);
    }
}

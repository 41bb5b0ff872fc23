use std::{
    fs,
    path::PathBuf,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use common::{
    error::LogError,
    log::{init_log, LOG_INFO},
};
use mutator::{engine::MutateCfg, mangle, random::FastRandOracle, Dictionary, Input};

#[derive(Parser, Debug)]
#[command(name = "mutagen-demo")]
pub struct Arguments {
    #[arg(long, default_value = LOG_INFO)]
    pub log_config: PathBuf,

    /// Seed input file to mutate.
    pub input: PathBuf,

    /// Where to write the mutated output.
    pub output: PathBuf,

    /// Number of `mangle` rounds to apply.
    #[arg(long, default_value_t = 1)]
    pub rounds: usize,

    /// Baseline operator applications per round (`MutateCfg::mutations_per_run`).
    #[arg(long, default_value_t = 4)]
    pub mutations_per_run: usize,

    /// Cap on how large the mutated buffer may grow, in bytes.
    #[arg(long, default_value_t = 1 << 16)]
    pub max_size: usize,

    /// Restrict every written byte to printable ASCII.
    #[arg(long)]
    pub printable: bool,

    /// Optional dictionary file, one entry per line.
    #[arg(long)]
    pub dictionary: Option<PathBuf>,
}

fn main() -> Result<()> {
    let opt = Arguments::parse();

    init_log(&opt.log_config)?;
    log::trace!("Args: {:#?}", opt);

    let seed = fs::read(&opt.input).with_context(|| format!("Failed to read input file: {:?}", opt.input))?;
    let mut input = Input::from_bytes(seed, opt.max_size);

    let mut dictionary = Dictionary::default();
    if let Some(path) = &opt.dictionary {
        let raw = fs::read(path)
            .with_context(|| format!("Failed to read dictionary file: {:?}", path))
            .log_error();
        if let Some(raw) = raw {
            dictionary.scan_memory_block(&raw);
        }
    }
    let entries = dictionary.as_byte_strings();

    let cfg = MutateCfg {
        mutations_per_run: opt.mutations_per_run,
        only_printable: opt.printable,
        dictionary: &entries,
        cmp_feedback_enabled: false,
        cmp_feedback: None,
        corpus: None,
        time_since_last_coverage: Duration::from_millis(0),
    };

    let mut rng = FastRandOracle;
    for round in 0..opt.rounds {
        log::debug!("mangle round {round}");
        mangle(&mut input, &mut rng, &cfg, 0);
    }

    fs::write(&opt.output, input.as_slice())
        .with_context(|| format!("Failed to write output file: {:?}", opt.output))?;

    log::info!(
        "wrote {} bytes ({} rounds) to {:?}",
        input.size(),
        opt.rounds,
        opt.output
    );

    Ok(())
}

use std::path::PathBuf;
use std::time::{Duration, Instant};

use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use structopt::StructOpt;

use chip8_vm::emulator::input::ScriptedInput;
use chip8_vm::emulator::key::Key;
use chip8_vm::emulator::output::{DummyOutput, EmulatorOutput, TextOutput};
use chip8_vm::emulator::Emulator;
use chip8_vm::error::Result;

const TICK: Duration = Duration::from_micros(1_000_000 / 60);

/// Run a CHIP-8 program without a window, optionally printing frames as text.
#[derive(StructOpt, Debug)]
#[structopt(name = "chip8-vm")]
struct Opt {
    /// Instructions to execute per 60 Hz timer tick
    #[structopt(long, default_value = "10")]
    cycles_per_tick: usize,

    /// Stop after this many ticks instead of running forever
    #[structopt(long)]
    ticks: Option<u64>,

    /// Seed for the random number generator
    #[structopt(long)]
    seed: Option<u64>,

    /// Hold this key (a hex digit) down for the whole run
    #[structopt(long, parse(try_from_str = parse_key))]
    key: Option<Key>,

    /// Print every completed frame to stdout
    #[structopt(long)]
    print_frames: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn parse_key(src: &str) -> std::result::Result<Key, String> {
    let mut chars = src.chars();
    match (chars.next().and_then(Key::from_char), chars.next()) {
        (Some(key), None) => Ok(key),
        _ => Err(format!("expected a single hex digit, got {:?}", src)),
    }
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_default_env();
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        2 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

fn main() -> Result<()> {

    // Get configuration and read input file
    let opt = Opt::from_args();
    init_logging(opt.verbose);
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    let rng = match opt.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    // Load instructions into emulator memory
    let mut emulator = Emulator::with_rng(rng);
    emulator.load(&program)?;

    let mut output: Box<dyn EmulatorOutput> = if opt.print_frames {
        Box::new(TextOutput::new(std::io::stdout()))
    } else {
        Box::new(DummyOutput::new())
    };

    let mut input = ScriptedInput::new(vec![opt.key]);

    // Start execution
    let mut ticks = 0;
    while opt.ticks.map_or(true, |limit| ticks < limit) {
        let started = Instant::now();
        emulator.tick(&mut input, output.as_mut(), opt.cycles_per_tick)?;
        ticks += 1;
        if let Some(rest) = TICK.checked_sub(started.elapsed()) {
            std::thread::sleep(rest);
        }
    }

    log::info!("Stopped after {} ticks", ticks);
    Ok(())
}

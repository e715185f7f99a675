use std::path::PathBuf;

use structopt::StructOpt;

use chip_8_term::emulator::driver::{Config, Driver};
use chip_8_term::emulator::quirks::Quirks;
use chip_8_term::emulator::Flow;
use chip_8_term::emulator::{input::DummyInput, output::DummyOutput};

/// Runs a program without a terminal and prints the display at the end.
#[derive(StructOpt)]
struct Opt {
    /// Interpreter to imitate: baseline, chip8, schip or xochip
    #[structopt(long, default_value = "baseline")]
    quirks: Quirks,

    /// Instructions per frame
    #[structopt(long, default_value = "15")]
    batch: usize,

    /// Stop after this many frames
    #[structopt(long, default_value = "600")]
    frames: usize,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;

    let config = Config {
        batch: opt.batch,
        quirks: opt.quirks,
        ..Config::default()
    };
    let mut driver = Driver::new(config, DummyInput::new(), DummyOutput::new(), &program)?;

    // Run as fast as possible
    for frame in 0..opt.frames {
        if let Flow::Exit(code) = driver.frame()? {
            log::info!("Program exited with code {} after {} frames", code, frame + 1);
            break;
        }
    }

    print!("{}", driver.emulator().framebuffer());
    Ok(())
}

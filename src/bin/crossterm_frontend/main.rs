use std::path::PathBuf;
use std::time::Duration;

use structopt::StructOpt;

use chip_8_term::emulator::driver::{Config, Driver, DEFAULT_BATCH};
use chip_8_term::emulator::quirks::Quirks;

mod crossterm_io;
use crossterm_io::{CrosstermInput, CrosstermOutput};

/// The program options.
#[derive(StructOpt)]
struct Opt {
    /// Interpreter to imitate: baseline, chip8, schip or xochip
    #[structopt(long, default_value = "baseline")]
    quirks: Quirks,

    /// Override the profile: shift VX in place, ignoring VY (true or false)
    #[structopt(long)]
    shift: Option<bool>,

    /// Override the profile: advance I past the registers stored or loaded
    #[structopt(long)]
    load_store: Option<bool>,

    /// Override the profile: jump to XNN + VX instead of NNN + V0
    #[structopt(long)]
    jump: Option<bool>,

    /// Override the profile: draw 16x16 sprites for DXY0 in lores mode
    #[structopt(long)]
    wide_sprites: Option<bool>,

    /// Override the profile: draw 8x16 sprites for DXY0 in lores mode
    #[structopt(long)]
    tall_sprites: Option<bool>,

    /// Instructions per timer tick
    #[structopt(long, default_value = "15")]
    batch: usize,

    /// Timer ticks per second
    #[structopt(long, default_value = "60")]
    hz: u32,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

impl Opt {
    fn config(&self) -> Config {
        let mut quirks = self.quirks;
        quirks.shift = self.shift.unwrap_or(quirks.shift);
        quirks.load_store = self.load_store.unwrap_or(quirks.load_store);
        quirks.jump = self.jump.unwrap_or(quirks.jump);
        quirks.wide_sprites = self.wide_sprites.unwrap_or(quirks.wide_sprites);
        quirks.tall_sprites = self.tall_sprites.unwrap_or(quirks.tall_sprites);
        Config {
            batch: if self.batch == 0 { DEFAULT_BATCH } else { self.batch },
            tick: Duration::from_secs(1) / self.hz.max(1),
            quirks,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {

    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(&opt.input)?;
    let config = opt.config();
    log::debug!("{:?}", config);

    // The terminal is restored when the driver is dropped, before exiting
    let code = {
        let mut driver = Driver::new(config, CrosstermInput, CrosstermOutput::new()?, &program)?;
        driver.run()?
    };

    log::info!("Exiting with code {}", code);
    std::process::exit(code);
}

#[cfg(test)]
mod tests {

    use super::*;

    fn config(args: &[&str]) -> Config {
        Opt::from_iter(std::iter::once("chip-8-term").chain(args.iter().copied())).config()
    }

    #[test]
    fn profile_is_used_as_is() {
        assert_eq!(config(&["--quirks", "schip", "rom.ch8"]).quirks, Quirks::schip());
    }

    #[test]
    fn overrides_can_clear_a_profile_quirk() {
        let quirks = config(&["--quirks", "schip", "--jump", "false", "rom.ch8"]).quirks;
        assert!(!quirks.jump);
        assert_eq!(quirks.shift, Quirks::schip().shift);
    }

    #[test]
    fn overrides_can_set_a_quirk() {
        let quirks = config(&["--load-store", "true", "rom.ch8"]).quirks;
        assert!(quirks.load_store);
        assert!(Quirks::baseline().shift && quirks.shift);
    }

    #[test]
    fn zero_batch_falls_back_to_the_default() {
        let config = config(&["--batch", "0", "--hz", "30", "rom.ch8"]);
        assert_eq!(config.batch, DEFAULT_BATCH);
        assert_eq!(config.tick, Duration::from_secs(1) / 30);
    }
}

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use log::info;

use emu8_core::{Chip8, Config, Quirks};

mod run;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Frontend {
    /// Half block graphics in the terminal; keys read from the terminal.
    Terminal,
    /// An SDL2 window (needs the `sdl` feature).
    Sdl,
}

/// Runs a Chip-8 program read from stdin, e.g. `chip8 < pong.ch8`.
///
/// Keys 1234/QWER/ASDF/ZXCV map onto the hex keypad; Esc quits.
#[derive(Parser, Debug)]
#[command(name = "chip8", version, about, long_about = None)]
pub struct Cli {
    /// Where frames are shown and keys come from.
    #[arg(long, value_enum, default_value_t = Frontend::Terminal)]
    pub frontend: Frontend,

    /// Size multiplier for each pixel of the SDL window.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..=64))]
    pub scale: u32,

    /// Seed for the random number instruction, for repeatable runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Have Fx1E set VF when I runs past 0xFFF, as some older programs expect.
    #[arg(long, default_value_t = false)]
    pub add_i_overflow_flag: bool,

    /// Stop cleanly after this many ticks (60 per second).
    #[arg(long, value_name = "N")]
    pub max_ticks: Option<u64>,
}

impl Cli {
    fn config(&self) -> Config {
        let config = Config::default().with_quirks(Quirks {
            add_i_overflow_flag: self.add_i_overflow_flag,
        });
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    if cli.frontend == Frontend::Sdl && !cfg!(feature = "sdl") {
        Cli::command()
            .error(
                ErrorKind::InvalidValue,
                "this build has no SDL support; rebuild with `--features sdl`",
            )
            .exit();
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("chip8: expected a program on stdin\n");
        let _ = Cli::command().write_help(&mut io::stderr());
        return ExitCode::from(2);
    }

    let mut chip8 = match Chip8::load(&mut stdin.lock(), cli.config()) {
        Ok(chip8) => chip8,
        Err(err) => {
            eprintln!("chip8: {}", err);
            if err.is_load_error() {
                eprintln!("chip8: programs must be between 1 and 3584 bytes");
            }
            return ExitCode::from(2);
        }
    };

    match run::run(&mut chip8, &cli) {
        Ok(summary) => {
            info!("ran {} ticks, stopped by {:?}", summary.ticks, summary.stop);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("chip8: {}", err);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["chip8"]).unwrap();
        assert_eq!(cli.frontend, Frontend::Terminal);
        assert_eq!(cli.scale, 10);
        assert_eq!(cli.max_ticks, None);
        assert_eq!(cli.config(), Config::default());
    }

    #[test]
    fn test_cli_maps_onto_config() {
        let cli = Cli::try_parse_from([
            "chip8",
            "--frontend",
            "sdl",
            "--seed",
            "42",
            "--add-i-overflow-flag",
            "--max-ticks",
            "600",
        ])
        .unwrap();
        assert_eq!(cli.frontend, Frontend::Sdl);
        assert_eq!(cli.max_ticks, Some(600));
        let config = cli.config();
        assert_eq!(config.seed, Some(42));
        assert!(config.quirks.add_i_overflow_flag);
    }

    #[test]
    fn test_cli_rejects_bad_scale() {
        let err = Cli::try_parse_from(["chip8", "--scale", "0"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }
}

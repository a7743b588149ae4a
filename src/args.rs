use std::env;
use std::path::PathBuf;

/// Default dataset root, override with `--data-dir=`.
pub const DEFAULT_DATA_DIR: &str = "./data";
/// Default plot location, override with `--output=`.
pub const DEFAULT_OUTPUT: &str = "./output/matches.png";

#[derive(Debug, Clone)]
pub enum Mode {
    /// Match one discovered pair and write the plot
    Match,
    /// Print every discovered pair and exit
    ListPairs,
}

#[derive(Debug)]
pub struct Args {
    pub mode: Mode,
    pub data_dir: PathBuf,
    pub output: PathBuf,
    pub pair_index: usize,
    pub debug_mode: bool,
}

impl Args {
    pub fn parse() -> Option<Self> {
        let args: Vec<String> = env::args().collect();

        let mut mode = Mode::Match;
        let mut data_dir = PathBuf::from(DEFAULT_DATA_DIR);
        let mut output = PathBuf::from(DEFAULT_OUTPUT);
        let mut pair_index: usize = 0;
        let mut debug_mode = false;

        for arg in args.iter().skip(1) {
            if arg == "--help" || arg == "-h" {
                print_help();
                return None;
            } else if arg == "--version" || arg == "-v" {
                println!(
                    "Sentinel Match Run v{} ({})",
                    env!("APP_VERSION_DISPLAY"),
                    env!("APP_BUILD_YEAR")
                );
                return None;
            } else if arg == "--debug" {
                debug_mode = true;
            } else if arg == "--list-pairs" {
                mode = Mode::ListPairs;
            } else if let Some(rest) = arg.strip_prefix("--data-dir=") {
                data_dir = PathBuf::from(rest);
            } else if let Some(rest) = arg.strip_prefix("--output=") {
                output = PathBuf::from(rest);
            } else if let Some(rest) = arg.strip_prefix("--pair=") {
                match rest.parse::<usize>() {
                    Ok(index) => pair_index = index,
                    Err(_) => {
                        eprintln!("❌ Invalid pair index: {}", rest);
                        return None;
                    }
                }
            } else {
                eprintln!("❌ Unknown argument: {}", arg);
                print_help();
                return None;
            }
        }

        Some(Args {
            mode,
            data_dir,
            output,
            pair_index,
            debug_mode,
        })
    }
}

fn print_help() {
    println!("🛰️ Sentinel Tile Matching Tool");
    println!();
    println!("USAGE:");
    println!("    sentinel-match-run [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("    (no flags)          Match the first discovered pair under {DEFAULT_DATA_DIR}");
    println!("    --data-dir=PATH     Dataset root to scan (default: {DEFAULT_DATA_DIR})");
    println!("    --output=PATH       Where to write the plot (default: {DEFAULT_OUTPUT})");
    println!("    --pair=N            Match the N-th discovered pair (default: 0)");
    println!("    --list-pairs        Print every discovered pair and exit");
    println!("    --debug             Enable debug logging");
    println!("    --help, -h          Show this help message");
    println!("    --version, -v       Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    sentinel-match-run --data-dir=/data/sentinel2");
    println!("    sentinel-match-run --data-dir=/data/sentinel2 --list-pairs");
    println!("    sentinel-match-run --data-dir=/data/sentinel2 --pair=2 --output=./plots/t32.png");
}

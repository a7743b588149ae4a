use std::process;

use env_logger::{Builder, Env};

use sentinel_match_run::args::{Args, Mode};
use sentinel_match_run::error::{RunError, RunResult};
use sentinel_match_run::loader::load_band_triplet;
use sentinel_match_run::matching::{run_matching, MatcherConfig};
use sentinel_match_run::pairing::{find_image_pairs, ImagePair};
use sentinel_match_run::viz::{render_matches, write_matches_plot};

fn main() {
    let Some(args) = Args::parse() else {
        return;
    };

    let default_filter = if args.debug_mode { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    if let Err(e) = run(&args) {
        eprintln!("❌ {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> RunResult<()> {
    let pairs = find_image_pairs(&args.data_dir);
    if pairs.is_empty() {
        println!("❌ No image pairs found in {}", args.data_dir.display());
        return Ok(());
    }
    println!(
        "🛰️ Found {} image pair(s) in {}",
        pairs.len(),
        args.data_dir.display()
    );

    match args.mode {
        Mode::ListPairs => {
            list_pairs(&pairs);
            Ok(())
        }
        Mode::Match => match_pair(args, &pairs),
    }
}

fn list_pairs(pairs: &[ImagePair]) {
    for (index, pair) in pairs.iter().enumerate() {
        println!("    {index}. {}", pair.display_name());
    }
}

fn match_pair(args: &Args, pairs: &[ImagePair]) -> RunResult<()> {
    let pair = pairs
        .get(args.pair_index)
        .ok_or(RunError::PairIndexOutOfRange {
            index: args.pair_index,
            count: pairs.len(),
        })?;
    println!("🔍 Processing {}", pair.display_name());

    let image0 = load_band_triplet(&pair.earlier).ok_or_else(|| RunError::LoadFailed {
        name: pair.display_name(),
    })?;
    let image1 = load_band_triplet(&pair.later).ok_or_else(|| RunError::LoadFailed {
        name: pair.display_name(),
    })?;

    let outcome = run_matching(&image0.gray, &image1.gray, &MatcherConfig::default());
    println!(
        "🔑 Keypoints: {}:{}  Matches: {}",
        outcome.result.keypoints0.len(),
        outcome.result.keypoints1.len(),
        outcome.result.match_count()
    );

    let plot = render_matches(&outcome);
    write_matches_plot(&args.output, &plot)?;
    println!("✅ Matching visualization saved to {}", args.output.display());
    Ok(())
}

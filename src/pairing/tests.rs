//! Tests for filename parsing and pair discovery

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::pairing::find_image_pairs;
use crate::pairing::finder::{pair_band_files, parse_band_file};

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().copied().map(PathBuf::from).collect()
}

#[test]
fn test_parse_band_file() {
    let parsed = parse_band_file(Path::new("data/T1_20200101T104031_N0209_B02.jp2")).unwrap();

    assert_eq!(parsed.tile, "T1");
    assert_eq!(parsed.date, "20200101");
    assert_eq!(parsed.band, "B02");
}

#[test]
fn test_parse_rejects_short_names() {
    // fewer than three underscore-separated segments
    assert!(parse_band_file(Path::new("T1_20200101.jp2")).is_none());
    assert!(parse_band_file(Path::new("preview.jp2")).is_none());
}

#[test]
fn test_parse_tolerates_short_second_segment() {
    let parsed = parse_band_file(Path::new("T1_2020_B02.jp2")).unwrap();

    assert_eq!(parsed.date, "2020");
}

#[test]
fn test_two_complete_dates_make_one_pair() {
    let pairs = pair_band_files(paths(&[
        "T1_20200101_B02.jp2",
        "T1_20200101_B03.jp2",
        "T1_20200101_B04.jp2",
        "T1_20200201_B02.jp2",
        "T1_20200201_B03.jp2",
        "T1_20200201_B04.jp2",
    ]));

    assert_eq!(pairs.len(), 1);
    let pair = &pairs[0];
    assert_eq!(pair.tile, "T1");
    assert_eq!(pair.date_earlier, "20200101");
    assert_eq!(pair.date_later, "20200201");
    assert_eq!(pair.earlier.blue, PathBuf::from("T1_20200101_B02.jp2"));
    assert_eq!(pair.earlier.green, PathBuf::from("T1_20200101_B03.jp2"));
    assert_eq!(pair.earlier.red, PathBuf::from("T1_20200101_B04.jp2"));
    assert_eq!(pair.later.red, PathBuf::from("T1_20200201_B04.jp2"));
}

#[test]
fn test_missing_band_blocks_pair() {
    // B03 missing on the second date
    let pairs = pair_band_files(paths(&[
        "T1_20200101_B02.jp2",
        "T1_20200101_B03.jp2",
        "T1_20200101_B04.jp2",
        "T1_20200201_B02.jp2",
        "T1_20200201_B04.jp2",
    ]));

    assert!(pairs.is_empty());
}

#[test]
fn test_dates_pair_ascending_regardless_of_input_order() {
    // later date enumerated first
    let pairs = pair_band_files(paths(&[
        "T1_20200201_B04.jp2",
        "T1_20200201_B03.jp2",
        "T1_20200201_B02.jp2",
        "T1_20200101_B04.jp2",
        "T1_20200101_B03.jp2",
        "T1_20200101_B02.jp2",
    ]));

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].date_earlier, "20200101");
    assert_eq!(pairs[0].date_later, "20200201");
}

#[test]
fn test_three_dates_give_two_consecutive_pairs() {
    let mut names = Vec::new();
    for date in ["20200101", "20200201", "20200301"] {
        for band in ["B02", "B03", "B04"] {
            names.push(format!("T1_{date}_{band}.jp2"));
        }
    }
    let pairs = pair_band_files(names.into_iter().map(PathBuf::from));

    // adjacent dates only, no (first, third) pair
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].date_earlier, "20200101");
    assert_eq!(pairs[0].date_later, "20200201");
    assert_eq!(pairs[1].date_earlier, "20200201");
    assert_eq!(pairs[1].date_later, "20200301");
}

#[test]
fn test_tiles_emit_in_sorted_order() {
    let mut names = Vec::new();
    for tile in ["T9", "T1"] {
        for date in ["20200101", "20200201"] {
            for band in ["B02", "B03", "B04"] {
                names.push(format!("{tile}_{date}_{band}.jp2"));
            }
        }
    }
    let pairs = pair_band_files(names.into_iter().map(PathBuf::from));

    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[0].tile, "T1");
    assert_eq!(pairs[1].tile, "T9");
}

#[test]
fn test_duplicate_band_last_one_wins() {
    let pairs = pair_band_files(paths(&[
        "T1_20200101_B02.jp2",
        "sub/T1_20200101_B02.jp2",
        "T1_20200101_B03.jp2",
        "T1_20200101_B04.jp2",
        "T1_20200201_B02.jp2",
        "T1_20200201_B03.jp2",
        "T1_20200201_B04.jp2",
    ]));

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].earlier.blue, PathBuf::from("sub/T1_20200101_B02.jp2"));
}

#[test]
fn test_find_image_pairs_missing_root_is_empty() {
    let pairs = find_image_pairs(Path::new("/no/such/sentinel-dataset"));

    assert!(pairs.is_empty());
}

#[test]
fn test_find_image_pairs_walks_nested_directories() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("T1").join("2020");
    fs::create_dir_all(&nested).unwrap();

    for name in [
        "T1_20200101_B02.jp2",
        "T1_20200101_B03.jp2",
        "T1_20200101_B04.jp2",
        "T1_20200201_B02.jp2",
        "T1_20200201_B03.jp2",
        "T1_20200201_B04.jp2",
        // wrong extension, must be ignored
        "T1_20200101_B02.txt",
    ] {
        File::create(nested.join(name)).unwrap();
    }

    let pairs = find_image_pairs(dir.path());

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].display_name(), "T1 20200101 -> 20200201");
}

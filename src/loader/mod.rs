//! Band loading, stacking and normalization

pub mod bands;

pub use bands::{load_band_triplet, read_band_triplet, BandLoadError, LoadedImage};

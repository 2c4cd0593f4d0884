pub mod export;
pub mod text;
pub mod wfdb;

#[cfg(feature = "polars")]
pub mod dataframe;

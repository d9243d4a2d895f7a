//! Robust statistics for hillslope length distributions.
//!
//! Hillslope lengths are skewed and carry outliers from bad traces, so
//! summaries use the median, the median absolute deviation (MAD) and the
//! mode of a Gaussian kernel density estimate rather than mean and standard
//! deviation.

pub mod error;
pub mod histogram;
pub mod kde;
pub mod paper_data;
pub mod robust;

pub use error::{Result, StatsError};
pub use histogram::{classify_bins, histogram, BinClass, Histogram};
pub use kde::{max_indices, max_probability_kde, GaussianKde, KdeConfig};
pub use paper_data::{parse_length_estimates, read_length_estimates, LengthEstimates};
pub use robust::{median, median_absolute_deviation, summarize, Summary};

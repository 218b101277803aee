//! Stats module - Box statistics, histogram binning and smoothing

mod calculator;

pub use calculator::{
    BoxStats, HistogramBin, SeriesSummary, StatsCalculator, MAX_SMOOTHING_SIGMA,
};

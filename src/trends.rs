//! Projection of trend points into chartable series.

use time::OffsetDateTime;

use crate::model::TrendPoint;
use crate::selection::DetailView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Followers,
    Tweets,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Followers, Metric::Tweets];

    pub fn label(self) -> &'static str {
        match self {
            Metric::Followers => "Followers",
            Metric::Tweets => "Tweets",
        }
    }

    fn value_of(self, point: &TrendPoint) -> u64 {
        match self {
            Metric::Followers => point.followers_count,
            Metric::Tweets => point.tweets_count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesPoint {
    pub timestamp: OffsetDateTime,
    pub value: u64,
}

/// A series is either still loading, loaded but empty, or has points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Series {
    Loading,
    Empty,
    Points(Vec<SeriesPoint>),
}

/// `None` means the trends have not arrived yet. Point order is preserved.
pub fn project(points: Option<&[TrendPoint]>, metric: Metric) -> Series {
    match points {
        None => Series::Loading,
        Some([]) => Series::Empty,
        Some(points) => Series::Points(
            points
                .iter()
                .map(|point| SeriesPoint {
                    timestamp: point.timestamp,
                    value: metric.value_of(point),
                })
                .collect(),
        ),
    }
}

impl Series {
    /// Series for the detail panel. Failed and empty selections have no data.
    pub fn from_detail(view: &DetailView, metric: Metric) -> Series {
        match view {
            DetailView::Empty | DetailView::Failed { .. } => Series::Empty,
            DetailView::Loading { .. } => Series::Loading,
            DetailView::Loaded { trends, .. } => project(Some(trends.as_slice()), metric),
        }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        match self {
            Series::Points(points) => points,
            _ => &[],
        }
    }

    /// Last value minus first value, saturated to the `i64` range.
    pub fn change(&self) -> Option<i64> {
        let points = self.points();
        let first = points.first()?;
        let last = points.last()?;
        let delta = i128::from(last.value) - i128::from(first.value);
        Some(delta.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
    }

    /// Smallest and largest value.
    pub fn bounds(&self) -> Option<(u64, u64)> {
        let points = self.points();
        let min = points.iter().map(|point| point.value).min()?;
        let max = points.iter().map(|point| point.value).max()?;
        Some((min, max))
    }

    /// `(index, value)` pairs for ratatui's `Chart`.
    pub fn chart_data(&self) -> Vec<(f64, f64)> {
        self.points()
            .iter()
            .enumerate()
            .map(|(idx, point)| (idx as f64, point.value as f64))
            .collect()
    }
}

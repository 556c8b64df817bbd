//! Analytics shown on the supervisor and paradata dashboards: static charts plus
//! metric cards and progress bars that drift as if fed by live field data.

use rand::Rng;

use crate::{ChartKind, ChartSeries, ChartSurface, MetricCard, ProgressBar};

/// Metric cards stay inside this band while drifting.
const METRIC_FLOOR: f64 = 80.0;
const METRIC_CEILING: f64 = 100.0;

/// Largest step a metric card moves per update, either way.
const METRIC_STEP: f64 = 0.05;

/// Largest growth of a progress bar per update.
const PROGRESS_STEP: f64 = 0.2;

/// Field progress toward the sample target.
pub fn progress_series() -> ChartSeries {
    ChartSeries::new(
        ChartKind::Doughnut,
        "Survey Progress",
        "Surveys",
        [("Completed Surveys", 1247.0), ("Remaining Target", 753.0)],
    )
}

/// Average response time per weekday, in minutes.
pub fn response_time_series() -> ChartSeries {
    ChartSeries::new(
        ChartKind::Line,
        "Response Time Trends",
        "Average Response Time (minutes)",
        [
            ("Mon", 12.5),
            ("Tue", 13.2),
            ("Wed", 11.8),
            ("Thu", 14.1),
            ("Fri", 13.5),
            ("Sat", 12.9),
            ("Sun", 13.2),
        ],
    )
}

/// Responses by device.
pub fn device_series() -> ChartSeries {
    ChartSeries::new(
        ChartKind::Bar,
        "Device Usage",
        "Survey Responses",
        [
            ("Android", 450.0),
            ("iOS", 320.0),
            ("Web Browser", 280.0),
            ("USSD/SMS", 89.0),
        ],
    )
}

/// All dashboard charts in display order.
pub fn all_series() -> [ChartSeries; 3] {
    [progress_series(), response_time_series(), device_series()]
}

/// Feed every dashboard chart to `surface`.
pub fn render_dashboard(surface: &mut dyn ChartSurface) {
    for series in all_series() {
        surface.render_series(&series);
    }
}

/// Headline percentages and progress bars updated by simulated field activity.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveMetrics {
    cards: Vec<MetricCard>,
    bars: Vec<ProgressBar>,
}

impl LiveMetrics {
    pub fn new(cards: Vec<MetricCard>, bars: Vec<ProgressBar>) -> Self {
        Self { cards, bars }
    }

    pub fn cards(&self) -> &[MetricCard] {
        &self.cards
    }

    pub fn bars(&self) -> &[ProgressBar] {
        &self.bars
    }

    /// Apply one simulated update.
    ///
    /// Cards move by at most `METRIC_STEP` and stay within 80 to 100 percent.
    /// Bars only grow, and stop at 100.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        for card in &mut self.cards {
            let variation = rng.random_range(-METRIC_STEP..METRIC_STEP);
            card.percent = (card.percent + variation).clamp(METRIC_FLOOR, METRIC_CEILING);
        }
        for bar in &mut self.bars {
            if bar.width < 100.0 {
                let increment = rng.random_range(0.0..PROGRESS_STEP);
                bar.width = (bar.width + increment).min(100.0);
            }
        }
    }

    pub fn render(&self, surface: &mut dyn ChartSurface) {
        surface.render_metrics(&self.cards, &self.bars);
    }
}

impl Default for LiveMetrics {
    fn default() -> Self {
        Self::new(
            vec![
                MetricCard::new("Response Rate", 87.3),
                MetricCard::new("Data Quality Score", 94.6),
                MetricCard::new("Completion Rate", 91.2),
            ],
            vec![
                ProgressBar::new("Field Coverage", 62.0),
                ProgressBar::new("Data Synchronisation", 60.0),
            ],
        )
    }
}

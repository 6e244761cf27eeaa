//! Bundled sample datasets, one per demo chart

use serde_json::{Value, json};

use crate::normalize::ChartKind;

/// Named sample dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SampleKind {
    /// Monthly sales and profit (Chart.js line data)
    Sales,
    /// Device share (Chart.js pie data)
    Engagement,
    /// Users by country (record set)
    Geographic,
    /// Weekday activity levels (Chart.js bar data)
    Activity,
    /// Revenue against marketing spend (Chart.js scatter data)
    Marketing,
    /// Headcount by department and team (hierarchy)
    Organization,
}

impl SampleKind {
    /// Chart type the dataset was designed for
    pub fn chart_kind(self) -> ChartKind {
        match self {
            SampleKind::Sales => ChartKind::Line,
            SampleKind::Engagement => ChartKind::Pie,
            SampleKind::Geographic => ChartKind::Bar,
            SampleKind::Activity => ChartKind::Heatmap,
            SampleKind::Marketing => ChartKind::Scatter,
            SampleKind::Organization => ChartKind::Tree,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            SampleKind::Sales => "sales-sample-data.json",
            SampleKind::Engagement => "engagement-sample-data.json",
            SampleKind::Geographic => "geographic-sample-data.json",
            SampleKind::Activity => "activity-sample-data.json",
            SampleKind::Marketing => "marketing-sample-data.json",
            SampleKind::Organization => "organization-sample-data.json",
        }
    }

    pub fn dataset(self) -> Value {
        match self {
            SampleKind::Sales => json!({
                "labels": ["Jan", "Feb", "Mar", "Apr", "May", "Jun",
                           "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"],
                "datasets": [
                    {
                        "label": "Sales",
                        "data": [12000, 19000, 15000, 25000, 22000, 30000,
                                 28000, 35000, 32000, 40000, 38000, 45000],
                        "fill": true,
                        "tension": 0.4
                    },
                    {
                        "label": "Profit",
                        "data": [8000, 12000, 10000, 18000, 15000, 22000,
                                 20000, 25000, 23000, 30000, 28000, 35000],
                        "fill": true,
                        "tension": 0.4
                    }
                ]
            }),
            SampleKind::Engagement => json!({
                "labels": ["Desktop", "Mobile", "Tablet"],
                "datasets": [{ "label": "Sessions", "data": [45, 35, 20], "borderWidth": 1 }]
            }),
            SampleKind::Geographic => json!([
                { "country": "USA", "value": 45 },
                { "country": "Canada", "value": 25 },
                { "country": "UK", "value": 20 },
                { "country": "Germany", "value": 15 },
                { "country": "France", "value": 12 },
                { "country": "Australia", "value": 8 }
            ]),
            SampleKind::Activity => json!({
                "labels": ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"],
                "datasets": [{ "label": "Activity Level", "data": [20, 30, 25, 35, 40, 15, 10] }]
            }),
            SampleKind::Marketing => json!({
                "datasets": [
                    {
                        "label": "Sales vs Marketing Spend",
                        "data": [
                            { "x": 1000, "y": 5000 }, { "x": 1500, "y": 7500 },
                            { "x": 2000, "y": 12000 }, { "x": 2500, "y": 15000 },
                            { "x": 3000, "y": 18000 }, { "x": 3500, "y": 22000 },
                            { "x": 4000, "y": 25000 }, { "x": 4500, "y": 28000 },
                            { "x": 5000, "y": 32000 }, { "x": 5500, "y": 35000 }
                        ],
                        "pointRadius": 8,
                        "pointHoverRadius": 10
                    },
                    {
                        "label": "Profit vs Marketing Spend",
                        "data": [
                            { "x": 1000, "y": 2000 }, { "x": 1500, "y": 3000 },
                            { "x": 2000, "y": 5000 }, { "x": 2500, "y": 6500 },
                            { "x": 3000, "y": 8000 }, { "x": 3500, "y": 9500 },
                            { "x": 4000, "y": 11000 }, { "x": 4500, "y": 12500 },
                            { "x": 5000, "y": 14000 }, { "x": 5500, "y": 15500 }
                        ],
                        "pointRadius": 8,
                        "pointHoverRadius": 10
                    }
                ]
            }),
            SampleKind::Organization => json!({
                "name": "Company",
                "children": [
                    {
                        "name": "Engineering",
                        "children": [
                            { "name": "Platform", "value": 14 },
                            { "name": "Product", "value": 22 },
                            { "name": "Data", "value": 9 }
                        ]
                    },
                    {
                        "name": "Sales",
                        "children": [
                            { "name": "Enterprise", "value": 11 },
                            { "name": "SMB", "value": 7 }
                        ]
                    },
                    {
                        "name": "Operations",
                        "children": [
                            { "name": "Finance", "value": 5 },
                            { "name": "People", "value": 4 }
                        ]
                    }
                ]
            }),
        }
    }
}

//! Color definitions for charts

/// Background, text and grid colors for one theme
pub(super) struct ThemeColors {
    pub(super) background: &'static str,
    pub(super) title: &'static str,
    pub(super) axis: &'static str,
    pub(super) grid: &'static str,
}

/// Light or dark chart background
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ChartTheme {
    #[default]
    Light,
    Dark,
}

impl ChartTheme {
    pub(super) fn colors(self) -> &'static ThemeColors {
        match self {
            ChartTheme::Light => &LIGHT,
            ChartTheme::Dark => &DARK,
        }
    }
}

const LIGHT: ThemeColors = ThemeColors {
    background: "#FFFFFF", // White
    title: "#374151",      // Gray 700
    axis: "#6B7280",       // Gray 500
    grid: "#E5E7EB",       // Gray 200
};

const DARK: ThemeColors = ThemeColors {
    background: "#111827", // Gray 900
    title: "#FFFFFF",      // White
    axis: "#D1D5DB",       // Gray 300
    grid: "#374151",       // Gray 700
};

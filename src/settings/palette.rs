//! Named color palettes for chart series

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of colors in every palette
pub const PALETTE_SIZE: usize = 6;

/// Ordered series colors for one scheme
pub type Palette = [&'static str; PALETTE_SIZE];

/// Named color scheme selectable in settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
    Red,
    Indigo,
    Teal,
    Pink,
    Yellow,
    Cyan,
    Emerald,
    Violet,
    Rose,
    Sky,
    Lime,
    Slate,
    Stone,
    Neutral,
    Zinc,
    Gray,
}

/// Palette table entry
pub struct SchemeInfo {
    pub scheme: ColorScheme,
    pub name: &'static str,
    pub label: &'static str,
    pub category: &'static str,
    pub colors: Palette,
}

/// All schemes in display order
pub static SCHEMES: [SchemeInfo; 20] = [
    SchemeInfo {
        scheme: ColorScheme::Blue,
        name: "blue",
        label: "Ocean Blue",
        category: "Professional",
        colors: ["#3B82F6", "#1D4ED8", "#1E40AF", "#1E3A8A", "#1E3A8A", "#1D4ED8"],
    },
    SchemeInfo {
        scheme: ColorScheme::Green,
        name: "green",
        label: "Forest Green",
        category: "Nature",
        colors: ["#10B981", "#059669", "#047857", "#065F46", "#064E3B", "#059669"],
    },
    SchemeInfo {
        scheme: ColorScheme::Purple,
        name: "purple",
        label: "Royal Purple",
        category: "Creative",
        colors: ["#8B5CF6", "#7C3AED", "#6D28D9", "#5B21B6", "#4C1D95", "#7C3AED"],
    },
    SchemeInfo {
        scheme: ColorScheme::Orange,
        name: "orange",
        label: "Sunset Orange",
        category: "Energy",
        colors: ["#F59E0B", "#D97706", "#B45309", "#92400E", "#78350F", "#D97706"],
    },
    SchemeInfo {
        scheme: ColorScheme::Red,
        name: "red",
        label: "Crimson Red",
        category: "Bold",
        colors: ["#EF4444", "#DC2626", "#B91C1C", "#991B1B", "#7F1D1D", "#DC2626"],
    },
    SchemeInfo {
        scheme: ColorScheme::Indigo,
        name: "indigo",
        label: "Deep Indigo",
        category: "Modern",
        colors: ["#6366F1", "#4F46E5", "#4338CA", "#3730A3", "#312E81", "#4F46E5"],
    },
    SchemeInfo {
        scheme: ColorScheme::Teal,
        name: "teal",
        label: "Tropical Teal",
        category: "Fresh",
        colors: ["#14B8A6", "#0D9488", "#0F766E", "#115E59", "#134E4A", "#0D9488"],
    },
    SchemeInfo {
        scheme: ColorScheme::Pink,
        name: "pink",
        label: "Vibrant Pink",
        category: "Playful",
        colors: ["#EC4899", "#DB2777", "#BE185D", "#9D174D", "#831843", "#DB2777"],
    },
    SchemeInfo {
        scheme: ColorScheme::Yellow,
        name: "yellow",
        label: "Golden Yellow",
        category: "Bright",
        colors: ["#EAB308", "#CA8A04", "#A16207", "#854D0E", "#713F12", "#CA8A04"],
    },
    SchemeInfo {
        scheme: ColorScheme::Cyan,
        name: "cyan",
        label: "Electric Cyan",
        category: "Tech",
        colors: ["#06B6D4", "#0891B2", "#0E7490", "#155E75", "#164E63", "#0891B2"],
    },
    SchemeInfo {
        scheme: ColorScheme::Emerald,
        name: "emerald",
        label: "Rich Emerald",
        category: "Luxury",
        colors: ["#10B981", "#059669", "#047857", "#065F46", "#064E3B", "#059669"],
    },
    SchemeInfo {
        scheme: ColorScheme::Violet,
        name: "violet",
        label: "Mystic Violet",
        category: "Mystic",
        colors: ["#8B5CF6", "#7C3AED", "#6D28D9", "#5B21B6", "#4C1D95", "#7C3AED"],
    },
    SchemeInfo {
        scheme: ColorScheme::Rose,
        name: "rose",
        label: "Passionate Rose",
        category: "Romantic",
        colors: ["#F43F5E", "#E11D48", "#BE123C", "#9F1239", "#881337", "#E11D48"],
    },
    SchemeInfo {
        scheme: ColorScheme::Sky,
        name: "sky",
        label: "Clear Sky",
        category: "Open",
        colors: ["#0EA5E9", "#0284C7", "#0369A1", "#075985", "#0C4A6E", "#0284C7"],
    },
    SchemeInfo {
        scheme: ColorScheme::Lime,
        name: "lime",
        label: "Electric Lime",
        category: "Fresh",
        colors: ["#84CC16", "#65A30D", "#4D7C0F", "#365314", "#1A2E05", "#65A30D"],
    },
    SchemeInfo {
        scheme: ColorScheme::Slate,
        name: "slate",
        label: "Professional Slate",
        category: "Corporate",
        colors: ["#64748B", "#475569", "#334155", "#1E293B", "#0F172A", "#475569"],
    },
    SchemeInfo {
        scheme: ColorScheme::Stone,
        name: "stone",
        label: "Warm Stone",
        category: "Earth",
        colors: ["#78716C", "#57534E", "#44403C", "#292524", "#1C1917", "#57534E"],
    },
    SchemeInfo {
        scheme: ColorScheme::Neutral,
        name: "neutral",
        label: "Pure Neutral",
        category: "Minimal",
        colors: ["#737373", "#525252", "#404040", "#262626", "#171717", "#525252"],
    },
    SchemeInfo {
        scheme: ColorScheme::Zinc,
        name: "zinc",
        label: "Cool Zinc",
        category: "Cool",
        colors: ["#71717A", "#52525B", "#3F3F46", "#27272A", "#18181B", "#52525B"],
    },
    SchemeInfo {
        scheme: ColorScheme::Gray,
        name: "gray",
        label: "Classic Gray",
        category: "Classic",
        colors: ["#6B7280", "#4B5563", "#374151", "#1F2937", "#111827", "#4B5563"],
    },
];

impl ColorScheme {
    pub fn info(self) -> &'static SchemeInfo {
        // Table order matches declaration order
        &SCHEMES[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn colors(self) -> &'static Palette {
        &self.info().colors
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorScheme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SCHEMES
            .iter()
            .find(|info| info.name == s)
            .map(|info| info.scheme)
            .ok_or(())
    }
}

/// Look up a palette by scheme name, falling back to blue for unknown names
pub fn palette_by_name(name: &str) -> &'static Palette {
    name.parse::<ColorScheme>()
        .unwrap_or_default()
        .colors()
}

/// Convert `#RRGGBB` into `rgba(r, g, b, alpha)`; other inputs are returned unchanged
pub fn with_alpha(color: &str, alpha: f64) -> String {
    let hex = match color.strip_prefix('#') {
        Some(h) if h.len() == 6 && h.chars().all(|c| c.is_ascii_hexdigit()) => h,
        _ => return color.to_string(),
    };
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
    format!(
        "rgba({}, {}, {}, {})",
        channel(0),
        channel(2),
        channel(4),
        alpha
    )
}

/// Parse `#RRGGBB` into its channels (for terminal swatches)
pub fn hex_channels(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

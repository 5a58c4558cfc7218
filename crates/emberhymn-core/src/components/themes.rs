//! Level themes - cosmetic palette hints and boss identity per depth.

use serde::{Deserialize, Serialize};

/// Theme cycle, selected by `(depth - 1) % 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Theme {
    AshCaverns,
    ForgottenCatacombs,
    EmberSanctum,
}

/// Static cosmetic data a frontend uses to dress a theme.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ThemeConfig {
    pub name: &'static str,
    pub wall_color: &'static str,
    pub floor_color: &'static str,
    pub ambient_color: &'static str,
    pub boss_name: &'static str,
}

impl Theme {
    pub const CYCLE: [Theme; 3] = [
        Theme::AshCaverns,
        Theme::ForgottenCatacombs,
        Theme::EmberSanctum,
    ];

    /// Theme for a 1-based depth, cycling through [`Theme::CYCLE`].
    pub fn for_depth(depth: u32) -> Self {
        Self::CYCLE[((depth.saturating_sub(1)) % Self::CYCLE.len() as u32) as usize]
    }

    pub fn config(&self) -> &'static ThemeConfig {
        match self {
            Theme::AshCaverns => &ThemeConfig {
                name: "Ash Caverns",
                wall_color: "#292524",
                floor_color: "#44403c",
                ambient_color: "rgba(60, 20, 10, 0.4)",
                boss_name: "The Ashbound Knight",
            },
            Theme::ForgottenCatacombs => &ThemeConfig {
                name: "Forgotten Catacombs",
                wall_color: "#0f172a",
                floor_color: "#1e293b",
                ambient_color: "rgba(10, 20, 50, 0.4)",
                boss_name: "Cinder Wyrm",
            },
            Theme::EmberSanctum => &ThemeConfig {
                name: "Ember Sanctum",
                wall_color: "#431407",
                floor_color: "#7c2d12",
                ambient_color: "rgba(100, 30, 0, 0.5)",
                boss_name: "The Ember Choir",
            },
        }
    }
}

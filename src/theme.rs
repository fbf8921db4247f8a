//! Day/night theme and the palette each theme paints with.
//!
//! The theme is the only user-facing state. It is persisted as the string
//! `"dark"` or `"light"`; anything other than `"light"` reads back as dark.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use crate::consts::{METEOR_CHANCE_DARK, METEOR_CHANCE_LIGHT};

/// Visual mode of the sky.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Night sky. The default when nothing is stored.
    #[default]
    Dark,
    /// Day sky: brighter gradient, dimmed stars, fewer meteors.
    Light,
}

impl Theme {
    /// Resolve the initial theme from a stored preference value.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            _ => Self::Dark,
        }
    }

    /// The string written to the preference store.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// The opposite theme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Button contents while this theme is active.
    ///
    /// The label names the mode a click switches *to*, so the dark theme
    /// shows "Light Mode".
    #[must_use]
    pub fn toggle_label(self) -> ToggleLabel {
        match self {
            Self::Dark => ToggleLabel { icon: "🌙", text: "Light Mode" },
            Self::Light => ToggleLabel { icon: "☀️", text: "Dark Mode" },
        }
    }

    #[must_use]
    pub fn palette(self) -> &'static Palette {
        match self {
            Self::Dark => &DARK,
            Self::Light => &LIGHT,
        }
    }
}

/// Icon and caption for the theme toggle button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleLabel {
    pub icon: &'static str,
    pub text: &'static str,
}

/// Per-theme paint parameters consumed each frame.
#[derive(Debug, PartialEq)]
pub struct Palette {
    /// Vertical sky gradient stops, top (0.0) to bottom (1.0).
    pub sky: &'static [(f32, &'static str)],
    /// Colour at the outer edge of the radial vignette.
    pub vignette_edge: &'static str,
    /// Multiplier applied to every star's alpha.
    pub star_alpha: f64,
    /// Meteor alpha at birth.
    pub meteor_alpha: f64,
    /// Per-frame meteor spawn probability.
    pub meteor_chance: f64,
    /// Whether coloured sparkles are overlaid.
    pub sparkles: bool,
}

static DARK: Palette = Palette {
    sky: &[(0.0, "#02040f"), (0.45, "#070d2b"), (1.0, "#0a1140")],
    vignette_edge: "rgba(0,0,0,0.55)",
    star_alpha: 1.0,
    meteor_alpha: 1.0,
    meteor_chance: METEOR_CHANCE_DARK,
    sparkles: true,
};

static LIGHT: Palette = Palette {
    sky: &[(0.0, "#4db5ff"), (0.55, "#9ddcff"), (1.0, "#e7f7ff")],
    vignette_edge: "rgba(0,0,0,0.12)",
    star_alpha: 0.35,
    meteor_alpha: 0.35,
    meteor_chance: METEOR_CHANCE_LIGHT,
    sparkles: false,
};

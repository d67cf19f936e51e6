//! Plot configuration shared across visualization functions

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels
/// - `line_color`: Color of the data curve
/// - `reference_color`: Color of dashed reference lines (pivot radius, a0)
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `show_grid`: Whether to show grid lines
///
/// # Example
///
/// ```rust,ignore
/// use arp_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::rotation_curve("Milky Way");
/// config.line_color = BLUE;
/// config.width = 1920;
/// config.height = 1080;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    pub xlabel: String,

    pub ylabel: String,

    /// Data curve color (default: BLUE)
    pub line_color: RGBColor,

    /// Reference line color (default: grey)
    pub reference_color: RGBColor,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: String::new(),
            line_color: BLUE,
            reference_color: RGBColor(120, 120, 120),
            background: WHITE,
            line_width: 2,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// No custom title: the preset's default is used
///
/// ```rust,ignore
/// let config = PlotConfig::scale_factor(NO_TITLE);
/// ```
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    fn preset(title: impl IntoOptionalTitle, default_title: &str, xlabel: &str, ylabel: &str) -> Self {
        Self {
            title: title
                .into_optional_title()
                .unwrap_or_else(|| default_title.to_string()),
            xlabel: xlabel.to_string(),
            ylabel: ylabel.to_string(),
            ..Self::default()
        }
    }

    /// Circular velocity against radius
    ///
    /// ```rust,ignore
    /// let config = PlotConfig::rotation_curve("NGC 3198");
    /// let config = PlotConfig::rotation_curve(NO_TITLE); // "Rotation Curve"
    /// ```
    pub fn rotation_curve(title: impl IntoOptionalTitle) -> Self {
        Self::preset(title, "Rotation Curve", "Radius (kpc)", "Velocity (km/s)")
    }

    /// Centripetal acceleration against radius
    pub fn acceleration_profile(title: impl IntoOptionalTitle) -> Self {
        Self::preset(
            title,
            "Acceleration Profile",
            "Radius (kpc)",
            "Acceleration (m/s²)",
        )
    }

    /// Scale factor against time
    pub fn scale_factor(title: impl IntoOptionalTitle) -> Self {
        Self::preset(title, "Scale Factor", "Time", "a(t)")
    }
}

// =================================================================================================
// Tests
// =================================================================================================

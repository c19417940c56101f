//! Cover art rendering.
//!
//! Covers are SVG documents built from a title, an artist and the colour
//! parameters the catalog generator drew for the entry. Rendering has no
//! randomness of its own.

use serde::{Deserialize, Serialize};

use crate::types::CoverParams;

/// Default cover edge length in pixels.
pub const DEFAULT_COVER_SIZE: u32 = 512;

const TEXT_FILL: &str = "#111";
const FONT_FAMILY: &str = "Arial, Helvetica, sans-serif";
const TEXT_X: u32 = 32;

/// Everything needed to render one cover.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverSpec {
    pub title: String,
    pub artist: String,
    #[serde(alias = "w")]
    pub width: u32,
    #[serde(alias = "h")]
    pub height: u32,
    pub hue: i64,
    pub sat: i64,
    pub lum: i64,
}

impl Default for CoverSpec {
    fn default() -> Self {
        Self {
            title: String::new(),
            artist: String::new(),
            width: DEFAULT_COVER_SIZE,
            height: DEFAULT_COVER_SIZE,
            hue: 210,
            sat: 60,
            lum: 20,
        }
    }
}

impl CoverSpec {
    /// Cover for a catalog entry, at the default size.
    pub fn for_entry(title: &str, artist: &str, params: CoverParams) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            hue: i64::from(params.hue),
            sat: i64::from(params.sat),
            lum: i64::from(params.lum),
            ..Self::default()
        }
    }

    /// First gradient stop.
    fn start_color(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            self.hue,
            self.sat,
            self.lum.saturating_add(20)
        )
    }

    /// Second gradient stop: hue rotated by 60, saturation floored at 40.
    fn end_color(&self) -> String {
        format!(
            "hsl({}, {}%, {}%)",
            (self.hue.rem_euclid(360) + 60).rem_euclid(360),
            self.sat.saturating_sub(10).max(40),
            self.lum.saturating_add(30)
        )
    }
}

/// Renders a cover as an SVG document.
pub fn render_cover(spec: &CoverSpec) -> String {
    let (w, h) = (spec.width, spec.height);
    let mid = f64::from(h) / 2.0;

    format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <defs>
    <linearGradient id="g" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0%" stop-color="{start}"/>
      <stop offset="100%" stop-color="{end}"/>
    </linearGradient>
  </defs>
  <rect width="100%" height="100%" fill="url(#g)"/>
  <text x="{x}" y="{title_y}" font-family="{font}" font-size="28" font-weight="700" fill="{fill}">{title}</text>
  <text x="{x}" y="{artist_y}" font-family="{font}" font-size="18" fill="{fill}">by {artist}</text>
</svg>"##,
        start = spec.start_color(),
        end = spec.end_color(),
        x = TEXT_X,
        title_y = mid - 20.0,
        artist_y = mid + 20.0,
        font = FONT_FAMILY,
        fill = TEXT_FILL,
        title = escape_xml(&spec.title),
        artist = escape_xml(&spec.artist),
    )
}

/// Escapes the five XML special characters.
pub fn escape_xml(text: &str) -> String {
    // `&` goes first so later entities are not re-escaped.
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&apos;")
        .replace('"', "&quot;")
}

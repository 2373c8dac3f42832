//! Static font-metric tables for the word-cloud font families.
//!
//! Character widths are in em units (relative to font size), taken from the
//! standard core-font AFM widths (Helvetica for Arial, Times-Roman, Courier).
//! They ignore kerning, which only ever narrows a run, so the measured width
//! is an upper bound for the same text rendered by a real shaper.
//! All tables cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

use serde::{Deserialize, Serialize};

use crate::layout::geometry::Size;

/// Fractional widening applied to every measured extent.
///
/// Covers hinting and renderer rounding so a label never draws wider than
/// its reserved box.
pub const EXTENT_SAFETY_MARGIN: f32 = 0.05;

// ────────────────────────────────────────────────────────────────────────────
// Font family enum
// ────────────────────────────────────────────────────────────────────────────

/// Font families the renderer may draw the cloud with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Sans-serif default of the dashboard cloud.
    #[default]
    Arial,
    TimesNewRoman,
    /// Monospace: every printable ASCII glyph is 0.6em.
    CourierNew,
}

impl std::str::FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arial" | "helvetica" | "sans-serif" => Ok(FontFamily::Arial),
            "times" | "times new roman" | "timesnewroman" | "serif" => {
                Ok(FontFamily::TimesNewRoman)
            }
            "courier" | "courier new" | "couriernew" | "monospace" => Ok(FontFamily::CourierNew),
            other => Err(format!("unknown font family '{other}'")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font family.
///
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space) through 0x7E (~).
///
/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    pub font: FontFamily,
    widths: [f32; 95],
    /// Width used for characters outside the table. Sized for full-width (CJK) glyphs
    /// so non-Latin labels are over- rather than under-estimated.
    pub fallback_char_width: f32,
    /// Ascent + descent in em units; the height of a single-line label box.
    pub line_height_em: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    ///
    /// Characters outside printable ASCII fall back to `fallback_char_width`.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.fallback_char_width
                }
            })
            .sum()
    }

    /// Estimates the unrotated pixel box of `text` drawn at `font_size`.
    ///
    /// Both dimensions include `EXTENT_SAFETY_MARGIN`.
    pub fn text_extent(&self, text: &str, font_size: f32) -> Size {
        let scale = font_size * (1.0 + EXTENT_SAFETY_MARGIN);
        Size::new(
            self.measure_str(text) * scale,
            self.line_height_em * scale,
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static ARIAL_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::Arial,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    fallback_char_width: 1.0,
    line_height_em: 1.15,
};

static TIMES_NEW_ROMAN_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::TimesNewRoman,
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.250, 0.333, 0.408, 0.500, 0.500, 0.833, 0.778, 0.180, 0.333, 0.333, 0.500, 0.564, 0.250, 0.333, 0.250, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500, 0.500,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.564, 0.564, 0.564, 0.444, 0.921,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.667, 0.667, 0.722, 0.611, 0.556, 0.722, 0.722, 0.333, 0.389, 0.722, 0.611, 0.889,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.722, 0.556, 0.722, 0.667, 0.556, 0.611, 0.722, 0.722, 0.944, 0.722, 0.722, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.469, 0.500, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.444, 0.500, 0.444, 0.500, 0.444, 0.333, 0.500, 0.500, 0.278, 0.278, 0.500, 0.278, 0.778,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.500, 0.500, 0.500, 0.500, 0.333, 0.389, 0.278, 0.500, 0.500, 0.722, 0.500, 0.500, 0.444,
        // {      |      }      ~
        0.480, 0.200, 0.480, 0.541,
    ],
    fallback_char_width: 1.0,
    line_height_em: 1.15,
};

static COURIER_NEW_TABLE: FontMetricTable = FontMetricTable {
    font: FontFamily::CourierNew,
    widths: [0.600; 95],
    fallback_char_width: 1.0,
    line_height_em: 1.20,
};

/// Returns the static metric table for a given font family.
pub fn get_metrics(font: &FontFamily) -> &'static FontMetricTable {
    match font {
        FontFamily::Arial => &ARIAL_TABLE,
        FontFamily::TimesNewRoman => &TIMES_NEW_ROMAN_TABLE,
        FontFamily::CourierNew => &COURIER_NEW_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

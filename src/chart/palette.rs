//! Colour scales used by the fixed chart specifications.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// CARTO "Temps" sequential scale, low to high.
pub const TEMPS: &[Rgb] = &[
    Rgb(0, 147, 146),
    Rgb(57, 177, 133),
    Rgb(156, 203, 134),
    Rgb(233, 226, 156),
    Rgb(238, 180, 121),
    Rgb(232, 132, 113),
    Rgb(207, 89, 126),
];

/// ColorBrewer "Set1" qualitative palette.
pub const SET1: &[Rgb] = &[
    Rgb(228, 26, 28),
    Rgb(55, 126, 184),
    Rgb(77, 175, 74),
    Rgb(152, 78, 163),
    Rgb(255, 127, 0),
    Rgb(255, 255, 51),
    Rgb(166, 86, 40),
    Rgb(247, 129, 191),
    Rgb(153, 153, 153),
];

pub const DEFAULT_BAR: Rgb = Rgb(99, 110, 250);

/// How bar colours are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMapping {
    /// Interpolate along a scale by bar value, between the smallest and largest value.
    Continuous(&'static [Rgb]),
    /// Cycle through a palette by the bar's slot (its position when it has none).
    Qualitative(&'static [Rgb]),
    Single(Rgb),
}

impl ColorMapping {
    /// Colour for the bar at palette `index` with `value`, given the value range of the chart.
    pub fn color_for(&self, index: usize, value: u64, min: u64, max: u64) -> Rgb {
        match *self {
            ColorMapping::Continuous(scale) => {
                let t = if max > min {
                    (value.saturating_sub(min)) as f64 / (max - min) as f64
                } else {
                    1.0
                };
                interpolate(scale, t)
            }
            ColorMapping::Qualitative(palette) if !palette.is_empty() => palette[index % palette.len()],
            ColorMapping::Qualitative(_) => DEFAULT_BAR,
            ColorMapping::Single(rgb) => rgb,
        }
    }
}

/// Linear interpolation along `scale` at `t` in [0, 1].
pub fn interpolate(scale: &[Rgb], t: f64) -> Rgb {
    match scale {
        [] => DEFAULT_BAR,
        [only] => *only,
        _ => {
            let t = t.clamp(0.0, 1.0);
            let pos = t * (scale.len() - 1) as f64;
            let lo = (pos.floor() as usize).min(scale.len() - 2);
            let frac = pos - lo as f64;
            let (a, b) = (scale[lo], scale[lo + 1]);
            let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * frac).round() as u8;
            Rgb(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
        }
    }
}

//! Value label formatting for parameter controls.

/// How a control's value is rendered into its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelFormat {
    /// Fixed number of decimals followed by a unit suffix (which may be empty).
    Fixed { decimals: usize, unit: &'static str },
    /// The value as the control holds it, followed by a unit suffix.
    Raw { unit: &'static str },
}

impl LabelFormat {
    pub const fn fixed(decimals: usize, unit: &'static str) -> Self {
        LabelFormat::Fixed { decimals, unit }
    }

    pub const fn raw(unit: &'static str) -> Self {
        LabelFormat::Raw { unit }
    }

    /// Render `value` into label text.
    pub fn format(self, value: f64) -> String {
        match self {
            LabelFormat::Fixed { decimals, unit } => format!("{}{unit}", fixed(value, decimals)),
            LabelFormat::Raw { unit } => format!("{}{unit}", raw_value(value)),
        }
    }
}

/// `value` with exactly `decimals` places. Exact halves round away from
/// zero (`0.125` to two places is `0.13`); `format!` alone would round them
/// to even.
pub fn fixed(value: f64, decimals: usize) -> String {
    if value.is_finite() && is_exact_half(value, decimals) {
        let scale = 10f64.powi(decimals as i32);
        let up = ((value.abs() * scale).floor() + 1.0) / scale;
        return format!("{:.decimals$}", up.copysign(value));
    }
    format!("{value:.decimals$}")
}

/// Whether the digits past `decimals` are a 5 followed only by zeros.
fn is_exact_half(value: f64, decimals: usize) -> bool {
    const TAIL: usize = 20;
    let wide = format!("{:.*}", decimals + TAIL, value.abs());
    let tail = &wide[wide.len() - TAIL..];
    tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0')
}

/// Shortest representation of a control value: `150` rather than `150.0`.
pub fn raw_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

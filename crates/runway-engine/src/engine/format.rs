//! Display formatting for cell values (en-US conventions).

use serde::{Deserialize, Serialize};

use super::cell::{Cell, DisplayFormat};

/// Granularity of a projection's periods.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Yearly,
    Monthly,
}

impl ViewMode {
    pub fn toggled(self) -> ViewMode {
        match self {
            ViewMode::Yearly => ViewMode::Monthly,
            ViewMode::Monthly => ViewMode::Yearly,
        }
    }
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yearly" => Ok(ViewMode::Yearly),
            "monthly" => Ok(ViewMode::Monthly),
            _ => Err(format!("Invalid view mode: {}", s)),
        }
    }
}

/// Column heading for a period: "Year 1", "Month 3", ...
pub fn period_label(index: usize, view: ViewMode) -> String {
    match view {
        ViewMode::Yearly => format!("Year {}", index + 1),
        ViewMode::Monthly => format!("Month {}", index + 1),
    }
}

/// Currency with no fraction digits. `None` renders as `$0`.
pub fn format_currency(value: Option<f64>) -> String {
    let Some(v) = value else {
        return "$0".to_string();
    };
    let rounded = v.round();
    if rounded == 0.0 {
        return "$0".to_string();
    }
    let digits = group_thousands(&format!("{:.0}", rounded.abs()));
    if rounded < 0.0 {
        format!("-${}", digits)
    } else {
        format!("${}", digits)
    }
}

/// Currency as shown in `view`. Annual figures are divided by 12 in a monthly
/// view; the stored value is not touched.
pub fn format_currency_for_view(value: Option<f64>, view: ViewMode, basis: ViewMode) -> String {
    match (view, basis) {
        (ViewMode::Monthly, ViewMode::Yearly) => format_currency(value.map(|v| v / 12.0)),
        _ => format_currency(value),
    }
}

/// The raw value followed by `%`. No scaling: 0.2 renders as `0.2%`.
pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        None => "0%".to_string(),
        Some(v) => format!("{}%", plain(v)),
    }
}

/// Grouped number with up to two fraction digits. `None` renders as `0`.
pub fn format_number(value: Option<f64>) -> String {
    let Some(v) = value else {
        return "0".to_string();
    };
    if !v.is_finite() {
        return plain(v);
    }

    let (int_part, frac_part) = round_decimal(&v.abs().to_string(), 2);
    let frac = frac_part.trim_end_matches('0');
    let negative = v < 0.0 && (int_part != "0" || !frac.is_empty());

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Format a cell per its display format, using `calculated_value`, else
/// `input_value`. A cell with neither renders as `-`.
pub fn format_cell(cell: &Cell, view: ViewMode, basis: ViewMode) -> String {
    let Some(value) = cell.value() else {
        return "-".to_string();
    };
    match cell.display_format {
        DisplayFormat::Currency => format_currency_for_view(Some(value), view, basis),
        DisplayFormat::Percentage => format_percentage(Some(value)),
        DisplayFormat::Number => format_number(Some(value)),
    }
}

/// Shortest round-trip rendering, without a negative zero.
fn plain(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else {
        v.to_string()
    }
}

/// Round a plain non-negative decimal string to `places` fraction digits, half
/// away from zero. Works on the decimal text, so `2.675` rounds to `2.68`.
fn round_decimal(text: &str, places: usize) -> (String, String) {
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text, ""));
    if frac_part.len() <= places {
        return (int_part.to_string(), frac_part.to_string());
    }

    let round_up = frac_part.as_bytes()[places] >= b'5';
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(places))
        .collect();

    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - places;
    let int_digits = String::from_utf8_lossy(&digits[..split]).into_owned();
    let frac_digits = String::from_utf8_lossy(&digits[split..]).into_owned();
    (int_digits, frac_digits)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

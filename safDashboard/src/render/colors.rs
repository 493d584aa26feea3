use plotters::style::RGBColor;

// Sequential "Reds" scale, light to dark
const REDS: [(u8, u8, u8); 9] = [
    (255, 245, 240),
    (254, 224, 210),
    (252, 187, 161),
    (252, 146, 114),
    (251, 106, 74),
    (239, 59, 44),
    (203, 24, 29),
    (165, 15, 21),
    (103, 0, 13),
];

pub const MISSING_CELL: RGBColor = RGBColor(230, 230, 230);

/// Parses `#RRGGBB` or `#RGB`.
pub fn parse_hex(value: &str) -> Option<RGBColor> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(RGBColor(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|c| c * 17);
            Some(RGBColor(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

fn named(value: &str) -> Option<RGBColor> {
    let color = match value.trim().to_ascii_lowercase().as_str() {
        "black" => RGBColor(0, 0, 0),
        "white" => RGBColor(255, 255, 255),
        "red" => RGBColor(255, 0, 0),
        "green" => RGBColor(0, 128, 0),
        "blue" => RGBColor(0, 0, 255),
        "limegreen" => RGBColor(50, 205, 50),
        "darkorange" => RGBColor(255, 140, 0),
        "gray" | "grey" => RGBColor(128, 128, 128),
        _ => return None,
    };
    Some(color)
}

/// Hex or a handful of named colours; anything else draws black.
pub fn parse_color(value: &str) -> RGBColor {
    parse_hex(value).or_else(|| named(value)).unwrap_or(RGBColor(0, 0, 0))
}

/// Linear interpolation on the Reds scale for a value in 0..=100.
pub fn reds_scale(percent: f64) -> RGBColor {
    let t = (percent / 100.0).clamp(0.0, 1.0) * (REDS.len() - 1) as f64;
    let lower = t.floor() as usize;
    let upper = (lower + 1).min(REDS.len() - 1);
    let frac = t - lower as f64;

    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (lo, hi) = (REDS[lower], REDS[upper]);
    RGBColor(mix(lo.0, hi.0), mix(lo.1, hi.1), mix(lo.2, hi.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        assert_eq!(parse_hex("#FFA900"), Some(RGBColor(255, 169, 0)));
        assert_eq!(parse_hex("#fff"), Some(RGBColor(255, 255, 255)));
        assert_eq!(parse_hex("FFA900"), None);
        assert_eq!(parse_hex("#GG0000"), None);
    }

    #[test]
    fn test_named_colors_and_fallback() {
        assert_eq!(parse_color("limegreen"), RGBColor(50, 205, 50));
        assert_eq!(parse_color("#19D3F3"), RGBColor(25, 211, 243));
        assert_eq!(parse_color("mauve"), RGBColor(0, 0, 0));
    }

    #[test]
    fn test_reds_endpoints() {
        assert_eq!(reds_scale(0.0), RGBColor(255, 245, 240));
        assert_eq!(reds_scale(100.0), RGBColor(103, 0, 13));
        assert_eq!(reds_scale(250.0), RGBColor(103, 0, 13));
        assert_eq!(reds_scale(50.0), RGBColor(251, 106, 74));
    }
}

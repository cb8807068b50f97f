//! CSS-style colour string parsing
//!
//! Layer rows carry colours the way web mapping stacks spell them:
//! `rgba(0, 0, 255, 1.0)`, `rgb(255, 0, 0)`, `#rrggbb` or `#rrggbbaa`.

use egui::Color32;

/// Parse a colour string. Returns `None` for anything unrecognised so the
/// caller can fall back to the default stroke colour.
pub fn parse_colour(text: &str) -> Option<Color32> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(inner) = text
        .strip_prefix("rgba(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgba(inner);
    }
    if let Some(inner) = text
        .strip_prefix("rgb(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_rgb(inner);
    }
    None
}

fn parse_hex(hex: &str) -> Option<Color32> {
    let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    match hex.len() {
        6 => Some(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color32::from_rgba_unmultiplied(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)?,
        )),
        _ => None,
    }
}

fn parse_rgb(inner: &str) -> Option<Color32> {
    let mut parts = inner.split(',').map(str::trim);
    let r = parts.next()?.parse::<u8>().ok()?;
    let g = parts.next()?.parse::<u8>().ok()?;
    let b = parts.next()?.parse::<u8>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Color32::from_rgb(r, g, b))
}

fn parse_rgba(inner: &str) -> Option<Color32> {
    let mut parts = inner.split(',').map(str::trim);
    let r = parts.next()?.parse::<u8>().ok()?;
    let g = parts.next()?.parse::<u8>().ok()?;
    let b = parts.next()?.parse::<u8>().ok()?;
    let a = parts.next()?.parse::<f32>().ok()?;
    if parts.next().is_some() || !(0.0..=1.0).contains(&a) {
        return None;
    }
    Some(Color32::from_rgba_unmultiplied(
        r,
        g,
        b,
        (a * 255.0).round() as u8,
    ))
}

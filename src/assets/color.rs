use crate::foundation::core::Rgba8;

/// Parse a CSS color string into straight-alpha RGBA8.
///
/// Accepts named colors, `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA` and the
/// `rgb()`, `rgba()`, `hsl()`, `hsla()` functional forms.
pub(crate) fn parse_solid(input: &str) -> Result<Rgba8, String> {
    let s = input.trim();
    if s.is_empty() {
        return Err("color must be a non-empty string".to_owned());
    }
    let parsed: csscolorparser::Color = s
        .parse()
        .map_err(|e| format!("invalid color \"{input}\": {e}"))?;
    let [r, g, b, a] = parsed.to_rgba8();
    Ok(Rgba8::new(r, g, b, a))
}

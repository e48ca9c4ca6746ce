//! CSS colour parser.
//!
//! Built on `winnow` 0.7. Accepts the forms the drawing page and the
//! session config use: `rgba(r, g, b, a)`, `rgb(r, g, b)`, and hex
//! (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`).

use crate::model::Rgba;
use winnow::ascii::{digit1, float, multispace0};
use winnow::combinator::{alt, opt, preceded};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::take_while;

/// Parse a CSS colour string into an [`Rgba`].
#[must_use = "parsing result should be used"]
pub fn parse_color(input: &str) -> Result<Rgba, String> {
    parse_css_color
        .parse(input.trim())
        .map_err(|e| format!("Color parse error in {input:?}: {e}"))
}

fn parse_css_color(input: &mut &str) -> ModalResult<Rgba> {
    alt((parse_hex_color, parse_rgb_function)).parse_next(input)
}

fn parse_hex_color(input: &mut &str) -> ModalResult<Rgba> {
    let _ = '#'.parse_next(input)?;
    take_while(3..=8, |c: char| c.is_ascii_hexdigit())
        .verify_map(Rgba::from_hex)
        .parse_next(input)
}

fn parse_rgb_function(input: &mut &str) -> ModalResult<Rgba> {
    let _ = alt(("rgba", "rgb")).parse_next(input)?;
    let _ = (skip_space, '(', skip_space).parse_next(input)?;
    let r = parse_channel.parse_next(input)?;
    parse_comma.parse_next(input)?;
    let g = parse_channel.parse_next(input)?;
    parse_comma.parse_next(input)?;
    let b = parse_channel.parse_next(input)?;
    let a = opt(preceded(parse_comma, parse_alpha)).parse_next(input)?;
    let _ = (skip_space, ')').parse_next(input)?;
    Ok(Rgba::new(r, g, b, a.unwrap_or(255)))
}

// ─── Low-level parsers ──────────────────────────────────────────────────

fn skip_space(input: &mut &str) -> ModalResult<()> {
    multispace0.void().parse_next(input)
}

fn parse_comma(input: &mut &str) -> ModalResult<()> {
    (skip_space, ',', skip_space).void().parse_next(input)
}

/// A `0..=255` integer channel.
fn parse_channel(input: &mut &str) -> ModalResult<u8> {
    digit1
        .try_map(|digits: &str| digits.parse::<u8>())
        .parse_next(input)
}

/// A `0.0..=1.0` alpha fraction, scaled to a byte.
fn parse_alpha(input: &mut &str) -> ModalResult<u8> {
    let value: f64 = float.parse_next(input)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    Ok((value * 255.0).round() as u8)
}

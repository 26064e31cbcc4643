//! Escape sequence tokenizer.
//!
//! Scans input left to right in a single pass:
//! - `ESC [ <digits and ;> m` is an SGR color sequence and becomes color tokens
//! - `ESC [ <digits> <A-H f J K S T>` is a cursor/erase sequence and is dropped
//! - any other `ESC [` is not a sequence: the `ESC` is dropped and the rest
//!   continues as literal text
//! - everything else up to the next `ESC [` is one text run

use crate::color::{ansi_color, palette256, Rgba};
use crate::error::{Error, Result};

use super::{ColorType, Token, Tokens};

const CSI: &str = "\x1b[";

/// Final bytes of the non-color control sequences that are recognized and discarded.
const CONTROL_FINALS: &[u8] = b"ABCDEFGHfJKST";

/// Extended color selector following `38`/`48`.
const EXTENDED_RGB: u32 = 2;
const EXTENDED_256: u32 = 5;

/// Tokenize text containing ANSI color escape sequences.
///
/// Only a malformed extended color (`38`/`48` not followed by a valid
/// `2;r;g;b` or `5;n` tail) is an error. Other unsupported or incomplete
/// sequences degrade to literal text.
pub fn tokenize(input: &str) -> Result<Tokens> {
    let mut tokens = Tokens::new();
    let mut rest = input;

    while !rest.is_empty() {
        if let Some((params, len)) = match_color_sequence(rest) {
            push_sgr(&mut tokens, params)?;
            rest = &rest[len..];
        } else if let Some(len) = match_control_sequence(rest) {
            rest = &rest[len..];
        } else if rest.starts_with(CSI) {
            // Unsupported or incomplete CSI: drop the ESC, keep the rest as text.
            let after_esc = &rest[1..];
            let end = next_csi(after_esc, 1);
            tokens.push(Token::text(&after_esc[..end]));
            rest = &after_esc[end..];
        } else {
            let end = next_csi(rest, 0);
            tokens.push(Token::text(&rest[..end]));
            rest = &rest[end..];
        }
    }

    Ok(tokens)
}

/// Byte offset of the next `ESC [` at or after `from`, or the end of `s`.
fn next_csi(s: &str, from: usize) -> usize {
    s.get(from..)
        .and_then(|tail| tail.find(CSI))
        .map_or(s.len(), |i| i + from)
}

/// Match `ESC [ [0-9;]* m` at the start of `s`.
///
/// Returns the parameter section and the full sequence length in bytes.
fn match_color_sequence(s: &str) -> Option<(&str, usize)> {
    let body = s.strip_prefix(CSI)?;
    let params_len = body
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b';')
        .count();
    if body.as_bytes().get(params_len) != Some(&b'm') {
        return None;
    }
    Some((&body[..params_len], CSI.len() + params_len + 1))
}

/// Match `ESC [ [0-9]* <final>` for the discarded control sequences.
fn match_control_sequence(s: &str) -> Option<usize> {
    let body = s.strip_prefix(CSI)?;
    let digits = body.bytes().take_while(u8::is_ascii_digit).count();
    let final_byte = body.as_bytes().get(digits)?;
    CONTROL_FINALS
        .contains(final_byte)
        .then_some(CSI.len() + digits + 1)
}

/// Numeric value of a parameter made of ASCII digits, saturating on overflow.
///
/// Leading zeros are allowed (`"031"` is 31).
fn param_value(param: &str) -> u32 {
    param.bytes().fold(0u32, |acc, b| {
        acc.saturating_mul(10)
            .saturating_add(u32::from(b - b'0'))
    })
}

/// Clamp a parameter to a color channel, as 8-bit parsing with saturation does.
fn channel(param: &str) -> u8 {
    u8::try_from(param_value(param)).unwrap_or(u8::MAX)
}

/// Walk the `;`-separated SGR parameters and push their color tokens.
fn push_sgr(tokens: &mut Tokens, params: &str) -> Result<()> {
    let parts: Vec<&str> = params.split(';').collect();
    let mut i = 0;

    while i < parts.len() {
        let param = parts[i];
        i += 1;

        if param.is_empty() {
            tokens.push(Token::reset());
            continue;
        }

        let n = param_value(param);
        match n {
            0..=9 => {
                if let Some(attr) = ColorType::from_attribute(n) {
                    tokens.push(Token::Color(attr));
                }
            }
            30..=37 | 90..=97 => {
                if let Some(color) = ansi_color(n) {
                    tokens.push(Token::foreground(color));
                }
            }
            40..=47 | 100..=107 => {
                if let Some(color) = ansi_color(n) {
                    tokens.push(Token::background(color));
                }
            }
            38 | 48 => {
                let (color, consumed) = extended_color(params, &parts[i..])?;
                i += consumed;
                tokens.push(if n == 38 {
                    Token::foreground(color)
                } else {
                    Token::background(color)
                });
            }
            _ => {}
        }
    }

    Ok(())
}

/// Parse the tail of a `38`/`48` prefix.
///
/// Returns the color and how many parameters after the prefix were consumed.
fn extended_color(sequence: &str, tail: &[&str]) -> Result<(Rgba, usize)> {
    let malformed = || Error::Parse {
        sequence: sequence.to_string(),
    };
    let arg = |i: usize| {
        tail.get(i)
            .copied()
            .filter(|p| !p.is_empty())
            .ok_or_else(malformed)
    };

    match param_value(arg(0)?) {
        EXTENDED_256 => Ok((palette256(channel(arg(1)?)), 2)),
        EXTENDED_RGB => {
            let color = Rgba::rgb(channel(arg(1)?), channel(arg(2)?), channel(arg(3)?));
            Ok((color, 4))
        }
        _ => Err(malformed()),
    }
}

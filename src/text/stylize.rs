//! Glyph substitution for stylized chat text.
//!
//! Chat clients render plain text only, so emphasis is faked by mapping ASCII
//! letters and digits into Unicode's mathematical alphanumeric and enclosed
//! alphanumeric blocks. Characters without a mapping pass through untouched.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Normal,
    SansBold,
    SansItalic,
    BoldScript,
    Squared,
    SquaredNeg,
}

/// First code points of each contiguous block: (upper, lower, digits)
struct Block {
    upper: Option<u32>,
    lower: Option<u32>,
    digit: Option<u32>,
}

impl Style {
    fn block(self) -> Block {
        match self {
            Style::Normal => Block {
                upper: None,
                lower: None,
                digit: None,
            },
            Style::SansBold => Block {
                upper: Some(0x1D5D4),
                lower: Some(0x1D5EE),
                digit: Some(0x1D7EC),
            },
            Style::SansItalic => Block {
                upper: Some(0x1D608),
                lower: Some(0x1D622),
                digit: None,
            },
            Style::BoldScript => Block {
                upper: Some(0x1D4D0),
                lower: Some(0x1D4EA),
                digit: None,
            },
            // Enclosed letters only exist in capitals
            Style::Squared => Block {
                upper: Some(0x1F130),
                lower: Some(0x1F130),
                digit: None,
            },
            Style::SquaredNeg => Block {
                upper: Some(0x1F170),
                lower: Some(0x1F170),
                digit: None,
            },
        }
    }
}

fn shift(base: Option<u32>, offset: u32, original: char) -> char {
    base.and_then(|b| char::from_u32(b + offset))
        .unwrap_or(original)
}

/// Restyle every ASCII letter and digit of `text`.
pub fn stylize(text: &str, style: Style) -> String {
    if style == Style::Normal {
        return text.to_string();
    }

    let block = style.block();
    text.chars()
        .map(|c| match c {
            'A'..='Z' => shift(block.upper, c as u32 - 'A' as u32, c),
            'a'..='z' => shift(block.lower, c as u32 - 'a' as u32, c),
            '0'..='9' => shift(block.digit, c as u32 - '0' as u32, c),
            _ => c,
        })
        .collect()
}

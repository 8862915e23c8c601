use std::sync::LazyLock;

use regex::{Captures, Regex};

pub const SECTION_SIGN: char = '§';

static HEX_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#([0-9A-Fa-f]{6})").expect("hex colour pattern"));
static LEGACY_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([0-9A-Fa-fK-Ok-oRrXx])").expect("legacy colour pattern"));

/// Rewrites `&`-prefixed codes into section-sign formatting codes.
///
/// `&#RRGGBB` becomes `§x§R§R§G§G§B§B` and `&c`, `&l`, `&x`, ... become `§c`, `§l`, `§x`,
/// so the `&x&R&R&G&G&B&B` form works too.
/// Codes are lower-cased. Text without recognised codes is returned as is.
pub fn translate(input: &str) -> String {
    let hexed = HEX_CODE.replace_all(input, |caps: &Captures| {
        let mut out = String::with_capacity(21);
        out.push(SECTION_SIGN);
        out.push('x');
        for digit in caps[1].chars() {
            out.push(SECTION_SIGN);
            out.push(digit.to_ascii_lowercase());
        }
        out
    });

    LEGACY_CODE
        .replace_all(&hexed, |caps: &Captures| {
            format!("{SECTION_SIGN}{}", caps[1].to_ascii_lowercase())
        })
        .into_owned()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LegacyColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl LegacyColor {
    pub fn from_code(code: char) -> Option<Self> {
        let color = match code.to_ascii_lowercase() {
            '0' => Self::Black,
            '1' => Self::DarkBlue,
            '2' => Self::DarkGreen,
            '3' => Self::DarkAqua,
            '4' => Self::DarkRed,
            '5' => Self::DarkPurple,
            '6' => Self::Gold,
            '7' => Self::Gray,
            '8' => Self::DarkGray,
            '9' => Self::Blue,
            'a' => Self::Green,
            'b' => Self::Aqua,
            'c' => Self::Red,
            'd' => Self::LightPurple,
            'e' => Self::Yellow,
            'f' => Self::White,
            _ => return None,
        };
        Some(color)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Legacy(LegacyColor),
    Rgb(u8, u8, u8),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
    pub italic: bool,
    pub underlined: bool,
    pub strikethrough: bool,
    pub obfuscated: bool,
}

impl Style {
    fn with_color(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }
}

/// A run of text sharing one style.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

/// Splits section-sign formatted text into styled runs.
///
/// A colour code resets the active decorations, `§r` resets everything.
/// Unknown codes and a trailing `§` are kept as literal text.
pub fn parse(formatted: &str) -> Vec<Segment> {
    let chars: Vec<char> = formatted.chars().collect();
    let mut segments = Vec::new();
    let mut style = Style::default();
    let mut text = String::new();
    let mut i = 0;

    while i < chars.len() {
        let current = chars[i];
        let Some(&code) = chars.get(i + 1).filter(|_| current == SECTION_SIGN) else {
            text.push(current);
            i += 1;
            continue;
        };

        let (next_style, consumed) = match code.to_ascii_lowercase() {
            'x' => match hex_color(&chars[i + 2..]) {
                Some(color) => (Style::with_color(color), 14),
                None => (style, 0),
            },
            'k' => (Style { obfuscated: true, ..style }, 2),
            'l' => (Style { bold: true, ..style }, 2),
            'm' => (Style { strikethrough: true, ..style }, 2),
            'n' => (Style { underlined: true, ..style }, 2),
            'o' => (Style { italic: true, ..style }, 2),
            'r' => (Style::default(), 2),
            other => match LegacyColor::from_code(other) {
                Some(color) => (Style::with_color(Color::Legacy(color)), 2),
                None => (style, 0),
            },
        };

        if consumed == 0 {
            text.push(current);
            i += 1;
            continue;
        }

        if next_style != style && !text.is_empty() {
            segments.push(Segment {
                text: std::mem::take(&mut text),
                style,
            });
        }
        style = next_style;
        i += consumed;
    }

    if !text.is_empty() {
        segments.push(Segment { text, style });
    }
    segments
}

/// Reads the `§R§R§G§G§B§B` tail of a `§x` sequence.
fn hex_color(rest: &[char]) -> Option<Color> {
    if rest.len() < 12 {
        return None;
    }
    let mut digits = String::with_capacity(6);
    for pair in rest[..12].chunks(2) {
        if pair[0] != SECTION_SIGN || !pair[1].is_ascii_hexdigit() {
            return None;
        }
        digits.push(pair[1]);
    }
    let value = u32::from_str_radix(&digits, 16).ok()?;
    Some(Color::Rgb(
        (value >> 16) as u8,
        (value >> 8) as u8,
        value as u8,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn translates_legacy_codes() {
        assert_eq!(translate("&aHello &LWorld"), "§aHello §lWorld");
    }

    #[test]
    fn translates_hex_codes() {
        assert_eq!(translate("&#FF8800Warm"), "§x§f§f§8§8§0§0Warm");
    }

    #[test]
    fn translates_spelled_out_hex_codes() {
        let translated = translate("&X&f&F&8&8&0&0Warm");
        assert_eq!(translated, "§x§f§f§8§8§0§0Warm");
        assert_eq!(
            parse(&translated),
            vec![Segment {
                text: "Warm".to_string(),
                style: Style::with_color(Color::Rgb(0xff, 0x88, 0x00)),
            }]
        );
    }

    #[test]
    fn leaves_unknown_codes_alone() {
        assert_eq!(translate("&zNope & more &#12"), "&zNope & more &#12");
    }

    #[test]
    fn plain_text_is_unchanged() {
        for input in ["", "Light level 7", "50% & rising", "a&&"] {
            assert_eq!(translate(input), input);
            assert_eq!(translate(&translate(input)), input);
        }
    }

    #[test]
    fn parses_colour_runs() {
        let segments = parse(&translate("&cMonsters &lcan&r spawn"));
        assert_eq!(
            segments,
            vec![
                Segment {
                    text: "Monsters ".to_string(),
                    style: Style::with_color(Color::Legacy(LegacyColor::Red)),
                },
                Segment {
                    text: "can".to_string(),
                    style: Style {
                        bold: true,
                        ..Style::with_color(Color::Legacy(LegacyColor::Red))
                    },
                },
                Segment {
                    text: " spawn".to_string(),
                    style: Style::default(),
                },
            ]
        );
    }

    #[test]
    fn colour_code_resets_decorations() {
        let segments = parse("§l§obold§aplain");
        assert_eq!(segments[1].style, Style::with_color(Color::Legacy(LegacyColor::Green)));
    }

    #[test]
    fn parses_hex_runs() {
        let segments = parse(&translate("&#00ff7fLevel 12"));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].style.color, Some(Color::Rgb(0x00, 0xff, 0x7f)));
        assert_eq!(segments[0].text, "Level 12");
    }

    #[test]
    fn keeps_dangling_section_signs() {
        let segments = parse("100§ §");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "100§ §");
    }
}

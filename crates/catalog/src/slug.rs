use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

pub const MAX_SLUG_LEN: usize = 80;

/// Lowercase ASCII slug: diacritics stripped, every run of other characters
/// collapsed to one `-`, no leading/trailing hyphen, at most [`MAX_SLUG_LEN`].
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len().min(MAX_SLUG_LEN));
    let mut pending_hyphen = false;

    'outer: for lower in input
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
    {
        let mut buf = [0u8; 4];
        let text: &str = match fold_letter(lower) {
            Some(folded) => folded,
            None => lower.encode_utf8(&mut buf),
        };
        for ch in text.chars() {
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(ch);
                if out.len() >= MAX_SLUG_LEN {
                    break 'outer;
                }
            } else {
                pending_hyphen = true;
            }
        }
    }

    out.truncate(MAX_SLUG_LEN);
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Letters NFKD leaves intact that still have an obvious ASCII spelling.
fn fold_letter(ch: char) -> Option<&'static str> {
    Some(match ch {
        'ł' => "l",
        'đ' => "d",
        'ø' => "o",
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        _ => return None,
    })
}

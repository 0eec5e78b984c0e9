//! Terminal text sanitization.
//!
//! Section text can come from a user-edited config file. Terminal emulators
//! interpret escape sequences (clipboard writes, hyperlinks, cursor movement),
//! so anything headed for the screen is stripped of them first.

use std::borrow::Cow;
use std::iter::Peekable;

const ESC: char = '\x1b';
const BEL: char = '\x07';
/// C1 equivalent of `ESC [`.
const C1_CSI: char = '\u{009b}';

/// Sanitize text for terminal display.
///
/// Removes ANSI escape sequences, C0 controls other than `\n`, `\t`, `\r`,
/// C1 controls and DEL. Returns `Cow::Borrowed` when nothing needs removing.
///
/// ```
/// use snapdeck_types::sanitize_terminal_text;
///
/// assert_eq!(sanitize_terminal_text("plain"), "plain");
/// assert_eq!(sanitize_terminal_text("a\x1b[31mb"), "ab");
/// ```
#[must_use]
pub fn sanitize_terminal_text(input: &str) -> Cow<'_, str> {
    if !input.chars().any(is_disallowed) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            ESC => skip_escape(&mut chars),
            C1_CSI => skip_csi(&mut chars),
            c if is_disallowed(c) => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

fn is_disallowed(c: char) -> bool {
    let c0 = c <= '\x1f' && !matches!(c, '\n' | '\t' | '\r');
    let c1 = ('\u{0080}'..='\u{009f}').contains(&c);
    c0 || c1 || c == '\x7f'
}

fn skip_escape<I: Iterator<Item = char>>(chars: &mut Peekable<I>) {
    match chars.peek().copied() {
        Some('[') => {
            chars.next();
            skip_csi(chars);
        }
        // OSC, DCS, SOS, PM, APC: string terminated by BEL or ST (ESC \).
        Some(']' | 'P' | 'X' | '^' | '_') => {
            chars.next();
            while let Some(c) = chars.next() {
                if c == BEL {
                    break;
                }
                if c == ESC && chars.peek() == Some(&'\\') {
                    chars.next();
                    break;
                }
            }
        }
        // Two-character sequence (ESC 7, ESC c, ...).
        Some(_) => {
            chars.next();
        }
        None => {}
    }
}

fn skip_csi<I: Iterator<Item = char>>(chars: &mut Peekable<I>) {
    // Parameters and intermediates run until a final byte in 0x40..=0x7E.
    for c in chars.by_ref() {
        if ('\x40'..='\x7e').contains(&c) {
            break;
        }
    }
}

//! Argument Rendering
//!
//! Renders call arguments the way they appear in recorded history: as a
//! positional argument tuple, e.g. `('foo',)`, `(42,)` or `(1, 'a')`.

// == Repr ==
/// Literal-style rendering of a single argument.
pub trait Repr {
    fn repr(&self) -> String;
}

impl Repr for str {
    fn repr(&self) -> String {
        // Single quotes unless the text contains one and no double quote
        let quote = if self.contains('\'') && !self.contains('"') {
            '"'
        } else {
            '\''
        };

        let mut out = String::with_capacity(self.len() + 2);
        out.push(quote);
        for c in self.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c == quote => {
                    out.push('\\');
                    out.push(c);
                }
                c if !is_printable(c) => out.push_str(&escape_code_point(c)),
                c => out.push(c),
            }
        }
        out.push(quote);
        out
    }
}

/// Whether `c` is shown as-is inside a quoted string.
///
/// Control, separator (other than space), format, private-use and
/// noncharacter code points are escaped.
fn is_printable(c: char) -> bool {
    if c == ' ' {
        return true;
    }
    if c.is_control() || c.is_whitespace() {
        return false;
    }
    !matches!(
        c as u32,
        0x00ad
            | 0x0600..=0x0605
            | 0x061c
            | 0x06dd
            | 0x070f
            | 0x180e
            | 0x200b..=0x200f
            | 0x202a..=0x202e
            | 0x2060..=0x206f
            | 0xe000..=0xf8ff
            | 0xfeff
            | 0xfdd0..=0xfdef
            | 0xfff9..=0xfffb
            | 0xfffe..=0xffff
            | 0xf0000..=0x10ffff
    )
}

/// Escapes a code point as `\xNN`, `\uNNNN` or `\UNNNNNNNN`.
fn escape_code_point(c: char) -> String {
    let code = c as u32;
    if code <= 0xff {
        format!("\\x{:02x}", code)
    } else if code <= 0xffff {
        format!("\\u{:04x}", code)
    } else {
        format!("\\U{:08x}", code)
    }
}

impl Repr for String {
    fn repr(&self) -> String {
        self.as_str().repr()
    }
}

impl Repr for [u8] {
    fn repr(&self) -> String {
        let quote = if self.contains(&b'\'') && !self.contains(&b'"') {
            b'"'
        } else {
            b'\''
        };

        let mut out = String::from("b");
        out.push(quote as char);
        for &byte in self {
            match byte {
                b'\\' => out.push_str("\\\\"),
                b'\n' => out.push_str("\\n"),
                b'\r' => out.push_str("\\r"),
                b'\t' => out.push_str("\\t"),
                b if b == quote => {
                    out.push('\\');
                    out.push(b as char);
                }
                0x20..=0x7e => out.push(byte as char),
                _ => out.push_str(&format!("\\x{:02x}", byte)),
            }
        }
        out.push(quote as char);
        out
    }
}

impl Repr for Vec<u8> {
    fn repr(&self) -> String {
        self.as_slice().repr()
    }
}

impl Repr for i64 {
    fn repr(&self) -> String {
        self.to_string()
    }
}

impl Repr for f64 {
    fn repr(&self) -> String {
        if self.is_nan() {
            "nan".to_string()
        } else if self.is_infinite() {
            if *self > 0.0 { "inf" } else { "-inf" }.to_string()
        } else {
            python_exponent(format!("{:?}", self))
        }
    }
}

/// Rewrites a `1e16` / `1e-5` exponent as `1e+16` / `1e-05`.
fn python_exponent(text: String) -> String {
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent.trim_start_matches('+')),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}

impl Repr for bool {
    fn repr(&self) -> String {
        if *self { "True" } else { "False" }.to_string()
    }
}

impl<T: Repr + ?Sized> Repr for &T {
    fn repr(&self) -> String {
        (**self).repr()
    }
}

// == Call Args ==
/// Rendering of a full positional argument list.
pub trait CallArgs {
    fn args_repr(&self) -> String;
}

impl CallArgs for String {
    fn args_repr(&self) -> String {
        format!("({},)", self.repr())
    }
}

impl CallArgs for i64 {
    fn args_repr(&self) -> String {
        format!("({},)", self.repr())
    }
}

impl CallArgs for () {
    fn args_repr(&self) -> String {
        "()".to_string()
    }
}

impl<A: Repr> CallArgs for (A,) {
    fn args_repr(&self) -> String {
        format!("({},)", self.0.repr())
    }
}

impl<A: Repr, B: Repr> CallArgs for (A, B) {
    fn args_repr(&self) -> String {
        format!("({}, {})", self.0.repr(), self.1.repr())
    }
}

impl<A: Repr, B: Repr, C: Repr> CallArgs for (A, B, C) {
    fn args_repr(&self) -> String {
        format!("({}, {}, {})", self.0.repr(), self.1.repr(), self.2.repr())
    }
}

//! `io:format`-style string formatting over [`Term`] arguments.
//!
//! Literal text is copied through.  Each `~` directive, optionally preceded
//! by field width and precision digits (which are accepted and ignored),
//! renders the next argument:
//!
//! | directive                          | output                                   |
//! |------------------------------------|------------------------------------------|
//! | `w p f g e s W P B # b x +`        | the term's default text                  |
//! | `c`                                | a byte as its character                  |
//! | `v`                                | an atom, string or variable name, raw    |
//! | `i`                                | nothing; the argument is skipped         |
//! | `n`                                | a newline, no argument                   |
//! | `~`                                | a literal `~`, no argument               |
//!
//! The default text of a string or atom is its raw value, so `~w` of the
//! string `"Ann"` writes `Ann`.

use crate::{bail, TermParserError};
use erl_terms::Term;

/// Formats `args` into `fmt`.
///
/// ```
/// # use erl_terms::Term;
/// # use erl_terms_parser::format;
/// let s = format("Hello ~w, you are ~w years old~n", &["Ann".into(), 30.into()]).unwrap();
/// assert_eq!(s, "Hello Ann, you are 30 years old\n");
/// ```
///
/// # Errors
/// A dangling `~`, an unknown directive, a directive without an argument
/// left, or arguments left over at the end.
pub fn format(fmt: &str, args: &[Term]) -> Result<String, TermParserError> {
    let mut out = String::with_capacity(fmt.len());
    let mut args = args.iter();
    let mut chars = fmt.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        // Width and precision are not supported; skip them.
        while chars
            .peek()
            .is_some_and(|(_, d)| d.is_ascii_digit() || *d == '.' || *d == '*')
        {
            chars.next();
        }
        let Some((_, directive)) = chars.next() else {
            bail!(UnexpectedEnd {
                pos: fmt.len(),
                expected: "directive",
            });
        };
        match directive {
            '~' => {
                out.push('~');
                continue;
            }
            'n' => {
                out.push('\n');
                continue;
            }
            'w' | 'p' | 'f' | 'g' | 'e' | 's' | 'W' | 'P' | 'B' | '#' | 'b' | 'x' | '+' | 'c'
            | 'v' | 'i' => {}
            _ => bail!(UnknownDirective { pos, directive }),
        }
        let Some(arg) = args.next() else {
            bail!(MissingArgument { pos, directive });
        };
        match directive {
            'i' => {}
            'c' => match arg {
                Term::Byte(b) => out.push(char::from(*b)),
                other => out.push_str(&other.text()),
            },
            'v' => match arg {
                Term::Var(v) => out.push_str(v.name()),
                other => out.push_str(&other.text()),
            },
            _ => out.push_str(&arg.text()),
        }
    }

    let count = args.len();
    if count > 0 {
        bail!(ExtraArguments {
            pos: fmt.len(),
            count,
        });
    }
    Ok(out)
}

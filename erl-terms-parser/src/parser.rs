//! Recursive-descent compiler from Erlang term syntax to [`Term`] values.
//!
//! [`TermParser`] reads one term at a time from a borrowed string.  The
//! grammar covers tuples, lists with improper tails, maps, binaries,
//! character literals, atoms (bare and quoted), booleans, integers, floats,
//! strings and typed variables:
//!
//! ```text
//! term       := tuple | list | map | binary | char | directive
//!             | atom | quotedAtom | var | number | string
//! tuple      := '{' (term (',' term)*)? '}'
//! list       := '[' (term (',' term)* ('|' term)?)? ']'
//! map        := '#{' (term '=>' term (',' term '=>' term)*)? '}'
//! binary     := '<<' (segment (',' segment)*)? '>>'
//! segment    := string | integer | char
//! char       := '$' (character | escape)
//! var        := [A-Z_][A-Za-z0-9_]* ('::' typeName '()')?
//! atom       := [a-z][A-Za-z0-9_@]*
//! number     := '-'? digits ('.' digits)? ([eE] [+-]? digits)?
//! directive  := '~' directiveChar
//! ```
//!
//! Whitespace and `%` comments may appear between tokens.  A directive
//! consumes the next caller-supplied argument and splices it into the
//! result, so `parse_with("{ok, ~w}", &[x])` builds `{ok, X}` without going
//! through text.

use crate::scanner::Scanner;
use crate::{bail, TermParserError};
use erl_terms::{Atom, Kind, Term};
use std::fmt;

/// Deepest nesting of tuples, lists and maps the parser accepts.
pub const MAX_DEPTH: usize = 256;

/// Compiles a complete term.  An optional trailing `.` is allowed; anything
/// else after the term is an error.
///
/// ```
/// # use erl_terms::{list, tuple, Term};
/// # use erl_terms_parser::parse;
/// let t = parse("{ok, [1, 2, 3]}.").unwrap();
/// assert_eq!(t, tuple!(Term::atom("ok"), list![1, 2, 3]));
/// ```
pub fn parse(text: &str) -> Result<Term, TermParserError> {
    parse_with(text, &[])
}

/// Compiles a complete term, substituting `args` for `~` directives in
/// order.  Every argument must be consumed.
pub fn parse_with(text: &str, args: &[Term]) -> Result<Term, TermParserError> {
    let mut parser = TermParser::new(text).with_args(args);
    let term = parser.parse_term()?;
    parser.finish()?;
    Ok(term)
}

/// Compiles a sequence of `.`-terminated terms.
pub fn parse_all(text: &str) -> Result<Vec<Term>, TermParserError> {
    let mut parser = TermParser::new(text);
    let mut terms = Vec::new();
    while let Some(term) = parser.next_term()? {
        terms.push(term);
    }
    Ok(terms)
}

/// Compiles a `Module:Function(Arg1, ..., ArgN)` call expression.
pub fn parse_mfa(text: &str) -> Result<Mfa, TermParserError> {
    parse_mfa_with(text, &[])
}

/// Compiles a call expression, substituting `args` for `~` directives.  The
/// module and function may be given as `~a` or `~w` directives whose
/// argument is an atom or a string.
pub fn parse_mfa_with(text: &str, args: &[Term]) -> Result<Mfa, TermParserError> {
    let mut parser = TermParser::new(text).with_args(args);
    let mfa = parser.parse_mfa()?;
    parser.finish()?;
    Ok(mfa)
}

/// A remote call: module, function and argument terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mfa {
    pub module: Atom,
    pub function: Atom,
    pub args: Vec<Term>,
}

impl Mfa {
    /// Returns the number of arguments.
    #[inline]
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Returns the arguments as a proper list term.
    pub fn args_list(&self) -> Term {
        Term::list_from(&self.args)
    }
}

/// Writes `module:function(Arg1,...,ArgN)`.
impl fmt::Display for Mfa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}(", self.module, self.function)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{arg}")?;
        }
        f.write_str(")")
    }
}

/// A term compiler positioned inside a borrowed text.
///
/// Use [`parse`] or [`parse_with`] for whole inputs.  The parser itself
/// supports reading a term that starts at an arbitrary offset and reports
/// where the term ended:
///
/// ```
/// # use erl_terms::Term;
/// # use erl_terms_parser::TermParser;
/// let text = "42 foo";
/// let mut p = TermParser::new(text).starting_at(2);
/// assert_eq!(p.parse_term().unwrap(), Term::atom("foo"));
/// assert_eq!(p.position(), text.len());
/// ```
#[derive(Debug, Clone)]
pub struct TermParser<'a> {
    scanner: Scanner<'a>,
    args: &'a [Term],
    next_arg: usize,
    depth: usize,
}

impl<'a> TermParser<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            scanner: Scanner::new(text, 0),
            args: &[],
            next_arg: 0,
            depth: 0,
        }
    }

    /// Supplies the arguments consumed by `~` directives.
    pub fn with_args(mut self, args: &'a [Term]) -> Self {
        self.args = args;
        self.next_arg = 0;
        self
    }

    /// Starts reading at byte offset `pos`.
    pub fn starting_at(mut self, pos: usize) -> Self {
        self.scanner = Scanner::new(self.scanner.text(), pos);
        self
    }

    /// Returns the byte offset just past the last term read.
    #[inline]
    pub fn position(&self) -> usize {
        self.scanner.pos()
    }

    /// Returns how many directive arguments have been consumed.
    #[inline]
    pub fn args_consumed(&self) -> usize {
        self.next_arg
    }

    /// Checks that only whitespace, comments and an optional `.` remain,
    /// and that every argument was consumed.
    pub fn finish(mut self) -> Result<(), TermParserError> {
        self.scanner.skip_ws();
        if self.scanner.eat(".") {
            self.scanner.skip_ws();
        }
        if !self.scanner.is_eof() {
            return Err(self.scanner.unexpected("end of input"));
        }
        let unused = self.args.len() - self.next_arg;
        if unused > 0 {
            bail!(ExtraArguments {
                pos: self.scanner.pos(),
                count: unused,
            });
        }
        Ok(())
    }

    /// Reads one term, leaving the position just after it.
    pub fn parse_term(&mut self) -> Result<Term, TermParserError> {
        self.scanner.skip_ws();
        let pos = self.scanner.pos();
        let Some(c) = self.scanner.read() else {
            bail!(UnexpectedEnd {
                pos,
                expected: "term",
            });
        };
        match c {
            '{' => self.nested(pos, Self::parse_tuple),
            '[' => self.nested(pos, Self::parse_list),
            '#' if self.scanner.starts_with("#{") => self.nested(pos, Self::parse_map),
            '<' if self.scanner.starts_with("<<") => self.parse_binary(),
            '$' => Ok(Term::Byte(self.parse_char_literal()?)),
            '~' => self.parse_directive(),
            '"' => Ok(Term::Str(self.parse_quoted('"', "string")?)),
            '\'' => Ok(Term::atom(self.parse_quoted('\'', "quoted atom")?)),
            '-' | '0'..='9' => self.parse_number(),
            'a'..='z' => {
                let name = self.scan_atom_name();
                Ok(match name {
                    "true" => Term::Bool(true),
                    "false" => Term::Bool(false),
                    _ => Term::atom(name),
                })
            }
            'A'..='Z' | '_' => self.parse_var(),
            _ => Err(self.scanner.unexpected("term")),
        }
    }

    /// Reads the next `.`-terminated term, or `None` at the end of input.
    /// The final term may omit its `.`.
    pub fn next_term(&mut self) -> Result<Option<Term>, TermParserError> {
        self.scanner.skip_ws();
        if self.scanner.is_eof() {
            return Ok(None);
        }
        let term = self.parse_term()?;
        self.scanner.skip_ws();
        if !self.scanner.eat(".") && !self.scanner.is_eof() {
            return Err(self.scanner.unexpected("."));
        }
        Ok(Some(term))
    }

    /// Reads `Module:Function(Args...)`.
    pub fn parse_mfa(&mut self) -> Result<Mfa, TermParserError> {
        let module = self.parse_atom_slot()?;
        self.scanner.skip_ws();
        self.scanner.expect(":")?;
        let function = self.parse_atom_slot()?;
        self.scanner.skip_ws();
        self.scanner.expect("(")?;
        let args = self.parse_seq(")")?;
        log::trace!("mfa {module}:{function}/{}", args.len());
        Ok(Mfa {
            module,
            function,
            args,
        })
    }

    /// Runs `f` one nesting level deeper, failing past [`MAX_DEPTH`].
    fn nested(
        &mut self,
        pos: usize,
        f: fn(&mut Self) -> Result<Term, TermParserError>,
    ) -> Result<Term, TermParserError> {
        if self.depth >= MAX_DEPTH {
            bail!(TooDeep {
                pos,
                limit: MAX_DEPTH,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Reads terms separated by commas up to the `close` delimiter, which
    /// is consumed.  The opening delimiter has already been consumed.
    fn parse_seq(&mut self, close: &'static str) -> Result<Vec<Term>, TermParserError> {
        let mut elems = Vec::new();
        self.scanner.skip_ws();
        if self.scanner.eat(close) {
            return Ok(elems);
        }
        loop {
            elems.push(self.parse_term()?);
            self.scanner.skip_ws();
            if self.scanner.eat(",") {
                continue;
            }
            self.scanner.expect(close)?;
            return Ok(elems);
        }
    }

    fn parse_tuple(&mut self) -> Result<Term, TermParserError> {
        self.scanner.expect("{")?;
        Ok(Term::tuple(self.parse_seq("}")?))
    }

    fn parse_list(&mut self) -> Result<Term, TermParserError> {
        self.scanner.expect("[")?;
        let mut elems = Vec::new();
        self.scanner.skip_ws();
        if self.scanner.eat("]") {
            return Ok(Term::nil());
        }
        loop {
            elems.push(self.parse_term()?);
            self.scanner.skip_ws();
            if self.scanner.eat(",") {
                continue;
            }
            if self.scanner.eat("|") {
                let tail = self.parse_term()?;
                self.scanner.skip_ws();
                self.scanner.expect("]")?;
                return Ok(Term::list_with_tail(elems, tail));
            }
            self.scanner.expect("]")?;
            return Ok(Term::list(elems));
        }
    }

    fn parse_map(&mut self) -> Result<Term, TermParserError> {
        self.scanner.expect("#{")?;
        let mut entries = Vec::new();
        self.scanner.skip_ws();
        if self.scanner.eat("}") {
            return Ok(Term::map(entries));
        }
        loop {
            let key = self.parse_term()?;
            self.scanner.skip_ws();
            self.scanner.expect("=>")?;
            let value = self.parse_term()?;
            entries.push((key, value));
            self.scanner.skip_ws();
            if self.scanner.eat(",") {
                continue;
            }
            self.scanner.expect("}")?;
            return Ok(Term::map(entries));
        }
    }

    fn parse_binary(&mut self) -> Result<Term, TermParserError> {
        let start = self.scanner.pos();
        self.scanner.expect("<<")?;
        let mut bytes = Vec::new();
        self.scanner.skip_ws();
        if self.scanner.eat(">>") {
            return Ok(Term::Binary(bytes));
        }
        loop {
            self.scanner.skip_ws();
            let pos = self.scanner.pos();
            match self.scanner.read() {
                Some('"') => {
                    let s = self.parse_quoted('"', "binary string")?;
                    bytes.extend_from_slice(s.as_bytes());
                }
                Some('$') => bytes.push(self.parse_char_literal()?),
                Some('-' | '0'..='9') => match self.parse_number()? {
                    Term::Int(value) => bytes.push(
                        u8::try_from(value)
                            .map_err(|_| TermParserError::ByteOutOfRange { pos, value })?,
                    ),
                    other => bail!(InvalidNumber {
                        pos,
                        text: other.to_string(),
                    }),
                },
                None => bail!(Unterminated {
                    pos: start,
                    what: "binary",
                }),
                Some(_) => return Err(self.scanner.unexpected("byte or string")),
            }
            self.scanner.skip_ws();
            if self.scanner.eat(",") {
                continue;
            }
            if self.scanner.is_eof() {
                bail!(Unterminated {
                    pos: start,
                    what: "binary",
                });
            }
            self.scanner.expect(">>")?;
            return Ok(Term::Binary(bytes));
        }
    }

    /// Reads `$c` or `$\escape` as a byte.
    fn parse_char_literal(&mut self) -> Result<u8, TermParserError> {
        let pos = self.scanner.pos();
        self.scanner.expect("$")?;
        let ch = match self.scanner.pop() {
            Some((_, '\\')) => self.parse_escape()?,
            Some((_, c)) => c,
            None => bail!(UnexpectedEnd {
                pos: self.scanner.pos(),
                expected: "character",
            }),
        };
        u8::try_from(u32::from(ch)).map_err(|_| TermParserError::ByteOutOfRange {
            pos,
            value: i64::from(u32::from(ch)),
        })
    }

    /// Reads the body of a quoted string or atom, processing escapes.
    fn parse_quoted(&mut self, quote: char, what: &'static str) -> Result<String, TermParserError> {
        let start = self.scanner.pos();
        self.scanner.advance();
        let mut out = String::new();
        loop {
            match self.scanner.pop() {
                None => bail!(Unterminated { pos: start, what }),
                Some((_, c)) if c == quote => return Ok(out),
                Some((_, '\\')) => out.push(self.parse_escape()?),
                Some((_, c)) => out.push(c),
            }
        }
    }

    /// Reads the part of an escape sequence after the backslash.
    fn parse_escape(&mut self) -> Result<char, TermParserError> {
        let pos = self.scanner.pos();
        let Some((_, c)) = self.scanner.pop() else {
            bail!(UnexpectedEnd {
                pos,
                expected: "escape sequence",
            });
        };
        Ok(match c {
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            's' => ' ',
            'v' => '\u{0B}',
            'f' => '\u{0C}',
            'b' => '\u{08}',
            'e' => '\u{1B}',
            'd' => '\u{7F}',
            '0'..='7' => {
                let mut value = c.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match self.scanner.read().and_then(|d| d.to_digit(8)) {
                        Some(d) => {
                            value = value * 8 + d;
                            self.scanner.advance();
                        }
                        None => break,
                    }
                }
                self.char_from(pos, value)?
            }
            'x' => {
                let digits = if self.scanner.eat("{") {
                    let digits = self.scanner.take_while(|d| d.is_ascii_hexdigit());
                    self.scanner.expect("}")?;
                    digits
                } else {
                    let start = self.scanner.pos();
                    for _ in 0..2 {
                        if !self.scanner.read().is_some_and(|d| d.is_ascii_hexdigit()) {
                            return Err(self.scanner.unexpected("hex digit"));
                        }
                        self.scanner.advance();
                    }
                    self.scanner.slice_from(start)
                };
                let value = u32::from_str_radix(digits, 16).map_err(|_| {
                    TermParserError::InvalidNumber {
                        pos,
                        text: digits.to_owned(),
                    }
                })?;
                self.char_from(pos, value)?
            }
            other => other,
        })
    }

    fn char_from(&self, pos: usize, value: u32) -> Result<char, TermParserError> {
        char::from_u32(value).ok_or_else(|| TermParserError::InvalidNumber {
            pos,
            text: format!("{value:#x}"),
        })
    }

    fn parse_number(&mut self) -> Result<Term, TermParserError> {
        let start = self.scanner.pos();
        self.scanner.eat("-");
        if !self.scanner.read().is_some_and(|c| c.is_ascii_digit()) {
            return Err(self.scanner.unexpected("digit"));
        }
        self.scanner.take_while(|c| c.is_ascii_digit());
        let mut is_float = false;
        // A `.` not followed by a digit ends the term.
        if self.scanner.read() == Some('.')
            && self.scanner.peek().is_some_and(|c| c.is_ascii_digit())
        {
            is_float = true;
            self.scanner.advance();
            self.scanner.take_while(|c| c.is_ascii_digit());
        }
        if matches!(self.scanner.read(), Some('e' | 'E')) {
            let mut probe = self.scanner.clone();
            probe.advance();
            if matches!(probe.read(), Some('+' | '-')) {
                probe.advance();
            }
            if probe.read().is_some_and(|c| c.is_ascii_digit()) {
                probe.take_while(|c| c.is_ascii_digit());
                self.scanner = probe;
                is_float = true;
            }
        }
        let text = self.scanner.slice_from(start);
        let invalid = || TermParserError::InvalidNumber {
            pos: start,
            text: text.to_owned(),
        };
        if is_float {
            let value: f64 = text.parse().map_err(|_| invalid())?;
            if !value.is_finite() {
                return Err(invalid());
            }
            Ok(Term::Float(value))
        } else {
            text.parse().map(Term::Int).map_err(|_| invalid())
        }
    }

    fn scan_atom_name(&mut self) -> &'a str {
        self.scanner
            .take_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '@')
    }

    fn parse_var(&mut self) -> Result<Term, TermParserError> {
        let name = self
            .scanner
            .take_while(|c| c.is_ascii_alphanumeric() || c == '_');
        if !self.scanner.eat("::") {
            return Ok(Term::var(name));
        }
        let pos = self.scanner.pos();
        let type_name = self
            .scanner
            .take_while(|c| c.is_ascii_lowercase() || c == '_');
        if type_name.is_empty() {
            return Err(self.scanner.unexpected("type name"));
        }
        self.scanner.expect("()")?;
        match Kind::from_alias(type_name) {
            Some(Some(kind)) => Ok(Term::typed_var(name, kind)),
            Some(None) => Ok(Term::var(name)),
            None => bail!(UnsupportedVariableType {
                pos,
                name: type_name.to_owned(),
            }),
        }
    }

    /// Takes the next directive argument.
    fn next_arg(&mut self, pos: usize, directive: char) -> Result<&'a Term, TermParserError> {
        let args: &'a [Term] = self.args;
        let Some(arg) = args.get(self.next_arg) else {
            bail!(MissingArgument { pos, directive });
        };
        self.next_arg += 1;
        Ok(arg)
    }

    fn parse_directive(&mut self) -> Result<Term, TermParserError> {
        let pos = self.scanner.pos();
        self.scanner.expect("~")?;
        let Some((_, directive)) = self.scanner.pop() else {
            bail!(UnexpectedEnd {
                pos: self.scanner.pos(),
                expected: "directive",
            });
        };
        let term = match directive {
            'w' | 'p' => self.next_arg(pos, directive)?.clone(),
            'a' => match self.next_arg(pos, directive)? {
                arg @ Term::Atom(_) => arg.clone(),
                Term::Str(s) => Term::atom(s),
                other => bail!(InvalidArgument {
                    pos,
                    directive,
                    arg: other.to_string(),
                }),
            },
            's' => Term::str(self.next_arg(pos, directive)?.as_string()?),
            'i' | 'd' => Term::Int(self.next_arg(pos, directive)?.as_long()?),
            'f' => Term::Float(self.next_arg(pos, directive)?.as_double()?),
            'b' => Term::Bool(self.next_arg(pos, directive)?.as_bool()?),
            'c' => Term::Byte(self.next_arg(pos, directive)?.as_byte()?),
            _ => bail!(UnknownDirective { pos, directive }),
        };
        log::trace!("~{directive} at {pos} -> {term}");
        Ok(term)
    }

    /// Reads an atom, a quoted atom, or a directive supplying one.
    fn parse_atom_slot(&mut self) -> Result<Atom, TermParserError> {
        self.scanner.skip_ws();
        let pos = self.scanner.pos();
        match self.scanner.read() {
            Some('a'..='z') => Ok(Atom::new(self.scan_atom_name())),
            Some('\'') => Ok(Atom::new(self.parse_quoted('\'', "quoted atom")?)),
            Some('~') => {
                self.scanner.advance();
                let Some((_, directive)) = self.scanner.pop() else {
                    bail!(UnexpectedEnd {
                        pos: self.scanner.pos(),
                        expected: "directive",
                    });
                };
                if !matches!(directive, 'w' | 'p' | 'a' | 's') {
                    bail!(UnknownDirective { pos, directive });
                }
                match self.next_arg(pos, directive)? {
                    Term::Atom(a) => Ok(a.clone()),
                    Term::Str(s) => Ok(Atom::new(s)),
                    other => bail!(InvalidArgument {
                        pos,
                        directive,
                        arg: other.to_string(),
                    }),
                }
            }
            _ => Err(self.scanner.unexpected("atom")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use erl_terms::{list, tuple};
    use proptest::prelude::*;

    fn atom(s: &str) -> Term {
        Term::atom(s)
    }

    #[test]
    fn scalars() {
        assert_eq!(parse("42").unwrap(), Term::Int(42));
        assert_eq!(parse("-7").unwrap(), Term::Int(-7));
        assert_eq!(parse("3.25").unwrap(), Term::Float(3.25));
        assert_eq!(parse("-1.5e3").unwrap(), Term::Float(-1500.0));
        assert_eq!(parse("2e-2").unwrap(), Term::Float(0.02));
        assert_eq!(parse("ok").unwrap(), atom("ok"));
        assert_eq!(parse("node@host").unwrap(), atom("node@host"));
        assert_eq!(parse("'Hello world'").unwrap(), atom("Hello world"));
        assert_eq!(parse("true").unwrap(), Term::Bool(true));
        assert_eq!(parse("false").unwrap(), Term::Bool(false));
        assert_eq!(parse("'true'").unwrap(), atom("true"));
        assert_eq!(parse("\"hi\"").unwrap(), Term::str("hi"));
        assert_eq!(parse("$a").unwrap(), Term::Byte(b'a'));
        assert_eq!(parse("$\\n").unwrap(), Term::Byte(b'\n'));
        assert_eq!(parse("$\\s").unwrap(), Term::Byte(b' '));
        assert_eq!(parse("$\\x41").unwrap(), Term::Byte(b'A'));
    }

    #[test]
    fn composites() {
        assert_eq!(
            parse("{ok,[1,2,3]}").unwrap(),
            tuple!(atom("ok"), list![1, 2, 3])
        );
        assert_eq!(parse("{}").unwrap(), tuple!());
        assert_eq!(parse("[ ]").unwrap(), Term::nil());
        assert_eq!(
            parse("[1, 2 | T]").unwrap(),
            list![1, 2; Term::var("T")]
        );
        assert_eq!(parse("[1 | [2, 3]]").unwrap(), list![1, 2, 3]);
        assert_eq!(
            parse("#{a => 1, \"b\" => {x}}").unwrap(),
            Term::map([
                (atom("a"), Term::Int(1)),
                (Term::str("b"), tuple!(atom("x")))
            ])
        );
        assert_eq!(parse("#{}").unwrap(), Term::map([]));
    }

    #[test]
    fn binaries() {
        assert_eq!(parse("<<>>").unwrap(), Term::binary(Vec::new()));
        assert_eq!(parse("<<1, 2, 255>>").unwrap(), Term::binary(vec![1, 2, 255]));
        assert_eq!(parse("<<\"abc\">>").unwrap(), Term::binary(*b"abc"));
        assert_eq!(parse("<<\"ab\", 0, $c>>").unwrap(), Term::binary(*b"ab\0c"));
        assert_eq!(
            parse("<<256>>").unwrap_err(),
            TermParserError::ByteOutOfRange { pos: 2, value: 256 }
        );
        assert_eq!(
            parse("<<1, 2").unwrap_err(),
            TermParserError::Unterminated {
                pos: 0,
                what: "binary"
            }
        );
    }

    #[test]
    fn escapes() {
        assert_eq!(
            parse(r#""a\tb\\c\"d\x{263A}\101\e""#).unwrap(),
            Term::str("a\tb\\c\"d\u{263A}A\u{1B}")
        );
        assert_eq!(parse(r"'it\'s'").unwrap(), atom("it's"));
        assert_eq!(parse("\"multi\nline\"").unwrap(), Term::str("multi\nline"));
    }

    #[test]
    fn variables() {
        assert_eq!(parse("X").unwrap(), Term::var("X"));
        assert_eq!(parse("_").unwrap(), Term::var("_"));
        assert_eq!(parse("_Tail1").unwrap(), Term::var("_Tail1"));
        assert_eq!(parse("X::integer()").unwrap(), Term::typed_var("X", Kind::Int));
        assert_eq!(parse("N::long()").unwrap(), Term::typed_var("N", Kind::Int));
        assert_eq!(parse("S::str()").unwrap(), Term::typed_var("S", Kind::Str));
        assert_eq!(parse("B::bytes()").unwrap(), Term::typed_var("B", Kind::Binary));
        assert_eq!(parse("R::ref()").unwrap(), Term::typed_var("R", Kind::Ref));
        assert_eq!(parse("A::any()").unwrap(), Term::var("A"));
        assert_eq!(
            parse("X::widget()").unwrap_err(),
            TermParserError::UnsupportedVariableType {
                pos: 3,
                name: "widget".into()
            }
        );
        assert!(parse("X::integer").is_err());
    }

    #[test]
    fn whitespace_comments_and_trailing_dot() {
        let t = parse("  % a comment\n { a , % inline\n b } .  ").unwrap();
        assert_eq!(t, tuple!(atom("a"), atom("b")));
        assert_eq!(parse("42.").unwrap(), Term::Int(42));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert_eq!(
            parse("{a} b").unwrap_err(),
            TermParserError::Unexpected {
                pos: 4,
                found: 'b',
                expected: "end of input"
            }
        );
        assert!(parse("1. 2").is_err());
    }

    #[test]
    fn syntax_errors_carry_positions() {
        assert_eq!(
            parse("").unwrap_err(),
            TermParserError::UnexpectedEnd {
                pos: 0,
                expected: "term"
            }
        );
        assert_eq!(
            parse("{1 2}").unwrap_err(),
            TermParserError::Unexpected {
                pos: 3,
                found: '2',
                expected: "}"
            }
        );
        assert_eq!(
            parse("\"abc").unwrap_err(),
            TermParserError::Unterminated {
                pos: 0,
                what: "string"
            }
        );
        assert_eq!(
            parse("99999999999999999999").unwrap_err(),
            TermParserError::InvalidNumber {
                pos: 0,
                text: "99999999999999999999".into()
            }
        );
        assert!(matches!(
            parse("-x").unwrap_err(),
            TermParserError::Unexpected { pos: 1, found: 'x', .. }
        ));
        assert!(parse("$").is_err());
        assert!(matches!(
            parse("$\\x{100}").unwrap_err(),
            TermParserError::ByteOutOfRange { pos: 0, value: 256 }
        ));
    }

    #[test]
    fn directives_splice_arguments() {
        let args = [
            tuple!(1, 2),
            Term::str("name"),
            atom("label"),
            Term::Int(7),
            Term::Int(2),
            atom("true"),
            Term::Int(65),
        ];
        let t = parse_with("{~w, ~a, ~s, ~i, ~f, ~b, ~c}", &args).unwrap();
        assert_eq!(
            t,
            tuple!(
                tuple!(1, 2),
                atom("name"),
                Term::str("label"),
                7,
                2.0,
                true,
                Term::Byte(b'A')
            )
        );
    }

    #[test]
    fn directive_errors() {
        assert_eq!(
            parse_with("{~w, ~w}", &[Term::Int(1)]).unwrap_err(),
            TermParserError::MissingArgument {
                pos: 5,
                directive: 'w'
            }
        );
        assert_eq!(
            parse_with("~w", &[Term::Int(1), Term::Int(2)]).unwrap_err(),
            TermParserError::ExtraArguments { pos: 2, count: 1 }
        );
        assert_eq!(
            parse_with("~q", &[Term::Int(1)]).unwrap_err(),
            TermParserError::UnknownDirective {
                pos: 0,
                directive: 'q'
            }
        );
        assert!(matches!(
            parse_with("~a", &[Term::Int(1)]).unwrap_err(),
            TermParserError::InvalidArgument { directive: 'a', .. }
        ));
        assert!(matches!(
            parse_with("~i", &[atom("x")]).unwrap_err(),
            TermParserError::Term(erl_terms::TermError::IncompatibleType { kind: Kind::Atom, .. })
        ));
    }

    #[test]
    fn unknown_directive_is_reported_before_arguments() {
        assert_eq!(
            parse("[~q]").unwrap_err(),
            TermParserError::UnknownDirective {
                pos: 1,
                directive: 'q'
            }
        );
    }

    #[test]
    fn nesting_depth_is_bounded() {
        let deep = "[".repeat(100_000);
        assert_eq!(
            parse(&deep).unwrap_err(),
            TermParserError::TooDeep {
                pos: MAX_DEPTH,
                limit: MAX_DEPTH
            }
        );
        let mixed = "{#{a => [".repeat(100);
        assert!(matches!(
            parse(&mixed).unwrap_err(),
            TermParserError::TooDeep { limit: MAX_DEPTH, .. }
        ));

        let widest = format!("{}{}", "[".repeat(MAX_DEPTH), "]".repeat(MAX_DEPTH));
        assert!(parse(&widest).is_ok());
        let twice = format!("{widest}.\n{widest}.");
        assert_eq!(parse_all(&twice).unwrap().len(), 2);
    }

    #[test]
    fn positional_parsing() {
        let text = "{a} [b] c";
        let mut p = TermParser::new(text);
        assert_eq!(p.parse_term().unwrap(), tuple!(atom("a")));
        assert_eq!(p.position(), 3);
        assert_eq!(p.parse_term().unwrap(), list![atom("b")]);
        assert_eq!(p.position(), 7);
        let mut p = TermParser::new(text).starting_at(7);
        assert_eq!(p.parse_term().unwrap(), atom("c"));
        assert!(p.finish().is_ok());

        let args = [Term::Int(1), Term::Int(2)];
        let mut p = TermParser::new("~w ~w").with_args(&args);
        assert_eq!(p.parse_term().unwrap(), Term::Int(1));
        assert_eq!(p.args_consumed(), 1);
    }

    #[test]
    fn term_sequences() {
        let terms = parse_all("a. {b, 1}.\n% done\n[c]").unwrap();
        assert_eq!(terms, vec![atom("a"), tuple!(atom("b"), 1), list![atom("c")]]);
        assert!(parse_all("  % nothing\n").unwrap().is_empty());
        assert!(matches!(
            parse_all("a b").unwrap_err(),
            TermParserError::Unexpected { pos: 2, found: 'b', .. }
        ));
    }

    #[test]
    fn mfa() {
        let mfa = parse_mfa("io:format(\"x\", [1,2])").unwrap();
        assert_eq!(mfa.module.as_str(), "io");
        assert_eq!(mfa.function.as_str(), "format");
        assert_eq!(mfa.args_list(), list!["x", list![1, 2]]);
        assert_eq!(mfa.arity(), 2);
        assert_eq!(mfa.to_string(), "io:format(\"x\",[1,2])");

        let mfa = parse_mfa(" erlang : node ( ) . ").unwrap();
        assert_eq!(mfa.function.as_str(), "node");
        assert!(mfa.args.is_empty());

        let mfa = parse_mfa("'My.Mod':'run'(X)").unwrap();
        assert_eq!(mfa.module.as_str(), "My.Mod");
        assert_eq!(mfa.args, vec![Term::var("X")]);
    }

    #[test]
    fn mfa_with_directives() {
        let args = [atom("lists"), Term::str("reverse"), list![1, 2]];
        let mfa = parse_mfa_with("~w:~a(~w)", &args).unwrap();
        assert_eq!(mfa.module.as_str(), "lists");
        assert_eq!(mfa.function.as_str(), "reverse");
        assert_eq!(mfa.args, vec![list![1, 2]]);

        assert!(matches!(
            parse_mfa_with("~w:f()", &[Term::Int(1)]).unwrap_err(),
            TermParserError::InvalidArgument { pos: 0, .. }
        ));
        assert!(parse_mfa("io:format").is_err());
        assert!(parse_mfa("io(1)").is_err());
    }

    #[test]
    fn render_round_trip() {
        let terms = [
            atom("ok"),
            atom("Quoted Atom"),
            atom("true"),
            Term::Bool(false),
            Term::Byte(0),
            Term::Byte(b'\''),
            Term::Int(i64::MIN),
            Term::Float(1e300),
            Term::Float(-0.1),
            Term::str("tab\there \"q\" \u{1}"),
            Term::binary(vec![0, 1, 2]),
            Term::binary(*b"text"),
            tuple!(atom("a"), list![1, 2; Term::var("T")], Term::typed_var("X", Kind::Pid)),
            Term::map([(atom("k"), Term::str("v"))]),
        ];
        for t in terms {
            let text = t.to_string();
            assert_eq!(parse(&text).unwrap(), t, "text={text}");
        }
    }

    fn arb_term() -> impl Strategy<Value = Term> {
        let leaf = prop_oneof![
            any::<i64>().prop_map(Term::Int),
            any::<f64>()
                .prop_filter("finite", |f| f.is_finite())
                .prop_map(Term::Float),
            any::<u8>().prop_map(Term::Byte),
            any::<bool>().prop_map(Term::Bool),
            "[a-zA-Z0-9_ '@.]{0,8}".prop_map(Term::atom),
            "\\PC{0,8}".prop_map(Term::str),
            "[A-Z][a-z0-9_]{0,4}".prop_map(Term::var),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                proptest::collection::vec(inner.clone(), 0..4).prop_map(Term::tuple),
                proptest::collection::vec(inner, 0..4).prop_map(Term::list),
            ]
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]

        #[test]
        fn parse_inverts_display(t in arb_term()) {
            let text = t.to_string();
            prop_assert_eq!(parse(&text).unwrap(), t);
        }

        #[test]
        fn parse_never_panics(s in "\\PC{0,16}") {
            let _ = parse(&s);
        }
    }
}

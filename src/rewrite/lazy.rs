//! Recognizing lazy component declarations
//!
//! Each line is fed through a small tokenizer that accepts exactly the
//! declaration shapes below, with free whitespace between tokens:
//!
//! ```text
//! [export] const L = [NS.]lazy(() => import('P').then(m => ({ default: m.M })));
//! [export] const L = [NS.]lazy(() => import('P'));
//! ```
//!
//! A line that binds a name to a loader call but then strays from the shape
//! is reported as a near miss instead of being silently skipped.

use serde::Serialize;

use super::config::RewriteConfig;
use crate::string_utils::{is_identifier, strip_any_prefix_checked};

const DECLARATION_KEYWORDS: &[&str] = &["const ", "let ", "var ", "const\t", "let\t", "var\t"];

/// A lazily loaded import found in the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LazyImport {
    /// 1-based line number of the declaration
    pub line: usize,
    /// Local name the component is bound to
    pub binding: String,
    /// Module path passed to the dynamic import
    pub module: String,
    /// Exported member picked in `.then`, `None` for the module default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<String>,
    #[serde(skip)]
    pub quote: char,
    #[serde(skip)]
    pub exported: bool,
    #[serde(skip)]
    pub indent: String,
    /// Trailing `// ...` comment, carried onto the import
    #[serde(skip)]
    pub comment: Option<String>,
}

impl LazyImport {
    /// The plain import statement(s) replacing this declaration.
    pub fn to_eager(&self) -> EagerImport {
        let quote = if self.quote == '`' { '\'' } else { self.quote };
        let clause = match &self.export {
            Some(member) if *member == self.binding => format!("{{ {} }}", member),
            Some(member) => format!("{{ {} as {} }}", member, self.binding),
            None => self.binding.clone(),
        };
        let mut statement = format!(
            "{}import {} from {}{}{};",
            self.indent, clause, quote, self.module, quote
        );
        if let Some(comment) = &self.comment {
            statement.push(' ');
            statement.push_str(comment);
        }
        let re_export = self
            .exported
            .then(|| format!("{}export {{ {} }};", self.indent, self.binding));

        EagerImport {
            statement,
            re_export,
        }
    }
}

/// Direct import derived one-to-one from a [`LazyImport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EagerImport {
    pub statement: String,
    /// `export { L };` kept for declarations that were exported
    pub re_export: Option<String>,
}

impl EagerImport {
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![self.statement.clone()];
        lines.extend(self.re_export.clone());
        lines
    }
}

/// Outcome of matching one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineMatch {
    NotLazy,
    Lazy(LazyImport),
    /// Starts like a lazy declaration but does not fit the shape
    NearMiss(String),
}

/// Match one line against the lazy declaration shape.
pub fn match_declaration(line: &str, line_number: usize, config: &RewriteConfig) -> LineMatch {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];

    let (exported, body) = match body.strip_prefix("export") {
        Some(rest) if rest.starts_with(char::is_whitespace) => (true, rest.trim_start()),
        _ => (false, body),
    };
    let Some(rest) = strip_any_prefix_checked(body, DECLARATION_KEYWORDS) else {
        return LineMatch::NotLazy;
    };

    let mut cursor = Cursor::new(line, rest);
    let Some(binding) = cursor.identifier() else {
        return LineMatch::NotLazy;
    };
    if !cursor.eat("=") || cursor.peek_is("=") || cursor.peek_is(">") {
        return LineMatch::NotLazy;
    }
    if !cursor.loader_callee(&config.loader) {
        return LineMatch::NotLazy;
    }
    if cursor.peek_is("<") {
        return LineMatch::NearMiss(format!(
            "type arguments on `{}` at column {} are not supported",
            config.loader,
            cursor.column()
        ));
    }
    if !cursor.eat("(") {
        return LineMatch::NotLazy;
    }

    // From here on the line is committed to being a lazy declaration
    match cursor.lazy_body(&config.importer) {
        Ok(body) => LineMatch::Lazy(LazyImport {
            line: line_number,
            binding: binding.to_string(),
            module: body.module.to_string(),
            export: body.export.map(str::to_string),
            quote: body.quote,
            exported,
            indent: indent.to_string(),
            comment: body.comment.map(str::to_string),
        }),
        Err(reason) => LineMatch::NearMiss(reason),
    }
}

/// The parts of a declaration after `LOADER(`.
struct LazyBody<'a> {
    module: &'a str,
    quote: char,
    export: Option<&'a str>,
    comment: Option<&'a str>,
}

/// Whitespace-skipping token reader over a single line.
struct Cursor<'a> {
    line: &'a str,
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str, rest: &'a str) -> Self {
        Self { line, rest }
    }

    fn column(&self) -> usize {
        self.line.len() - self.rest.len() + 1
    }

    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn peek_is(&mut self, token: &str) -> bool {
        self.skip_ws();
        self.rest.starts_with(token)
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_ws();
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn expect(&mut self, token: &str) -> Result<(), String> {
        if self.eat(token) {
            Ok(())
        } else {
            Err(format!("expected `{}` at column {}", token, self.column()))
        }
    }

    fn identifier(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let end = self
            .rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
            .unwrap_or(self.rest.len());
        let ident = &self.rest[..end];
        if !is_identifier(ident) {
            return None;
        }
        self.rest = &self.rest[end..];
        Some(ident)
    }

    fn expect_identifier(&mut self, what: &str) -> Result<&'a str, String> {
        let column = self.column();
        self.identifier()
            .ok_or_else(|| format!("expected {} at column {}", what, column))
    }

    fn string_literal(&mut self) -> Result<(&'a str, char), String> {
        self.skip_ws();
        let column = self.column();
        let quote = match self.rest.chars().next() {
            Some(q @ ('\'' | '"' | '`')) => q,
            _ => return Err(format!("expected module path string at column {}", column)),
        };
        let inner = &self.rest[1..];
        let end = inner
            .find(quote)
            .ok_or_else(|| format!("unterminated module path at column {}", column))?;
        let value = &inner[..end];
        if value.is_empty() || value.contains("${") || value.contains('\\') {
            return Err(format!("unsupported module path at column {}", column));
        }
        self.rest = &inner[end + 1..];
        Ok((value, quote))
    }

    /// `[NS.]LOADER`; leaves the cursor untouched on mismatch.
    fn loader_callee(&mut self, loader: &str) -> bool {
        let saved = self.rest;
        let mut callee = self.identifier();
        if callee.is_some() && self.eat(".") {
            callee = self.identifier();
        }
        if callee == Some(loader) {
            return true;
        }
        self.rest = saved;
        false
    }

    /// Everything after `LOADER(` through the end of the line.
    fn lazy_body(&mut self, importer: &str) -> Result<LazyBody<'a>, String> {
        self.expect("(")?;
        self.expect(")")?;
        self.expect("=>")?;

        let column = self.column();
        if self.identifier() != Some(importer) {
            return Err(format!("expected `{}(` at column {}", importer, column));
        }
        self.expect("(")?;
        let (module, quote) = self.string_literal()?;
        self.expect(")")?;

        let export = if self.eat(".") {
            let column = self.column();
            if self.identifier() != Some("then") {
                return Err(format!("expected `then` at column {}", column));
            }
            Some(self.then_callback()?)
        } else {
            None
        };

        self.expect(")")?;
        self.eat(";");
        self.skip_ws();
        let comment = if self.rest.is_empty() {
            None
        } else if self.rest.starts_with("//") {
            Some(self.rest.trim_end())
        } else {
            return Err(format!("unexpected text at column {}", self.column()));
        };

        Ok(LazyBody {
            module,
            quote,
            export,
            comment,
        })
    }

    /// `(m => ({ default: m.M }))`, returning `M`.
    fn then_callback(&mut self) -> Result<&'a str, String> {
        self.expect("(")?;
        let param = if self.eat("(") {
            let param = self.expect_identifier("callback parameter")?;
            self.expect(")")?;
            param
        } else {
            self.expect_identifier("callback parameter")?
        };
        self.expect("=>")?;
        self.expect("(")?;
        self.expect("{")?;
        let column = self.column();
        if self.identifier() != Some("default") {
            return Err(format!("expected `default` at column {}", column));
        }
        self.expect(":")?;
        let column = self.column();
        if self.identifier() != Some(param) {
            return Err(format!("expected `{}.` at column {}", param, column));
        }
        self.expect(".")?;
        let member = self.expect_identifier("exported member")?;
        self.eat(",");
        self.expect("}")?;
        self.expect(")")?;
        self.expect(")")?;
        Ok(member)
    }
}

//! Single-line ES import declarations
//!
//! Only `import [Default][, ]{ a, b as c } from 'module';` on one line is
//! understood. Namespace imports, side-effect imports and declarations that
//! span several lines are left to the caller as opaque text.

use regex::Regex;
use std::sync::LazyLock;

use crate::string_utils::is_identifier;

static IMPORT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^(\s*)import\s+(type\s+)?(?:([A-Za-z_$][\w$]*)\s*(,)?\s*)?(?:\{([^{}]*)\})?\s*from\s*(['"])([^'"]+)['"]\s*(;)?(\s*(?://.*)?)$"#,
    )
    .expect("IMPORT_LINE regex is invalid")
});

/// One name inside the braces of an import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    pub imported: String,
    pub local: String,
    pub type_only: bool,
}

impl Specifier {
    fn parse(text: &str) -> Option<Self> {
        let (type_only, text) = match text.strip_prefix("type ") {
            Some(rest) => (true, rest.trim()),
            None => (false, text),
        };
        let (imported, local) = match text.split_once(" as ") {
            Some((imported, local)) => (imported.trim(), local.trim()),
            None => (text, text),
        };
        if !is_identifier(imported) || !is_identifier(local) {
            return None;
        }
        Some(Self {
            imported: imported.to_string(),
            local: local.to_string(),
            type_only,
        })
    }

    fn render(&self) -> String {
        let prefix = if self.type_only { "type " } else { "" };
        if self.imported == self.local {
            format!("{}{}", prefix, self.imported)
        } else {
            format!("{}{} as {}", prefix, self.imported, self.local)
        }
    }
}

/// A parsed single-line import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportLine {
    indent: String,
    pub type_only: bool,
    pub default: Option<String>,
    pub named: Vec<Specifier>,
    pub module: String,
    quote: char,
    semicolon: bool,
    /// Whitespace and `// ...` comment after the declaration
    trailing: String,
}

impl ImportLine {
    pub fn parse(line: &str) -> Option<Self> {
        let caps = IMPORT_LINE.captures(line)?;
        let default = caps.get(3).map(|m| m.as_str().to_string());
        let has_comma = caps.get(4).is_some();
        let braces = caps.get(5);

        // `import X, from 'y'` or `import from 'y'` are not declarations we can edit
        if default.is_none() && braces.is_none() {
            return None;
        }
        if has_comma && (default.is_none() || braces.is_none()) {
            return None;
        }
        if default.is_some() && braces.is_some() && !has_comma {
            return None;
        }

        let named = match braces {
            Some(inner) => inner
                .as_str()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(Specifier::parse)
                .collect::<Option<Vec<_>>>()?,
            None => Vec::new(),
        };

        Some(Self {
            indent: caps[1].to_string(),
            type_only: caps.get(2).is_some(),
            default,
            named,
            module: caps[7].to_string(),
            quote: caps[6].chars().next().unwrap_or('\''),
            semicolon: caps.get(8).is_some(),
            trailing: caps[9].to_string(),
        })
    }

    /// Number of local names this declaration introduces.
    pub fn binding_count(&self) -> usize {
        self.named.len() + usize::from(self.default.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.binding_count() == 0
    }

    /// True if this declaration binds `local` to `imported` of `module`.
    ///
    /// `imported` is `None` for the module default export. Type-only imports
    /// never match.
    pub fn binds(&self, local: &str, imported: Option<&str>, module: &str) -> bool {
        if self.type_only || self.module != module {
            return false;
        }
        match imported {
            None => self.default.as_deref() == Some(local),
            Some(imported) => self
                .named
                .iter()
                .any(|s| !s.type_only && s.local == local && s.imported == imported),
        }
    }

    /// True if `name` is imported under its own name.
    pub fn imports_name(&self, name: &str) -> bool {
        self.named
            .iter()
            .any(|s| s.imported == name && s.local == name)
    }

    /// Remove the binding of `local`. Returns false if it was not present.
    pub fn remove_local(&mut self, local: &str) -> bool {
        if self.default.as_deref() == Some(local) {
            self.default = None;
            return true;
        }
        let before = self.named.len();
        self.named.retain(|s| s.local != local);
        self.named.len() != before
    }

    pub fn render(&self) -> String {
        let mut clause = Vec::new();
        if let Some(default) = &self.default {
            clause.push(default.clone());
        }
        if !self.named.is_empty() {
            let names: Vec<String> = self.named.iter().map(Specifier::render).collect();
            clause.push(format!("{{ {} }}", names.join(", ")));
        }
        format!(
            "{}import {}{} from {}{}{}{}{}",
            self.indent,
            if self.type_only { "type " } else { "" },
            clause.join(", "),
            self.quote,
            self.module,
            self.quote,
            if self.semicolon { ";" } else { "" },
            self.trailing
        )
    }
}

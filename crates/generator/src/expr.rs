//! Expression tree and renderer
//!
//! Generators never concatenate code strings that reference other symbols.
//! They build [`Expr`] values, and a single [`Renderer`] turns them into
//! TypeScript text while collecting the imports the text needs.

use crate::naming::{import_alias, property_key, quote};
use std::collections::{BTreeMap, BTreeSet};

/// A TypeScript expression or declaration fragment
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Verbatim code; continuation lines are re-indented on render
    Raw(String),
    /// String literal, JSON-quoted on render
    Str(String),
    /// Reference to a symbol declared in the same file
    Symbol(String),
    /// Reference to a symbol imported from another module
    Import { name: String, module: String },
    /// `callee(args...)`
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// `object.property`
    Member { object: Box<Expr>, property: String },
    /// Object literal, one property per line
    Object(Vec<Property>),
    /// Array literal on one line
    Array(Vec<Expr>),
    /// `() => body`
    Arrow(Box<Expr>),
    /// `/* comment */ inner`
    Commented { comment: String, inner: Box<Expr> },
    /// Parts rendered back to back
    Seq(Vec<Expr>),
}

/// One property of an object literal
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Expr,
    /// Comment lines placed above the property (doc blocks, markers)
    pub leading: Vec<String>,
}

impl Expr {
    pub fn raw(text: impl Into<String>) -> Self {
        Expr::Raw(text.into())
    }

    pub fn import(name: impl Into<String>, module: impl Into<String>) -> Self {
        Expr::Import {
            name: name.into(),
            module: module.into(),
        }
    }

    /// `self.method(args...)`
    pub fn method(self, method: &str, args: Vec<Expr>) -> Self {
        Expr::Call {
            callee: Box::new(Expr::Member {
                object: Box::new(self),
                property: method.to_string(),
            }),
            args,
        }
    }

    /// `export const name = value;`, preceded by comment lines
    pub fn export_const(leading: &[String], name: &str, value: Expr) -> Self {
        let mut parts = leading_parts(leading);
        parts.push(Expr::Raw(format!("export const {} = ", name)));
        parts.push(value);
        parts.push(Expr::raw(";"));
        Expr::Seq(parts)
    }
}

/// Comment lines followed by newlines, ready to prefix a declaration
pub fn leading_parts(leading: &[String]) -> Vec<Expr> {
    leading
        .iter()
        .map(|line| Expr::Raw(format!("{}\n", line)))
        .collect()
}

/// Renders expressions and accumulates the imports they reference
///
/// An imported name that clashes with a local declaration or with an
/// earlier import from another module is bound under an alias.
#[derive(Debug, Default)]
pub struct Renderer {
    /// module -> imported name -> local binding
    imports: BTreeMap<String, BTreeMap<String, String>>,
    /// Bindings already in use in the file
    taken: BTreeSet<String>,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer for a file that declares `locals` itself
    pub fn with_locals<I, S>(locals: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            imports: BTreeMap::new(),
            taken: locals.into_iter().map(Into::into).collect(),
        }
    }

    /// Render a top-level fragment
    pub fn render(&mut self, expr: &Expr) -> String {
        let mut out = String::new();
        self.write(expr, 0, &mut out);
        out
    }

    /// `import { a, b as c } from "module";` lines, sorted by module then name
    pub fn import_block(&self) -> String {
        self.imports
            .iter()
            .map(|(module, names)| {
                let names: Vec<String> = names
                    .iter()
                    .map(|(name, binding)| {
                        if name == binding {
                            name.clone()
                        } else {
                            format!("{} as {}", name, binding)
                        }
                    })
                    .collect();
                format!("import {{ {} }} from {};", names.join(", "), quote(module))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn imports(&self) -> &BTreeMap<String, BTreeMap<String, String>> {
        &self.imports
    }

    /// Local binding of `name` from `module`, recording the import
    fn bind_import(&mut self, name: &str, module: &str) -> String {
        if let Some(binding) = self.imports.get(module).and_then(|names| names.get(name)) {
            return binding.clone();
        }

        let binding = if self.taken.contains(name) {
            let alias = import_alias(module, name);
            let mut candidate = alias.clone();
            let mut suffix = 2;
            while self.taken.contains(&candidate) {
                candidate = format!("{}{}", alias, suffix);
                suffix += 1;
            }
            candidate
        } else {
            name.to_string()
        };

        self.taken.insert(binding.clone());
        self.imports
            .entry(module.to_string())
            .or_default()
            .insert(name.to_string(), binding.clone());
        binding
    }

    fn write(&mut self, expr: &Expr, indent: usize, out: &mut String) {
        match expr {
            Expr::Raw(text) => write_reindented(text, indent, out),
            Expr::Str(value) => out.push_str(&quote(value)),
            Expr::Symbol(name) => out.push_str(name),
            Expr::Import { name, module } => {
                let binding = self.bind_import(name, module);
                out.push_str(&binding);
            }
            Expr::Call { callee, args } => {
                self.write(callee, indent, out);
                out.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write(arg, indent, out);
                }
                out.push(')');
            }
            Expr::Member { object, property } => {
                self.write(object, indent, out);
                out.push('.');
                out.push_str(property);
            }
            Expr::Object(properties) => {
                if properties.is_empty() {
                    out.push_str("{}");
                    return;
                }
                let pad = " ".repeat(indent + 2);
                out.push_str("{\n");
                for property in properties {
                    for line in &property.leading {
                        write_block_line(line, &pad, out);
                    }
                    out.push_str(&pad);
                    out.push_str(&property_key(&property.key));
                    out.push_str(": ");
                    self.write(&property.value, indent + 2, out);
                    out.push_str(",\n");
                }
                out.push_str(&" ".repeat(indent));
                out.push('}');
            }
            Expr::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write(item, indent, out);
                }
                out.push(']');
            }
            Expr::Arrow(body) => {
                out.push_str("() => ");
                self.write(body, indent, out);
            }
            Expr::Commented { comment, inner } => {
                out.push_str("/* ");
                out.push_str(&comment.replace("*/", "*\\/"));
                out.push_str(" */ ");
                self.write(inner, indent, out);
            }
            Expr::Seq(parts) => {
                for part in parts {
                    self.write(part, indent, out);
                }
            }
        }
    }
}

/// Append `text`, indenting every non-empty line after the first
fn write_reindented(text: &str, indent: usize, out: &mut String) {
    let pad = " ".repeat(indent);
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            out.push('\n');
            if !line.is_empty() {
                out.push_str(&pad);
            }
        }
        out.push_str(line);
    }
}

/// Append a (possibly multi-line) comment block, each line padded
fn write_block_line(block: &str, pad: &str, out: &mut String) {
    for line in block.split('\n') {
        out.push_str(pad);
        out.push_str(line);
        out.push('\n');
    }
}

//! Named-parameter statement binding.
//!
//! Templates use `:name` placeholders. Binding resolves each placeholder
//! against a [`Params`] set and rewrites it into the positional form of the
//! active [`Dialect`], producing the argument list in placeholder order.

use super::{Dialect, Params, Value};
use keel_core::{KeelError, KeelResult};
use sqlx::any::AnyArguments;
use sqlx::Arguments;

/// Converts named-parameter templates into driver-ready statements.
#[derive(Debug, Clone, Copy)]
pub struct Binder {
    dialect: Dialect,
}

impl Binder {
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Binds `template` against `params`.
    ///
    /// A name used more than once is bound once per occurrence. Every name in
    /// the template must be present in `params`; extra entries are ignored.
    /// Placeholders inside quoted literals and `--` or `/* */` comments are
    /// left alone.
    pub fn bind_named(&self, template: &str, params: &Params) -> KeelResult<(String, AnyArguments<'static>)> {
        let (sql, names) = self.rewrite(template);

        let mut args = AnyArguments::default();
        for name in &names {
            let value = params
                .get(name)
                .ok_or_else(|| KeelError::binding(format!("missing named parameter :{}", name)))?;
            let added = match value {
                Value::Int(v) => args.add(*v),
                Value::Text(v) => args.add(v.clone()),
                Value::Bytes(v) => args.add(v.clone()),
            };
            added.map_err(|e| KeelError::binding(format!("cannot encode :{}: {}", name, e)))?;
        }

        Ok((sql, args))
    }

    /// Rewrites placeholders, returning the statement and the parameter names
    /// in the order their positional arguments must be supplied.
    pub(crate) fn rewrite(&self, template: &str) -> (String, Vec<String>) {
        let mut sql = String::with_capacity(template.len());
        let mut names = Vec::new();
        let mut chars = template.chars().peekable();
        let mut quote: Option<char> = None;

        while let Some(c) = chars.next() {
            if let Some(q) = quote {
                sql.push(c);
                if c == q {
                    quote = None;
                }
                continue;
            }

            match c {
                '\'' | '"' | '`' => {
                    quote = Some(c);
                    sql.push(c);
                }
                '-' if chars.peek() == Some(&'-') => {
                    sql.push(c);
                    for n in chars.by_ref() {
                        sql.push(n);
                        if n == '\n' {
                            break;
                        }
                    }
                }
                '/' if chars.peek() == Some(&'*') => {
                    sql.push(c);
                    sql.push('*');
                    chars.next();
                    let mut prev = '\0';
                    for n in chars.by_ref() {
                        sql.push(n);
                        if prev == '*' && n == '/' {
                            break;
                        }
                        prev = n;
                    }
                }
                ':' if chars.peek() == Some(&':') => {
                    // postgres cast
                    sql.push_str("::");
                    chars.next();
                }
                ':' if chars.peek().is_some_and(|n| n.is_ascii_alphabetic() || *n == '_') => {
                    let mut name = String::new();
                    while let Some(&n) = chars.peek() {
                        if n.is_ascii_alphanumeric() || n == '_' {
                            name.push(n);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    names.push(name);
                    sql.push_str(&self.dialect.placeholder(names.len()));
                }
                _ => sql.push(c),
            }
        }

        (sql, names)
    }
}

//! Append-only style registry.
//!
//! A [`StyleRegistry`] collects the CSS rules a generation run knows about
//! and renders them as one stylesheet. It is an explicit object owned by
//! the caller, scoped to one run: registration during start-up, read-only
//! rendering afterwards. Rules are immutable once appended and are never
//! deleted, merged, or de-duplicated.

use serde::Serialize;
use std::fmt;

/// A CSS property and value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// The property name, e.g. `background-color`.
    pub property: String,
    /// The property value, verbatim.
    pub value: String,
}

impl Declaration {
    /// Create a declaration from a property and value.
    #[must_use]
    pub fn new(property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// A selector plus its ordered declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// The rule's selector text, verbatim.
    pub selector: String,
    /// Declarations in registration order.
    pub declarations: Vec<Declaration>,
}

impl fmt::Display for Rule {
    /// `selector{prop:value;prop:value}` - no whitespace, no trailing `;`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.selector)?;
        f.write_str("{")?;
        for (index, declaration) in self.declarations.iter().enumerate() {
            if index > 0 {
                f.write_str(";")?;
            }
            f.write_str(&declaration.property)?;
            f.write_str(":")?;
            f.write_str(&declaration.value)?;
        }
        f.write_str("}")
    }
}

/// Name of a registry-created scoped class.
///
/// The id is `basename_<n>` where `n` is the registry size at creation, so
/// it is unique only relative to registration order within one run. There
/// is no cross-run stability contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClassId(String);

impl ClassId {
    /// The class name as a string slice, without a leading `.`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ClassId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Ordered, append-only collection of style rules for one generation run.
#[derive(Debug, Default, Serialize)]
pub struct StyleRegistry {
    rules: Vec<Rule>,
}

impl StyleRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule for the given selector, verbatim.
    pub fn register_rule(&mut self, selector: impl Into<String>, declarations: Vec<Declaration>) {
        self.rules.push(Rule {
            selector: selector.into(),
            declarations,
        });
    }

    /// Append a rule for a class, adding the leading `.` if `name` lacks it.
    pub fn register_class(&mut self, name: &str, declarations: Vec<Declaration>) {
        let selector = if name.starts_with('.') {
            name.to_owned()
        } else {
            format!(".{name}")
        };
        self.register_rule(selector, declarations);
    }

    /// Create a uniquely named class from `basename` and register it.
    ///
    /// The returned id embeds the registry size at creation time, so two
    /// sequential calls with the same basename yield different ids.
    pub fn create_scoped_class(
        &mut self,
        basename: &str,
        declarations: Vec<Declaration>,
    ) -> ClassId {
        let id = ClassId(format!("{basename}_{}", self.rules.len()));
        self.register_rule(format!(".{id}"), declarations);
        id
    }

    /// The registered rules, in registration order.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Render every rule in registration order with no inter-rule
    /// whitespace.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            out.push_str(&rule.to_string());
        }
        out
    }
}

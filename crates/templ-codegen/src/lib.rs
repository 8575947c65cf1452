//! Rust code generation from class-name mappings, plus the processing
//! pipeline that produces those mappings from CSS, CSS module, and SCSS
//! sources.
//!
//! The generated artifact is a set of string constants, one per class name,
//! so templates can reference generated class names without typos:
//!
//! ```text
//! pub mod styles {
//!     pub const Card: &str = "templ_css_0f343eb1…_card";
//! }
//! ```

/// The plugin pipeline: one plugin per supported file type.
pub mod plugin;
/// Transpilation of CSS supersets, behind a single-flight handle.
pub mod transpile;

pub use plugin::{CssPlugin, Pipeline, PipelineError, PluginInput, PluginOutput};
pub use transpile::{LazyTranspiler, SassCli, TranspilationError, Transpiler};

use std::collections::BTreeMap;

/// Convert a class name into a valid Rust constant name.
///
/// The transform is deterministic: every character outside `[A-Za-z0-9_]`
/// becomes `_`, an empty result becomes `_`, a leading digit gets a `_`
/// prepended, and only the first letter is uppercased, leaving the rest of
/// the name untouched.
#[must_use]
pub fn const_name(class_name: &str) -> String {
    let mut name: String = class_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if name.is_empty() {
        return "_".to_owned();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    uppercase_first_letter(&name)
}

/// Uppercase the first letter character of `name`, leaving everything else
/// as-is.
fn uppercase_first_letter(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut done = false;
    for c in name.chars() {
        if !done && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            done = true;
        } else {
            out.push(c);
        }
    }
    out
}

/// Emit one `pub const` declaration per mapping entry, sorted by original
/// class name.
#[must_use]
pub fn generate_constants(classes: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    for (class_name, generated) in classes {
        out.push_str("pub const ");
        out.push_str(&const_name(class_name));
        out.push_str(": &str = \"");
        out.push_str(generated);
        out.push_str("\";\n");
    }
    out
}

/// Wrap the generated constants in a named module.
///
/// Generated names keep their original casing, so the module allows
/// `non_upper_case_globals` for its constants.
#[must_use]
pub fn generate_module(module_name: &str, classes: &BTreeMap<String, String>) -> String {
    let mut out = String::new();
    out.push_str("// Generated by templcss. Do not edit.\n");
    out.push_str("#[allow(non_upper_case_globals)]\n");
    out.push_str("pub mod ");
    out.push_str(module_name);
    out.push_str(" {\n");
    for line in generate_constants(classes).lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("}\n");
    out
}

//! The CSS processing pipeline.
//!
//! Each supported file type has a plugin: plain CSS gets constants
//! generated for the class names it already has, CSS modules additionally
//! get their class names scoped, and SCSS is transpiled to CSS first and
//! then handled like plain CSS. Dispatch is by file extension, with
//! `.module.css` taking precedence over the plain `.css` suffix.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::generate_module;
use crate::transpile::{LazyTranspiler, TranspilationError};
use templ_css::{ParseError, Token, TokenKind, scope, tokenize};

/// Pipeline failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// The file's extension maps to no plugin.
    #[error("unsupported file type: {0}")]
    UnsupportedInput(String),
    /// The CSS failed to tokenize.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The external preprocessor failed.
    #[error(transparent)]
    Transpilation(#[from] TranspilationError),
}

/// Input handed to a plugin.
#[derive(Debug, Clone)]
pub struct PluginInput {
    /// The source file's name, used for extension dispatch.
    pub file_name: String,
    /// Module name for the generated code.
    pub module_name: String,
    /// The file's contents.
    pub css: String,
}

/// What a plugin produced.
#[derive(Debug, Clone)]
pub struct PluginOutput {
    /// The processed stylesheet (possibly rewritten or transpiled).
    pub css: String,
    /// Generated Rust code.
    pub code: String,
    /// Class-name mapping behind the generated code, ordered by original
    /// name.
    pub classes: BTreeMap<String, String>,
}

/// One file-type handler.
pub trait CssPlugin {
    /// Process one source file.
    ///
    /// # Errors
    ///
    /// Returns a [`PipelineError`] when the source cannot be parsed or
    /// transpiled.
    fn process(&self, input: &PluginInput) -> Result<PluginOutput, PipelineError>;
}

/// Generates constants for the class names a plain CSS file defines. The
/// stylesheet passes through unchanged.
pub struct CssCodegenPlugin;

impl CssPlugin for CssCodegenPlugin {
    fn process(&self, input: &PluginInput) -> Result<PluginOutput, PipelineError> {
        let tokens = tokenize(&input.css, false)?;
        let mut classes = BTreeMap::new();
        let mut inside_selector = false;
        for token in &tokens {
            if let Token::Css { kind, content, .. } = token {
                match kind {
                    TokenKind::LeftBrace => inside_selector = false,
                    TokenKind::Ident if inside_selector => {
                        let _ = classes.insert(content.clone(), content.clone());
                    }
                    TokenKind::Delim if content == "." => inside_selector = true,
                    _ => {}
                }
            }
        }
        let code = generate_module(&input.module_name, &classes);
        Ok(PluginOutput {
            css: input.css.clone(),
            code,
            classes,
        })
    }
}

/// Scopes a CSS module's class names with a content-derived prefix and
/// generates constants for the scoped names.
pub struct CssModulePlugin;

impl CssPlugin for CssModulePlugin {
    fn process(&self, input: &PluginInput) -> Result<PluginOutput, PipelineError> {
        let scoped = scope(&input.css)?;
        let code = generate_module(&input.module_name, &scoped.classes);
        Ok(PluginOutput {
            css: scoped.css,
            code,
            classes: scoped.classes,
        })
    }
}

/// Transpiles SCSS to CSS, then delegates to [`CssCodegenPlugin`].
pub struct ScssPlugin {
    transpiler: LazyTranspiler,
}

impl ScssPlugin {
    /// Create the plugin around a transpiler handle.
    #[must_use]
    pub fn new(transpiler: LazyTranspiler) -> Self {
        Self { transpiler }
    }
}

impl CssPlugin for ScssPlugin {
    fn process(&self, input: &PluginInput) -> Result<PluginOutput, PipelineError> {
        let css = self.transpiler.get()?.transpile(&input.css)?;
        CssCodegenPlugin.process(&PluginInput {
            file_name: input.file_name.clone(),
            module_name: input.module_name.clone(),
            css,
        })
    }
}

/// Extension-dispatched plugin pipeline.
pub struct Pipeline {
    plugins: Vec<(&'static str, Box<dyn CssPlugin>)>,
}

impl Pipeline {
    /// Build the standard pipeline around the given transpiler handle.
    #[must_use]
    pub fn new(transpiler: LazyTranspiler) -> Self {
        Self {
            plugins: vec![
                // `.module.css` must win over the generic `.css` suffix.
                (".module.css", Box::new(CssModulePlugin)),
                (".css", Box::new(CssCodegenPlugin)),
                (".scss", Box::new(ScssPlugin::new(transpiler))),
            ],
        }
    }

    /// Process one file with the plugin matching its extension.
    ///
    /// # Errors
    ///
    /// [`PipelineError::UnsupportedInput`] when no plugin matches the file
    /// name, and whatever the matched plugin fails with otherwise.
    pub fn process(&self, input: &PluginInput) -> Result<PluginOutput, PipelineError> {
        let plugin = self
            .plugins
            .iter()
            .find(|(suffix, _)| input.file_name.ends_with(suffix))
            .map(|(_, plugin)| plugin)
            .ok_or_else(|| PipelineError::UnsupportedInput(input.file_name.clone()))?;
        plugin.process(input)
    }
}

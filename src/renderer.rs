//! Template rendering functionality for srvgen, backed by MiniJinja.
//! Templates may reference any generation context field, use conditional
//! blocks keyed on the boolean toggles and iterate over the endpoint list.

use crate::error::{Error, Result};
use cruet::case::{
    camel::to_camel_case, kebab::to_kebab_case, pascal::to_pascal_case,
    screaming_snake::to_screaming_snake_case, snake::to_snake_case,
};
use minijinja::{Environment, UndefinedBehavior};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template body with the given context.
    ///
    /// # Arguments
    /// * `name` - Identifier used in error reporting, typically the source path
    /// * `source` - Template body to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(
        &self,
        name: &str,
        source: &str,
        context: &serde_json::Value,
    ) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
///
/// Undefined behavior is strict: a placeholder that does not name a
/// generation context field fails the render instead of expanding to
/// nothing. Case-conversion filters are available for deriving
/// identifiers from the service and endpoint names.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_filter("camel_case", to_camel_case);
        env.add_filter("kebab_case", to_kebab_case);
        env.add_filter("pascal_case", to_pascal_case);
        env.add_filter("screaming_snake_case", to_screaming_snake_case);
        env.add_filter("snake_case", to_snake_case);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template body using MiniJinja.
    ///
    /// # Errors
    /// * `Error::TemplateSyntax` naming the offending template if the body
    ///   is malformed or references an unrecognized placeholder
    fn render(
        &self,
        name: &str,
        source: &str,
        context: &serde_json::Value,
    ) -> Result<String> {
        let syntax_error = |source: minijinja::Error| Error::TemplateSyntax {
            template: name.to_string(),
            source,
        };

        let mut env = self.env.clone();
        env.add_template(name, source).map_err(syntax_error)?;

        let tmpl = env.get_template(name).map_err(syntax_error)?;

        tmpl.render(context).map_err(syntax_error)
    }
}

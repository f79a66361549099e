//! Source templates for new test classes

use tracing::trace;

use crate::domain::{ClassRef, PackagePath};
use crate::infrastructure::traits::ClassTemplate;

/// Template used when the configuration does not provide one.
pub const DEFAULT_TEMPLATE: &str = "${PACKAGE_DECL}public class ${NAME} {\n}\n";

/// Placeholder template expanded with `shellexpand`.
///
/// Placeholders: `${PACKAGE}`, `${PACKAGE_DECL}`, `${NAME}`, `${PRODUCTION}`,
/// `${PRODUCTION_QUALIFIED}`. Anything else is left verbatim.
#[derive(Debug, Clone)]
pub struct SourceTemplate {
    template: String,
}

impl SourceTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl Default for SourceTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl ClassTemplate for SourceTemplate {
    fn render(&self, package: &PackagePath, class_name: &str, production: &ClassRef) -> String {
        trace!("render: {}.{}", package, class_name);
        let package_name = package.to_string();
        let package_decl = if package.is_default() {
            String::new()
        } else {
            format!("package {};\n\n", package_name)
        };
        let production_qualified = production.qualified_name().to_string();

        shellexpand::env_with_context_no_errors(&self.template, |var| match var {
            "PACKAGE" => Some(package_name.as_str()),
            "PACKAGE_DECL" => Some(package_decl.as_str()),
            "NAME" => Some(class_name),
            "PRODUCTION" => Some(production.simple_name()),
            "PRODUCTION_QUALIFIED" => Some(production_qualified.as_str()),
            _ => None,
        })
        .into_owned()
    }
}

//! String token substitution

use crate::{CapabilityRegistry, Category, capabilities};

/// `render`
pub type RenderFn = fn(&str, &str, &str) -> String;

/// Replace every literal `{{placeholder}}` with `value`; the inserted text
/// is not scanned again
pub(crate) fn render(template: &str, placeholder: &str, value: &str) -> String {
    template.replace(&format!("{{{{{placeholder}}}}}"), value)
}

/// `render` on strings
pub trait StrExt {
    fn render(&self, placeholder: &str, value: &str) -> String {
        self.render_with(capabilities(), placeholder, value)
    }

    fn render_with(&self, registry: &CapabilityRegistry, placeholder: &str, value: &str) -> String;
}

impl StrExt for str {
    fn render_with(&self, registry: &CapabilityRegistry, placeholder: &str, value: &str) -> String {
        let render_fn = registry
            .resolve::<RenderFn>(Category::String, "render")
            .copied()
            .unwrap_or(render);
        render_fn(self, placeholder, value)
    }
}

//! Template engine wrapper
//!
//! Owns the Tera instance for one generator run: the main contract template,
//! any partial templates (registered under their file stems), and the two
//! type-translation helpers. The helpers are plain values closed over the
//! backend chosen at startup and handed to this constructor, so there is no
//! ambient registry and no order-of-registration hazard.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};
use tera::{Context, Tera, Value};

use abigen_core::{translate, Backend, Param, ParamKind, RenderingContext};

/// Registered name of the main contract template
const CONTRACT_TEMPLATE: &str = "contract";

/// A type-translation helper exposed to templates
///
/// Templates call these by name with a `type` string argument and, for
/// tuple descriptors, a `components` argument:
/// `{{ parameterType(type=input.type, components=input.components) }}`.
struct TypeHelper {
    kind: ParamKind,
    backend: Backend,
}

impl tera::Function for TypeHelper {
    fn call(&self, args: &HashMap<String, Value>) -> tera::Result<Value> {
        let descriptor = args
            .get("type")
            .and_then(Value::as_str)
            .ok_or_else(|| tera::Error::msg("type helper requires a `type` string argument"))?;

        let components = match args.get("components") {
            Some(value) if !value.is_null() => {
                let parsed: Vec<Param> = serde_json::from_value(value.clone()).map_err(|e| {
                    tera::Error::msg(format!("invalid `components` argument: {}", e))
                })?;
                Some(parsed)
            }
            _ => None,
        };

        let host_type = translate(self.kind, self.backend, descriptor, components.as_deref())
            .map_err(|e| tera::Error::msg(e.to_string()))?;
        Ok(Value::String(host_type))
    }
}

/// Compiled template set for one generator run
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Load the main template and partials, and register the type helpers
    ///
    /// Each partial is registered under its file stem, so a template can
    /// pull it in with `{% include "method" %}`.
    pub fn new(template_file: &Path, partial_files: &[PathBuf], backend: Backend) -> Result<Self> {
        let mut tera = Tera::default();
        // Generated source is not HTML
        tera.autoescape_on(Vec::new());

        let main = fs::read_to_string(template_file)
            .with_context(|| format!("failed to read template {}", template_file.display()))?;
        tera.add_raw_template(CONTRACT_TEMPLATE, &main)
            .with_context(|| format!("invalid template {}", template_file.display()))?;

        for path in partial_files {
            let name = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .ok_or_else(|| anyhow!("cannot derive partial name from {}", path.display()))?;
            let content = fs::read_to_string(path)
                .with_context(|| format!("failed to read partial {}", path.display()))?;
            tera.add_raw_template(name, &content)
                .with_context(|| format!("invalid partial {}", path.display()))?;
        }

        tera.register_function(
            "parameterType",
            TypeHelper {
                kind: ParamKind::Input,
                backend,
            },
        );
        tera.register_function(
            "returnType",
            TypeHelper {
                kind: ParamKind::Output,
                backend,
            },
        );

        Ok(TemplateEngine { tera })
    }

    /// Render one contract's bindings
    pub fn render(&self, context: &RenderingContext) -> Result<String> {
        let values = Context::from_serialize(context)
            .with_context(|| format!("context for {} did not serialize", context.contract_name))?;
        self.tera
            .render(CONTRACT_TEMPLATE, &values)
            .with_context(|| format!("failed to render {}", context.contract_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    use abigen_core::Contract;

    fn engine_for(template: &str, backend: Backend) -> TemplateEngine {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(template.as_bytes()).unwrap();
        TemplateEngine::new(file.path(), &[], backend).unwrap()
    }

    fn token_context() -> RenderingContext {
        let document = json!([
            {
                "type": "function",
                "name": "balanceOf",
                "inputs": [{"name": "owner", "type": "address"}],
                "outputs": [{"name": "", "type": "uint32"}]
            }
        ]);
        Contract::from_document("Token", &document)
            .unwrap()
            .context()
            .unwrap()
    }

    #[test]
    fn test_renders_context_fields() {
        let engine = engine_for("export class {{ contractName }}Contract {}", Backend::Ethers);
        let rendered = engine.render(&token_context()).unwrap();
        assert_eq!(rendered, "export class TokenContract {}");
    }

    #[test]
    fn test_type_helpers_respect_direction_and_backend() {
        let template = "{% for m in methods %}\
                        {{ parameterType(type=m.inputs.0.type, components=m.inputs.0.components) }}\
                        /\
                        {{ returnType(type=m.outputs.0.type, components=m.outputs.0.components) }}\
                        {% endfor %}";

        let ethers = engine_for(template, Backend::Ethers);
        assert_eq!(ethers.render(&token_context()).unwrap(), "string/number");

        let web3 = engine_for(template, Backend::Web3);
        assert_eq!(web3.render(&token_context()).unwrap(), "string/BigNumber");
    }

    #[test]
    fn test_unknown_type_fails_rendering() {
        let document = json!([
            {
                "type": "function",
                "name": "broken",
                "inputs": [{"name": "x", "type": "wat"}],
                "outputs": []
            }
        ]);
        let context = Contract::from_document("Broken", &document)
            .unwrap()
            .context()
            .unwrap();

        let engine = engine_for(
            "{{ parameterType(type=methods.0.inputs.0.type) }}",
            Backend::Ethers,
        );
        let err = engine.render(&context).unwrap_err();
        assert!(format!("{:#}", err).contains("wat"));
    }

    #[test]
    fn test_partials_are_registered_by_stem() {
        let dir = tempfile::tempdir().unwrap();
        let main_path = dir.path().join("contract.tera");
        let partial_path = dir.path().join("header.tera");
        fs::write(&main_path, "{% include \"header\" %}body").unwrap();
        fs::write(&partial_path, "// {{ contractName }}\n").unwrap();

        let engine =
            TemplateEngine::new(&main_path, &[partial_path], Backend::Ethers).unwrap();
        let rendered = engine.render(&token_context()).unwrap();
        assert_eq!(rendered, "// Token\nbody");
    }

    #[test]
    fn test_embedded_abi_is_not_escaped() {
        let engine = engine_for("const abi = {{ abi }};", Backend::Ethers);
        let rendered = engine.render(&token_context()).unwrap();
        assert!(rendered.contains(r#""name":"balanceOf""#));
        assert!(!rendered.contains("&quot;"));
    }
}

//! Template loading and file rendering

use smithy_zod_gen_common::{GeneratorError, Result};
use tera::{Context, Tera};

const FILE_TEMPLATE: &str = "file.ts";

/// Load all templates
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.add_raw_template(FILE_TEMPLATE, include_str!("../templates/file.ts.tera"))
        .map_err(|e| {
            GeneratorError::Template(format!("Failed to load {} template: {}", FILE_TEMPLATE, e))
        })?;

    Ok(tera)
}

/// Render one generated file: header, import block, then the body
pub fn render_file(tera: &Tera, header: &str, imports: &str, body: &str) -> Result<String> {
    let mut context = Context::new();
    context.insert("header", header);
    context.insert("imports", imports);
    context.insert("body", body);

    let rendered = tera.render(FILE_TEMPLATE, &context).map_err(|e| {
        GeneratorError::Template(format!("Failed to render {}: {:?}", FILE_TEMPLATE, e))
    })?;

    Ok(format!("{}\n", rendered.trim_end()))
}

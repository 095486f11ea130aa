//! Template loading and management

use rest_client_generator_common::{GeneratorError, Result};
use tera::Tera;

/// Load all client templates.
pub fn load_templates() -> Result<Tera> {
    let mut tera = Tera::default();

    tera.add_raw_template(
        "end_points.rs",
        include_str!("../templates/end_points.rs.tera"),
    )
    .map_err(|e| {
        GeneratorError::Generation(format!("Failed to load end_points.rs template: {}", e))
    })?;

    tera.add_raw_template(
        "implements.rs",
        include_str!("../templates/implements.rs.tera"),
    )
    .map_err(|e| {
        GeneratorError::Generation(format!("Failed to load implements.rs template: {}", e))
    })?;

    tera.add_raw_template("client.rs", include_str!("../templates/client.rs.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load client.rs template: {}", e))
        })?;

    tera.add_raw_template("lib.rs", include_str!("../templates/lib.rs.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load lib.rs template: {}", e))
        })?;

    tera.add_raw_template("Cargo.toml", include_str!("../templates/Cargo.toml.tera"))
        .map_err(|e| {
            GeneratorError::Generation(format!("Failed to load Cargo.toml template: {}", e))
        })?;

    Ok(tera)
}

//! Code generation for rest-client-generator
//!
//! This crate is the rendering backend: it consumes the abstract client
//! model and emits a complete typed-client crate (endpoint enum, response
//! structs, request-dispatch functions, the reqwest client, Cargo.toml).
//! It never touches the resolution logic, so other target-language
//! backends can consume the same model.

mod context;
pub mod postprocess;
mod templates;

use rest_client_generator_common::{ClientModel, GeneratorError, Result};
use std::fs;
use std::path::Path;
use tera::Tera;

/// Typed-client generator.
///
/// Renders the client model into a crate directory:
/// - Cargo.toml
/// - src/lib.rs (module declarations and the transport error enum)
/// - src/client.rs (the reqwest-backed client)
/// - src/end_points.rs (method/endpoint enums, response structs, unions)
/// - src/implements.rs (one dispatch function per endpoint with a response)
pub struct ClientGenerator {
    model: ClientModel,
    crate_name: String,
    tera: Tera,
}

impl ClientGenerator {
    /// Create a new generator from a client model.
    pub fn new(model: ClientModel, crate_name: &str) -> Result<Self> {
        let tera = templates::load_templates()?;
        Ok(Self {
            model,
            crate_name: crate_name.to_string(),
            tera,
        })
    }

    /// Generate all client artifacts to a directory.
    pub fn generate_to_directory(&self, output_dir: &Path) -> Result<()> {
        fs::create_dir_all(output_dir).map_err(|e| {
            GeneratorError::Generation(format!("Failed to create output directory: {}", e))
        })?;

        let src_dir = output_dir.join("src");
        fs::create_dir_all(&src_dir).map_err(|e| {
            GeneratorError::Generation(format!("Failed to create src directory: {}", e))
        })?;

        self.generate_cargo_toml(output_dir)?;
        self.generate_lib_rs(&src_dir)?;
        self.generate_client_rs(&src_dir)?;
        self.generate_end_points(&src_dir)?;
        self.generate_implements(&src_dir)?;

        Ok(())
    }

    /// Generate Cargo.toml for the emitted crate.
    fn generate_cargo_toml(&self, output_dir: &Path) -> Result<()> {
        let context = self.create_context();
        let rendered = self
            .tera
            .render("Cargo.toml", &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {}", e)))?;

        let output_path = output_dir.join("Cargo.toml");
        fs::write(output_path, rendered).map_err(|e| {
            GeneratorError::Generation(format!("Failed to write Cargo.toml: {}", e))
        })?;

        Ok(())
    }

    /// Generate lib.rs.
    fn generate_lib_rs(&self, src_dir: &Path) -> Result<()> {
        let context = self.create_context();
        let rendered = self
            .tera
            .render("lib.rs", &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {}", e)))?;

        let output_path = src_dir.join("lib.rs");
        fs::write(output_path, rendered)
            .map_err(|e| GeneratorError::Generation(format!("Failed to write lib.rs: {}", e)))?;

        Ok(())
    }

    /// Generate client.rs.
    fn generate_client_rs(&self, src_dir: &Path) -> Result<()> {
        let context = self.create_context();
        let rendered = self
            .tera
            .render("client.rs", &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {}", e)))?;

        let output_path = src_dir.join("client.rs");
        fs::write(output_path, rendered)
            .map_err(|e| GeneratorError::Generation(format!("Failed to write client.rs: {}", e)))?;

        Ok(())
    }

    /// Generate end_points.rs.
    fn generate_end_points(&self, src_dir: &Path) -> Result<()> {
        let context = self.create_context();
        let rendered = self
            .tera
            .render("end_points.rs", &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {}", e)))?;

        let output_path = src_dir.join("end_points.rs");
        fs::write(output_path, rendered).map_err(|e| {
            GeneratorError::Generation(format!("Failed to write end_points.rs: {}", e))
        })?;

        Ok(())
    }

    /// Generate implements.rs.
    fn generate_implements(&self, src_dir: &Path) -> Result<()> {
        let context = self.create_context();
        let rendered = self
            .tera
            .render("implements.rs", &context)
            .map_err(|e| GeneratorError::Generation(format!("Template error: {}", e)))?;

        let output_path = src_dir.join("implements.rs");
        fs::write(output_path, rendered).map_err(|e| {
            GeneratorError::Generation(format!("Failed to write implements.rs: {}", e))
        })?;

        Ok(())
    }

    fn create_context(&self) -> tera::Context {
        context::create_context(&self.model, &self.crate_name)
    }
}

/// Generate client artifacts (convenience function).
pub fn generate_client(model: ClientModel, crate_name: &str, output_path: &str) -> Result<()> {
    let generator = ClientGenerator::new(model, crate_name)?;
    generator.generate_to_directory(Path::new(output_path))
}

//! Dry run: derive every configured item against a template catalog file,
//! report the results and tear everything down again.
use std::path::PathBuf;

use anyhow::{Context, Result};
use bakery_content::{SettingsLoader, TemplateLoader, TemplateWorld};
use bakery_core::BakeryError;
use bakery_host::host::SETTINGS_FILE;
use bakery_host::{HostConfig, ModHost, logging};
use tracing::{error, info};

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = HostConfig::from_env();
    let _log = logging::init(&config.mod_dir.join("logs"))?;

    let world = load_world(&config)?;
    let mut host = ModHost::new(&config.mod_dir, world)?;
    if let Some(language) = config.language {
        host = host.with_language(language);
    }

    let report = host.setup()?;
    for generated in &report.generated {
        info!(target: "bakery::host", file = %generated.display(), "wrote sample config");
    }
    for created in &report.batch.succeeded {
        info!(
            target: "bakery::host",
            original_id = created.original_id,
            new_id = created.new_id,
            blocks = created.applied.len(),
            recipes = created.recipes.len(),
            clean = created.is_clean(),
            "derived item"
        );
    }
    for (id, err) in &report.batch.failed {
        error!(target: "bakery::host", id, code = err.error_code(), "not derived: {err}");
    }

    let teardown = host.deactivate();
    info!(
        target: "bakery::host",
        recipes = teardown.teardown.recipes.len(),
        decomposes = teardown.teardown.decomposes.len(),
        items = teardown.unregistered.len(),
        "dry run finished"
    );
    Ok(())
}

/// Template file from the environment, else from settings, else an empty world.
fn load_world(config: &HostConfig) -> Result<TemplateWorld> {
    let path: Option<PathBuf> = match &config.templates {
        Some(path) => Some(path.clone()),
        None => SettingsLoader::load_or_default(&config.mod_dir.join(SETTINGS_FILE))?
            .templates
            .map(|name| config.mod_dir.join(name)),
    };

    match path {
        Some(path) => TemplateLoader::load(&path)
            .with_context(|| format!("Failed to load templates from {}", path.display())),
        None => {
            info!(target: "bakery::host", "no template file configured, catalog is empty");
            Ok(TemplateWorld::default())
        }
    }
}

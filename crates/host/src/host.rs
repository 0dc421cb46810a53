//! Mod lifecycle: setup, language change and deactivation.
//!
//! [`ModHost`] owns the collaborators for one mod instance and drives the
//! engine from the host's lifecycle events. It remembers which items it
//! registered so deactivation can withdraw them along with every recipe and
//! decompose formula the run published.

use std::path::{Path, PathBuf};

use anyhow::Result;
use bakery_content::{
    ConfigLoader, Language, LocalizationSink, MemoryLocalization, ModSettings, SettingsLoader,
    TemplateWorld, apply_language, write_default_configs,
};
use bakery_core::{
    Augmenter, BakeryError, BatchReport, EntityConfig, Env, ErrorSeverity, TeardownReport,
    TemplateCatalog,
};
use tracing::{info, warn};

pub const SETTINGS_FILE: &str = "settings.toml";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("mod is already active")]
    AlreadyActive,
}

impl BakeryError for HostError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Registration
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyActive => "HOST_ALREADY_ACTIVE",
        }
    }
}

/// Summary of [`ModHost::setup`].
#[derive(Debug, Default)]
pub struct SetupReport {
    /// Sample configs written because none existed.
    pub generated: Vec<PathBuf>,
    /// Config files skipped at intake.
    pub skipped: usize,
    pub batch: BatchReport,
    /// Localization overrides set for the current language.
    pub localized: usize,
}

/// Summary of [`ModHost::deactivate`].
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DeactivateReport {
    pub teardown: TeardownReport,
    pub unregistered: Vec<i32>,
}

/// One mod instance bound to a mod directory.
pub struct ModHost {
    mod_dir: PathBuf,
    settings: ModSettings,
    world: TemplateWorld,
    localization: MemoryLocalization,
    language: Language,
    configs: Vec<EntityConfig>,
    registered: Vec<i32>,
    active: bool,
}

impl ModHost {
    /// Binds a host to `mod_dir`, reading `settings.toml` when present.
    pub fn new(mod_dir: impl Into<PathBuf>, world: TemplateWorld) -> Result<Self> {
        let mod_dir = mod_dir.into();
        let settings = SettingsLoader::load_or_default(&mod_dir.join(SETTINGS_FILE))?;
        let language = Language::from_host(&settings.language);

        Ok(Self {
            mod_dir,
            settings,
            world,
            localization: MemoryLocalization::new(),
            language,
            configs: Vec::new(),
            registered: Vec::new(),
            active: false,
        })
    }

    /// Overrides the language from settings.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn mod_dir(&self) -> &Path {
        &self.mod_dir
    }

    pub fn settings(&self) -> &ModSettings {
        &self.settings
    }

    pub fn configs_dir(&self) -> PathBuf {
        self.mod_dir.join(&self.settings.configs_dir)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.mod_dir.join("logs")
    }

    pub fn world(&self) -> &TemplateWorld {
        &self.world
    }

    pub fn localization(&self) -> &MemoryLocalization {
        &self.localization
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn configs(&self) -> &[EntityConfig] {
        &self.configs
    }

    /// Ids of the items this host registered and has not withdrawn.
    pub fn registered(&self) -> &[i32] {
        &self.registered
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Loads the configs, derives every item and applies the current
    /// language. Writes the sample config first when the config directory
    /// has none and settings allow it.
    pub fn setup(&mut self) -> Result<SetupReport> {
        if self.active {
            return Err(HostError::AlreadyActive.into());
        }

        let configs_dir = self.configs_dir();
        std::fs::create_dir_all(&configs_dir)?;

        let mut report = SetupReport::default();
        if !ConfigLoader::has_config_files(&configs_dir) {
            if self.settings.generate_defaults {
                report.generated = write_default_configs(&configs_dir)?;
            } else {
                warn!(target: "bakery::host", dir = %configs_dir.display(), "no configs found");
            }
        }

        let loaded = ConfigLoader::load_dir(&configs_dir)?;
        report.skipped = loaded.skipped.len();
        self.configs = loaded.configs;

        let TemplateWorld {
            catalog,
            tags,
            buffs,
            registry,
        } = &mut self.world;
        let env = Env::new(catalog, tags, buffs);
        report.batch = Augmenter::new(env, registry).augment_all(&self.configs);
        self.registered.extend(report.batch.registered_ids());

        report.localized = self.apply_current_language();
        self.active = true;

        info!(
            target: "bakery::host",
            created = report.batch.succeeded.len(),
            failed = report.batch.failed.len(),
            skipped = report.skipped,
            "mod setup complete"
        );
        Ok(report)
    }

    /// Pushes names and descriptions for `language`. Returns the number of
    /// overrides set.
    pub fn on_language_changed(&mut self, language: Language) -> usize {
        info!(target: "bakery::host", %language, "language changed");
        self.language = language;
        self.apply_current_language()
    }

    fn apply_current_language(&mut self) -> usize {
        let sink: &mut dyn LocalizationSink = &mut self.localization;
        apply_language(&self.configs, self.language, sink)
    }

    /// Removes every recipe and decompose formula this run published and
    /// withdraws the derived items. Safe to call more than once.
    pub fn deactivate(&mut self) -> DeactivateReport {
        let teardown = self.world.registry.remove_all_added();

        let mut unregistered = Vec::with_capacity(self.registered.len());
        for id in self.registered.drain(..) {
            if self.world.catalog.unregister(id).is_some() {
                unregistered.push(id);
            } else {
                warn!(target: "bakery::host", id, "derived item already gone");
            }
        }

        self.active = false;
        info!(
            target: "bakery::host",
            recipes = teardown.recipes.len(),
            decomposes = teardown.decomposes.len(),
            items = unregistered.len(),
            "mod deactivated"
        );
        DeactivateReport {
            teardown,
            unregistered,
        }
    }
}

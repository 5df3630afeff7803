use std::{any::Any, collections::HashMap};

use tracing::debug;

use crate::{Bound, ConfigError, ConstructionError, Entry, ErasedStage, PipelineConfig, bind};

/// Named entries from which chains are assembled at runtime.
///
/// ```
/// use splice_dynamic::{ErasedStage, PipelineConfig, Registry};
///
/// let mut registry = Registry::new();
/// registry
///     .register_stage(ErasedStage::unary("trim", |s: String| {
///         Ok::<_, std::fmt::Error>(s.trim().to_string())
///     }))
///     .register_stage(ErasedStage::unary("parse", |s: String| s.parse::<u16>()));
///
/// let config = PipelineConfig::from_toml_str(r#"
///     name = "read-port"
///     stages = ["trim", "parse"]
/// "#)?;
///
/// let read_port = registry.assemble(&config)?.typed::<(String,), (u16,)>()?;
/// assert_eq!(read_port.call((" 8080 ".to_string(),)).unwrap(), (8080,));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: HashMap<String, Entry>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `stage` under its own name, replacing any previous entry.
    pub fn register_stage(&mut self, stage: ErasedStage) -> &mut Self {
        let name = stage.name().to_string();
        self.insert(name, stage.into())
    }

    /// Registers a plain value under `name`, replacing any previous entry.
    ///
    /// Values can be looked up but never called; chains naming one are
    /// rejected with [`ConstructionError::NotInvocable`].
    pub fn register_value<T: Any + Send + Sync>(
        &mut self,
        name: impl Into<String>,
        value: T,
    ) -> &mut Self {
        self.insert(name.into(), Entry::value(value))
    }

    fn insert(&mut self, name: String, entry: Entry) -> &mut Self {
        if self.entries.contains_key(&name) {
            debug!(%name, "replacing registered entry");
        }
        self.entries.insert(name, entry);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Looks up each name, in order.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::UnknownEntry`] for the first name that is
    /// not registered.
    pub fn resolve<N>(&self, names: N) -> Result<Vec<Entry>, ConstructionError>
    where
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        names
            .into_iter()
            .enumerate()
            .map(|(position, name)| {
                let name = name.as_ref();
                self.get(name)
                    .cloned()
                    .ok_or_else(|| ConstructionError::UnknownEntry {
                        position,
                        name: name.to_string(),
                    })
            })
            .collect()
    }

    /// Resolves the stages named by `config` and binds them.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstructionError`] if a name is unknown or the named
    /// entries do not form a composable chain.
    pub fn assemble(&self, config: &PipelineConfig) -> Result<Bound, ConstructionError> {
        debug!(pipeline = %config.name, stages = ?config.stages, "assembling pipeline");
        bind(self.resolve(&config.stages)?)
    }

    /// Parses a TOML config and assembles the pipeline it names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if `text` is not a valid config, or
    /// [`ConfigError::Construction`] if the pipeline cannot be built.
    pub fn assemble_toml_str(&self, text: &str) -> Result<Bound, ConfigError> {
        Ok(self.assemble(&PipelineConfig::from_toml_str(text)?)?)
    }

    /// Parses a JSON config and assembles the pipeline it names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] if `text` is not a valid config, or
    /// [`ConfigError::Construction`] if the pipeline cannot be built.
    pub fn assemble_json_str(&self, text: &str) -> Result<Bound, ConfigError> {
        Ok(self.assemble(&PipelineConfig::from_json_str(text)?)?)
    }

    /// Parses a YAML config and assembles the pipeline it names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if `text` is not a valid config, or
    /// [`ConfigError::Construction`] if the pipeline cannot be built.
    pub fn assemble_yaml_str(&self, text: &str) -> Result<Bound, ConfigError> {
        Ok(self.assemble(&PipelineConfig::from_yaml_str(text)?)?)
    }
}

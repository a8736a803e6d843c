use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use figment::Figment;
#[cfg(feature = "config_env")]
use figment::providers::Env;
#[cfg(feature = "config_json")]
use figment::providers::Json;
#[cfg(feature = "config_yaml")]
use figment::providers::Yaml;
#[cfg(any(feature = "config_yaml", feature = "config_json"))]
use figment::providers::{Data, Format};
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, DurationSeconds, serde_as, skip_serializing_none};
use url::Url;

use super::ConfigParsingError;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoreConfig {
    #[serde(default)]
    pub list: ListConfig,
    /// Per-resource overrides keyed by entity resource name (`branches`, `fee-heads`, ...).
    #[serde(default)]
    pub entities: BTreeMap<String, ListConfigOverride>,
    #[serde(default)]
    pub backend: Option<BackendConfig>,
}

impl CoreConfig {
    /// List behaviour for one resource: the global defaults with its override applied.
    pub fn list_config_for(&self, resource: &str) -> ListConfig {
        match self.entities.get(resource) {
            Some(entity) => entity.apply(&self.list),
            None => self.list.clone(),
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListConfig {
    pub default_page_size: u32,
    #[serde_as(as = "DurationSeconds<u64>")]
    pub stale_time: Duration,
    pub cache_size: usize,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub search_debounce: Duration,
    pub clamp_out_of_range_page: bool,
    pub clear_selection_on_query_change: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            stale_time: Duration::from_secs(30),
            cache_size: 100,
            search_debounce: Duration::from_millis(500),
            clamp_out_of_range_page: true,
            clear_selection_on_query_change: true,
        }
    }
}

#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListConfigOverride {
    pub default_page_size: Option<u32>,
    #[serde_as(as = "Option<DurationSeconds<u64>>")]
    pub stale_time: Option<Duration>,
    pub cache_size: Option<usize>,
    #[serde_as(as = "Option<DurationMilliSeconds<u64>>")]
    pub search_debounce: Option<Duration>,
    pub clamp_out_of_range_page: Option<bool>,
    pub clear_selection_on_query_change: Option<bool>,
}

impl ListConfigOverride {
    pub fn apply(&self, base: &ListConfig) -> ListConfig {
        ListConfig {
            default_page_size: self.default_page_size.unwrap_or(base.default_page_size),
            stale_time: self.stale_time.unwrap_or(base.stale_time),
            cache_size: self.cache_size.unwrap_or(base.cache_size),
            search_debounce: self.search_debounce.unwrap_or(base.search_debounce),
            clamp_out_of_range_page: self
                .clamp_out_of_range_page
                .unwrap_or(base.clamp_out_of_range_page),
            clear_selection_on_query_change: self
                .clear_selection_on_query_change
                .unwrap_or(base.clear_selection_on_query_change),
        }
    }
}

#[serde_as]
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendConfig {
    pub base_url: Url,
    #[serde_as(as = "Option<DurationSeconds<u64>>")]
    pub request_timeout: Option<Duration>,
}

pub enum InputFormat {
    #[cfg(feature = "config_yaml")]
    Yaml(Data<Yaml>),
    #[cfg(feature = "config_json")]
    Json(Data<Json>),
}

impl InputFormat {
    #[cfg(feature = "config_yaml")]
    pub fn yaml_file(p: impl AsRef<Path>) -> InputFormat {
        InputFormat::Yaml(Yaml::file(p))
    }

    #[cfg(feature = "config_yaml")]
    pub fn yaml_str(s: impl AsRef<str>) -> InputFormat {
        InputFormat::Yaml(Yaml::string(s.as_ref()))
    }

    #[cfg(feature = "config_json")]
    pub fn json_file(p: impl AsRef<Path>) -> InputFormat {
        InputFormat::Json(Json::file(p))
    }

    #[cfg(feature = "config_json")]
    pub fn json_str(s: impl AsRef<str>) -> InputFormat {
        InputFormat::Json(Json::string(s.as_ref()))
    }
}

impl CoreConfig {
    /// Loads and merges config files in order; later files win.
    pub fn from_files(files: &[impl AsRef<Path>]) -> Result<Self, ConfigParsingError> {
        let mut inputs: Vec<InputFormat> = Vec::with_capacity(files.len());

        for path in files {
            let extension = path.as_ref().extension().and_then(|ext| ext.to_str());

            #[cfg(feature = "config_yaml")]
            if matches!(extension, Some("yml" | "yaml")) {
                inputs.push(InputFormat::yaml_file(path));
                continue;
            }

            #[cfg(feature = "config_json")]
            if extension == Some("json") {
                inputs.push(InputFormat::json_file(path));
                continue;
            }

            return Err(ConfigParsingError::GeneralParsingError(format!(
                "Unsupported file or missing file extension: {:?} ({extension:?})",
                path.as_ref()
            )));
        }

        Self::parse(inputs)
    }

    #[cfg(feature = "config_yaml")]
    pub fn from_yaml(
        configs: impl IntoIterator<Item = impl AsRef<str>>,
    ) -> Result<Self, ConfigParsingError> {
        Self::parse(configs.into_iter().map(InputFormat::yaml_str))
    }

    pub fn parse(inputs: impl IntoIterator<Item = InputFormat>) -> Result<Self, ConfigParsingError> {
        let mut figment = Figment::new();

        for data in inputs {
            figment = match data {
                #[cfg(feature = "config_yaml")]
                InputFormat::Yaml(content) => figment.merge(content),
                #[cfg(feature = "config_json")]
                InputFormat::Json(content) => figment.merge(content),
            };
        }

        #[cfg(feature = "config_env")]
        {
            figment = figment.merge(Env::prefixed("CAMPUS_").split("__").lowercase(false));
        }

        let config = figment
            .extract::<CoreConfig>()
            .map_err(|e| ConfigParsingError::GeneralParsingError(e.to_string()))?;

        let zero_page_size = (config.list.default_page_size == 0)
            .then_some("list")
            .or_else(|| {
                config
                    .entities
                    .iter()
                    .find(|(_, entity)| entity.default_page_size == Some(0))
                    .map(|(resource, _)| resource.as_str())
            });
        if let Some(section) = zero_page_size {
            return Err(ConfigParsingError::GeneralParsingError(format!(
                "{section}: defaultPageSize must be greater than zero"
            )));
        }

        Ok(config)
    }
}

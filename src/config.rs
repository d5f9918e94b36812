//! Configuration handling for srvgen.
//! This module builds the immutable generation context from validated
//! scaffolding inputs and loads the optional options manifest that a
//! template root may carry (srvgen.json, srvgen.yml, srvgen.yaml).

use crate::cli::Args;
use crate::constants::CONFIG_FILES;
use crate::error::{Error, Result};
use crate::postprocess::PostProcessOptions;
use cruet::case::snake::to_snake_case;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// The switch selecting how generated service messages are serialized.
///
/// `Schema` emits a schema file and relies on the external schema compiler
/// for bindings; `Plain` emits in-language message definitions instead.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SerializationMode {
    #[default]
    Schema,
    Plain,
}

impl SerializationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SerializationMode::Schema => "schema",
            SerializationMode::Plain => "plain",
        }
    }
}

impl std::fmt::Display for SerializationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Service discovery registration middleware options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryConfig {
    pub enabled: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Request throttling middleware options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThrottleConfig {
    pub enabled: bool,
    /// Max concurrent service requests
    pub max_concurrent: u32,
    /// Max execution time for a request in ms; 0 disables the limit
    pub max_exec_time_ms: u32,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self { enabled: false, max_concurrent: 1000, max_exec_time_ms: 0 }
    }
}

/// Request tracing middleware options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TracerConfig {
    pub enabled: bool,
    /// Max concurrent trace messages in queue
    pub queue_size: u32,
    /// Trace entry TTL in seconds; 0 disables expiry
    pub entry_ttl_secs: u32,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self { enabled: true, queue_size: 1000, entry_ttl_secs: 86_400 }
    }
}

/// The immutable generation context threaded through every render.
///
/// Built once, before any template is processed; no render observes a
/// different context than any other render in the same run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    pub service_name: String,
    pub service_path: String,
    pub description: String,
    pub endpoints: Vec<String>,
    pub base_endpoint: String,
    pub mode: SerializationMode,
    pub discovery: DiscoveryConfig,
    pub throttle: ThrottleConfig,
    pub tracer: TracerConfig,
}

impl GenerationConfig {
    pub fn builder<S: Into<String>>(service_path: S) -> GenerationConfigBuilder {
        GenerationConfigBuilder::new(service_path.into())
    }

    /// Projects the configuration into the value handed to the renderer.
    ///
    /// Pure construction: performs no I/O and cannot fail.
    pub fn context(&self) -> serde_json::Value {
        serde_json::json!({
            "package_name": to_snake_case(&self.service_name),
            "service_name": self.service_name,
            "service_path": self.service_path,
            "description": self.description,
            "base_endpoint": self.base_endpoint,
            "endpoints": self.endpoints,
            "serialization_mode": self.mode.as_str(),
            "use_discovery": self.discovery.enabled,
            "use_throttle": self.throttle.enabled,
            "throttle_max_concurrent": self.throttle.max_concurrent,
            "throttle_max_exec_time_ms": self.throttle.max_exec_time_ms,
            "use_tracer": self.tracer.enabled,
            "tracer_queue_size": self.tracer.queue_size,
            "tracer_entry_ttl_secs": self.tracer.entry_ttl_secs,
        })
    }
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").unwrap())
}

/// Validating builder for [`GenerationConfig`].
///
/// The service name is the last segment of the service path; the endpoint
/// list defaults to the service name when left empty.
#[derive(Debug, Clone)]
pub struct GenerationConfigBuilder {
    service_path: String,
    description: String,
    endpoints: Vec<String>,
    mode: SerializationMode,
    discovery: DiscoveryConfig,
    throttle: ThrottleConfig,
    tracer: TracerConfig,
}

impl GenerationConfigBuilder {
    fn new(service_path: String) -> Self {
        Self {
            service_path,
            description: String::new(),
            endpoints: Vec::new(),
            mode: SerializationMode::default(),
            discovery: DiscoveryConfig::default(),
            throttle: ThrottleConfig::default(),
            tracer: TracerConfig::default(),
        }
    }

    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn endpoints(mut self, endpoints: Vec<String>) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn mode(mut self, mode: SerializationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn discovery(mut self, discovery: DiscoveryConfig) -> Self {
        self.discovery = discovery;
        self
    }

    pub fn throttle(mut self, throttle: ThrottleConfig) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn tracer(mut self, tracer: TracerConfig) -> Self {
        self.tracer = tracer;
        self
    }

    pub fn build(self) -> Result<GenerationConfig> {
        let service_path = self.service_path.trim_end_matches('/').to_string();
        if service_path.is_empty() {
            return Err(Error::Validation(
                "service path must not be empty".to_string(),
            ));
        }

        let service_name =
            service_path.rsplit('/').next().unwrap_or_default().to_string();
        if !name_pattern().is_match(&service_name) {
            return Err(Error::Validation(format!(
                "invalid service name '{}' derived from service path '{}'",
                service_name, service_path
            )));
        }

        let mut endpoints = self.endpoints;
        if endpoints.iter().any(|endpoint| endpoint.trim().is_empty()) {
            return Err(Error::Validation(
                "endpoint names must not be empty".to_string(),
            ));
        }
        if endpoints.is_empty() {
            endpoints.push(service_name.clone());
        }
        let base_endpoint = endpoints[0].clone();

        Ok(GenerationConfig {
            service_name,
            service_path,
            description: self.description,
            endpoints,
            base_endpoint,
            mode: self.mode,
            discovery: self.discovery,
            throttle: self.throttle,
            tracer: self.tracer,
        })
    }
}

/// Optional per-template-root defaults, overridden by explicit CLI flags.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    pub description: Option<String>,
    pub mode: Option<SerializationMode>,
    pub endpoints: Option<Vec<String>>,
    pub use_discovery: Option<bool>,
    pub use_throttle: Option<bool>,
    pub throttle_max_concurrent: Option<u32>,
    pub throttle_max_exec_time: Option<u32>,
    pub use_tracer: Option<bool>,
    pub tracer_queue_size: Option<u32>,
    pub tracer_entry_ttl: Option<u32>,
    pub format: Option<bool>,
    pub bindings: Option<bool>,
    pub init_repo: Option<bool>,
}

/// Loads the options manifest, trying multiple file formats.
///
/// With an explicit path the file must exist; otherwise the template root
/// is probed for the supported file names and an empty manifest is
/// returned when none is present.
///
/// # Errors
/// * `Error::Config` if an explicit manifest is missing or no format parses
pub fn load_manifest<P: AsRef<Path>>(
    template_dir: P,
    explicit: Option<&Path>,
) -> Result<Manifest> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(Error::Config(format!(
                "manifest '{}' does not exist",
                path.display()
            )));
        }
        debug!("Loading options manifest from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        return parse_manifest(&content);
    }

    for file in CONFIG_FILES {
        let candidate = template_dir.as_ref().join(file);
        if candidate.exists() {
            debug!("Loading options manifest from {}", candidate.display());
            let content = std::fs::read_to_string(&candidate)?;
            return parse_manifest(&content);
        }
    }

    Ok(Manifest::default())
}

/// Parses manifest content, trying JSON first and falling back to YAML.
pub fn parse_manifest(content: &str) -> Result<Manifest> {
    match serde_json::from_str(content) {
        Ok(manifest) => Ok(manifest),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid manifest format: {}", e))),
    }
}

/// Fully resolved run options: the generation context plus the
/// post-processing step switches.
#[derive(Debug, Clone)]
pub struct Options {
    pub generation: GenerationConfig,
    pub steps: PostProcessOptions,
}

/// Merges CLI flags over manifest values over built-in defaults.
///
/// A flag that was not given on the command line falls back to the
/// manifest; a field absent from both keeps its default.
pub fn build_options(args: &Args, manifest: &Manifest) -> Result<Options> {
    let discovery_defaults = DiscoveryConfig::default();
    let throttle_defaults = ThrottleConfig::default();
    let tracer_defaults = TracerConfig::default();

    let endpoints = if !args.endpoints.is_empty() {
        args.endpoints.clone()
    } else {
        manifest.endpoints.clone().unwrap_or_default()
    };

    let generation = GenerationConfig::builder(&args.service_path)
        .description(
            args.description
                .clone()
                .or_else(|| manifest.description.clone())
                .unwrap_or_default(),
        )
        .endpoints(endpoints)
        .mode(args.mode.or(manifest.mode).unwrap_or_default())
        .discovery(DiscoveryConfig {
            enabled: args
                .use_discovery
                .or(manifest.use_discovery)
                .unwrap_or(discovery_defaults.enabled),
        })
        .throttle(ThrottleConfig {
            enabled: args
                .use_throttle
                .or(manifest.use_throttle)
                .unwrap_or(throttle_defaults.enabled),
            max_concurrent: args
                .throttle_max_concurrent
                .or(manifest.throttle_max_concurrent)
                .unwrap_or(throttle_defaults.max_concurrent),
            max_exec_time_ms: args
                .throttle_max_exec_time
                .or(manifest.throttle_max_exec_time)
                .unwrap_or(throttle_defaults.max_exec_time_ms),
        })
        .tracer(TracerConfig {
            enabled: args
                .use_tracer
                .or(manifest.use_tracer)
                .unwrap_or(tracer_defaults.enabled),
            queue_size: args
                .tracer_queue_size
                .or(manifest.tracer_queue_size)
                .unwrap_or(tracer_defaults.queue_size),
            entry_ttl_secs: args
                .tracer_entry_ttl
                .or(manifest.tracer_entry_ttl)
                .unwrap_or(tracer_defaults.entry_ttl_secs),
        })
        .build()?;

    let steps = PostProcessOptions {
        format: args.format.or(manifest.format).unwrap_or(true),
        bindings: args.bindings.or(manifest.bindings).unwrap_or(true),
        init_repo: args.init_repo.or(manifest.init_repo).unwrap_or(true),
    };

    Ok(Options { generation, steps })
}

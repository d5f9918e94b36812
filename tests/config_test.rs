use clap::Parser;
use srvgen::cli::Args;
use srvgen::config::{
    build_options, load_manifest, parse_manifest, GenerationConfig, SerializationMode,
    ThrottleConfig,
};
use srvgen::error::Error;
use std::fs;
use tempfile::TempDir;

fn parse_args(args: &[&str]) -> Args {
    let mut argv = vec!["srvgen"];
    argv.extend_from_slice(args);
    Args::try_parse_from(argv).unwrap()
}

#[test]
fn test_builder_derives_service_name() {
    let config = GenerationConfig::builder("github.com/foo/bar-srv").build().unwrap();

    assert_eq!(config.service_name, "bar-srv");
    assert_eq!(config.service_path, "github.com/foo/bar-srv");
    assert_eq!(config.endpoints, vec!["bar-srv"]);
    assert_eq!(config.base_endpoint, "bar-srv");
    assert_eq!(config.mode, SerializationMode::Schema);
}

#[test]
fn test_builder_trims_trailing_slash() {
    let config = GenerationConfig::builder("github.com/foo/bar-srv/").build().unwrap();
    assert_eq!(config.service_name, "bar-srv");
    assert_eq!(config.service_path, "github.com/foo/bar-srv");
}

#[test]
fn test_builder_single_segment_path() {
    let config = GenerationConfig::builder("bar").build().unwrap();
    assert_eq!(config.service_name, "bar");
}

#[test]
fn test_builder_rejects_empty_path() {
    let result = GenerationConfig::builder("").build();
    assert!(matches!(result, Err(Error::Validation(_))));

    let result = GenerationConfig::builder("/").build();
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_builder_rejects_invalid_name() {
    let result = GenerationConfig::builder("github.com/foo/my service").build();
    assert!(matches!(result, Err(Error::Validation(_))));

    let result = GenerationConfig::builder("github.com/foo/1srv").build();
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_builder_rejects_empty_endpoint() {
    let result = GenerationConfig::builder("github.com/foo/bar-srv")
        .endpoints(vec!["create".to_string(), "  ".to_string()])
        .build();
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_builder_base_endpoint_is_first() {
    let config = GenerationConfig::builder("github.com/foo/bar-srv")
        .endpoints(vec!["create".to_string(), "delete".to_string()])
        .build()
        .unwrap();
    assert_eq!(config.base_endpoint, "create");
    assert_eq!(config.endpoints, vec!["create", "delete"]);
}

#[test]
fn test_context_fields() {
    let config = GenerationConfig::builder("github.com/foo/bar-srv")
        .description("An example service")
        .mode(SerializationMode::Plain)
        .throttle(ThrottleConfig {
            enabled: true,
            max_concurrent: 64,
            max_exec_time_ms: 250,
        })
        .build()
        .unwrap();
    let context = config.context();

    assert_eq!(context["service_name"], "bar-srv");
    assert_eq!(context["package_name"], "bar_srv");
    assert_eq!(context["service_path"], "github.com/foo/bar-srv");
    assert_eq!(context["description"], "An example service");
    assert_eq!(context["serialization_mode"], "plain");
    assert_eq!(context["base_endpoint"], "bar-srv");
    assert_eq!(context["endpoints"], serde_json::json!(["bar-srv"]));
    assert_eq!(context["use_throttle"], true);
    assert_eq!(context["throttle_max_concurrent"], 64);
    assert_eq!(context["throttle_max_exec_time_ms"], 250);
    assert_eq!(context["use_discovery"], true);
    assert_eq!(context["use_tracer"], true);
    assert_eq!(context["tracer_queue_size"], 1000);
    assert_eq!(context["tracer_entry_ttl_secs"], 86_400);
}

#[test]
fn test_context_is_stable() {
    let config = GenerationConfig::builder("github.com/foo/bar-srv").build().unwrap();
    assert_eq!(config.context(), config.context());
}

#[test]
fn test_parse_manifest_json() {
    let manifest =
        parse_manifest(r#"{"mode": "plain", "use_tracer": false}"#).unwrap();
    assert_eq!(manifest.mode, Some(SerializationMode::Plain));
    assert_eq!(manifest.use_tracer, Some(false));
    assert!(manifest.description.is_none());
}

#[test]
fn test_parse_manifest_yaml() {
    let manifest = parse_manifest("mode: schema\ntracer_queue_size: 16\n").unwrap();
    assert_eq!(manifest.mode, Some(SerializationMode::Schema));
    assert_eq!(manifest.tracer_queue_size, Some(16));
}

#[test]
fn test_parse_manifest_rejects_unknown_fields() {
    let result = parse_manifest(r#"{"mode": "plain", "no_such_option": 1}"#);
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_load_manifest_defaults_when_absent() {
    let template_dir = TempDir::new().unwrap();
    let manifest = load_manifest(template_dir.path(), None).unwrap();
    assert!(manifest.mode.is_none());
    assert!(manifest.format.is_none());
}

#[test]
fn test_load_manifest_from_template_root() {
    let template_dir = TempDir::new().unwrap();
    fs::write(template_dir.path().join("srvgen.yaml"), "use_throttle: true\n")
        .unwrap();

    let manifest = load_manifest(template_dir.path(), None).unwrap();
    assert_eq!(manifest.use_throttle, Some(true));
}

#[test]
fn test_load_manifest_explicit_must_exist() {
    let template_dir = TempDir::new().unwrap();
    let missing = template_dir.path().join("nope.yaml");
    let result = load_manifest(template_dir.path(), Some(&missing));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_build_options_defaults() {
    let args = parse_args(&["--service-path", "github.com/foo/bar-srv", "./out"]);
    let options = build_options(&args, &Default::default()).unwrap();

    assert_eq!(options.generation.mode, SerializationMode::Schema);
    assert!(options.generation.discovery.enabled);
    assert!(!options.generation.throttle.enabled);
    assert!(options.generation.tracer.enabled);
    assert!(options.steps.format);
    assert!(options.steps.bindings);
    assert!(options.steps.init_repo);
}

#[test]
fn test_build_options_manifest_fallback() {
    let args = parse_args(&["--service-path", "github.com/foo/bar-srv", "./out"]);
    let manifest = parse_manifest(
        "mode: plain\nuse_tracer: false\ntracer_queue_size: 5\nformat: false\n",
    )
    .unwrap();
    let options = build_options(&args, &manifest).unwrap();

    assert_eq!(options.generation.mode, SerializationMode::Plain);
    assert!(!options.generation.tracer.enabled);
    assert_eq!(options.generation.tracer.queue_size, 5);
    assert!(!options.steps.format);
}

#[test]
fn test_build_options_flags_override_manifest() {
    let args = parse_args(&[
        "--service-path",
        "github.com/foo/bar-srv",
        "--mode",
        "schema",
        "--tracer-queue-size",
        "9",
        "--format",
        "true",
        "./out",
    ]);
    let manifest = parse_manifest(
        "mode: plain\nuse_tracer: false\ntracer_queue_size: 5\nformat: false\n",
    )
    .unwrap();
    let options = build_options(&args, &manifest).unwrap();

    assert_eq!(options.generation.mode, SerializationMode::Schema);
    assert_eq!(options.generation.tracer.queue_size, 9);
    // untouched manifest values still apply
    assert!(!options.generation.tracer.enabled);
    assert!(options.steps.format);
}

#[test]
fn test_build_options_endpoints_precedence() {
    let manifest = parse_manifest("endpoints: [one, two]\n").unwrap();

    let args = parse_args(&["--service-path", "github.com/foo/bar-srv", "./out"]);
    let options = build_options(&args, &manifest).unwrap();
    assert_eq!(options.generation.endpoints, vec!["one", "two"]);

    let args = parse_args(&[
        "--service-path",
        "github.com/foo/bar-srv",
        "--endpoint",
        "three",
        "./out",
    ]);
    let options = build_options(&args, &manifest).unwrap();
    assert_eq!(options.generation.endpoints, vec!["three"]);
}

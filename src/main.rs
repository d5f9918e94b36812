//! srvgen's main application entry point and orchestration logic.
//! Handles command-line argument parsing, destination and preflight
//! checks, and coordinates the generation pipeline.

use std::path::Path;

use srvgen::{
    cli::{get_args, Args},
    config::{build_options, load_manifest, Options, SerializationMode},
    constants::SCHEMA_FILE,
    error::{default_error_handler, Error, Result},
    postprocess::{find_tool, SystemRunner},
    processor::{resolve_output_dir, Processor},
    prompt::DialoguerPrompter,
    renderer::MiniJinjaRenderer,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Verifies that the schema toolchain is reachable before any file is
/// written, so a missing compiler surfaces upfront rather than after a
/// partially generated tree.
fn preflight(options: &Options) -> Result<()> {
    if options.generation.mode == SerializationMode::Schema && options.steps.bindings {
        for tool in ["protoc", "protoc-gen-prost"] {
            if find_tool(tool).is_none() {
                return Err(Error::Config(format!(
                    "'{}' could not be located in your PATH",
                    tool
                )));
            }
        }
    }
    Ok(())
}

fn print_notes(options: &Options, output_root: &Path) {
    println!("✓  Service created successfully\n");
    println!("Notes:");
    match options.generation.mode {
        SerializationMode::Schema => println!(
            "- The service messages are defined in {}/{}.\n  After making any changes to the schema re-run protoc to rebuild the bindings.",
            output_root.display(),
            SCHEMA_FILE
        ),
        SerializationMode::Plain => println!(
            "- The service messages are defined in {}/src/messages.rs.",
            output_root.display()
        ),
    }
    println!(
        "- Add your service implementation inside {}/src/service.rs.",
        output_root.display()
    );
    if options.generation.discovery.enabled {
        println!(
            "- The service is set up to register itself for discovery.\n  See {}/README.md for more details.",
            output_root.display()
        );
    }
    if options.steps.init_repo {
        println!("- An empty git repo has been created for you.");
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the options manifest and merges it with the CLI flags
/// 2. Resolves and checks the destination directory
/// 3. Verifies the schema toolchain is available when required
/// 4. Runs the generation pipeline
/// 5. Prints the completion notes
fn run(args: Args) -> Result<()> {
    let manifest = load_manifest(&args.templates, args.config.as_deref())?;
    let options = build_options(&args, &manifest)?;

    let prompter = DialoguerPrompter::new();
    let output_root = resolve_output_dir(
        &args.out_dir,
        &options.generation.service_name,
        args.overwrite,
        &prompter,
    )?;

    preflight(&options)?;

    let renderer = MiniJinjaRenderer::new();
    let runner = SystemRunner;

    println!("Creating new service at {}", output_root.display());
    Processor::new(
        &renderer,
        &runner,
        &options.generation,
        &options.steps,
        &args.templates,
        &output_root,
    )
    .run()?;

    print_notes(&options, &output_root);
    Ok(())
}

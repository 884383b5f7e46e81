//! Swagger document generation command.
//!
//! Reads a plugin payload (file or stdin), layers the generator
//! configuration and writes the resulting Swagger 2.0 JSON.

use crate::error::{CliError, CliResult};
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};
use swagforge_config::GeneratorConfig;
use swagforge_spec::Plugin;
use swagforge_swagger::{generate, write_document};

/// Options for `swagforge swagger`.
#[derive(Debug, Clone, Default)]
pub struct SwaggerOptions {
    pub input: String,
    pub config: Option<PathBuf>,
    pub dir: Option<PathBuf>,
    pub filename: Option<String>,
    pub host: Option<String>,
    pub base_path: Option<String>,
    pub schemes: Option<String>,
    pub pack: Option<String>,
    pub response: Option<String>,
    pub tag_naming: Option<String>,
    pub stdout: bool,
    pub quiet: bool,
}

impl SwaggerOptions {
    fn announce(&self) -> bool {
        !self.quiet && !self.stdout
    }
}

/// Run the command.
pub fn run(options: SwaggerOptions) -> CliResult<()> {
    let config = resolve_config(&options)?;
    let plugin = read_plugin(&options.input)?;

    if options.announce() {
        println!(
            "  {} Generating Swagger 2.0 from {}",
            "→".cyan(),
            input_label(&options.input, &plugin).cyan()
        );
    }

    let document = generate(&plugin.api, &config)?;

    if options.stdout {
        let json = document.to_json_pretty()?;
        let mut out = io::stdout().lock();
        out.write_all(json.as_bytes())?;
        out.flush()?;
        return Ok(());
    }

    let dir = output_dir(options.dir.as_deref(), &plugin);
    let path = write_document(&document, &dir, &config.filename)?;

    if options.announce() {
        println!(
            "  {} {} paths, {} definitions written to {}",
            "✓".green().bold(),
            document.paths.len(),
            document.definitions.len(),
            path.display().to_string().cyan()
        );
    }

    Ok(())
}

/// Defaults, config file, `SWAGFORGE_*` variables, then command line flags.
pub fn resolve_config(options: &SwaggerOptions) -> CliResult<GeneratorConfig> {
    let mut config = GeneratorConfig::load(options.config.as_deref())?;
    apply_flags(&mut config, options);
    config.validate()?;
    Ok(config)
}

fn apply_flags(config: &mut GeneratorConfig, options: &SwaggerOptions) {
    let overrides = [
        (&mut config.host, &options.host),
        (&mut config.base_path, &options.base_path),
        (&mut config.schemes, &options.schemes),
        (&mut config.pack, &options.pack),
        (&mut config.response, &options.response),
    ];
    for (slot, flag) in overrides {
        if let Some(value) = flag {
            *slot = Some(value.clone()).filter(|v| !v.is_empty());
        }
    }

    if let Some(filename) = &options.filename {
        config.filename = filename.clone();
    }
    if let Some(style) = &options.tag_naming {
        config.tag_naming = style.clone();
    }
}

fn read_plugin(input: &str) -> CliResult<Plugin> {
    if input == "-" {
        return Ok(Plugin::from_reader(io::stdin().lock())?);
    }

    let file = File::open(input)
        .map_err(|e| CliError::InvalidArgument(format!("cannot open {}: {}", input, e)))?;
    Ok(Plugin::from_reader(BufReader::new(file))?)
}

/// `--dir`, then the payload's own `dir`, then the working directory.
fn output_dir(flag: Option<&Path>, plugin: &Plugin) -> PathBuf {
    match flag {
        Some(dir) => dir.to_path_buf(),
        None if !plugin.dir.is_empty() => PathBuf::from(&plugin.dir),
        None => PathBuf::from("."),
    }
}

fn input_label(input: &str, plugin: &Plugin) -> String {
    match (input, plugin.api_file_path.is_empty()) {
        ("-", true) => "stdin".to_string(),
        ("-", false) => plugin.api_file_path.clone(),
        (path, _) => path.to_string(),
    }
}

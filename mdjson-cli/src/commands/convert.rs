//! Convert a Markdown document to the JSON content model.

use crate::agent;
use anyhow::{bail, Context, Result};
use mdjson_core::{ConvertContext, ConvertOptions, EncodeKind, Normalizer};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Separator between pattern and replacement in `--regex` values
const REGEX_SEPARATOR: &str = "=>";

pub struct ConvertArgs {
    pub input: Option<PathBuf>,
    pub iiif: Option<String>,
    pub encode: Vec<String>,
    pub regexes: Vec<String>,
    pub pretty: bool,
    pub envelope: bool,
}

pub fn convert_document(config_path: Option<&Path>, args: ConvertArgs) -> Result<()> {
    let options = load_options(config_path, &args)?;
    let context = ConvertContext::try_from(options).context("Invalid conversion options")?;

    let source = read_source(args.input.as_deref())?;
    let nodes = Normalizer::new().normalize(&source, &context);
    tracing::debug!("Document converted into {} top-level nodes", nodes.len());

    let output = if args.envelope {
        let payload = agent::envelope("document.content", &nodes);
        to_json(&payload, args.pretty)?
    } else {
        to_json(&nodes, args.pretty)?
    };

    println!("{output}");
    Ok(())
}

/// Options from the config file, overridden by command line flags
fn load_options(config_path: Option<&Path>, args: &ConvertArgs) -> Result<ConvertOptions> {
    let mut options = match config_path {
        Some(path) => ConvertOptions::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ConvertOptions::default(),
    };

    if let Some(iiif) = &args.iiif {
        options.iiif = Some(iiif.clone());
    }

    if !args.encode.is_empty() {
        options.encode = args
            .encode
            .iter()
            .map(|kind| {
                EncodeKind::from_str(kind)
                    .with_context(|| format!("Unknown encode kind '{kind}' (expected table or code)"))
            })
            .collect::<Result<_>>()?;
    }

    for raw in &args.regexes {
        let Some((pattern, replacement)) = raw.split_once(REGEX_SEPARATOR) else {
            bail!("Invalid --regex '{raw}', expected PATTERN{REGEX_SEPARATOR}REPLACEMENT");
        };
        // Command line substitutions always run after the configured ones
        options.regexes.shift_remove(pattern);
        options
            .regexes
            .insert(pattern.to_string(), replacement.to_string());
    }

    Ok(options)
}

fn read_source(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;
            Ok(source)
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

use anyhow::{Context, Result, bail};
use markdown_inline_config::Config;
use markdown_inline_engine::{Document, InlineOptions, ReferenceDefinition, ReferenceLinks, to_html};
use std::{
    env,
    io::{self, Read},
    path::{Path, PathBuf},
    process,
};

const USAGE: &str = "Usage: markdown-inline-cli [--config PATH] [FILE]";

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    input: Option<PathBuf>,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut parsed = Args::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let Some(path) = args.next() else {
                    bail!("--config needs a path");
                };
                parsed.config = Some(PathBuf::from(path));
            }
            "-h" | "--help" => bail!("{USAGE}"),
            flag if flag.starts_with('-') && flag != "-" => bail!("Unknown option {flag}"),
            _ if parsed.input.is_some() => bail!("Only one input file may be given"),
            "-" => {}
            path => parsed.input = Some(PathBuf::from(path)),
        }
    }
    Ok(parsed)
}

/// Splits text into blank-line-separated blocks.
fn blocks(text: &str) -> Vec<String> {
    let mut blocks = vec![];
    let mut current: Vec<&str> = vec![];
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }
    blocks
}

/// Parses a block made up only of reference definitions, one per line or a
/// single definition with its title on the next line.
fn definitions(block: &str) -> Option<Vec<ReferenceDefinition>> {
    if let Some(definition) = ReferenceDefinition::parse(block) {
        return Some(vec![definition]);
    }
    block.lines().map(ReferenceDefinition::parse).collect()
}

/// Paragraph text with per-line indentation and trailing whitespace removed.
fn paragraph_text(block: &str) -> String {
    let lines: Vec<&str> = block.lines().map(str::trim_start).collect();
    lines.join("\n").trim_end().to_string()
}

/// Renders a whole document: reference definitions are collected first so
/// they resolve from anywhere, every other block becomes a paragraph.
fn render(text: &str, mut references: ReferenceLinks, options: InlineOptions) -> String {
    let mut paragraphs = vec![];
    for block in blocks(text) {
        match definitions(&block) {
            Some(defs) => {
                for def in defs {
                    references.insert(&def.label, def.link);
                }
            }
            None => paragraphs.push(block),
        }
    }

    let document = Document::new(references, options);
    paragraphs
        .iter()
        .map(|block| {
            let nodes = document.parse_inline(&paragraph_text(block));
            format!("<p>{}</p>\n", to_html(&nodes))
        })
        .collect()
}

fn load_references(path: &Path) -> Result<ReferenceLinks> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read references file {}", path.display()))?;
    let blocks = blocks(&text);
    let defs = blocks
        .iter()
        .filter_map(|block| definitions(block))
        .flatten();
    Ok(ReferenceLinks::from_definitions(defs))
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => Some(config),
            None => bail!("Config file not found: {}", path.display()),
        },
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Config::load()?
        }
    };

    Ok(loaded.unwrap_or_else(|| {
        log::debug!("No config file found, using defaults");
        Config::default()
    }))
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let references = match &config.references {
        Some(path) => load_references(path)?,
        None => ReferenceLinks::new(),
    };
    log::info!("Loaded {} shared reference definitions", references.len());

    let text = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
    };

    print!("{}", render(&text, references, config.to_options()?));
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_config_and_input() {
        let parsed = args(&["--config", "c.toml", "doc.md"]).unwrap();
        assert_eq!(
            parsed,
            Args {
                config: Some(PathBuf::from("c.toml")),
                input: Some(PathBuf::from("doc.md")),
            }
        );
        assert_eq!(args(&["-"]).unwrap(), Args::default());
    }

    #[rstest]
    #[case(&["--config"])]
    #[case(&["--verbose"])]
    #[case(&["a.md", "b.md"])]
    fn rejects_bad_arguments(#[case] list: &[&str]) {
        assert!(args(list).is_err());
    }

    #[test]
    fn splits_on_blank_lines() {
        assert_eq!(
            blocks("a\nb\n\n  \nc\n"),
            vec!["a\nb".to_string(), "c".to_string()]
        );
    }

    #[test]
    fn definition_blocks() {
        assert_eq!(definitions("[a]: /a\n[b]: /b").map(|d| d.len()), Some(2));
        assert_eq!(definitions("[a]: /a\n  \"Title\"").map(|d| d.len()), Some(1));
        assert!(definitions("[a]: /a\nnot a definition").is_none());
    }

    #[test]
    fn renders_paragraphs_with_late_definitions() {
        let text = "Hello *world*, see [docs].\n  second line  \n\n[docs]: http://docs.example \"Docs\"\n";
        assert_eq!(
            render(text, ReferenceLinks::new(), InlineOptions::default()),
            "<p>Hello <em>world</em>, see <a href=\"http://docs.example\" title=\"Docs\">docs</a>.\nsecond line</p>\n"
        );
    }

    #[test]
    fn shared_references_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let refs = temp_dir.path().join("refs.md");
        std::fs::write(&refs, "[home]: /\n\nsome prose\n\n[About]: /about 'About us'\n").unwrap();

        let references = load_references(&refs).unwrap();
        assert_eq!(references.len(), 2);
        assert_eq!(
            render("[home] and [about]", references, InlineOptions::default()),
            "<p><a href=\"/\">home</a> and <a href=\"/about\" title=\"About us\">about</a></p>\n"
        );
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");
        assert!(load_config(Some(missing.as_path())).is_err());
    }

    #[test]
    fn explicit_config_is_used() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "max_nesting = 4\n").unwrap();
        assert_eq!(load_config(Some(path.as_path())).unwrap().max_nesting, 4);
    }
}

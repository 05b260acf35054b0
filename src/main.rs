use std::{
    fs,
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant, SystemTime},
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use token_parser::{
    keywords::KEYWORD_FILE_CANDIDATES,
    preview::DEFAULT_DELAY,
    store::{JsonFileStore, MappingStore},
    Config, Depth, FileVariant, Output, OutputMode, PreviewSession, ResponsiveMode,
    SourceFile, TokenContext, TokenFormat,
};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Parser)]
#[command(name = "token-parser")]
#[command(about = "Convert design-token JSON into CSS variables, classes or references")]
struct Cli {
    /// Token documents. The first one is the default file unless --default says otherwise
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// TOML config file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    mode: Option<OutputMode>,

    /// Output shape for jsonToToken
    #[arg(long, value_enum)]
    format: Option<TokenFormat>,

    /// How non-default files are wrapped in jsonToCss
    #[arg(long, value_enum)]
    responsive: Option<ResponsiveMode>,

    /// Joins path segments into a name
    #[arg(long)]
    separator: Option<String>,

    /// Replacement for whitespace inside keys
    #[arg(long)]
    space: Option<String>,

    /// Keep whitespace inside keys as is
    #[arg(long)]
    keep_spaces: bool,

    /// Do not lowercase names
    #[arg(long)]
    keep_case: bool,

    /// Trailing path segments used for names: a count or "all"
    #[arg(long)]
    depth: Option<Depth>,

    /// Prefix for generated custom properties
    #[arg(long)]
    prefix: Option<String>,

    /// Prefix for custom properties referenced in tokenToToken
    #[arg(long)]
    source_prefix: Option<String>,

    /// Joins reference path segments in tokenToToken
    #[arg(long)]
    path_separator: Option<String>,

    /// Prefer `com.figma` code-syntax values over `$value`
    #[arg(long)]
    code_syntax: bool,

    #[arg(long)]
    decimals: Option<usize>,

    /// Index of the default file
    #[arg(long = "default")]
    default_file: Option<usize>,

    /// Width range of a file, e.g. `1=768:1439` or `2=:767`
    #[arg(long, value_parser = parse_range)]
    range: Vec<(usize, Option<u32>, Option<u32>)>,

    /// Theme label of a file, e.g. `1=High Contrast`
    #[arg(long, value_parser = parse_theme)]
    theme: Vec<(usize, String)>,

    /// Keyword files tried in order. Defaults to css-keywords.json or
    /// css-keyword.json in the working directory, then the built-in list
    #[arg(long)]
    keywords: Vec<PathBuf>,

    /// JSON file holding user property mappings
    #[arg(long)]
    mappings: Option<PathBuf>,

    /// Add or replace a property mapping, e.g. `inset-x=left,right`
    #[arg(long, value_parser = parse_mapping)]
    map: Vec<(String, Vec<String>)>,

    /// Remove a user property mapping
    #[arg(long)]
    unmap: Vec<String>,

    /// Output file, or a directory to write the mode's artifact into
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Regenerate whenever an input file changes
    #[arg(long)]
    watch: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn parse_range(s: &str) -> Result<(usize, Option<u32>, Option<u32>), String> {
    let (index, range) = s
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=MIN:MAX, got '{s}'"))?;
    let (min, max) = range
        .split_once(':')
        .ok_or_else(|| format!("expected MIN:MAX, got '{range}'"))?;
    let bound = |v: &str| -> Result<Option<u32>, String> {
        if v.trim().is_empty() {
            Ok(None)
        } else {
            v.trim().parse().map(Some).map_err(|e| format!("bad width '{v}': {e}"))
        }
    };
    let index = index.trim().parse().map_err(|e| format!("bad index '{index}': {e}"))?;
    Ok((index, bound(min)?, bound(max)?))
}

fn parse_theme(s: &str) -> Result<(usize, String), String> {
    let (index, label) = s
        .split_once('=')
        .ok_or_else(|| format!("expected INDEX=LABEL, got '{s}'"))?;
    let index = index.trim().parse().map_err(|e| format!("bad index '{index}': {e}"))?;
    Ok((index, label.trim().to_string()))
}

fn parse_mapping(s: &str) -> Result<(String, Vec<String>), String> {
    let (name, targets) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=TARGET[,TARGET...], got '{s}'"))?;
    let targets: Vec<String> = targets
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();
    if name.trim().is_empty() || targets.is_empty() {
        return Err(format!("mapping '{s}' needs a name and at least one target"));
    }
    Ok((name.trim().to_string(), targets))
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(format) = self.format {
            config.token_format = format;
        }
        if let Some(responsive) = self.responsive {
            config.responsive = responsive;
        }
        if let Some(separator) = &self.separator {
            config.naming.separator = separator.clone();
        }
        if let Some(space) = &self.space {
            config.naming.whitespace_replacement = space.clone();
        }
        if self.keep_spaces {
            config.naming.replace_whitespace = false;
        }
        if self.keep_case {
            config.naming.lowercase = false;
        }
        if let Some(depth) = self.depth {
            config.naming.depth = depth;
        }
        if let Some(prefix) = &self.prefix {
            config.naming.prefix = Some(prefix.clone());
            config.naming.use_prefix = true;
        }
        if let Some(prefix) = &self.source_prefix {
            config.source_prefix = Some(prefix.clone());
            config.use_source_prefix = true;
        }
        if let Some(separator) = &self.path_separator {
            config.path_separator = separator.clone();
        }
        if self.code_syntax {
            config.use_code_syntax = true;
        }
        if let Some(decimals) = self.decimals {
            config.decimals = decimals;
        }
        if let Some(index) = self.default_file {
            config.default_file = index;
        }
        let count = self.files.len();
        if !self.range.is_empty() || !self.theme.is_empty() {
            let mut variants = config.file_variants(count);
            for (index, min, max) in &self.range {
                let variant = variants
                    .get_mut(*index)
                    .with_context(|| format!("--range index {index} has no input file"))?;
                variant.min_width = *min;
                variant.max_width = *max;
            }
            for (index, label) in &self.theme {
                let variant: &mut FileVariant = variants
                    .get_mut(*index)
                    .with_context(|| format!("--theme index {index} has no input file"))?;
                variant.label = Some(label.clone());
            }
            config.files = variants;
        }
        config.validate()?;
        Ok(config)
    }

    fn load_context(&self) -> Result<TokenContext> {
        let store = self.mappings.as_ref().map(JsonFileStore::new);
        let keywords: Vec<PathBuf> = if self.keywords.is_empty() {
            KEYWORD_FILE_CANDIDATES
                .iter()
                .map(PathBuf::from)
                .filter(|path| path.exists())
                .collect()
        } else {
            self.keywords.clone()
        };
        let mut ctx = TokenContext::load(
            &keywords,
            store.as_ref().map(|s| s as &dyn MappingStore),
        );
        if self.map.is_empty() && self.unmap.is_empty() {
            return Ok(ctx);
        }
        for (name, targets) in &self.map {
            ctx.mapper.update(name, targets.iter().cloned(), None);
        }
        for name in &self.unmap {
            if ctx.mapper.remove(name).is_none() {
                warn!(%name, "no mapping to remove");
            }
        }
        match &store {
            Some(store) => {
                store
                    .save(ctx.mapper.registry())
                    .with_context(|| format!("saving mappings to {}", store.path().display()))?;
                info!(path = %store.path().display(), "saved property mappings");
            }
            None => warn!("mapping edits apply to this run only; pass --mappings to keep them"),
        }
        Ok(ctx)
    }
}

fn read_source(path: &Path) -> SourceFile {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    match fs::read_to_string(path) {
        Ok(text) => SourceFile::parse(name, &text),
        Err(err) => {
            error!(path = %path.display(), "failed to read token file: {err}");
            SourceFile {
                name,
                document: None,
            }
        }
    }
}

/// Reads every input on its own thread; results keep the input order.
fn read_sources(files: &[PathBuf]) -> Vec<SourceFile> {
    thread::scope(|scope| {
        let handles: Vec<_> = files
            .iter()
            .map(|path| scope.spawn(move || read_source(path)))
            .collect();
        handles
            .into_iter()
            .zip(files)
            .map(|(handle, path)| {
                handle.join().unwrap_or_else(|_| SourceFile {
                    name: path.display().to_string(),
                    document: None,
                })
            })
            .collect()
    })
}

fn modified_times(files: &[PathBuf]) -> Vec<Option<SystemTime>> {
    files
        .iter()
        .map(|path| fs::metadata(path).and_then(|m| m.modified()).ok())
        .collect()
}

fn emit(output: &Output, target: Option<&Path>) -> Result<()> {
    let Some(target) = target else {
        print!("{}", output.text);
        return Ok(());
    };
    let path = if target.is_dir() {
        target.join(output.artifact.file_name)
    } else {
        target.to_path_buf()
    };
    fs::write(&path, &output.text).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), mime = output.artifact.mime, "wrote output");
    Ok(())
}

fn report_pending(ctx: &TokenContext) {
    for (name, targets) in ctx.mapper.pending() {
        if targets.is_empty() {
            warn!(%name, "unknown css property kept as is");
        } else {
            warn!(%name, ?targets, "unknown css property mapped by guess; confirm with --map");
        }
    }
}

fn watch(cli: &Cli, config: Config, ctx: TokenContext) -> Result<()> {
    let mut session = PreviewSession::new(config, ctx, DEFAULT_DELAY);
    let mut stamps = modified_times(&cli.files);
    session.set_sources(read_sources(&cli.files), Instant::now());
    info!(files = cli.files.len(), "watching for changes");
    loop {
        let now = Instant::now();
        let current = modified_times(&cli.files);
        if current != stamps {
            stamps = current;
            session.set_sources(read_sources(&cli.files), now);
        }
        if let Some(output) = session.tick(now) {
            emit(output, cli.output.as_deref())?;
            report_pending(session.context());
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info,token_parser=debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.load_config().context("invalid configuration")?;
    let mut ctx = cli.load_context()?;

    if cli.watch {
        return watch(&cli, config, ctx);
    }

    let sources = read_sources(&cli.files);
    let output = token_parser::render_output(&config, &sources, &mut ctx);
    emit(&output, cli.output.as_deref())?;
    report_pending(&ctx);
    if output.failed {
        bail!("generation failed");
    }
    Ok(())
}

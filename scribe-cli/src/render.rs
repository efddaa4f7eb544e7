use anyhow::{Context, Result, anyhow};
use scribe_ui::{OutputFormat, RenderRoot, ScribeConfig, VNode};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Input path meaning stdin.
pub const STDIN: &str = "-";

pub struct RenderOptions {
    pub input: PathBuf,
    pub format: Option<OutputFormat>,
    pub indent: Option<usize>,
    pub declaration: bool,
    pub collapse_text: bool,
    pub output: Option<PathBuf>,
}

impl RenderOptions {
    /// Applies command line flags on top of the file configuration.
    pub fn apply(&self, config: &mut ScribeConfig) {
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.indent.is_some() {
            config.output.indent = self.indent;
        }
        config.output.xml_declaration |= self.declaration;
        config.host.collapse_text |= self.collapse_text;
    }
}

pub fn run_render(options: RenderOptions, mut config: ScribeConfig) -> Result<()> {
    options.apply(&mut config);

    let source = read_input(&options.input)?;
    let tree: VNode = serde_json::from_str(&source)
        .with_context(|| format!("Invalid tree in {}", options.input.display()))?;
    let out = render_tree(&tree, &config)?;

    match &options.output {
        Some(path) => {
            fs::write(path, format!("{}\n", out))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            debug!(path = %path.display(), bytes = out.len(), "wrote output");
        }
        None => println!("{}", out),
    }
    Ok(())
}

/// Renders `tree` once and serializes it with the configured output options.
pub fn render_tree(tree: &VNode, config: &ScribeConfig) -> Result<String> {
    let mut root = RenderRoot::with_config(config).context("Invalid configuration")?;
    root.render(tree)
        .map_err(|e| anyhow!("Render failed: {}", e))?;
    Ok(root.serialize())
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == STDIN {
        let mut contents = String::new();
        io::stdin()
            .read_to_string(&mut contents)
            .context("Failed to read tree from stdin")?;
        return Ok(contents);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

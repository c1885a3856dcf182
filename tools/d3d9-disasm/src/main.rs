mod input;

use std::fmt;
use std::fs;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use aero_d3d9_disasm::{disassemble_with, DisasmOptions, Disassembly};
use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{debug, warn};

use crate::input::{InputFormat, ShaderWords};

#[derive(Parser, Debug)]
#[command(
    name = "d3d9-disasm",
    about = "Disassemble Direct3D 9 shader model 1-3 token streams into assembly text."
)]
struct Args {
    /// Input files (reads stdin when none are given)
    inputs: Vec<PathBuf>,

    /// How token words are extracted from each input
    #[arg(long, value_enum, default_value_t = InputFormat::HexLines)]
    input: InputFormat,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Accept vertex shader (vs_*) version headers
    #[arg(long, action = clap::ArgAction::SetTrue)]
    vertex_headers: bool,

    /// Render comment payload as printable text
    #[arg(long, action = clap::ArgAction::SetTrue)]
    comments: bool,

    /// Exit with an error if any shader produced a diagnostic
    #[arg(long, action = clap::ArgAction::SetTrue)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// `Tokens:` / `Assembly:` blocks
    Text,
    /// One JSON object per shader
    Json,
}

impl Args {
    fn options(&self) -> DisasmOptions {
        DisasmOptions {
            vertex_headers: self.vertex_headers,
            comment_text: self.comments,
            fatal_field_errors: self.strict,
            ..DisasmOptions::default()
        }
    }
}

#[derive(Debug, Clone)]
enum Source {
    Stdin,
    File(PathBuf),
}

impl Source {
    fn read(&self) -> anyhow::Result<Vec<u8>> {
        match self {
            Self::Stdin => {
                let mut buf = Vec::new();
                io::stdin()
                    .read_to_end(&mut buf)
                    .context("failed to read stdin")?;
                Ok(buf)
            }
            Self::File(path) => {
                fs::read(path).with_context(|| format!("failed to read {}", path.display()))
            }
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Serialize)]
struct ShaderReport<'a> {
    source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    line: Option<usize>,
    #[serde(flatten)]
    disassembly: &'a Disassembly,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let options = args.options();

    let sources: Vec<Source> = if args.inputs.is_empty() {
        vec![Source::Stdin]
    } else {
        args.inputs.iter().cloned().map(Source::File).collect()
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut failed = 0usize;
    let mut first_failure = None;

    for source in &sources {
        let bytes = source.read()?;
        let shaders = input::extract(args.input, &bytes)
            .with_context(|| format!("failed to extract shader words from {source}"))?;
        debug!(%source, shaders = shaders.len(), "read input");

        for shader in shaders {
            let label = match shader.line {
                Some(line) => format!("{source}:{line}"),
                None => source.to_string(),
            };

            // Blank lines between shaders are echoed, not decoded.
            if shader.words.is_empty() && args.input == InputFormat::HexLines {
                if args.format == OutputFormat::Text {
                    write_text(&mut out, &shader, "")?;
                }
                continue;
            }

            let disasm = disassemble_with(&shader.words, &options);
            match args.format {
                OutputFormat::Text => write_text(&mut out, &shader, &disasm.listing())?,
                OutputFormat::Json => {
                    let report = ShaderReport {
                        source: source.to_string(),
                        line: shader.line,
                        disassembly: &disasm,
                    };
                    serde_json::to_writer(&mut out, &report)
                        .context("failed to write JSON output")?;
                    writeln!(out).context("failed to write output")?;
                }
            }

            for err in disasm.stream_errors.iter().chain(disasm.field_errors()) {
                warn!(shader = %label, "{err}");
            }
            if let Err(err) = disasm.into_result() {
                failed += 1;
                first_failure.get_or_insert_with(|| format!("{label}: {err}"));
            }
        }
    }

    out.flush().context("failed to flush output")?;

    if args.strict {
        if let Some(first) = first_failure {
            bail!("{failed} shader(s) failed to decode cleanly; first: {first}");
        }
    }
    Ok(())
}

fn write_text(out: &mut impl Write, shader: &ShaderWords, listing: &str) -> anyhow::Result<()> {
    write!(out, "Tokens: {}\nAssembly: \n{listing}\n\n", shader.echo)
        .context("failed to write output")
}

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use wordseg::Kind;

pub const DEFAULT_CONFIG: &str = "plagcheck.toml";

pub const USAGE: &str = "请提供原文路径、抄袭文路径和输出文件路径: ";

#[derive(Clone, Debug, Parser)]
#[clap(version, about = "Compare two documents and flag likely plagiarism")]
pub struct Args {
    /// The original document
    pub original: Option<PathBuf>,

    /// The document suspected of copying the original
    pub compared: Option<PathBuf>,

    /// Where the report is written. Use `-` for stdout.
    pub output: Option<PathBuf>,

    /// A plagcheck.toml config file. When omitted, ./plagcheck.toml is used if
    /// it exists.
    #[clap(short, long)]
    pub config: Option<PathBuf>,

    /// Scores strictly above this ratio are reported as likely plagiarism
    #[clap(short, long)]
    pub threshold: Option<f64>,

    /// Word segmenter to split documents with (whitespace or jieba)
    #[clap(short, long)]
    pub segmenter: Option<Kind>,

    /// An extra jieba dictionary file
    #[clap(long)]
    pub user_dict: Option<PathBuf>,

    /// How the result is printed to the console
    #[clap(long, value_enum, default_value_t = Reporter::Ansi)]
    pub reporter: Reporter,

    /// Print the result without colors
    #[clap(long, default_value_t = false)]
    pub no_color: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Reporter {
    Ansi,
    Json,
}

pub struct Paths<'a> {
    pub original: &'a Path,
    pub compared: &'a Path,
    pub output: &'a Path,
}

impl Paths<'_> {
    pub fn writes_to_stdout(&self) -> bool {
        self.output == Path::new("-")
    }
}

impl Args {
    /// All three document paths, or `None` when any is missing.
    pub fn paths(&self) -> Option<Paths<'_>> {
        Some(Paths {
            original: self.original.as_deref()?,
            compared: self.compared.as_deref()?,
            output: self.output.as_deref()?,
        })
    }

    /// The console reporter for this run. When the report itself goes to
    /// stdout nothing else is printed there.
    pub fn console_reporter(&self) -> Option<Reporter> {
        match self.paths() {
            Some(paths) if paths.writes_to_stdout() => None,
            _ => Some(self.reporter),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG))
    }

    pub fn config_is_explicit(&self) -> bool {
        self.config.is_some()
    }
}

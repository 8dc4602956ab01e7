use crate::error::{IoErr, Result, SerializeErr};
use crate::similarity::SimilarityResult;
use log::info;
use nu_ansi_term::Color::{Green, Red};
use serde::Serialize;
use snafu::prelude::*;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

const SCORE_LABEL: &str = "原文与抄袭文的相似度";
const WARNING: &str = "警告：可能存在抄袭行为！";
const NO_WARNING: &str = "文本之间没有明显的抄袭行为。";

pub fn score_line(result: &SimilarityResult) -> String {
    format!("{SCORE_LABEL}: {:.2}%", result.percentage())
}

pub fn verdict_line(result: &SimilarityResult) -> &'static str {
    if result.likely_plagiarized {
        WARNING
    } else {
        NO_WARNING
    }
}

/// The text persisted for a comparison: the score line followed by the
/// verdict line, each newline terminated.
pub fn render(result: &SimilarityResult) -> String {
    format!("{}\n{}\n", score_line(result), verdict_line(result))
}

/// Where a rendered report ends up.
#[allow(async_fn_in_trait)]
pub trait Sink {
    async fn deliver(&mut self, report: &str) -> Result<()>;
}

pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl Sink for FileSink {
    async fn deliver(&mut self, report: &str) -> Result<()> {
        tokio::fs::write(&self.path, report)
            .await
            .context(IoErr { path: &self.path })?;
        info!("结果已写入 {}", self.path.display());
        Ok(())
    }
}

pub struct StdoutSink;

impl Sink for StdoutSink {
    async fn deliver(&mut self, report: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(report.as_bytes())
            .context(IoErr { path: "stdout" })?;
        stdout.flush().context(IoErr { path: "stdout" })
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemorySink {
    pub contents: String,
}

#[cfg(test)]
impl Sink for MemorySink {
    async fn deliver(&mut self, report: &str) -> Result<()> {
        self.contents.push_str(report);
        Ok(())
    }
}

/// Everything known about one finished comparison.
#[derive(Debug, Serialize)]
pub struct Comparison<'a> {
    pub original: &'a Path,
    pub compared: &'a Path,
    pub output: &'a Path,
    pub score: f64,
    pub percentage: f64,
    pub threshold: f64,
    pub likely_plagiarized: bool,
    pub original_tokens: usize,
    pub compared_tokens: usize,
    pub shared_tokens: usize,
}

impl Comparison<'_> {
    pub fn result(&self) -> SimilarityResult {
        SimilarityResult {
            score: self.score,
            likely_plagiarized: self.likely_plagiarized,
        }
    }
}

/// Console rendering of a comparison.
pub trait Reporter {
    fn on_comparison(&mut self, comparison: &Comparison) -> Result<()>;
}

pub struct AnsiReporter {
    color: bool,
}

impl AnsiReporter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl Reporter for AnsiReporter {
    fn on_comparison(&mut self, comparison: &Comparison) -> Result<()> {
        let result = comparison.result();
        let verdict = verdict_line(&result);

        println!("{}", score_line(&result));
        if !self.color {
            println!("{verdict}");
        } else if result.likely_plagiarized {
            println!("{}", Red.bold().paint(verdict));
        } else {
            println!("{}", Green.paint(verdict));
        }

        Ok(())
    }
}

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn on_comparison(&mut self, comparison: &Comparison) -> Result<()> {
        let serialized = serde_json::to_string(comparison).context(SerializeErr)?;
        println!("{serialized}");
        Ok(())
    }
}

/// Used when the report itself is written to stdout.
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn on_comparison(&mut self, _comparison: &Comparison) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::{classify, Threshold};

    fn result(score: f64) -> SimilarityResult {
        SimilarityResult {
            score,
            likely_plagiarized: classify(score, Threshold::default()),
        }
    }

    #[test]
    fn render_identical_documents() {
        assert_eq!(
            render(&result(1.0)),
            "原文与抄袭文的相似度: 100.00%\n警告：可能存在抄袭行为！\n"
        );
    }

    #[test]
    fn render_disjoint_documents() {
        assert_eq!(
            render(&result(0.0)),
            "原文与抄袭文的相似度: 0.00%\n文本之间没有明显的抄袭行为。\n"
        );
    }

    #[test]
    fn render_rounds_to_two_decimals() {
        assert_eq!(score_line(&result(2.0 / 6.0)), "原文与抄袭文的相似度: 33.33%");
        assert_eq!(score_line(&result(0.75)), "原文与抄袭文的相似度: 75.00%");
    }

    #[test]
    fn threshold_score_is_not_a_warning() {
        assert_eq!(verdict_line(&result(0.5)), NO_WARNING);
    }

    #[tokio::test]
    async fn file_sink_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.txt");

        FileSink::new(&path).deliver("hello\n").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[tokio::test]
    async fn file_sink_reports_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.txt");

        assert!(FileSink::new(&path).deliver("hello\n").await.is_err());
    }

    #[tokio::test]
    async fn stdout_sink_writes() {
        assert!(StdoutSink.deliver("").await.is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn json_reporter_rejects_non_utf8_paths() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let comparison = Comparison {
            original: Path::new(OsStr::from_bytes(b"doc\xff.txt")),
            compared: Path::new("b.txt"),
            output: Path::new("out.txt"),
            score: 0.0,
            percentage: 0.0,
            threshold: 0.5,
            likely_plagiarized: false,
            original_tokens: 0,
            compared_tokens: 0,
            shared_tokens: 0,
        };

        let err = JsonReporter.on_comparison(&comparison).unwrap_err();
        assert!(matches!(err, crate::error::Error::Serialize { .. }));
    }

    #[test]
    fn json_fields() {
        let comparison = Comparison {
            original: Path::new("a.txt"),
            compared: Path::new("b.txt"),
            output: Path::new("out.txt"),
            score: 0.75,
            percentage: 75.0,
            threshold: 0.5,
            likely_plagiarized: true,
            original_tokens: 3,
            compared_tokens: 4,
            shared_tokens: 3,
        };

        let value = serde_json::to_value(&comparison).unwrap();
        assert_eq!(value["original"], "a.txt");
        assert_eq!(value["likely_plagiarized"], true);
        assert_eq!(value["shared_tokens"], 3);
    }
}

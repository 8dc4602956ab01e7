use crate::args::Paths;
use crate::config::Settings;
use crate::error::{EncodingErr, IoErr, Result, SegmenterErr};
use crate::report::{render, Comparison, Reporter, Sink};
use crate::similarity::{compare, SimilarityResult};
use crate::tokens::Tokenizer;
use futures::future::try_join;
use log::{debug, warn};
use snafu::prelude::*;
use std::path::Path;
use tokio::fs::read;

async fn read_document(path: &Path) -> Result<String> {
    let bytes = read(path).await.context(IoErr { path })?;
    String::from_utf8(bytes).context(EncodingErr { path })
}

/// Compares the two documents and delivers the report. Both documents are
/// read before anything is written, so a failed read leaves the sink untouched.
pub async fn check<S: Sink>(
    settings: &Settings,
    paths: &Paths<'_>,
    sink: &mut S,
    reporter: &mut dyn Reporter,
) -> Result<SimilarityResult> {
    let segmenter =
        wordseg::build(settings.segmenter, &settings.segmenter_options).context(SegmenterErr)?;
    let tokenizer = Tokenizer::new(segmenter, settings.normalize);
    debug!("Segmenting with {}", settings.segmenter);

    let (original, compared) =
        try_join(read_document(paths.original), read_document(paths.compared)).await?;

    let original_tokens = tokenizer.tokenize_document(original.lines())?;
    let compared_tokens = tokenizer.tokenize_document(compared.lines())?;
    for (path, tokens) in [
        (paths.original, &original_tokens),
        (paths.compared, &compared_tokens),
    ] {
        if tokens.is_empty() {
            warn!("{} contains no words", path.display());
        }
    }
    debug!(
        "{} tokens in {}, {} tokens in {}",
        original_tokens.len(),
        paths.original.display(),
        compared_tokens.len(),
        paths.compared.display()
    );

    let result = compare(&original_tokens, &compared_tokens, settings.threshold);
    debug!(
        "Similarity {:.4} against threshold {}",
        result.score,
        settings.threshold.value()
    );

    reporter.on_comparison(&Comparison {
        original: paths.original,
        compared: paths.compared,
        output: paths.output,
        score: result.score,
        percentage: result.percentage(),
        threshold: settings.threshold.value(),
        likely_plagiarized: result.likely_plagiarized,
        original_tokens: original_tokens.len(),
        compared_tokens: compared_tokens.len(),
        shared_tokens: original_tokens.shared_with(&compared_tokens),
    })?;

    sink.deliver(render(&result).as_str()).await?;

    Ok(result)
}

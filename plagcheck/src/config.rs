use crate::args::Args;
use crate::error::{ConfigReadErr, IoErr, Result};
use crate::similarity::Threshold;
use crate::tokens::Normalize;
use log::debug;
use serde::Deserialize;
use snafu::prelude::*;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::read_to_string;
use toml::from_str;
use wordseg::{Kind, Options};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    threshold: Option<f64>,
    segmenter: SegmenterConfig,
    tokens: Normalize,
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    kind: Kind,
    hmm: bool,
    user_dict: Option<PathBuf>,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            kind: Kind::default(),
            hmm: true,
            user_dict: None,
        }
    }
}

/// The effective settings for a run, after CLI overrides.
#[derive(Debug)]
pub struct Settings {
    pub threshold: Threshold,
    pub segmenter: Kind,
    pub segmenter_options: Options,
    pub normalize: Normalize,
}

pub fn from_str_in<P: AsRef<Path>>(s: &str, base_dir: P) -> Result<Config> {
    let mut config: Config = from_str(s).context(ConfigReadErr {})?;
    config.base_dir = base_dir.as_ref().to_path_buf();
    Ok(config)
}

pub async fn from_path<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let s = read_to_string(path).await.context(IoErr { path })?;
    let base_dir = path.parent().unwrap_or(Path::new(""));
    from_str_in(s.as_str(), base_dir)
}

/// Loads the config named on the command line, or the default config file
/// when it exists.
pub async fn load(args: &Args) -> Result<Config> {
    let path = args.config_path();

    match from_path(&path).await {
        Err(crate::error::Error::Io { source, .. })
            if !args.config_is_explicit() && source.kind() == ErrorKind::NotFound =>
        {
            debug!("No config at {}, using defaults", path.display());
            Ok(Config::default())
        }
        result => result,
    }
}

impl Config {
    pub fn resolve(&self, args: &Args) -> Result<Settings> {
        let threshold = match args.threshold.or(self.threshold) {
            Some(value) => Threshold::new(value)?,
            None => Threshold::default(),
        };

        let user_dict = args
            .user_dict
            .clone()
            .or_else(|| self.segmenter.user_dict.as_ref().map(|p| self.base_dir.join(p)));

        Ok(Settings {
            threshold,
            segmenter: args.segmenter.unwrap_or(self.segmenter.kind),
            segmenter_options: Options {
                hmm: self.segmenter.hmm,
                user_dict,
            },
            normalize: self.tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["plagcheck"];
        argv.extend_from_slice(extra);
        Args::parse_from(argv)
    }

    #[test]
    fn empty_config_uses_defaults() {
        let settings = from_str_in("", "").unwrap().resolve(&args(&[])).unwrap();

        assert_eq!(settings.threshold, Threshold::default());
        assert_eq!(settings.segmenter, Kind::Jieba);
        assert!(settings.segmenter_options.hmm);
        assert!(settings.segmenter_options.user_dict.is_none());
        assert_eq!(settings.normalize, Normalize::default());
    }

    #[test]
    fn full_config() {
        let toml = r#"
            threshold = 0.7

            [segmenter]
            kind = "whitespace"
            hmm = false
            user_dict = "dict.txt"

            [tokens]
            lowercase = true
            ignore_punctuation = true
        "#;
        let settings = from_str_in(toml, "/etc/plagcheck")
            .unwrap()
            .resolve(&args(&[]))
            .unwrap();

        assert_eq!(settings.threshold, Threshold::new(0.7).unwrap());
        assert_eq!(settings.segmenter, Kind::Whitespace);
        assert!(!settings.segmenter_options.hmm);
        assert_eq!(
            settings.segmenter_options.user_dict,
            Some(PathBuf::from("/etc/plagcheck/dict.txt"))
        );
        assert!(settings.normalize.lowercase);
        assert!(settings.normalize.ignore_punctuation);
    }

    #[test]
    fn cli_overrides_config() {
        let toml = "threshold = 0.7\n[segmenter]\nkind = \"jieba\"\n";
        let settings = from_str_in(toml, "")
            .unwrap()
            .resolve(&args(&["-t", "0.2", "-s", "whitespace", "--user-dict", "x.txt"]))
            .unwrap();

        assert_eq!(settings.threshold, Threshold::new(0.2).unwrap());
        assert_eq!(settings.segmenter, Kind::Whitespace);
        assert_eq!(
            settings.segmenter_options.user_dict,
            Some(PathBuf::from("x.txt"))
        );
    }

    #[test]
    fn out_of_range_threshold() {
        let config = from_str_in("threshold = 1.5", "").unwrap();
        assert!(config.resolve(&args(&[])).is_err());
    }

    #[test]
    fn malformed_toml() {
        assert!(from_str_in("threshold = \"high\"", "").is_err());
        assert!(from_str_in("[segmenter]\nkind = \"hanlp\"", "").is_err());
    }

    #[tokio::test]
    async fn missing_default_config_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plagcheck.toml");

        let implicit = args(&[]);
        assert!(load(&implicit).await.is_ok());

        let explicit = args(&["-c", path.to_str().unwrap()]);
        assert!(load(&explicit).await.is_err());
    }

    #[tokio::test]
    async fn config_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plagcheck.toml");
        std::fs::write(&path, "threshold = 0.9\n[segmenter]\nuser_dict = \"d.txt\"\n").unwrap();

        let args = args(&["-c", path.to_str().unwrap()]);
        let settings = load(&args).await.unwrap().resolve(&args).unwrap();

        assert_eq!(settings.threshold, Threshold::new(0.9).unwrap());
        assert_eq!(
            settings.segmenter_options.user_dict,
            Some(dir.path().join("d.txt"))
        );
    }
}

use jieba_rs::Jieba as JiebaDict;
use serde::Deserialize;
use std::error;
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug)]
pub struct Error {
    message: String,
    path: String,
}

impl Error {
    pub fn new<M: Into<String>, P: Into<String>>(message: M, path: P) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} - {}", self.message, self.path)
        }
    }
}

impl error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

/// Splits text into word segments. Segments borrow from the input and are
/// returned in the order they appear.
pub trait Segmenter {
    fn segment<'a>(&self, text: &'a str) -> Result<Vec<&'a str>>;
}

/// Splits on runs of Unicode whitespace.
pub struct Whitespace;

impl Segmenter for Whitespace {
    fn segment<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        Ok(text.split_whitespace().collect())
    }
}

/// Chinese word segmentation backed by jieba's bundled dictionary.
pub struct Jieba {
    dict: JiebaDict,
    hmm: bool,
}

impl Jieba {
    pub fn new(hmm: bool) -> Self {
        Self {
            dict: JiebaDict::new(),
            hmm,
        }
    }

    /// Extends the bundled dictionary with a user dictionary file. Each line
    /// holds `word [freq] [tag]`.
    pub fn with_user_dict<P: AsRef<Path>>(path: P, hmm: bool) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let file = File::open(path)
            .map_err(|err| Error::new(format!("Unable to open user dictionary: {err}"), &display))?;

        let mut reader = BufReader::new(file);
        let mut dict = JiebaDict::new();
        dict.load_dict(&mut reader)
            .map_err(|err| Error::new(format!("Invalid user dictionary: {err}"), &display))?;

        Ok(Self { dict, hmm })
    }
}

impl Segmenter for Jieba {
    fn segment<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        Ok(self.dict.cut(text, self.hmm))
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Whitespace,
    #[default]
    Jieba,
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "whitespace" => Ok(Self::Whitespace),
            "jieba" => Ok(Self::Jieba),
            other => Err(Error::new(
                format!("Unknown segmenter '{other}', expected 'whitespace' or 'jieba'"),
                "",
            )),
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whitespace => write!(f, "whitespace"),
            Self::Jieba => write!(f, "jieba"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Options {
    pub hmm: bool,
    pub user_dict: Option<PathBuf>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            hmm: true,
            user_dict: None,
        }
    }
}

pub fn build(kind: Kind, options: &Options) -> Result<Box<dyn Segmenter>> {
    match kind {
        Kind::Whitespace => Ok(Box::new(Whitespace)),
        Kind::Jieba => match &options.user_dict {
            Some(path) => Ok(Box::new(Jieba::with_user_dict(path, options.hmm)?)),
            None => Ok(Box::new(Jieba::new(options.hmm))),
        },
    }
}

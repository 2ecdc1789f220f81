use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    /// Exact pretty-printed JSON output.
    Json(String),
    /// Substring of the error message.
    Error(String),
}

#[derive(Debug, Clone)]
pub struct Case {
    /// Path relative to the cases directory, without extension.
    pub name: String,
    pub source_path: PathBuf,
    pub source: String,
    pub expectation: Expectation,
    /// Expected unresolved references as `(logical id, location)` pairs.
    pub warnings: Vec<(String, String)>,
}

#[derive(Debug, thiserror::Error)]
pub enum CollectCasesError {
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("failed to walk cases directory: {0}")]
    Glob(#[from] glob::GlobError),
    #[error("failed to read `{}`: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("case `{}` has neither a .json nor an .error file", path.display())]
    MissingExpectation { path: PathBuf },
    #[error("case `{}` has both a .json and an .error file", path.display())]
    AmbiguousExpectation { path: PathBuf },
    #[error("malformed warning line in `{}`: {line:?}", path.display())]
    MalformedWarning { path: PathBuf, line: String },
}

/// Collect every case under `dir`, sorted by name.
pub fn collect_cases(dir: &Path) -> Result<Vec<Case>, CollectCasesError> {
    let pattern = format!("{}/**/*.stf", dir.display());
    let mut cases = Vec::new();
    for entry in glob::glob(&pattern)? {
        let source_path = entry?;
        cases.push(load_case(dir, source_path)?);
    }
    cases.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(cases)
}

fn load_case(dir: &Path, source_path: PathBuf) -> Result<Case, CollectCasesError> {
    let name = source_path
        .strip_prefix(dir)
        .unwrap_or(&source_path)
        .with_extension("")
        .display()
        .to_string();
    let source = read(&source_path)?;

    let json = read_optional(&source_path.with_extension("json"))?;
    let error = read_optional(&source_path.with_extension("error"))?;
    let expectation = match (json, error) {
        (Some(json), None) => Expectation::Json(json.trim_end().to_string()),
        (None, Some(error)) => Expectation::Error(error.trim().to_string()),
        (None, None) => {
            return Err(CollectCasesError::MissingExpectation { path: source_path });
        }
        (Some(_), Some(_)) => {
            return Err(CollectCasesError::AmbiguousExpectation { path: source_path });
        }
    };

    let warnings_path = source_path.with_extension("warnings");
    let warnings = match read_optional(&warnings_path)? {
        Some(text) => parse_warnings(&warnings_path, &text)?,
        None => Vec::new(),
    };

    Ok(Case {
        name,
        source_path,
        source,
        expectation,
        warnings,
    })
}

fn parse_warnings(path: &Path, text: &str) -> Result<Vec<(String, String)>, CollectCasesError> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(' ') {
            Some((id, location)) => Ok((id.to_string(), location.trim().to_string())),
            None => Err(CollectCasesError::MalformedWarning {
                path: path.to_path_buf(),
                line: line.to_string(),
            }),
        })
        .collect()
}

fn read(path: &Path) -> Result<String, CollectCasesError> {
    fs::read_to_string(path).map_err(|source| CollectCasesError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional(path: &Path) -> Result<Option<String>, CollectCasesError> {
    if path.exists() {
        read(path).map(Some)
    } else {
        Ok(None)
    }
}

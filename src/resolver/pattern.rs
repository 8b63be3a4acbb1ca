use crate::error::{PublishError, Result};
use regex::Regex;
use std::fmt;
use std::path::{Path, PathBuf};

/// The only scheme a file declaration may use
pub const FILE_SCHEME: &str = "file";

/// File-name part of a declaration
///
/// Either a plain name, or a regex whose first capture group receives the embedded
/// version (`greenplum-db-(6\..*)-rhel6-x86_64.rpm`). Groups in the suffix must
/// match but are not captured into the version.
#[derive(Debug, Clone)]
pub enum NamePattern {
    Literal(String),
    Captured {
        prefix: String,
        capture: String,
        suffix: String,
        regex: Regex,
    },
}

impl NamePattern {
    /// Split a file-name pattern around its capture group and compile it
    pub fn parse(name: &str) -> Result<Self> {
        let (open, close) = match find_capture_group(name)? {
            Some(span) => span,
            None => return Ok(NamePattern::Literal(name.to_string())),
        };

        let prefix = &name[..open];
        let capture = &name[open + 1..close];
        let suffix = &name[close + 1..];

        let regex = Regex::new(&format!("^{}({}){}$", prefix, capture, suffix)).map_err(|e| {
            PublishError::resolution(format!("Invalid file name pattern '{}': {}", name, e))
        })?;

        Ok(NamePattern::Captured {
            prefix: prefix.to_string(),
            capture: capture.to_string(),
            suffix: suffix.to_string(),
            regex,
        })
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, NamePattern::Literal(_))
    }

    /// Captured text when `file_name` matches the whole pattern
    ///
    /// A literal pattern matches only its own name and captures nothing.
    pub fn match_name<'a>(&self, file_name: &'a str) -> Option<Option<&'a str>> {
        match self {
            NamePattern::Literal(name) => (name == file_name).then_some(None),
            NamePattern::Captured { regex, .. } => regex
                .captures(file_name)
                .map(|caps| caps.get(1).map(|m| m.as_str())),
        }
    }
}

impl fmt::Display for NamePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamePattern::Literal(name) => write!(f, "{}", name),
            NamePattern::Captured {
                prefix,
                capture,
                suffix,
                ..
            } => write!(f, "{}({}){}", prefix, capture, suffix),
        }
    }
}

/// Parsed `file://host/dir/name` declaration
#[derive(Debug, Clone)]
pub struct FilePattern {
    raw: String,
    directories: Vec<String>,
    name: NamePattern,
}

impl FilePattern {
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let (scheme, location) = trimmed.split_once("://").ok_or_else(|| {
            PublishError::resolution(format!(
                "Malformed file pattern '{}': expected scheme://path",
                raw
            ))
        })?;

        if scheme != FILE_SCHEME {
            return Err(PublishError::resolution(format!(
                "Unsupported scheme '{}' in '{}', only {}:// is supported",
                scheme, raw, FILE_SCHEME
            )));
        }

        let mut segments: Vec<&str> = location.split('/').filter(|s| !s.is_empty()).collect();
        let name = segments.pop().ok_or_else(|| {
            PublishError::resolution(format!("Malformed file pattern '{}': empty path", raw))
        })?;

        for segment in &segments {
            if find_capture_group(segment)?.is_some() {
                return Err(PublishError::resolution(format!(
                    "Capture group in directory '{}' of '{}', only the file name may capture",
                    segment, raw
                )));
            }
        }

        Ok(FilePattern {
            raw: trimmed.to_string(),
            directories: segments.into_iter().map(str::to_string).collect(),
            name: NamePattern::parse(name)?,
        })
    }

    pub fn name(&self) -> &NamePattern {
        &self.name
    }

    pub fn directories(&self) -> &[String] {
        &self.directories
    }

    /// Directory the file is expected in, rooted at `search_path`
    pub fn directory(&self, search_path: &Path) -> PathBuf {
        let mut dir = root(search_path);
        for segment in &self.directories {
            dir.push(segment);
        }
        dir
    }

    /// Full local path of a literal pattern, or the directory-qualified pattern text
    pub fn local_path(&self, search_path: &Path) -> PathBuf {
        self.directory(search_path).join(self.name.to_string())
    }
}

impl fmt::Display for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// "" and "." both mean the working directory and leave paths relative
fn root(search_path: &Path) -> PathBuf {
    if search_path.as_os_str().is_empty() || search_path == Path::new(".") {
        PathBuf::new()
    } else {
        search_path.to_path_buf()
    }
}

/// Byte span of the first capturing group's parentheses
///
/// Escaped parentheses, parentheses inside character classes and non-capturing
/// `(?...)` groups are skipped.
fn find_capture_group(pattern: &str) -> Result<Option<(usize, usize)>> {
    let bytes = pattern.as_bytes();
    let mut escaped = false;
    let mut in_class = false;
    let mut depth = 0usize;
    let mut open = None;

    for (i, &b) in bytes.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match b {
            b'\\' => escaped = true,
            b'[' if !in_class => in_class = true,
            b']' if in_class => in_class = false,
            _ if in_class => {}
            b'(' => {
                if open.is_some() {
                    depth += 1;
                } else if bytes.get(i + 1) != Some(&b'?') {
                    open = Some(i);
                }
            }
            b')' => {
                if let Some(start) = open {
                    if depth == 0 {
                        return Ok(Some((start, i)));
                    }
                    depth -= 1;
                }
            }
            _ => {}
        }
    }

    match open {
        Some(_) => Err(PublishError::resolution(format!(
            "Unbalanced capture group in '{}'",
            pattern
        ))),
        None => Ok(None),
    }
}

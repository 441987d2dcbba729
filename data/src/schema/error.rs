use super::*;
use num_bigint::BigUint;
use thiserror::Error;

/// One step on the path from a schema's root to the value that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A named struct field
    Field(String),
    /// An array or tuple element
    Index(usize),
    /// The key of the n-th map entry
    Key(usize),
    /// The value of the n-th map entry
    Value(usize),
    /// The alternative selected by a union's constructor index
    Variant(usize),
}

impl From<&str> for Segment {
    fn from(value: &str) -> Self {
        Segment::Field(value.to_string())
    }
}

impl From<String> for Segment {
    fn from(value: String) -> Self {
        Segment::Field(value)
    }
}

impl core::fmt::Display for Segment {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Segment::Field(name) => f.write_str(name),
            Segment::Index(idx) => write!(f, "[{idx}]"),
            Segment::Key(idx) => write!(f, "[{idx}].key"),
            Segment::Value(idx) => write!(f, "[{idx}].value"),
            Segment::Variant(idx) => write!(f, "#{idx}"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("expected {expected}, found {found}")]
    Mismatch {
        expected: String,
        found: &'static str,
    },

    #[error("{schema} expects constructor index {expected}, found {found}")]
    ConstrIndex {
        schema: String,
        expected: u64,
        found: BigUint,
    },

    #[error("{schema} expects {expected} fields, found {found}")]
    Arity {
        schema: String,
        expected: usize,
        found: usize,
    },

    #[error("Constructor index {index} is out of range for {schema}, which has {len} alternatives")]
    IndexOutOfRange {
        schema: String,
        index: BigUint,
        len: usize,
    },

    #[error("{value} is not one of {schema}")]
    UnknownLiteral { schema: String, value: String },

    #[error("No alternative of {schema} accepts a {found}")]
    NoMatchingVariant {
        schema: String,
        found: &'static str,
    },

    #[error("Missing field {0}")]
    MissingField(String),

    #[error("Unexpected field {0}")]
    UnexpectedField(String),

    #[error("Field {0} appears more than once")]
    DuplicateField(String),

    #[error(transparent)]
    InvalidData(#[from] data::Error),

    #[error("{}", describe_field(.segment, .source))]
    InvalidField {
        segment: Segment,
        source: Box<Error>,
    },
}

fn describe_field(segment: &Segment, source: &Error) -> String {
    let mut segments = vec![segment];
    segments.extend(source.segments());
    format!("{}: {}", render_path(&segments), source.root_cause())
}

fn render_path(segments: &[&Segment]) -> String {
    let mut path = String::new();
    for segment in segments {
        if matches!(segment, Segment::Field(_)) && !path.is_empty() {
            path.push('.');
        }
        path.push_str(&segment.to_string());
    }
    path
}

impl Error {
    /// The segments leading to the innermost error, outermost first
    pub fn segments(&self) -> Vec<&Segment> {
        let mut segments = Vec::new();
        let mut e = self;
        while let Error::InvalidField { segment, source } = e {
            segments.push(segment);
            e = source.as_ref();
        }
        segments
    }

    /// The breadcrumb trail to the failing value, e.g. `tokens[1].policyId`.
    ///
    /// Empty if the error occurred at the root.
    pub fn path(&self) -> String {
        render_path(&self.segments())
    }

    /// The error with all path information stripped
    pub fn root_cause(&self) -> &Error {
        let mut e = self;
        while let Error::InvalidField { source, .. } = e {
            e = source.as_ref();
        }
        e
    }
}

/// A trait for wrapping errors with the path segment at which they occurred.
pub trait CaptureFieldErr<T> {
    fn map_field_err(self, segment: impl Into<Segment>) -> Result<T, Error>;
}

impl<T, E: Into<Error>> CaptureFieldErr<T> for core::result::Result<T, E> {
    fn map_field_err(self, segment: impl Into<Segment>) -> Result<T, Error> {
        self.map_err(|e| Error::InvalidField {
            segment: segment.into(),
            source: Box::new(e.into()),
        })
    }
}

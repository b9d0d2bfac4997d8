//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages.

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt::Debug, io, ops::Range};

#[cfg(test)]
extern crate self as dfx_error;

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can occur during some operation.
pub trait ErrorKind: Debug + Send {
    /// Returns the error as a [`dyn Any`](Any), so that the concrete kind can be recovered with
    /// [`downcast_ref`](Any::downcast_ref).
    fn as_any(&self) -> &dyn Any;

    /// Builds the report for this error.
    ///
    /// Errors that are not associated with any source code (such as those produced while
    /// manipulating an expression) are given an empty `spans` slice. The report then points at
    /// the start of the source and has no labels.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that is not associated with any region of the source code.
    pub fn spanless(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// Returns the concrete kind of this error if it is of type `T`.
    pub fn downcast_ref<T: ErrorKind + 'static>(&self) -> Option<&T> {
        self.kind.as_any().downcast_ref::<T>()
    }

    /// Returns true if the kind of this error is of type `T`.
    pub fn is<T: ErrorKind + 'static>(&self) -> bool {
        self.downcast_ref::<T>().is_some()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Report this error to stderr.
    ///
    /// The `ariadne` crate's [`Report`] type actually does not have a `Display` implementation, so
    /// we can only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, src_id: &str, input: &str) -> io::Result<()> {
        let report = self.build_report(src_id);
        report.eprint((src_id, Source::from(input)))
    }

    /// Writes this error's report to the given writer. Colors are included in the output.
    pub fn write_report<W: io::Write>(&self, src_id: &str, input: &str, w: W) -> io::Result<()> {
        let report = self.build_report(src_id);
        report.write((src_id, Source::from(input)), w)
    }
}

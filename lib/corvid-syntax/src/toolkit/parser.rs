use crate::toolkit::error::{TurtleParseError, TurtleSyntaxError, TurtleSyntaxErrorKind};
use crate::toolkit::lexer::{Lexer, TokenOrLineJump, TokenRecognizer};
use std::io::Read;
use std::ops::Deref;
#[cfg(feature = "async-tokio")]
use tokio::io::AsyncRead;

/// Builds a recursive-descent recognizer driven by a [`Lexer`].
///
/// A `RuleRecognizer` is consumed and rebuilt on every token: `recognize_next` takes `self` by
/// value and returns the next state, mirroring the shift/reduce steps of the grammar it encodes.
pub trait RuleRecognizer: Sized {
    type TokenRecognizer: TokenRecognizer;
    type Output;
    type Context;

    fn error_recovery_state(self) -> Self;

    fn recognize_next(
        self,
        token: TokenOrLineJump<<Self::TokenRecognizer as TokenRecognizer>::Token<'_>>,
        context: &mut Self::Context,
        results: &mut Vec<Self::Output>,
        errors: &mut Vec<RuleRecognizerError>,
    ) -> Self;

    fn recognize_end(
        self,
        context: &mut Self::Context,
        results: &mut Vec<Self::Output>,
        errors: &mut Vec<RuleRecognizerError>,
    );

    fn lexer_options(
        context: &Self::Context,
    ) -> &<Self::TokenRecognizer as TokenRecognizer>::Options;
}

pub struct RuleRecognizerError {
    pub message: String,
    pub kind: TurtleSyntaxErrorKind,
}

impl RuleRecognizerError {
    /// Tags this error as belonging to `kind` instead of the default `BadSyntax`.
    #[must_use]
    pub fn with_kind(kind: TurtleSyntaxErrorKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

impl<S: Into<String>> From<S> for RuleRecognizerError {
    fn from(message: S) -> Self {
        Self {
            message: message.into(),
            kind: TurtleSyntaxErrorKind::default(),
        }
    }
}

/// A parser state, generic over its underlying byte source the same way [`Lexer`] is:
/// a growable `Vec<u8>` buffer fed incrementally, or a borrowed slice holding the whole input.
pub struct Parser<B, RR: RuleRecognizer> {
    lexer: Lexer<B, RR::TokenRecognizer>,
    state: Option<RR>,
    pub(crate) context: RR::Context,
    results: Vec<RR::Output>,
    errors: Vec<RuleRecognizerError>,
}

impl<B, RR: RuleRecognizer> Parser<B, RR> {
    pub(crate) fn new(
        lexer: Lexer<B, RR::TokenRecognizer>,
        recognizer: RR,
        context: RR::Context,
    ) -> Self {
        Self {
            lexer,
            state: Some(recognizer),
            context,
            results: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Returns if the parsing is finished i.e. further calls to `parse_next` are always going to return `None`.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.state.is_none() && self.results.is_empty() && self.errors.is_empty()
    }
}

impl<B: Deref<Target = [u8]>, RR: RuleRecognizer> Parser<B, RR> {
    /// Attempt to parse a new value from the already provided data.
    ///
    /// Returns `None` if the parsing is finished or more data is required.
    pub fn parse_next(&mut self) -> Option<Result<RR::Output, TurtleSyntaxError>> {
        loop {
            if let Some(error) = self.errors.pop() {
                return Some(Err(TurtleSyntaxError::with_kind(
                    self.lexer.last_token_location(),
                    error.kind,
                    error.message.replace("TOKEN", &self.lexer.last_token_source()),
                )));
            }
            if let Some(result) = self.results.pop() {
                return Some(Ok(result));
            }
            if let Some(result) = self
                .lexer
                .parse_next(RR::lexer_options(&self.context))
            {
                match result {
                    Ok(token) => {
                        self.state = self.state.take().map(|state| {
                            state.recognize_next(
                                token,
                                &mut self.context,
                                &mut self.results,
                                &mut self.errors,
                            )
                        });
                        continue;
                    }
                    Err(e) => {
                        self.state = self.state.take().map(RR::error_recovery_state);
                        return Some(Err(e));
                    }
                }
            }
            if self.lexer.is_end() {
                let Some(state) = self.state.take() else {
                    return None;
                };
                state.recognize_end(&mut self.context, &mut self.results, &mut self.errors);
            } else {
                return None;
            }
        }
    }
}

impl<RR: RuleRecognizer> Parser<Vec<u8>, RR> {
    /// Adds some extra bytes to the parser. Should be called when [`parse_next`](Self::parse_next) returns [`None`] and there is still unread data.
    pub fn extend_from_slice(&mut self, other: &[u8]) {
        self.lexer.extend_from_slice(other)
    }

    /// Tell the parser that the file is finished.
    #[inline]
    pub fn end(&mut self) {
        self.lexer.end()
    }

    /// Parses from a [`Read`] implementation, pulling more bytes in as needed.
    pub fn for_reader<R: Read>(self, read: R) -> ReaderIterator<R, RR> {
        ReaderIterator { read, parser: self }
    }

    /// Parses from a Tokio [`AsyncRead`] implementation, pulling more bytes in as needed.
    #[cfg(feature = "async-tokio")]
    pub fn for_tokio_async_reader<R: AsyncRead + Unpin>(
        self,
        read: R,
    ) -> TokioAsyncReaderIterator<R, RR> {
        TokioAsyncReaderIterator { read, parser: self }
    }
}

impl<'a, RR: RuleRecognizer> IntoIterator for Parser<&'a [u8], RR> {
    type Item = Result<RR::Output, TurtleSyntaxError>;
    type IntoIter = SliceIterator<'a, RR>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        SliceIterator { parser: self }
    }
}

/// Parses all the values held by a byte slice.
///
/// Built from [`Parser::into_iter`] when the underlying buffer is a borrowed slice.
pub struct SliceIterator<'a, RR: RuleRecognizer> {
    pub(crate) parser: Parser<&'a [u8], RR>,
}

impl<RR: RuleRecognizer> Iterator for SliceIterator<'_, RR> {
    type Item = Result<RR::Output, TurtleSyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.parser.parse_next()
    }
}

/// Parses all the values held by a [`Read`] implementation.
///
/// Built from [`Parser::for_reader`].
pub struct ReaderIterator<R: Read, RR: RuleRecognizer> {
    read: R,
    pub(crate) parser: Parser<Vec<u8>, RR>,
}

impl<R: Read, RR: RuleRecognizer> Iterator for ReaderIterator<R, RR> {
    type Item = Result<RR::Output, TurtleParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.parser.is_end() {
            if let Some(result) = self.parser.parse_next() {
                return Some(result.map_err(TurtleParseError::Syntax));
            }
            if let Err(e) = self.parser.lexer.extend_from_reader(&mut self.read) {
                return Some(Err(e.into()));
            }
        }
        None
    }
}

/// Parses all the values held by a Tokio [`AsyncRead`] implementation.
///
/// Built from [`Parser::for_tokio_async_reader`].
#[cfg(feature = "async-tokio")]
pub struct TokioAsyncReaderIterator<R: AsyncRead + Unpin, RR: RuleRecognizer> {
    read: R,
    pub(crate) parser: Parser<Vec<u8>, RR>,
}

#[cfg(feature = "async-tokio")]
impl<R: AsyncRead + Unpin, RR: RuleRecognizer> TokioAsyncReaderIterator<R, RR> {
    pub async fn next(&mut self) -> Option<Result<RR::Output, TurtleParseError>> {
        while !self.parser.is_end() {
            if let Some(result) = self.parser.parse_next() {
                return Some(result.map_err(TurtleParseError::Syntax));
            }
            if let Err(e) = self
                .parser
                .lexer
                .extend_from_tokio_async_read(&mut self.read)
                .await
            {
                return Some(Err(e.into()));
            }
        }
        None
    }
}

//! The xCard reader entry point.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::ops::ControlFlow;
use std::path::Path;

use quick_xml::NsReader;
use xcard_core::config::ReaderConfig;

use super::error::XCardResult;
use super::fragment::XmlFragment;
use super::handler::Dispatcher;
use super::scribe::{PropertyScribe, ScribeIndex};
use super::source;
use super::warnings::ParseWarning;
use crate::rfc::vcard::core::VCard;

/// Receives each card as soon as its `</vcard>` is read.
///
/// Return [`ControlFlow::Break`] to stop reading; the reader then returns
/// `Ok(())` without looking at the rest of the input.
pub trait CardListener {
    fn card_read(&mut self, card: VCard, warnings: Vec<ParseWarning>) -> ControlFlow<()>;
}

impl<F> CardListener for F
where
    F: FnMut(VCard, Vec<ParseWarning>) -> ControlFlow<()>,
{
    fn card_read(&mut self, card: VCard, warnings: Vec<ParseWarning>) -> ControlFlow<()> {
        self(card, warnings)
    }
}

enum Input<'a> {
    Xml(Box<NsReader<Box<dyn BufRead + 'a>>>),
    Tree(XmlFragment),
}

/// Streaming reader for xCard documents (RFC 6351).
///
/// ## Summary
/// Cards are decoded one at a time and handed to a [`CardListener`] along
/// with the warnings raised while reading them. Property elements are
/// decoded by the scribes in the reader's [`ScribeIndex`]; anything the
/// index does not know is kept as raw XML.
///
/// Reading consumes the reader, so each input is read once.
pub struct XCardReader<'a> {
    input: Input<'a>,
    scribes: ScribeIndex,
}

impl<'a> XCardReader<'a> {
    /// Reads from a string.
    #[must_use]
    pub fn from_xml(xml: &'a str) -> Self {
        Self::from_buf_read(xml.as_bytes())
    }

    /// Reads from a byte stream.
    #[must_use]
    pub fn from_reader(reader: impl Read + 'a) -> Self {
        Self::from_buf_read(BufReader::new(reader))
    }

    fn from_buf_read(reader: impl BufRead + 'a) -> Self {
        let reader: Box<dyn BufRead + 'a> = Box::new(reader);
        Self {
            input: Input::Xml(Box::new(NsReader::from_reader(reader))),
            scribes: ScribeIndex::new(),
        }
    }

    /// Adds or replaces a scribe, returning the one it replaced.
    pub fn register_scribe(
        &mut self,
        scribe: impl PropertyScribe + 'static,
    ) -> Option<Box<dyn PropertyScribe>> {
        self.scribes.register(Box::new(scribe))
    }

    #[must_use]
    pub fn scribe_index(&self) -> &ScribeIndex {
        &self.scribes
    }

    pub fn scribe_index_mut(&mut self) -> &mut ScribeIndex {
        &mut self.scribes
    }

    /// Replaces the whole scribe index.
    pub fn set_scribe_index(&mut self, scribes: ScribeIndex) {
        self.scribes = scribes;
    }

    /// Reads the input, calling `listener` once per card in document order.
    ///
    /// ## Errors
    /// Returns an error if the input is not well-formed XML or cannot be
    /// read. Cards completed before the error have already been delivered.
    /// Problems with individual properties are reported as warnings, never
    /// as errors.
    #[tracing::instrument(skip_all, fields(scribes = self.scribes.len()))]
    pub fn read<L: CardListener + ?Sized>(self, listener: &mut L) -> XCardResult<()> {
        let Self { input, scribes } = self;
        let mut dispatcher = Dispatcher::new(&scribes, listener);
        match input {
            Input::Xml(mut reader) => source::stream_xml(&mut *reader, &mut dispatcher),
            Input::Tree(fragment) => {
                if source::replay(fragment.root(), &mut dispatcher).is_break() {
                    tracing::debug!("Stopped before end of tree");
                }
                Ok(())
            }
        }
    }

    /// Reads the input with a closure as the listener.
    ///
    /// ## Errors
    /// See [`read`](Self::read).
    pub fn read_with(
        self,
        mut listener: impl FnMut(VCard, Vec<ParseWarning>) -> ControlFlow<()>,
    ) -> XCardResult<()> {
        self.read(&mut listener)
    }

    /// Reads every card in the input.
    ///
    /// ## Errors
    /// See [`read`](Self::read).
    pub fn read_all(self) -> XCardResult<Vec<(VCard, Vec<ParseWarning>)>> {
        let mut cards = Vec::new();
        self.read_with(|card, warnings| {
            cards.push((card, warnings));
            ControlFlow::Continue(())
        })?;
        Ok(cards)
    }

    /// Reads cards until the input ends, the listener stops, or the card
    /// limit in `config` is reached. Returns the number of cards delivered.
    ///
    /// ## Errors
    /// See [`read`](Self::read).
    pub fn read_limited<L: CardListener + ?Sized>(
        self,
        config: &ReaderConfig,
        listener: &mut L,
    ) -> XCardResult<usize> {
        let mut delivered = 0;
        self.read_with(|card, warnings| {
            delivered += 1;
            if listener.card_read(card, warnings).is_break() || config.limit_reached(delivered) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        })?;
        Ok(delivered)
    }
}

impl XCardReader<'static> {
    /// Reads from a file.
    ///
    /// ## Errors
    /// Returns an error if the file cannot be opened.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        Ok(Self::from_reader(File::open(path)?))
    }

    /// Reads from an in-memory tree whose root is the document element.
    #[must_use]
    pub fn from_fragment(fragment: XmlFragment) -> Self {
        Self {
            input: Input::Tree(fragment),
            scribes: ScribeIndex::new(),
        }
    }
}

impl std::fmt::Debug for XCardReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let input = match self.input {
            Input::Xml(_) => "xml",
            Input::Tree(_) => "tree",
        };
        f.debug_struct("XCardReader")
            .field("input", &input)
            .field("scribes", &self.scribes)
            .finish()
    }
}

//! Plain-text rendering of cards as they are read.

use std::io::{self, Write};
use std::ops::ControlFlow;

use xcard_rfc::rfc::vcard::{VCard, VCardProperty};
use xcard_rfc::rfc::xcard::{CardListener, ParseWarning};

/// Writes one block per card: a summary line, one line per property, and
/// optionally the card's warnings.
///
/// ```text
/// card 1: version 4.0, 2 properties
///   FN: John Doe
///   home.TEL;TYPE=voice: tel:+1-555-555-1234
/// ```
///
/// A write failure stops reading; it is kept until [`take_error`](Self::take_error).
#[derive(Debug)]
pub struct CardPrinter<W> {
    out: W,
    show_warnings: bool,
    cards: usize,
    error: Option<io::Error>,
}

impl<W: Write> CardPrinter<W> {
    #[must_use]
    pub fn new(out: W, show_warnings: bool) -> Self {
        Self {
            out,
            show_warnings,
            cards: 0,
            error: None,
        }
    }

    /// Number of cards printed so far.
    #[must_use]
    pub fn cards(&self) -> usize {
        self.cards
    }

    /// Clears and returns the write error that stopped the last read.
    ///
    /// ## Errors
    /// Returns the stored error, if there is one.
    pub fn take_error(&mut self) -> io::Result<()> {
        self.error.take().map_or(Ok(()), Err)
    }

    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_card(&mut self, card: &VCard, warnings: &[ParseWarning]) -> io::Result<()> {
        writeln!(
            self.out,
            "card {}: version {}, {} properties",
            self.cards,
            card.version,
            card.len()
        )?;
        for property in &card.properties {
            writeln!(self.out, "  {}", property_line(property))?;
        }
        if self.show_warnings {
            for warning in warnings {
                writeln!(self.out, "  warning: {warning}")?;
            }
        }
        Ok(())
    }
}

impl<W: Write> CardListener for CardPrinter<W> {
    fn card_read(&mut self, card: VCard, warnings: Vec<ParseWarning>) -> ControlFlow<()> {
        self.cards += 1;
        match self.write_card(&card, &warnings) {
            Ok(()) => ControlFlow::Continue(()),
            Err(err) => {
                tracing::error!(error = %err, "Failed to write card");
                self.error = Some(err);
                ControlFlow::Break(())
            }
        }
    }
}

fn property_line(property: &VCardProperty) -> String {
    let mut line = String::new();
    if let Some(group) = &property.group {
        line.push_str(group);
        line.push('.');
    }
    line.push_str(&property.name);
    if !property.params.is_empty() {
        line.push(';');
        line.push_str(&property.params.to_string());
    }
    line.push_str(": ");
    line.push_str(&property.value.to_string());
    line
}

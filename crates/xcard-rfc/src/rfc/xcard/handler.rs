//! Event dispatch: turns element events into cards.
//!
//! The [`Dispatcher`] is fed start/text/end events by an input adapter and
//! keeps the reader's position in two places: the [`Hierarchy`] of open
//! elements, and a [`State`] value that owns the card, group and property
//! being built. Each event moves the state out, matches on it, and puts the
//! successor back.

use std::ops::ControlFlow;

use super::error::ScribeError;
use super::fragment::{Attribute, FragmentBuilder, XmlFragment};
use super::hierarchy::Hierarchy;
use super::namespace::QName;
use super::namespace::elements::{group, parameters, vcard, vcards};
use super::parameters::ParameterCollector;
use super::reader::CardListener;
use super::scribe::{ScribeIndex, ScribeOutput};
use super::warnings::{ParseWarning, ParseWarnings, WarningCode};
use crate::rfc::vcard::core::{VCard, VCardParameters, VCardVersion};

/// Receiver of element events, in document order.
pub(crate) trait ContentSink {
    /// An element opened. Namespace declarations are not attributes.
    fn start_element(&mut self, name: QName, attributes: Vec<Attribute>);

    /// A run of character data. May be called several times in a row.
    fn characters(&mut self, text: &str);

    /// The innermost open element closed.
    ///
    /// Returning [`ControlFlow::Break`] asks the source to stop producing
    /// events.
    fn end_element(&mut self) -> ControlFlow<()>;
}

#[derive(Debug, Default)]
enum State {
    /// Outside `<vcards>`.
    #[default]
    Root,
    /// Inside `<vcards>`, possibly within an ignored non-card element.
    Collection,
    /// Inside a `<vcard>`.
    Card { card: VCard, scope: Scope },
}

#[derive(Debug)]
enum Scope {
    /// Directly in the card.
    Card,
    /// Directly in a `<group>`, with its `name` if it had one.
    Group(Option<String>),
    /// Somewhere inside a property element.
    Property(Box<OpenProperty>),
}

/// Where a property sits, and so where reading resumes once it ends.
#[derive(Debug)]
enum Parent {
    Card,
    Group(Option<String>),
}

impl Parent {
    fn label(&self) -> Option<String> {
        match self {
            Self::Card => None,
            Self::Group(label) => label.clone(),
        }
    }

    fn into_scope(self) -> Scope {
        match self {
            Self::Card => Scope::Card,
            Self::Group(label) => Scope::Group(label),
        }
    }
}

#[derive(Debug)]
struct OpenProperty {
    name: QName,
    /// Path up to and including the property element.
    base: Vec<QName>,
    parent: Parent,
    fragment: FragmentBuilder,
    parameters: ParameterCollector,
}

/// Drives hierarchy tracking, fragment building, parameter collection and
/// scribe dispatch, and hands finished cards to the listener.
pub(crate) struct Dispatcher<'a, L: ?Sized> {
    scribes: &'a ScribeIndex,
    listener: &'a mut L,
    path: Hierarchy,
    text: String,
    warnings: ParseWarnings,
    state: State,
}

impl<'a, L: CardListener + ?Sized> Dispatcher<'a, L> {
    pub(crate) fn new(scribes: &'a ScribeIndex, listener: &'a mut L) -> Self {
        Self {
            scribes,
            listener,
            path: Hierarchy::new(),
            text: String::new(),
            warnings: ParseWarnings::new(),
            state: State::Root,
        }
    }

    fn start_in_card(
        &mut self,
        scope: Scope,
        name: QName,
        attributes: Vec<Attribute>,
        text: &str,
    ) -> Scope {
        match scope {
            Scope::Card if name == group() => {
                let label = attributes
                    .iter()
                    .find(|a| a.name == "name")
                    .map(|a| a.value.clone());
                self.path.push(name);
                Scope::Group(label)
            }
            Scope::Card => self.open_property(Parent::Card, name, attributes),
            Scope::Group(label) => self.open_property(Parent::Group(label), name, attributes),
            Scope::Property(mut property) => {
                if self
                    .path
                    .starts_with_parts(&property.base, &[parameters()])
                {
                    self.path.push(name);
                    let position = self.path.below(property.base.len() + 1);
                    property.parameters.start(position);
                } else if self.path.is(&property.base) && name == parameters() {
                    property.fragment.text(text);
                    self.path.push(name);
                } else {
                    property.fragment.text(text);
                    property.fragment.open(name.clone(), attributes);
                    self.path.push(name);
                }
                Scope::Property(property)
            }
        }
    }

    fn open_property(&mut self, parent: Parent, name: QName, attributes: Vec<Attribute>) -> Scope {
        self.path.push(name.clone());
        Scope::Property(Box::new(OpenProperty {
            base: self.path.as_slice().to_vec(),
            fragment: FragmentBuilder::new(name.clone(), attributes),
            name,
            parent,
            parameters: ParameterCollector::new(),
        }))
    }

    fn end_in_property(&mut self, card: &mut VCard, mut property: Box<OpenProperty>, text: &str) -> Scope {
        if self.path.is(&property.base) {
            property.fragment.text(text);
            self.path.pop();

            let OpenProperty {
                name,
                parent,
                fragment,
                parameters,
                ..
            } = *property;
            self.dispatch(
                card,
                &name,
                &fragment.finish(),
                &parameters.finish(),
                parent.label(),
            );
            parent.into_scope()
        } else if self.path.is_extension_of(&property.base, &[parameters()]) {
            self.path.pop();
            Scope::Property(property)
        } else if self
            .path
            .starts_with_parts(&property.base, &[parameters()])
        {
            let position = self.path.below(property.base.len() + 1);
            property.parameters.end(position, text);
            self.path.pop();
            Scope::Property(property)
        } else {
            property.fragment.text(text);
            property.fragment.close();
            self.path.pop();
            Scope::Property(property)
        }
    }

    /// Decodes one finished property and appends the result to `card`.
    ///
    /// Scribe failures never propagate: they become warnings, and a value
    /// that does not parse is kept as raw XML instead.
    fn dispatch(
        &mut self,
        card: &mut VCard,
        name: &QName,
        fragment: &XmlFragment,
        parameters: &VCardParameters,
        group: Option<String>,
    ) {
        let local = name.local_name();
        let Some(scribe) = self.scribes.get(name) else {
            tracing::trace!(property = %name, "No scribe registered, keeping raw XML");
            let output = self.scribes.raw_xml().keep(fragment, parameters);
            Self::append(card, output, group);
            return;
        };
        tracing::trace!(property = %name, "Dispatching property");

        let output = match scribe.parse_xml(fragment, parameters) {
            Ok(output) => output,
            Err(ScribeError::Skip(reason)) => {
                self.warnings.add(ParseWarning::coded(
                    Some(local),
                    WarningCode::Skipped,
                    Some(&reason),
                ));
                return;
            }
            Err(ScribeError::CannotParse(reason)) => {
                tracing::warn!(property = %name, %reason, "Property could not be parsed, keeping raw XML");
                self.warnings.add(
                    ParseWarning::coded(Some(local), WarningCode::Unparseable, Some(&reason))
                        .with_detail(fragment.to_string()),
                );
                self.scribes.raw_xml().keep(fragment, parameters)
            }
            Err(ScribeError::EmbeddedVCard) => {
                self.warnings.add(ParseWarning::coded(
                    Some(local),
                    WarningCode::EmbeddedVCard,
                    None,
                ));
                return;
            }
        };

        for message in &output.warnings {
            self.warnings.add(ParseWarning::text(Some(local), message.as_str()));
        }
        Self::append(card, output, group);
    }

    fn append(card: &mut VCard, output: ScribeOutput, group: Option<String>) {
        let mut property = output.property;
        property.group = group;
        card.add_property(property);
    }

    fn deliver(&mut self, card: VCard) -> ControlFlow<()> {
        let warnings = self.warnings.take();
        tracing::debug!(
            properties = card.len(),
            warnings = warnings.len(),
            "Card read"
        );
        let flow = self.listener.card_read(card, warnings);
        if flow.is_break() {
            tracing::debug!("Listener requested stop");
        }
        flow
    }
}

impl<L: CardListener + ?Sized> ContentSink for Dispatcher<'_, L> {
    fn start_element(&mut self, name: QName, attributes: Vec<Attribute>) {
        let text = std::mem::take(&mut self.text);
        self.state = match std::mem::take(&mut self.state) {
            State::Root if name == vcards() => {
                self.path.push(name);
                State::Collection
            }
            // Not pushed: elements around `<vcards>` are transparent.
            State::Root => State::Root,
            State::Collection => {
                let opens_card = self.path.is(&[vcards()]) && name == vcard();
                self.path.push(name);
                if opens_card {
                    State::Card {
                        card: VCard::with_version(VCardVersion::V4),
                        scope: Scope::Card,
                    }
                } else {
                    State::Collection
                }
            }
            State::Card { card, scope } => {
                let scope = self.start_in_card(scope, name, attributes, &text);
                State::Card { card, scope }
            }
        };
    }

    fn characters(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn end_element(&mut self) -> ControlFlow<()> {
        let text = std::mem::take(&mut self.text);
        let (state, flow) = match std::mem::take(&mut self.state) {
            State::Root => (State::Root, ControlFlow::Continue(())),
            State::Collection => {
                self.path.pop();
                let state = if self.path.is_empty() {
                    State::Root
                } else {
                    State::Collection
                };
                (state, ControlFlow::Continue(()))
            }
            State::Card {
                card,
                scope: Scope::Card,
            } => {
                self.path.pop();
                (State::Collection, self.deliver(card))
            }
            State::Card {
                card,
                scope: Scope::Group(_),
            } => {
                self.path.pop();
                let state = State::Card {
                    card,
                    scope: Scope::Card,
                };
                (state, ControlFlow::Continue(()))
            }
            State::Card {
                mut card,
                scope: Scope::Property(property),
            } => {
                let scope = self.end_in_property(&mut card, property, &text);
                (State::Card { card, scope }, ControlFlow::Continue(()))
            }
        };
        self.state = state;
        flow
    }
}

//! Reader behavior on whole documents.

use std::ops::ControlFlow;

use super::*;
use crate::rfc::vcard::core::{VCard, VCardParameters, VCardValue, VCardVersion};
use crate::rfc::xcard::scribe::{PropertyScribe, ScribeResult};
use xcard_core::config::ReaderConfig;

fn doc(body: &str) -> String {
    format!(r#"<vcards xmlns="{XCARD_NS}">{body}</vcards>"#)
}

fn read(xml: &str) -> Vec<(VCard, Vec<ParseWarning>)> {
    XCardReader::from_xml(xml).read_all().unwrap()
}

fn read_one(xml: &str) -> (VCard, Vec<ParseWarning>) {
    let mut cards = read(xml);
    assert_eq!(cards.len(), 1, "expected exactly one card");
    cards.remove(0)
}

/// Scribe that always fails with the given error.
struct Refusing {
    local_name: &'static str,
    error: ScribeError,
}

impl PropertyScribe for Refusing {
    fn qname(&self) -> QName {
        QName::xcard(self.local_name)
    }

    fn parse_xml(&self, _: &XmlFragment, _: &VCardParameters) -> ScribeResult {
        Err(self.error.clone())
    }
}

#[derive(Default)]
struct Collector {
    names: Vec<Option<String>>,
    stop_after: Option<usize>,
}

impl CardListener for Collector {
    fn card_read(&mut self, card: VCard, _: Vec<ParseWarning>) -> ControlFlow<()> {
        self.names.push(card.formatted_name().map(str::to_owned));
        if self.stop_after == Some(self.names.len()) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }
}

#[test_log::test]
fn single_card_with_formatted_name() {
    let (card, warnings) = read_one(&doc("<vcard><fn><text>John Doe</text></fn></vcard>"));
    assert_eq!(card.version, VCardVersion::V4);
    assert_eq!(card.len(), 1);
    assert_eq!(card.formatted_name(), Some("John Doe"));
    assert!(card.properties[0].group.is_none());
    assert!(warnings.is_empty());
}

#[test_log::test]
fn sibling_cards_arrive_in_order() {
    let mut collector = Collector::default();
    XCardReader::from_xml(&doc(
        "<vcard><fn><text>First</text></fn></vcard>\n<vcard><fn><text>Second</text></fn></vcard>",
    ))
    .read(&mut collector)
    .unwrap();
    assert_eq!(
        collector.names,
        [Some("First".to_owned()), Some("Second".to_owned())]
    );
}

#[test_log::test]
fn group_label_is_applied() {
    let (card, warnings) = read_one(&doc(
        r#"<vcard><group name="home"><tel><uri>tel:+15551234</uri></tel></group><fn><text>X</text></fn></vcard>"#,
    ));
    let tel = card.get_property("TEL").unwrap();
    assert_eq!(tel.group.as_deref(), Some("home"));
    assert_eq!(tel.value, VCardValue::Uri("tel:+15551234".into()));
    assert!(card.get_property("FN").unwrap().group.is_none());
    assert!(warnings.is_empty());
}

#[test_log::test]
fn group_without_name_still_holds_properties() {
    let (card, _) = read_one(&doc(
        "<vcard><group><email><text>a@example.com</text></email></group></vcard>",
    ));
    let email = card.get_property("EMAIL").unwrap();
    assert!(email.group.is_none());
    assert_eq!(email.as_text(), Some("a@example.com"));
}

#[test_log::test]
fn parameters_are_collected() {
    let (card, _) = read_one(&doc(
        "<vcard><fn><parameters><pref><integer>1</integer></pref></parameters><text>X</text></fn></vcard>",
    ));
    let fn_ = card.get_property("FN").unwrap();
    assert_eq!(fn_.params.values("pref"), ["1"]);
    assert_eq!(fn_.pref(), Some(1));
    assert_eq!(fn_.as_text(), Some("X"));
}

#[test_log::test]
fn repeated_parameter_values_are_kept() {
    let (card, _) = read_one(&doc(
        "<vcard><tel><parameters>\
           <type><text>work</text><text>voice</text></type>\
           <type><text>cell</text></type>\
         </parameters><uri>tel:1</uri></tel></vcard>",
    ));
    let tel = card.get_property("TEL").unwrap();
    assert_eq!(tel.params.values("TYPE"), ["work", "voice", "cell"]);
    assert!(tel.has_type("voice"));
    assert_eq!(tel.raw_value, "tel:1");
}

#[test_log::test]
fn indented_parameters_block_closes_cleanly() {
    let (card, warnings) = read_one(&doc(
        r#"<vcard>
      <tel>
        <parameters>
          <type>
            <text>work</text>
          </type>
        </parameters>
        <uri>tel:1</uri>
      </tel>
      <fn><parameters><pref><integer>1</integer></pref></parameters><text>A</text></fn>
    </vcard>"#,
    ));
    let tel = card.get_property("TEL").unwrap();
    assert_eq!(tel.params.len(), 1);
    assert_eq!(tel.params.values("TYPE"), ["work"]);
    assert_eq!(tel.raw_value, "tel:1");
    let fn_ = card.get_property("FN").unwrap();
    assert_eq!(fn_.params.values("PREF"), ["1"]);
    assert_eq!(fn_.as_text(), Some("A"));
    assert!(warnings.is_empty());
}

#[test_log::test]
fn foreign_elements_in_parameters_are_ignored() {
    let (card, _) = read_one(&doc(
        r#"<vcard><tel><parameters>
             <x:type xmlns:x="urn:x"><text>work</text></x:type>
             <type><x:text xmlns:x="urn:x">home</x:text></type>
           </parameters><uri>tel:1</uri></tel></vcard>"#,
    ));
    assert!(card.get_property("TEL").unwrap().params.is_empty());
}

#[test_log::test]
fn unregistered_property_is_kept_as_xml() {
    let markup = r#"<x-pet xmlns="http://example.com/ext" kind="dog">Rex <b>the</b> good</x-pet>"#;
    let (card, warnings) = read_one(&doc(&format!("<vcard>{markup}</vcard>")));

    let xml = card.get_property("XML").unwrap();
    assert_eq!(xml.raw_value, markup);
    let fragment = xml.value.as_xml().unwrap();
    assert_eq!(fragment.root().attribute("kind"), Some("dog"));
    assert_eq!(fragment.root().text(), "Rex the good");
    assert_eq!(XmlFragment::parse(markup).unwrap(), *fragment);
    assert!(warnings.is_empty());
}

#[test_log::test]
fn parameters_stay_out_of_the_fragment() {
    let (card, _) = read_one(&doc(
        "<vcard><x-custom><parameters><pref><integer>2</integer></pref></parameters>\
         <a>1<b>2</b>3</a></x-custom></vcard>",
    ));
    let xml = card.get_property("XML").unwrap();
    assert_eq!(
        xml.raw_value,
        format!(r#"<x-custom xmlns="{XCARD_NS}"><a>1<b>2</b>3</a></x-custom>"#)
    );
    assert_eq!(xml.pref(), Some(2));
}

#[test_log::test]
fn unparseable_value_falls_back_to_xml() {
    let (card, warnings) = read_one(&doc(
        "<vcard><rev><timestamp>yesterday</timestamp></rev><fn><text>X</text></fn></vcard>",
    ));
    let serialized = format!(r#"<rev xmlns="{XCARD_NS}"><timestamp>yesterday</timestamp></rev>"#);

    assert_eq!(warnings.len(), 1);
    let warning = &warnings[0];
    assert_eq!(warning.code, Some(WarningCode::Unparseable));
    assert_eq!(warning.code_number(), Some(33));
    assert_eq!(warning.property.as_deref(), Some("rev"));
    assert!(warning.message.ends_with("invalid timestamp: yesterday"));
    assert_eq!(warning.detail.as_deref(), Some(serialized.as_str()));

    assert!(card.get_property("REV").is_none());
    assert_eq!(card.get_property("XML").unwrap().raw_value, serialized);
    assert_eq!(card.properties[1].name, "FN");
}

#[test_log::test]
fn skipped_property_is_dropped_with_warning() {
    let xml = doc("<vcard><x-secret><text>s</text></x-secret><fn><text>X</text></fn></vcard>");
    let mut reader = XCardReader::from_xml(&xml);
    reader.register_scribe(Refusing {
        local_name: "x-secret",
        error: ScribeError::skip("not shared"),
    });
    let (card, warnings) = reader.read_all().unwrap().remove(0);

    assert_eq!(card.len(), 1);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code_number(), Some(22));
    assert_eq!(warnings[0].property.as_deref(), Some("x-secret"));
    assert!(warnings[0].message.ends_with("not shared"));
}

#[test_log::test]
fn embedded_card_is_dropped_with_warning() {
    let xml = doc("<vcard><agent><vcard><fn><text>Inner</text></fn></vcard></agent></vcard>");
    let mut reader = XCardReader::from_xml(&xml);
    reader.register_scribe(Refusing {
        local_name: "agent",
        error: ScribeError::EmbeddedVCard,
    });
    let (card, warnings) = reader.read_all().unwrap().remove(0);

    assert!(card.is_empty());
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code, Some(WarningCode::EmbeddedVCard));
    assert!(warnings[0].detail.is_none());
}

#[test_log::test]
fn scribe_remarks_become_uncoded_warnings() {
    let cards = read(&doc(
        "<vcard><fn><text>A</text><text>B</text></fn></vcard><vcard><fn><text>C</text></fn></vcard>",
    ));
    let (first, warnings) = &cards[0];
    assert_eq!(first.formatted_name(), Some("A"));
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code, None);
    assert_eq!(warnings[0].property.as_deref(), Some("fn"));
    assert_eq!(warnings[0].message, "1 additional <text> value(s) ignored");

    assert!(cards[1].1.is_empty(), "warnings leak into the next card");
}

#[test_log::test]
fn listener_can_stop_early() {
    let mut collector = Collector {
        stop_after: Some(1),
        ..Collector::default()
    };
    let result = XCardReader::from_xml(&doc(
        "<vcard><fn><text>First</text></fn></vcard><vcard><fn><text>Second</text></fn></vcard>",
    ))
    .read(&mut collector);
    assert!(result.is_ok());
    assert_eq!(collector.names, [Some("First".to_owned())]);
}

#[test_log::test]
fn stopping_skips_malformed_remainder() {
    let mut seen = 0;
    let result = XCardReader::from_xml(&doc("<vcard></vcard><vcard><fn></vcard>"))
        .read_with(|_, _| {
            seen += 1;
            ControlFlow::Break(())
        });
    assert!(result.is_ok());
    assert_eq!(seen, 1);
}

#[test_log::test]
fn malformed_xml_is_fatal_after_delivered_cards() {
    let mut seen = 0;
    let result = XCardReader::from_xml(&doc(
        "<vcard><fn><text>A</text></fn></vcard><vcard><fn></vcard>",
    ))
    .read_with(|_, _| {
        seen += 1;
        ControlFlow::Continue(())
    });
    assert!(matches!(result, Err(XCardError::Xml(_))));
    assert_eq!(seen, 1);
}

#[test_log::test]
fn truncated_card_is_fatal() {
    let xml = format!(r#"<vcards xmlns="{XCARD_NS}"><vcard><fn><text>Cut"#);
    let mut seen = 0;
    let result = XCardReader::from_xml(&xml).read_with(|_, _| {
        seen += 1;
        ControlFlow::Continue(())
    });
    assert!(matches!(result, Err(XCardError::UnexpectedEof { open: 4 })));
    assert_eq!(seen, 0);
}

#[test_log::test]
fn missing_collection_end_is_fatal_after_delivered_card() {
    let xml = format!(r#"<vcards xmlns="{XCARD_NS}"><vcard><fn><text>A</text></fn></vcard>"#);
    let mut names = Vec::new();
    let result = XCardReader::from_xml(&xml).read_with(|card, _| {
        names.push(card.formatted_name().map(str::to_owned));
        ControlFlow::Continue(())
    });
    assert!(matches!(result, Err(XCardError::UnexpectedEof { open: 1 })));
    assert_eq!(names, [Some("A".to_owned())]);
}

#[test_log::test]
fn empty_input_is_fatal() {
    assert!(matches!(
        XCardReader::from_xml("").read_all(),
        Err(XCardError::NoRootElement)
    ));
    assert!(matches!(
        XCardReader::from_reader("  \n".as_bytes()).read_all(),
        Err(XCardError::NoRootElement)
    ));
}

#[test_log::test]
fn bare_vcard_root_is_ignored() {
    let cards = read(&format!(
        r#"<vcard xmlns="{XCARD_NS}"><fn><text>Lonely</text></fn></vcard>"#
    ));
    assert!(cards.is_empty());
}

#[test_log::test]
fn collection_inside_foreign_root_is_read() {
    let cards = read(&format!(
        r#"<envelope xmlns="urn:x"><vcards xmlns="{XCARD_NS}"><vcard><fn><text>Wrapped</text></fn></vcard></vcards></envelope>"#
    ));
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].0.formatted_name(), Some("Wrapped"));
}

#[test_log::test]
fn non_card_children_of_collection_are_ignored() {
    let cards = read(&doc(
        "<extra><vcard><fn><text>Hidden</text></fn></vcard></extra>\
         <vcard><fn><text>Visible</text></fn></vcard>",
    ));
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].0.formatted_name(), Some("Visible"));
}

#[test_log::test]
fn prefixed_document_is_read() {
    let cards = read(&format!(
        r#"<v:vcards xmlns:v="{XCARD_NS}"><v:vcard><v:n><v:surname>Doe</v:surname><v:given>J</v:given></v:n></v:vcard></v:vcards>"#
    ));
    let n = cards[0].0.get_property("N").unwrap();
    let name = n.value.as_structured_name().unwrap();
    assert_eq!(name.family, ["Doe"]);
    assert_eq!(name.given, ["J"]);
}

#[test_log::test]
fn entities_in_values_are_resolved() {
    let (card, _) = read_one(&doc(
        "<vcard><fn><text>Smith &amp; Sons&#x21;</text></fn></vcard>",
    ));
    assert_eq!(card.formatted_name(), Some("Smith & Sons!"));
}

#[test_log::test]
fn tree_input_matches_stream_input() {
    let xml = doc(
        r#"
  <vcard>
    <fn><text>Tree</text></fn>
    <group name="work"><org><text>ABC</text><text>Sales</text></org></group>
    <x-note xmlns="urn:x">kept</x-note>
  </vcard>
"#,
    );
    let from_tree = XCardReader::from_fragment(XmlFragment::parse(&xml).unwrap())
        .read_all()
        .unwrap();
    assert_eq!(from_tree, read(&xml));

    let card = &from_tree[0].0;
    let org = card.get_property("ORG").unwrap();
    assert_eq!(org.group.as_deref(), Some("work"));
    assert_eq!(org.value.as_organization().unwrap().units, ["Sales"]);
}

#[test_log::test]
fn byte_stream_input() {
    let xml = doc("<vcard><bday><date>19960415</date></bday></vcard>");
    let cards = XCardReader::from_reader(xml.as_bytes()).read_all().unwrap();
    let bday = cards[0].0.get_property("BDAY").unwrap();
    assert_eq!(bday.raw_value, "19960415");
}

#[test_log::test]
fn card_limit_stops_reading() {
    let config = ReaderConfig {
        max_cards: Some(2),
        show_warnings: true,
    };
    let mut collector = Collector::default();
    let delivered = XCardReader::from_xml(&doc(
        "<vcard/><vcard><fn><text>B</text></fn></vcard><vcard><fn><text>C</text></fn></vcard>",
    ))
    .read_limited(&config, &mut collector)
    .unwrap();
    assert_eq!(delivered, 2);
    assert_eq!(collector.names, [None, Some("B".to_owned())]);
}

#[test_log::test]
fn replacing_the_index_changes_dispatch() {
    let xml = doc("<vcard><fn><text>X</text></fn></vcard>");
    let mut reader = XCardReader::from_xml(&xml);
    reader.set_scribe_index(scribe::ScribeIndex::empty());
    assert!(reader.scribe_index().is_empty());

    let (card, warnings) = reader.read_all().unwrap().remove(0);
    assert_eq!(card.properties[0].name, "XML");
    assert!(warnings.is_empty());
}

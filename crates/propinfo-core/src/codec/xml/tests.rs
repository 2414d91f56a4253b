use crate::{
    codec::xml::{XmlDocument, XmlElement, XmlError, XmlEvent, XmlReader, XmlStart, check_text, unescape},
    value::Value,
};

fn start(name: &str) -> XmlEvent {
    XmlEvent::Start(XmlStart {
        name: name.to_string(),
        attributes: Vec::new(),
    })
}

fn end(name: &str) -> XmlEvent {
    XmlEvent::End {
        name: name.to_string(),
    }
}

fn drain(reader: &mut XmlReader) -> Result<Vec<XmlEvent>, XmlError> {
    let mut events = Vec::new();
    while let Some(event) = reader.next_event()? {
        events.push(event);
    }

    Ok(events)
}

#[test]
fn reader_emits_nested_events() {
    let mut reader = XmlReader::new("<a><b>hi</b><c/></a>");

    assert_eq!(
        drain(&mut reader).expect("events"),
        vec![
            start("a"),
            start("b"),
            XmlEvent::Text("hi".to_string()),
            end("b"),
            start("c"),
            end("c"),
            end("a"),
        ]
    );
}

#[test]
fn reader_skips_prolog_and_comments() {
    let mut reader = XmlReader::new(
        "<?xml version=\"1.0\"?>\n<!-- header -->\n<a><!-- inner -->x</a>\n",
    );

    assert_eq!(
        drain(&mut reader).expect("events"),
        vec![start("a"), XmlEvent::Text("x".to_string()), end("a")]
    );
}

#[test]
fn reader_decodes_attributes_and_entities() {
    let mut reader = XmlReader::new("<a id='1' note=\"x &amp; y\">&lt;&#65;&#x42;&gt;</a>");

    let Some(XmlEvent::Start(a)) = reader.next_event().expect("start") else {
        panic!("expected start element");
    };
    assert_eq!(a.attribute("id"), Some("1"));
    assert_eq!(a.attribute("note"), Some("x & y"));
    assert_eq!(reader.read_text().expect("text"), "<AB>");
}

#[test]
fn reader_rejects_mismatched_end() {
    let mut reader = XmlReader::new("<a><b></a></b>");

    reader.next_event().expect("a");
    reader.next_event().expect("b");
    assert_eq!(
        reader.next_event(),
        Err(XmlError::MismatchedEnd {
            expected: "b".to_string(),
            found: "a".to_string(),
        })
    );
}

#[test]
fn reader_rejects_truncated_input() {
    let mut reader = XmlReader::new("<a><b>text");

    assert_eq!(drain(&mut reader), Err(XmlError::UnexpectedEof));
}

#[test]
fn reader_rejects_top_level_text() {
    let mut reader = XmlReader::new("junk<a/>");

    assert!(matches!(
        reader.next_event(),
        Err(XmlError::UnexpectedText { .. })
    ));
}

#[test]
fn skip_element_consumes_nested_children() {
    let mut reader = XmlReader::new("<a><skip><x>1</x><y/></skip><keep>2</keep></a>");

    reader.next_element().expect("a");
    let skipped = reader.next_element().expect("skip").expect("element");
    assert_eq!(skipped.name, "skip");
    reader.skip_element().expect("skip body");

    let keep = reader.next_element().expect("keep").expect("element");
    assert_eq!(keep.name, "keep");
    assert_eq!(reader.read_text().expect("text"), "2");
    assert!(reader.next_element().expect("end of a").is_none());
    assert_eq!(reader.depth(), 0);
}

#[test]
fn writer_escapes_text_and_attributes() {
    let element = XmlElement::new("p")
        .with_attribute("title", "\"q\" & 'a'")
        .tap_text("1 < 2 & 3 > 2\u{1}");

    assert_eq!(
        element.to_xml_string(),
        "<p title=\"&quot;q&quot; &amp; &apos;a&apos;\">1 &lt; 2 &amp; 3 &gt; 2&#x1;</p>"
    );
}

#[test]
fn written_text_reads_back_unchanged() {
    let original = "tabs\tnew\nlines & <tags> \u{7} \"quotes\"";
    let mut element = XmlElement::new("t");
    element.push_text(original);

    let mut reader = XmlReader::new(element.to_xml_string());
    reader.next_element().expect("t");
    assert_eq!(reader.read_text().expect("text"), original);
}

#[test]
fn list_values_become_item_children() {
    let mut element = XmlElement::new("tags");
    element.push_value(&Value::List(vec![Value::from("a"), Value::from("b")]));

    assert_eq!(
        element.to_xml_string(),
        "<tags><item>a</item><item>b</item></tags>"
    );
    assert_eq!(element.elements().count(), 2);
}

#[test]
fn null_values_write_nothing() {
    let mut element = XmlElement::new("nick");
    element.push_value(&Value::Null);

    assert_eq!(element.to_xml_string(), "<nick/>");
}

#[test]
fn document_prolog_is_optional() {
    let doc = XmlDocument::new(XmlElement::new("r"));

    assert_eq!(
        doc.to_string(),
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><r/>"
    );
    assert_eq!(doc.with_prolog(false).to_string(), "<r/>");
}

#[test]
fn unknown_entities_are_rejected() {
    assert!(matches!(
        unescape("&nbsp;"),
        Err(XmlError::Entity { entity }) if entity == "nbsp"
    ));
    assert!(matches!(unescape("a & b"), Err(XmlError::Entity { .. })));
}

// small builder helper for the escaping test
trait TapText {
    fn tap_text(self, text: &str) -> Self;
}

impl TapText for XmlElement {
    fn tap_text(mut self, text: &str) -> Self {
        self.push_text(text);
        self
    }
}

#[test]
fn check_text_follows_the_xml_char_range() {
    assert!(check_text("tab\tnewline\ncr\r snowman \u{2603} \u{1f600}").is_ok());
    assert_eq!(check_text("a\u{0}b"), Err(XmlError::InvalidChar { code: 0 }));
    assert_eq!(check_text("\u{1b}"), Err(XmlError::InvalidChar { code: 0x1b }));
    assert_eq!(check_text("\u{fffe}"), Err(XmlError::InvalidChar { code: 0xfffe }));
}

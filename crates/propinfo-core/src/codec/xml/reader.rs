use crate::codec::xml::{XmlError, unescape};
use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_till, take_till1, take_until, take_while1},
    character::complete::{char, multispace0, multispace1},
    multi::many0,
    sequence::{delimited, preceded, separated_pair},
};

///
/// XmlStart
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct XmlStart {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl XmlStart {
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

///
/// XmlEvent
///
/// Self-closing elements produce a `Start` immediately followed by `End`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum XmlEvent {
    Start(XmlStart),
    End { name: String },
    Text(String),
}

///
/// XmlReader
///
/// Pull reader over one XML document. Prologs, processing instructions and
/// comments are skipped; end tags are checked against the open element
/// stack.
///

#[derive(Debug)]
pub struct XmlReader {
    input: String,
    pos: usize,
    stack: Vec<String>,
    pending_end: Option<String>,
}

impl XmlReader {
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            pos: 0,
            stack: Vec::new(),
            pending_end: None,
        }
    }

    /// Number of currently open elements.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Next event, or `None` once the document is fully consumed.
    pub fn next_event(&mut self) -> Result<Option<XmlEvent>, XmlError> {
        if let Some(name) = self.pending_end.take() {
            self.stack.pop();
            return Ok(Some(XmlEvent::End { name }));
        }

        loop {
            let rest = &self.input[self.pos..];
            if rest.is_empty() {
                return if self.stack.is_empty() {
                    Ok(None)
                } else {
                    Err(XmlError::UnexpectedEof)
                };
            }

            let syntax = XmlError::Syntax { offset: self.pos };

            if rest.starts_with("<?") || rest.starts_with("<!--") {
                let (remaining, ()) = alt((skip(processing_instruction), skip(comment)))(rest)
                    .map_err(|_| syntax)?;
                self.pos += rest.len() - remaining.len();
                continue;
            }

            if rest.starts_with("</") {
                let (remaining, name) = end_tag(rest).map_err(|_| syntax)?;
                let name = name.to_string();
                self.pos += rest.len() - remaining.len();

                return match self.stack.pop() {
                    Some(open) if open == name => Ok(Some(XmlEvent::End { name })),
                    Some(open) => Err(XmlError::MismatchedEnd {
                        expected: open,
                        found: name,
                    }),
                    None => Err(XmlError::UnbalancedEnd { found: name }),
                };
            }

            if rest.starts_with('<') {
                let (remaining, (name, raw_attributes, self_closing)) =
                    start_tag(rest).map_err(|_| syntax)?;

                let mut attributes = Vec::with_capacity(raw_attributes.len());
                for (key, value) in raw_attributes {
                    attributes.push((key.to_string(), unescape(value)?.into_owned()));
                }
                let name = name.to_string();
                self.pos += rest.len() - remaining.len();

                self.stack.push(name.clone());
                if self_closing {
                    self.pending_end = Some(name.clone());
                }

                return Ok(Some(XmlEvent::Start(XmlStart { name, attributes })));
            }

            let (remaining, raw) = text(rest).map_err(|_| syntax)?;
            let at_top_level = self.stack.is_empty();
            let text = if at_top_level {
                None
            } else {
                Some(unescape(raw)?.into_owned())
            };

            if at_top_level && !raw.trim().is_empty() {
                return Err(XmlError::UnexpectedText {
                    text: raw.trim().to_string(),
                });
            }
            self.pos += rest.len() - remaining.len();

            if let Some(text) = text {
                return Ok(Some(XmlEvent::Text(text)));
            }
        }
    }

    /// Next child element of the current element, skipping whitespace.
    ///
    /// Returns `None` after consuming the current element's end tag, or at
    /// the end of the document.
    pub fn next_element(&mut self) -> Result<Option<XmlStart>, XmlError> {
        loop {
            match self.next_event()? {
                Some(XmlEvent::Start(start)) => return Ok(Some(start)),
                Some(XmlEvent::End { .. }) | None => return Ok(None),
                Some(XmlEvent::Text(text)) if text.trim().is_empty() => {}
                Some(XmlEvent::Text(text)) => {
                    return Err(XmlError::UnexpectedText { text });
                }
            }
        }
    }

    /// Text content of the current element, through its end tag.
    pub fn read_text(&mut self) -> Result<String, XmlError> {
        let mut out = String::new();

        loop {
            match self.next_event()? {
                Some(XmlEvent::Text(text)) => out.push_str(&text),
                Some(XmlEvent::End { .. }) => return Ok(out),
                Some(XmlEvent::Start(start)) => {
                    return Err(XmlError::UnexpectedElement { name: start.name });
                }
                None => return Err(XmlError::UnexpectedEof),
            }
        }
    }

    /// Skip the rest of the current element, including nested children.
    pub fn skip_element(&mut self) -> Result<(), XmlError> {
        let mut depth = 1usize;

        while depth > 0 {
            match self.next_event()? {
                Some(XmlEvent::Start(_)) => depth += 1,
                Some(XmlEvent::End { .. }) => depth -= 1,
                Some(XmlEvent::Text(_)) => {}
                None => return Err(XmlError::UnexpectedEof),
            }
        }

        Ok(())
    }
}

//
// nom grammar
//

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':')
}

fn name(input: &str) -> IResult<&str, &str> {
    take_while1(is_name_char)(input)
}

fn quoted(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('"'), take_till(|c: char| c == '"'), char('"')),
        delimited(char('\''), take_till(|c: char| c == '\''), char('\'')),
    ))(input)
}

fn attribute(input: &str) -> IResult<&str, (&str, &str)> {
    separated_pair(name, delimited(multispace0, char('='), multispace0), quoted)(input)
}

fn start_tag(input: &str) -> IResult<&str, (&str, Vec<(&str, &str)>, bool)> {
    let (input, _) = char('<')(input)?;
    let (input, tag_name) = name(input)?;
    let (input, attributes) = many0(preceded(multispace1, attribute))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, close) = alt((tag("/>"), tag(">")))(input)?;

    Ok((input, (tag_name, attributes, close == "/>")))
}

fn end_tag(input: &str) -> IResult<&str, &str> {
    delimited(tag("</"), name, preceded(multispace0, char('>')))(input)
}

fn processing_instruction(input: &str) -> IResult<&str, &str> {
    delimited(tag("<?"), take_until("?>"), tag("?>"))(input)
}

fn comment(input: &str) -> IResult<&str, &str> {
    delimited(tag("<!--"), take_until("-->"), tag("-->"))(input)
}

fn text(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c == '<')(input)
}

fn skip<'a>(
    mut parser: impl FnMut(&'a str) -> IResult<&'a str, &'a str>,
) -> impl FnMut(&'a str) -> IResult<&'a str, ()> {
    move |input| parser(input).map(|(rest, _)| (rest, ()))
}

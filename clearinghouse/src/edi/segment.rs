use std::fmt;

pub const ELEMENT_SEPARATOR: char = '*';
pub const COMPONENT_SEPARATOR: char = ':';
pub const REPETITION_SEPARATOR: char = '^';
pub const SEGMENT_TERMINATOR: char = '~';

/// One X12 segment: an identifier followed by ordered elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    id: &'static str,
    elements: Vec<String>,
}

impl Segment {
    pub fn new(id: &'static str) -> Segment {
        Segment { id, elements: Vec::new() }
    }

    pub fn id(&self) -> &str {
        self.id
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn element(mut self, value: impl AsRef<str>) -> Segment {
        self.elements.push(sanitize(value.as_ref()));
        self
    }

    /// Positional placeholder.
    pub fn empty(mut self) -> Segment {
        self.elements.push(String::new());
        self
    }

    pub fn optional<S: AsRef<str>>(self, value: Option<S>) -> Segment {
        match value {
            Some(value) => self.element(value),
            None => self.empty(),
        }
    }

    /// Components joined by the component separator; trailing empty components are dropped.
    pub fn composite(mut self, components: &[&str]) -> Segment {
        let mut parts: Vec<String> = components.iter().map(|c| sanitize(c)).collect();
        while parts.last().map_or(false, |p| p.is_empty()) {
            parts.pop();
        }
        let separator = COMPONENT_SEPARATOR.to_string();
        self.elements.push(parts.join(separator.as_str()));
        self
    }

    /// Element written verbatim. Only for ISA fields whose width or content is fixed.
    pub(crate) fn raw(mut self, value: impl Into<String>) -> Segment {
        self.elements.push(value.into());
        self
    }

    /// Renders the segment with its terminator. Trailing empty elements are omitted,
    /// interior ones are kept so later elements stay in position.
    pub fn render(&self) -> String {
        let used = self
            .elements
            .iter()
            .rposition(|e| !e.is_empty())
            .map_or(0, |last| last + 1);

        let mut out = String::from(self.id);
        for element in &self.elements[..used] {
            out.push(ELEMENT_SEPARATOR);
            out.push_str(element);
        }
        out.push(SEGMENT_TERMINATOR);
        out
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Strips delimiter and control characters from element data and trims surrounding whitespace.
pub fn sanitize(value: &str) -> String {
    value
        .chars()
        .filter(|c| {
            !matches!(
                *c,
                ELEMENT_SEPARATOR | COMPONENT_SEPARATOR | REPETITION_SEPARATOR | SEGMENT_TERMINATOR
            ) && !c.is_control()
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Left-justified, space-padded, truncated to exactly `width` characters.
pub fn fixed_width(value: &str, width: usize) -> String {
    let clean: String = sanitize(value).chars().take(width).collect();
    format!("{:<width$}", clean, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_joins_elements() {
        let segment = Segment::new("LX").element("1");
        assert_eq!(segment.render(), "LX*1~");
    }

    #[test]
    fn test_trailing_empty_elements_are_dropped() {
        let segment = Segment::new("PER")
            .element("IC")
            .element("Jane")
            .optional(None::<&str>)
            .optional(None::<&str>);
        assert_eq!(segment.render(), "PER*IC*Jane~");
    }

    #[test]
    fn test_interior_placeholders_are_kept() {
        let segment = Segment::new("HL").element("1").empty().element("20").element("1");
        assert_eq!(segment.render(), "HL*1**20*1~");
    }

    #[test]
    fn test_delimiters_are_stripped_from_data() {
        let segment = Segment::new("NM1").element("O*Brien~Lab:s^");
        assert_eq!(segment.render(), "NM1*OBrienLabs~");
    }

    #[test]
    fn test_composite() {
        let segment = Segment::new("CLM").composite(&["81", "B", "1"]);
        assert_eq!(segment.render(), "CLM*81:B:1~");

        let segment = Segment::new("SV1").composite(&["HC", "80053", ""]);
        assert_eq!(segment.render(), "SV1*HC:80053~");
    }

    #[test]
    fn test_fixed_width() {
        assert_eq!(fixed_width("ABC", 5), "ABC  ");
        assert_eq!(fixed_width("ABCDEFG", 5), "ABCDE");
        assert_eq!(fixed_width("", 3), "   ");
    }

    #[test]
    fn test_empty_segment() {
        assert_eq!(Segment::new("SE").render(), "SE~");
    }
}

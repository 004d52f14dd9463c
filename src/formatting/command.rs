//! Supported formatting commands

/// Block-level formats accepted by `formatBlock`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockFormat {
    Paragraph,
    /// Heading with level (1-6)
    Heading(u8),
}

impl BlockFormat {
    /// Parse a block tag, with or without angle brackets
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim().trim_start_matches('<').trim_end_matches('>');
        match tag.to_ascii_lowercase().as_str() {
            "p" => Some(BlockFormat::Paragraph),
            "h1" => Some(BlockFormat::Heading(1)),
            "h2" => Some(BlockFormat::Heading(2)),
            "h3" => Some(BlockFormat::Heading(3)),
            "h4" => Some(BlockFormat::Heading(4)),
            "h5" => Some(BlockFormat::Heading(5)),
            "h6" => Some(BlockFormat::Heading(6)),
            _ => None,
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            BlockFormat::Paragraph => "p",
            BlockFormat::Heading(1) => "h1",
            BlockFormat::Heading(2) => "h2",
            BlockFormat::Heading(3) => "h3",
            BlockFormat::Heading(4) => "h4",
            BlockFormat::Heading(5) => "h5",
            BlockFormat::Heading(_) => "h6",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Bullet,
    Numbered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// A formatting action the toolbar can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCommand {
    Bold,
    Italic,
    Underline,
    Block(BlockFormat),
    List(ListStyle),
    Align(Alignment),
}

impl FormatCommand {
    /// Parse a native command name and its optional value.
    ///
    /// Returns `None` for anything the editor does not support.
    pub fn parse(name: &str, value: Option<&str>) -> Option<Self> {
        let command = match name {
            "bold" => FormatCommand::Bold,
            "italic" => FormatCommand::Italic,
            "underline" => FormatCommand::Underline,
            "formatBlock" => FormatCommand::Block(BlockFormat::parse(value?)?),
            "insertUnorderedList" => FormatCommand::List(ListStyle::Bullet),
            "insertOrderedList" => FormatCommand::List(ListStyle::Numbered),
            "justifyLeft" => FormatCommand::Align(Alignment::Left),
            "justifyCenter" => FormatCommand::Align(Alignment::Center),
            "justifyRight" => FormatCommand::Align(Alignment::Right),
            _ => return None,
        };
        Some(command)
    }

    /// Native command name
    pub fn name(&self) -> &'static str {
        match self {
            FormatCommand::Bold => "bold",
            FormatCommand::Italic => "italic",
            FormatCommand::Underline => "underline",
            FormatCommand::Block(_) => "formatBlock",
            FormatCommand::List(ListStyle::Bullet) => "insertUnorderedList",
            FormatCommand::List(ListStyle::Numbered) => "insertOrderedList",
            FormatCommand::Align(Alignment::Left) => "justifyLeft",
            FormatCommand::Align(Alignment::Center) => "justifyCenter",
            FormatCommand::Align(Alignment::Right) => "justifyRight",
        }
    }

    /// Native command argument, if the command takes one
    pub fn value(&self) -> Option<&'static str> {
        match self {
            FormatCommand::Block(format) => Some(format.tag()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toolbar_commands() {
        assert_eq!(FormatCommand::parse("bold", None), Some(FormatCommand::Bold));
        assert_eq!(
            FormatCommand::parse("insertOrderedList", None),
            Some(FormatCommand::List(ListStyle::Numbered))
        );
        assert_eq!(
            FormatCommand::parse("justifyCenter", None),
            Some(FormatCommand::Align(Alignment::Center))
        );
        let heading = FormatCommand::parse("formatBlock", Some("h1")).unwrap();
        assert_eq!(heading.name(), "formatBlock");
        assert_eq!(heading.value(), Some("h1"));
    }

    #[test]
    fn test_block_tag_variants() {
        assert_eq!(BlockFormat::parse("<H2>"), Some(BlockFormat::Heading(2)));
        assert_eq!(BlockFormat::parse("h7"), None);
        assert_eq!(FormatCommand::parse("formatBlock", None), None);
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(FormatCommand::parse("insertImage", Some("x.png")), None);
    }
}

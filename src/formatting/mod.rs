//! Formatting commands and the rich-text host capability

mod command;

pub use command::{Alignment, BlockFormat, FormatCommand, ListStyle};

use std::fmt;

/// Error type for host operations
#[derive(Debug, Clone)]
pub struct HostError(pub String);

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for HostError {}

impl From<&str> for HostError {
    fn from(s: &str) -> Self {
        HostError(s.to_string())
    }
}

impl From<String> for HostError {
    fn from(s: String) -> Self {
        HostError(s)
    }
}

/// An editable rich-text region provided by the platform.
///
/// The browser implementation drives a `contenteditable` element through
/// `document.execCommand`; other targets would supply their own region.
pub trait RichTextHost {
    /// Run a native editing command on the current selection.
    ///
    /// Returns `false` when the host declined the command.
    fn exec_command(&mut self, command: &str, value: Option<&str>) -> Result<bool, HostError>;

    /// Give keyboard focus back to the region
    fn focus(&mut self);

    /// Current markup of the region
    fn markup(&self) -> String;

    /// Replace the region's markup
    fn set_markup(&mut self, markup: &str);

    /// Text as the user sees it, without markup.
    ///
    /// Hosts with a layout engine should return their rendered text; the
    /// default derives it from the markup.
    fn rendered_text(&self) -> String {
        crate::export::markup_to_text(&self.markup())
    }
}

/// Forwards toolbar commands to a [`RichTextHost`]
#[derive(Debug, Default, Clone, Copy)]
pub struct FormattingDispatcher;

impl FormattingDispatcher {
    /// Apply a command by name.
    ///
    /// Unknown names are ignored. Returns the parsed command when one was
    /// forwarded to the host.
    pub fn dispatch(
        &self,
        host: &mut dyn RichTextHost,
        name: &str,
        value: Option<&str>,
    ) -> Option<FormatCommand> {
        let Some(command) = FormatCommand::parse(name, value) else {
            tracing::debug!(name, ?value, "ignoring unsupported formatting command");
            return None;
        };
        self.apply(host, command);
        Some(command)
    }

    /// Apply a parsed command, then refocus the region so the selection
    /// survives the toolbar click
    pub fn apply(&self, host: &mut dyn RichTextHost, command: FormatCommand) {
        match host.exec_command(command.name(), command.value()) {
            Ok(true) => tracing::debug!(?command, "formatting applied"),
            Ok(false) => tracing::debug!(?command, "host declined formatting command"),
            Err(e) => tracing::warn!(?command, "formatting command failed: {}", e),
        }
        host.focus();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Host that records commands and wraps markup so effects are visible
    #[derive(Debug, Default)]
    pub(crate) struct RecordingHost {
        pub markup: String,
        pub commands: Vec<(String, Option<String>)>,
        pub focus_count: usize,
    }

    impl RecordingHost {
        pub(crate) fn with_markup(markup: &str) -> Self {
            Self {
                markup: markup.to_string(),
                ..Self::default()
            }
        }
    }

    impl RichTextHost for RecordingHost {
        fn exec_command(&mut self, command: &str, value: Option<&str>) -> Result<bool, HostError> {
            self.commands
                .push((command.to_string(), value.map(str::to_string)));
            match command {
                "bold" => self.markup = format!("<b>{}</b>", self.markup),
                "formatBlock" => {
                    let tag = value.unwrap_or("p");
                    self.markup = format!("<{tag}>{}</{tag}>", self.markup);
                }
                _ => {}
            }
            Ok(true)
        }

        fn focus(&mut self) {
            self.focus_count += 1;
        }

        fn markup(&self) -> String {
            self.markup.clone()
        }

        fn set_markup(&mut self, markup: &str) {
            self.markup = markup.to_string();
        }
    }

    #[test]
    fn test_dispatch_known_command() {
        let mut host = RecordingHost::with_markup("hi");
        let applied = FormattingDispatcher.dispatch(&mut host, "bold", None);
        assert_eq!(applied, Some(FormatCommand::Bold));
        assert_eq!(host.markup, "<b>hi</b>");
        assert_eq!(host.focus_count, 1);
    }

    #[test]
    fn test_dispatch_block_format_passes_value() {
        let mut host = RecordingHost::with_markup("Title");
        FormattingDispatcher.dispatch(&mut host, "formatBlock", Some("h2"));
        assert_eq!(host.commands, [("formatBlock".to_string(), Some("h2".to_string()))]);
        assert_eq!(host.markup, "<h2>Title</h2>");
    }

    #[test]
    fn test_dispatch_unknown_command_ignored() {
        let mut host = RecordingHost::with_markup("hi");
        assert_eq!(FormattingDispatcher.dispatch(&mut host, "strikeThrough", None), None);
        assert_eq!(FormattingDispatcher.dispatch(&mut host, "formatBlock", Some("table")), None);
        assert!(host.commands.is_empty());
        assert_eq!(host.markup, "hi");
        assert_eq!(host.focus_count, 0);
    }

    #[test]
    fn test_default_rendered_text() {
        let host = RecordingHost::with_markup("<p>a</p><p>b</p>");
        assert_eq!(host.rendered_text(), "a\n\nb");
    }
}

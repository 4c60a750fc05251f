//! Text extraction options.

/// Text for an `hr` divider.
pub const HR_TEXT: &str = "________________________________________";

/// Options for turning a content model into plain text.
#[derive(Debug, Clone)]
pub struct TextOptions {
    /// Placed between lines and for line breaks inside a paragraph
    pub separator: String,

    /// Text standing in for an image
    pub image_placeholder: String,

    /// Emit a line for each span-target table cell
    pub include_span_cells: bool,
}

impl TextOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Set the image placeholder.
    pub fn with_image_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.image_placeholder = placeholder.into();
        self
    }

    pub fn with_span_cells(mut self, include: bool) -> Self {
        self.include_span_cells = include;
        self
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            separator: "\r\n".to_string(),
            image_placeholder: " ".to_string(),
            include_span_cells: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = TextOptions::default();
        assert_eq!(options.separator, "\r\n");
        assert_eq!(HR_TEXT.len(), 40);
    }

    #[test]
    fn test_builder_pattern() {
        let options = TextOptions::new()
            .with_separator("\n")
            .with_image_placeholder("[img]")
            .with_span_cells(true);
        assert_eq!(options.separator, "\n");
        assert_eq!(options.image_placeholder, "[img]");
        assert!(options.include_span_cells);
    }
}

//! Exporter configuration.

/// Options for [`content_model_to_dom`](super::content_model_to_dom).
#[derive(Debug, Clone)]
pub struct ModelToDomOptions {
    /// Reuse cached nodes of unchanged, unselected blocks and cache the
    /// wrappers built for new ones
    pub allow_cache_element: bool,

    /// Tag of the wrapper written for paragraphs that need one but have no
    /// decorator
    pub paragraph_tag: String,

    /// Write entity class names onto wrappers that lack them
    pub write_entity_classes: bool,

    /// Merge adjacent text nodes before resolving the selection
    pub normalize_text_nodes: bool,
}

impl Default for ModelToDomOptions {
    fn default() -> Self {
        Self {
            allow_cache_element: false,
            paragraph_tag: "div".to_string(),
            write_entity_classes: true,
            normalize_text_nodes: true,
        }
    }
}

impl ModelToDomOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable cached node reuse.
    pub fn with_cache_element(mut self, allow: bool) -> Self {
        self.allow_cache_element = allow;
        self
    }

    /// Set the wrapper tag of undecorated paragraphs.
    pub fn with_paragraph_tag(mut self, tag: impl Into<String>) -> Self {
        self.paragraph_tag = tag.into().to_ascii_lowercase();
        self
    }

    /// Enable or disable writing entity class names.
    pub fn with_entity_classes(mut self, write: bool) -> Self {
        self.write_entity_classes = write;
        self
    }

    /// Enable or disable text node merging.
    pub fn with_text_normalization(mut self, normalize: bool) -> Self {
        self.normalize_text_nodes = normalize;
        self
    }
}

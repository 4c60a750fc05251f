//! Format records carried by segments, blocks, list levels and decorators.
//!
//! Every field is optional: an absent field means "inherit", never "reset".
//! Values are kept as CSS strings so they survive a round-trip through the
//! editable surface unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Free-form `data-*` attributes carried through import/export.
pub type Dataset = BTreeMap<String, String>;

/// Generates `is_empty`, `overlay` and `fill_missing` for a format record
/// whose fields are all `Option`s.
macro_rules! format_ops {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $ty {
            /// Whether no field is set.
            pub fn is_empty(&self) -> bool {
                true $(&& self.$field.is_none())*
            }

            /// Copy every field set in `other` over this format.
            pub fn overlay(&mut self, other: &$ty) {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field.clone();
                    }
                )*
            }

            /// Fill fields absent here from `other`.
            pub fn fill_missing(&mut self, other: &$ty) {
                $(
                    if self.$field.is_none() {
                        self.$field = other.$field.clone();
                    }
                )*
            }
        }
    };
}

/// Character-level formatting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SegmentFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    /// Space separated `super`/`sub` sequence, outermost first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub super_or_sub_script_sequence: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<String>,
}

format_ops!(SegmentFormat {
    font_family,
    font_size,
    text_color,
    background_color,
    font_weight,
    italic,
    underline,
    strikethrough,
    super_or_sub_script_sequence,
    line_height,
    letter_spacing,
});

impl SegmentFormat {
    /// Whether the weight renders bold.
    pub fn is_bold(&self) -> bool {
        match self.font_weight.as_deref() {
            Some("bold") | Some("bolder") => true,
            Some(weight) => weight.parse::<u32>().map(|w| w >= 600).unwrap_or(false),
            None => false,
        }
    }

    /// Only the fields a caret keeps after its text is deleted: font family,
    /// size and color.
    pub fn caret_format(&self) -> SegmentFormat {
        SegmentFormat {
            font_family: self.font_family.clone(),
            font_size: self.font_size.clone(),
            text_color: self.text_color.clone(),
            ..Default::default()
        }
    }

    /// Only bold, italic and underline.
    pub fn emphasis_format(&self) -> SegmentFormat {
        SegmentFormat {
            font_weight: self.font_weight.clone(),
            italic: self.italic,
            underline: self.underline,
            ..Default::default()
        }
    }
}

/// Block-level formatting shared by paragraphs, containers, cells, tables
/// and dividers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlockFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub white_space: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_indent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_align: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_collapse: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_border_box: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

format_ops!(BlockFormat {
    text_align,
    direction,
    background_color,
    margin_top,
    margin_right,
    margin_bottom,
    margin_left,
    padding_top,
    padding_right,
    padding_bottom,
    padding_left,
    border_top,
    border_right,
    border_bottom,
    border_left,
    line_height,
    white_space,
    text_indent,
    vertical_align,
    width,
    height,
    border_collapse,
    use_border_box,
    display,
});

impl BlockFormat {
    /// The subset of fields that flows from a block element to its
    /// descendants.
    pub fn inheritable(&self) -> BlockFormat {
        BlockFormat {
            text_align: self.text_align.clone(),
            direction: self.direction.clone(),
            line_height: self.line_height.clone(),
            white_space: self.white_space.clone(),
            text_indent: self.text_indent.clone(),
            ..Default::default()
        }
    }

    /// Whether `white-space` keeps runs of spaces as typed.
    pub fn is_white_space_preserved(&self) -> bool {
        is_white_space_preserved(self.white_space.as_deref())
    }
}

/// Whether a CSS `white-space` value keeps runs of spaces as typed.
pub fn is_white_space_preserved(white_space: Option<&str>) -> bool {
    matches!(
        white_space,
        Some("pre") | Some("pre-wrap") | Some("break-spaces")
    )
}

/// Formatting of one list nesting level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListLevelFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_number_override: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_style_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding_left: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<String>,
}

format_ops!(ListLevelFormat {
    start_number_override,
    list_style_type,
    margin_top,
    margin_bottom,
    margin_left,
    margin_right,
    padding_left,
    direction,
    text_align,
});

/// Hyperlink attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LinkFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
}

format_ops!(LinkFormat {
    href,
    target,
    anchor_title,
    name,
    underline,
});

/// Inline code attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CodeFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
}

format_ops!(CodeFormat { font_family });

/// Entity identity and behavior flags, encoded in the wrapper's class list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityFormat {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub is_readonly: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_fake_entity: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_undeletable: bool,
}

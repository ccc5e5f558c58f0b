//! Overlay element types and their per-type creation defaults.

/// All valid overlay element types.
pub const ELEMENT_TYPES: &[&str] = &["text", "rectangle", "circle", "arrow", "image"];

/// Whether the element type is one of the five known variants.
pub fn is_valid_element_type(element_type: &str) -> bool {
    ELEMENT_TYPES.contains(&element_type)
}

/// Default visibility window applied when the client omits timing.
pub const DEFAULT_START_TIME: f64 = 0.0;
pub const DEFAULT_END_TIME: f64 = 10.0;

/// Per-type defaults applied at element creation for fields the client
/// omitted. Width/height are pixels; for circles they are the diameter, for
/// arrows length and stroke thickness. Text elements size to their content,
/// so they carry no width/height defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct ElementDefaults {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub content: Option<&'static str>,
    pub color: Option<&'static str>,
    pub background: Option<&'static str>,
    pub font_size: Option<i32>,
}

/// Look up the defaults for an element type. Returns `None` for unknown
/// types, which callers must reject as validation failures.
pub fn defaults_for(element_type: &str) -> Option<ElementDefaults> {
    let defaults = match element_type {
        "text" => ElementDefaults {
            content: Some("Enter text"),
            color: Some("#000000"),
            font_size: Some(16),
            ..Default::default()
        },
        "rectangle" => ElementDefaults {
            width: Some(100.0),
            height: Some(50.0),
            background: Some("rgba(0, 123, 255, 0.5)"),
            ..Default::default()
        },
        "circle" => ElementDefaults {
            width: Some(50.0),
            height: Some(50.0),
            background: Some("rgba(220, 53, 69, 0.5)"),
            ..Default::default()
        },
        "arrow" => ElementDefaults {
            width: Some(100.0),
            height: Some(2.0),
            color: Some("#dc3545"),
            ..Default::default()
        },
        "image" => ElementDefaults {
            width: Some(100.0),
            height: Some(100.0),
            ..Default::default()
        },
        _ => return None,
    };
    Some(defaults)
}

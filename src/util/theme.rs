//! Page theme snapshot for the hosted card element.
//!
//! The hosted element's visual style is baked in at creation time from the
//! document-level `data-theme` attribute. This is a deliberate
//! snapshot-at-creation policy: the element does not restyle itself if the
//! page theme changes afterward.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

/// Page color theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Map the document's `data-theme` attribute value to a [`Theme`].
///
/// Only `"black"` selects the dark palette; anything else, including a
/// missing attribute, is light.
pub fn theme_from_attr(value: Option<&str>) -> Theme {
    if value == Some("black") { Theme::Dark } else { Theme::Light }
}

/// Read the current theme from the `<html>` element. Snapshot only — callers
/// must not poll this to follow theme changes.
pub fn snapshot() -> Theme {
    #[cfg(feature = "hydrate")]
    {
        let attr = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.document_element())
            .and_then(|el| el.get_attribute("data-theme"));
        theme_from_attr(attr.as_deref())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Theme::Light
    }
}

/// Visual style options for the hosted card element under `theme`.
///
/// The shape follows the processor's element style contract: a `base` block
/// for normal input and an `invalid` block for rejected input.
pub fn card_style(theme: Theme) -> serde_json::Value {
    let dark = theme == Theme::Dark;
    serde_json::json!({
        "base": {
            "fontSize": "16px",
            "fontFamily": "ui-sans-serif, system-ui, sans-serif",
            "color": if dark { "#e5e7eb" } else { "#1f2937" },
            "backgroundColor": "transparent",
            "iconColor": if dark { "#d1d5db" } else { "#6b7280" },
            "::placeholder": {
                "color": "#9ca3af",
            },
        },
        "invalid": {
            "color": if dark { "#fca5a5" } else { "#ef4444" },
            "iconColor": if dark { "#fca5a5" } else { "#ef4444" },
        },
    })
}

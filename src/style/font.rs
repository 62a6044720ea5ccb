//! Font Resolution
//! Registers the font used for chart text with the plotting backend.
//!
//! DejaVu Sans is compiled into the crate, so charts get text on machines
//! without any installed fonts. A style can point at its own TrueType file.

use super::RenderStyle;
use crate::error::{RenderError, RenderResult};
use plotters::style::FontStyle;
use std::path::Path;
use std::sync::Mutex;

const BUNDLED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

// Names already handed to the backend. Registration is process-wide and a
// name can only ever point at one font, so file fonts get a name of their own.
static REGISTERED: Mutex<Vec<String>> = Mutex::new(Vec::new());

/// The font family used for chart text, or none when text is switched off.
#[derive(Debug, Clone)]
pub struct Typeface {
    family: Option<String>,
}

impl Typeface {
    /// Register the font for `style`.
    ///
    /// A `font_path` that cannot be loaded falls back to the bundled font
    /// with a warning.
    pub fn resolve(style: &RenderStyle) -> Self {
        if let Some(path) = &style.font_path {
            let name = format!("{}:{}", style.font_family, path.display());
            match Self::register(&name, || Self::read_font(path)) {
                Ok(()) => return Self::named(name),
                Err(err) => tracing::warn!("{err}; using the bundled font"),
            }
        }

        match Self::register(&style.font_family, || Ok(BUNDLED_FONT)) {
            Ok(()) => Self::named(style.font_family.clone()),
            Err(err) => {
                tracing::warn!("{err}; charts will be drawn without text");
                Self::without_text()
            }
        }
    }

    pub fn without_text() -> Self {
        Self { family: None }
    }

    fn named(family: String) -> Self {
        Self {
            family: Some(family),
        }
    }

    /// Family name to draw text with, if text is enabled.
    pub fn family(&self) -> Option<&str> {
        self.family.as_deref()
    }

    pub fn has_text(&self) -> bool {
        self.family.is_some()
    }

    fn register<F>(name: &str, load: F) -> RenderResult<()>
    where
        F: FnOnce() -> RenderResult<&'static [u8]>,
    {
        let mut registered = REGISTERED.lock().unwrap_or_else(|e| e.into_inner());
        if registered.iter().any(|f| f == name) {
            return Ok(());
        }

        let bytes = load()?;
        plotters::style::register_font(name, FontStyle::Normal, bytes)
            .map_err(|_| RenderError::Font(format!("'{name}' is not a usable TrueType font")))?;

        tracing::debug!("Registered font '{}'", name);
        registered.push(name.to_string());
        Ok(())
    }

    fn read_font(path: &Path) -> RenderResult<&'static [u8]> {
        let bytes = std::fs::read(path)
            .map_err(|e| RenderError::Font(format!("cannot read {}: {e}", path.display())))?;
        // The backend keeps a 'static reference
        Ok(Box::leak(bytes.into_boxed_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn bundled_copy() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/DejaVuSans.ttf")
    }

    #[test]
    fn default_style_has_text() {
        let typeface = Typeface::resolve(&RenderStyle::default());
        assert_eq!(typeface.family(), Some("sans-serif"));
    }

    #[test]
    fn missing_font_file_falls_back_to_bundled() {
        let style = RenderStyle {
            font_family: "missing-font-family".to_string(),
            font_path: Some(PathBuf::from("/nonexistent/font.ttf")),
            ..RenderStyle::default()
        };
        let typeface = Typeface::resolve(&style);
        assert_eq!(typeface.family(), Some("missing-font-family"));
    }

    #[test]
    fn garbage_font_file_falls_back_to_bundled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        std::fs::write(&path, b"not a font").unwrap();

        let style = RenderStyle {
            font_family: "broken-font-family".to_string(),
            font_path: Some(path),
            ..RenderStyle::default()
        };
        let typeface = Typeface::resolve(&style);
        assert_eq!(typeface.family(), Some("broken-font-family"));
    }

    #[test]
    fn font_files_do_not_share_a_family_name() {
        let from_file = RenderStyle {
            font_family: "shared-family".to_string(),
            font_path: Some(bundled_copy()),
            ..RenderStyle::default()
        };
        let missing = RenderStyle {
            font_path: Some(PathBuf::from("/nonexistent.ttf")),
            ..from_file.clone()
        };

        let a = Typeface::resolve(&from_file);
        let b = Typeface::resolve(&missing);
        let expected = format!("shared-family:{}", bundled_copy().display());
        assert_eq!(a.family(), Some(expected.as_str()));
        assert_eq!(b.family(), Some("shared-family"));
    }

    #[test]
    fn text_can_be_switched_off() {
        assert!(!Typeface::without_text().has_text());
    }
}

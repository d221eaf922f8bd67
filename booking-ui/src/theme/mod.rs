//! Site theme: colors, animations and the stylesheet generated from them.
//!
//! [`ThemeConfig::default`] is the site's stock theme. A JSON file with the
//! same shape can override any part of it.

mod content;
mod values;

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use content::glob_matches;
pub use values::{
    AnimationDuration, AnimationSpec, HexColor, InvalidAnimation, InvalidHexColor, Iterations,
};

/// CSS declarations for one keyframe selector, e.g. `{"opacity": "0"}`.
pub type Declarations = BTreeMap<String, String>;

/// Keyframe selector (`"0%, 100%"`, `"50%"`) to declarations.
pub type Keyframes = BTreeMap<String, Declarations>;

/// Errors from loading or checking a theme.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("failed to read theme {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed JSON, including invalid colors and animation shorthands
    #[error("invalid theme JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Color(#[from] InvalidHexColor),

    #[error(transparent)]
    Animation(#[from] InvalidAnimation),

    /// An animation names keyframes the theme does not define
    #[error("animation {animation:?} uses undefined keyframes {keyframes:?}")]
    UnknownKeyframes { animation: String, keyframes: String },
}

/// Styling configuration for the site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Globs of the files whose markup uses the generated classes.
    pub content: Vec<String>,
    /// Named brand colors.
    pub colors: BTreeMap<String, HexColor>,
    /// Named animations, exposed as `.animate-{name}`.
    pub animation: BTreeMap<String, AnimationSpec>,
    pub keyframes: BTreeMap<String, Keyframes>,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        let content = [
            "./templates/**/*.html",
            "./travels/templates/**/*.html",
            "./static/js/**/*.js",
        ]
        .map(String::from)
        .to_vec();

        let colors = BTreeMap::from([
            ("primary".to_string(), HexColor::rgb(0x38, 0xbd, 0xf8)),
            ("secondary".to_string(), HexColor::rgb(0x0e, 0xa5, 0xe9)),
        ]);

        let animation = BTreeMap::from([
            (
                "float".to_string(),
                AnimationSpec {
                    keyframes: "float".to_string(),
                    duration: AnimationDuration::from_millis(3000),
                    timing: Some("ease-in-out".to_string()),
                    delay: None,
                    iterations: Some(Iterations::Infinite),
                },
            ),
            (
                "slide-in".to_string(),
                AnimationSpec {
                    keyframes: "slideIn".to_string(),
                    duration: AnimationDuration::from_millis(500),
                    timing: Some("ease-out".to_string()),
                    delay: None,
                    iterations: None,
                },
            ),
        ]);

        let keyframes = BTreeMap::from([
            (
                "float".to_string(),
                frames([
                    ("0%, 100%", &[("transform", "translateY(0px)")][..]),
                    ("50%", &[("transform", "translateY(-20px)")][..]),
                ]),
            ),
            (
                "slideIn".to_string(),
                frames([
                    ("0%", &[("transform", "translateX(-100%)"), ("opacity", "0")][..]),
                    ("100%", &[("transform", "translateX(0)"), ("opacity", "1")][..]),
                ]),
            ),
        ]);

        Self {
            content,
            colors,
            animation,
            keyframes,
        }
    }
}

fn frames<const N: usize>(steps: [(&str, &[(&str, &str)]); N]) -> Keyframes {
    steps
        .into_iter()
        .map(|(selector, decls)| {
            let decls = decls
                .iter()
                .map(|&(k, v)| (k.to_string(), v.to_string()))
                .collect();
            (selector.to_string(), decls)
        })
        .collect()
}

impl ThemeConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ThemeError> {
        let theme: Self = serde_json::from_str(json)?;
        theme.validate()?;
        Ok(theme)
    }

    /// Read and validate a theme file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json(&self) -> Result<String, ThemeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that every animation refers to defined keyframes.
    pub fn validate(&self) -> Result<(), ThemeError> {
        for (name, spec) in &self.animation {
            if !self.keyframes.contains_key(&spec.keyframes) {
                return Err(ThemeError::UnknownKeyframes {
                    animation: name.clone(),
                    keyframes: spec.keyframes.clone(),
                });
            }
        }
        Ok(())
    }

    /// Add or replace a color from its hex notation.
    pub fn set_color(&mut self, name: &str, hex: &str) -> Result<(), ThemeError> {
        self.colors.insert(name.to_string(), HexColor::parse(hex)?);
        Ok(())
    }

    /// Add or replace an animation from its shorthand.
    pub fn set_animation(&mut self, name: &str, shorthand: &str) -> Result<(), ThemeError> {
        self.animation
            .insert(name.to_string(), AnimationSpec::parse(shorthand)?);
        Ok(())
    }

    /// Whether `path` is one of the theme's content files.
    pub fn scans(&self, path: &str) -> bool {
        self.content.iter().any(|glob| glob_matches(glob, path))
    }

    /// Render the stylesheet: color custom properties and utilities,
    /// keyframes, and one `.animate-*` class per animation.
    pub fn to_css(&self) -> String {
        let mut css = String::new();

        if !self.colors.is_empty() {
            css.push_str(":root {\n");
            for (name, color) in &self.colors {
                let _ = writeln!(css, "  --color-{name}: {color};");
            }
            css.push_str("}\n");
        }
        for name in self.colors.keys() {
            for (prefix, property) in [
                ("text", "color"),
                ("bg", "background-color"),
                ("border", "border-color"),
            ] {
                let _ = writeln!(
                    css,
                    "\n.{prefix}-{name} {{\n  {property}: var(--color-{name});\n}}"
                );
            }
        }

        for (name, frames) in &self.keyframes {
            let _ = writeln!(css, "\n@keyframes {name} {{");
            for (selector, decls) in frames {
                let _ = writeln!(css, "  {selector} {{");
                for (property, value) in decls {
                    let _ = writeln!(css, "    {property}: {value};");
                }
                css.push_str("  }\n");
            }
            css.push_str("}\n");
        }

        for (name, spec) in &self.animation {
            let _ = writeln!(css, "\n.animate-{name} {{\n  animation: {spec};\n}}");
        }

        css
    }
}

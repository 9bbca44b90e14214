use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::core::{Fps, Size},
    foundation::error::{LetterFxError, LetterFxResult},
};

fn default_visible_size() -> Size {
    Size::new(960.0, 640.0)
}

/// Stage settings, usually loaded from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StageConfig {
    /// Visible area in points; off-screen animations travel this far.
    #[serde(default = "default_visible_size")]
    pub visible_size: Size,
    /// Seed for per-character stagger.
    #[serde(default)]
    pub seed: u64,
    /// Tick rate used by traces.
    #[serde(default)]
    pub fps: Fps,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            visible_size: default_visible_size(),
            seed: 0,
            fps: Fps::default(),
        }
    }
}

impl StageConfig {
    pub fn from_json_str(src: &str) -> LetterFxResult<Self> {
        let cfg: Self =
            serde_json::from_str(src).map_err(|e| LetterFxError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> LetterFxResult<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("read stage config '{}'", path.display()))?;
        Self::from_json_str(&src)
    }

    pub fn validate(&self) -> LetterFxResult<()> {
        let Size { width, height } = self.visible_size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(LetterFxError::validation(
                "visible_size must be finite and > 0 in both dimensions",
            ));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;

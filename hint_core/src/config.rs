//! `config`：提示外观的可调参数（颜色/透明度/字体/偏移）。
//!
//! 所有字段都是自由参数，不在边界做校验。

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// 配置加载错误。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read style file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse style TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// 提示样式。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HintStyle {
    /// 当前高亮覆盖区域的背景色
    pub focus_color: String,
    /// 普通覆盖区域的背景色
    pub normal_color: String,
    /// 覆盖区域透明度
    pub opacity: f64,
    /// 覆盖区域边框
    pub border: String,
    pub hint_foreground: String,
    pub hint_background: String,
    pub hint_border: String,
    pub hint_opacity: f64,
    pub hint_font: String,
    /// 徽章相对元素左上角的垂直偏移
    pub vertical_offset: f64,
    /// 徽章相对元素左上角的水平偏移
    pub horizontal_offset: f64,
}

impl Default for HintStyle {
    fn default() -> Self {
        Self {
            focus_color: "#00ff00".to_string(),
            normal_color: "#ffff99".to_string(),
            opacity: 0.3,
            border: "1px dotted #000000".to_string(),
            hint_foreground: "#ffffff".to_string(),
            hint_background: "#000088".to_string(),
            hint_border: "2px dashed #000000".to_string(),
            hint_opacity: 0.4,
            hint_font: "11px monospace bold".to_string(),
            vertical_offset: 0.0,
            horizontal_offset: -10.0,
        }
    }
}

impl HintStyle {
    /// 解析 TOML；缺失的字段取缺省值。
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// 从文件加载；文件不存在时返回缺省样式。
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "style file does not exist; using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn partial_toml_keeps_defaults() {
        let raw = "focus_color = \"#ff0000\"\nhorizontal_offset = 4.0\n";
        let style = HintStyle::from_toml_str(raw).unwrap();
        assert_eq!(style.focus_color, "#ff0000");
        assert_eq!(style.horizontal_offset, 4.0);
        assert_eq!(style.normal_color, HintStyle::default().normal_color);
        assert_eq!(style.hint_font, "11px monospace bold");
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let style = HintStyle::from_path(dir.path().join("nope.toml")).unwrap();
        assert_eq!(style, HintStyle::default());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "opacity = 0.8").unwrap();
        let style = HintStyle::from_path(file.path()).unwrap();
        assert_eq!(style.opacity, 0.8);
    }

    #[test]
    fn rejects_wrong_types() {
        let err = HintStyle::from_toml_str("opacity = \"high\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

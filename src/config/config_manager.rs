// ==========================================
// guías 合并系统 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、快照
// 存储: 可选的 JSON 配置文件,缺省字段取默认值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::report_config::ReportConfig;
use crate::domain::geometry::PageGeometry;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "GUIDE_CONSOLIDATOR_CONFIG";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: ReportConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 加载配置
    ///
    /// # 参数
    /// - path: 配置文件路径; 为 None 时读取环境变量 GUIDE_CONSOLIDATOR_CONFIG,
    ///   仍未指定则使用默认配置
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let resolved = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        match resolved {
            Some(path) => Self::from_file(&path),
            None => {
                info!("未指定配置文件,使用默认配置");
                Self::from_config(ReportConfig::default())
            }
        }
    }

    /// 从 JSON 文件加载配置
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: ReportConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        info!(path = %path.display(), "配置文件加载成功");
        let mut manager = Self::from_config(config)?;
        manager.source = Some(path.to_path_buf());
        Ok(manager)
    }

    /// 从 JSON 字符串加载配置
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: ReportConfig =
            serde_json::from_str(raw).map_err(|e| ConfigError::ParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        Self::from_config(config)
    }

    /// 从已有配置创建 (会做校验)
    pub fn from_config(config: ReportConfig) -> ConfigResult<Self> {
        Self::validate(&config)?;
        let manager = Self {
            config,
            source: None,
        };
        debug!(snapshot = %manager.get_config_snapshot()?, "生效配置");
        Ok(manager)
    }

    fn validate(config: &ReportConfig) -> ConfigResult<()> {
        let problems = config.geometry.validate();
        if !problems.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "geometry".to_string(),
                message: problems.join("; "),
            });
        }
        if config.signature.line_length <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "signature.line_length".to_string(),
                message: format!("必须为正数: {}", config.signature.line_length),
            });
        }
        Ok(())
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.config.geometry
    }

    /// 配置来源文件 (默认配置时为 None)
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn into_config(self) -> ReportConfig {
        self.config
    }

    /// 获取生效配置的快照（JSON格式）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(&self.config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let manager =
            ConfigManager::from_json_str(r#"{"geometry": {"max_rows_per_page": 40}}"#).unwrap();

        assert_eq!(manager.geometry().max_rows_per_page, 40);
        assert_eq!(manager.geometry().row_height, 3.0);
        assert_eq!(manager.config().column_labels[3], "SACO");
        assert_eq!(manager.config().signature.carrier_label, "TRANSPORTISTA");
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let result = ConfigManager::from_json_str(r#"{"geometry": {"row_height": 0}}"#);
        assert!(matches!(result, Err(ConfigError::InvalidValue { key, .. }) if key == "geometry"));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let result = ConfigManager::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, r#"{{"banner": {{"title": "PRUEBA"}}}}"#).unwrap();

        let manager = ConfigManager::from_file(temp_file.path()).unwrap();

        assert_eq!(manager.config().banner.title, "PRUEBA");
        assert_eq!(manager.source(), Some(temp_file.path()));
    }

    #[test]
    fn test_snapshot_round_trips_title() {
        let manager = ConfigManager::from_config(ReportConfig::default()).unwrap();
        let snapshot = manager.get_config_snapshot().unwrap();
        assert!(snapshot.contains("LDC LOGISTICA ECUADOR S.A.S."));
    }
}

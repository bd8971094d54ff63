use crate::utils::error::{MovieError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_ordered, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// ```toml
/// [tmdb]
/// api_key = "${TMDB_API_KEY}"
/// api_base = "https://api.themoviedb.org/3"
/// image_base = "https://image.tmdb.org/t/p"
///
/// [years]
/// min = 1978
/// max = 2025
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub tmdb: Option<TmdbSection>,
    pub years: Option<YearsSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TmdbSection {
    pub api_key: Option<String>,
    pub api_base: Option<String>,
    pub image_base: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YearsSection {
    pub min: Option<i32>,
    pub max: Option<i32>,
}

fn env_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MovieError::IoError)?;
        let config = Self::from_toml_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MovieError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TMDB_API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(tmdb) = &self.tmdb {
            if let Some(key) = &tmdb.api_key {
                validate_non_empty_string("tmdb.api_key", key)?;
                if env_placeholder().is_match(key) {
                    return Err(MovieError::MissingConfigError {
                        field: format!("environment variable referenced by tmdb.api_key ({})", key),
                    });
                }
            }
            if let Some(base) = &tmdb.api_base {
                validate_url("tmdb.api_base", base)?;
            }
            if let Some(base) = &tmdb.image_base {
                validate_url("tmdb.image_base", base)?;
            }
        }

        if let Some(YearsSection {
            min: Some(min),
            max: Some(max),
        }) = &self.years
        {
            validate_ordered("years.min", *min, "years.max", *max)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let config = TomlConfig::from_toml_str(
            r#"
[tmdb]
api_key = "abc"
api_base = "http://localhost:8080/3"
image_base = "http://localhost:8080/img"

[years]
min = 1980
max = 2000
"#,
        )
        .unwrap();

        let tmdb = config.tmdb.as_ref().unwrap();
        assert_eq!(tmdb.api_key.as_deref(), Some("abc"));
        assert_eq!(tmdb.api_base.as_deref(), Some("http://localhost:8080/3"));
        assert_eq!(config.years.as_ref().unwrap().min, Some(1980));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_is_valid() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.tmdb.is_none());
        assert!(config.years.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("MONTHLY_MOVIES_TEST_KEY", "from-env");
        let config = TomlConfig::from_toml_str(
            r#"
[tmdb]
api_key = "${MONTHLY_MOVIES_TEST_KEY}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.tmdb.unwrap().api_key.as_deref(),
            Some("from-env")
        );
    }

    #[test]
    fn test_unset_env_placeholder_fails_validation() {
        let config = TomlConfig::from_toml_str(
            r#"
[tmdb]
api_key = "${MONTHLY_MOVIES_SURELY_UNSET_VAR}"
"#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(MovieError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_inverted_years_rejected() {
        let config = TomlConfig::from_toml_str(
            r#"
[years]
min = 2010
max = 2000
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let result = TomlConfig::from_toml_str("[tmdb\napi_key = 1");
        assert!(matches!(
            result,
            Err(MovieError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[years]\nmin = 1990\nmax = 1999").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        let years = config.years.unwrap();
        assert_eq!(years.min, Some(1990));
        assert_eq!(years.max, Some(1999));
    }

    #[test]
    fn test_missing_file() {
        let result = TomlConfig::from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(MovieError::IoError(_))));
    }
}

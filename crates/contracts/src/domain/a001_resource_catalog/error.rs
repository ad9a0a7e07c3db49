use thiserror::Error;

/// Failure to obtain a usable catalog.
///
/// `Http` and `Schema` are treated the same way by the UI (error panel with
/// a retry button); the variants exist so the panel and the logs can say
/// what actually went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("网络请求失败：{cause}")]
    Network { cause: String },

    #[error("HTTP错误：{status}")]
    Http { status: u16, cause: String },

    #[error("JSON格式错误：{reason}")]
    Schema { reason: String, cause: String },
}

impl LoadError {
    pub fn network(cause: impl ToString) -> Self {
        LoadError::Network {
            cause: cause.to_string(),
        }
    }

    pub fn http(status: u16, status_text: impl ToString) -> Self {
        LoadError::Http {
            status,
            cause: status_text.to_string(),
        }
    }

    pub fn schema(reason: impl Into<String>, cause: impl ToString) -> Self {
        LoadError::Schema {
            reason: reason.into(),
            cause: cause.to_string(),
        }
    }

    /// Underlying error text as reported by the transport or parser.
    pub fn cause(&self) -> &str {
        match self {
            LoadError::Network { cause } => cause,
            LoadError::Http { cause, .. } => cause,
            LoadError::Schema { cause, .. } => cause,
        }
    }
}

/// Raised only in [`super::search::PatternMode::Raw`], when the query does
/// not compile as a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("无效的搜索表达式 “{pattern}”：{cause}")]
pub struct SearchPatternError {
    pub pattern: String,
    pub cause: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_reason() {
        let err = LoadError::http(500, "Internal Server Error");
        assert_eq!(err.to_string(), "HTTP错误：500");
        assert_eq!(err.cause(), "Internal Server Error");

        let err = LoadError::schema("缺少categories字段", "missing field `categories`");
        assert!(err.to_string().contains("缺少categories字段"));
        assert_eq!(err.cause(), "missing field `categories`");
    }
}

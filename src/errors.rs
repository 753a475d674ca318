use std::fmt;

/// Централизованная система ошибок для telegram бота
#[derive(Debug)]
pub enum BotError {
    /// Ошибки Telegram API
    TelegramError(teloxide::RequestError),
    /// Ошибки скачивания файлов из Telegram
    DownloadError(teloxide::DownloadError),
    /// Ошибки файловой системы
    FileSystemError(std::io::Error),
    /// Ошибки базы данных
    DatabaseError(sqlx::Error),
    /// Ошибки миграций базы данных
    MigrationError(sqlx::migrate::MigrateError),
    /// Ошибки HTTP запросов к внешним сервисам
    HttpError(reqwest::Error),
    /// Ошибки сервиса перевода
    TranslationError(String),
    /// Не задана или неверна настройка окружения
    ConfigError(String),
    /// Общая ошибка с описанием
    General(String),
}

impl fmt::Display for BotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotError::TelegramError(e) => write!(f, "Ошибка Telegram API: {}", e),
            BotError::DownloadError(e) => write!(f, "Ошибка скачивания файла: {}", e),
            BotError::FileSystemError(e) => write!(f, "Ошибка файловой системы: {}", e),
            BotError::DatabaseError(e) => write!(f, "Ошибка базы данных: {}", e),
            BotError::MigrationError(e) => write!(f, "Ошибка миграции базы данных: {}", e),
            BotError::HttpError(e) => write!(f, "Ошибка HTTP запроса: {}", e),
            BotError::TranslationError(msg) => write!(f, "Ошибка перевода: {}", msg),
            BotError::ConfigError(msg) => write!(f, "Ошибка конфигурации: {}", msg),
            BotError::General(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for BotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BotError::TelegramError(e) => Some(e),
            BotError::DownloadError(e) => Some(e),
            BotError::FileSystemError(e) => Some(e),
            BotError::DatabaseError(e) => Some(e),
            BotError::MigrationError(e) => Some(e),
            BotError::HttpError(e) => Some(e),
            _ => None,
        }
    }
}

// Реализации From для автоматического преобразования ошибок
impl From<teloxide::RequestError> for BotError {
    fn from(err: teloxide::RequestError) -> Self {
        BotError::TelegramError(err)
    }
}

impl From<teloxide::DownloadError> for BotError {
    fn from(err: teloxide::DownloadError) -> Self {
        BotError::DownloadError(err)
    }
}

impl From<std::io::Error> for BotError {
    fn from(err: std::io::Error) -> Self {
        BotError::FileSystemError(err)
    }
}

impl From<sqlx::Error> for BotError {
    fn from(err: sqlx::Error) -> Self {
        BotError::DatabaseError(err)
    }
}

impl From<sqlx::migrate::MigrateError> for BotError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        BotError::MigrationError(err)
    }
}

impl From<reqwest::Error> for BotError {
    fn from(err: reqwest::Error) -> Self {
        BotError::HttpError(err)
    }
}

// Удобные методы для создания ошибок
impl BotError {
    pub fn translation_error(msg: impl Into<String>) -> Self {
        Self::TranslationError(msg.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}

/// Результат операций бота
pub type BotResult<T> = Result<T, BotError>;

/// Результат для хендлеров
pub type HandlerResult = BotResult<()>;

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn io_error_keeps_its_source() {
        let err: BotError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, BotError::FileSystemError(_)));
        assert!(err.source().is_some());
    }

    #[test]
    fn http_error_keeps_its_source() {
        let err: BotError = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err()
            .into();
        assert!(matches!(err, BotError::HttpError(_)));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("Ошибка HTTP запроса: "));
    }

    #[test]
    fn config_error_message_names_the_variable() {
        let err = BotError::config_error("TELEGRAM_BOT_TOKEN is not set");
        assert_eq!(
            err.to_string(),
            "Ошибка конфигурации: TELEGRAM_BOT_TOKEN is not set"
        );
        assert!(err.source().is_none());
    }
}

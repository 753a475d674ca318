//! Student registration form: name, then age, then grade.
//!
//! Each user has at most one open [`FormSession`]. Every call answers with
//! exactly one [`FormReply`]; the Telegram layer only forwards the text.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use teloxide::types::UserId;
use tokio::sync::Mutex;

use crate::db::StudentStore;

pub const COMMAND_PREFIX: char = '/';
pub const MIN_AGE: u8 = 5;
pub const MAX_AGE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStep {
    #[default]
    Name,
    Age,
    Grade,
}

/// Answers collected so far for one user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSession {
    pub step: FormStep,
    pub name: Option<String>,
    pub age: Option<u8>,
    pub grade: Option<String>,
}

impl FormSession {
    /// `None` unless all three answers are present
    pub fn to_record(&self) -> Option<StudentRecord> {
        Some(StudentRecord {
            name: self.name.clone()?,
            age: self.age?,
            grade: self.grade.clone()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub name: String,
    pub age: u8,
    pub grade: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeError {
    NotANumber,
    OutOfRange,
}

/// Present, not a command, non-empty after trimming
pub fn validate_text(input: Option<&str>) -> Option<String> {
    let text = input?;
    if text.starts_with(COMMAND_PREFIX) {
        return None;
    }
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn validate_age(input: Option<&str>) -> Result<u8, AgeError> {
    let text = input.unwrap_or_default();
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AgeError::NotANumber);
    }

    // Only digits are left, so a parse failure means overflow
    let age: u64 = text.parse().map_err(|_| AgeError::OutOfRange)?;
    if !(u64::from(MIN_AGE)..=u64::from(MAX_AGE)).contains(&age) {
        return Err(AgeError::OutOfRange);
    }

    u8::try_from(age).map_err(|_| AgeError::OutOfRange)
}

/// The single reply produced for an inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormReply {
    Started,
    InvalidName,
    NameAccepted(String),
    AgeNotANumber,
    AgeOutOfRange,
    AgeAccepted(u8),
    InvalidGrade,
    Registered(StudentRecord),
    StoreFailed,
    Incomplete,
    Cancelled,
    NothingToCancel,
}

impl fmt::Display for FormReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormReply::Started => write!(
                f,
                "Начинаем регистрацию нового студента.\n\
                Пожалуйста, введите имя студента.\n\n\
                Для отмены регистрации в любой момент отправьте /cancel."
            ),
            FormReply::InvalidName => write!(
                f,
                "Пожалуйста, введите корректное имя (не команду и не пустое сообщение).\n\
                Попробуйте еще раз или отмените регистрацию командой /cancel."
            ),
            FormReply::NameAccepted(name) => write!(
                f,
                "Отлично, имя студента: {}.\n\
                Теперь, пожалуйста, введите возраст студента (только цифры).",
                name
            ),
            FormReply::AgeNotANumber => write!(
                f,
                "Возраст должен быть числом. Пожалуйста, введите корректный возраст.\n\
                Например: 10\n\n\
                Или отмените регистрацию командой /cancel."
            ),
            FormReply::AgeOutOfRange => write!(
                f,
                "Пожалуйста, введите реалистичный возраст (например, от {} до {} лет).\n\
                Попробуйте еще раз или отмените регистрацию командой /cancel.",
                MIN_AGE, MAX_AGE
            ),
            FormReply::AgeAccepted(age) => write!(
                f,
                "Возраст студента: {}.\n\
                Теперь введите класс (например, '5А', '10Б', '11').",
                age
            ),
            FormReply::InvalidGrade => write!(
                f,
                "Пожалуйста, введите корректный класс (не команду и не пустое сообщение).\n\
                Например: '7Б' или '11'\n\n\
                Попробуйте еще раз или отмените регистрацию командой /cancel."
            ),
            FormReply::Registered(record) => write!(
                f,
                "🎉 Студент успешно зарегистрирован!\n\
                Имя: {}\n\
                Возраст: {}\n\
                Класс: {}\n\n\
                Спасибо!",
                record.name, record.age, record.grade
            ),
            FormReply::StoreFailed => write!(
                f,
                "Произошла ошибка при сохранении данных в базу. \
                Пожалуйста, попробуйте позже или свяжитесь с администратором."
            ),
            FormReply::Incomplete => write!(
                f,
                "Произошла ошибка: не все данные были собраны. \
                Пожалуйста, начните регистрацию заново с /register."
            ),
            FormReply::Cancelled => write!(
                f,
                "Действие отменено. Все введенные данные сброшены.\n\
                Вы можете начать заново с помощью /register или использовать другие команды."
            ),
            FormReply::NothingToCancel => write!(f, "Нет активной операции для отмены."),
        }
    }
}

/// Outcome of one step computed under the session lock
enum Outcome {
    /// Session stays open
    Reply(FormReply),
    /// Session is closed without persisting
    Abort(FormReply),
    /// Session is closed and the record goes to the store
    Commit(StudentRecord),
}

/// Drives registration sessions and commits finished records to the store
pub struct FormController<S> {
    store: Arc<S>,
    sessions: Mutex<HashMap<UserId, FormSession>>,
}

impl<S: StudentStore> FormController<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Open a fresh session, silently dropping any previous one
    pub async fn start(&self, user: UserId) -> FormReply {
        self.sessions
            .lock()
            .await
            .insert(user, FormSession::default());
        log::info!("User {} started registration", user.0);
        FormReply::Started
    }

    pub async fn cancel(&self, user: UserId) -> FormReply {
        match self.sessions.lock().await.remove(&user) {
            Some(session) => {
                log::info!("User {} cancelled registration at step {:?}", user.0, session.step);
                FormReply::Cancelled
            }
            None => FormReply::NothingToCancel,
        }
    }

    /// Drop the session without replying
    pub async fn reset(&self, user: UserId) {
        self.sessions.lock().await.remove(&user);
    }

    pub async fn has_session(&self, user: UserId) -> bool {
        self.sessions.lock().await.contains_key(&user)
    }

    #[cfg(test)]
    pub async fn session(&self, user: UserId) -> Option<FormSession> {
        self.sessions.lock().await.get(&user).cloned()
    }

    /// Feed one message into the user's session.
    /// Returns `None` if the user has no open session.
    pub async fn handle_input(&self, user: UserId, input: Option<&str>) -> Option<FormReply> {
        let outcome = {
            let mut sessions = self.sessions.lock().await;
            let session = sessions.get_mut(&user)?;
            let outcome = advance(session, input);
            if !matches!(outcome, Outcome::Reply(_)) {
                sessions.remove(&user);
            }
            outcome
        };

        let record = match outcome {
            Outcome::Reply(reply) => return Some(reply),
            Outcome::Abort(reply) => {
                log::error!("Registration data incomplete for user {}", user.0);
                return Some(reply);
            }
            Outcome::Commit(record) => record,
        };

        // Lock is released before the store call
        let reply = if self
            .store
            .add_student(&record.name, record.age, &record.grade)
            .await
        {
            log::info!(
                "User {} registered student: name={}, age={}, grade={}",
                user.0,
                record.name,
                record.age,
                record.grade
            );
            FormReply::Registered(record)
        } else {
            log::error!(
                "Database error while registering student for user {}: name={}, age={}, grade={}",
                user.0,
                record.name,
                record.age,
                record.grade
            );
            FormReply::StoreFailed
        };

        Some(reply)
    }
}

fn advance(session: &mut FormSession, input: Option<&str>) -> Outcome {
    match session.step {
        FormStep::Name => match validate_text(input) {
            Some(name) => {
                session.name = Some(name.clone());
                session.step = FormStep::Age;
                Outcome::Reply(FormReply::NameAccepted(name))
            }
            None => Outcome::Reply(FormReply::InvalidName),
        },
        FormStep::Age => match validate_age(input) {
            Ok(age) => {
                session.age = Some(age);
                session.step = FormStep::Grade;
                Outcome::Reply(FormReply::AgeAccepted(age))
            }
            Err(AgeError::NotANumber) => Outcome::Reply(FormReply::AgeNotANumber),
            Err(AgeError::OutOfRange) => Outcome::Reply(FormReply::AgeOutOfRange),
        },
        FormStep::Grade => match validate_text(input) {
            Some(grade) => {
                session.grade = Some(grade);
                match session.to_record() {
                    Some(record) => Outcome::Commit(record),
                    None => Outcome::Abort(FormReply::Incomplete),
                }
            }
            None => Outcome::Reply(FormReply::InvalidGrade),
        },
    }
}

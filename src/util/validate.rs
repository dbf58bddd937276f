//! Form validation for sign-in, sign-up, and team creation.
//!
//! Rules are checked on trimmed values and lengths count characters, not
//! bytes. Messages are shown verbatim under the offending input.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::collections::BTreeMap;

use serde_json::{Value, json};

use crate::state::command::TeamKind;

pub const TEAM_DESCRIPTION_MAX: usize = 500;
/// Submissions allowed before the form locks.
pub const MAX_SUBMIT_ATTEMPTS: u32 = 3;
/// How long a locked form stays locked.
pub const SUBMIT_LOCK_MS: u32 = 4000;

/// Sign-up form fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Email,
    Password,
    Name,
    FirstName,
    LastName,
    Nickname,
    Status,
    BirthDate,
    Region,
}

pub type FieldErrors = BTreeMap<Field, &'static str>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, &self.email);
        if self.password.trim().is_empty() {
            errors.insert(Field::Password, "Введите пароль");
        }
        errors
    }

    #[must_use]
    pub fn payload(&self) -> Value {
        json!({ "email": self.email.trim(), "password": self.password })
    }
}

/// Sign-up form as entered. `payload` converts it to the request body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub name: String,
    pub firstname: String,
    pub lastname: String,
    pub nickname: String,
    pub status: String,
    pub dt: String,
    pub region: String,
}

impl RegistrationForm {
    #[must_use]
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, &self.email);
        check_len(&mut errors, Field::Password, &self.password, 8, "Введите пароль", "Минимум 8 символов");
        check_len(&mut errors, Field::Name, &self.name, 3, "Введите имя", "Минимум 3 символа");
        check_len(&mut errors, Field::FirstName, &self.firstname, 3, "Введите фамилию", "Минимум 3 символа");
        check_len(&mut errors, Field::Nickname, &self.nickname, 2, "Введите никнейм", "Минимум 2 символа");
        check_len(&mut errors, Field::Status, &self.status, 1, "Выберите статус регистрации", "");
        check_len(&mut errors, Field::BirthDate, &self.dt, 6, "Введите дату рождения", "Минимум 6 символов");
        check_len(&mut errors, Field::Region, &self.region, 1, "Выберите регион", "");
        errors
    }

    /// Registration request body: account fields at the top level, personal
    /// data under `info`. Numeric select values are sent as numbers.
    #[must_use]
    pub fn payload(&self) -> Value {
        json!({
            "email": self.email.trim(),
            "nickName": self.nickname.trim(),
            "password": self.password,
            "info": {
                "name": self.name.trim(),
                "surname": self.firstname.trim(),
                "patronymic": self.lastname.trim(),
                "birthday": self.dt.trim(),
                "region": id_or_text(&self.region),
                "role": id_or_text(&self.status),
            },
        })
    }
}

fn id_or_text(value: &str) -> Value {
    let value = value.trim();
    value.parse::<i64>().map_or_else(|_| Value::from(value), Value::from)
}

fn check_len(errors: &mut FieldErrors, field: Field, value: &str, min: usize, required: &'static str, too_short: &'static str) {
    let len = value.trim().chars().count();
    if len == 0 {
        errors.insert(field, required);
    } else if len < min {
        errors.insert(field, too_short);
    }
}

fn check_email(errors: &mut FieldErrors, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        errors.insert(Field::Email, "Введите email");
    } else if !is_email(value) {
        errors.insert(Field::Email, "Введите корректный email");
    }
}

/// `local@domain.tld` with no whitespace.
#[must_use]
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|part| !part.is_empty())
}

/// Problems with a new-team form, in display order.
#[must_use]
pub fn validate_team_form(name: &str, kind_code: &str, description: &str) -> Vec<&'static str> {
    let mut errors = Vec::new();
    if name.trim().is_empty() {
        errors.push("Название команды обязательно для заполнения.");
    }
    if TeamKind::from_code(kind_code).is_none() {
        errors.push("Выберите корректный вид команды (Публичная или Приватная).");
    }
    if description.chars().count() > TEAM_DESCRIPTION_MAX {
        errors.push("Описание не должно превышать 500 символов.");
    }
    errors
}

/// Locks a form after repeated submissions until `reset` is called.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubmitThrottle {
    attempts: u32,
}

impl SubmitThrottle {
    /// Count one submission. Returns `true` if it may proceed.
    pub fn record(&mut self) -> bool {
        if self.is_throttled() {
            return false;
        }
        self.attempts += 1;
        true
    }

    /// Count a submit press, valid form or not. Returns `true` if the form
    /// is valid and the press was not throttled.
    pub fn attempt(&mut self, form_is_valid: bool) -> bool {
        self.record() && form_is_valid
    }

    #[must_use]
    pub fn is_throttled(&self) -> bool {
        self.attempts >= MAX_SUBMIT_ATTEMPTS
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
    }
}

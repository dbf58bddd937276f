use super::*;

fn valid_registration() -> RegistrationForm {
    RegistrationForm {
        email: "ivan@example.ru".to_owned(),
        password: "secret123".to_owned(),
        name: "Иван".to_owned(),
        firstname: "Петров".to_owned(),
        lastname: String::new(),
        nickname: "ip".to_owned(),
        status: "0".to_owned(),
        dt: "2000-01-01".to_owned(),
        region: "71".to_owned(),
    }
}

// =============================================================
// Email
// =============================================================

#[test]
fn is_email_accepts_common_addresses() {
    assert!(is_email("a@b.ru"));
    assert!(is_email("first.last+tag@mail.example.com"));
}

#[test]
fn is_email_rejects_malformed() {
    for bad in ["", "plain", "@b.ru", "a@", "a@b", "a@b.", "a@@b.ru", "a b@c.ru", "a@.ru"] {
        assert!(!is_email(bad), "{bad:?} should be rejected");
    }
}

// =============================================================
// LoginForm
// =============================================================

#[test]
fn login_form_requires_both_fields() {
    let errors = LoginForm::default().validate();
    assert_eq!(errors.get(&Field::Email), Some(&"Введите email"));
    assert_eq!(errors.get(&Field::Password), Some(&"Введите пароль"));
}

#[test]
fn login_form_valid() {
    let form = LoginForm { email: " a@b.ru ".to_owned(), password: "x".to_owned() };
    assert!(form.validate().is_empty());
}

// =============================================================
// RegistrationForm
// =============================================================

#[test]
fn registration_valid_form_has_no_errors() {
    assert!(valid_registration().validate().is_empty());
}

#[test]
fn registration_reports_required_fields() {
    let errors = RegistrationForm::default().validate();
    assert_eq!(errors.get(&Field::Email), Some(&"Введите email"));
    assert_eq!(errors.get(&Field::Password), Some(&"Введите пароль"));
    assert_eq!(errors.get(&Field::Region), Some(&"Выберите регион"));
    assert_eq!(errors.get(&Field::Status), Some(&"Выберите статус регистрации"));
    assert!(!errors.contains_key(&Field::LastName));
}

#[test]
fn registration_min_lengths_count_characters() {
    let mut form = valid_registration();
    form.password = "1234567".to_owned();
    form.name = "Ян".to_owned();
    form.nickname = "я".to_owned();
    form.dt = "2000".to_owned();
    let errors = form.validate();
    assert_eq!(errors.get(&Field::Password), Some(&"Минимум 8 символов"));
    assert_eq!(errors.get(&Field::Name), Some(&"Минимум 3 символа"));
    assert_eq!(errors.get(&Field::Nickname), Some(&"Минимум 2 символа"));
    assert_eq!(errors.get(&Field::BirthDate), Some(&"Минимум 6 символов"));
}

#[test]
fn registration_trims_before_checking() {
    let mut form = valid_registration();
    form.name = "  Ян  ".to_owned();
    assert_eq!(form.validate().get(&Field::Name), Some(&"Минимум 3 символа"));
}

#[test]
fn registration_payload_nests_personal_data() {
    let payload = valid_registration().payload();
    assert_eq!(payload["email"], "ivan@example.ru");
    assert_eq!(payload["nickName"], "ip");
    assert_eq!(payload["info"]["surname"], "Петров");
    assert_eq!(payload["info"]["birthday"], "2000-01-01");
    assert_eq!(payload["info"]["region"], 71);
    assert_eq!(payload["info"]["role"], 0);
    assert_eq!(payload["info"]["patronymic"], "");
}

#[test]
fn login_payload_trims_email_only() {
    let form = LoginForm { email: " a@b.ru ".to_owned(), password: " secret".to_owned() };
    assert_eq!(form.payload(), serde_json::json!({"email": "a@b.ru", "password": " secret"}));
}

// =============================================================
// Team form
// =============================================================

#[test]
fn team_form_valid() {
    assert!(validate_team_form("Альфа", "0", "").is_empty());
    assert!(validate_team_form("Альфа", "1", &"я".repeat(500)).is_empty());
}

#[test]
fn team_form_collects_all_errors_in_order() {
    let errors = validate_team_form("   ", "2", &"x".repeat(501));
    assert_eq!(
        errors,
        vec![
            "Название команды обязательно для заполнения.",
            "Выберите корректный вид команды (Публичная или Приватная).",
            "Описание не должно превышать 500 символов.",
        ]
    );
}

// =============================================================
// SubmitThrottle
// =============================================================

#[test]
fn throttle_locks_after_three_submissions() {
    let mut throttle = SubmitThrottle::default();
    assert!(throttle.record());
    assert!(throttle.record());
    assert!(!throttle.is_throttled());
    assert!(throttle.record());
    assert!(throttle.is_throttled());
    assert!(!throttle.record());

    throttle.reset();
    assert!(!throttle.is_throttled());
    assert!(throttle.record());
}

#[test]
fn invalid_submissions_count_towards_the_lock() {
    let mut throttle = SubmitThrottle::default();
    assert!(!throttle.attempt(false));
    assert!(!throttle.attempt(false));
    assert!(throttle.attempt(true));
    assert!(throttle.is_throttled());
    assert!(!throttle.attempt(true));
}

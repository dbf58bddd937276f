use std::sync::Arc;

use clap::Parser;
use portal::state::session::{RoleId, Session};
use portal::util::storage::MemoryStorage;
use portal::util::validate::Field;

use super::*;

#[test]
fn parses_login_with_defaults() {
    let cli = Cli::try_parse_from(["portal", "login", "--email", "a@b.ru", "--password", "secret123"]).unwrap();
    assert_eq!(cli.base_url, "http://127.0.0.1:8000");
    assert_eq!(cli.timeout_secs, 30);
    assert!(matches!(cli.command, Command::Login { ref email, .. } if email == "a@b.ru"));
}

#[test]
fn parses_global_options_before_subcommand() {
    let cli = Cli::try_parse_from([
        "portal",
        "--base-url",
        "https://portal.example",
        "--state-file",
        "/tmp/s.json",
        "--timeout-secs",
        "5",
        "apply",
        "--team",
        "3",
        "--competition",
        "9",
    ])
    .unwrap();
    assert_eq!(cli.base_url, "https://portal.example");
    assert_eq!(cli.state_file, PathBuf::from("/tmp/s.json"));
    assert!(matches!(cli.command, Command::Apply { team: 3, competition: 9 }));
}

#[test]
fn registration_form_maps_cli_names() {
    let args = RegisterArgs {
        email: "a@b.ru".to_owned(),
        password: "secret123".to_owned(),
        name: "Иван".to_owned(),
        surname: "Петров".to_owned(),
        patronymic: String::new(),
        nickname: "ip".to_owned(),
        role: "0".to_owned(),
        birthday: "2000-01-01".to_owned(),
        region: "71".to_owned(),
    };
    let form = registration_form(args);
    assert_eq!(form.firstname, "Петров");
    assert_eq!(form.status, "0");
    assert!(form.validate().is_empty());
}

#[test]
fn first_error_reports_first_message() {
    assert!(first_error(Vec::<&str>::new()).is_ok());
    let err = first_error(["Введите email", "Введите пароль"]).unwrap_err();
    assert_eq!(err.to_string(), "invalid input: Введите email");
}

#[test]
fn first_error_on_invalid_login() {
    let form = LoginForm { email: "nope".to_owned(), password: String::new() };
    let errors = form.validate();
    assert_eq!(errors.get(&Field::Email), Some(&"Введите корректный email"));
    assert!(first_error(errors.into_values()).is_err());
}

#[test]
fn session_summary_reports_stored_values() {
    let mut session = Session::new(Arc::new(MemoryStorage::new()));
    assert_eq!(session_summary(&session), json!({"authenticated": false, "role": null, "identity": null}));

    session.set_credential("tok");
    session.set_role(RoleId::new("1"));
    session.set_identity(Some(json!({"id": 5})));
    assert_eq!(
        session_summary(&session),
        json!({"authenticated": true, "role": "1", "identity": {"id": 5}})
    );
}

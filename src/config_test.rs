use super::*;

#[test]
fn new_trims_trailing_slash() {
    let cfg = ApiConfig::new("https://portal.example/ ");
    assert_eq!(cfg.base_url, "https://portal.example");
}

#[test]
fn url_joins_paths_with_and_without_leading_slash() {
    let cfg = ApiConfig::new("http://127.0.0.1:8000");
    assert_eq!(cfg.url(LOGIN_PATH), "http://127.0.0.1:8000/api/auth/login/");
    assert_eq!(cfg.url("api/faq/"), "http://127.0.0.1:8000/api/faq/");
}

#[test]
fn default_config_yields_relative_urls() {
    let cfg = ApiConfig::default();
    assert_eq!(cfg.url(REGISTER_PATH), "/api/auth/register/");
}

#[test]
fn absolute_urls_pass_through() {
    let cfg = ApiConfig::new("http://a");
    assert_eq!(cfg.url("https://b/api/teams/"), "https://b/api/teams/");
}

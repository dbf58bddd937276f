//! Sign-in / sign-up page.
//!
//! Validation runs before anything is sent. Three submissions in a row lock
//! the form for a few seconds; a successful sign-in opens the cabinet.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::notice_toast::NoticeToast;
use crate::config::{ApiConfig, REGIONS_PATH, ROLES_PATH};
use crate::net::auth::{AuthKind, authenticate};
use crate::net::http::BrowserTransport;
use crate::net::types::NamedItem;
use crate::pages::{load_list, spawn};
use crate::routes::{AppRoute, CabinetSection};
use crate::state::session::{OperationStatus, Session};
use crate::util::validate::{Field, FieldErrors, LoginForm, RegistrationForm, SUBMIT_LOCK_MS, SubmitThrottle};

#[component]
pub fn AuthPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let config = expect_context::<ApiConfig>();
    let navigate = use_navigate();

    let mode = RwSignal::new(AuthKind::Login);
    let login = RwSignal::new(LoginForm::default());
    let register = RwSignal::new(RegistrationForm::default());
    let errors = RwSignal::new(FieldErrors::new());
    let throttle = RwSignal::new(SubmitThrottle::default());

    let regions = {
        let config = config.clone();
        LocalResource::new(move || load_list::<NamedItem>(config.clone(), REGIONS_PATH, None))
    };
    let roles = {
        let config = config.clone();
        LocalResource::new(move || load_list::<NamedItem>(config.clone(), ROLES_PATH, None))
    };

    let in_flight = move || session.with(|s| s.operation_status() == OperationStatus::InFlight);
    let locked = move || throttle.with(SubmitThrottle::is_throttled);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let kind = mode.get();
        let (problems, form) = match kind {
            AuthKind::Login => login.with(|f| (f.validate(), f.payload())),
            AuthKind::Register => register.with(|f| (f.validate(), f.payload())),
        };
        let valid = problems.is_empty();
        errors.set(problems);
        let was_locked = locked();
        let proceed = throttle.try_update(|t| t.attempt(valid)).unwrap_or(false);
        if !was_locked && locked() {
            schedule_unlock(throttle);
        }
        if !proceed {
            return;
        }

        let config = config.clone();
        let navigate = navigate.clone();
        spawn(async move {
            if authenticate(&session, &BrowserTransport, &config, kind, &form).await {
                navigate(&AppRoute::Cabinet(CabinetSection::Profile).to_path(), NavigateOptions::default());
            }
        });
    };

    let error_for = move |field: Field| move || errors.with(|e| e.get(&field).copied());

    view! {
        <div class="auth-page">
            <div class="auth-page__tabs">
                <button
                    class:active=move || mode.get() == AuthKind::Login
                    on:click=move |_| {
                        mode.set(AuthKind::Login);
                        errors.set(FieldErrors::new());
                    }
                >
                    "Вход"
                </button>
                <button
                    class:active=move || mode.get() == AuthKind::Register
                    on:click=move |_| {
                        mode.set(AuthKind::Register);
                        errors.set(FieldErrors::new());
                    }
                >
                    "Регистрация"
                </button>
            </div>

            <NoticeToast
                notice=Signal::derive(move || session.with(|s| s.last_notice().clone()))
                on_dismiss=Callback::new(move |()| session.update(Session::dismiss_notice))
            />

            <form class="auth-form" on:submit=on_submit>
                <Show
                    when=move || mode.get() == AuthKind::Register
                    fallback=move || {
                        view! {
                            <TextInput label="Email" kind="email" error=error_for(Field::Email)
                                value=Signal::derive(move || login.with(|f| f.email.clone()))
                                on_input=Callback::new(move |v: String| login.update(|f| f.email = v))/>
                            <TextInput label="Пароль" kind="password" error=error_for(Field::Password)
                                value=Signal::derive(move || login.with(|f| f.password.clone()))
                                on_input=Callback::new(move |v: String| login.update(|f| f.password = v))/>
                        }
                    }
                >
                    <TextInput label="Email" kind="email" error=error_for(Field::Email)
                        value=Signal::derive(move || register.with(|f| f.email.clone()))
                        on_input=Callback::new(move |v: String| register.update(|f| f.email = v))/>
                    <TextInput label="Пароль" kind="password" error=error_for(Field::Password)
                        value=Signal::derive(move || register.with(|f| f.password.clone()))
                        on_input=Callback::new(move |v: String| register.update(|f| f.password = v))/>
                    <TextInput label="Фамилия" kind="text" error=error_for(Field::FirstName)
                        value=Signal::derive(move || register.with(|f| f.firstname.clone()))
                        on_input=Callback::new(move |v: String| register.update(|f| f.firstname = v))/>
                    <TextInput label="Имя" kind="text" error=error_for(Field::Name)
                        value=Signal::derive(move || register.with(|f| f.name.clone()))
                        on_input=Callback::new(move |v: String| register.update(|f| f.name = v))/>
                    <TextInput label="Отчество" kind="text" error=error_for(Field::LastName)
                        value=Signal::derive(move || register.with(|f| f.lastname.clone()))
                        on_input=Callback::new(move |v: String| register.update(|f| f.lastname = v))/>
                    <TextInput label="Никнейм" kind="text" error=error_for(Field::Nickname)
                        value=Signal::derive(move || register.with(|f| f.nickname.clone()))
                        on_input=Callback::new(move |v: String| register.update(|f| f.nickname = v))/>
                    <TextInput label="Дата рождения" kind="date" error=error_for(Field::BirthDate)
                        value=Signal::derive(move || register.with(|f| f.dt.clone()))
                        on_input=Callback::new(move |v: String| register.update(|f| f.dt = v))/>
                    <SelectInput label="Статус" placeholder="Выберите статус" error=error_for(Field::Status)
                        options=roles
                        on_change=Callback::new(move |v: String| register.update(|f| f.status = v))/>
                    <SelectInput label="Регион" placeholder="Выберите регион" error=error_for(Field::Region)
                        options=regions
                        on_change=Callback::new(move |v: String| register.update(|f| f.region = v))/>
                </Show>

                <Show when=locked>
                    <p class="auth-form__locked">"Слишком много попыток. Подождите несколько секунд."</p>
                </Show>
                <button type="submit" class="btn btn--primary" disabled=move || in_flight() || locked()>
                    {move || match mode.get() {
                        AuthKind::Login => "Войти",
                        AuthKind::Register => "Зарегистрироваться",
                    }}
                </button>
            </form>
        </div>
    }
}

/// Clear the throttle once the lock period is over.
fn schedule_unlock(throttle: RwSignal<SubmitThrottle>) {
    #[cfg(feature = "csr")]
    gloo_timers::callback::Timeout::new(SUBMIT_LOCK_MS, move || throttle.update(SubmitThrottle::reset)).forget();
    #[cfg(not(feature = "csr"))]
    let _ = (throttle, SUBMIT_LOCK_MS);
}

#[component]
fn TextInput(
    label: &'static str,
    kind: &'static str,
    #[prop(into)] value: Signal<String>,
    on_input: Callback<String>,
    error: impl Fn() -> Option<&'static str> + Send + Sync + Copy + 'static,
) -> impl IntoView {
    view! {
        <label class="auth-form__field">
            {label}
            <input type=kind prop:value=move || value.get() on:input=move |ev| on_input.run(event_target_value(&ev))/>
            {move || error().map(|e| view! { <span class="auth-form__error">{e}</span> })}
        </label>
    }
}

#[component]
fn SelectInput(
    label: &'static str,
    placeholder: &'static str,
    options: LocalResource<Vec<NamedItem>>,
    on_change: Callback<String>,
    error: impl Fn() -> Option<&'static str> + Send + Sync + Copy + 'static,
) -> impl IntoView {
    view! {
        <label class="auth-form__field">
            {label}
            <select on:change=move |ev| on_change.run(event_target_value(&ev))>
                <option value="">{placeholder}</option>
                {move || {
                    options
                        .get()
                        .map(|items| {
                            items
                                .into_iter()
                                .map(|item| view! { <option value=item.id.to_string()>{item.name}</option> })
                                .collect::<Vec<_>>()
                        })
                }}
            </select>
            {move || error().map(|e| view! { <span class="auth-form__error">{e}</span> })}
        </label>
    }
}

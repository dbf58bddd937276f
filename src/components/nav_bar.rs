//! Top navigation with the sign-in / sign-out control.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::routes::{AUTH_PATH, AppRoute, CabinetSection};
use crate::state::notice::{MSG_LOGGED_OUT, NoticeKind, NoticeState};
use crate::state::session::Session;

const LINKS: [(AppRoute, &str); 8] = [
    (AppRoute::Home, "Главная"),
    (AppRoute::Regions, "Регионы"),
    (AppRoute::Admins, "Администрация"),
    (AppRoute::Command, "Команды"),
    (AppRoute::Competitions, "Соревнования"),
    (AppRoute::Rating, "Рейтинг"),
    (AppRoute::News, "Новости"),
    (AppRoute::Faq, "FAQ"),
];

#[component]
pub fn NavBar() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    let is_auth = move || session.with(Session::is_authenticated);

    let on_logout = move |_| {
        session.update(Session::clear);
        notices.update(|n| n.show(NoticeKind::Success, MSG_LOGGED_OUT));
        navigate(&AppRoute::Home.to_path(), NavigateOptions::default());
    };

    view! {
        <header class="nav-bar">
            <nav class="nav-bar__links">
                {LINKS
                    .into_iter()
                    .map(|(route, label)| {
                        view! { <a class="nav-bar__link" href=route.to_path()>{label}</a> }
                    })
                    .collect::<Vec<_>>()}
            </nav>
            <div class="nav-bar__account">
                <Show
                    when=is_auth
                    fallback=|| view! { <a class="btn btn--primary" href=AUTH_PATH>"Войти"</a> }
                >
                    <a class="nav-bar__link" href=AppRoute::Cabinet(CabinetSection::Profile).to_path()>
                        "Личный кабинет"
                    </a>
                    <button class="btn" on:click=on_logout.clone()>"Выйти"</button>
                </Show>
            </div>
        </header>
    }
}

//! Landing page.

use leptos::prelude::*;

use crate::routes::AppRoute;
use crate::state::session::Session;

#[component]
pub fn HomePage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();

    let cta = move || {
        if session.with(Session::is_authenticated) {
            (AppRoute::Competitions.to_path(), "Смотреть соревнования")
        } else {
            (AppRoute::Auth.to_path(), "Зарегистрироваться")
        }
    };

    view! {
        <div class="home-page">
            <section class="home-page__hero">
                <h1>"Федерация спортивного программирования"</h1>
                <p>"Региональные и всероссийские соревнования, команды и рейтинг участников."</p>
                <a class="btn btn--primary" href=move || cta().0>{move || cta().1}</a>
            </section>
            <section class="home-page__links">
                <a class="home-page__card" href=AppRoute::Regions.to_path()>"Регионы"</a>
                <a class="home-page__card" href=AppRoute::Competitions.to_path()>"Соревнования"</a>
                <a class="home-page__card" href=AppRoute::Rating.to_path()>"Рейтинг"</a>
                <a class="home-page__card" href=AppRoute::News.to_path()>"Новости"</a>
            </section>
        </div>
    }
}

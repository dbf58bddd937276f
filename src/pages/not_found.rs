use leptos::prelude::*;

use crate::routes::AppRoute;

#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <div class="not-found-page">
            <h1>"404"</h1>
            <p>"Страница не найдена."</p>
            <a href=AppRoute::Home.to_path()>"На главную"</a>
        </div>
    }
}

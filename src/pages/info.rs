//! Read-only information pages: representatives, rating, news, FAQ.

use leptos::prelude::*;

use crate::components::page_strip::PageStrip;
use crate::config::{ApiConfig, FAQ_PATH, NEWS_PATH, REPRESENTATIVES_PATH, USERS_PATH};
use crate::net::types::{FaqItem, NewsItem, PersonItem};
use crate::pages::load_list;
use crate::util::pagination::Paginator;

const RATING_PER_PAGE: usize = 20;
const NEWS_PER_PAGE: usize = 6;

/// Regional representatives, one card per region.
#[component]
pub fn AdminsPage() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let people = LocalResource::new(move || load_list::<PersonItem>(config.clone(), REPRESENTATIVES_PATH, None));

    view! {
        <div class="info-page">
            <h1>"Региональные представители"</h1>
            <Suspense fallback=move || view! { <p>"Загрузка..."</p> }>
                {move || {
                    people
                        .get()
                        .map(|list| {
                            list.into_iter()
                                .map(|p| {
                                    view! {
                                        <div class="person-card">
                                            <h3>{p.region_name.clone().unwrap_or_default()}</h3>
                                            <p class="person-card__name">{p.full_name()}</p>
                                            <a class="person-card__email" href=format!("mailto:{}", p.email.clone().unwrap_or_default())>
                                                {p.email.clone().unwrap_or_default()}
                                            </a>
                                        </div>
                                    }
                                })
                                .collect::<Vec<_>>()
                        })
                }}
            </Suspense>
        </div>
    }
}

#[component]
pub fn RatingPage() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let people = LocalResource::new(move || load_list::<PersonItem>(config.clone(), USERS_PATH, None));
    let pager = RwSignal::new(Paginator::new(1, 1));

    Effect::new(move || {
        if let Some(list) = people.get() {
            pager.set(Paginator::for_items(list.len(), RATING_PER_PAGE));
        }
    });

    view! {
        <div class="info-page">
            <h1>"Рейтинг участников"</h1>
            <Suspense fallback=move || view! { <p>"Загрузка..."</p> }>
                {move || {
                    people
                        .get()
                        .map(|list| {
                            let range = pager.get().slice_range(RATING_PER_PAGE, list.len());
                            let offset = range.start;
                            view! {
                                <table class="rating-table">
                                    <thead>
                                        <tr>
                                            <th>"#"</th>
                                            <th>"Участник"</th>
                                            <th>"Рейтинг"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {list[range]
                                            .iter()
                                            .enumerate()
                                            .map(|(i, p)| {
                                                view! {
                                                    <tr>
                                                        <td>{offset + i + 1}</td>
                                                        <td>{p.full_name()}</td>
                                                        <td>{p.rating.unwrap_or_default()}</td>
                                                    </tr>
                                                }
                                            })
                                            .collect::<Vec<_>>()}
                                    </tbody>
                                </table>
                            }
                        })
                }}
            </Suspense>
            <PageStrip pager=pager/>
        </div>
    }
}

#[component]
pub fn NewsPage() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let news = LocalResource::new(move || load_list::<NewsItem>(config.clone(), NEWS_PATH, None));
    let pager = RwSignal::new(Paginator::new(1, 1));

    Effect::new(move || {
        if let Some(list) = news.get() {
            pager.set(Paginator::for_items(list.len(), NEWS_PER_PAGE));
        }
    });

    view! {
        <div class="info-page">
            <h1>"Новости"</h1>
            <Suspense fallback=move || view! { <p>"Загрузка..."</p> }>
                {move || {
                    news.get()
                        .map(|list| {
                            let range = pager.get().slice_range(NEWS_PER_PAGE, list.len());
                            list[range]
                                .iter()
                                .map(|item| {
                                    let image = item.image_url.clone();
                                    view! {
                                        <article class="news-card">
                                            {image.map(|src| view! { <img class="news-card__image" src=src alt=""/> })}
                                            <h3>{item.title.clone()}</h3>
                                            <time class="news-card__date">{item.date.clone()}</time>
                                            <p>{item.content.clone()}</p>
                                        </article>
                                    }
                                })
                                .collect::<Vec<_>>()
                        })
                }}
            </Suspense>
            <PageStrip pager=pager/>
        </div>
    }
}

/// Questions collapse to their headline; one answer is open at a time.
#[component]
pub fn FaqPage() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let faq = LocalResource::new(move || load_list::<FaqItem>(config.clone(), FAQ_PATH, None));
    let open = RwSignal::new(None::<i64>);

    view! {
        <div class="info-page">
            <h1>"Часто задаваемые вопросы"</h1>
            <Suspense fallback=move || view! { <p>"Загрузка..."</p> }>
                {move || {
                    faq.get()
                        .map(|list| {
                            list.into_iter()
                                .map(|item| {
                                    let id = item.id;
                                    let toggle = move |_| open.update(|o| *o = if *o == Some(id) { None } else { Some(id) });
                                    view! {
                                        <div class="faq-item">
                                            <button class="faq-item__question" on:click=toggle>{item.question}</button>
                                            <Show when=move || open.get() == Some(id)>
                                                <p class="faq-item__answer">{item.answer.clone()}</p>
                                            </Show>
                                        </div>
                                    }
                                })
                                .collect::<Vec<_>>()
                        })
                }}
            </Suspense>
        </div>
    }
}

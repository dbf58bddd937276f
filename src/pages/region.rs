//! Region list with a hover tooltip, and a per-region detail page.

use leptos::prelude::*;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_params_map;

use crate::config::{ApiConfig, REGIONS_PATH, REPRESENTATIVES_PATH};
use crate::net::types::{NamedItem, PersonItem};
use crate::pages::load_list;
use crate::routes::AppRoute;
use crate::util::hover::HoverState;

/// Shared frame for `/region` and `/region/:name`.
#[component]
pub fn RegionsLayout() -> impl IntoView {
    view! {
        <div class="region-page">
            <h1>"Регионы"</h1>
            <Outlet/>
        </div>
    }
}

#[component]
pub fn RegionListPage() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let regions = LocalResource::new(move || load_list::<NamedItem>(config.clone(), REGIONS_PATH, None));
    let hover = RwSignal::new(HoverState::default());

    view! {
        <ul class="region-list" on:mouseleave=move |_| hover.update(HoverState::hide)>
            <Suspense fallback=move || view! { <li>"Загрузка..."</li> }>
                {move || {
                    regions
                        .get()
                        .map(|list| {
                            list.into_iter()
                                .map(|region| {
                                    let name = region.name;
                                    let href = AppRoute::RegionDetail(name.clone()).to_path();
                                    let hover_name = name.clone();
                                    let label = name.clone();
                                    view! {
                                        <li
                                            class="region-list__item"
                                            class:region-list__item--active=move || {
                                                hover.with(|h| h.region.as_deref() == Some(name.as_str()))
                                            }
                                            on:mouseenter=move |ev: leptos::ev::MouseEvent| {
                                                hover.update(|h| h.show(&hover_name, ev.client_x(), ev.client_y()));
                                            }
                                            on:mousemove=move |ev: leptos::ev::MouseEvent| {
                                                hover.update(|h| h.update_position(ev.client_x(), ev.client_y()));
                                            }
                                        >
                                            <a href=href>{label}</a>
                                        </li>
                                    }
                                })
                                .collect::<Vec<_>>()
                        })
                }}
            </Suspense>
        </ul>
        <Show when=move || hover.with(|h| h.tooltip.visible)>
            <div
                class="region-tooltip"
                style:left=move || format!("{}px", hover.with(|h| h.tooltip.x))
                style:top=move || format!("{}px", hover.with(|h| h.tooltip.y))
            >
                {move || hover.with(|h| h.tooltip.text.clone())}
            </div>
        </Show>
    }
}

/// Representatives of the region named in the URL.
#[component]
pub fn RegionDetailPage() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let params = use_params_map();
    let name = move || params.with(|p| p.get("name").unwrap_or_default());
    let people = LocalResource::new(move || load_list::<PersonItem>(config.clone(), REPRESENTATIVES_PATH, None));

    view! {
        <section class="region-detail">
            <a href=AppRoute::Regions.to_path()>"← Все регионы"</a>
            <h2>{name}</h2>
            <Suspense fallback=move || view! { <p>"Загрузка..."</p> }>
                {move || {
                    let region = name();
                    people
                        .get()
                        .map(|list| {
                            let matching: Vec<_> = list
                                .into_iter()
                                .filter(|p| p.region_name.as_deref() == Some(region.as_str()))
                                .collect();
                            if matching.is_empty() {
                                view! { <p>"Представитель региона не назначен."</p> }.into_any()
                            } else {
                                matching
                                    .into_iter()
                                    .map(|p| {
                                        view! {
                                            <div class="person-card">
                                                <p class="person-card__name">{p.full_name()}</p>
                                                <p class="person-card__email">{p.email.unwrap_or_default()}</p>
                                            </div>
                                        }
                                    })
                                    .collect::<Vec<_>>()
                                    .into_any()
                            }
                        })
                }}
            </Suspense>
        </section>
    }
}

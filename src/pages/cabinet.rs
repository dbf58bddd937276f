//! Personal cabinet: section navigation and the section pages.
//!
//! Every route here sits behind the auth guard, so the pages can assume a
//! credential is present. Requests that fail anyway (expired token) show
//! the server's message in place of the data.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::Outlet;
use leptos_router::hooks::use_navigate;

use crate::config::{
    APPROVALS_PATH, ApiConfig, COMPETITIONS_PATH, ORGANIZER_TEAM_APPLICATIONS_PATH, USER_INVITATIONS_PATH, USER_TEAMS_PATH,
};
use crate::net::api::fetch_user_profile;
use crate::net::http::BrowserTransport;
use crate::net::types::{ApplicationItem, CompetitionItem, PersonItem, TeamItem, UserProfile};
use crate::pages::load_list;
use crate::routes::{AppRoute, CabinetSection};
use crate::state::notice::{MSG_LOGGED_OUT, NoticeKind, NoticeState};
use crate::state::session::Session;
use crate::util::dates::format_reg_date;

fn token(session: RwSignal<Session>) -> Option<String> {
    session.with(|s| s.credential().map(str::to_owned))
}

#[component]
pub fn CabinetLayout() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let notices = expect_context::<RwSignal<NoticeState>>();
    let navigate = use_navigate();

    let on_logout = move |_| {
        session.update(Session::clear);
        notices.update(|n| n.show(NoticeKind::Success, MSG_LOGGED_OUT));
        navigate(&AppRoute::Home.to_path(), NavigateOptions::default());
    };

    view! {
        <div class="cabinet">
            <aside class="cabinet__nav">
                {CabinetSection::ALL
                    .into_iter()
                    .map(|section| {
                        view! {
                            <a class="cabinet__link" href=AppRoute::Cabinet(section).to_path()>
                                {section.title()}
                            </a>
                        }
                    })
                    .collect::<Vec<_>>()}
                <button class="btn cabinet__logout" on:click=on_logout>"Выйти"</button>
            </aside>
            <main class="cabinet__content">
                <Outlet/>
            </main>
        </div>
    }
}

#[component]
pub fn ProfileSection() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let config = expect_context::<ApiConfig>();

    let profile = LocalResource::new(move || {
        let config = config.clone();
        let token = token(session);
        async move {
            fetch_user_profile(&BrowserTransport, &config, token.as_deref())
                .await
                .map(|body| UserProfile::from_body(&body))
                .map_err(|e| e.to_string())
        }
    });

    view! {
        <h2>{CabinetSection::Profile.title()}</h2>
        <Suspense fallback=move || view! { <p>"Загрузка..."</p> }>
            {move || {
                profile
                    .get()
                    .map(|result| match result {
                        Ok(profile) => {
                            let account = profile.user.unwrap_or_default();
                            let info = profile.info.unwrap_or_default();
                            let full_name = [info.surname, info.name, info.patronymic]
                                .into_iter()
                                .flatten()
                                .collect::<Vec<_>>()
                                .join(" ");
                            let approved = if info.is_approved.unwrap_or(false) { "Подтверждён" } else { "Ожидает подтверждения" };
                            view! {
                                <dl class="profile">
                                    <dt>"ФИО"</dt>
                                    <dd>{full_name}</dd>
                                    <dt>"Никнейм"</dt>
                                    <dd>{account.nickname.unwrap_or_default()}</dd>
                                    <dt>"Email"</dt>
                                    <dd>{account.email.unwrap_or_default()}</dd>
                                    <dt>"Дата рождения"</dt>
                                    <dd>{info.birthday.as_deref().map(format_reg_date).unwrap_or_default()}</dd>
                                    <dt>"Регион"</dt>
                                    <dd>{info.region_name.unwrap_or_default()}</dd>
                                    <dt>"Статус"</dt>
                                    <dd>{info.role_name.unwrap_or_default()}</dd>
                                    <dt>"Аккаунт"</dt>
                                    <dd>{approved}</dd>
                                </dl>
                            }
                                .into_any()
                        }
                        Err(message) => view! { <p class="form-errors">{message}</p> }.into_any(),
                    })
            }}
        </Suspense>
    }
}

#[component]
pub fn MyTeamSection() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let config = expect_context::<ApiConfig>();
    let teams = LocalResource::new(move || load_list::<TeamItem>(config.clone(), USER_TEAMS_PATH, token(session)));

    view! {
        <h2>{CabinetSection::MyTeam.title()}</h2>
        <Suspense fallback=move || view! { <p>"Загрузка..."</p> }>
            {move || teams.get().map(|list| team_cards(list, false))}
        </Suspense>
    }
}

#[component]
pub fn MyTeamApplicationsSection() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let config = expect_context::<ApiConfig>();
    let teams = LocalResource::new(move || load_list::<TeamItem>(config.clone(), USER_TEAMS_PATH, token(session)));

    view! {
        <h2>{CabinetSection::MyTeamApplications.title()}</h2>
        <Suspense fallback=move || view! { <p>"Загрузка..."</p> }>
            {move || teams.get().map(|list| team_cards(list, true))}
        </Suspense>
    }
}

fn team_cards(list: Vec<TeamItem>, show_application: bool) -> impl IntoView {
    if list.is_empty() {
        return view! { <p>"Вы пока не состоите в команде."</p> }.into_any();
    }
    list.into_iter()
        .map(|team| {
            let applied = show_application.then(|| if team.is_register { "Заявка подана" } else { "Заявка не подана" });
            view! {
                <div class="team-card">
                    <h3>{team.name}</h3>
                    <p>{team.description}</p>
                    {applied.map(|label| view! { <p class="team-card__status">{label}</p> })}
                </div>
            }
        })
        .collect::<Vec<_>>()
        .into_any()
}

#[component]
pub fn AllCompetitionsSection() -> impl IntoView {
    let config = expect_context::<ApiConfig>();
    let list = LocalResource::new(move || load_list::<CompetitionItem>(config.clone(), COMPETITIONS_PATH, None));

    view! {
        <h2>{CabinetSection::AllCompetitions.title()}</h2>
        <Suspense fallback=move || view! { <p>"Загрузка..."</p> }>
            {move || {
                list.get()
                    .map(|items| {
                        items
                            .into_iter()
                            .map(|c| {
                                let dates = c.date_range().unwrap_or_default();
                                view! {
                                    <div class="competition-row">
                                        <span>{c.name}</span>
                                        <span>{dates}</span>
                                        <span>{c.status}</span>
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()
                    })
            }}
        </Suspense>
    }
}

#[component]
pub fn UserApprovalsSection() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let config = expect_context::<ApiConfig>();
    let people = LocalResource::new(move || load_list::<PersonItem>(config.clone(), APPROVALS_PATH, token(session)));

    view! {
        <h2>{CabinetSection::UserApprovals.title()}</h2>
        <Suspense fallback=move || view! { <p>"Загрузка..."</p> }>
            {move || {
                people
                    .get()
                    .map(|list| {
                        list.into_iter()
                            .map(|p| {
                                view! {
                                    <div class="person-card">
                                        <p class="person-card__name">{p.full_name()}</p>
                                        <p class="person-card__email">{p.email.unwrap_or_default()}</p>
                                    </div>
                                }
                            })
                            .collect::<Vec<_>>()
                    })
            }}
        </Suspense>
    }
}

/// Team applications addressed to the organizer. `approved_only` selects
/// the "approved" tab.
#[component]
pub fn ApplicationsSection(#[prop(optional)] approved_only: bool) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let config = expect_context::<ApiConfig>();
    let items = LocalResource::new(move || {
        load_list::<ApplicationItem>(config.clone(), ORGANIZER_TEAM_APPLICATIONS_PATH, token(session))
    });
    let section = if approved_only { CabinetSection::ApprovedApplications } else { CabinetSection::Applications };

    view! {
        <h2>{section.title()}</h2>
        <Suspense fallback=move || view! { <p>"Загрузка..."</p> }>
            {move || {
                items.get().map(|list| {
                    list.into_iter()
                        .filter(|a| !approved_only || a.is_approved())
                        .map(application_row)
                        .collect::<Vec<_>>()
                })
            }}
        </Suspense>
    }
}

#[component]
pub fn ApprovedApplicationsSection() -> impl IntoView {
    view! { <ApplicationsSection approved_only=true/> }
}

/// Invitations to join a team.
#[component]
pub fn MessagesSection() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let config = expect_context::<ApiConfig>();
    let items = LocalResource::new(move || load_list::<ApplicationItem>(config.clone(), USER_INVITATIONS_PATH, token(session)));

    view! {
        <h2>{CabinetSection::Messages.title()}</h2>
        <Suspense fallback=move || view! { <p>"Загрузка..."</p> }>
            {move || {
                items.get().map(|list| {
                    if list.is_empty() {
                        view! { <p>"Новых сообщений нет."</p> }.into_any()
                    } else {
                        list.into_iter().map(application_row).collect::<Vec<_>>().into_any()
                    }
                })
            }}
        </Suspense>
    }
}

fn application_row(item: ApplicationItem) -> impl IntoView {
    let status = item.status_label().to_owned();
    view! {
        <div class="application-row">
            <span>{item.team_name.unwrap_or_default()}</span>
            <span>{item.competition_name.unwrap_or_default()}</span>
            <span>{status}</span>
            {item.reason.map(|r| view! { <span class="application-row__reason">{r}</span> })}
        </div>
    }
}

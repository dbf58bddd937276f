//! Teams: public team list and the create-team form.

use leptos::prelude::*;
use serde_json::json;

use crate::components::notice_toast::NoticeToast;
use crate::config::{ApiConfig, COMPETITIONS_PATH, PUBLIC_TEAMS_PATH, TEAMS_PATH};
use crate::net::http::BrowserTransport;
use crate::net::types::{CompetitionItem, TeamItem};
use crate::pages::{load_list, spawn};
use crate::routes::AUTH_PATH;
use crate::state::command::{CommandState, TeamKind, create_team};
use crate::state::session::Session;
use crate::util::validate::{TEAM_DESCRIPTION_MAX, validate_team_form};

#[component]
pub fn CommandPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let command = expect_context::<RwSignal<CommandState>>();
    let config = expect_context::<ApiConfig>();

    let teams = {
        let config = config.clone();
        LocalResource::new(move || load_list::<TeamItem>(config.clone(), PUBLIC_TEAMS_PATH, None))
    };

    let is_auth = move || session.with(Session::is_authenticated);

    view! {
        <div class="command-page">
            <header class="command-page__header">
                <h1>"Команды"</h1>
                <Show
                    when=is_auth
                    fallback=|| view! { <a class="btn" href=AUTH_PATH>"Войдите, чтобы создать команду"</a> }
                >
                    <button
                        class="btn btn--primary"
                        on:click=move |_| {
                            command.update(|c| {
                                c.is_creating = true;
                                c.kind = Some(TeamKind::Public);
                            });
                        }
                    >
                        "Создать команду"
                    </button>
                </Show>
            </header>

            <NoticeToast
                notice=Signal::derive(move || command.with(|c| c.notice.clone()))
                on_dismiss=Callback::new(move |()| command.update(|c| c.notice.visible = false))
            />

            <Show when=move || command.with(|c| c.is_creating)>
                <CreateTeamForm config=config.clone() teams=teams/>
            </Show>

            <Suspense fallback=move || view! { <p>"Загрузка..."</p> }>
                {move || {
                    teams
                        .get()
                        .map(|list| {
                            list.into_iter()
                                .map(|team| {
                                    view! {
                                        <div class="team-card">
                                            <h3>{team.name}</h3>
                                            <p>{team.description}</p>
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
fn CreateTeamForm(config: ApiConfig, teams: LocalResource<Vec<TeamItem>>) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let command = expect_context::<RwSignal<CommandState>>();

    let competitions = {
        let config = config.clone();
        LocalResource::new(move || load_list::<CompetitionItem>(config.clone(), COMPETITIONS_PATH, None))
    };

    let name = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let competition = RwSignal::new(String::new());
    let errors = RwSignal::new(Vec::<&'static str>::new());

    let kind_code = move || command.with(|c| c.kind.map_or("", TeamKind::code));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let problems = validate_team_form(&name.get(), kind_code(), &description.get());
        if !problems.is_empty() {
            errors.set(problems);
            return;
        }
        errors.set(Vec::new());

        let kind = command.with(|c| c.kind);
        let form = json!({
            "competition": competition.get().parse::<i64>().ok(),
            "name": name.get().trim(),
            "description": description.get(),
            "is_private": kind == Some(TeamKind::Private),
        });
        let token = session.with(|s| s.credential().map(str::to_owned));
        let url = config.url(TEAMS_PATH);
        let teams = teams.clone();
        spawn(async move {
            if create_team(&command, &BrowserTransport, &url, &form, token.as_deref()).await {
                teams.refetch();
            }
        });
    };

    view! {
        <form class="team-form" on:submit=on_submit>
            <label>
                "Название"
                <input type="text" prop:value=move || name.get() on:input=move |ev| name.set(event_target_value(&ev))/>
            </label>
            <label>
                "Вид команды"
                <select
                    prop:value=kind_code
                    on:change=move |ev| {
                        let kind = TeamKind::from_code(&event_target_value(&ev));
                        command.update(|c| c.kind = kind);
                    }
                >
                    {[TeamKind::Public, TeamKind::Private]
                        .into_iter()
                        .map(|k| view! { <option value=k.code()>{k.label()}</option> })
                        .collect::<Vec<_>>()}
                </select>
            </label>
            <label>
                "Соревнование"
                <select prop:value=move || competition.get() on:change=move |ev| competition.set(event_target_value(&ev))>
                    <option value="">"Не выбрано"</option>
                    {move || {
                        competitions
                            .get()
                            .map(|list| {
                                list.into_iter()
                                    .map(|c| view! { <option value=c.id.to_string()>{c.name}</option> })
                                    .collect::<Vec<_>>()
                            })
                    }}
                </select>
            </label>
            <label>
                {format!("Описание (до {TEAM_DESCRIPTION_MAX} символов)")}
                <textarea prop:value=move || description.get() on:input=move |ev| description.set(event_target_value(&ev))></textarea>
            </label>
            <ul class="form-errors">
                {move || errors.get().into_iter().map(|e| view! { <li>{e}</li> }).collect::<Vec<_>>()}
            </ul>
            <div class="team-form__actions">
                <button type="button" class="btn" on:click=move |_| command.update(|c| c.is_creating = false)>
                    "Отмена"
                </button>
                <button type="submit" class="btn btn--primary" disabled=move || command.with(|c| c.loading)>
                    "Создать"
                </button>
            </div>
        </form>
    }
}

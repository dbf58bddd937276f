//! Competition list with the apply dialog and the create-competition form.

use leptos::prelude::*;
use serde_json::json;

use crate::components::notice_toast::NoticeToast;
use crate::components::page_strip::PageStrip;
use crate::config::{ApiConfig, COMPETITIONS_PATH, DISCIPLINES_PATH, TEAM_APPLICATIONS_PATH, USER_TEAMS_PATH};
use crate::net::http::BrowserTransport;
use crate::net::types::{CompetitionItem, NamedItem, TeamItem};
use crate::pages::{load_list, spawn};
use crate::state::command::{CommandState, submit_application};
use crate::state::competition::{CompetitionState, create_competition};
use crate::state::session::Session;
use crate::util::pagination::Paginator;

const PER_PAGE: usize = 9;

#[component]
pub fn CompetitionsPage() -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let command = expect_context::<RwSignal<CommandState>>();
    let comp = expect_context::<RwSignal<CompetitionState>>();
    let config = expect_context::<ApiConfig>();

    let list = {
        let config = config.clone();
        LocalResource::new(move || load_list::<CompetitionItem>(config.clone(), COMPETITIONS_PATH, None))
    };
    let pager = RwSignal::new(Paginator::new(1, 1));
    let show_create = RwSignal::new(false);
    let create_config = config.clone();

    Effect::new(move || {
        if let Some(items) = list.get() {
            pager.set(Paginator::for_items(items.len(), PER_PAGE));
        }
    });

    let is_auth = move || session.with(Session::is_authenticated);

    let open_application = move |id: i64| {
        comp.update(|c| {
            c.selected_id = Some(id);
            c.team_id = None;
            c.application_open = true;
        });
    };

    view! {
        <div class="competitions-page">
            <header class="competitions-page__header">
                <h1>"Соревнования"</h1>
                <Show when=is_auth>
                    <button class="btn btn--primary" on:click=move |_| show_create.set(true)>
                        "Создать соревнование"
                    </button>
                </Show>
            </header>

            <NoticeToast
                notice=Signal::derive(move || command.with(|c| c.notice.clone()))
                on_dismiss=Callback::new(move |()| command.update(|c| c.notice.visible = false))
            />

            <Suspense fallback=move || view! { <p>"Загрузка..."</p> }>
                {move || {
                    list.get()
                        .map(|items| {
                            let range = pager.get().slice_range(PER_PAGE, items.len());
                            items[range]
                                .iter()
                                .cloned()
                                .map(|c| {
                                    let id = c.id;
                                    let dates = c.date_range().unwrap_or_else(|| "Даты уточняются".to_owned());
                                    view! {
                                        <article class="competition-card">
                                            <h3>{c.name}</h3>
                                            <p class="competition-card__discipline">{c.discipline_name.unwrap_or_default()}</p>
                                            <p class="competition-card__dates">{dates}</p>
                                            <Show when=is_auth>
                                                <button class="btn" on:click=move |_| open_application(id)>
                                                    "Подать заявку"
                                                </button>
                                            </Show>
                                        </article>
                                    }
                                })
                                .collect::<Vec<_>>()
                        })
                }}
            </Suspense>
            <PageStrip pager=pager/>

            <Show when=move || comp.with(|c| c.application_open)>
                <ApplicationDialog config=config.clone()/>
            </Show>
            <Show when=move || show_create.get()>
                <CreateCompetitionDialog config=create_config.clone() show=show_create list=list/>
            </Show>
        </div>
    }
}

/// Apply one of the user's teams to the selected competition.
#[component]
fn ApplicationDialog(config: ApiConfig) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let command = expect_context::<RwSignal<CommandState>>();
    let comp = expect_context::<RwSignal<CompetitionState>>();

    let token = move || session.with(|s| s.credential().map(str::to_owned));
    let my_teams = {
        let config = config.clone();
        LocalResource::new(move || load_list::<TeamItem>(config.clone(), USER_TEAMS_PATH, token()))
    };

    let close = move || comp.update(|c| c.application_open = false);

    let submit = move |_| {
        let (competition, team) = comp.with(|c| (c.selected_id, c.team_id));
        let Some(team) = team else {
            return;
        };
        let form = json!({ "team_id": team, "competition": competition });
        let url = config.url(TEAM_APPLICATIONS_PATH);
        let token = token();
        spawn(async move {
            submit_application(&command, &BrowserTransport, &url, &form, token.as_deref()).await;
            comp.update(|c| c.application_open = false);
        });
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| close()>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"Заявка на участие"</h2>
                <label class="dialog__label">
                    "Команда"
                    <select on:change=move |ev| {
                        let team = event_target_value(&ev).parse::<i64>().ok();
                        comp.update(|c| c.team_id = team);
                    }>
                        <option value="">"Выберите команду"</option>
                        {move || {
                            my_teams
                                .get()
                                .map(|teams| {
                                    teams
                                        .into_iter()
                                        .map(|t| view! { <option value=t.id.to_string()>{t.name}</option> })
                                        .collect::<Vec<_>>()
                                })
                        }}
                    </select>
                </label>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| close()>"Отмена"</button>
                    <button
                        class="btn btn--primary"
                        disabled=move || command.with(|c| c.loading) || comp.with(|c| c.team_id.is_none())
                        on:click=submit
                    >
                        "Отправить"
                    </button>
                </div>
            </div>
        </div>
    }
}

#[component]
fn CreateCompetitionDialog(config: ApiConfig, show: RwSignal<bool>, list: LocalResource<Vec<CompetitionItem>>) -> impl IntoView {
    let session = expect_context::<RwSignal<Session>>();
    let comp = expect_context::<RwSignal<CompetitionState>>();

    let disciplines = {
        let config = config.clone();
        LocalResource::new(move || load_list::<NamedItem>(config.clone(), DISCIPLINES_PATH, None))
    };

    let name = RwSignal::new(String::new());
    let discipline = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let registration_start = RwSignal::new(String::new());
    let registration_end = RwSignal::new(String::new());
    let start_date = RwSignal::new(String::new());
    let end_date = RwSignal::new(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let form = json!({
            "name": name.get().trim(),
            "discipline": discipline.get().parse::<i64>().ok(),
            "description": description.get(),
            "dates": {
                "registration_start": registration_start.get(),
                "registration_end": registration_end.get(),
                "start_date": start_date.get(),
                "end_date": end_date.get(),
            },
        });
        let token = session.with(|s| s.credential().map(str::to_owned));
        let config = config.clone();
        let list = list.clone();
        spawn(async move {
            if create_competition(&comp, &BrowserTransport, &config, &form, token.as_deref()).await {
                show.set(false);
                list.refetch();
            }
        });
    };

    let error = move || comp.with(|c| c.last_error.as_ref().map(ToString::to_string));

    let date_input = |label: &'static str, value: RwSignal<String>| {
        view! {
            <label class="dialog__label">
                {label}
                <input type="datetime-local" prop:value=move || value.get() on:input=move |ev| value.set(event_target_value(&ev))/>
            </label>
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| show.set(false)>
            <form class="dialog" on:click=move |ev| ev.stop_propagation() on:submit=on_submit>
                <h2>"Новое соревнование"</h2>
                <label class="dialog__label">
                    "Название"
                    <input type="text" prop:value=move || name.get() on:input=move |ev| name.set(event_target_value(&ev))/>
                </label>
                <label class="dialog__label">
                    "Дисциплина"
                    <select on:change=move |ev| discipline.set(event_target_value(&ev))>
                        <option value="">"Выберите дисциплину"</option>
                        {move || {
                            disciplines
                                .get()
                                .map(|items| {
                                    items
                                        .into_iter()
                                        .map(|d| view! { <option value=d.id.to_string()>{d.name}</option> })
                                        .collect::<Vec<_>>()
                                })
                        }}
                    </select>
                </label>
                <label class="dialog__label">
                    "Описание"
                    <textarea prop:value=move || description.get() on:input=move |ev| description.set(event_target_value(&ev))></textarea>
                </label>
                {date_input("Начало регистрации", registration_start)}
                {date_input("Конец регистрации", registration_end)}
                {date_input("Начало", start_date)}
                {date_input("Окончание", end_date)}
                {move || error().map(|e| view! { <p class="form-errors">{e}</p> })}
                <div class="dialog__actions">
                    <button type="button" class="btn" on:click=move |_| show.set(false)>"Отмена"</button>
                    <button type="submit" class="btn btn--primary" disabled=move || comp.with(|c| c.loading)>
                        "Создать"
                    </button>
                </div>
            </form>
        </div>
    }
}

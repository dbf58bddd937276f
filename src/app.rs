//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{ParentRoute, ProtectedParentRoute, Route, Router, Routes},
};

use crate::components::nav_bar::NavBar;
use crate::components::notice_toast::NoticeToast;
use crate::config::ApiConfig;
use crate::pages::auth::AuthPage;
use crate::pages::cabinet::{
    AllCompetitionsSection, ApplicationsSection, ApprovedApplicationsSection, CabinetLayout, MessagesSection,
    MyTeamApplicationsSection, MyTeamSection, ProfileSection, UserApprovalsSection,
};
use crate::pages::command::CommandPage;
use crate::pages::competitions::CompetitionsPage;
use crate::pages::home::HomePage;
use crate::pages::info::{AdminsPage, FaqPage, NewsPage, RatingPage};
use crate::pages::not_found::NotFoundPage;
use crate::pages::region::{RegionDetailPage, RegionListPage, RegionsLayout};
use crate::routes::{AUTH_PATH, AppRoute, CabinetSection, GuardOutcome, decide};
use crate::state::command::CommandState;
use crate::state::competition::CompetitionState;
use crate::state::notice::NoticeState;
use crate::state::session::Session;
use crate::util::storage::LocalStorage;

/// Root application component.
///
/// Restores the session from `localStorage`, provides every store as
/// context, and sets up client-side routing with the cabinet behind the
/// auth guard.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(Session::restore(Arc::new(LocalStorage)));
    let notices = RwSignal::new(NoticeState::default());
    let command = RwSignal::new(CommandState::default());
    let competition = RwSignal::new(CompetitionState::default());

    provide_context(ApiConfig::from_build_env());
    provide_context(session);
    provide_context(notices);
    provide_context(command);
    provide_context(competition);

    let cabinet_allowed = move || {
        let required = AppRoute::Cabinet(CabinetSection::Profile).requires_auth();
        let outcome = decide(required, session.with(Session::is_authenticated));
        Some(outcome == GuardOutcome::Allow)
    };

    view! {
        <Stylesheet id="portal" href="/pkg/portal.css"/>
        <Title text="Федерация спортивного программирования"/>

        <Router>
            <NavBar/>
            <NoticeToast
                notice=Signal::derive(move || notices.with(|n| n.notice.clone()))
                on_dismiss=Callback::new(move |()| notices.update(NoticeState::dismiss))
            />
            <Routes fallback=|| view! { <NotFoundPage/> }>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("auth") view=AuthPage/>
                <Route path=StaticSegment("admins") view=AdminsPage/>
                <ParentRoute path=StaticSegment("region") view=RegionsLayout>
                    <Route path=StaticSegment("") view=RegionListPage/>
                    <Route path=ParamSegment("name") view=RegionDetailPage/>
                </ParentRoute>
                <Route path=StaticSegment("command") view=CommandPage/>
                <Route path=StaticSegment("competitions") view=CompetitionsPage/>
                <Route path=StaticSegment("rating") view=RatingPage/>
                <Route path=StaticSegment("news") view=NewsPage/>
                <Route path=StaticSegment("FAQ") view=FaqPage/>
                <ProtectedParentRoute
                    path=StaticSegment("cabinet")
                    view=CabinetLayout
                    condition=cabinet_allowed
                    redirect_path=|| AUTH_PATH
                >
                    <Route path=StaticSegment(CabinetSection::Profile.segment()) view=ProfileSection/>
                    <Route path=StaticSegment(CabinetSection::MyTeam.segment()) view=MyTeamSection/>
                    <Route path=StaticSegment(CabinetSection::AllCompetitions.segment()) view=AllCompetitionsSection/>
                    <Route path=StaticSegment(CabinetSection::UserApprovals.segment()) view=UserApprovalsSection/>
                    <Route
                        path=StaticSegment(CabinetSection::ApprovedApplications.segment())
                        view=ApprovedApplicationsSection
                    />
                    <Route path=StaticSegment(CabinetSection::Applications.segment()) view=|| view! { <ApplicationsSection/> }/>
                    <Route
                        path=StaticSegment(CabinetSection::MyTeamApplications.segment())
                        view=MyTeamApplicationsSection
                    />
                    <Route path=StaticSegment(CabinetSection::Messages.segment()) view=MessagesSection/>
                </ProtectedParentRoute>
            </Routes>
        </Router>
    }
}

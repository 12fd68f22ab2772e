use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{AppServices, StudySessionService, SubjectService, TopicService};
use storage::repository::{InMemoryRepository, Storage, StudySessionRepository, SubjectRepository, TopicRepository};
use study_core::model::Subject;
use study_core::time::fixed_clock;

use crate::context::{UiApp, build_app_context};
use crate::views::{HomeView, SubjectDetail};

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn subject_service(&self) -> Arc<SubjectService> {
        self.services.subject_service()
    }

    fn topic_service(&self) -> Arc<TopicService> {
        self.services.topic_service()
    }

    fn session_service(&self) -> Arc<StudySessionService> {
        self.services.session_service()
    }
}

#[derive(Clone, PartialEq)]
pub enum ViewKind {
    Home,
    Detail(Subject),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    match props.view.clone() {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Detail(subject) => rsx! {
            SubjectDetail { subject, on_deleted: move |_| {} }
        },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// An in-memory store on the deterministic test clock; tests seed it
/// before mounting a view.
pub fn test_repo() -> InMemoryRepository {
    InMemoryRepository::with_clock(fixed_clock())
}

pub fn setup_view_harness(repo: &InMemoryRepository, view: ViewKind) -> ViewHarness {
    let subjects: Arc<dyn SubjectRepository> = Arc::new(repo.clone());
    let topics: Arc<dyn TopicRepository> = Arc::new(repo.clone());
    let sessions: Arc<dyn StudySessionRepository> = Arc::new(repo.clone());
    setup_view_harness_with_storage(
        Storage {
            subjects,
            topics,
            sessions,
        },
        view,
    )
}

pub fn setup_view_harness_with_storage(storage: Storage, view: ViewKind) -> ViewHarness {
    let app = Arc::new(TestApp {
        services: AppServices::new(&storage),
    });

    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { app, view });

    ViewHarness { dom }
}

use dioxus::prelude::*;

use study_core::model::SubjectId;

use crate::context::AppContext;

/// Captures a topic title scoped to the current subject; new topics always
/// start incomplete.
#[component]
pub fn TopicForm(subject_id: SubjectId, on_created: Callback<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let topic_service = ctx.topic_service();

    let mut title = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| None::<&'static str>);

    let blank = title().trim().is_empty();

    rsx! {
        div { class: "topic-form",
            h3 { "Add Topic" }
            div { class: "topic-form-input",
                input {
                    r#type: "text",
                    placeholder: "What do you want to learn next?",
                    value: "{title()}",
                    disabled: saving(),
                    oninput: move |evt| title.set(evt.value()),
                }
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    disabled: saving() || blank,
                    onclick: move |_| {
                        if title().trim().is_empty() {
                            return;
                        }
                        let topics = topic_service.clone();
                        spawn(async move {
                            saving.set(true);
                            match topics.create_topic(subject_id, title()).await {
                                Ok(_) => {
                                    title.set(String::new());
                                    error.set(None);
                                    on_created.call(());
                                }
                                Err(err) => {
                                    tracing::error!(%err, "failed to create topic");
                                    error.set(Some("Could not add the topic. Try again."));
                                }
                            }
                            saving.set(false);
                        });
                    },
                    if saving() { "Adding..." } else { "Add" }
                }
            }
            if let Some(message) = error() {
                p { class: "form-error", "{message}" }
            }
        }
    }
}

use dioxus::prelude::*;

use crate::context::AppContext;

/// Captures a title plus optional description and inserts a new subject.
///
/// Blank titles never reach the store: the submit control stays disabled
/// and the handler re-checks before spawning. On success the form clears
/// and the coordinator reloads; on failure the fields stay populated.
#[component]
pub fn SubjectForm(on_created: Callback<()>) -> Element {
    let ctx = use_context::<AppContext>();
    let subject_service = ctx.subject_service();

    let mut title = use_signal(String::new);
    let mut description = use_signal(String::new);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| None::<&'static str>);

    let blank = title().trim().is_empty();

    rsx! {
        div { class: "subject-form",
            h2 { "New Subject" }
            div { class: "form-group",
                input {
                    r#type: "text",
                    placeholder: "Subject title",
                    value: "{title()}",
                    disabled: saving(),
                    oninput: move |evt| title.set(evt.value()),
                }
            }
            div { class: "form-group",
                textarea {
                    placeholder: "Description (optional)",
                    rows: "3",
                    value: "{description()}",
                    disabled: saving(),
                    oninput: move |evt| description.set(evt.value()),
                }
            }
            if let Some(message) = error() {
                p { class: "form-error", "{message}" }
            }
            button {
                class: "btn btn-primary",
                r#type: "button",
                disabled: saving() || blank,
                onclick: move |_| {
                    if title().trim().is_empty() {
                        return;
                    }
                    let subjects = subject_service.clone();
                    spawn(async move {
                        saving.set(true);
                        match subjects.create_subject(title(), description()).await {
                            Ok(_) => {
                                title.set(String::new());
                                description.set(String::new());
                                error.set(None);
                                on_created.call(());
                            }
                            Err(err) => {
                                tracing::error!(%err, "failed to create subject");
                                error.set(Some("Could not create the subject. Try again."));
                            }
                        }
                        saving.set(false);
                    });
                },
                if saving() { "Creating..." } else { "Create Subject" }
            }
        }
    }
}

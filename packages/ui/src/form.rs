use dioxus::prelude::*;

/// Caption above a form control. The control is nested in the `label`, which
/// associates the two without ids.
#[component]
pub fn FormField(label: String, children: Element) -> Element {
    rsx! {
        label {
            class: "form-field",
            span { class: "form-label", "{label}" }
            {children}
        }
    }
}

/// Footer row of a modal form.
#[component]
pub fn FormActions(submit_label: String, busy: bool, on_cancel: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "form-actions",
            button {
                class: "btn",
                r#type: "button",
                onclick: move |_| on_cancel.call(()),
                "Cancel"
            }
            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: busy,
                if busy { "Saving..." } else { "{submit_label}" }
            }
        }
    }
}

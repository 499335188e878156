//! 応募登録フォーム

use leptos::prelude::*;
use job_tracker_common::{JobInput, JobStatus};

fn optional(value: String) -> Option<String> {
    let value = value.trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[component]
pub fn JobForm<FA>(on_add: FA) -> impl IntoView
where
    FA: Fn(JobInput) + 'static + Clone + Send,
{
    let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();

    let (company, set_company) = signal(String::new());
    let (position, set_position) = signal(String::new());
    let (status, set_status) = signal(JobStatus::Applied);
    let (date, set_date) = signal(today.clone());
    let (link, set_link) = signal(String::new());
    let (notes, set_notes) = signal(String::new());
    let (platform, set_platform) = signal(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        // 会社名・職種は必須
        if company.get().trim().is_empty() || position.get().trim().is_empty() {
            return;
        }

        on_add(JobInput {
            company: company.get().trim().to_string(),
            position: position.get().trim().to_string(),
            status: status.get(),
            date: date.get(),
            link: optional(link.get()),
            notes: optional(notes.get()),
            platform: optional(platform.get()),
            ..Default::default()
        });

        set_company.set(String::new());
        set_position.set(String::new());
        set_status.set(JobStatus::Applied);
        set_date.set(today.clone());
        set_link.set(String::new());
        set_notes.set(String::new());
        set_platform.set(String::new());
    };

    view! {
        <form class="job-form" on:submit=on_submit>
            <div class="form-group">
                <label for="company">"Company"</label>
                <input
                    type="text"
                    id="company"
                    required
                    prop:value=move || company.get()
                    on:input=move |ev| set_company.set(event_target_value(&ev))
                />
            </div>

            <div class="form-group">
                <label for="position">"Position"</label>
                <input
                    type="text"
                    id="position"
                    required
                    prop:value=move || position.get()
                    on:input=move |ev| set_position.set(event_target_value(&ev))
                />
            </div>

            <div class="form-group">
                <label for="status">"Status"</label>
                <select
                    id="status"
                    prop:value=move || status.get().as_str()
                    on:change=move |ev| {
                        if let Ok(s) = event_target_value(&ev).parse::<JobStatus>() {
                            set_status.set(s);
                        }
                    }
                >
                    {JobStatus::ALL
                        .into_iter()
                        .map(|s| view! { <option value={s.as_str()}>{s.as_str()}</option> })
                        .collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="date">"Date Applied"</label>
                <input
                    type="date"
                    id="date"
                    prop:value=move || date.get()
                    on:input=move |ev| set_date.set(event_target_value(&ev))
                />
            </div>

            <div class="form-group">
                <label for="platform">"Platform"</label>
                <input
                    type="text"
                    id="platform"
                    placeholder="LinkedIn, Indeed..."
                    prop:value=move || platform.get()
                    on:input=move |ev| set_platform.set(event_target_value(&ev))
                />
            </div>

            <div class="form-group">
                <label for="link">"Link"</label>
                <input
                    type="url"
                    id="link"
                    prop:value=move || link.get()
                    on:input=move |ev| set_link.set(event_target_value(&ev))
                />
            </div>

            <div class="form-group">
                <label for="notes">"Notes"</label>
                <textarea
                    id="notes"
                    prop:value=move || notes.get()
                    on:input=move |ev| set_notes.set(event_target_value(&ev))
                />
            </div>

            <button type="submit" class="btn btn-primary">"Add Application"</button>
        </form>
    }
}

//! 応募一覧（検索・ステータス・応募経路で絞り込み）

use leptos::prelude::*;
use job_tracker_common::{platforms, JobFilter, JobId, JobRecord, JobStatus};

#[component]
pub fn JobList<FS, FD>(
    jobs: ReadSignal<Vec<JobRecord>>,
    on_status_change: FS,
    on_delete: FD,
) -> impl IntoView
where
    FS: Fn((JobId, JobStatus)) + 'static + Clone + Send + Sync,
    FD: Fn(JobRecord) + 'static + Clone + Send + Sync,
{
    let (search, set_search) = signal(String::new());
    let (status_filter, set_status_filter) = signal(None::<JobStatus>);
    let (platform_filter, set_platform_filter) = signal(None::<String>);

    let filtered = move || {
        let filter = JobFilter {
            term: search.get(),
            status: status_filter.get(),
            platform: platform_filter.get(),
        };
        jobs.with(|j| filter.apply(j).into_iter().cloned().collect::<Vec<_>>())
    };

    view! {
        <div class="job-list">
            <div class="filters">
                <input
                    type="search"
                    placeholder="Search by position, company, or notes..."
                    prop:value=move || search.get()
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                />
                <select on:change=move |ev| {
                    set_status_filter.set(event_target_value(&ev).parse::<JobStatus>().ok());
                }>
                    <option value="">"All Statuses"</option>
                    {JobStatus::ALL
                        .into_iter()
                        .map(|s| view! { <option value={s.as_str()}>{s.as_str()}</option> })
                        .collect_view()}
                </select>
                <select on:change=move |ev| {
                    let value = event_target_value(&ev);
                    set_platform_filter.set(if value.is_empty() { None } else { Some(value) });
                }>
                    <option value="">"All Platforms"</option>
                    {move || jobs.with(|j| platforms(j))
                        .into_iter()
                        .map(|p| view! { <option value={p.clone()}>{p.clone()}</option> })
                        .collect_view()}
                </select>
            </div>

            <Show
                when=move || !filtered().is_empty()
                fallback=|| view! { <p class="text-muted">"No jobs found. Try adjusting your search or filters"</p> }
            >
                <table class="job-table">
                    <thead>
                        <tr>
                            <th>"Company"</th>
                            <th>"Position"</th>
                            <th>"Platform"</th>
                            <th>"Date"</th>
                            <th>"Status"</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=filtered
                            key=|job| (job.id.clone(), job.status, job.updated_at.clone())
                            children={
                                let on_status_change = on_status_change.clone();
                                let on_delete = on_delete.clone();
                                move |job: JobRecord| {
                                    let on_status_change = on_status_change.clone();
                                    let on_delete = on_delete.clone();
                                    view! {
                                        <JobRow
                                            job=job
                                            on_status_change=on_status_change
                                            on_delete=on_delete
                                        />
                                    }
                                }
                            }
                        />
                    </tbody>
                </table>
            </Show>
        </div>
    }
}

#[component]
fn JobRow<FS, FD>(job: JobRecord, on_status_change: FS, on_delete: FD) -> impl IntoView
where
    FS: Fn((JobId, JobStatus)) + 'static + Clone + Send + Sync,
    FD: Fn(JobRecord) + 'static + Clone + Send + Sync,
{
    let id = job.id.clone();
    let current = job.status;
    let record = job.clone();

    view! {
        <tr>
            <td>
                {match job.link.clone() {
                    Some(link) => view! { <a href=link target="_blank" rel="noopener noreferrer">{job.company.clone()}</a> }.into_any(),
                    None => job.company.clone().into_any(),
                }}
            </td>
            <td>{job.position.clone()}</td>
            <td>{job.platform.clone().unwrap_or_default()}</td>
            <td>{job.date.clone()}</td>
            <td>
                <select
                    class=format!("status-select status-{}", current.as_str().to_lowercase())
                    prop:value={current.as_str()}
                    on:change=move |ev| {
                        if let Ok(status) = event_target_value(&ev).parse::<JobStatus>() {
                            if status != current {
                                on_status_change((id.clone(), status));
                            }
                        }
                    }
                >
                    {JobStatus::ALL
                        .into_iter()
                        .map(|s| view! { <option value={s.as_str()} selected={s == current}>{s.as_str()}</option> })
                        .collect_view()}
                </select>
            </td>
            <td>
                <button
                    class="btn btn-tertiary btn-small"
                    on:click=move |_| on_delete(record.clone())
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
}

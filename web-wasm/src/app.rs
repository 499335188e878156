//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use crate::components::{
    header::Header,
    stat_cards::StatCards,
    job_form::JobForm,
    job_list::JobList,
    monthly_chart::MonthlyChart,
};
use crate::local_storage::LocalBlobStore;
use job_tracker_common::{
    JobId, JobInput, JobPatch, JobRecord, JobStatus, RecordStore, DEFAULT_MONTHS_BACK,
    DEFAULT_STORAGE_KEY,
};

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // ストア本体（変更は必ずここを経由して localStorage と同期する）
    let store = StoredValue::new(RecordStore::open(LocalBlobStore, DEFAULT_STORAGE_KEY));
    let (jobs, set_jobs) = signal(store.with_value(|s| s.records().to_vec()));
    let (error, set_error) = signal(None::<String>);

    let refresh = move || set_jobs.set(store.with_value(|s| s.records().to_vec()));

    let report = move |result: job_tracker_common::Result<()>| match result {
        Ok(()) => set_error.set(None),
        Err(e) => {
            web_sys::console::error_1(&e.to_string().into());
            set_error.set(Some(e.to_string()));
        }
    };

    // 登録
    let on_add = move |input: JobInput| {
        let result = store.try_update_value(|s| s.add(input).map(|_| ()));
        report(result.unwrap_or(Ok(())));
        refresh();
    };

    // ステータス変更
    let on_status_change = move |(id, status): (JobId, JobStatus)| {
        let patch = JobPatch {
            status: Some(status),
            ..Default::default()
        };
        let result = store.try_update_value(|s| s.update(&id, &patch).map(|_| ()));
        report(result.unwrap_or(Ok(())));
        refresh();
    };

    // 削除（確認はここで行う）
    let on_delete = move |record: JobRecord| {
        let message = format!("{} / {} を削除しますか？", record.company, record.position);
        let confirmed = window().confirm_with_message(&message).unwrap_or(false);
        if !confirmed {
            return;
        }
        let result = store.try_update_value(|s| s.remove(&record.id).map(|_| ()));
        report(result.unwrap_or(Ok(())));
        refresh();
    };

    let today = chrono::Local::now().date_naive();

    view! {
        <div class="container">
            <Header />

            <Show when=move || error.get().is_some()>
                <p class="error-message">{move || error.get().unwrap_or_default()}</p>
            </Show>

            <StatCards jobs=jobs />

            <MonthlyChart jobs=jobs today=today months_back=DEFAULT_MONTHS_BACK />

            <JobForm on_add=on_add />

            <Show
                when=move || !jobs.get().is_empty()
                fallback=|| view! { <p class="text-muted">"まだ応募記録がありません。上のフォームから登録してください"</p> }
            >
                <JobList
                    jobs=jobs
                    on_status_change=on_status_change
                    on_delete=on_delete
                />
            </Show>
        </div>
    }
}

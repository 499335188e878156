//! 統計カード・ステータス内訳コンポーネント

use leptos::prelude::*;
use job_tracker_common::{summarize, JobRecord};

#[component]
pub fn StatCards(jobs: ReadSignal<Vec<JobRecord>>) -> impl IntoView {
    let summary = Memo::new(move |_| jobs.with(|j| summarize(j)));

    view! {
        <div class="stats-grid">
            <div class="stat-card">
                <h3>"Total Applications"</h3>
                <p class="stat-value">{move || summary.get().total}</p>
            </div>
            <div class="stat-card">
                <h3>"Active Applications"</h3>
                <p class="stat-value">{move || summary.get().active}</p>
            </div>
            <div class="stat-card">
                <h3>"Success Rate"</h3>
                <p class="stat-value">{move || format!("{}%", summary.get().success_rate)}</p>
            </div>
            <div class="stat-card">
                <h3>"Interview Rate"</h3>
                <p class="stat-value">{move || format!("{}%", summary.get().interview_rate)}</p>
            </div>
        </div>

        // 円グラフの代わりにステータス別の割合バー
        <div class="status-breakdown">
            {move || {
                let summary = summary.get();
                let total = summary.total.max(1);
                summary
                    .counts
                    .iter()
                    .map(|(status, count)| {
                        let width = count * 100 / total;
                        view! {
                            <div class="status-row">
                                <span class=format!("status-label status-{}", status.as_str().to_lowercase())>
                                    {status.as_str()}
                                </span>
                                <div class="progress-bar">
                                    <div class="progress-fill" style=format!("width: {}%", width) />
                                </div>
                                <span class="status-count">{count}</span>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
